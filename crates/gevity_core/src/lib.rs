//! Gevity core: pure state machine for the ingest console and its view-model helpers.
mod effect;
mod msg;
mod progress;
mod repo_name;
mod state;
mod update;
mod view_model;

pub use effect::Effect;
pub use msg::Msg;
pub use progress::{ProgressState, StatusRecord};
pub use repo_name::{parse_repo_name, RepoName};
pub use state::{AppState, Credentials, GateState, JobKind};
pub use update::update;
pub use view_model::{AppViewModel, ProgressView, StepIndicator, PRODUCT_NAME};
