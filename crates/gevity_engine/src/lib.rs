//! Gevity engine: network collaborators for the ingest console.
mod engine;
mod stream;
mod transport;
mod types;
mod wire;

pub use engine::{EngineError, EngineEvents, EngineHandle};
pub use stream::EventSink;
pub use transport::{ReqwestTransport, Transport, TransportSettings};
pub use types::{EngineEvent, JobKind, JobRequest, TransportError, TransportErrorKind};
pub use wire::{decode_status, StatusPayload};
