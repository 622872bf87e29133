//! Terminal front end: wiring between operator input, the core state machine and the engine.
mod app;
mod cli;
mod config;
mod effects;
mod input;
mod logging;
mod render;

pub use app::run_app;
