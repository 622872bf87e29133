use std::path::PathBuf;

use clap::Parser;

use super::logging::LogDestination;

/// Terminal console for the gevity repository ingest server.
#[derive(Parser, Debug)]
#[command(name = "gevity", version, about, long_about = None)]
pub struct Cli {
    /// Path to the configuration file
    #[arg(long, env = "GEVITY_CONFIG", default_value = "gevity.ron")]
    pub config: PathBuf,

    /// Base URL of the ingest server (overrides the config file)
    #[arg(long, env = "GEVITY_SERVER")]
    pub server: Option<String>,

    /// Repository locator to start with
    #[arg(long)]
    pub repo: Option<String>,

    /// Username passed to the server with ingest/sync requests
    #[arg(long)]
    pub username: Option<String>,

    /// Where log output goes
    #[arg(long, value_enum)]
    pub log: Option<LogDestination>,

    /// Enable debug logging
    #[arg(short, long)]
    pub verbose: bool,
}
