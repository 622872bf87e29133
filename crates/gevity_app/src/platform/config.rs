use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::time::Duration;

use gevity_engine::TransportSettings;
use gevity_logging::gevity_info;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::cli::Cli;
use super::logging::LogDestination;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config {path:?}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("failed to parse config {path:?}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: ron::error::SpannedError,
    },
}

/// Console settings as stored in `gevity.ron`. Missing keys take their defaults.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ConsoleConfig {
    pub server_url: String,
    pub connect_timeout_secs: u64,
    pub request_timeout_secs: u64,
    pub job_request_timeout_secs: u64,
    pub reconnect_delay_ms: u64,
    pub log_destination: LogDestination,
    pub verbose: bool,
}

impl Default for ConsoleConfig {
    fn default() -> Self {
        let transport = TransportSettings::default();
        Self {
            server_url: transport.server_url,
            connect_timeout_secs: transport.connect_timeout.as_secs(),
            request_timeout_secs: transport.request_timeout.as_secs(),
            job_request_timeout_secs: transport.job_request_timeout.as_secs(),
            reconnect_delay_ms: transport.reconnect_delay.as_millis() as u64,
            log_destination: LogDestination::default(),
            verbose: false,
        }
    }
}

impl ConsoleConfig {
    /// Command-line flags (and their environment fallbacks) win over the file.
    pub fn apply_cli(mut self, cli: &Cli) -> Self {
        if let Some(server) = &cli.server {
            self.server_url = server.clone();
        }
        if let Some(destination) = cli.log {
            self.log_destination = destination;
        }
        self.verbose |= cli.verbose;
        self
    }

    pub fn transport_settings(&self) -> TransportSettings {
        TransportSettings {
            server_url: self.server_url.clone(),
            connect_timeout: Duration::from_secs(self.connect_timeout_secs),
            request_timeout: Duration::from_secs(self.request_timeout_secs),
            job_request_timeout: Duration::from_secs(self.job_request_timeout_secs),
            reconnect_delay: Duration::from_millis(self.reconnect_delay_ms),
        }
    }
}

/// Load the config file at `path`; a missing file yields the defaults.
pub fn load_config(path: &Path) -> Result<ConsoleConfig, ConfigError> {
    let content = match fs::read_to_string(path) {
        Ok(text) => text,
        Err(err) if err.kind() == io::ErrorKind::NotFound => {
            return Ok(ConsoleConfig::default());
        }
        Err(source) => {
            return Err(ConfigError::Read {
                path: path.to_path_buf(),
                source,
            });
        }
    };

    let config = ron::from_str(&content).map_err(|source| ConfigError::Parse {
        path: path.to_path_buf(),
        source,
    })?;
    gevity_info!("Loaded console config from {:?}", path);
    Ok(config)
}
