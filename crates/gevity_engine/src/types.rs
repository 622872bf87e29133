use std::fmt;

use thiserror::Error;

use crate::StatusPayload;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum JobKind {
    Ingest,
    Sync,
}

impl JobKind {
    /// Server route that starts this kind of job.
    pub fn endpoint(self) -> &'static str {
        match self {
            JobKind::Ingest => "ingest",
            JobKind::Sync => "process",
        }
    }
}

/// Everything the server needs to start an ingest or sync.
#[derive(Clone, PartialEq, Eq)]
pub struct JobRequest {
    pub kind: JobKind,
    pub repo_url: String,
    pub username: Option<String>,
    pub pat: Option<String>,
}

impl fmt::Debug for JobRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("JobRequest")
            .field("kind", &self.kind)
            .field("repo_url", &self.repo_url)
            .field("username", &self.username)
            .field("pat", &gevity_logging::redact(self.pat.as_deref()))
            .finish()
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum EngineEvent {
    ProbeCompleted {
        repo_name: String,
        result: Result<bool, TransportError>,
    },
    JobCompleted {
        kind: JobKind,
        result: Result<(), TransportError>,
    },
    Status(StatusPayload),
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{kind}: {message}")]
pub struct TransportError {
    pub kind: TransportErrorKind,
    pub message: String,
}

impl TransportError {
    pub fn new(kind: TransportErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TransportErrorKind {
    InvalidUrl,
    HttpStatus(u16),
    Timeout,
    Decode,
    Network,
}

impl fmt::Display for TransportErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TransportErrorKind::InvalidUrl => write!(f, "invalid url"),
            TransportErrorKind::HttpStatus(code) => write!(f, "http status {code}"),
            TransportErrorKind::Timeout => write!(f, "timeout"),
            TransportErrorKind::Decode => write!(f, "undecodable response"),
            TransportErrorKind::Network => write!(f, "network error"),
        }
    }
}
