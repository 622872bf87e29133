use crate::{JobKind, RepoName, StatusRecord};

#[derive(Debug, Clone, PartialEq)]
pub enum Msg {
    /// Console is up; open the status stream.
    SessionStarted,
    /// Operator replaced the repository locator.
    LocatorChanged(String),
    /// Operator replaced the username. Empty clears it.
    UsernameChanged(String),
    /// Operator replaced the access token. Empty clears it.
    TokenChanged(String),
    /// Operator asked for an initial ingest.
    IngestClicked,
    /// Operator asked for a sync to latest.
    SyncClicked,
    /// Existence probe for `repo_name` came back.
    ProbeSettled { repo_name: RepoName, exists: bool },
    /// The ingest/sync request settled. Completion arrives separately on the stream.
    JobSettled { kind: JobKind, accepted: bool },
    /// One decoded record from the status stream.
    StatusReceived(StatusRecord),
}
