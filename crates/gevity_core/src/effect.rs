use crate::{Credentials, JobKind, RepoName};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    /// Open the status event subscription. Emitted once per process.
    SubscribeStatus,
    /// Ask the server whether it already knows `repo_name`.
    ProbeExists { repo_name: RepoName },
    /// Issue exactly one ingest or sync request.
    TriggerJob {
        kind: JobKind,
        locator: String,
        credentials: Credentials,
    },
}
