use std::fmt;

use crate::view_model::{AppViewModel, ProgressView, PRODUCT_NAME};
use crate::{parse_repo_name, ProgressState, RepoName, StatusRecord};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum JobKind {
    Ingest,
    Sync,
}

impl JobKind {
    /// Message shown the instant the job is requested, before the server answers.
    pub fn starting_message(self) -> &'static str {
        match self {
            JobKind::Ingest => "starting ingest…",
            JobKind::Sync => "starting sync…",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            JobKind::Ingest => "Ingest Repo",
            JobKind::Sync => "Sync Repo to Latest",
        }
    }
}

/// Whether a job-trigger request is currently in flight.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum GateState {
    #[default]
    Idle,
    Submitting(JobKind),
}

/// Opaque username/token pair, passed through to the server untouched.
#[derive(Clone, PartialEq, Eq, Default)]
pub struct Credentials {
    username: Option<String>,
    token: Option<String>,
}

impl Credentials {
    pub fn new(username: Option<String>, token: Option<String>) -> Self {
        Self {
            username: non_blank(username),
            token: non_blank(token),
        }
    }

    pub fn username(&self) -> Option<&str> {
        self.username.as_deref()
    }

    pub fn token(&self) -> Option<&str> {
        self.token.as_deref()
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("username", &self.username)
            .field("token", &self.token.as_ref().map(|_| "<redacted>"))
            .finish()
    }
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct AppState {
    locator: String,
    repo_name: Option<RepoName>,
    credentials: Credentials,
    repo_exists: bool,
    gate: GateState,
    progress: Option<ProgressState>,
    subscribed: bool,
    dirty: bool,
}

impl AppState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn view(&self) -> AppViewModel {
        let can_trigger = self.can_trigger();
        AppViewModel {
            title: self
                .repo_name
                .as_ref()
                .map_or_else(|| PRODUCT_NAME.to_string(), ToString::to_string),
            locator: self.locator.clone(),
            repo_name: self.repo_name.clone(),
            username: self.credentials.username().map(ToOwned::to_owned),
            token_set: self.credentials.token().is_some(),
            repo_exists: self.repo_exists,
            submitting: self.is_submitting(),
            can_ingest: can_trigger,
            can_sync: can_trigger,
            sync_offered: self.repo_exists,
            progress: self.progress.as_ref().map(ProgressView::from_state),
            dirty: self.dirty,
        }
    }

    /// Returns whether the state changed since the last call, and clears the flag.
    pub fn consume_dirty(&mut self) -> bool {
        std::mem::take(&mut self.dirty)
    }

    pub fn locator(&self) -> &str {
        &self.locator
    }

    pub fn repo_name(&self) -> Option<&RepoName> {
        self.repo_name.as_ref()
    }

    pub fn credentials(&self) -> &Credentials {
        &self.credentials
    }

    pub fn repo_exists(&self) -> bool {
        self.repo_exists
    }

    pub fn gate(&self) -> GateState {
        self.gate
    }

    pub fn progress(&self) -> Option<&ProgressState> {
        self.progress.as_ref()
    }

    pub fn is_submitting(&self) -> bool {
        matches!(self.gate, GateState::Submitting(_))
    }

    /// Both ingest and sync share one gate: a resolvable name and nothing in flight.
    pub fn can_trigger(&self) -> bool {
        self.repo_name.is_some() && !self.is_submitting()
    }

    pub(crate) fn mark_subscribed(&mut self) -> bool {
        !std::mem::replace(&mut self.subscribed, true)
    }

    /// Replace the locator. Returns the new name when it is a genuine transition
    /// to a resolvable name, i.e. when a probe should fire.
    pub(crate) fn set_locator(&mut self, raw: String) -> Option<RepoName> {
        let name = parse_repo_name(&raw);
        if raw != self.locator {
            self.locator = raw;
            self.dirty = true;
        }
        if name == self.repo_name {
            return None;
        }

        // Existence and progress belong to the previous repository.
        self.repo_name = name.clone();
        self.repo_exists = false;
        self.progress = None;
        self.dirty = true;
        name
    }

    pub(crate) fn set_username(&mut self, raw: String) {
        self.credentials.username = non_blank(Some(raw));
        self.dirty = true;
    }

    pub(crate) fn set_token(&mut self, raw: String) {
        self.credentials.token = non_blank(Some(raw));
        self.dirty = true;
    }

    /// Move the gate to submitting and seed the progress display.
    /// Returns `false` (and changes nothing) if the gate is closed.
    pub(crate) fn begin_job(&mut self, kind: JobKind) -> bool {
        if !self.can_trigger() {
            return false;
        }
        self.gate = GateState::Submitting(kind);
        self.progress = Some(ProgressState::starting(kind.starting_message()));
        self.dirty = true;
        true
    }

    pub(crate) fn settle_job(&mut self) {
        if self.is_submitting() {
            self.gate = GateState::Idle;
            self.dirty = true;
        }
    }

    pub(crate) fn apply_probe(&mut self, repo_name: &RepoName, exists: bool) {
        // Responses for a name the operator has since moved away from are stale.
        if self.repo_name.as_ref() != Some(repo_name) {
            return;
        }
        if exists && !self.repo_exists {
            self.repo_exists = true;
            self.dirty = true;
        }
    }

    pub(crate) fn apply_status(&mut self, record: &StatusRecord) {
        if record.is_empty() {
            return;
        }
        let progress = self.progress.get_or_insert_with(ProgressState::default);
        if progress.merge(record) {
            self.dirty = true;
        }
    }
}

fn non_blank(value: Option<String>) -> Option<String> {
    value.filter(|value| !value.trim().is_empty())
}
