/// One partial update pushed by the server. Any subset of fields may be present.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct StatusRecord {
    pub message: Option<String>,
    pub step: Option<u64>,
    pub total_steps: Option<u64>,
    pub progress: Option<f64>,
}

impl StatusRecord {
    /// True when no field carries display data. An empty message counts as absent.
    pub fn is_empty(&self) -> bool {
        self.message().is_none()
            && self.step.is_none()
            && self.total_steps.is_none()
            && self.progress().is_none()
    }

    fn message(&self) -> Option<&str> {
        self.message.as_deref().filter(|message| !message.is_empty())
    }

    fn progress(&self) -> Option<f64> {
        self.progress.filter(|value| value.is_finite())
    }
}

/// Last-known-good merge of every status record received for the current repository.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ProgressState {
    message: Option<String>,
    step: Option<u64>,
    total_steps: Option<u64>,
    progress: Option<f64>,
}

impl ProgressState {
    /// Fresh state carrying only an initial message.
    pub fn starting(message: impl Into<String>) -> Self {
        Self {
            message: Some(message.into()),
            ..Self::default()
        }
    }

    /// Merge `record` field by field: a field is overwritten only when the record
    /// defines it, so a later record can never blank out an earlier value.
    ///
    /// Returns `false` when the record carried nothing to merge.
    pub fn merge(&mut self, record: &StatusRecord) -> bool {
        if record.is_empty() {
            return false;
        }
        if let Some(message) = record.message() {
            self.message = Some(message.to_owned());
        }
        if let Some(step) = record.step {
            self.step = Some(step);
        }
        if let Some(total_steps) = record.total_steps {
            self.total_steps = Some(total_steps);
        }
        if let Some(progress) = record.progress() {
            self.progress = Some(progress);
        }
        true
    }

    pub fn message(&self) -> Option<&str> {
        self.message.as_deref()
    }

    pub fn step(&self) -> Option<u64> {
        self.step
    }

    pub fn total_steps(&self) -> Option<u64> {
        self.total_steps
    }

    pub fn progress(&self) -> Option<f64> {
        self.progress
    }
}
