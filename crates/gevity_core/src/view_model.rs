use crate::{ProgressState, RepoName};

/// Title shown when no repository name has been resolved yet.
pub const PRODUCT_NAME: &str = "gevity";

#[derive(Debug, Clone, PartialEq, Default)]
pub struct AppViewModel {
    pub title: String,
    pub locator: String,
    pub repo_name: Option<RepoName>,
    pub username: Option<String>,
    pub token_set: bool,
    pub repo_exists: bool,
    pub submitting: bool,
    pub can_ingest: bool,
    pub can_sync: bool,
    /// The sync affordance is listed only for repositories the server already knows.
    pub sync_offered: bool,
    pub progress: Option<ProgressView>,
    pub dirty: bool,
}

/// Two-bar rendering of a [`ProgressState`]: discrete steps plus a continuous percentage.
#[derive(Debug, Clone, PartialEq)]
pub struct ProgressView {
    pub message: Option<String>,
    pub steps: Option<StepIndicator>,
    /// Continuous bar fill, clamped to `[0, 100]`; 0 until the server reports progress.
    pub percent: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StepIndicator {
    pub step: u64,
    pub total_steps: u64,
    pub percent: u8,
}

impl StepIndicator {
    pub fn label(&self) -> String {
        format!("step {} / {}", self.step, self.total_steps)
    }
}

impl ProgressView {
    pub fn from_state(state: &ProgressState) -> Self {
        let steps = state
            .total_steps()
            .filter(|total| *total > 0)
            .map(|total_steps| {
                let step = state.step().unwrap_or(0);
                let ratio = 100.0 * step as f64 / total_steps as f64;
                StepIndicator {
                    step,
                    total_steps,
                    percent: ratio.min(100.0).round() as u8,
                }
            });

        Self {
            message: state.message().map(ToOwned::to_owned),
            steps,
            percent: state.progress().unwrap_or(0.0).clamp(0.0, 100.0),
        }
    }
}
