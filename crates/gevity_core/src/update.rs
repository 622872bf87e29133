use crate::{AppState, Effect, JobKind, Msg};

/// Pure update function: applies a message to state and returns any effects.
pub fn update(mut state: AppState, msg: Msg) -> (AppState, Vec<Effect>) {
    let effects = match msg {
        Msg::SessionStarted => {
            if state.mark_subscribed() {
                vec![Effect::SubscribeStatus]
            } else {
                Vec::new()
            }
        }
        Msg::LocatorChanged(raw) => match state.set_locator(raw) {
            Some(repo_name) => vec![Effect::ProbeExists { repo_name }],
            None => Vec::new(),
        },
        Msg::UsernameChanged(raw) => {
            state.set_username(raw);
            Vec::new()
        }
        Msg::TokenChanged(raw) => {
            state.set_token(raw);
            Vec::new()
        }
        Msg::IngestClicked => trigger_job(&mut state, JobKind::Ingest),
        Msg::SyncClicked => trigger_job(&mut state, JobKind::Sync),
        Msg::ProbeSettled { repo_name, exists } => {
            state.apply_probe(&repo_name, exists);
            Vec::new()
        }
        // Accepted or rejected, the gate reopens; the stream reports the outcome.
        Msg::JobSettled { .. } => {
            state.settle_job();
            Vec::new()
        }
        Msg::StatusReceived(record) => {
            state.apply_status(&record);
            Vec::new()
        }
    };

    (state, effects)
}

fn trigger_job(state: &mut AppState, kind: JobKind) -> Vec<Effect> {
    // A click while a request is in flight is dropped, not queued.
    if !state.begin_job(kind) {
        return Vec::new();
    }
    vec![Effect::TriggerJob {
        kind,
        locator: state.locator().trim().to_owned(),
        credentials: state.credentials().clone(),
    }]
}
