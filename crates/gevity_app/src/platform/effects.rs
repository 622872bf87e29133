use std::sync::mpsc;
use std::thread;

use gevity_core::{Effect, JobKind, Msg, RepoName, StatusRecord};
use gevity_engine::{EngineEvent, EngineEvents, EngineHandle, JobRequest, StatusPayload};
use gevity_logging::{gevity_debug, gevity_info, gevity_warn, redact};

use super::app::LoopEvent;

pub struct EffectRunner {
    engine: EngineHandle,
}

impl EffectRunner {
    pub fn new(
        engine: EngineHandle,
        events: EngineEvents,
        loop_tx: mpsc::Sender<LoopEvent>,
    ) -> Self {
        spawn_event_loop(events, loop_tx);
        Self { engine }
    }

    pub fn run(&self, effects: Vec<Effect>) {
        for effect in effects {
            match effect {
                Effect::SubscribeStatus => {
                    gevity_info!("SubscribeStatus");
                    self.engine.subscribe();
                }
                Effect::ProbeExists { repo_name } => {
                    gevity_info!("ProbeExists repo_name={}", repo_name);
                    self.engine.probe(repo_name.as_str());
                }
                Effect::TriggerJob {
                    kind,
                    locator,
                    credentials,
                } => {
                    gevity_info!(
                        "TriggerJob kind={:?} locator={} username={:?} pat={}",
                        kind,
                        locator,
                        credentials.username(),
                        redact(credentials.token())
                    );
                    self.engine.trigger(JobRequest {
                        kind: map_kind(kind),
                        repo_url: locator,
                        username: credentials.username().map(ToOwned::to_owned),
                        pat: credentials.token().map(ToOwned::to_owned),
                    });
                }
            }
        }
    }
}

fn spawn_event_loop(events: EngineEvents, loop_tx: mpsc::Sender<LoopEvent>) {
    thread::spawn(move || {
        while let Some(event) = events.recv() {
            if loop_tx.send(LoopEvent::Dispatch(map_event(event))).is_err() {
                break;
            }
        }
    });
}

pub(crate) fn map_event(event: EngineEvent) -> Msg {
    match event {
        EngineEvent::ProbeCompleted { repo_name, result } => {
            let exists = match result {
                Ok(exists) => exists,
                Err(err) => {
                    gevity_debug!("probe for {} failed: {}", repo_name, err);
                    false
                }
            };
            // The engine echoes the exact name the core asked about.
            Msg::ProbeSettled {
                repo_name: RepoName::from_canonical(repo_name),
                exists,
            }
        }
        EngineEvent::JobCompleted { kind, result } => {
            if let Err(err) = &result {
                gevity_warn!("{:?} request was not accepted: {}", kind, err);
            }
            Msg::JobSettled {
                kind: match kind {
                    gevity_engine::JobKind::Ingest => JobKind::Ingest,
                    gevity_engine::JobKind::Sync => JobKind::Sync,
                },
                accepted: result.is_ok(),
            }
        }
        EngineEvent::Status(payload) => Msg::StatusReceived(map_status(payload)),
    }
}

fn map_kind(kind: JobKind) -> gevity_engine::JobKind {
    match kind {
        JobKind::Ingest => gevity_engine::JobKind::Ingest,
        JobKind::Sync => gevity_engine::JobKind::Sync,
    }
}

fn map_status(payload: StatusPayload) -> StatusRecord {
    StatusRecord {
        message: payload.message,
        step: payload.step,
        total_steps: payload.total_steps,
        progress: payload.progress,
    }
}
