use std::io;
use std::sync::{mpsc, Arc};
use std::thread;
use std::time::Duration;

use gevity_logging::{gevity_debug, gevity_warn};
use thiserror::Error;

use crate::stream::ChannelEventSink;
use crate::{
    EngineEvent, JobRequest, ReqwestTransport, Transport, TransportError, TransportSettings,
};

#[derive(Debug, Error)]
pub enum EngineError {
    #[error("failed to start async runtime: {0}")]
    Runtime(#[from] io::Error),
    #[error("transport setup failed: {0}")]
    Transport(#[from] TransportError),
}

enum EngineCommand {
    Probe { repo_name: String },
    Trigger(JobRequest),
    Subscribe,
}

/// Front for the background runtime that talks to the server.
///
/// Commands are fire-and-forget; every outcome comes back as an [`EngineEvent`]
/// on the paired [`EngineEvents`] receiver.
#[derive(Clone)]
pub struct EngineHandle {
    cmd_tx: mpsc::Sender<EngineCommand>,
}

/// Single consumer of everything the engine reports, in emission order.
pub struct EngineEvents {
    event_rx: mpsc::Receiver<EngineEvent>,
}

impl EngineEvents {
    /// Block until the next event; `None` once the engine has shut down.
    pub fn recv(&self) -> Option<EngineEvent> {
        self.event_rx.recv().ok()
    }

    pub fn try_recv(&self) -> Option<EngineEvent> {
        self.event_rx.try_recv().ok()
    }

    pub fn recv_timeout(&self, timeout: Duration) -> Option<EngineEvent> {
        self.event_rx.recv_timeout(timeout).ok()
    }
}

impl EngineHandle {
    pub fn new(settings: TransportSettings) -> Result<(Self, EngineEvents), EngineError> {
        let transport = ReqwestTransport::new(settings)?;
        Self::with_transport(Arc::new(transport))
    }

    pub fn with_transport(
        transport: Arc<dyn Transport>,
    ) -> Result<(Self, EngineEvents), EngineError> {
        let (cmd_tx, cmd_rx) = mpsc::channel();
        let (event_tx, event_rx) = mpsc::channel();
        let runtime = tokio::runtime::Runtime::new()?;

        thread::spawn(move || {
            let mut subscribed = false;
            while let Ok(command) = cmd_rx.recv() {
                if matches!(command, EngineCommand::Subscribe) {
                    // One subscription per process.
                    if subscribed {
                        gevity_debug!("ignoring repeated subscribe");
                        continue;
                    }
                    subscribed = true;
                }
                let transport = transport.clone();
                let event_tx = event_tx.clone();
                runtime.spawn(async move {
                    handle_command(transport.as_ref(), command, event_tx).await;
                });
            }
        });

        Ok((Self { cmd_tx }, EngineEvents { event_rx }))
    }

    pub fn probe(&self, repo_name: impl Into<String>) {
        let _ = self.cmd_tx.send(EngineCommand::Probe {
            repo_name: repo_name.into(),
        });
    }

    pub fn trigger(&self, request: JobRequest) {
        let _ = self.cmd_tx.send(EngineCommand::Trigger(request));
    }

    pub fn subscribe(&self) {
        let _ = self.cmd_tx.send(EngineCommand::Subscribe);
    }
}

async fn handle_command(
    transport: &dyn Transport,
    command: EngineCommand,
    event_tx: mpsc::Sender<EngineEvent>,
) {
    match command {
        EngineCommand::Probe { repo_name } => {
            let result = transport.probe_exists(&repo_name).await;
            if let Err(err) = &result {
                gevity_debug!("probe for {} failed: {}", repo_name, err);
            }
            let _ = event_tx.send(EngineEvent::ProbeCompleted { repo_name, result });
        }
        EngineCommand::Trigger(request) => {
            let result = transport.trigger_job(&request).await;
            if let Err(err) = &result {
                gevity_warn!("{:?} request failed: {}", request.kind, err);
            }
            let _ = event_tx.send(EngineEvent::JobCompleted {
                kind: request.kind,
                result,
            });
        }
        EngineCommand::Subscribe => {
            let sink = ChannelEventSink::new(event_tx);
            if let Err(err) = transport.subscribe_status(&sink).await {
                gevity_warn!("status subscription failed: {}", err);
            }
        }
    }
}
