//! Server-sent status stream.

use std::time::Duration;

use eventsource_client::{Client, ClientBuilder, ReconnectOptions, SSE};
use futures_util::StreamExt;
use gevity_logging::{gevity_debug, gevity_info, gevity_trace, gevity_warn};

use crate::{decode_status, EngineEvent, TransportError, TransportErrorKind};

const RECONNECT_DELAY_MAX: Duration = Duration::from_secs(30);

pub trait EventSink: Send + Sync {
    fn emit(&self, event: EngineEvent);
}

pub(crate) struct ChannelEventSink {
    tx: std::sync::mpsc::Sender<EngineEvent>,
}

impl ChannelEventSink {
    pub fn new(tx: std::sync::mpsc::Sender<EngineEvent>) -> Self {
        Self { tx }
    }
}

impl EventSink for ChannelEventSink {
    fn emit(&self, event: EngineEvent) {
        let _ = self.tx.send(event);
    }
}

/// Consume the event stream at `url`, emitting one [`EngineEvent::Status`] per
/// decodable record in delivery order. Reconnection is left to the client.
pub(crate) async fn run_status_stream(
    url: &str,
    reconnect_delay: Duration,
    sink: &dyn EventSink,
) -> Result<(), TransportError> {
    let client = ClientBuilder::for_url(url)
        .map_err(|err| TransportError::new(TransportErrorKind::InvalidUrl, err.to_string()))?
        .reconnect(
            ReconnectOptions::reconnect(true)
                .retry_initial(true)
                .delay(reconnect_delay)
                .backoff_factor(2)
                .delay_max(RECONNECT_DELAY_MAX)
                .build(),
        )
        .build();

    gevity_info!("subscribing to status stream url={}", url);
    let mut stream = client.stream();
    while let Some(event) = stream.next().await {
        match event {
            Ok(SSE::Connected(_)) => {
                gevity_debug!("status stream connected");
            }
            Ok(SSE::Event(ev)) => {
                // Default event type is "message"; anything else is not a status record.
                if ev.event_type != "message" && !ev.event_type.is_empty() {
                    gevity_trace!("skipping stream event type={}", ev.event_type);
                    continue;
                }
                match decode_status(&ev.data) {
                    Ok(payload) => sink.emit(EngineEvent::Status(payload)),
                    Err(err) => {
                        gevity_warn!("dropping malformed status record: {} data={}", err, ev.data);
                    }
                }
            }
            Ok(SSE::Comment(_)) => {}
            Err(err) => {
                gevity_warn!("status stream error: {}", err);
            }
        }
    }

    gevity_info!("status stream ended url={}", url);
    Ok(())
}
