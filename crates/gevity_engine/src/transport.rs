use std::time::Duration;

use gevity_logging::gevity_debug;
use url::Url;

use crate::stream::{run_status_stream, EventSink};
use crate::wire::{JobRequestBody, ProbeRequest, ProbeResponse};
use crate::{JobRequest, TransportError, TransportErrorKind};

#[derive(Debug, Clone)]
pub struct TransportSettings {
    pub server_url: String,
    pub connect_timeout: Duration,
    /// Timeout for the existence probe.
    pub request_timeout: Duration,
    /// Timeout for ingest/sync requests, which the server may hold while it clones.
    pub job_request_timeout: Duration,
    /// Initial delay before the event stream reconnects after a drop.
    pub reconnect_delay: Duration,
}

impl Default for TransportSettings {
    fn default() -> Self {
        Self {
            server_url: "http://127.0.0.1:7799".to_string(),
            connect_timeout: Duration::from_secs(10),
            request_timeout: Duration::from_secs(30),
            job_request_timeout: Duration::from_secs(600),
            reconnect_delay: Duration::from_millis(1000),
        }
    }
}

/// The three server operations the console consumes.
#[async_trait::async_trait]
pub trait Transport: Send + Sync {
    /// Whether the server already knows `repo_name`.
    async fn probe_exists(&self, repo_name: &str) -> Result<bool, TransportError>;

    /// Start an ingest or sync. Resolves on acknowledgement, not on job completion.
    async fn trigger_job(&self, request: &JobRequest) -> Result<(), TransportError>;

    /// Forward every status record to `sink` for as long as the subscription lives.
    async fn subscribe_status(&self, sink: &dyn EventSink) -> Result<(), TransportError>;
}

#[derive(Debug, Clone)]
pub struct ReqwestTransport {
    settings: TransportSettings,
    base: Url,
    client: reqwest::Client,
}

impl ReqwestTransport {
    pub fn new(settings: TransportSettings) -> Result<Self, TransportError> {
        let mut base = Url::parse(&settings.server_url)
            .map_err(|err| TransportError::new(TransportErrorKind::InvalidUrl, err.to_string()))?;
        // Endpoints are joined relative to the base, which needs a trailing slash.
        if !base.path().ends_with('/') {
            let path = format!("{}/", base.path());
            base.set_path(&path);
        }

        let client = reqwest::Client::builder()
            .connect_timeout(settings.connect_timeout)
            .build()
            .map_err(|err| TransportError::new(TransportErrorKind::Network, err.to_string()))?;

        Ok(Self {
            settings,
            base,
            client,
        })
    }

    pub fn settings(&self) -> &TransportSettings {
        &self.settings
    }

    pub(crate) fn endpoint(&self, route: &str) -> Result<Url, TransportError> {
        self.base
            .join(route)
            .map_err(|err| TransportError::new(TransportErrorKind::InvalidUrl, err.to_string()))
    }
}

#[async_trait::async_trait]
impl Transport for ReqwestTransport {
    async fn probe_exists(&self, repo_name: &str) -> Result<bool, TransportError> {
        let url = self.endpoint("fetch-repo")?;
        gevity_debug!("probe repo_name={} url={}", repo_name, url);

        let response = self
            .client
            .post(url)
            .timeout(self.settings.request_timeout)
            .json(&ProbeRequest { repo_name })
            .send()
            .await
            .map_err(map_reqwest_error)?;

        let status = response.status();
        if !status.is_success() {
            return Err(TransportError::new(
                TransportErrorKind::HttpStatus(status.as_u16()),
                status.to_string(),
            ));
        }

        let body: ProbeResponse = response.json().await.map_err(map_reqwest_error)?;
        Ok(body.exists())
    }

    async fn trigger_job(&self, request: &JobRequest) -> Result<(), TransportError> {
        let url = self.endpoint(request.kind.endpoint())?;
        gevity_debug!("trigger {:?} url={}", request, url);

        let response = self
            .client
            .post(url)
            .timeout(self.settings.job_request_timeout)
            .json(&JobRequestBody {
                repo_url: &request.repo_url,
                username: request.username.as_deref(),
                pat: request.pat.as_deref(),
            })
            .send()
            .await
            .map_err(map_reqwest_error)?;

        let status = response.status();
        if !status.is_success() {
            return Err(TransportError::new(
                TransportErrorKind::HttpStatus(status.as_u16()),
                status.to_string(),
            ));
        }
        Ok(())
    }

    async fn subscribe_status(&self, sink: &dyn EventSink) -> Result<(), TransportError> {
        let url = self.endpoint("events")?;
        run_status_stream(url.as_str(), self.settings.reconnect_delay, sink).await
    }
}

fn map_reqwest_error(err: reqwest::Error) -> TransportError {
    if err.is_timeout() {
        return TransportError::new(TransportErrorKind::Timeout, err.to_string());
    }
    if err.is_decode() {
        return TransportError::new(TransportErrorKind::Decode, err.to_string());
    }
    TransportError::new(TransportErrorKind::Network, err.to_string())
}
