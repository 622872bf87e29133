//! JSON shapes exchanged with the ingest server.

use serde::{Deserialize, Serialize};

#[derive(Debug, Serialize)]
pub(crate) struct ProbeRequest<'a> {
    pub repo_name: &'a str,
}

#[derive(Debug, Deserialize)]
pub(crate) struct ProbeResponse {
    #[serde(default)]
    pub status: String,
}

impl ProbeResponse {
    pub fn exists(&self) -> bool {
        self.status == "success"
    }
}

#[derive(Serialize)]
pub(crate) struct JobRequestBody<'a> {
    pub repo_url: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub username: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pat: Option<&'a str>,
}

/// Status record as pushed on the event stream. Every field is optional.
#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
pub struct StatusPayload {
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub step: Option<u64>,
    #[serde(default)]
    pub total_steps: Option<u64>,
    #[serde(default)]
    pub progress: Option<f64>,
}

/// Decode the `data` of one stream event.
pub fn decode_status(data: &str) -> Result<StatusPayload, serde_json::Error> {
    serde_json::from_str(data)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_records_decode() {
        let payload = decode_status(r#"{"step": 1, "total_steps": 3}"#).unwrap();
        assert_eq!(
            payload,
            StatusPayload {
                step: Some(1),
                total_steps: Some(3),
                ..StatusPayload::default()
            }
        );

        let payload = decode_status(r#"{"progress": 42.5, "extra": true}"#).unwrap();
        assert_eq!(payload.progress, Some(42.5));

        assert_eq!(decode_status("{}").unwrap(), StatusPayload::default());
    }

    #[test]
    fn malformed_records_are_errors() {
        assert!(decode_status("not json").is_err());
        assert!(decode_status("null").is_err());
        assert!(decode_status(r#"{"step": -1}"#).is_err());
        assert!(decode_status(r#"{"message": 7}"#).is_err());
    }

    #[test]
    fn job_body_omits_absent_credentials() {
        let body = JobRequestBody {
            repo_url: "https://example.com/acme/widgets",
            username: None,
            pat: None,
        };
        assert_eq!(
            serde_json::to_value(&body).unwrap(),
            serde_json::json!({ "repo_url": "https://example.com/acme/widgets" })
        );
    }

    #[test]
    fn only_success_status_means_exists() {
        let ok: ProbeResponse = serde_json::from_str(r#"{"status": "success"}"#).unwrap();
        let missing: ProbeResponse = serde_json::from_str(r#"{"status": "error"}"#).unwrap();
        let empty: ProbeResponse = serde_json::from_str("{}").unwrap();
        assert!(ok.exists());
        assert!(!missing.exists());
        assert!(!empty.exists());
    }
}
