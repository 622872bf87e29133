use std::time::Duration;

use gevity_engine::{
    JobKind, JobRequest, ReqwestTransport, Transport, TransportErrorKind, TransportSettings,
};
use pretty_assertions::assert_eq;
use serde_json::json;
use wiremock::matchers::{body_json, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn transport_for(server: &MockServer) -> ReqwestTransport {
    ReqwestTransport::new(TransportSettings {
        server_url: server.uri(),
        ..TransportSettings::default()
    })
    .expect("transport")
}

#[tokio::test]
async fn probe_reports_known_repository() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/fetch-repo"))
        .and(body_json(json!({ "repo_name": "widgets" })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "status": "success" })))
        .expect(1)
        .mount(&server)
        .await;

    let exists = transport_for(&server)
        .probe_exists("widgets")
        .await
        .expect("probe ok");
    assert!(exists);
}

#[tokio::test]
async fn probe_non_success_status_means_unknown() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/fetch-repo"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "status": "error" })))
        .mount(&server)
        .await;

    let exists = transport_for(&server)
        .probe_exists("gadgets")
        .await
        .expect("probe ok");
    assert!(!exists);
}

#[tokio::test]
async fn probe_fails_on_http_status_and_bad_body() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/fetch-repo"))
        .and(body_json(json!({ "repo_name": "missing" })))
        .respond_with(ResponseTemplate::new(404))
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/fetch-repo"))
        .and(body_json(json!({ "repo_name": "garbled" })))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>"))
        .mount(&server)
        .await;

    let transport = transport_for(&server);
    let err = transport.probe_exists("missing").await.unwrap_err();
    assert_eq!(err.kind, TransportErrorKind::HttpStatus(404));

    let err = transport.probe_exists("garbled").await.unwrap_err();
    assert_eq!(err.kind, TransportErrorKind::Decode);
}

#[tokio::test]
async fn probe_times_out_on_slow_server() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/fetch-repo"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_delay(Duration::from_millis(250))
                .set_body_json(json!({ "status": "success" })),
        )
        .mount(&server)
        .await;

    let transport = ReqwestTransport::new(TransportSettings {
        server_url: server.uri(),
        request_timeout: Duration::from_millis(50),
        ..TransportSettings::default()
    })
    .expect("transport");

    let err = transport.probe_exists("widgets").await.unwrap_err();
    assert_eq!(err.kind, TransportErrorKind::Timeout);
}

#[tokio::test]
async fn ingest_posts_locator_and_credentials() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/ingest"))
        .and(body_json(json!({
            "repo_url": "https://example.com/acme/widgets",
            "username": "octocat",
            "pat": "ghp_secret",
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "status": "ok" })))
        .expect(1)
        .mount(&server)
        .await;

    let request = JobRequest {
        kind: JobKind::Ingest,
        repo_url: "https://example.com/acme/widgets".to_string(),
        username: Some("octocat".to_string()),
        pat: Some("ghp_secret".to_string()),
    };
    transport_for(&server)
        .trigger_job(&request)
        .await
        .expect("ingest accepted");
}

#[tokio::test]
async fn sync_posts_to_process_route_without_credentials() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/process"))
        .and(body_json(json!({ "repo_url": "acme/widgets" })))
        .respond_with(ResponseTemplate::new(202))
        .expect(1)
        .mount(&server)
        .await;

    let request = JobRequest {
        kind: JobKind::Sync,
        repo_url: "acme/widgets".to_string(),
        username: None,
        pat: None,
    };
    transport_for(&server)
        .trigger_job(&request)
        .await
        .expect("sync accepted");
}

#[tokio::test]
async fn rejected_job_is_an_error() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/ingest"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    let request = JobRequest {
        kind: JobKind::Ingest,
        repo_url: "acme/widgets".to_string(),
        username: None,
        pat: None,
    };
    let err = transport_for(&server).trigger_job(&request).await.unwrap_err();
    assert_eq!(err.kind, TransportErrorKind::HttpStatus(500));
}

#[tokio::test]
async fn server_url_with_path_prefix_is_respected() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/fetch-repo"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "status": "success" })))
        .expect(1)
        .mount(&server)
        .await;

    let transport = ReqwestTransport::new(TransportSettings {
        server_url: format!("{}/api", server.uri()),
        ..TransportSettings::default()
    })
    .expect("transport");
    assert!(transport.probe_exists("widgets").await.expect("probe ok"));
}

#[test]
fn invalid_server_url_is_rejected() {
    let err = ReqwestTransport::new(TransportSettings {
        server_url: "not a url".to_string(),
        ..TransportSettings::default()
    })
    .unwrap_err();
    assert_eq!(err.kind, TransportErrorKind::InvalidUrl);
}

#[test]
fn job_request_debug_redacts_token() {
    let request = JobRequest {
        kind: JobKind::Ingest,
        repo_url: "acme/widgets".to_string(),
        username: Some("octocat".to_string()),
        pat: Some("ghp_secret".to_string()),
    };
    let rendered = format!("{request:?}");
    assert!(rendered.contains("octocat"));
    assert!(!rendered.contains("ghp_secret"));
}
