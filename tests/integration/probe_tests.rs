//! HTTP probe and single-attempt tests against a mock server

use link_health::checker::{check_once, HttpProbe, Probe, ProbeOutcome, TransportError};
use link_health::config::UserAgentConfig;
use reqwest::Method;
use std::time::Duration;
use wiremock::matchers::{header, header_exists, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

const TIMEOUT: Duration = Duration::from_secs(5);

fn probe() -> HttpProbe {
    HttpProbe::new(&UserAgentConfig::default()).expect("Failed to build probe")
}

#[tokio::test]
async fn test_probe_sends_identifying_headers() {
    let mock_server = MockServer::start().await;

    Mock::given(method("HEAD"))
        .and(path("/portal"))
        .and(header(
            "user-agent",
            "link-health/1.0 (+https://github.com/knlmagic/doi-link-hub)",
        ))
        .and(header_exists("accept"))
        .and(header_exists("accept-language"))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&mock_server)
        .await;

    let url = format!("{}/portal", mock_server.uri());
    let outcome = probe().probe(&url, Method::HEAD, TIMEOUT).await.unwrap();

    assert_eq!(outcome, ProbeOutcome::from_status(200));
}

#[tokio::test]
async fn test_probe_reports_error_status_without_failing() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/gone"))
        .respond_with(ResponseTemplate::new(410))
        .mount(&mock_server)
        .await;

    let url = format!("{}/gone", mock_server.uri());
    let outcome = probe().probe(&url, Method::GET, TIMEOUT).await.unwrap();

    assert!(!outcome.ok);
    assert_eq!(outcome.status, 410);
    assert!(outcome.error.is_empty());
}

#[tokio::test]
async fn test_probe_times_out() {
    let mock_server = MockServer::start().await;

    Mock::given(method("HEAD"))
        .respond_with(ResponseTemplate::new(200).set_delay(Duration::from_secs(2)))
        .mount(&mock_server)
        .await;

    let url = format!("{}/slow", mock_server.uri());
    let result = probe()
        .probe(&url, Method::HEAD, Duration::from_millis(100))
        .await;

    assert_eq!(
        result,
        Err(TransportError::Timeout {
            url,
            timeout_ms: 100
        })
    );
}

#[tokio::test]
async fn test_connection_refused_is_network_error() {
    // Nothing listens on port 1
    let result = probe()
        .probe("http://127.0.0.1:1/", Method::HEAD, TIMEOUT)
        .await;

    assert!(matches!(result, Err(TransportError::Network { .. })));
}

#[tokio::test]
async fn test_head_not_allowed_falls_back_to_get() {
    let mock_server = MockServer::start().await;

    Mock::given(method("HEAD"))
        .and(path("/no-head"))
        .respond_with(ResponseTemplate::new(405))
        .expect(1)
        .mount(&mock_server)
        .await;

    Mock::given(method("GET"))
        .and(path("/no-head"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html></html>"))
        .expect(1)
        .mount(&mock_server)
        .await;

    let url = format!("{}/no-head", mock_server.uri());
    let outcome = check_once(&probe(), &url, TIMEOUT).await;

    assert_eq!(outcome, ProbeOutcome::from_status(200));
}

#[tokio::test]
async fn test_head_success_skips_get() {
    let mock_server = MockServer::start().await;

    Mock::given(method("HEAD"))
        .and(path("/fine"))
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(&mock_server)
        .await;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&mock_server)
        .await;

    let url = format!("{}/fine", mock_server.uri());
    let outcome = check_once(&probe(), &url, TIMEOUT).await;

    assert_eq!(outcome, ProbeOutcome::from_status(204));
}

#[tokio::test]
async fn test_slow_get_after_failed_head_records_timeout() {
    let mock_server = MockServer::start().await;

    Mock::given(method("HEAD"))
        .respond_with(ResponseTemplate::new(503))
        .mount(&mock_server)
        .await;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_delay(Duration::from_secs(2)))
        .mount(&mock_server)
        .await;

    let url = format!("{}/flaky", mock_server.uri());
    let outcome = check_once(&probe(), &url, Duration::from_millis(100)).await;

    assert_eq!(
        outcome,
        ProbeOutcome::unreachable("request timed out after 100ms")
    );
}
