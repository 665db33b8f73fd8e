//! Full-run tests: link directory in, health report out

use crate::fast_settings;
use link_health::checker::{check_links, HttpProbe, LinkChecker};
use link_health::config::{Config, UserAgentConfig};
use link_health::output::{read_report, sinks_from_config, write_report};
use link_health::source::{flatten_urls, JsonFileSource, LinkSource};
use std::collections::BTreeSet;
use std::sync::Arc;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// Mounts the usual mix of healthy and broken endpoints
async fn mount_directory_endpoints(mock_server: &MockServer) {
    Mock::given(method("HEAD"))
        .and(path("/ok"))
        .respond_with(ResponseTemplate::new(200))
        .mount(mock_server)
        .await;

    Mock::given(method("HEAD"))
        .and(path("/no-head"))
        .respond_with(ResponseTemplate::new(405))
        .mount(mock_server)
        .await;

    Mock::given(method("GET"))
        .and(path("/no-head"))
        .respond_with(ResponseTemplate::new(200))
        .mount(mock_server)
        .await;

    // Three attempts, each HEAD then GET
    Mock::given(method("HEAD"))
        .and(path("/missing"))
        .respond_with(ResponseTemplate::new(404))
        .expect(3)
        .mount(mock_server)
        .await;

    Mock::given(method("GET"))
        .and(path("/missing"))
        .respond_with(ResponseTemplate::new(404))
        .expect(3)
        .mount(mock_server)
        .await;
}

fn checker() -> LinkChecker {
    let probe = HttpProbe::new(&UserAgentConfig::default()).expect("Failed to build probe");
    LinkChecker::new(Arc::new(probe), fast_settings())
}

#[tokio::test]
async fn test_run_records_every_link() {
    let mock_server = MockServer::start().await;
    mount_directory_endpoints(&mock_server).await;
    let base_url = mock_server.uri();

    let urls = vec![
        format!("{}/ok", base_url),
        format!("{}/no-head", base_url),
        format!("{}/missing", base_url),
        "http://127.0.0.1:1/unreachable".to_string(),
        format!("{}/ok", base_url),
    ];

    let report = checker().run(&urls).await;

    let keys: BTreeSet<&String> = report.results.keys().collect();
    let expected: BTreeSet<&String> = urls.iter().collect();
    assert_eq!(keys, expected);

    let ok = &report.results[&format!("{}/ok", base_url)];
    assert!(ok.ok);
    assert_eq!(ok.status, 200);

    let no_head = &report.results[&format!("{}/no-head", base_url)];
    assert!(no_head.ok);
    assert_eq!(no_head.status, 200);

    let missing = &report.results[&format!("{}/missing", base_url)];
    assert!(!missing.ok);
    assert_eq!(missing.status, 404);
    assert!(missing.error.is_empty());

    let unreachable = &report.results["http://127.0.0.1:1/unreachable"];
    assert!(!unreachable.ok);
    assert_eq!(unreachable.status, 0);
    assert!(!unreachable.error.is_empty());
}

#[tokio::test]
async fn test_repeated_runs_produce_same_results() {
    let mock_server = MockServer::start().await;

    Mock::given(method("HEAD"))
        .respond_with(ResponseTemplate::new(200))
        .mount(&mock_server)
        .await;

    let urls: Vec<String> = (0..10)
        .map(|i| format!("{}/page{}", mock_server.uri(), i))
        .collect();
    let checker = checker();

    let first = checker.run(&urls).await;
    let second = checker.run(&urls).await;

    assert_eq!(first.results, second.results);
    assert!(second.updated_at >= first.updated_at);
    assert_eq!(first.stats().ok, 10);
}

#[tokio::test]
async fn test_empty_directory_writes_empty_report() {
    let dir = tempfile::tempdir().unwrap();
    let mut config = Config::default();
    config.output.path = dir.path().join("health.json").display().to_string();

    let report = check_links(&config, &[]).await.unwrap();
    write_report(&report, &sinks_from_config(&config.output)).unwrap();

    let written = read_report(dir.path().join("health.json").as_path()).unwrap();
    assert!(written.results.is_empty());
}

#[tokio::test]
async fn test_directory_file_to_report_file() {
    let mock_server = MockServer::start().await;

    Mock::given(method("HEAD"))
        .and(path("/ca"))
        .respond_with(ResponseTemplate::new(200))
        .mount(&mock_server)
        .await;

    Mock::given(method("HEAD"))
        .and(path("/ny"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&mock_server)
        .await;

    Mock::given(method("GET"))
        .and(path("/ny"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&mock_server)
        .await;

    let dir = tempfile::tempdir().unwrap();
    let input_path = dir.path().join("statePortals.json");
    std::fs::write(
        &input_path,
        format!(
            r#"{{
                "states": [
                    {{ "state": "CA", "links": [ {{ "url": "{base}/ca" }} ] }},
                    {{ "state": "NY", "links": [ {{ "url": "{base}/ny" }}, {{ "url": "{base}/ca" }} ] }}
                ]
            }}"#,
            base = mock_server.uri()
        ),
    )
    .unwrap();

    let mut config = Config::default();
    config.input.path = input_path.display().to_string();
    config.output.path = dir.path().join("health.json").display().to_string();
    config.output.summary_path = Some(dir.path().join("health.md").display().to_string());
    config.checker.backoff_base_ms = 5;
    config.checker.jitter_ms = 5;

    let groups = JsonFileSource::new(&config.input.path).load().unwrap();
    let urls = flatten_urls(&groups);
    assert_eq!(urls.len(), 2);

    let report = check_links(&config, &urls).await.unwrap();
    write_report(&report, &sinks_from_config(&config.output)).unwrap();

    let written = read_report(dir.path().join("health.json").as_path()).unwrap();
    assert_eq!(written.results, report.results);
    assert_eq!(written.updated_at_string(), report.updated_at_string());
    assert!(written.results[&format!("{}/ca", mock_server.uri())].ok);
    assert_eq!(written.results[&format!("{}/ny", mock_server.uri())].status, 500);

    let summary = std::fs::read_to_string(dir.path().join("health.md")).unwrap();
    assert!(summary.contains(&format!("| {}/ny | 500 |", mock_server.uri())));
}

#[tokio::test]
async fn test_blank_and_padded_entries_reach_report() {
    let mock_server = MockServer::start().await;

    Mock::given(method("HEAD"))
        .and(path("/ca"))
        .respond_with(ResponseTemplate::new(200))
        .mount(&mock_server)
        .await;

    let dir = tempfile::tempdir().unwrap();
    let input_path = dir.path().join("statePortals.json");
    std::fs::write(
        &input_path,
        format!(
            r#"{{ "states": [ {{ "state": "CA", "links": [ {{ "url": "" }}, {{ "url": " {}/ca " }} ] }} ] }}"#,
            mock_server.uri()
        ),
    )
    .unwrap();

    let groups = JsonFileSource::new(&input_path).load().unwrap();
    let urls = flatten_urls(&groups);
    assert_eq!(urls.len(), 2);

    let report = checker().run(&urls).await;

    let keys: BTreeSet<&String> = report.results.keys().collect();
    let expected: BTreeSet<&String> = urls.iter().collect();
    assert_eq!(keys, expected);

    let blank = &report.results[""];
    assert!(!blank.ok);
    assert_eq!(blank.status, 0);
    assert!(!blank.error.is_empty());
    assert!(report
        .results
        .contains_key(&format!(" {}/ca ", mock_server.uri())));
}
