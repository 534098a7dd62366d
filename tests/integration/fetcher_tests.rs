//! HTTP fetcher tests against a mock profile service

use crate::common::{not_found_page, profile_page};
use profile_sweep::config::{DispatchConfig, HttpConfig};
use profile_sweep::probe::{FetchError, HttpFetcher, PageFetcher};
use std::time::Duration;
use wiremock::matchers::{header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn short_deadline() -> DispatchConfig {
    DispatchConfig {
        request_timeout: 300,
        ..DispatchConfig::default()
    }
}

#[tokio::test]
async fn test_fetch_returns_page_body() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/id/bbb"))
        .respond_with(ResponseTemplate::new(200).set_body_string(profile_page("Bob", "7")))
        .expect(1)
        .mount(&mock_server)
        .await;

    let fetcher = HttpFetcher::from_config(&HttpConfig::default(), &short_deadline()).unwrap();
    let body = fetcher
        .fetch(&format!("{}/id/bbb", mock_server.uri()))
        .await
        .unwrap();

    assert!(body.contains("actual_persona_name"));
    assert!(body.contains("Bob"));
}

#[tokio::test]
async fn test_fetch_returns_body_for_error_status() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/id/aaa"))
        .respond_with(ResponseTemplate::new(404).set_body_string(not_found_page()))
        .mount(&mock_server)
        .await;

    let fetcher = HttpFetcher::from_config(&HttpConfig::default(), &short_deadline()).unwrap();
    let body = fetcher
        .fetch(&format!("{}/id/aaa", mock_server.uri()))
        .await
        .unwrap();

    assert_eq!(body, not_found_page());
}

#[tokio::test]
async fn test_slow_response_is_timeout() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/id/ccc"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_string(profile_page("Late", "1"))
                .set_delay(Duration::from_secs(2)),
        )
        .mount(&mock_server)
        .await;

    let fetcher = HttpFetcher::from_config(&HttpConfig::default(), &short_deadline()).unwrap();
    let result = fetcher
        .fetch(&format!("{}/id/ccc", mock_server.uri()))
        .await;

    match result {
        Err(e @ FetchError::Timeout { .. }) => assert!(e.is_timeout()),
        other => panic!("expected a timeout, got {:?}", other),
    }
}

#[tokio::test]
async fn test_configured_user_agent_is_sent() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/id/bbb"))
        .and(header("user-agent", "ProfileSweep/1.0"))
        .respond_with(ResponseTemplate::new(200).set_body_string("ok"))
        .expect(1)
        .mount(&mock_server)
        .await;

    let http = HttpConfig {
        user_agent: Some("ProfileSweep/1.0".to_string()),
    };
    let fetcher = HttpFetcher::from_config(&http, &short_deadline()).unwrap();
    let body = fetcher
        .fetch(&format!("{}/id/bbb", mock_server.uri()))
        .await
        .unwrap();

    assert_eq!(body, "ok");
}

#[tokio::test]
async fn test_redirect_is_followed() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/id/old"))
        .respond_with(
            ResponseTemplate::new(302)
                .insert_header("location", format!("{}/id/new", mock_server.uri()).as_str()),
        )
        .mount(&mock_server)
        .await;

    Mock::given(method("GET"))
        .and(path("/id/new"))
        .respond_with(ResponseTemplate::new(200).set_body_string(profile_page("Moved", "3")))
        .mount(&mock_server)
        .await;

    let fetcher = HttpFetcher::from_config(&HttpConfig::default(), &short_deadline()).unwrap();
    let body = fetcher
        .fetch(&format!("{}/id/old", mock_server.uri()))
        .await
        .unwrap();

    assert!(body.contains("Moved"));
}
