use assert_matches::assert_matches;
use reqwest::Method;
use serde_json::{json, Value};
use wiremock::matchers::{header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use shared_api_client::{ApiClientError, RestClient};
use shared_config::AppConfig;

fn config_for(server: &MockServer) -> AppConfig {
    AppConfig {
        doctor_api_url: server.uri(),
        doctor_api_key: "test-api-key".to_string(),
        http_max_retries: 2,
        http_retry_delay_ms: 1,
        server_port: 0,
    }
}

#[tokio::test]
async fn test_sends_api_key_and_bearer() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/doctors/abc"))
        .and(header("apikey", "test-api-key"))
        .and(header("authorization", "Bearer session-token"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"id": "abc"})))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = RestClient::new(&config_for(&mock_server));
    let body: Value = client
        .request(Method::GET, &["doctors", "abc"], Some("session-token"), None)
        .await
        .unwrap();

    assert_eq!(body["id"], "abc");
}

#[tokio::test]
async fn test_retries_server_errors_then_succeeds() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/doctors/flaky"))
        .respond_with(ResponseTemplate::new(503).set_body_string("unavailable"))
        .up_to_n_times(1)
        .mount(&mock_server)
        .await;

    Mock::given(method("GET"))
        .and(path("/doctors/flaky"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"id": "flaky"})))
        .mount(&mock_server)
        .await;

    let client = RestClient::new(&config_for(&mock_server));
    let body: Value = client
        .request(Method::GET, &["doctors", "flaky"], None, None)
        .await
        .unwrap();

    assert_eq!(body["id"], "flaky");
}

#[tokio::test]
async fn test_gives_up_after_max_retries() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/doctors/down"))
        .respond_with(ResponseTemplate::new(500).set_body_string("boom"))
        .expect(3)
        .mount(&mock_server)
        .await;

    let client = RestClient::new(&config_for(&mock_server));
    let result: Result<Value, _> = client
        .request(Method::GET, &["doctors", "down"], None, None)
        .await;

    assert_matches!(result, Err(ApiClientError::Status { status: 500, .. }));
}

#[tokio::test]
async fn test_not_found_is_not_retried() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/doctors/missing"))
        .respond_with(ResponseTemplate::new(404).set_body_string("no such doctor"))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = RestClient::new(&config_for(&mock_server));
    let result: Result<Value, _> = client
        .request(Method::GET, &["doctors", "missing"], None, None)
        .await;

    assert_matches!(result, Err(ApiClientError::NotFound(_)));
}

#[tokio::test]
async fn test_unauthorized_maps_to_auth() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/doctors/private"))
        .respond_with(ResponseTemplate::new(401).set_body_string("expired"))
        .mount(&mock_server)
        .await;

    let client = RestClient::new(&config_for(&mock_server));
    let result: Result<Value, _> = client
        .request(Method::GET, &["doctors", "private"], None, None)
        .await;

    assert_matches!(result, Err(ApiClientError::Auth(msg)) if msg == "expired");
}

#[tokio::test]
async fn test_segments_are_percent_encoded() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/doctors/other%3Fx=1%2Fslots"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"id": "encoded"})))
        .expect(1)
        .mount(&mock_server)
        .await;

    Mock::given(method("GET"))
        .and(path("/doctors/other"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"id": "other"})))
        .expect(0)
        .mount(&mock_server)
        .await;

    let client = RestClient::new(&config_for(&mock_server));
    let body: Value = client
        .request(Method::GET, &["doctors", "other?x=1/slots"], None, None)
        .await
        .unwrap();

    assert_eq!(body["id"], "encoded");
}

#[test]
fn test_resource_url_keeps_base_path() {
    let config = AppConfig {
        doctor_api_url: "http://backend.local/api/v1".to_string(),
        ..AppConfig::default()
    };
    let client = RestClient::new(&config);

    let url = client.resource_url(&["doctors", "a#b"]).unwrap();
    assert_eq!(url.as_str(), "http://backend.local/api/v1/doctors/a%23b");
    assert_eq!(url.query(), None);
}

#[tokio::test]
async fn test_unconfigured_client_fails_fast() {
    let client = RestClient::new(&AppConfig::default());
    let result: Result<Value, _> = client
        .request(Method::GET, &["doctors", "x"], None, None)
        .await;

    assert_matches!(result, Err(ApiClientError::NotConfigured));
}
