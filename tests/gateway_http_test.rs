//! Gateway behaviour over real HTTP using wiremock.

mod common;

use std::sync::Arc;
use std::time::Duration;

use common::mount_json;
use recipebox::adapters::mock::RecordingNotifier;
use recipebox::adapters::ReqwestHttpClient;
use recipebox::api::{Gateway, RecipeApi, SearchQuery};
use recipebox::config::ClientConfig;
use recipebox::error::{ApiError, ErrorCategory};
use serde_json::{json, Value};
use wiremock::matchers::{header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// Helper to build a gateway against the mock server.
fn gateway_for(server: &MockServer, timeout: Duration) -> (Arc<Gateway>, RecordingNotifier) {
    let notifier = RecordingNotifier::new();
    let config = ClientConfig::new()
        .with_base_url(format!("{}/", server.uri()))
        .with_timeout(timeout);
    let gateway = Gateway::new(
        &config,
        Arc::new(ReqwestHttpClient::new()),
        Arc::new(notifier.clone()),
    );
    (Arc::new(gateway), notifier)
}

#[tokio::test]
async fn test_default_headers_and_bearer_token() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/users/recipes"))
        .and(header("Accept", "application/json"))
        .and(header("Content-Type", "application/json"))
        .and(header("Authorization", "Bearer abc"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .expect(1)
        .mount(&server)
        .await;

    let (gateway, _) = gateway_for(&server, Duration::from_secs(2));
    gateway.set_auth_token(Some("abc".to_string()));

    let recipes: Vec<Value> = gateway.get("/users/recipes", &[]).await.unwrap();
    assert!(recipes.is_empty());
}

#[tokio::test]
async fn test_search_query_params_on_the_wire() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/search"))
        .and(query_param("q", "bún chả"))
        .and(query_param("category", "Lunch"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({"recipes": [{"_id": "r1", "title": "Bún chả"}]})),
        )
        .expect(1)
        .mount(&server)
        .await;

    let (gateway, _) = gateway_for(&server, Duration::from_secs(2));
    let recipes = RecipeApi::new(gateway);
    let query = SearchQuery {
        q: "bún chả".to_string(),
        category: "Lunch".to_string(),
        ..SearchQuery::default()
    };

    let found = recipes.search(&query).await.unwrap();
    assert_eq!(found[0].id, "r1");

    let requests = server.received_requests().await.unwrap();
    let raw_query = requests[0].url.query().unwrap_or_default().to_string();
    assert!(!raw_query.contains("cuisine"));
    assert!(!raw_query.contains("tab"));
}

#[tokio::test]
async fn test_error_statuses_notify_with_expected_text() {
    let server = MockServer::start().await;
    mount_json(&server, "GET", "/recipes/gone", 404, json!({})).await;
    mount_json(&server, "GET", "/recipes/broken", 502, json!({})).await;
    mount_json(&server, "GET", "/recipes/bad", 400, json!({"message": "Bad id"})).await;

    let (gateway, notifier) = gateway_for(&server, Duration::from_secs(2));

    let not_found = gateway.get::<Value>("/recipes/gone", &[]).await.unwrap_err();
    let server_err = gateway.get::<Value>("/recipes/broken", &[]).await.unwrap_err();
    let client_err = gateway.get::<Value>("/recipes/bad", &[]).await.unwrap_err();

    assert_eq!(not_found.category(), ErrorCategory::Client);
    assert!(server_err.is_retryable());
    assert_eq!(client_err.server_message(), Some("Bad id"));

    let notices = notifier.notices();
    let titles: Vec<&str> = notices.iter().map(|n| n.title.as_str()).collect();
    assert_eq!(titles, vec!["Not Found", "Server Error", "Error 400"]);
    assert_eq!(notices[2].message, "Bad id");
}

#[tokio::test]
async fn test_unauthorized_requires_reauth_but_keeps_token() {
    let server = MockServer::start().await;
    mount_json(&server, "GET", "/users/profile", 401, json!({"message": "jwt expired"})).await;

    let (gateway, notifier) = gateway_for(&server, Duration::from_secs(2));
    gateway.set_auth_token(Some("old".to_string()));

    let err = gateway.get::<Value>("/users/profile", &[]).await.unwrap_err();
    assert!(err.requires_reauth());
    assert_eq!(gateway.auth_token(), Some("old".to_string()));
    assert_eq!(notifier.notices()[0].message, "Please log in again.");
}

#[tokio::test]
async fn test_slow_backend_times_out() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/recipes/recent"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!([]))
                .set_delay(Duration::from_secs(3)),
        )
        .mount(&server)
        .await;

    let (gateway, notifier) = gateway_for(&server, Duration::from_millis(200));

    let err = gateway.get::<Value>("/recipes/recent", &[]).await.unwrap_err();
    assert!(matches!(err, ApiError::Network { timed_out: true, .. }));
    assert_eq!(err.error_code(), "E_API_TIMEOUT");
    assert_eq!(notifier.notices()[0].title, "Network Error");
}

#[tokio::test]
async fn test_unreachable_backend_is_network_error() {
    let notifier = RecordingNotifier::new();
    let config = ClientConfig::new()
        .with_base_url("http://127.0.0.1:9")
        .with_timeout(Duration::from_secs(2));
    let gateway = Gateway::new(
        &config,
        Arc::new(ReqwestHttpClient::new()),
        Arc::new(notifier.clone()),
    );

    let err = gateway.get::<Value>("/recipes/recent", &[]).await.unwrap_err();
    assert_eq!(err.category(), ErrorCategory::Network);
    assert_eq!(notifier.count(), 1);
}

#[tokio::test]
async fn test_non_json_success_is_invalid_payload() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/recipes/popular"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>oops</html>"))
        .mount(&server)
        .await;

    let (gateway, notifier) = gateway_for(&server, Duration::from_secs(2));
    let err = RecipeApi::new(gateway).popular().await.unwrap_err();

    assert!(matches!(err, ApiError::InvalidPayload { .. }));
    assert_eq!(notifier.notices()[0].message, "An unexpected error occurred.");
}

#[tokio::test]
async fn test_login_endpoint_failures_are_silent() {
    let server = MockServer::start().await;
    mount_json(&server, "POST", "/auth/login", 500, json!({})).await;
    mount_json(&server, "POST", "/auth/register", 500, json!({})).await;

    let (gateway, notifier) = gateway_for(&server, Duration::from_secs(2));

    assert!(gateway
        .post::<_, Value>("/auth/login", &json!({"email": "a", "password": "b"}))
        .await
        .is_err());
    assert_eq!(notifier.count(), 0);

    assert!(gateway
        .post::<_, Value>("/auth/register", &json!({}))
        .await
        .is_err());
    assert_eq!(notifier.count(), 1);
}
