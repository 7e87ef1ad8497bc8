//! Common test utilities for integration tests.
//!
//! Builds an [`AppContext`] wired to a wiremock server through the real
//! reqwest adapter, with in-memory storage and a recording notifier.
//!
//! # Example
//!
//! ```ignore
//! let client = TestClient::start().await;
//! mount_json(&client.server, "GET", "/users/favorites", 200, json!(["r1"])).await;
//! client.context.cache.fetch_favorites().await?;
//! ```

#![allow(dead_code)]

use std::sync::Arc;
use std::time::Duration;

use recipebox::adapters::mock::{InMemoryStore, RecordingNotifier};
use recipebox::adapters::ReqwestHttpClient;
use recipebox::app::AppContext;
use recipebox::config::ClientConfig;
use serde_json::{json, Value};
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// Token the fake backend hands out on login.
pub const TEST_TOKEN: &str = "T1";

/// A context talking to a local mock backend.
pub struct TestClient {
    pub server: MockServer,
    pub context: AppContext,
    pub store: InMemoryStore,
    pub notifier: RecordingNotifier,
}

impl TestClient {
    pub async fn start() -> Self {
        Self::start_with(InMemoryStore::new(), |config| config).await
    }

    /// Start with a pre-seeded store and a config tweak.
    pub async fn start_with(
        store: InMemoryStore,
        configure: impl FnOnce(ClientConfig) -> ClientConfig,
    ) -> Self {
        let server = MockServer::start().await;
        let config = configure(
            ClientConfig::new()
                .with_base_url(server.uri())
                .with_timeout(Duration::from_secs(2)),
        );
        let http = ReqwestHttpClient::new();
        let notifier = RecordingNotifier::new();
        let context = AppContext::new(
            config,
            Arc::new(http),
            Arc::new(store.clone()),
            Arc::new(notifier.clone()),
        );

        Self {
            server,
            context,
            store,
            notifier,
        }
    }

    /// Requests the server received for `verb` and `route`.
    pub async fn received(&self, verb: &str, route: &str) -> Vec<wiremock::Request> {
        self.server
            .received_requests()
            .await
            .unwrap_or_default()
            .into_iter()
            .filter(|r| r.method.as_str() == verb && r.url.path() == route)
            .collect()
    }
}

/// Profile payload as the backend sends it.
pub fn profile_json() -> Value {
    json!({
        "_id": "u1",
        "username": "chef",
        "email": "a@b.com",
        "location": "Hanoi",
        "preferences": { "darkMode": true }
    })
}

/// Respond to `verb route` with a JSON body.
pub async fn mount_json(server: &MockServer, verb: &str, route: &str, status: u16, body: Value) {
    Mock::given(method(verb))
        .and(path(route))
        .respond_with(ResponseTemplate::new(status).set_body_json(body))
        .mount(server)
        .await;
}

/// Mount the endpoints a successful login touches.
pub async fn mount_logged_in_backend(server: &MockServer, favorites: Value, bookmarks: Value) {
    mount_json(server, "POST", "/auth/login", 200, json!({ "token": TEST_TOKEN })).await;
    mount_json(server, "GET", "/users/profile", 200, profile_json()).await;
    mount_json(server, "GET", "/users/favorites", 200, favorites).await;
    mount_json(server, "GET", "/users/bookmarks", 200, bookmarks).await;
}
