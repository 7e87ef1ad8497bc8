//! Session persistence across process restarts with the file-backed store.

mod common;

use std::sync::Arc;

use common::{mount_logged_in_backend, profile_json, TEST_TOKEN};
use recipebox::adapters::mock::RecordingNotifier;
use recipebox::adapters::{FileStore, ReqwestHttpClient};
use recipebox::app::{AppContext, StartupOutcome};
use recipebox::config::ClientConfig;
use recipebox::session::CacheState;
use serde_json::json;
use serial_test::serial;
use tempfile::TempDir;
use wiremock::MockServer;

fn context(server: &MockServer, dir: &TempDir) -> AppContext {
    let config = ClientConfig::new()
        .with_base_url(server.uri())
        .with_data_dir(dir.path());
    AppContext::new(
        config.clone(),
        Arc::new(ReqwestHttpClient::new()),
        Arc::new(FileStore::new(config.store_path())),
        Arc::new(RecordingNotifier::new()),
    )
}

#[tokio::test]
async fn test_login_survives_restart() {
    let server = MockServer::start().await;
    mount_logged_in_backend(&server, json!(["r1"]), json!([])).await;
    let dir = TempDir::new().unwrap();

    let first = context(&server, &dir);
    assert_eq!(first.start().await.unwrap(), StartupOutcome::LoginRequired);
    first.account.login("a@b.com", "secret").await.unwrap();

    let raw = std::fs::read_to_string(dir.path().join("store.json")).unwrap();
    let stored: serde_json::Value = serde_json::from_str(&raw).unwrap();
    assert_eq!(stored["token"], json!(TEST_TOKEN));

    // Second run restores from disk without refetching the profile
    let before = server.received_requests().await.unwrap().len();
    let second = context(&server, &dir);
    assert_eq!(
        second.start().await.unwrap(),
        StartupOutcome::Ready(CacheState::Loaded)
    );
    assert_eq!(second.gateway.auth_token(), Some(TEST_TOKEN.to_string()));
    assert_eq!(second.cache.profile().unwrap().email, "a@b.com");
    assert_eq!(server.received_requests().await.unwrap().len(), before);
}

#[tokio::test]
async fn test_logout_wipes_disk_state() {
    let server = MockServer::start().await;
    mount_logged_in_backend(&server, json!([]), json!([])).await;
    let dir = TempDir::new().unwrap();

    let ctx = context(&server, &dir);
    ctx.account.login("a@b.com", "secret").await.unwrap();
    ctx.account.logout().await.unwrap();

    let restarted = context(&server, &dir);
    assert_eq!(restarted.start().await.unwrap(), StartupOutcome::LoginRequired);
    assert_eq!(restarted.session.load_profile().await.unwrap(), None);
}

#[tokio::test]
async fn test_corrupt_profile_on_disk_triggers_refetch() {
    let server = MockServer::start().await;
    common::mount_json(&server, "GET", "/users/profile", 200, profile_json()).await;
    common::mount_json(&server, "GET", "/users/favorites", 200, json!([])).await;
    common::mount_json(&server, "GET", "/users/bookmarks", 200, json!([])).await;
    let dir = TempDir::new().unwrap();
    std::fs::write(
        dir.path().join("store.json"),
        r#"{"token":"T1","userData":"{broken"}"#,
    )
    .unwrap();

    let ctx = context(&server, &dir);
    assert_eq!(
        ctx.start().await.unwrap(),
        StartupOutcome::Ready(CacheState::Loaded)
    );
    assert_eq!(ctx.cache.profile().unwrap().username, "chef");
}

#[tokio::test]
#[serial]
async fn test_production_context_uses_env_data_dir() {
    let dir = TempDir::new().unwrap();
    std::env::set_var("RECIPEBOX_DATA_DIR", dir.path());
    std::env::set_var("RECIPEBOX_API_URL", "http://127.0.0.1:9/api/");

    let config = ClientConfig::from_env();
    std::env::remove_var("RECIPEBOX_DATA_DIR");
    std::env::remove_var("RECIPEBOX_API_URL");

    assert_eq!(config.base_url, "http://127.0.0.1:9/api");
    let ctx = AppContext::production(config).unwrap();
    ctx.session.save_token("T9").await.unwrap();
    assert!(dir.path().join("store.json").exists());
}
