//! Composition root.
//!
//! [`AppContext`] builds the gateway, session store, user-data cache and
//! services once and hands out shared references. Nothing in the crate is a
//! global: tests build a context from doubles, the binary from the real
//! adapters.

use std::sync::Arc;

use crate::adapters::{FileStore, LogNotifier, ReqwestHttpClient};
use crate::api::{Gateway, RecipeApi};
use crate::config::ClientConfig;
use crate::error::ClientResult;
use crate::session::{AccountService, CacheState, SessionStore, UserDataCache};
use crate::traits::{HttpClient, HttpError, KeyValueStore, Notifier};

/// Where the app should go after startup.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StartupOutcome {
    /// A token was restored and the cache initialized to the given state.
    Ready(CacheState),
    /// No stored session; the user has to log in.
    LoginRequired,
}

/// Owns every long-lived component of a client session.
#[derive(Debug, Clone)]
pub struct AppContext {
    pub config: ClientConfig,
    pub gateway: Arc<Gateway>,
    pub session: SessionStore,
    pub cache: Arc<UserDataCache>,
    pub account: AccountService,
    pub recipes: RecipeApi,
}

impl AppContext {
    /// Wire the components together without touching storage or network.
    pub fn new(
        config: ClientConfig,
        http: Arc<dyn HttpClient>,
        store: Arc<dyn KeyValueStore>,
        notifier: Arc<dyn Notifier>,
    ) -> Self {
        let gateway = Arc::new(Gateway::new(&config, http, notifier));
        let session = SessionStore::new(store);
        let cache = Arc::new(UserDataCache::new(
            gateway.clone(),
            session.clone(),
            config.rollback_on_failure,
        ));
        let account = AccountService::new(gateway.clone(), session.clone(), cache.clone());
        let recipes = RecipeApi::new(gateway.clone());

        Self {
            config,
            gateway,
            session,
            cache,
            account,
            recipes,
        }
    }

    /// Context backed by reqwest, the data-dir file store and log alerts.
    pub fn production(config: ClientConfig) -> Result<Self, HttpError> {
        let http = ReqwestHttpClient::with_timeout(config.timeout)?;
        let store = FileStore::new(config.store_path());
        tracing::debug!("Using store at {:?}", store.path());
        Ok(Self::new(
            config,
            Arc::new(http),
            Arc::new(store),
            Arc::new(LogNotifier::with_stderr()),
        ))
    }

    /// Build a context and run [`AppContext::start`].
    pub async fn bootstrap(
        config: ClientConfig,
        http: Arc<dyn HttpClient>,
        store: Arc<dyn KeyValueStore>,
        notifier: Arc<dyn Notifier>,
    ) -> ClientResult<(Self, StartupOutcome)> {
        let context = Self::new(config, http, store, notifier);
        let outcome = context.start().await?;
        Ok((context, outcome))
    }

    /// Restore a persisted token and, if there is one, initialize the cache.
    pub async fn start(&self) -> ClientResult<StartupOutcome> {
        let Some(token) = self.session.get_token().await? else {
            tracing::info!("No stored session");
            return Ok(StartupOutcome::LoginRequired);
        };

        self.gateway.set_auth_token(Some(token));
        let state = self.cache.initialize().await;
        tracing::info!("Session restored, cache {:?}", state);
        Ok(StartupOutcome::Ready(state))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::mock::{InMemoryStore, MockHttpClient, MockResponse, RecordingNotifier};
    use crate::session::{TOKEN_KEY, USER_DATA_KEY};
    use serde_json::json;

    fn config() -> ClientConfig {
        ClientConfig::new().with_base_url("http://api.test")
    }

    #[tokio::test]
    async fn test_no_token_requires_login() {
        let http = MockHttpClient::new();
        let (context, outcome) = AppContext::bootstrap(
            config(),
            Arc::new(http.clone()),
            Arc::new(InMemoryStore::new()),
            Arc::new(RecordingNotifier::new()),
        )
        .await
        .unwrap();

        assert_eq!(outcome, StartupOutcome::LoginRequired);
        assert_eq!(context.gateway.auth_token(), None);
        assert_eq!(context.cache.state(), CacheState::Uninitialized);
        assert!(http.get_requests().is_empty());
    }

    #[tokio::test]
    async fn test_token_and_cached_profile_are_restored() {
        let store = InMemoryStore::with_entries([
            (TOKEN_KEY, "T1"),
            (USER_DATA_KEY, r#"{"id":"u1","username":"chef"}"#),
        ]);
        let (context, outcome) = AppContext::bootstrap(
            config(),
            Arc::new(MockHttpClient::new()),
            Arc::new(store),
            Arc::new(RecordingNotifier::new()),
        )
        .await
        .unwrap();

        assert_eq!(outcome, StartupOutcome::Ready(CacheState::Loaded));
        assert_eq!(context.gateway.auth_token(), Some("T1".to_string()));
        assert_eq!(context.cache.profile().unwrap().username, "chef");
    }

    #[tokio::test]
    async fn test_expired_token_leaves_cache_empty() {
        let http = MockHttpClient::new();
        http.set_default_response(MockResponse::json(401, json!({"message": "jwt expired"})));
        let notifier = RecordingNotifier::new();

        let (_, outcome) = AppContext::bootstrap(
            config(),
            Arc::new(http),
            Arc::new(InMemoryStore::with_entries([(TOKEN_KEY, "stale")])),
            Arc::new(notifier.clone()),
        )
        .await
        .unwrap();

        assert_eq!(outcome, StartupOutcome::Ready(CacheState::Empty));
        assert_eq!(notifier.notices()[0].title, "Unauthorized");
    }

    #[test]
    fn test_rollback_policy_comes_from_config() {
        let context = AppContext::new(
            config().with_rollback_on_failure(false),
            Arc::new(MockHttpClient::new()),
            Arc::new(InMemoryStore::new()),
            Arc::new(RecordingNotifier::new()),
        );
        assert!(!context.config.rollback_on_failure);
    }
}
