//! Durable session persistence: the auth token and the last-known profile.

use std::sync::Arc;

use crate::api::UserProfile;
use crate::traits::{KeyValueStore, StorageError};

/// Storage key for the raw bearer token.
pub const TOKEN_KEY: &str = "token";

/// Storage key for the JSON-serialized profile.
pub const USER_DATA_KEY: &str = "userData";

/// Typed view over a [`KeyValueStore`] using the fixed session keys.
#[derive(Clone)]
pub struct SessionStore {
    store: Arc<dyn KeyValueStore>,
}

impl std::fmt::Debug for SessionStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SessionStore").finish_non_exhaustive()
    }
}

impl SessionStore {
    pub fn new(store: Arc<dyn KeyValueStore>) -> Self {
        Self { store }
    }

    pub async fn save_token(&self, token: &str) -> Result<(), StorageError> {
        self.store.set(TOKEN_KEY, token).await
    }

    /// The stored token. An empty value counts as no token.
    pub async fn get_token(&self) -> Result<Option<String>, StorageError> {
        Ok(self
            .store
            .get(TOKEN_KEY)
            .await?
            .filter(|token| !token.trim().is_empty()))
    }

    pub async fn clear_token(&self) -> Result<(), StorageError> {
        self.store.remove(TOKEN_KEY).await
    }

    pub async fn save_profile(&self, profile: &UserProfile) -> Result<(), StorageError> {
        let json = serde_json::to_string(profile)
            .map_err(|e| StorageError::Serialization(e.to_string()))?;
        self.store.set(USER_DATA_KEY, &json).await
    }

    /// The cached profile, or `None` when nothing usable is stored.
    ///
    /// A value that no longer deserializes is treated as absent.
    pub async fn load_profile(&self) -> Result<Option<UserProfile>, StorageError> {
        let Some(raw) = self.store.get(USER_DATA_KEY).await? else {
            return Ok(None);
        };

        match serde_json::from_str(&raw) {
            Ok(profile) => Ok(Some(profile)),
            Err(e) => {
                tracing::warn!("Ignoring unreadable cached profile: {}", e);
                Ok(None)
            }
        }
    }

    pub async fn clear_profile(&self) -> Result<(), StorageError> {
        self.store.remove(USER_DATA_KEY).await
    }
}
