//! Login, registration and profile mutations.
//!
//! [`AccountService`] owns the token lifecycle: it persists the token, hands
//! it to the gateway and keeps the [`UserDataCache`] in step with the session.

use std::sync::Arc;

use super::store::SessionStore;
use super::user_data::UserDataCache;
use crate::api::models::{LoginRequest, RegisterRequest};
use crate::api::{Gateway, PreferenceSet, ProfileUpdate, RecipeSummary, UserApi, UserProfile};
use crate::error::{ApiError, ClientError, ClientResult};

/// Session-level account operations.
#[derive(Debug, Clone)]
pub struct AccountService {
    users: UserApi,
    session: SessionStore,
    cache: Arc<UserDataCache>,
}

fn required(value: &str, message: &str) -> Result<String, ApiError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(ApiError::Validation {
            message: message.to_string(),
        });
    }
    Ok(trimmed.to_string())
}

impl AccountService {
    pub fn new(gateway: Arc<Gateway>, session: SessionStore, cache: Arc<UserDataCache>) -> Self {
        Self {
            users: UserApi::new(gateway),
            session,
            cache,
        }
    }

    fn gateway(&self) -> &Arc<Gateway> {
        self.users.gateway()
    }

    pub fn is_logged_in(&self) -> bool {
        self.gateway().auth_token().is_some()
    }

    fn require_login(&self) -> ClientResult<()> {
        if self.is_logged_in() {
            Ok(())
        } else {
            Err(ClientError::NotAuthenticated)
        }
    }

    /// Authenticate, then load the profile and both mirrors.
    ///
    /// Only a failed credential exchange or token write fails the login.
    /// Post-login refreshes are logged and otherwise ignored.
    pub async fn login(&self, email: &str, password: &str) -> ClientResult<Option<UserProfile>> {
        let request = LoginRequest {
            email: required(email, "Please enter your email")?,
            password: required(password, "Please enter your password")?,
        };

        let response = self.users.login(&request).await?;
        self.session.save_token(&response.token).await?;
        self.gateway().set_auth_token(Some(response.token));
        tracing::info!("Logged in as {}", request.email);

        let profile = self.cache.fetch_user().await;
        let (favorites, bookmarks) =
            tokio::join!(self.cache.fetch_favorites(), self.cache.fetch_bookmarks());
        if let Err(e) = favorites {
            tracing::warn!("Favorites not loaded after login: {}", e);
        }
        if let Err(e) = bookmarks {
            tracing::warn!("Bookmarks not loaded after login: {}", e);
        }

        Ok(profile)
    }

    /// Create an account. The user still has to log in afterwards.
    pub async fn register(&self, username: &str, email: &str, password: &str) -> ClientResult<()> {
        let request = RegisterRequest {
            username: required(username, "Please enter a username")?,
            email: required(email, "Please enter your email")?,
            password: required(password, "Please enter a password")?,
        };
        self.users.register(&request).await?;
        tracing::info!("Registered {}", request.email);
        Ok(())
    }

    /// Drop the token everywhere and forget the cached profile.
    ///
    /// Every step runs even if an earlier one fails; the first storage error
    /// is returned.
    pub async fn logout(&self) -> ClientResult<()> {
        self.gateway().set_auth_token(None);
        let token = self.session.clear_token().await;
        let profile = self.cache.clear().await;

        for err in [&token, &profile].into_iter().filter_map(|r| r.as_ref().err()) {
            tracing::warn!("Logout left stored data behind: {}", err);
        }
        token.and(profile)?;
        tracing::info!("Logged out");
        Ok(())
    }

    /// Delete the account on the server, then log out locally.
    pub async fn delete_account(&self, password: &str) -> ClientResult<()> {
        self.require_login()?;
        let password = required(password, "Please enter your password")?;
        self.users.delete_account(&password).await?;
        self.logout().await
    }

    /// Send the changed fields, then re-read the profile from the server.
    ///
    /// An empty update sends nothing and returns the current profile.
    pub async fn update_profile(&self, update: &ProfileUpdate) -> ClientResult<Option<UserProfile>> {
        self.require_login()?;
        if update.is_empty() {
            return Ok(self.cache.profile());
        }
        self.users.update_profile(update).await?;
        Ok(self.cache.fetch_user().await)
    }

    pub async fn update_preferences(
        &self,
        preferences: PreferenceSet,
    ) -> ClientResult<Option<UserProfile>> {
        self.update_profile(&ProfileUpdate {
            preferences: Some(preferences),
            ..ProfileUpdate::default()
        })
        .await
    }

    pub async fn change_password(&self, current: &str, new: &str) -> ClientResult<()> {
        let update = ProfileUpdate {
            current_password: Some(required(current, "Please enter your current password")?),
            password: Some(required(new, "Please enter a new password")?),
            ..ProfileUpdate::default()
        };
        self.update_profile(&update).await?;
        Ok(())
    }

    /// Recipes the current user has published.
    pub async fn my_recipes(&self) -> ClientResult<Vec<RecipeSummary>> {
        self.require_login()?;
        Ok(self.users.recipes().await?)
    }
}
