//! Typed wrappers for the `/auth` and `/users` endpoints.

use serde_json::{json, Value};
use std::sync::Arc;

use super::endpoints;
use super::gateway::Gateway;
use super::models::{
    LoginRequest, LoginResponse, ProfileUpdate, RecipeRef, RecipeSummary, RegisterRequest,
    UserProfile,
};
use crate::error::ApiError;

/// Account and user-collection endpoints.
#[derive(Debug, Clone)]
pub struct UserApi {
    gateway: Arc<Gateway>,
}

impl UserApi {
    pub fn new(gateway: Arc<Gateway>) -> Self {
        Self { gateway }
    }

    pub fn gateway(&self) -> &Arc<Gateway> {
        &self.gateway
    }

    /// Exchange credentials for a token. Failures are not alerted.
    pub async fn login(&self, request: &LoginRequest) -> Result<LoginResponse, ApiError> {
        self.gateway.post(endpoints::LOGIN, request).await
    }

    pub async fn register(&self, request: &RegisterRequest) -> Result<Value, ApiError> {
        self.gateway.post(endpoints::REGISTER, request).await
    }

    pub async fn profile(&self) -> Result<UserProfile, ApiError> {
        self.gateway.get(endpoints::USER_PROFILE, &[]).await
    }

    pub async fn update_profile(&self, update: &ProfileUpdate) -> Result<Value, ApiError> {
        self.gateway.put(endpoints::USER_PROFILE, update).await
    }

    pub async fn delete_account(&self, password: &str) -> Result<Value, ApiError> {
        self.gateway
            .post(endpoints::USER_DELETE, &json!({ "password": password }))
            .await
    }

    /// Recipes authored by the current user.
    pub async fn recipes(&self) -> Result<Vec<RecipeSummary>, ApiError> {
        self.gateway.get(endpoints::USER_RECIPES, &[]).await
    }

    pub async fn favorites(&self) -> Result<Vec<RecipeRef>, ApiError> {
        self.gateway.get(endpoints::FAVORITES, &[]).await
    }

    pub async fn add_favorite(&self, recipe_id: &str) -> Result<Value, ApiError> {
        self.gateway
            .post(endpoints::FAVORITES, &json!({ "recipeId": recipe_id }))
            .await
    }

    pub async fn remove_favorite(&self, recipe_id: &str) -> Result<Value, ApiError> {
        self.gateway
            .delete(&endpoints::favorite(recipe_id), &[])
            .await
    }

    pub async fn bookmarks(&self) -> Result<Vec<RecipeRef>, ApiError> {
        self.gateway.get(endpoints::BOOKMARKS, &[]).await
    }

    pub async fn add_bookmark(&self, recipe_id: &str) -> Result<Value, ApiError> {
        self.gateway
            .post(endpoints::BOOKMARKS, &json!({ "recipeId": recipe_id }))
            .await
    }

    pub async fn remove_bookmark(&self, recipe_id: &str) -> Result<Value, ApiError> {
        self.gateway
            .delete(&endpoints::bookmark(recipe_id), &[])
            .await
    }
}
