//! Typed wrappers for the recipe, search and comment endpoints.

use serde_json::Value;
use std::sync::Arc;

use super::endpoints;
use super::gateway::Gateway;
use super::models::{
    validate_comment, Comment, CommentEdit, NewComment, NewRecipe, RecipeDetail, RecipeSummary,
    SearchQuery, SearchResponse,
};
use crate::error::ApiError;

/// Recipe browsing, search, authoring and comments.
#[derive(Debug, Clone)]
pub struct RecipeApi {
    gateway: Arc<Gateway>,
}

impl RecipeApi {
    pub fn new(gateway: Arc<Gateway>) -> Self {
        Self { gateway }
    }

    pub async fn recent(&self) -> Result<Vec<RecipeSummary>, ApiError> {
        self.gateway.get(endpoints::RECIPES_RECENT, &[]).await
    }

    pub async fn popular(&self) -> Result<Vec<RecipeSummary>, ApiError> {
        self.gateway.get(endpoints::RECIPES_POPULAR, &[]).await
    }

    pub async fn detail(&self, recipe_id: &str) -> Result<RecipeDetail, ApiError> {
        self.gateway.get(&endpoints::recipe(recipe_id), &[]).await
    }

    pub async fn related(&self, recipe_id: &str) -> Result<Vec<RecipeSummary>, ApiError> {
        self.gateway
            .get(&endpoints::related_recipes(recipe_id), &[])
            .await
    }

    pub async fn search(&self, query: &SearchQuery) -> Result<Vec<RecipeSummary>, ApiError> {
        let params = query.to_params();
        let response: SearchResponse = self.gateway.get(endpoints::SEARCH, &params).await?;
        Ok(response.recipes)
    }

    /// Validate locally, then publish with blank ingredients and steps dropped.
    pub async fn create(&self, recipe: &NewRecipe) -> Result<Value, ApiError> {
        recipe.validate()?;
        self.gateway
            .post(endpoints::RECIPES, &recipe.compacted())
            .await
    }

    pub async fn comments(&self, recipe_id: &str) -> Result<Vec<Comment>, ApiError> {
        self.gateway
            .get(&endpoints::recipe_comments(recipe_id), &[])
            .await
    }

    pub async fn add_comment(
        &self,
        recipe_id: &str,
        content: &str,
        rating: u8,
    ) -> Result<Value, ApiError> {
        validate_comment(content, rating)?;
        let body = NewComment {
            recipe_id: recipe_id.to_string(),
            content: content.trim().to_string(),
            rating,
        };
        self.gateway.post(endpoints::COMMENTS, &body).await
    }

    pub async fn edit_comment(
        &self,
        comment_id: &str,
        content: &str,
        rating: u8,
    ) -> Result<Value, ApiError> {
        validate_comment(content, rating)?;
        let body = CommentEdit {
            content: content.trim().to_string(),
            rating,
        };
        self.gateway
            .put(&endpoints::comment(comment_id), &body)
            .await
    }

    pub async fn delete_comment(&self, comment_id: &str) -> Result<Value, ApiError> {
        self.gateway
            .delete(&endpoints::comment(comment_id), &[])
            .await
    }
}
