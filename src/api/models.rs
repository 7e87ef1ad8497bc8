//! Typed payloads exchanged with the backend.
//!
//! Every response body is decoded into one of these types at the gateway
//! boundary. Optional or loosely typed fields are normalized here (nulls,
//! numbers sent as strings, `_id` vs `id`) so nothing downstream touches raw
//! JSON.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};

use crate::error::ApiError;

/// Treat an explicit JSON `null` like a missing field.
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// Accept a string, a number or null and produce a string.
fn lenient_string<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match serde_json::Value::deserialize(deserializer)? {
        serde_json::Value::String(s) => s,
        serde_json::Value::Number(n) => n.to_string(),
        serde_json::Value::Bool(b) => b.to_string(),
        _ => String::new(),
    })
}

// ============================================================================
// User profile
// ============================================================================

/// Preference flags as the server may send them: any field can be missing.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawPreferences {
    email_notifications: Option<bool>,
    weekly_recommendations: Option<bool>,
    dark_mode: Option<bool>,
    metric_units: Option<bool>,
    public_profile: Option<bool>,
}

/// User preferences with per-field defaults.
///
/// Each flag falls back independently: a response carrying only `darkMode`
/// keeps the defaults for the other four.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", from = "RawPreferences")]
pub struct PreferenceSet {
    pub email_notifications: bool,
    pub weekly_recommendations: bool,
    pub dark_mode: bool,
    pub metric_units: bool,
    pub public_profile: bool,
}

impl Default for PreferenceSet {
    fn default() -> Self {
        Self {
            email_notifications: true,
            weekly_recommendations: true,
            dark_mode: false,
            metric_units: true,
            public_profile: true,
        }
    }
}

impl From<RawPreferences> for PreferenceSet {
    fn from(raw: RawPreferences) -> Self {
        let defaults = PreferenceSet::default();
        Self {
            email_notifications: raw
                .email_notifications
                .unwrap_or(defaults.email_notifications),
            weekly_recommendations: raw
                .weekly_recommendations
                .unwrap_or(defaults.weekly_recommendations),
            dark_mode: raw.dark_mode.unwrap_or(defaults.dark_mode),
            metric_units: raw.metric_units.unwrap_or(defaults.metric_units),
            public_profile: raw.public_profile.unwrap_or(defaults.public_profile),
        }
    }
}

/// The logged-in user's profile.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserProfile {
    #[serde(alias = "_id")]
    pub id: String,
    #[serde(default, alias = "name", deserialize_with = "null_as_default")]
    pub username: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub email: String,
    #[serde(default)]
    pub location: Option<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub preferences: PreferenceSet,
}

/// Partial profile update for `PUT /users/profile`.
///
/// Only the fields that are set are sent. Supplying `password` together with
/// `current_password` changes the password.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfileUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub preferences: Option<PreferenceSet>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub password: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub current_password: Option<String>,
}

impl ProfileUpdate {
    pub fn is_empty(&self) -> bool {
        self == &ProfileUpdate::default()
    }
}

// ============================================================================
// Auth
// ============================================================================

#[derive(Debug, Clone, Serialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// Login response. Only the token is required.
#[derive(Debug, Clone, Deserialize)]
pub struct LoginResponse {
    pub token: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct RegisterRequest {
    pub username: String,
    pub email: String,
    pub password: String,
}

// ============================================================================
// Recipes
// ============================================================================

/// Recipe author, sent either as a populated object or as a bare id.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum AuthorRef {
    Id(String),
    User {
        #[serde(default, alias = "_id")]
        id: Option<String>,
        #[serde(default)]
        username: Option<String>,
    },
}

impl AuthorRef {
    pub fn username(&self) -> Option<&str> {
        match self {
            AuthorRef::Id(_) => None,
            AuthorRef::User { username, .. } => username.as_deref(),
        }
    }
}

/// Card-sized view of a recipe as returned by list endpoints.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecipeSummary {
    #[serde(alias = "_id")]
    pub id: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub main_image: Option<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub rating: f64,
    #[serde(default)]
    pub created_by: Option<AuthorRef>,
}

/// Entry of a favorites/bookmarks listing: a bare id or a populated recipe.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RecipeRef {
    Id(String),
    Summary(RecipeSummary),
}

impl RecipeRef {
    /// The canonical identifier the mirrors store.
    pub fn id(&self) -> &str {
        match self {
            RecipeRef::Id(id) => id,
            RecipeRef::Summary(summary) => &summary.id,
        }
    }

    pub fn summary(&self) -> Option<&RecipeSummary> {
        match self {
            RecipeRef::Id(_) => None,
            RecipeRef::Summary(summary) => Some(summary),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Ingredient {
    #[serde(default, deserialize_with = "lenient_string")]
    pub name: String,
    #[serde(default, deserialize_with = "lenient_string")]
    pub amount: String,
    #[serde(default, deserialize_with = "lenient_string")]
    pub unit: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Step {
    #[serde(default, deserialize_with = "lenient_string")]
    pub description: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Nutrition {
    pub calories: Option<f64>,
    pub protein: Option<f64>,
    pub carbs: Option<f64>,
    pub fat: Option<f64>,
}

/// Full recipe as returned by `GET /recipes/{id}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecipeDetail {
    #[serde(alias = "_id")]
    pub id: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub main_image: Option<String>,
    #[serde(default)]
    pub created_by: Option<AuthorRef>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub ingredients: Vec<Ingredient>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub steps: Vec<Step>,
    #[serde(default)]
    pub servings: Option<u32>,
    #[serde(default)]
    pub prep_time: Option<u32>,
    #[serde(default)]
    pub cook_time: Option<u32>,
    #[serde(default)]
    pub difficulty: Option<String>,
    #[serde(default)]
    pub cuisine: Option<String>,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub tags: Vec<String>,
    #[serde(default)]
    pub notes: Option<String>,
    #[serde(default)]
    pub nutrition: Option<Nutrition>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub rating: f64,
    #[serde(default)]
    pub is_public: Option<bool>,
}

/// Body of `GET /search`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SearchResponse {
    #[serde(default, deserialize_with = "null_as_default")]
    pub recipes: Vec<RecipeSummary>,
}

/// Filters for `GET /search`. Empty filters are not sent.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SearchQuery {
    pub q: String,
    pub with_ingredients: String,
    pub without_ingredients: String,
    pub category: String,
    pub cuisine: String,
    pub tab: String,
}

impl SearchQuery {
    pub fn text(q: impl Into<String>) -> Self {
        Self {
            q: q.into(),
            ..Self::default()
        }
    }

    /// Query parameters in wire order, blanks dropped.
    pub fn to_params(&self) -> Vec<(&'static str, &str)> {
        [
            ("q", self.q.as_str()),
            ("withIngredients", self.with_ingredients.as_str()),
            ("withoutIngredients", self.without_ingredients.as_str()),
            ("category", self.category.as_str()),
            ("cuisine", self.cuisine.as_str()),
            ("tab", self.tab.as_str()),
        ]
        .into_iter()
        .filter(|(_, value)| !value.trim().is_empty())
        .collect()
    }
}

/// Body of `POST /recipes`.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NewRecipe {
    pub title: String,
    pub description: String,
    pub servings: u32,
    pub prep_time: u32,
    pub cook_time: u32,
    pub difficulty: String,
    pub cuisine: String,
    pub category: String,
    pub tags: Vec<String>,
    pub main_image: String,
    pub ingredients: Vec<Ingredient>,
    pub steps: Vec<Step>,
    pub notes: String,
    pub is_public: bool,
    pub nutrition: Nutrition,
}

impl NewRecipe {
    /// Split a comma-separated tag field, dropping blanks.
    pub fn parse_tags(raw: &str) -> Vec<String> {
        raw.split(',')
            .map(str::trim)
            .filter(|t| !t.is_empty())
            .map(str::to_string)
            .collect()
    }

    /// Labels of the required fields that are missing.
    pub fn missing_fields(&self) -> Vec<&'static str> {
        let mut missing = Vec::new();
        let blank = |s: &str| s.trim().is_empty();

        if blank(&self.title) {
            missing.push("Title");
        }
        if blank(&self.description) {
            missing.push("Description");
        }
        if self.servings == 0 {
            missing.push("Servings");
        }
        if self.prep_time == 0 {
            missing.push("Prep time");
        }
        if self.cook_time == 0 {
            missing.push("Cook time");
        }
        if blank(&self.difficulty) {
            missing.push("Difficulty");
        }
        if blank(&self.cuisine) {
            missing.push("Cuisine");
        }
        if blank(&self.category) {
            missing.push("Category");
        }
        if blank(&self.main_image) {
            missing.push("Main image");
        }
        if !self.ingredients.iter().any(|i| !blank(&i.name)) {
            missing.push("At least 1 ingredient");
        }
        missing
    }

    /// Check required fields before anything is sent.
    pub fn validate(&self) -> Result<(), ApiError> {
        let missing = self.missing_fields();
        if missing.is_empty() {
            return Ok(());
        }
        let mut message = String::from("Please fill all required fields:");
        for field in missing {
            message.push_str("\n- ");
            message.push_str(field);
        }
        Err(ApiError::Validation { message })
    }

    /// Copy with unnamed ingredients and empty steps removed.
    pub fn compacted(&self) -> Self {
        let mut recipe = self.clone();
        recipe.ingredients.retain(|i| !i.name.trim().is_empty());
        recipe.steps.retain(|s| !s.description.trim().is_empty());
        recipe
    }
}

// ============================================================================
// Comments
// ============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Comment {
    #[serde(alias = "_id")]
    pub id: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub content: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub rating: u8,
    #[serde(default)]
    pub user: Option<AuthorRef>,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
}

impl Comment {
    /// Display name of the author, "Anonymous" when unknown.
    pub fn author_name(&self) -> &str {
        self.user
            .as_ref()
            .and_then(AuthorRef::username)
            .unwrap_or("Anonymous")
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NewComment {
    pub recipe_id: String,
    pub content: String,
    pub rating: u8,
}

#[derive(Debug, Clone, Serialize)]
pub struct CommentEdit {
    pub content: String,
    pub rating: u8,
}

/// Reject blank content and ratings outside 1..=5.
pub fn validate_comment(content: &str, rating: u8) -> Result<(), ApiError> {
    if content.trim().is_empty() {
        return Err(ApiError::Validation {
            message: "Comment cannot be empty".to_string(),
        });
    }
    if !(1..=5).contains(&rating) {
        return Err(ApiError::Validation {
            message: format!("Rating must be between 1 and 5, got {}", rating),
        });
    }
    Ok(())
}
