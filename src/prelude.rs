//! Prelude module for convenient imports.
//!
//! # Usage
//!
//! ```ignore
//! use recipebox::prelude::*;
//! ```

pub use crate::app::{AppContext, StartupOutcome};
pub use crate::api::{
    Gateway, PreferenceSet, ProfileUpdate, RecipeApi, RecipeDetail, RecipeRef, RecipeSummary,
    SearchQuery, UserApi, UserProfile,
};
pub use crate::config::ClientConfig;
pub use crate::error::{ApiError, ClientError, ClientResult, Notice};
pub use crate::session::{AccountService, CacheState, SessionStore, UserDataCache};
pub use crate::traits::{HttpClient, KeyValueStore, Notifier};
