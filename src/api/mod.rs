//! Backend access: the gateway, route table, DTOs and typed endpoint wrappers.

pub mod endpoints;
pub mod gateway;
pub mod models;
pub mod recipes;
pub mod users;

pub use gateway::Gateway;
pub use models::{
    AuthorRef, Comment, Ingredient, LoginResponse, NewRecipe, Nutrition, PreferenceSet,
    ProfileUpdate, RecipeDetail, RecipeRef, RecipeSummary, SearchQuery, Step, UserProfile,
};
pub use recipes::RecipeApi;
pub use users::UserApi;
