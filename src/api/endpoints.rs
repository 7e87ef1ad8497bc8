//! Backend route paths, relative to the configured base URL.

pub const LOGIN: &str = "/auth/login";
pub const REGISTER: &str = "/auth/register";

pub const USER_PROFILE: &str = "/users/profile";
pub const USER_DELETE: &str = "/users/delete";
pub const USER_RECIPES: &str = "/users/recipes";
pub const FAVORITES: &str = "/users/favorites";
pub const BOOKMARKS: &str = "/users/bookmarks";

pub const RECIPES: &str = "/recipes";
pub const RECIPES_RECENT: &str = "/recipes/recent";
pub const RECIPES_POPULAR: &str = "/recipes/popular";
pub const SEARCH: &str = "/search";

pub const COMMENTS: &str = "/comments";

/// Endpoints whose failures are reported to the caller only.
///
/// The login form renders its own message, so a second alert would be noise.
pub const SILENT_ENDPOINTS: &[&str] = &[LOGIN];

/// Append one path segment, percent-encoded.
pub fn with_id(base: &str, id: &str) -> String {
    format!("{}/{}", base, urlencoding::encode(id))
}

pub fn favorite(recipe_id: &str) -> String {
    with_id(FAVORITES, recipe_id)
}

pub fn bookmark(recipe_id: &str) -> String {
    with_id(BOOKMARKS, recipe_id)
}

pub fn recipe(recipe_id: &str) -> String {
    with_id(RECIPES, recipe_id)
}

pub fn related_recipes(recipe_id: &str) -> String {
    format!("{}/related", recipe(recipe_id))
}

pub fn recipe_comments(recipe_id: &str) -> String {
    with_id("/comments/recipe", recipe_id)
}

pub fn comment(comment_id: &str) -> String {
    with_id(COMMENTS, comment_id)
}

/// Whether failures on `endpoint` skip the user-facing alert.
pub fn is_silent(endpoint: &str) -> bool {
    let path = endpoint.split('?').next().unwrap_or(endpoint);
    SILENT_ENDPOINTS.contains(&path)
}
