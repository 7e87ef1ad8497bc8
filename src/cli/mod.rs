//! CLI module for recipebox.
//!
//! The binary is a thin consumer of the library:
//! - Argument parsing
//! - Version and usage display
//! - Command dispatch against an [`AppContext`]
//!
//! # Usage
//!
//! ```ignore
//! use recipebox::cli::{parse_args, run_cli_command};
//!
//! let command = parse_args(std::env::args());
//! let output = runtime.block_on(run_cli_command(command, &context))?;
//! print!("{}", output);
//! ```

pub mod args;
pub mod output;

pub use args::{parse_args, CliCommand};

use color_eyre::eyre::eyre;
use color_eyre::Result;

use crate::app::{AppContext, StartupOutcome};
use crate::error::ClientError;

/// The current version, read from Cargo.toml at compile time.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Usage text shown by `help` and after invalid arguments.
pub fn usage() -> String {
    format!(
        "recipebox {}\n\n\
         USAGE:\n    recipebox <command> [args]\n\n\
         COMMANDS:\n\
         \x20   login <email> <password>   Log in and cache the session\n\
         \x20   logout                     Forget the stored session\n\
         \x20   whoami                     Show the current profile\n\
         \x20   favorites | bookmarks      List saved recipes\n\
         \x20   favorite <id>              Add a recipe to favorites\n\
         \x20   unfavorite <id>            Remove a recipe from favorites\n\
         \x20   bookmark <id>              Bookmark a recipe\n\
         \x20   unbookmark <id>            Remove a bookmark\n\
         \x20   recent | popular           Browse recipes\n\
         \x20   search <query>             Search recipes\n\
         \x20   show <id>                  Show a recipe with comments\n\
         \x20   --version                  Print the version\n\n\
         ENVIRONMENT:\n\
         \x20   RECIPEBOX_API_URL, RECIPEBOX_TIMEOUT_SECS, RECIPEBOX_DATA_DIR,\n\
         \x20   RECIPEBOX_OPTIMISTIC_ONLY, RECIPEBOX_LOG\n",
        VERSION
    )
}

/// Run a session command and return what should be printed.
///
/// Startup (token restore + cache initialization) runs first for every
/// command except `login`, which starts a fresh session.
pub async fn run_cli_command(command: CliCommand, context: &AppContext) -> Result<String> {
    match &command {
        CliCommand::Version => return Ok(format!("recipebox {}\n", VERSION)),
        CliCommand::Help => return Ok(usage()),
        CliCommand::Invalid(reason) => return Err(eyre!("{}\n\n{}", reason, usage())),
        CliCommand::Login { email, password } => {
            let profile = context.account.login(email, password).await?;
            let name = profile.map_or_else(|| email.clone(), |p| p.username);
            return Ok(format!("Logged in as {}\n", name));
        }
        _ => {}
    }

    let outcome = context.start().await?;
    if outcome == StartupOutcome::LoginRequired && command.requires_login() {
        return Err(ClientError::NotAuthenticated.into());
    }

    let cache = &context.cache;
    let recipes = &context.recipes;

    let out = match command {
        CliCommand::Logout => {
            context.account.logout().await?;
            "Logged out\n".to_string()
        }
        CliCommand::WhoAmI => match cache.profile() {
            Some(profile) => output::profile(&profile),
            None => return Err(eyre!("Profile unavailable; try logging in again")),
        },
        CliCommand::Favorites => output::collection("FAVORITES", &cache.fetch_favorites().await?),
        CliCommand::Bookmarks => output::collection("BOOKMARKS", &cache.fetch_bookmarks().await?),
        CliCommand::Favorite(id) => {
            cache.add_favorite(&id).await?;
            format!("Added {} to favorites\n", id)
        }
        CliCommand::Unfavorite(id) => {
            cache.remove_favorite(&id).await?;
            format!("Removed {} from favorites\n", id)
        }
        CliCommand::Bookmark(id) => {
            cache.add_bookmark(&id).await?;
            format!("Bookmarked {}\n", id)
        }
        CliCommand::Unbookmark(id) => {
            cache.remove_bookmark(&id).await?;
            format!("Removed bookmark {}\n", id)
        }
        CliCommand::Recent => output::recipe_list("RECENT RECIPES", &recipes.recent().await?),
        CliCommand::Popular => output::recipe_list("POPULAR RECIPES", &recipes.popular().await?),
        CliCommand::Search(query) => {
            let found = recipes
                .search(&crate::api::SearchQuery::text(query.as_str()))
                .await?;
            output::recipe_list(&format!("RESULTS FOR \"{}\"", query), &found)
        }
        CliCommand::Show(id) => {
            let (detail, comments) = futures::join!(recipes.detail(&id), recipes.comments(&id));
            let detail = detail?;
            let comments = comments.unwrap_or_default();
            if matches!(outcome, StartupOutcome::Ready(_)) {
                // Markers come from the mirrors; refresh them first
                let (favorites, bookmarks) =
                    tokio::join!(cache.fetch_favorites(), cache.fetch_bookmarks());
                if let Err(e) = favorites {
                    tracing::warn!("Favorites not refreshed for {}: {}", id, e);
                }
                if let Err(e) = bookmarks {
                    tracing::warn!("Bookmarks not refreshed for {}: {}", id, e);
                }
            }
            output::recipe_detail(
                &detail,
                &comments,
                cache.is_favorite(&id),
                cache.is_bookmarked(&id),
            )
        }
        other => return Err(eyre!("{:?} cannot run after startup", other)),
    };
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::mock::{InMemoryStore, MockHttpClient, MockResponse, RecordingNotifier};
    use crate::config::ClientConfig;
    use crate::session::{TOKEN_KEY, USER_DATA_KEY};
    use crate::traits::Method;
    use serde_json::json;
    use std::sync::Arc;

    fn context(http: &MockHttpClient, store: InMemoryStore) -> AppContext {
        AppContext::new(
            ClientConfig::new().with_base_url("http://api.test"),
            Arc::new(http.clone()),
            Arc::new(store),
            Arc::new(RecordingNotifier::new()),
        )
    }

    #[tokio::test]
    async fn test_version_and_help_need_no_network() {
        let http = MockHttpClient::new();
        let ctx = context(&http, InMemoryStore::new());

        let version = run_cli_command(CliCommand::Version, &ctx).await.unwrap();
        assert!(version.starts_with("recipebox "));
        let help = run_cli_command(CliCommand::Help, &ctx).await.unwrap();
        assert!(help.contains("USAGE:"));
        assert!(http.get_requests().is_empty());
    }

    #[tokio::test]
    async fn test_session_commands_require_login() {
        let http = MockHttpClient::new();
        let ctx = context(&http, InMemoryStore::new());

        let err = run_cli_command(CliCommand::Favorites, &ctx)
            .await
            .unwrap_err();
        assert!(err.to_string().contains("Not logged in"));
        assert!(http.get_requests().is_empty());
    }

    #[tokio::test]
    async fn test_browse_works_without_login() {
        let http = MockHttpClient::new();
        http.set_response(
            Method::Get,
            "http://api.test/recipes/popular",
            MockResponse::json(200, json!([{"_id": "r1", "title": "Pho"}])),
        );
        let ctx = context(&http, InMemoryStore::new());

        let out = run_cli_command(CliCommand::Popular, &ctx).await.unwrap();
        assert!(out.contains("POPULAR RECIPES"));
        assert!(out.contains("r1  Pho"));
    }

    #[tokio::test]
    async fn test_favorite_command_uses_cache() {
        let http = MockHttpClient::new();
        http.set_default_response(MockResponse::json(200, json!({"_id": "u1"})));
        let ctx = context(&http, InMemoryStore::with_entries([(TOKEN_KEY, "T1")]));

        let out = run_cli_command(CliCommand::Favorite("r9".to_string()), &ctx)
            .await
            .unwrap();
        assert_eq!(out, "Added r9 to favorites\n");
        assert!(ctx.cache.is_favorite("r9"));
        let posts = http.requests_to(Method::Post, "/users/favorites");
        assert_eq!(
            posts[0].headers.get("Authorization"),
            Some(&"Bearer T1".to_string())
        );
    }

    #[tokio::test]
    async fn test_show_survives_failed_marker_refresh() {
        let http = MockHttpClient::new();
        http.set_response(
            Method::Get,
            "http://api.test/recipes/r1",
            MockResponse::json(200, json!({"_id": "r1", "title": "Pho"})),
        );
        http.set_response(
            Method::Get,
            "http://api.test/comments/recipe/r1",
            MockResponse::json(200, json!([])),
        );
        http.set_response(
            Method::Get,
            "http://api.test/users/favorites",
            MockResponse::json(500, json!({})),
        );
        http.set_response(
            Method::Get,
            "http://api.test/users/bookmarks",
            MockResponse::json(200, json!(["r1"])),
        );
        let store = InMemoryStore::with_entries([(TOKEN_KEY, "T1"), (USER_DATA_KEY, r#"{"id":"u1"}"#)]);
        let ctx = context(&http, store);

        let out = run_cli_command(CliCommand::Show("r1".to_string()), &ctx)
            .await
            .unwrap();

        assert!(out.contains("Pho"));
        assert!(out.contains("bookmarked"));
        assert!(!out.contains("♥ favorite"));
        assert_eq!(http.requests_to(Method::Get, "/users/favorites").len(), 1);
    }
}
