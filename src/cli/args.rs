//! Command-line argument parsing for the recipebox CLI.
//!
//! This module turns `std::env::args()` into the [`CliCommand`] to execute.

/// Parsed CLI command to execute.
#[derive(Debug, Clone, PartialEq)]
pub enum CliCommand {
    /// Show version information
    Version,
    /// Show usage
    Help,
    /// Log in and cache the session
    Login { email: String, password: String },
    /// Drop the stored session
    Logout,
    /// Show the logged-in profile
    WhoAmI,
    /// List favorites
    Favorites,
    /// List bookmarks
    Bookmarks,
    Favorite(String),
    Unfavorite(String),
    Bookmark(String),
    Unbookmark(String),
    /// Newest recipes
    Recent,
    /// Most popular recipes
    Popular,
    /// Free-text search
    Search(String),
    /// Recipe detail with comments
    Show(String),
    /// Arguments that do not form a command; carries the reason
    Invalid(String),
}

impl CliCommand {
    /// Whether the command needs a stored session.
    pub fn requires_login(&self) -> bool {
        matches!(
            self,
            CliCommand::WhoAmI
                | CliCommand::Favorites
                | CliCommand::Bookmarks
                | CliCommand::Favorite(_)
                | CliCommand::Unfavorite(_)
                | CliCommand::Bookmark(_)
                | CliCommand::Unbookmark(_)
        )
    }
}

/// Parse command-line arguments and return the command to execute.
///
/// # Arguments
///
/// * `args` - Iterator of command-line arguments (typically `std::env::args()`)
///
/// # Examples
///
/// ```
/// use recipebox::cli::args::{parse_args, CliCommand};
///
/// let args = vec!["recipebox".to_string(), "favorite".to_string(), "r1".to_string()];
/// assert_eq!(parse_args(args.into_iter()), CliCommand::Favorite("r1".to_string()));
/// ```
pub fn parse_args<I>(args: I) -> CliCommand
where
    I: Iterator<Item = String>,
{
    // Skip the program name
    let mut args = args.skip(1);
    let Some(command) = args.next() else {
        return CliCommand::Help;
    };
    let rest: Vec<String> = args.collect();

    let one_id = |build: fn(String) -> CliCommand| match rest.as_slice() {
        [id] if !id.trim().is_empty() => build(id.trim().to_string()),
        _ => CliCommand::Invalid(format!("`{}` takes exactly one recipe id", command)),
    };

    match command.as_str() {
        "--version" | "-V" | "version" => CliCommand::Version,
        "--help" | "-h" | "help" => CliCommand::Help,
        "login" => match rest.as_slice() {
            [email, password] => CliCommand::Login {
                email: email.clone(),
                password: password.clone(),
            },
            _ => CliCommand::Invalid("`login` takes <email> <password>".to_string()),
        },
        "logout" => CliCommand::Logout,
        "whoami" => CliCommand::WhoAmI,
        "favorites" => CliCommand::Favorites,
        "bookmarks" => CliCommand::Bookmarks,
        "favorite" => one_id(CliCommand::Favorite),
        "unfavorite" => one_id(CliCommand::Unfavorite),
        "bookmark" => one_id(CliCommand::Bookmark),
        "unbookmark" => one_id(CliCommand::Unbookmark),
        "show" => one_id(CliCommand::Show),
        "recent" => CliCommand::Recent,
        "popular" => CliCommand::Popular,
        "search" => {
            let query = rest.join(" ");
            if query.trim().is_empty() {
                CliCommand::Invalid("`search` needs a query".to_string())
            } else {
                CliCommand::Search(query.trim().to_string())
            }
        }
        other => CliCommand::Invalid(format!("unknown command `{}`", other)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> CliCommand {
        let mut all = vec!["recipebox".to_string()];
        all.extend(args.iter().map(|a| a.to_string()));
        parse_args(all.into_iter())
    }

    #[test]
    fn test_parse_version_flag() {
        assert_eq!(parse(&["--version"]), CliCommand::Version);
        assert_eq!(parse(&["-V"]), CliCommand::Version);
    }

    #[test]
    fn test_parse_no_args() {
        assert_eq!(parse(&[]), CliCommand::Help);
    }

    #[test]
    fn test_parse_login() {
        assert_eq!(
            parse(&["login", "a@b.com", "secret"]),
            CliCommand::Login {
                email: "a@b.com".to_string(),
                password: "secret".to_string()
            }
        );
        assert!(matches!(parse(&["login", "a@b.com"]), CliCommand::Invalid(_)));
    }

    #[test]
    fn test_parse_id_commands() {
        assert_eq!(parse(&["favorite", "r1"]), CliCommand::Favorite("r1".to_string()));
        assert_eq!(parse(&["unbookmark", "r2"]), CliCommand::Unbookmark("r2".to_string()));
        assert_eq!(parse(&["show", "r3"]), CliCommand::Show("r3".to_string()));
        assert!(matches!(parse(&["favorite"]), CliCommand::Invalid(_)));
        assert!(matches!(parse(&["bookmark", "a", "b"]), CliCommand::Invalid(_)));
    }

    #[test]
    fn test_parse_search_joins_words() {
        assert_eq!(
            parse(&["search", "beef", "pho"]),
            CliCommand::Search("beef pho".to_string())
        );
        assert!(matches!(parse(&["search"]), CliCommand::Invalid(_)));
    }

    #[test]
    fn test_parse_unknown_command() {
        assert!(matches!(parse(&["--unknown"]), CliCommand::Invalid(_)));
    }

    #[test]
    fn test_requires_login() {
        assert!(CliCommand::Favorites.requires_login());
        assert!(CliCommand::Favorite("r1".to_string()).requires_login());
        assert!(!CliCommand::Recent.requires_login());
        assert!(!CliCommand::Show("r1".to_string()).requires_login());
    }
}
