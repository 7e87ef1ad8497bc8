//! Coarse classification of API failures.

use std::fmt;

/// High-level categorization of errors for handling decisions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCategory {
    /// No response was received (connectivity, timeout).
    Network,

    /// The session is missing or no longer accepted.
    Auth,

    /// The backend failed (5xx) or answered with an unreadable payload.
    Server,

    /// The request was rejected (4xx) or could not be built.
    Client,

    /// Input failed local validation before anything was sent.
    User,
}

impl ErrorCategory {
    /// Returns true if errors in this category are generally transient.
    ///
    /// The gateway itself never retries; this is advice for callers.
    pub fn is_retryable(&self) -> bool {
        matches!(self, ErrorCategory::Network | ErrorCategory::Server)
    }

    /// Returns a short label for the category suitable for logging.
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorCategory::Network => "network",
            ErrorCategory::Auth => "auth",
            ErrorCategory::Server => "server",
            ErrorCategory::Client => "client",
            ErrorCategory::User => "user",
        }
    }

    /// Returns a user-friendly description of the category.
    pub fn description(&self) -> &'static str {
        match self {
            ErrorCategory::Network => "Network connectivity issue",
            ErrorCategory::Auth => "Authentication problem",
            ErrorCategory::Server => "Server-side issue",
            ErrorCategory::Client => "Request rejected",
            ErrorCategory::User => "Invalid input",
        }
    }
}

impl fmt::Display for ErrorCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
