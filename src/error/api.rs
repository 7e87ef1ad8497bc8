//! Gateway error taxonomy.
//!
//! Every failed backend call is reduced to one [`ApiError`] variant. The
//! variant decides the category, the log code and the notice the user sees.

use std::fmt;

use super::category::ErrorCategory;
use super::notice::Notice;
use crate::traits::HttpError;

const GENERIC_CLIENT_MESSAGE: &str = "An error occurred.";

/// Classified failure of a gateway call.
#[derive(Debug, Clone, PartialEq)]
pub enum ApiError {
    /// 401: the session is missing or expired.
    Unauthorized { message: Option<String> },

    /// 404: the endpoint or resource does not exist.
    NotFound { message: Option<String> },

    /// 5xx: the backend failed.
    Server { status: u16, message: Option<String> },

    /// Any other non-2xx status.
    Client { status: u16, message: Option<String> },

    /// No response was received.
    Network { timed_out: bool, message: String },

    /// The request could not be built or sent.
    Setup { message: String },

    /// A 2xx response whose body did not match the expected shape.
    InvalidPayload { endpoint: String, message: String },

    /// Input rejected locally; nothing was sent.
    Validation { message: String },
}

impl ApiError {
    /// Classify a non-2xx response.
    ///
    /// The `message` field of a JSON body is kept so callers can show
    /// contextual text (e.g. "Invalid credentials" on the login form).
    pub fn from_status(status: u16, body: &[u8]) -> Self {
        let message = extract_message(body);
        match status {
            401 => ApiError::Unauthorized { message },
            404 => ApiError::NotFound { message },
            500..=599 => ApiError::Server { status, message },
            _ => ApiError::Client { status, message },
        }
    }

    /// Classify a transport failure.
    pub fn from_transport(err: &HttpError) -> Self {
        match err {
            HttpError::Timeout(msg) => ApiError::Network {
                timed_out: true,
                message: msg.clone(),
            },
            HttpError::ConnectionFailed(msg) | HttpError::Io(msg) => ApiError::Network {
                timed_out: false,
                message: msg.clone(),
            },
            HttpError::InvalidUrl(msg) | HttpError::Other(msg) => ApiError::Setup {
                message: msg.clone(),
            },
        }
    }

    /// Build a timeout error for a call that exceeded the gateway's bound.
    pub fn timeout(after: std::time::Duration) -> Self {
        ApiError::Network {
            timed_out: true,
            message: format!("no response within {} ms", after.as_millis()),
        }
    }

    /// HTTP status, when a response was received.
    pub fn status(&self) -> Option<u16> {
        match self {
            ApiError::Unauthorized { .. } => Some(401),
            ApiError::NotFound { .. } => Some(404),
            ApiError::Server { status, .. } | ApiError::Client { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// The message the backend attached to the error response, if any.
    pub fn server_message(&self) -> Option<&str> {
        match self {
            ApiError::Unauthorized { message }
            | ApiError::NotFound { message }
            | ApiError::Server { message, .. }
            | ApiError::Client { message, .. } => message.as_deref(),
            _ => None,
        }
    }

    pub fn category(&self) -> ErrorCategory {
        match self {
            ApiError::Unauthorized { .. } => ErrorCategory::Auth,
            ApiError::NotFound { .. } | ApiError::Client { .. } | ApiError::Setup { .. } => {
                ErrorCategory::Client
            }
            ApiError::Server { .. } | ApiError::InvalidPayload { .. } => ErrorCategory::Server,
            ApiError::Network { .. } => ErrorCategory::Network,
            ApiError::Validation { .. } => ErrorCategory::User,
        }
    }

    pub fn is_retryable(&self) -> bool {
        self.category().is_retryable()
    }

    /// True when the caller should send the user back to the login screen.
    pub fn requires_reauth(&self) -> bool {
        matches!(self, ApiError::Unauthorized { .. })
    }

    /// Get a short error code for logging.
    pub fn error_code(&self) -> &'static str {
        match self {
            ApiError::Unauthorized { .. } => "E_API_UNAUTHORIZED",
            ApiError::NotFound { .. } => "E_API_NOT_FOUND",
            ApiError::Server { .. } => "E_API_SERVER",
            ApiError::Client { .. } => "E_API_CLIENT",
            ApiError::Network { timed_out: true, .. } => "E_API_TIMEOUT",
            ApiError::Network { .. } => "E_API_NETWORK",
            ApiError::Setup { .. } => "E_API_SETUP",
            ApiError::InvalidPayload { .. } => "E_API_PAYLOAD",
            ApiError::Validation { .. } => "E_API_VALIDATION",
        }
    }

    /// The alert shown to the user for this failure.
    pub fn notice(&self) -> Notice {
        match self {
            ApiError::Unauthorized { .. } => Notice::new("Unauthorized", "Please log in again."),
            ApiError::NotFound { .. } => Notice::new(
                "Not Found",
                "The requested resource could not be found.",
            ),
            ApiError::Server { .. } => Notice::new(
                "Server Error",
                "Something went wrong on our end. Please try again later.",
            ),
            ApiError::Client { status, message } => Notice::new(
                format!("Error {}", status),
                message.as_deref().unwrap_or(GENERIC_CLIENT_MESSAGE),
            ),
            ApiError::Network { .. } => Notice::new(
                "Network Error",
                "Could not connect to the server. Please check your connection and try again.",
            ),
            ApiError::Setup { .. } | ApiError::InvalidPayload { .. } => {
                Notice::new("Error", "An unexpected error occurred.")
            }
            ApiError::Validation { message } => Notice::new("Error", message.clone()),
        }
    }
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ApiError::Unauthorized { message } => {
                write!(f, "HTTP 401 unauthorized")?;
                write_detail(f, message)
            }
            ApiError::NotFound { message } => {
                write!(f, "HTTP 404 not found")?;
                write_detail(f, message)
            }
            ApiError::Server { status, message } => {
                write!(f, "HTTP {} server error", status)?;
                write_detail(f, message)
            }
            ApiError::Client { status, message } => {
                write!(f, "HTTP {} error", status)?;
                write_detail(f, message)
            }
            ApiError::Network {
                timed_out: true,
                message,
            } => write!(f, "Request timed out: {}", message),
            ApiError::Network { message, .. } => write!(f, "Network error: {}", message),
            ApiError::Setup { message } => write!(f, "Request setup failed: {}", message),
            ApiError::InvalidPayload { endpoint, message } => {
                write!(f, "Invalid payload from '{}': {}", endpoint, message)
            }
            ApiError::Validation { message } => write!(f, "Validation failed: {}", message),
        }
    }
}

impl std::error::Error for ApiError {}

fn write_detail(f: &mut fmt::Formatter<'_>, message: &Option<String>) -> fmt::Result {
    match message {
        Some(msg) => write!(f, ": {}", msg),
        None => Ok(()),
    }
}

/// Pull `message` out of a JSON error body.
fn extract_message(body: &[u8]) -> Option<String> {
    let value: serde_json::Value = serde_json::from_slice(body).ok()?;
    value
        .get("message")
        .and_then(|m| m.as_str())
        .map(str::trim)
        .filter(|m| !m.is_empty())
        .map(str::to_string)
}
