//! Crate-level error union.

use thiserror::Error;

use super::api::ApiError;
use super::category::ErrorCategory;
use crate::traits::StorageError;

/// Any failure surfaced by the session and account services.
#[derive(Debug, Error)]
pub enum ClientError {
    /// A backend call failed (already classified and, where applicable, alerted).
    #[error(transparent)]
    Api(#[from] ApiError),

    /// Durable storage could not be read or written.
    #[error(transparent)]
    Storage(#[from] StorageError),

    /// The operation needs a logged-in session.
    #[error("Not logged in")]
    NotAuthenticated,
}

impl ClientError {
    pub fn category(&self) -> Option<ErrorCategory> {
        match self {
            ClientError::Api(err) => Some(err.category()),
            ClientError::NotAuthenticated => Some(ErrorCategory::Auth),
            ClientError::Storage(_) => None,
        }
    }

    /// The underlying API error, when there is one.
    pub fn as_api(&self) -> Option<&ApiError> {
        match self {
            ClientError::Api(err) => Some(err),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_api_error_converts() {
        let err: ClientError = ApiError::from_status(401, b"").into();
        assert!(matches!(err, ClientError::Api(_)));
        assert_eq!(err.category(), Some(ErrorCategory::Auth));
        assert_eq!(err.to_string(), "HTTP 401 unauthorized");
        assert!(err.as_api().is_some());
    }

    #[test]
    fn test_storage_error_converts() {
        let err: ClientError = StorageError::WriteFailed("disk full".to_string()).into();
        assert!(matches!(err, ClientError::Storage(_)));
        assert!(err.to_string().contains("disk full"));
        assert_eq!(err.category(), None);
    }

    #[test]
    fn test_not_authenticated_display() {
        assert_eq!(ClientError::NotAuthenticated.to_string(), "Not logged in");
    }
}
