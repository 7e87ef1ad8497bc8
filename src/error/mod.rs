//! Error handling for recipebox.
//!
//! - [`ApiError`]: classified failure of a single gateway call
//! - [`ErrorCategory`]: coarse grouping used for retry advice and logging
//! - [`Notice`]: the title/message pair shown to the user
//! - [`ClientError`]: union returned by the session and account services
//!
//! | Variant | Status | Category | Notice title |
//! |---------|--------|----------|--------------|
//! | Unauthorized | 401 | Auth | Unauthorized |
//! | NotFound | 404 | Client | Not Found |
//! | Server | 5xx | Server | Server Error |
//! | Client | other | Client | Error {status} |
//! | Network | none | Network | Network Error |
//! | Setup | none | Client | Error |

mod api;
mod category;
mod client_error;
mod notice;

pub use api::ApiError;
pub use category::ErrorCategory;
pub use client_error::ClientError;
pub use notice::Notice;

/// Result alias for service-level operations.
pub type ClientResult<T> = Result<T, ClientError>;
