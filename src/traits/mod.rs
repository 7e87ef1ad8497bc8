//! Trait abstractions for dependency injection and testability.
//!
//! # Traits
//!
//! - [`HttpClient`] - HTTP client operations (GET, POST, PUT, DELETE)
//! - [`KeyValueStore`] - Durable key-value storage
//! - [`Notifier`] - User-visible alerts

pub mod http;
pub mod notifier;
pub mod storage;

pub use http::{Headers, HttpClient, HttpError, Method, Response};
pub use notifier::Notifier;
pub use storage::{KeyValueStore, StorageError};
