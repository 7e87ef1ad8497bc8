//! Concrete implementations of trait abstractions.
//!
//! # Adapters
//!
//! - [`ReqwestHttpClient`] - HTTP client using reqwest
//! - [`FileStore`] - JSON-file key-value storage
//! - [`LogNotifier`] - Notices via tracing (and stderr for the CLI)
//!
//! # Mock Implementations
//!
//! The [`mock`] submodule provides test doubles:
//! - [`mock::MockHttpClient`] - Configurable HTTP responses
//! - [`mock::InMemoryStore`] - In-memory storage
//! - [`mock::RecordingNotifier`] - Records notices

pub mod file_store;
pub mod log_notifier;
pub mod mock;
pub mod reqwest_http;

pub use file_store::FileStore;
pub use log_notifier::LogNotifier;
pub use mock::{InMemoryStore, MockHttpClient, RecordingNotifier};
pub use reqwest_http::ReqwestHttpClient;
