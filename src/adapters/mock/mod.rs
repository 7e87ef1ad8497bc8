//! Mock implementations for testing.
//!
//! # Available Mocks
//!
//! - [`MockHttpClient`] - HTTP client with per-route, optionally delayed responses
//! - [`InMemoryStore`] - In-memory key-value storage with failure switches
//! - [`RecordingNotifier`] - Collects user-facing notices

pub mod http;
pub mod notifier;
pub mod store;

pub use http::{MockHttpClient, MockResponse, RecordedRequest};
pub use notifier::RecordingNotifier;
pub use store::InMemoryStore;
