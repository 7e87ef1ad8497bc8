//! recipebox - session and user-data client for a recipe-sharing backend
//!
//! The library holds the HTTP gateway, durable session storage and the
//! user-data cache (profile plus favorites/bookmarks mirrors). The `recipebox`
//! binary in `main.rs` is a small CLI on top of it.

pub mod adapters;
pub mod api;
pub mod app;
pub mod cli;
pub mod config;
pub mod error;
pub mod logging;
pub mod prelude;
pub mod session;
pub mod traits;
