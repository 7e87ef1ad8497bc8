//! User-facing notification trait.
//!
//! The gateway raises a [`Notice`] for every failed call (except login).
//! How it reaches the user is up to the consumer: a dialog, a toast, or a
//! line on stderr for the CLI.

use crate::error::Notice;

/// Sink for user-visible alerts.
pub trait Notifier: Send + Sync {
    /// Present a notice to the user. Must not block.
    fn notify(&self, notice: &Notice);
}
