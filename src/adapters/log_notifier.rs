//! Notifier that reports alerts through tracing and, optionally, stderr.

use crate::error::Notice;
use crate::traits::Notifier;

/// Production [`Notifier`] for headless consumers such as the CLI.
#[derive(Debug, Clone, Default)]
pub struct LogNotifier {
    echo_stderr: bool,
}

impl LogNotifier {
    /// Log notices at `warn` only.
    pub fn new() -> Self {
        Self::default()
    }

    /// Log notices and also print them to stderr for the user.
    pub fn with_stderr() -> Self {
        Self { echo_stderr: true }
    }
}

impl Notifier for LogNotifier {
    fn notify(&self, notice: &Notice) {
        tracing::warn!("{}", notice);
        if self.echo_stderr {
            eprintln!("{}\n  {}", notice.title, notice.message);
        }
    }
}
