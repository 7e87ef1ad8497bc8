//! Notifier double that records every notice.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use crate::error::Notice;
use crate::traits::Notifier;

/// [`Notifier`] that keeps notices for later assertions.
#[derive(Debug, Clone, Default)]
pub struct RecordingNotifier {
    notices: Arc<Mutex<Vec<Notice>>>,
}

impl RecordingNotifier {
    pub fn new() -> Self {
        Self::default()
    }

    /// All notices raised so far, oldest first.
    pub fn notices(&self) -> Vec<Notice> {
        self.guard().clone()
    }

    pub fn count(&self) -> usize {
        self.guard().len()
    }

    pub fn clear(&self) {
        self.guard().clear();
    }

    fn guard(&self) -> MutexGuard<'_, Vec<Notice>> {
        self.notices.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl Notifier for RecordingNotifier {
    fn notify(&self, notice: &Notice) {
        self.guard().push(notice.clone());
    }
}
