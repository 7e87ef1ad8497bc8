//! Fetch-fenced local copy of a server-owned identifier set.
//!
//! A refresh is a two-step affair: [`IdMirror::begin_fetch`] hands out a
//! ticket before the request is sent and [`IdMirror::complete_fetch`] applies
//! the response only if no later fetch was issued in between.
//!
//! Local adds and removes are staged as pending changes. Whenever a server
//! list is applied, pending changes are replayed on top of it, so a response
//! that was read before the backend saw a change cannot undo that change.
//! A change is forgotten once a fetch issued after it settled has been
//! applied, since that list already reflects it.

/// Proof that a fetch was issued at a given point.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FetchTicket(u64);

/// Handle for a staged local change.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChangeTicket(u64);

#[derive(Debug, Clone, PartialEq, Eq)]
struct PendingChange {
    ticket: u64,
    id: String,
    present: bool,
    /// Fetch counter at the time the backend call finished.
    settled_at: Option<u64>,
}

/// Ordered, duplicate-free identifier list.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct IdMirror {
    ids: Vec<String>,
    fetches: u64,
    changes: u64,
    pending: Vec<PendingChange>,
}

impl IdMirror {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn ids(&self) -> &[String] {
        &self.ids
    }

    pub fn contains(&self, id: &str) -> bool {
        self.ids.iter().any(|existing| existing == id)
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    /// Number of local changes still replayed over fetched lists.
    pub fn pending_len(&self) -> usize {
        self.pending.len()
    }

    /// Append `id` if absent. Returns whether the set changed.
    pub fn insert(&mut self, id: &str) -> bool {
        if self.contains(id) {
            return false;
        }
        self.ids.push(id.to_string());
        true
    }

    /// Drop `id`. Returns the position it held, if it was present.
    pub fn remove(&mut self, id: &str) -> Option<usize> {
        let position = self.ids.iter().position(|existing| existing == id)?;
        self.ids.remove(position);
        Some(position)
    }

    /// Put `id` back where [`IdMirror::remove`] found it.
    pub fn restore(&mut self, position: usize, id: &str) -> bool {
        if self.contains(id) {
            return false;
        }
        let position = position.min(self.ids.len());
        self.ids.insert(position, id.to_string());
        true
    }

    /// Insert `id` and keep replaying the insert until it is settled.
    pub fn stage_insert(&mut self, id: &str) -> (ChangeTicket, bool) {
        let inserted = self.insert(id);
        (self.track(id, true), inserted)
    }

    /// Remove `id` and keep replaying the removal until it is settled.
    pub fn stage_remove(&mut self, id: &str) -> (ChangeTicket, Option<usize>) {
        let position = self.remove(id);
        (self.track(id, false), position)
    }

    /// Mark the backend call behind `change` as finished.
    ///
    /// The change is still replayed over responses to fetches that were
    /// already in flight.
    pub fn settle(&mut self, change: ChangeTicket) {
        let fetches = self.fetches;
        if let Some(entry) = self.pending.iter_mut().find(|p| p.ticket == change.0) {
            entry.settled_at = Some(fetches);
        }
    }

    /// Stop replaying `change` altogether.
    pub fn discard(&mut self, change: ChangeTicket) {
        self.pending.retain(|p| p.ticket != change.0);
    }

    /// Start a refresh; any ticket issued earlier becomes stale.
    pub fn begin_fetch(&mut self) -> FetchTicket {
        self.fetches += 1;
        FetchTicket(self.fetches)
    }

    /// Replace the contents with `ids` if `ticket` is still current, then
    /// replay pending local changes over them.
    ///
    /// Duplicates keep their first occurrence. Returns whether the response
    /// was applied.
    pub fn complete_fetch<I>(&mut self, ticket: FetchTicket, ids: I) -> bool
    where
        I: IntoIterator<Item = String>,
    {
        if ticket.0 != self.fetches {
            return false;
        }

        let mut fresh: Vec<String> = Vec::new();
        for id in ids {
            if !fresh.contains(&id) {
                fresh.push(id);
            }
        }
        self.ids = fresh;

        self.pending
            .retain(|p| !matches!(p.settled_at, Some(at) if ticket.0 > at));
        let replay: Vec<(String, bool)> = self
            .pending
            .iter()
            .map(|p| (p.id.clone(), p.present))
            .collect();
        for (id, present) in replay {
            if present {
                self.insert(&id);
            } else {
                self.remove(&id);
            }
        }
        true
    }

    fn track(&mut self, id: &str, present: bool) -> ChangeTicket {
        self.changes += 1;
        self.pending.push(PendingChange {
            ticket: self.changes,
            id: id.to_string(),
            present,
            settled_at: None,
        });
        ChangeTicket(self.changes)
    }
}
