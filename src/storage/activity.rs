use std::sync::Arc;

use crate::models::{ActivityKind, Book, UserActivity};

use super::{load_or_default, persist, StorageBackend, StorageKey};

/// Upper bound on retained activity entries. Older entries fall off the
/// front of the log.
pub const MAX_ACTIVITY_ITEMS: usize = 100;

/// Append-only log of what the user has done, feeding the recommendation
/// engine. Both the in-memory log and the persisted payload respect
/// [`MAX_ACTIVITY_ITEMS`].
pub struct ActivityLog {
    backend: Arc<dyn StorageBackend>,
    entries: Vec<UserActivity>,
}

impl ActivityLog {
    pub fn new(backend: Arc<dyn StorageBackend>) -> Self {
        let mut entries: Vec<UserActivity> =
            load_or_default(backend.as_ref(), StorageKey::Activity);
        // An oversized stored log (hand-edited or from an older build) is
        // trimmed on load so the cap holds everywhere.
        Self::truncate(&mut entries);
        Self { backend, entries }
    }

    /// Appends one entry stamped with the current time. When the full book
    /// record is at hand, its genre and author ride along for the
    /// recommendation engine.
    pub fn track(&mut self, book_id: impl Into<String>, kind: ActivityKind, book: Option<&Book>) {
        let activity = UserActivity::now(book_id, kind, book);
        tracing::debug!(book_id = %activity.book_id, kind = ?activity.kind, "Tracked activity");
        self.entries.push(activity);
        Self::truncate(&mut self.entries);
        self.persist();
    }

    /// The log in chronological order.
    pub fn all(&self) -> &[UserActivity] {
        &self.entries
    }

    /// The log most-recent-first.
    pub fn recent(&self) -> impl Iterator<Item = &UserActivity> {
        self.entries.iter().rev()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    fn truncate(entries: &mut Vec<UserActivity>) {
        if entries.len() > MAX_ACTIVITY_ITEMS {
            let excess = entries.len() - MAX_ACTIVITY_ITEMS;
            entries.drain(..excess);
        }
    }

    fn persist(&self) {
        persist(self.backend.as_ref(), StorageKey::Activity, &self.entries);
    }
}
