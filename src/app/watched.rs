//! Watched list state.
//!
//! Entries are unique by id. Every change bumps [`WatchedState::revision`];
//! the event handler persists the collection whenever the revision moves and
//! the startup load has completed.

use crate::domain::WatchedEntry;

#[derive(Debug, Clone, Default, PartialEq)]
pub struct WatchedState {
    pub entries: Vec<WatchedEntry>,
    /// Whether the stored list has been read.
    pub loaded: bool,
    revision: u64,
}

#[derive(Debug, Clone, PartialEq)]
pub enum WatchedMsg {
    Add(WatchedEntry),
    Remove(String),
    /// The stored list arrived from storage.
    Loaded(Vec<WatchedEntry>),
}

impl WatchedState {
    #[must_use]
    pub fn reduce(mut self, msg: WatchedMsg) -> Self {
        match msg {
            WatchedMsg::Add(entry) => {
                if self.contains(&entry.id) {
                    tracing::debug!(id = %entry.id, "already watched, add ignored");
                    return self;
                }
                tracing::debug!(id = %entry.id, user_rating = entry.user_rating, "added to watched");
                self.entries.push(entry);
                self.revision += 1;
            }
            WatchedMsg::Remove(id) => {
                let before = self.entries.len();
                self.entries.retain(|entry| entry.id != id);
                if self.entries.len() != before {
                    tracing::debug!(id = %id, "removed from watched");
                    self.revision += 1;
                }
            }
            WatchedMsg::Loaded(stored) => {
                let added_early = std::mem::take(&mut self.entries);
                self.loaded = true;

                // First occurrence wins; stored entries come before early adds.
                let stored_count = stored.len();
                let mut kept_stored = 0;
                let mut merged_any = false;
                for (index, entry) in stored.into_iter().chain(added_early).enumerate() {
                    if self.contains(&entry.id) {
                        continue;
                    }
                    if index < stored_count {
                        kept_stored += 1;
                    } else {
                        merged_any = true;
                    }
                    self.entries.push(entry);
                }

                let dropped = stored_count - kept_stored;
                if dropped > 0 {
                    tracing::warn!(dropped = dropped, "stored watched list had duplicate ids");
                }
                if merged_any || dropped > 0 {
                    self.revision += 1;
                }
                tracing::debug!(count = self.entries.len(), merged = merged_any, "watched list loaded");
            }
        }
        self
    }

    #[must_use]
    pub fn contains(&self, id: &str) -> bool {
        self.entries.iter().any(|entry| entry.id == id)
    }

    /// The user's rating for `id`, if watched.
    #[must_use]
    pub fn user_rating_for(&self, id: &str) -> Option<u8> {
        self.entries.iter().find(|entry| entry.id == id).map(|entry| entry.user_rating)
    }

    /// Monotonic change counter.
    #[must_use]
    pub const fn revision(&self) -> u64 {
        self.revision
    }
}
