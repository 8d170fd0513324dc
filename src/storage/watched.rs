//! Typed access to the persisted watched list.
//!
//! The list is stored as one JSON array of [`WatchedEntry`] records under a
//! configurable key. Reads are forgiving: a missing key or a value that does
//! not parse both yield an empty list. Writes always replace the whole array.

use crate::domain::error::Result;
use crate::domain::WatchedEntry;
use crate::storage::backend::KeyValueStore;

/// Watched-list persistence over any [`KeyValueStore`].
pub struct WatchedRepository {
    store: Box<dyn KeyValueStore>,
    key: String,
}

impl WatchedRepository {
    pub fn new(store: Box<dyn KeyValueStore>, key: impl Into<String>) -> Self {
        Self {
            store,
            key: key.into(),
        }
    }

    /// Reads the stored list, defaulting to empty when absent or invalid.
    ///
    /// # Errors
    ///
    /// Returns an error only if the backend itself fails to read.
    pub fn load(&self) -> Result<Vec<WatchedEntry>> {
        let _span = tracing::debug_span!("watched_load", key = %self.key).entered();

        let Some(raw) = self.store.get(&self.key)? else {
            tracing::debug!("no watched list stored yet");
            return Ok(Vec::new());
        };

        // A literal `null` counts as an empty list.
        match serde_json::from_str::<Option<Vec<WatchedEntry>>>(&raw) {
            Ok(entries) => {
                let entries = entries.unwrap_or_default();
                tracing::debug!(count = entries.len(), "watched list loaded");
                Ok(entries)
            }
            Err(e) => {
                tracing::warn!(error = %e, "stored watched list is invalid, using empty list");
                Ok(Vec::new())
            }
        }
    }

    /// Replaces the stored list with `entries`.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization or the backend write fails.
    pub fn save(&mut self, entries: &[WatchedEntry]) -> Result<()> {
        let _span = tracing::debug_span!("watched_save", key = %self.key, count = entries.len()).entered();

        let json = serde_json::to_string(entries)?;
        self.store.set(&self.key, &json)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::MemoryStore;

    fn entry(id: &str, user_rating: u8) -> WatchedEntry {
        WatchedEntry {
            id: id.to_string(),
            title: format!("Movie {id}"),
            year: "2001".to_string(),
            poster: "N/A".to_string(),
            catalog_rating: 7.5,
            runtime_minutes: 120,
            user_rating,
        }
    }

    #[test]
    fn missing_key_loads_empty() {
        let repo = WatchedRepository::new(Box::new(MemoryStore::default()), "watched");
        assert!(repo.load().unwrap().is_empty());
    }

    #[test]
    fn invalid_or_null_value_loads_empty() {
        let repo = WatchedRepository::new(Box::new(MemoryStore::with_value("watched", "{oops")), "watched");
        assert!(repo.load().unwrap().is_empty());

        let repo = WatchedRepository::new(Box::new(MemoryStore::with_value("watched", "null")), "watched");
        assert!(repo.load().unwrap().is_empty());
    }

    #[test]
    fn save_then_load_returns_same_entries() {
        let mut repo = WatchedRepository::new(Box::new(MemoryStore::default()), "watched");
        let entries = vec![entry("tt1", 8), entry("tt2", 3)];
        repo.save(&entries).unwrap();
        assert_eq!(repo.load().unwrap(), entries);
    }

    #[test]
    fn reads_records_in_stored_format() {
        let raw = r#"[{"imdbID":"tt1","title":"A","year":"1999","poster":"p","imdbRating":8.5,"runtime":101,"userRating":7}]"#;
        let repo = WatchedRepository::new(Box::new(MemoryStore::with_value("watched", raw)), "watched");
        let loaded = repo.load().unwrap();
        assert_eq!(loaded.len(), 1);
        assert_eq!(loaded[0].runtime_minutes, 101);
        assert_eq!(loaded[0].user_rating, 7);
    }
}
