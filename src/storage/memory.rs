//! In-memory key-value store.
//!
//! Used when no data directory is available and in tests. Clones share the
//! same contents, so a test can hand one clone to a repository and keep
//! another to inspect values and count writes.

use crate::domain::error::{PopcornError, Result};
use crate::storage::backend::KeyValueStore;
use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard};

#[derive(Debug, Default)]
struct Contents {
    entries: HashMap<String, String>,
    writes: usize,
}

#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    contents: Arc<Mutex<Contents>>,
}

impl MemoryStore {
    /// Store pre-seeded with one value; the seed does not count as a write.
    pub fn with_value(key: impl Into<String>, value: impl Into<String>) -> Self {
        let mut entries = HashMap::new();
        entries.insert(key.into(), value.into());
        Self {
            contents: Arc::new(Mutex::new(Contents { entries, writes: 0 })),
        }
    }

    /// Number of `set`/`remove` calls that changed the store, across all clones.
    #[must_use]
    pub fn writes(&self) -> usize {
        self.lock().map_or(0, |contents| contents.writes)
    }

    fn lock(&self) -> Result<MutexGuard<'_, Contents>> {
        self.contents
            .lock()
            .map_err(|e| PopcornError::Storage(format!("memory store lock poisoned: {e}")))
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        Ok(self.lock()?.entries.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> Result<()> {
        let mut contents = self.lock()?;
        contents.entries.insert(key.to_string(), value.to_string());
        contents.writes += 1;
        Ok(())
    }

    fn remove(&mut self, key: &str) -> Result<()> {
        let mut contents = self.lock()?;
        if contents.entries.remove(key).is_some() {
            contents.writes += 1;
        }
        Ok(())
    }
}
