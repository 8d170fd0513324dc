//! JSON file-based key-value store.
//!
//! The whole store is one human-readable JSON document, kept in memory and
//! rewritten on every change using write-to-temp + rename, so a crash never
//! leaves a half-written file behind.
//!
//! # File Format
//!
//! ```json
//! {
//!   "version": 1,
//!   "entries": {
//!     "watched": "[{\"imdbID\":\"tt0111161\",\"userRating\":9, ...}]"
//!   }
//! }
//! ```
//!
//! Values are stored as opaque strings, exactly as handed to
//! [`KeyValueStore::set`].

use crate::domain::error::{PopcornError, Result};
use crate::storage::backend::KeyValueStore;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

const STORE_VERSION: u32 = 1;

/// Top-level document serialized to disk.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct StoreData {
    /// Format version for future migrations.
    version: u32,

    #[serde(default)]
    entries: BTreeMap<String, String>,
}

impl Default for StoreData {
    fn default() -> Self {
        Self {
            version: STORE_VERSION,
            entries: BTreeMap::new(),
        }
    }
}

/// Key-value store persisted as a single JSON file.
///
/// `Send` but not `Sync`; owned by the background worker.
pub struct JsonFileStore {
    file_path: PathBuf,
    data: StoreData,
}

impl JsonFileStore {
    /// Opens the store at `file_path`, creating parent directories.
    ///
    /// A missing file starts an empty store. A file that exists but does not
    /// parse is set aside as `<name>.corrupt` and an empty store is used, so a
    /// damaged file never blocks startup.
    ///
    /// # Errors
    ///
    /// Returns an error if the parent directory cannot be created or the file
    /// exists but cannot be read.
    ///
    /// # Examples
    ///
    /// ```no_run
    /// use popcorn::storage::JsonFileStore;
    /// use std::path::PathBuf;
    ///
    /// let store = JsonFileStore::open(PathBuf::from("/tmp/popcorn/store.json"))?;
    /// # Ok::<(), Box<dyn std::error::Error>>(())
    /// ```
    pub fn open(file_path: PathBuf) -> Result<Self> {
        tracing::debug!(path = ?file_path, "opening JSON store");

        if let Some(parent) = file_path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let data = if file_path.exists() {
            Self::load_from_file(&file_path)?
        } else {
            tracing::debug!("no store file yet, starting empty");
            StoreData::default()
        };

        tracing::debug!(keys = data.entries.len(), "store opened");
        Ok(Self { file_path, data })
    }

    fn load_from_file(path: &Path) -> Result<StoreData> {
        let contents = std::fs::read_to_string(path)?;
        match serde_json::from_str::<StoreData>(&contents) {
            Ok(data) => {
                tracing::debug!(version = data.version, keys = data.entries.len(), "loaded store data");
                Ok(data)
            }
            Err(e) => {
                let quarantine = path.with_extension("corrupt");
                tracing::warn!(error = %e, moved_to = ?quarantine, "store file is not valid JSON, starting empty");
                std::fs::rename(path, &quarantine)?;
                Ok(StoreData::default())
            }
        }
    }

    /// Writes the in-memory document to disk atomically.
    fn save_to_file(&self) -> Result<()> {
        let json = serde_json::to_string_pretty(&self.data)
            .map_err(|e| PopcornError::Storage(format!("failed to serialize store: {e}")))?;

        let tmp_path = self.file_path.with_extension("tmp");
        std::fs::write(&tmp_path, json)?;
        std::fs::rename(&tmp_path, &self.file_path)?;

        tracing::trace!(path = ?self.file_path, "store saved");
        Ok(())
    }
}

impl KeyValueStore for JsonFileStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        Ok(self.data.entries.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> Result<()> {
        let _span = tracing::debug_span!("json_store_set", key = %key, bytes = value.len()).entered();

        let previous = self.data.entries.insert(key.to_string(), value.to_string());
        if let Err(e) = self.save_to_file() {
            match previous {
                Some(old) => self.data.entries.insert(key.to_string(), old),
                None => self.data.entries.remove(key),
            };
            return Err(e);
        }
        Ok(())
    }

    fn remove(&mut self, key: &str) -> Result<()> {
        if self.data.entries.remove(key).is_some() {
            self.save_to_file()?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn values_survive_reopen() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("store.json");

        let mut store = JsonFileStore::open(path.clone()).unwrap();
        store.set("watched", r#"[{"imdbID":"tt1"}]"#).unwrap();
        drop(store);

        let reopened = JsonFileStore::open(path).unwrap();
        assert_eq!(
            reopened.get("watched").unwrap().as_deref(),
            Some(r#"[{"imdbID":"tt1"}]"#)
        );
    }

    #[test]
    fn no_temp_file_left_behind() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("store.json");
        let mut store = JsonFileStore::open(path.clone()).unwrap();
        store.set("k", "v").unwrap();
        assert!(path.exists());
        assert!(!path.with_extension("tmp").exists());
    }

    #[test]
    fn corrupt_file_is_quarantined() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("store.json");
        std::fs::write(&path, "{not json").unwrap();

        let store = JsonFileStore::open(path.clone()).unwrap();
        assert_eq!(store.get("watched").unwrap(), None);
        assert!(path.with_extension("corrupt").exists());
    }

    #[test]
    fn remove_deletes_key() {
        let dir = tempfile::tempdir().unwrap();
        let mut store = JsonFileStore::open(dir.path().join("store.json")).unwrap();
        store.set("k", "v").unwrap();
        store.remove("k").unwrap();
        store.remove("missing").unwrap();
        assert_eq!(store.get("k").unwrap(), None);
    }
}
