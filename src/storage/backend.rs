//! Key-value storage abstraction.
//!
//! The plugin's durable state is a handful of string values under fixed keys.
//! [`KeyValueStore`] is that surface and nothing more; typed access lives one
//! level up in
//! [`WatchedRepository`](crate::storage::WatchedRepository).

use crate::domain::error::Result;

/// Durable string storage addressed by key.
///
/// # Implementations
///
/// - [`JsonFileStore`](crate::storage::JsonFileStore): one JSON document on disk, atomic writes
/// - [`MemoryStore`](crate::storage::MemoryStore): process-local, counts writes
///
/// # Examples
///
/// ```
/// use popcorn::storage::{KeyValueStore, MemoryStore};
///
/// let mut store = MemoryStore::default();
/// store.set("watched", "[]")?;
/// assert_eq!(store.get("watched")?.as_deref(), Some("[]"));
/// # Ok::<(), popcorn::PopcornError>(())
/// ```
pub trait KeyValueStore: Send {
    /// Returns the value stored under `key`, if any.
    ///
    /// # Errors
    ///
    /// Returns an error if the backend cannot be read.
    fn get(&self, key: &str) -> Result<Option<String>>;

    /// Replaces the value under `key` and makes it durable before returning.
    ///
    /// # Errors
    ///
    /// Returns an error if the write fails. Backends may leave the previous
    /// value in place on failure but never a partial one.
    fn set(&mut self, key: &str, value: &str) -> Result<()>;

    /// Deletes `key`. Deleting a missing key is not an error.
    ///
    /// # Errors
    ///
    /// Returns an error if the write fails.
    fn remove(&mut self, key: &str) -> Result<()>;
}
