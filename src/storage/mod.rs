//! Storage layer for the persisted watched list.
//!
//! - `backend`: [`KeyValueStore`] trait, string values under string keys
//! - `json`: JSON file implementation with atomic writes
//! - `memory`: In-memory implementation
//! - `watched`: Typed watched-list access over any store

pub mod backend;
pub mod json;
pub mod memory;
pub mod watched;

pub use backend::KeyValueStore;
pub use json::JsonFileStore;
pub use memory::MemoryStore;
pub use watched::WatchedRepository;
