//! Domain layer for the Popcorn plugin.
//!
//! Core types independent of Zellij APIs and of the catalog's wire format.
//!
//! - [`error`]: Error types and result aliases
//! - [`movie`]: Search hits, movie details and watched entries

pub mod error;
pub mod movie;

pub use error::{FetchError, PopcornError, Result};
pub use movie::{MovieDetail, SearchResultItem, WatchedEntry};
