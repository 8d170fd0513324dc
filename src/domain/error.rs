//! Error types for the Popcorn plugin.
//!
//! Two families live here. [`PopcornError`] covers failures of the plugin's own
//! machinery (storage, worker, configuration, themes) and comes with the
//! [`Result`] alias used across the crate. [`FetchError`] classifies the outcome
//! of a request against the movie catalog; it is carried inside events rather
//! than propagated with `?`, because every variant is recoverable and most of
//! them end up as an inline message in the UI.

use thiserror::Error;

/// Message surfaced when the search endpoint answers with a non-success status.
pub const SEARCH_FAILED_MESSAGE: &str = "Something went wrong with fetching movies!";

/// Message surfaced when the catalog reports no results for a query.
pub const MOVIES_NOT_FOUND_MESSAGE: &str = "Movies not found!";

/// Message surfaced when the detail endpoint answers with a non-success status.
pub const DETAIL_FAILED_MESSAGE: &str = "Something went wrong with fetching movie details!";

/// Message surfaced when the catalog has no record for a selected identifier.
pub const MOVIE_NOT_FOUND_MESSAGE: &str = "Movie not found!";

/// The main error type for plugin operations.
///
/// Most variants wrap a description of what went wrong; I/O and JSON errors
/// convert automatically through `#[from]`.
///
/// # Examples
///
/// ```
/// use popcorn::PopcornError;
///
/// fn validate_key(key: &str) -> Result<(), PopcornError> {
///     if key.is_empty() {
///         return Err(PopcornError::Config("api_key is empty".to_string()));
///     }
///     Ok(())
/// }
///
/// assert!(validate_key("").is_err());
/// ```
#[derive(Debug, Error)]
pub enum PopcornError {
    /// Reading from or writing to the key-value store failed.
    #[error("Storage error: {0}")]
    Storage(String),

    /// Filesystem or I/O operation failed.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// A stored or exchanged payload could not be (de)serialized.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Theme parsing or loading failed.
    #[error("Theme error: {0}")]
    Theme(String),

    /// Communication with the background worker failed.
    #[error("Worker communication error: {0}")]
    Worker(String),

    /// Configuration is invalid or missing.
    #[error("Configuration error: {0}")]
    Config(String),
}

/// A specialized `Result` type for plugin operations.
pub type Result<T> = std::result::Result<T, PopcornError>;

/// Failure classes for a catalog request.
///
/// Which message reaches the user depends on the request kind, so the mapping
/// lives in [`FetchError::search_message`] and [`FetchError::detail_message`].
/// `Cancelled` never produces a message.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FetchError {
    /// The endpoint answered with a non-success HTTP status.
    #[error("transport error: HTTP {status}")]
    Transport {
        /// HTTP status code returned by the host.
        status: u16,
    },

    /// The catalog answered `Response: "False"`.
    #[error("not found: {reason}")]
    NotFound {
        /// The catalog's own `Error` text, if it sent one.
        reason: String,
    },

    /// The request was superseded and its token cancelled.
    #[error("request cancelled")]
    Cancelled,

    /// The payload did not have the expected shape.
    #[error("unexpected payload: {0}")]
    Parse(String),
}

impl FetchError {
    /// User-facing message for a failed search, `None` for cancellations.
    ///
    /// Parse failures share the transport message.
    #[must_use]
    pub const fn search_message(&self) -> Option<&'static str> {
        match self {
            Self::Transport { .. } | Self::Parse(_) => Some(SEARCH_FAILED_MESSAGE),
            Self::NotFound { .. } => Some(MOVIES_NOT_FOUND_MESSAGE),
            Self::Cancelled => None,
        }
    }

    /// User-facing message for a failed detail fetch, `None` for cancellations.
    #[must_use]
    pub const fn detail_message(&self) -> Option<&'static str> {
        match self {
            Self::Transport { .. } | Self::Parse(_) => Some(DETAIL_FAILED_MESSAGE),
            Self::NotFound { .. } => Some(MOVIE_NOT_FOUND_MESSAGE),
            Self::Cancelled => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_errors_surface_as_transport_failures() {
        let err = FetchError::Parse("missing field `Search`".to_string());
        assert_eq!(err.search_message(), Some(SEARCH_FAILED_MESSAGE));
        assert_eq!(err.detail_message(), Some(DETAIL_FAILED_MESSAGE));
    }

    #[test]
    fn cancellation_is_never_surfaced() {
        assert_eq!(FetchError::Cancelled.search_message(), None);
        assert_eq!(FetchError::Cancelled.detail_message(), None);
    }

    #[test]
    fn not_found_maps_to_catalog_messages() {
        let err = FetchError::NotFound { reason: "Movie not found!".to_string() };
        assert_eq!(err.search_message(), Some("Movies not found!"));
        assert_eq!(err.detail_message(), Some("Movie not found!"));
    }
}
