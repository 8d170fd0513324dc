//! Popcorn: a Zellij plugin for searching movies and keeping a rated watch list.
//!
//! Popcorn provides:
//! - Movie search against the OMDb catalog, with superseded requests cancelled
//! - A detail view for the selected movie with a star rating input
//! - A watched list with averages, persisted across sessions
//! - Storage I/O on a background Zellij worker

#![allow(clippy::multiple_crate_versions)]

//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────┐
//! │  Zellij Plugin Shim (main.rs)                       │  ← Entry point
//! └─────────────────────────────────────────────────────┘
//!                        │
//! ┌─────────────────────────────────────────────────────┐
//! │  Application Layer (app/)                           │  ← Pure reducers
//! │  - Search controller, selection, detail, rating     │
//! │  - Watched list and aggregates                      │
//! │  - Event handling, view model computation           │
//! └─────────────────────────────────────────────────────┘
//!         │                    │                    │
//! ┌───────────────┐   ┌───────────────┐   ┌───────────────┐
//! │ UI Layer      │   │ Catalog       │   │ Worker Layer  │
//! │ (ui/)         │   │ (omdb/,       │   │ (worker/,     │
//! │ - Rendering   │   │  request/)    │   │  storage/)    │
//! │ - Theming     │   │ - URLs, DTOs  │   │ - Load/save   │
//! │ - Components  │   │ - Cancellation│   │ - JSON store  │
//! └───────────────┘   └───────────────┘   └───────────────┘
//!                        │
//! ┌─────────────────────────────────────────────────────┐
//! │  Domain & Infrastructure                            │
//! │  - Movie records, errors (domain/)                  │
//! │  - Data directory paths (infrastructure/)           │
//! │  - OpenTelemetry file tracing (observability/)      │
//! └─────────────────────────────────────────────────────┘
//! ```
//!
//! # Configuration
//!
//! ```kdl
//! pane {
//!     plugin location="file:/path/to/popcorn.wasm" {
//!         api_key "your-omdb-key"
//!         storage_key "watched"
//!         max_rating "10"
//!         rating_messages "Awful,Bad,Meh,Okay,Good,Great,Superb,Excellent,Masterpiece,Perfect"
//!         theme "catppuccin-mocha"
//!         trace_level "info"
//!     }
//! }
//! ```
//!
//! # Flow
//!
//! 1. **Load**: parse [`Config`], build [`AppState`] with [`initialize`], ask
//!    the worker for the stored watched list.
//! 2. **Typing**: every query change cancels the outstanding search and, from
//!    three characters on, issues a new one as an [`Action::Fetch`].
//! 3. **Responses**: the shim resolves host web responses through
//!    [`request::PendingRequests`]; a cancelled token turns into a silent
//!    `Cancelled` outcome.
//! 4. **Watched list**: each mutation after the initial load is written back
//!    through the worker.
//!
//! # Example
//!
//! ```rust
//! use popcorn::{handle_event, initialize, Action, Config, Event};
//!
//! let mut state = initialize(&Config::default());
//! state.focus = popcorn::app::Focus::Search;
//!
//! let mut fetches = 0;
//! for c in "matrix".chars() {
//!     let (_render, actions) = handle_event(&mut state, &Event::Char(c))?;
//!     fetches += actions.iter().filter(|a| matches!(a, Action::Fetch { .. })).count();
//! }
//! // "mat", "matr", "matri", "matrix"
//! assert_eq!(fetches, 4);
//! # Ok::<(), popcorn::PopcornError>(())
//! ```

pub mod app;
pub mod domain;
pub mod infrastructure;
pub mod omdb;
pub mod request;
pub mod storage;
pub mod worker;

pub mod ui;

pub mod observability;

pub use app::{handle_event, Action, AppState, Event};
pub use domain::{FetchError, PopcornError, Result};
pub use ui::Theme;

use app::rating::RatingState;
use std::collections::BTreeMap;

/// Default OMDb endpoint.
pub const DEFAULT_ENDPOINT: &str = "https://www.omdbapi.com/";

/// Default storage key of the watched list.
pub const DEFAULT_STORAGE_KEY: &str = "watched";

/// Default number of rating stars.
pub const DEFAULT_MAX_RATING: u8 = 10;

/// Plugin configuration parsed from the Zellij plugin block.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// OMDb API key, sent with every request.
    pub api_key: String,

    pub search_endpoint: String,

    /// Key the watched list is stored under.
    pub storage_key: String,

    /// Stars in the rating input. Clamped to at least 1.
    pub max_rating: u8,

    /// Initial rating for each newly opened movie, clamped to `max_rating`.
    pub default_rating: u8,

    /// Per-star labels; only used when there is exactly one per star.
    pub rating_messages: Vec<String>,

    /// Built-in theme name.
    pub theme_name: Option<String>,

    /// Path to a TOML theme; wins over `theme_name`.
    pub theme_file: Option<String>,

    /// `EnvFilter` directive. Default: `"info"`
    pub trace_level: Option<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_key: String::new(),
            search_endpoint: DEFAULT_ENDPOINT.to_string(),
            storage_key: DEFAULT_STORAGE_KEY.to_string(),
            max_rating: DEFAULT_MAX_RATING,
            default_rating: 0,
            rating_messages: Vec::new(),
            theme_name: None,
            theme_file: None,
            trace_level: None,
        }
    }
}

impl Config {
    /// Parses the configuration map Zellij hands to `load`.
    ///
    /// Unknown keys are ignored. Values that fail to parse, and blank
    /// strings, fall back to their defaults.
    #[must_use]
    pub fn from_zellij(config: &BTreeMap<String, String>) -> Self {
        let defaults = Self::default();
        let text = |key: &str| {
            config
                .get(key)
                .map(|s| s.trim().to_string())
                .filter(|s| !s.is_empty())
        };

        let max_rating = config
            .get("max_rating")
            .and_then(|s| s.trim().parse::<u8>().ok())
            .filter(|n| *n > 0)
            .unwrap_or(defaults.max_rating);

        let default_rating = config
            .get("default_rating")
            .and_then(|s| s.trim().parse::<u8>().ok())
            .unwrap_or(defaults.default_rating)
            .min(max_rating);

        let rating_messages = config
            .get("rating_messages")
            .map(|s| {
                s.split(',')
                    .map(str::trim)
                    .filter(|m| !m.is_empty())
                    .map(String::from)
                    .collect()
            })
            .unwrap_or_default();

        Self {
            api_key: text("api_key").unwrap_or(defaults.api_key),
            search_endpoint: text("search_endpoint").unwrap_or(defaults.search_endpoint),
            storage_key: text("storage_key").unwrap_or(defaults.storage_key),
            max_rating,
            default_rating,
            rating_messages,
            theme_name: text("theme"),
            theme_file: text("theme_file"),
            trace_level: text("trace_level"),
        }
    }

    /// Checks the settings the plugin cannot work without.
    ///
    /// # Errors
    ///
    /// Returns [`PopcornError::Config`] when no API key is set.
    pub fn validate(&self) -> Result<()> {
        if self.api_key.is_empty() {
            return Err(PopcornError::Config(
                "api_key is not set; searches will be rejected".to_string(),
            ));
        }
        Ok(())
    }

    /// Rating input configured by `max_rating`, `default_rating` and
    /// `rating_messages`.
    #[must_use]
    pub fn rating_state(&self) -> RatingState {
        RatingState::new(self.max_rating, self.default_rating, self.rating_messages.clone())
    }

    /// Resolves the theme: `theme_file`, then `theme_name`, then the default.
    ///
    /// Failures are logged and fall through to the next candidate.
    #[must_use]
    pub fn theme(&self) -> Theme {
        if let Some(theme_file) = &self.theme_file {
            let path = infrastructure::paths::expand_tilde(theme_file);
            match Theme::from_file(&path) {
                Ok(theme) => return theme,
                Err(e) => tracing::warn!(theme_file = %path, error = %e, "failed to load theme file"),
            }
        }

        if let Some(theme_name) = &self.theme_name {
            match Theme::from_name(theme_name) {
                Some(theme) => return theme,
                None => tracing::warn!(theme_name = %theme_name, "unknown theme, using default"),
            }
        }

        Theme::default()
    }
}

/// Builds the initial application state from `config`.
///
/// A configuration problem does not abort startup; it becomes the footer
/// notice so the user sees why searches fail.
#[must_use]
pub fn initialize(config: &Config) -> AppState {
    tracing::debug!(storage_key = %config.storage_key, max_rating = config.max_rating, "initializing popcorn plugin");

    let mut state = AppState::new(config.theme(), config.storage_key.clone(), config.rating_state());
    if let Err(e) = config.validate() {
        tracing::warn!(error = %e, "configuration incomplete");
        state.notice = Some(e.to_string());
    }
    state
}

#[cfg(test)]
mod tests {
    use super::*;

    fn map(pairs: &[(&str, &str)]) -> BTreeMap<String, String> {
        pairs.iter().map(|(k, v)| ((*k).to_string(), (*v).to_string())).collect()
    }

    #[test]
    fn empty_map_yields_defaults() {
        assert_eq!(Config::from_zellij(&BTreeMap::new()), Config::default());
    }

    #[test]
    fn parses_all_keys() {
        let config = Config::from_zellij(&map(&[
            ("api_key", " abc123 "),
            ("search_endpoint", "http://localhost:8080/"),
            ("storage_key", "films"),
            ("max_rating", "5"),
            ("default_rating", "3"),
            ("rating_messages", "Terrible, Bad ,Okay,Good,Amazing"),
            ("theme", "catppuccin-latte"),
            ("theme_file", "~/theme.toml"),
            ("trace_level", "debug"),
        ]));

        assert_eq!(config.api_key, "abc123");
        assert_eq!(config.search_endpoint, "http://localhost:8080/");
        assert_eq!(config.storage_key, "films");
        assert_eq!(config.max_rating, 5);
        assert_eq!(config.default_rating, 3);
        assert_eq!(config.rating_messages, vec!["Terrible", "Bad", "Okay", "Good", "Amazing"]);
        assert_eq!(config.theme_name.as_deref(), Some("catppuccin-latte"));
        assert_eq!(config.theme_file.as_deref(), Some("~/theme.toml"));
        assert_eq!(config.trace_level.as_deref(), Some("debug"));
    }

    #[test]
    fn invalid_numbers_fall_back() {
        let config = Config::from_zellij(&map(&[
            ("max_rating", "0"),
            ("default_rating", "lots"),
            ("storage_key", "   "),
        ]));
        assert_eq!(config.max_rating, DEFAULT_MAX_RATING);
        assert_eq!(config.default_rating, 0);
        assert_eq!(config.storage_key, DEFAULT_STORAGE_KEY);

        let config = Config::from_zellij(&map(&[("max_rating", "5"), ("default_rating", "9")]));
        assert_eq!(config.default_rating, 5);
    }

    #[test]
    fn missing_api_key_becomes_notice() {
        assert!(matches!(Config::default().validate(), Err(PopcornError::Config(_))));
        let state = initialize(&Config::default());
        assert!(state.notice.as_deref().is_some_and(|n| n.contains("api_key")));

        let config = Config {
            api_key: "k".to_string(),
            ..Config::default()
        };
        assert!(config.validate().is_ok());
        assert!(initialize(&config).notice.is_none());
    }

    #[test]
    fn theme_resolution_order() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("mine.toml");
        let mut custom = Theme::default();
        custom.name = "mine".to_string();
        std::fs::write(&path, toml::to_string(&custom).unwrap()).unwrap();

        let config = Config {
            theme_file: Some(path.display().to_string()),
            theme_name: Some("catppuccin-mocha".to_string()),
            ..Config::default()
        };
        assert_eq!(config.theme().name, "mine");

        let config = Config {
            theme_file: Some(dir.path().join("missing.toml").display().to_string()),
            theme_name: Some("catppuccin-mocha".to_string()),
            ..Config::default()
        };
        assert_eq!(config.theme().name, "catppuccin-mocha");

        let config = Config {
            theme_name: Some("nope".to_string()),
            ..Config::default()
        };
        assert_eq!(config.theme(), Theme::default());
    }
}
