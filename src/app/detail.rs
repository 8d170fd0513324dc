//! Detail fetch state for the open movie.
//!
//! Mirrors the search controller for a single record: one outstanding request,
//! guarded by a cancellation token, whose late responses are dropped once a
//! newer selection (or a close) supersedes it.

use crate::domain::{FetchError, MovieDetail};
use crate::request::CancellationToken;

/// Pane title when no detail is shown.
pub const DEFAULT_TITLE: &str = "usePopcorn";

#[derive(Debug, Clone, Default, PartialEq)]
pub struct DetailState {
    pub detail: Option<MovieDetail>,
    pub is_loading: bool,
    pub error: Option<String>,
    in_flight: Option<CancellationToken>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum DetailMsg {
    /// A fetch for a newly opened movie was issued.
    FetchStarted(CancellationToken),
    /// The detail view closed; drop everything.
    Cleared,
    Settled {
        token_id: u64,
        result: Result<MovieDetail, FetchError>,
    },
}

impl DetailState {
    #[must_use]
    pub fn reduce(mut self, msg: DetailMsg) -> Self {
        match msg {
            DetailMsg::FetchStarted(token) => {
                if let Some(previous) = self.in_flight.replace(token) {
                    previous.cancel();
                }
                self.detail = None;
                self.error = None;
                self.is_loading = true;
            }
            DetailMsg::Cleared => {
                if let Some(previous) = self.in_flight.take() {
                    tracing::debug!(request_id = previous.id(), "detail fetch superseded");
                    previous.cancel();
                }
                self = Self::default();
            }
            DetailMsg::Settled { token_id, result } => {
                if self.in_flight.as_ref().map(CancellationToken::id) != Some(token_id) {
                    tracing::debug!(request_id = token_id, "stale detail response ignored");
                    return self;
                }
                self.in_flight = None;
                self.is_loading = false;
                match result {
                    Ok(detail) => {
                        self.detail = Some(detail);
                        self.error = None;
                    }
                    Err(e) => {
                        if let Some(message) = e.detail_message() {
                            tracing::debug!(error = %e, "detail fetch failed");
                            self.detail = None;
                            self.error = Some(message.to_string());
                        }
                    }
                }
            }
        }
        self
    }

    /// Pane title: `Movie | <title>` while a detail is loaded, else the default.
    #[must_use]
    pub fn display_title(&self) -> String {
        match &self.detail {
            Some(detail) if !detail.title.is_empty() => format!("Movie | {}", detail.title),
            _ => DEFAULT_TITLE.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::request::TokenSource;

    fn detail(id: &str, title: &str) -> MovieDetail {
        MovieDetail {
            id: id.to_string(),
            title: title.to_string(),
            ..MovieDetail::default()
        }
    }

    #[test]
    fn loaded_detail_sets_title() {
        let mut tokens = TokenSource::default();
        let token = tokens.issue();
        let state = DetailState::default()
            .reduce(DetailMsg::FetchStarted(token.clone()))
            .reduce(DetailMsg::Settled {
                token_id: token.id(),
                result: Ok(detail("tt1", "Heat")),
            });
        assert_eq!(state.display_title(), "Movie | Heat");
        assert!(!state.is_loading);
    }

    #[test]
    fn transport_failure_keeps_default_title() {
        let mut tokens = TokenSource::default();
        let token = tokens.issue();
        let state = DetailState::default()
            .reduce(DetailMsg::FetchStarted(token.clone()))
            .reduce(DetailMsg::Settled {
                token_id: token.id(),
                result: Err(FetchError::Transport { status: 500 }),
            });
        assert_eq!(state.error.as_deref(), Some("Something went wrong with fetching movie details!"));
        assert_eq!(state.display_title(), DEFAULT_TITLE);
    }

    #[test]
    fn newer_selection_wins_over_late_response() {
        let mut tokens = TokenSource::default();
        let first = tokens.issue();
        let second = tokens.issue();
        let state = DetailState::default()
            .reduce(DetailMsg::FetchStarted(first.clone()))
            .reduce(DetailMsg::FetchStarted(second.clone()))
            .reduce(DetailMsg::Settled {
                token_id: first.id(),
                result: Ok(detail("tt1", "Old")),
            });
        assert!(first.is_cancelled());
        assert!(state.detail.is_none());
        assert!(state.is_loading);
    }

    #[test]
    fn cleared_cancels_and_resets() {
        let mut tokens = TokenSource::default();
        let token = tokens.issue();
        let state = DetailState::default()
            .reduce(DetailMsg::FetchStarted(token.clone()))
            .reduce(DetailMsg::Cleared);
        assert!(token.is_cancelled());
        assert_eq!(state, DetailState::default());
    }
}
