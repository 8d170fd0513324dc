//! Search query controller and result state.
//!
//! [`SearchState`] owns the query, the current result list, the loading flag,
//! the surfaced error, and the token of the one outstanding search request.
//! Transitions go through [`SearchState::reduce`]; [`set_query`] composes them
//! into the "query changed" controller step and hands back the fetch to run.

use crate::domain::{FetchError, SearchResultItem};
use crate::omdb::ApiRequest;
use crate::request::{CancellationToken, TokenSource};

/// Queries shorter than this (in characters) never hit the network.
pub const MIN_QUERY_CHARS: usize = 3;

#[derive(Debug, Clone, Default, PartialEq)]
pub struct SearchState {
    pub query: String,
    pub results: Vec<SearchResultItem>,
    pub is_loading: bool,
    pub error: Option<String>,
    in_flight: Option<CancellationToken>,
}

/// Transitions of the search state.
#[derive(Debug, Clone, PartialEq)]
pub enum SearchMsg {
    /// The query text was replaced.
    QueryChanged(String),
    /// A request guarded by this token was issued.
    FetchStarted(CancellationToken),
    /// The outstanding request, if any, was superseded.
    Cancelled,
    /// The request with `token_id` produced a result.
    Settled {
        token_id: u64,
        result: Result<Vec<SearchResultItem>, FetchError>,
    },
}

impl SearchState {
    #[must_use]
    pub fn reduce(mut self, msg: SearchMsg) -> Self {
        match msg {
            SearchMsg::QueryChanged(query) => {
                if query.chars().count() < MIN_QUERY_CHARS {
                    self.results.clear();
                    self.error = None;
                }
                self.query = query;
            }
            SearchMsg::FetchStarted(token) => {
                if let Some(previous) = self.in_flight.replace(token) {
                    previous.cancel();
                }
                self.is_loading = true;
                self.error = None;
            }
            SearchMsg::Cancelled => {
                if let Some(previous) = self.in_flight.take() {
                    tracing::debug!(request_id = previous.id(), "search superseded");
                    previous.cancel();
                    self.is_loading = false;
                }
            }
            SearchMsg::Settled { token_id, result } => {
                if self.in_flight.as_ref().map(CancellationToken::id) != Some(token_id) {
                    tracing::debug!(request_id = token_id, "stale search response ignored");
                    return self;
                }
                self.in_flight = None;
                self.is_loading = false;
                match result {
                    Ok(results) => {
                        self.results = results;
                        self.error = None;
                    }
                    Err(e) => {
                        if let Some(message) = e.search_message() {
                            tracing::debug!(error = %e, "search failed");
                            self.results.clear();
                            self.error = Some(message.to_string());
                        }
                    }
                }
            }
        }
        self
    }

    /// Whether a search request is outstanding.
    #[must_use]
    pub const fn has_in_flight(&self) -> bool {
        self.in_flight.is_some()
    }

    /// Number of results, as shown in the "Found N results" header.
    #[must_use]
    pub fn result_count(&self) -> usize {
        self.results.len()
    }
}

/// Replaces the query, cancelling any outstanding request, and starts a new
/// one when the query is long enough.
///
/// Returns the updated state and the request to execute, if any.
pub fn set_query(
    state: SearchState,
    query: String,
    tokens: &mut TokenSource,
) -> (SearchState, Option<(ApiRequest, CancellationToken)>) {
    let _span = tracing::debug_span!("set_query", query_chars = query.chars().count()).entered();

    let state = state.reduce(SearchMsg::Cancelled).reduce(SearchMsg::QueryChanged(query));
    if state.query.chars().count() < MIN_QUERY_CHARS {
        return (state, None);
    }

    let token = tokens.issue();
    let request = ApiRequest::Search {
        query: state.query.clone(),
    };
    (state.reduce(SearchMsg::FetchStarted(token.clone())), Some((request, token)))
}
