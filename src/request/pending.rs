//! Registry of catalog requests handed to the host.
//!
//! Zellij's `web_request` cannot be aborted, so the registry is where
//! cancellation takes effect: each request is tracked with its token, the
//! token id rides along in the request context, and when the response comes
//! back [`PendingRequests::resolve`] checks the token before decoding. A
//! cancelled request resolves to [`FetchError::Cancelled`] no matter what the
//! server answered.

use crate::domain::{FetchError, MovieDetail, SearchResultItem};
use crate::omdb::{decode_detail, decode_search, ApiRequest};
use crate::request::CancellationToken;
use std::collections::{BTreeMap, HashMap};

/// Context key carrying the request id.
pub const CONTEXT_REQUEST_ID: &str = "popcorn_request_id";

/// Context key carrying the request kind (`search` or `detail`).
pub const CONTEXT_REQUEST_KIND: &str = "popcorn_request_kind";

/// Decoded result of a settled request.
#[derive(Debug, Clone, PartialEq)]
pub enum Outcome {
    Search(Result<Vec<SearchResultItem>, FetchError>),
    Detail(Result<MovieDetail, FetchError>),
}

/// A request that has come back from the host, matched to its token id.
#[derive(Debug, Clone, PartialEq)]
pub struct Settled {
    pub token_id: u64,
    pub outcome: Outcome,
}

/// In-flight requests keyed by token id.
#[derive(Debug, Default)]
pub struct PendingRequests {
    pending: HashMap<u64, (ApiRequest, CancellationToken)>,
}

impl PendingRequests {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Starts tracking a request and returns the context map to send with it.
    pub fn track(&mut self, request: ApiRequest, token: CancellationToken) -> BTreeMap<String, String> {
        let mut context = BTreeMap::new();
        context.insert(CONTEXT_REQUEST_ID.to_string(), token.id().to_string());
        context.insert(CONTEXT_REQUEST_KIND.to_string(), request.kind().to_string());

        tracing::debug!(request_id = token.id(), kind = request.kind(), "tracking request");
        self.pending.insert(token.id(), (request, token));
        context
    }

    /// Number of requests still awaiting a response.
    #[must_use]
    pub fn len(&self) -> usize {
        self.pending.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }

    /// Matches a host response to its request and decodes it.
    ///
    /// Returns `None` when the context does not belong to this registry
    /// (another plugin's request, or a duplicate delivery).
    pub fn resolve(
        &mut self,
        context: &BTreeMap<String, String>,
        status: u16,
        body: &[u8],
    ) -> Option<Settled> {
        let token_id = context
            .get(CONTEXT_REQUEST_ID)
            .and_then(|raw| raw.parse::<u64>().ok())?;

        let Some((request, token)) = self.pending.remove(&token_id) else {
            tracing::debug!(request_id = token_id, "response for unknown request, ignoring");
            return None;
        };

        let cancelled = token.is_cancelled();
        tracing::debug!(
            request_id = token_id,
            kind = request.kind(),
            status = status,
            cancelled = cancelled,
            "request settled"
        );

        let outcome = match request {
            ApiRequest::Search { .. } if cancelled => Outcome::Search(Err(FetchError::Cancelled)),
            ApiRequest::Detail { .. } if cancelled => Outcome::Detail(Err(FetchError::Cancelled)),
            ApiRequest::Search { .. } => Outcome::Search(decode_search(status, body)),
            ApiRequest::Detail { ref id } => Outcome::Detail(decode_detail(status, body, id)),
        };

        Some(Settled { token_id, outcome })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::request::TokenSource;

    const HITS: &[u8] = br#"{"Search":[{"Title":"Alien","Year":"1979","imdbID":"tt0078748","Poster":"N/A"}],"Response":"True"}"#;

    #[test]
    fn resolves_tracked_search() {
        let mut tokens = TokenSource::default();
        let mut pending = PendingRequests::new();
        let token = tokens.issue();
        let context = pending.track(ApiRequest::Search { query: "alien".into() }, token.clone());

        let settled = pending.resolve(&context, 200, HITS).unwrap();
        assert_eq!(settled.token_id, token.id());
        match settled.outcome {
            Outcome::Search(Ok(items)) => assert_eq!(items[0].id, "tt0078748"),
            other => panic!("unexpected outcome: {other:?}"),
        }
        assert!(pending.is_empty());
    }

    #[test]
    fn cancelled_request_resolves_to_cancellation_even_on_success() {
        let mut tokens = TokenSource::default();
        let mut pending = PendingRequests::new();
        let token = tokens.issue();
        let context = pending.track(ApiRequest::Search { query: "alien".into() }, token.clone());

        token.cancel();
        let settled = pending.resolve(&context, 200, HITS).unwrap();
        assert_eq!(settled.outcome, Outcome::Search(Err(FetchError::Cancelled)));
    }

    #[test]
    fn foreign_context_is_ignored() {
        let mut pending = PendingRequests::new();
        let mut context = BTreeMap::new();
        context.insert("other".to_string(), "1".to_string());
        assert!(pending.resolve(&context, 200, HITS).is_none());

        context.insert(CONTEXT_REQUEST_ID.to_string(), "42".to_string());
        assert!(pending.resolve(&context, 200, HITS).is_none());
    }
}
