//! Request building and response decoding for the OMDb API.
//!
//! The plugin never performs HTTP itself: Zellij runs the request and hands the
//! status and body back as an event. [`OmdbClient`] therefore has two halves.
//! [`OmdbClient::request_url`] turns an [`ApiRequest`] into a URL for the host,
//! and the `decode_*` functions turn `(status, body)` back into domain values or
//! a [`FetchError`].

use crate::domain::{FetchError, MovieDetail, SearchResultItem};
use crate::omdb::dto::{is_negative, DetailResponse, SearchResponse};
use serde::{Deserialize, Serialize};

/// A catalog request, independent of how it is transported.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum ApiRequest {
    /// Title search (`s=<query>`).
    Search {
        /// Raw query as typed by the user.
        query: String,
    },
    /// Full record lookup (`i=<id>`).
    Detail {
        /// Catalog identifier.
        id: String,
    },
}

impl ApiRequest {
    /// Short name used in logs and request context.
    #[must_use]
    pub const fn kind(&self) -> &'static str {
        match self {
            Self::Search { .. } => "search",
            Self::Detail { .. } => "detail",
        }
    }
}

/// Builds OMDb URLs from the configured endpoint and API key.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OmdbClient {
    endpoint: String,
    api_key: String,
}

impl OmdbClient {
    /// Creates a client for `endpoint` (e.g. `https://www.omdbapi.com/`).
    pub fn new(endpoint: impl Into<String>, api_key: impl Into<String>) -> Self {
        Self {
            endpoint: endpoint.into(),
            api_key: api_key.into(),
        }
    }

    /// Returns the full GET URL for a request.
    ///
    /// # Examples
    ///
    /// ```
    /// use popcorn::omdb::{ApiRequest, OmdbClient};
    ///
    /// let client = OmdbClient::new("https://www.omdbapi.com/", "k3y");
    /// let url = client.request_url(&ApiRequest::Search { query: "star wars".into() });
    /// assert_eq!(url, "https://www.omdbapi.com/?apikey=k3y&s=star%20wars");
    /// ```
    #[must_use]
    pub fn request_url(&self, request: &ApiRequest) -> String {
        let (param, value) = match request {
            ApiRequest::Search { query } => ("s", query.as_str()),
            ApiRequest::Detail { id } => ("i", id.as_str()),
        };
        let separator = if self.endpoint.contains('?') { '&' } else { '?' };
        format!(
            "{}{separator}apikey={}&{param}={}",
            self.endpoint,
            urlencoding::encode(&self.api_key),
            urlencoding::encode(value)
        )
    }
}

const fn is_success(status: u16) -> bool {
    status >= 200 && status < 300
}

/// Decodes a search response.
///
/// # Errors
///
/// - [`FetchError::Transport`] for a non-2xx status
/// - [`FetchError::NotFound`] when the catalog answers `Response: "False"`
/// - [`FetchError::Parse`] when the body is not the expected JSON
pub fn decode_search(status: u16, body: &[u8]) -> Result<Vec<SearchResultItem>, FetchError> {
    if !is_success(status) {
        return Err(FetchError::Transport { status });
    }

    let response: SearchResponse =
        serde_json::from_slice(body).map_err(|e| FetchError::Parse(e.to_string()))?;

    if is_negative(&response.response) {
        return Err(FetchError::NotFound {
            reason: response.error.unwrap_or_default(),
        });
    }

    tracing::debug!(
        hits = response.search.len(),
        total = ?response.total_results,
        "search response decoded"
    );

    Ok(response.search.into_iter().map(SearchResultItem::from).collect())
}

/// Decodes a detail response for `requested_id`.
///
/// # Errors
///
/// Same classification as [`decode_search`].
pub fn decode_detail(status: u16, body: &[u8], requested_id: &str) -> Result<MovieDetail, FetchError> {
    if !is_success(status) {
        return Err(FetchError::Transport { status });
    }

    let response: DetailResponse =
        serde_json::from_slice(body).map_err(|e| FetchError::Parse(e.to_string()))?;

    if response.response.as_deref().is_some_and(is_negative) {
        return Err(FetchError::NotFound {
            reason: response.error.unwrap_or_default(),
        });
    }

    Ok(response.into_detail(requested_id))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn detail_url_encodes_identifier() {
        let client = OmdbClient::new("https://www.omdbapi.com/", "abc");
        let url = client.request_url(&ApiRequest::Detail { id: "tt0111161".into() });
        assert_eq!(url, "https://www.omdbapi.com/?apikey=abc&i=tt0111161");
    }

    #[test]
    fn endpoint_with_existing_query_appends_parameters() {
        let client = OmdbClient::new("http://proxy.local/omdb?v=1", "abc");
        let url = client.request_url(&ApiRequest::Search { query: "a&b".into() });
        assert_eq!(url, "http://proxy.local/omdb?v=1&apikey=abc&s=a%26b");
    }

    #[test]
    fn search_decodes_hits() {
        let body = br#"{"Search":[{"Title":"Inception","Year":"2010","imdbID":"tt1375666","Type":"movie","Poster":"https://img/p.jpg"}],"totalResults":"1","Response":"True"}"#;
        let items = decode_search(200, body).unwrap();
        assert_eq!(items.len(), 1);
        assert_eq!(items[0].id, "tt1375666");
        assert_eq!(items[0].title, "Inception");
        assert_eq!(items[0].poster, "https://img/p.jpg");
    }

    #[test]
    fn negative_search_is_not_found() {
        let body = br#"{"Response":"False","Error":"Movie not found!"}"#;
        let err = decode_search(200, body).unwrap_err();
        assert_eq!(err, FetchError::NotFound { reason: "Movie not found!".into() });
    }

    #[test]
    fn non_success_status_is_transport_error() {
        assert_eq!(
            decode_search(503, b"").unwrap_err(),
            FetchError::Transport { status: 503 }
        );
        assert_eq!(
            decode_detail(401, b"{}", "tt1").unwrap_err(),
            FetchError::Transport { status: 401 }
        );
    }

    #[test]
    fn garbage_body_is_parse_error() {
        assert!(matches!(decode_search(200, b"<html>"), Err(FetchError::Parse(_))));
    }

    #[test]
    fn detail_decodes_fields() {
        let body = br#"{"Title":"Inception","Year":"2010","Released":"16 Jul 2010","Runtime":"148 min","Genre":"Action, Sci-Fi","Director":"Christopher Nolan","Actors":"Leonardo DiCaprio","Plot":"A thief...","Poster":"p.jpg","imdbRating":"8.8","imdbID":"tt1375666","Response":"True"}"#;
        let detail = decode_detail(200, body, "tt1375666").unwrap();
        assert_eq!(detail.title, "Inception");
        assert_eq!(detail.runtime_minutes(), 148);
        assert_eq!(detail.director, "Christopher Nolan");
        assert!(detail.is_top_rated());
    }

    #[test]
    fn negative_detail_is_not_found() {
        let body = br#"{"Response":"False","Error":"Incorrect IMDb ID."}"#;
        assert!(matches!(
            decode_detail(200, body, "tt0"),
            Err(FetchError::NotFound { .. })
        ));
    }
}
