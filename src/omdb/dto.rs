//! Wire types for OMDb responses.
//!
//! OMDb uses PascalCase keys (plus the odd `imdbID`/`imdbRating`) and reports
//! failures in-band with `Response: "False"` and an `Error` string, still under
//! HTTP 200. Every field is defaulted so that a negative response, which
//! carries only `Response` and `Error`, still deserializes.

use crate::domain::{MovieDetail, SearchResultItem};
use serde::{Deserialize, Serialize};

/// Envelope of `?s=<query>` responses.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchResponse {
    #[serde(rename = "Response")]
    pub response: String,
    #[serde(rename = "Search", default)]
    pub search: Vec<SearchHit>,
    #[serde(rename = "totalResults", default)]
    pub total_results: Option<String>,
    #[serde(rename = "Error", default)]
    pub error: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchHit {
    #[serde(rename = "Title", default)]
    pub title: String,
    #[serde(rename = "Year", default)]
    pub year: String,
    #[serde(rename = "Poster", default)]
    pub poster: String,
    #[serde(rename = "imdbID")]
    pub imdb_id: String,
}

/// Body of `?i=<id>` responses.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DetailResponse {
    #[serde(rename = "Response", default)]
    pub response: Option<String>,
    #[serde(rename = "Error", default)]
    pub error: Option<String>,
    #[serde(rename = "imdbID", default)]
    pub imdb_id: Option<String>,
    #[serde(rename = "Title", default)]
    pub title: String,
    #[serde(rename = "Year", default)]
    pub year: String,
    #[serde(rename = "Poster", default)]
    pub poster: String,
    #[serde(rename = "Runtime", default)]
    pub runtime: String,
    #[serde(rename = "imdbRating", default)]
    pub imdb_rating: String,
    #[serde(rename = "Plot", default)]
    pub plot: String,
    #[serde(rename = "Released", default)]
    pub released: String,
    #[serde(rename = "Actors", default)]
    pub actors: String,
    #[serde(rename = "Director", default)]
    pub director: String,
    #[serde(rename = "Genre", default)]
    pub genre: String,
}

/// Returns `true` when an OMDb `Response` flag reports failure.
pub(crate) fn is_negative(flag: &str) -> bool {
    flag.eq_ignore_ascii_case("false")
}

impl From<SearchHit> for SearchResultItem {
    fn from(hit: SearchHit) -> Self {
        Self {
            id: hit.imdb_id,
            title: hit.title,
            year: hit.year,
            poster: hit.poster,
        }
    }
}

impl DetailResponse {
    /// Converts into the domain type, falling back to the requested id when
    /// the payload omits `imdbID`.
    pub fn into_detail(self, requested_id: &str) -> MovieDetail {
        MovieDetail {
            id: self.imdb_id.unwrap_or_else(|| requested_id.to_string()),
            title: self.title,
            year: self.year,
            poster: self.poster,
            runtime: self.runtime,
            rating: self.imdb_rating,
            plot: self.plot,
            released: self.released,
            actors: self.actors,
            director: self.director,
            genre: self.genre,
        }
    }
}
