//! Movie domain models.
//!
//! Three shapes of the same catalog entry flow through the plugin:
//!
//! - [`SearchResultItem`]: one row of a search response, thrown away on the
//!   next query
//! - [`MovieDetail`]: the full record for the open selection
//! - [`WatchedEntry`]: a rated movie in the user's watched list, the only
//!   thing that is ever persisted
//!
//! Numeric fields arrive from the catalog as strings (`"142 min"`, `"8.3"`,
//! `"N/A"`). They are kept verbatim on [`MovieDetail`] for display and parsed
//! when a [`WatchedEntry`] is built.

use serde::{Deserialize, Serialize};

/// Catalog ratings above this value mark a movie as top rated.
const TOP_RATED_THRESHOLD: f64 = 8.0;

/// A single search hit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchResultItem {
    /// Catalog identifier (an IMDb id such as `tt0111161`).
    pub id: String,
    pub title: String,
    pub year: String,
    /// Poster URL, or `"N/A"` when the catalog has none.
    pub poster: String,
}

/// Full catalog record for a selected movie.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MovieDetail {
    pub id: String,
    pub title: String,
    pub year: String,
    pub poster: String,
    /// Runtime as reported, e.g. `"142 min"`.
    pub runtime: String,
    /// Catalog rating as reported, e.g. `"9.3"`.
    pub rating: String,
    pub plot: String,
    pub released: String,
    pub actors: String,
    pub director: String,
    pub genre: String,
}

impl MovieDetail {
    /// Catalog rating as a number; `0.0` when missing or `"N/A"`.
    ///
    /// # Examples
    ///
    /// ```
    /// # use popcorn::domain::MovieDetail;
    /// # let mut detail = MovieDetail {
    /// #     id: "tt1".into(), title: "A".into(), year: "1999".into(), poster: "N/A".into(),
    /// #     runtime: "136 min".into(), rating: "8.7".into(), plot: String::new(),
    /// #     released: String::new(), actors: String::new(), director: String::new(),
    /// #     genre: String::new(),
    /// # };
    /// assert!((detail.catalog_rating() - 8.7).abs() < f64::EPSILON);
    /// detail.rating = "N/A".into();
    /// assert_eq!(detail.catalog_rating(), 0.0);
    /// ```
    #[must_use]
    pub fn catalog_rating(&self) -> f64 {
        self.rating.trim().parse::<f64>().unwrap_or(0.0)
    }

    /// Runtime in minutes, parsed from the leading token of `runtime`.
    ///
    /// `"142 min"` yields 142; `"N/A"` and anything unparseable yield 0.
    #[must_use]
    pub fn runtime_minutes(&self) -> u32 {
        parse_runtime_minutes(&self.runtime)
    }

    /// Whether the catalog rating is above 8.
    #[must_use]
    pub fn is_top_rated(&self) -> bool {
        self.catalog_rating() > TOP_RATED_THRESHOLD
    }
}

/// Parses the leading integer token of a runtime string.
#[must_use]
pub fn parse_runtime_minutes(runtime: &str) -> u32 {
    runtime
        .split_whitespace()
        .next()
        .and_then(|token| token.parse::<u32>().ok())
        .unwrap_or(0)
}

/// A movie the user has watched and rated.
///
/// Field names on the wire match the stored format: `imdbID`, `title`, `year`,
/// `poster`, `imdbRating`, `runtime`, `userRating`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WatchedEntry {
    #[serde(rename = "imdbID")]
    pub id: String,
    pub title: String,
    pub year: String,
    pub poster: String,
    /// Catalog rating at the time the entry was added.
    #[serde(rename = "imdbRating")]
    pub catalog_rating: f64,
    /// Runtime in minutes.
    #[serde(rename = "runtime")]
    pub runtime_minutes: u32,
    /// The user's own rating, `1..=max_rating`.
    #[serde(rename = "userRating")]
    pub user_rating: u8,
}

impl WatchedEntry {
    /// Builds an entry from a loaded detail and the user's committed rating.
    #[must_use]
    pub fn from_detail(detail: &MovieDetail, user_rating: u8) -> Self {
        Self {
            id: detail.id.clone(),
            title: detail.title.clone(),
            year: detail.year.clone(),
            poster: detail.poster.clone(),
            catalog_rating: detail.catalog_rating(),
            runtime_minutes: detail.runtime_minutes(),
            user_rating,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn detail(runtime: &str, rating: &str) -> MovieDetail {
        MovieDetail {
            id: "tt0133093".to_string(),
            title: "The Matrix".to_string(),
            year: "1999".to_string(),
            poster: "N/A".to_string(),
            runtime: runtime.to_string(),
            rating: rating.to_string(),
            plot: String::new(),
            released: "31 Mar 1999".to_string(),
            actors: String::new(),
            director: String::new(),
            genre: String::new(),
        }
    }

    #[test]
    fn runtime_parses_leading_minutes() {
        assert_eq!(parse_runtime_minutes("136 min"), 136);
        assert_eq!(parse_runtime_minutes("N/A"), 0);
        assert_eq!(parse_runtime_minutes(""), 0);
    }

    #[test]
    fn entry_from_detail_parses_numbers() {
        let entry = WatchedEntry::from_detail(&detail("136 min", "8.7"), 9);
        assert_eq!(entry.id, "tt0133093");
        assert_eq!(entry.runtime_minutes, 136);
        assert!((entry.catalog_rating - 8.7).abs() < f64::EPSILON);
        assert_eq!(entry.user_rating, 9);
    }

    #[test]
    fn top_rated_is_strictly_above_eight() {
        assert!(detail("1 min", "8.1").is_top_rated());
        assert!(!detail("1 min", "8.0").is_top_rated());
        assert!(!detail("1 min", "N/A").is_top_rated());
    }

    #[test]
    fn entry_serializes_with_stored_field_names() {
        let entry = WatchedEntry::from_detail(&detail("136 min", "8.7"), 9);
        let json = serde_json::to_value(&entry).unwrap();
        assert_eq!(json["imdbID"], "tt0133093");
        assert_eq!(json["runtime"], 136);
        assert_eq!(json["userRating"], 9);
        assert_eq!(json["imdbRating"], 8.7);
    }
}
