//! Aggregates over the watched list, recomputed on every render.

use crate::domain::WatchedEntry;

#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Summary {
    pub count: usize,
    pub avg_catalog_rating: f64,
    pub avg_user_rating: f64,
    pub avg_runtime: f64,
}

impl Summary {
    #[must_use]
    pub fn of(entries: &[WatchedEntry]) -> Self {
        Self {
            count: entries.len(),
            avg_catalog_rating: average(entries.iter().map(|e| e.catalog_rating)),
            avg_user_rating: average(entries.iter().map(|e| f64::from(e.user_rating))),
            avg_runtime: average(entries.iter().map(|e| f64::from(e.runtime_minutes))),
        }
    }
}

/// Arithmetic mean; 0 for no values.
#[must_use]
pub fn average(values: impl Iterator<Item = f64>) -> f64 {
    let (sum, count) = values.fold((0.0, 0_u32), |(sum, count), v| (sum + v, count + 1));
    if count == 0 {
        0.0
    } else {
        sum / f64::from(count)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(catalog_rating: f64, user_rating: u8, runtime_minutes: u32) -> WatchedEntry {
        WatchedEntry {
            id: format!("tt{user_rating}{runtime_minutes}"),
            title: String::new(),
            year: String::new(),
            poster: String::new(),
            catalog_rating,
            runtime_minutes,
            user_rating,
        }
    }

    #[test]
    fn empty_collection_averages_to_zero() {
        let summary = Summary::of(&[]);
        assert_eq!(summary, Summary::default());
        assert!(!summary.avg_runtime.is_nan());
    }

    #[test]
    fn means_over_entries() {
        let summary = Summary::of(&[entry(8.0, 9, 120), entry(7.0, 6, 90)]);
        assert_eq!(summary.count, 2);
        assert!((summary.avg_catalog_rating - 7.5).abs() < f64::EPSILON);
        assert!((summary.avg_user_rating - 7.5).abs() < f64::EPSILON);
        assert!((summary.avg_runtime - 105.0).abs() < f64::EPSILON);
    }
}
