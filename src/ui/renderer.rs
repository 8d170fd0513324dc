//! Top-level rendering coordinator.
//!
//! Rendering is two steps:
//!
//! 1. **View Model Computation**: Transform `AppState` into `UIViewModel`
//! 2. **Component Rendering**: Delegate to the component renderers
//!
//! The screen is assembled in a [`Frame`] and printed once, so the same path
//! serves the plugin and the tests.

use crate::app::AppState;
use crate::ui::components;
use crate::ui::helpers::Frame;

/// Renders the plugin UI to stdout.
///
/// Does not clear the screen; the host does that between renders.
pub fn render(state: &AppState, rows: usize, cols: usize) {
    print!("{}", render_to_string(state, rows, cols));
}

/// Renders one screen into a string of ANSI output.
#[must_use]
pub fn render_to_string(state: &AppState, rows: usize, cols: usize) -> String {
    let viewmodel = state.compute_viewmodel(rows, cols);
    let mut frame = Frame::new();
    components::render_layout(&mut frame, &viewmodel, &state.theme, rows, cols);
    frame.into_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::rating::RatingState;
    use crate::app::selection::Selection;
    use crate::domain::{MovieDetail, SearchResultItem, WatchedEntry};
    use crate::ui::Theme;

    fn state() -> AppState {
        AppState::new(Theme::default(), "watched", RatingState::default())
    }

    fn result(id: &str, title: &str) -> SearchResultItem {
        SearchResultItem {
            id: id.to_string(),
            title: title.to_string(),
            year: "1999".to_string(),
            poster: "N/A".to_string(),
        }
    }

    #[test]
    fn renders_results_and_watched_summary() {
        let mut state = state();
        state.search.results = vec![result("tt1", "The Matrix"), result("tt2", "Fight Club")];
        state.watched.entries = vec![WatchedEntry {
            id: "tt3".to_string(),
            title: "Inception".to_string(),
            year: "2010".to_string(),
            poster: "N/A".to_string(),
            catalog_rating: 8.8,
            runtime_minutes: 148,
            user_rating: 9,
        }];

        let out = render_to_string(&state, 30, 120);

        assert!(out.contains("Found 2 results"));
        assert!(out.contains("The Matrix"));
        assert!(out.contains("Fight Club"));
        assert!(out.contains("Results [-]"));
        assert!(out.contains("Watched [-]"));
        assert!(out.contains("MOVIES YOU WATCHED"));
        assert!(out.contains("Inception"));
        assert!(out.contains("148 min"));
    }

    #[test]
    fn renders_inline_error_instead_of_results() {
        let mut state = state();
        state.search.error = Some("Movies not found!".to_string());

        let out = render_to_string(&state, 30, 120);

        assert!(out.contains("Movies not found!"));
        assert!(out.contains("Found 0 results"));
    }

    #[test]
    fn collapsed_panel_keeps_only_its_title() {
        let mut state = state();
        state.search.results = vec![result("tt1", "The Matrix")];
        state.panels.left_open = false;

        let out = render_to_string(&state, 30, 120);

        assert!(out.contains("Results [+]"));
        assert!(!out.contains("The Matrix"));
    }

    #[test]
    fn renders_open_movie_with_rating_control() {
        let mut state = state();
        state.selection = Selection::Open("tt1".to_string());
        state.detail.detail = Some(MovieDetail {
            id: "tt1".to_string(),
            title: "Heat".to_string(),
            rating: "8.3".to_string(),
            runtime: "170 min".to_string(),
            director: "Michael Mann".to_string(),
            ..MovieDetail::default()
        });

        let out = render_to_string(&state, 40, 120);

        assert!(out.contains("Movie [-]"));
        assert!(out.contains("Heat"));
        assert!(out.contains("8.3 IMDb rating"));
        assert!(out.contains("Directed by Michael Mann"));
        assert_eq!(out.matches('☆').count(), 10);
        assert!(!out.contains("Add to list"));
    }

    #[test]
    fn survives_tiny_terminals() {
        let mut state = state();
        state.search.results = vec![result("tt1", "The Matrix")];
        let _ = render_to_string(&state, 3, 10);
        let _ = render_to_string(&state, 0, 0);
    }
}
