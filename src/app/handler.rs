//! Event handling and state transition logic.
//!
//! [`handle_event`] is the single entry point from the plugin runtime. It maps
//! each [`Event`] onto `AppState` operations, then appends the side effects
//! implied by the new state (pane title, watched-list write).
//!
//! # Event Types
//!
//! - **Input**: `Char`, `Backspace`, `Enter`, `FocusSearch`, `Escape`
//! - **Navigation**: `CursorDown`, `CursorUp`, `SwitchList`, `ToggleSelected`
//! - **Rating and list edits**: `RatingPreviewUp`, `RatingPreviewDown`,
//!   `CommitPreview`, `RateDigit`, `AddWatched`, `RemoveSelected`
//! - **Layout**: `ToggleLeftPanel`, `ToggleRightPanel`, `CloseFocus`
//! - **System**: `FetchSettled`, `WorkerResponse`, `PermissionsResult`
//!
//! # Example
//!
//! ```rust
//! use popcorn::app::{handle_event, AppState, Event};
//! use popcorn::app::rating::RatingState;
//! use popcorn::ui::Theme;
//!
//! let mut state = AppState::new(Theme::default(), "watched", RatingState::default());
//! let (render, actions) = handle_event(&mut state, &Event::Enter)?;
//! assert!(render);
//! assert!(actions.is_empty());
//! # Ok::<(), popcorn::PopcornError>(())
//! ```

use super::detail::DetailMsg;
use super::modes::{ActiveList, Focus};
use super::rating::RatingMsg;
use super::search::SearchMsg;
use super::watched::WatchedMsg;
use crate::app::{Action, AppState};
use crate::domain::error::Result;
use crate::request::{Outcome, Settled};
use crate::worker::WorkerResponse;

/// Prefix of notices raised by failed storage operations.
const STORAGE_ERROR_PREFIX: &str = "Storage error: ";

/// Events triggered by user input, host callbacks, or worker responses.
#[derive(Debug, Clone, PartialEq)]
pub enum Event {
    /// Appends a character to the query (search focus only).
    Char(char),
    /// Removes the last character of the query (search focus only).
    Backspace,
    /// Outside the search field: focus it and clear the query. Inside: go back
    /// to the results list.
    Enter,
    /// Focuses the search field without clearing it.
    FocusSearch,
    /// Closes the detail view; leaves the search field if focused.
    Escape,

    CursorDown,
    CursorUp,
    /// Switches cursor movement between the results and watched lists.
    SwitchList,
    /// Opens or closes the highlighted search result.
    ToggleSelected,
    /// Deletes the highlighted watched entry.
    RemoveSelected,

    RatingPreviewUp,
    RatingPreviewDown,
    /// Commits the previewed rating.
    CommitPreview,
    /// Commits a rating directly.
    RateDigit(u8),
    /// Adds the open movie to the watched list.
    AddWatched,

    ToggleLeftPanel,
    ToggleRightPanel,
    /// Hides the plugin.
    CloseFocus,

    /// A catalog request settled (or was found cancelled).
    FetchSettled(Settled),

    /// Wraps a response from the background worker thread.
    WorkerResponse(WorkerResponse),

    /// Outcome of the permission prompt.
    PermissionsResult { granted: bool },
}

/// Processes an event, mutates application state, and returns whether to
/// re-render plus the actions to execute.
///
/// # Errors
///
/// Currently infallible; the `Result` keeps the runtime's error path in place
/// for handlers that touch fallible resources.
pub fn handle_event(state: &mut AppState, event: &Event) -> Result<(bool, Vec<Action>)> {
    let _span = tracing::debug_span!("handle_event", event_type = ?event).entered();

    let (render, mut actions) = dispatch(state, event);
    actions.extend(state.sync_effects());

    tracing::debug!(render = render, action_count = actions.len(), "event handled");
    Ok((render, actions))
}

#[allow(clippy::too_many_lines)]
fn dispatch(state: &mut AppState, event: &Event) -> (bool, Vec<Action>) {
    match event {
        Event::Char(c) => {
            if state.focus != Focus::Search {
                return (false, vec![]);
            }
            let mut query = state.search.query.clone();
            query.push(*c);
            tracing::trace!(query = %query, "query updated");
            (true, state.apply_query(query))
        }
        Event::Backspace => {
            if state.focus != Focus::Search || state.search.query.is_empty() {
                return (false, vec![]);
            }
            let mut query = state.search.query.clone();
            query.pop();
            (true, state.apply_query(query))
        }
        Event::Enter => match state.focus {
            Focus::Search => {
                state.focus = Focus::Normal;
                state.active_list = ActiveList::Results;
                (true, vec![])
            }
            Focus::Normal => {
                tracing::debug!("focusing search with a fresh query");
                state.focus = Focus::Search;
                (true, state.apply_query(String::new()))
            }
        },
        Event::FocusSearch => {
            state.focus = Focus::Search;
            (true, vec![])
        }
        Event::Escape => {
            if state.focus == Focus::Search {
                state.focus = Focus::Normal;
            }
            state.close_detail();
            (true, vec![])
        }
        Event::CursorDown => {
            state.rate(RatingMsg::Leave);
            state.move_selection_down();
            (true, vec![])
        }
        Event::CursorUp => {
            state.rate(RatingMsg::Leave);
            state.move_selection_up();
            (true, vec![])
        }
        Event::SwitchList => {
            state.rate(RatingMsg::Leave);
            state.active_list = state.active_list.toggled();
            (true, vec![])
        }
        Event::ToggleSelected => {
            let Some(id) = state.selected_result().map(|item| item.id.clone()) else {
                tracing::debug!("no result under cursor");
                return (false, vec![]);
            };
            (true, state.toggle_movie(id))
        }
        Event::RemoveSelected => (state.remove_selected_watched(), vec![]),
        Event::RatingPreviewUp => (state.rate(RatingMsg::PreviewUp), vec![]),
        Event::RatingPreviewDown => (state.rate(RatingMsg::PreviewDown), vec![]),
        Event::CommitPreview => (state.rate(RatingMsg::CommitPreview), vec![]),
        Event::RateDigit(n) => (state.rate(RatingMsg::Commit(*n)), vec![]),
        Event::AddWatched => (state.add_open_to_watched(), vec![]),
        Event::ToggleLeftPanel => {
            state.panels.left_open = !state.panels.left_open;
            (true, vec![])
        }
        Event::ToggleRightPanel => {
            state.panels.right_open = !state.panels.right_open;
            (true, vec![])
        }
        Event::CloseFocus => (false, vec![Action::CloseFocus]),
        Event::FetchSettled(Settled { token_id, outcome }) => {
            match outcome {
                Outcome::Search(result) => {
                    state.search = std::mem::take(&mut state.search).reduce(SearchMsg::Settled {
                        token_id: *token_id,
                        result: result.clone(),
                    });
                    state.clamp_cursors();
                }
                Outcome::Detail(result) => {
                    state.detail = std::mem::take(&mut state.detail).reduce(DetailMsg::Settled {
                        token_id: *token_id,
                        result: result.clone(),
                    });
                }
            }
            (true, vec![])
        }
        Event::WorkerResponse(response) => match response {
            WorkerResponse::WatchedLoaded { entries } => {
                state.apply_watched(WatchedMsg::Loaded(entries.clone()));
                (true, vec![])
            }
            WorkerResponse::WatchedSaved { count, saved_at } => {
                tracing::debug!(count = count, saved_at = saved_at, "watched list saved");
                let clears_storage_error = state
                    .notice
                    .as_deref()
                    .is_some_and(|n| n.starts_with(STORAGE_ERROR_PREFIX));
                if clears_storage_error {
                    state.notice = None;
                }
                (clears_storage_error, vec![])
            }
            WorkerResponse::Error { message } => {
                tracing::error!(message = %message, "worker error");
                state.notice = Some(format!("{STORAGE_ERROR_PREFIX}{message}"));
                (true, vec![])
            }
        },
        Event::PermissionsResult { granted } => {
            if !granted {
                tracing::warn!("web access denied, searches will fail");
                state.notice = Some("Web access was not granted".to_string());
            }
            (true, state.startup_actions())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::rating::RatingState;
    use crate::domain::{FetchError, MovieDetail, SearchResultItem};
    use crate::omdb::ApiRequest;
    use crate::ui::Theme;
    use crate::worker::WorkerMessage;

    fn state() -> AppState {
        AppState::new(Theme::default(), "watched", RatingState::default())
    }

    fn type_query(state: &mut AppState, query: &str) -> Vec<Action> {
        let mut actions = vec![];
        for c in query.chars() {
            let (_, mut more) = handle_event(state, &Event::Char(c)).unwrap();
            actions.append(&mut more);
        }
        actions
    }

    #[test]
    fn chars_ignored_outside_search_focus() {
        let mut state = state();
        let (render, actions) = handle_event(&mut state, &Event::Char('x')).unwrap();
        assert!(!render);
        assert!(actions.is_empty());
        assert!(state.search.query.is_empty());
    }

    #[test]
    fn typing_fetches_from_third_character() {
        let mut state = state();
        handle_event(&mut state, &Event::FocusSearch).unwrap();
        let actions = type_query(&mut state, "abc");

        let fetches: Vec<&ApiRequest> = actions
            .iter()
            .filter_map(|a| match a {
                Action::Fetch { request, .. } => Some(request),
                _ => None,
            })
            .collect();
        assert_eq!(fetches, vec![&ApiRequest::Search { query: "abc".to_string() }]);
    }

    #[test]
    fn enter_toggles_between_search_and_results() {
        let mut state = state();
        handle_event(&mut state, &Event::FocusSearch).unwrap();
        type_query(&mut state, "alien");

        handle_event(&mut state, &Event::Enter).unwrap();
        assert_eq!(state.focus, Focus::Normal);
        assert_eq!(state.search.query, "alien");

        handle_event(&mut state, &Event::Enter).unwrap();
        assert_eq!(state.focus, Focus::Search);
        assert!(state.search.query.is_empty());
        assert!(!state.search.is_loading);
    }

    #[test]
    fn escape_leaves_search_and_closes_detail() {
        let mut state = state();
        state.search.results = vec![SearchResultItem {
            id: "tt1".to_string(),
            title: "Alien".to_string(),
            year: "1979".to_string(),
            poster: "N/A".to_string(),
        }];
        handle_event(&mut state, &Event::ToggleSelected).unwrap();
        assert!(state.selection.is_open());

        handle_event(&mut state, &Event::FocusSearch).unwrap();
        handle_event(&mut state, &Event::Escape).unwrap();
        assert_eq!(state.focus, Focus::Normal);
        assert!(!state.selection.is_open());
    }

    #[test]
    fn detail_error_keeps_default_title() {
        let mut state = state();
        state.search.results = vec![SearchResultItem {
            id: "tt2".to_string(),
            title: "Heat".to_string(),
            year: "1995".to_string(),
            poster: "N/A".to_string(),
        }];
        let (_, actions) = handle_event(&mut state, &Event::ToggleSelected).unwrap();
        let Some(Action::Fetch { token, .. }) = actions.first() else {
            panic!("expected a detail fetch");
        };

        let (_, actions) = handle_event(
            &mut state,
            &Event::FetchSettled(Settled {
                token_id: token.id(),
                outcome: Outcome::Detail(Err(FetchError::Transport { status: 503 })),
            }),
        )
        .unwrap();

        assert!(actions.is_empty());
        assert_eq!(state.pane_title(), "usePopcorn");
        assert_eq!(
            state.detail.error.as_deref(),
            Some("Something went wrong with fetching movie details!")
        );
    }

    #[test]
    fn moving_the_cursor_drops_the_rating_preview() {
        let mut state = state();
        state.search.results = vec![SearchResultItem {
            id: "tt2".to_string(),
            title: "Heat".to_string(),
            year: "1995".to_string(),
            poster: "N/A".to_string(),
        }];
        let (_, actions) = handle_event(&mut state, &Event::ToggleSelected).unwrap();
        let Some(Action::Fetch { token, .. }) = actions.first() else {
            panic!("expected a detail fetch");
        };
        let detail = MovieDetail {
            id: "tt2".to_string(),
            title: "Heat".to_string(),
            ..MovieDetail::default()
        };
        handle_event(
            &mut state,
            &Event::FetchSettled(Settled {
                token_id: token.id(),
                outcome: Outcome::Detail(Ok(detail)),
            }),
        )
        .unwrap();

        handle_event(&mut state, &Event::RateDigit(2)).unwrap();
        handle_event(&mut state, &Event::RatingPreviewUp).unwrap();
        handle_event(&mut state, &Event::RatingPreviewUp).unwrap();
        assert_eq!(state.rating.label(), "4");

        handle_event(&mut state, &Event::CursorDown).unwrap();
        assert_eq!(state.rating.preview(), 0);
        assert_eq!(state.rating.label(), "2");
    }

    #[test]
    fn tab_switches_lists() {
        let mut state = state();
        handle_event(&mut state, &Event::SwitchList).unwrap();
        assert_eq!(state.active_list, ActiveList::Watched);
    }

    #[test]
    fn permissions_result_loads_watched_list() {
        let mut state = state();
        let (_, actions) = handle_event(&mut state, &Event::PermissionsResult { granted: false }).unwrap();
        assert!(actions.iter().any(|a| matches!(
            a,
            Action::PostToWorker(WorkerMessage::LoadWatched { key, .. }) if key == "watched"
        )));
        assert!(state.notice.is_some());
    }

    #[test]
    fn worker_error_sets_notice_and_save_clears_it() {
        let mut state = state();
        handle_event(
            &mut state,
            &Event::WorkerResponse(WorkerResponse::Error {
                message: "disk full".to_string(),
            }),
        )
        .unwrap();
        assert_eq!(state.notice.as_deref(), Some("Storage error: disk full"));

        let (render, _) = handle_event(
            &mut state,
            &Event::WorkerResponse(WorkerResponse::WatchedSaved { count: 0, saved_at: 0 }),
        )
        .unwrap();
        assert!(render);
        assert!(state.notice.is_none());
    }

    #[test]
    fn save_keeps_unrelated_notice() {
        let mut state = state();
        state.notice = Some("api_key is not set".to_string());

        let (render, _) = handle_event(
            &mut state,
            &Event::WorkerResponse(WorkerResponse::WatchedSaved { count: 1, saved_at: 0 }),
        )
        .unwrap();
        assert!(!render);
        assert_eq!(state.notice.as_deref(), Some("api_key is not set"));
    }
}
