//! Application state and view model computation.
//!
//! [`AppState`] composes the per-concern states (search, selection, detail,
//! watched list, rating input) with focus and cursor bookkeeping. Each
//! concern changes only through its own reducer; the methods here sequence
//! those reducers for operations that span several concerns (a new query
//! also closes the detail view, adding a movie also closes it) and collect
//! the resulting side effects.
//!
//! # Example
//!
//! ```rust
//! use popcorn::app::AppState;
//! use popcorn::app::rating::RatingState;
//! use popcorn::ui::Theme;
//!
//! let mut state = AppState::new(Theme::default(), "watched", RatingState::default());
//! let actions = state.apply_query("matrix".to_string());
//! assert_eq!(actions.len(), 1);
//! assert!(state.search.is_loading);
//! let viewmodel = state.compute_viewmodel(24, 100);
//! assert_eq!(viewmodel.header.result_count, "Found 0 results");
//! ```

use super::actions::Action;
use super::detail::{DetailMsg, DetailState, DEFAULT_TITLE};
use super::modes::{ActiveList, Focus, Panels};
use super::rating::{RatingMsg, RatingState};
use super::search::{self, SearchState};
use super::selection::{Selection, SelectionMsg};
use super::summary::Summary;
use super::watched::{WatchedMsg, WatchedState};
use crate::domain::{SearchResultItem, WatchedEntry};
use crate::omdb::ApiRequest;
use crate::request::TokenSource;
use crate::ui::theme::Theme;
use crate::ui::viewmodel::{
    DetailBody, DetailView, FooterInfo, HeaderInfo, ListView, Panel, RatingControl, ResultItem,
    ResultsBody, RightBody, SearchBarInfo, StarsView, SummaryView, UIViewModel, WatchedItem,
};
use crate::worker::WorkerMessage;
use fuzzy_matcher::skim::SkimMatcherV2;

/// Rows taken by the header, search box, panel titles and footer.
const CHROME_ROWS: usize = 8;

/// Rows taken by the watched summary above the watched list.
const SUMMARY_ROWS: usize = 3;

/// Central application state container.
#[derive(Debug, Clone)]
pub struct AppState {
    pub search: SearchState,
    pub selection: Selection,
    pub detail: DetailState,
    pub watched: WatchedState,
    pub rating: RatingState,

    pub focus: Focus,
    pub active_list: ActiveList,
    pub panels: Panels,

    /// Cursor within `search.results`.
    pub results_cursor: usize,
    /// Cursor within `watched.entries`.
    pub watched_cursor: usize,

    /// Footer status line: storage failures and configuration problems.
    pub notice: Option<String>,

    pub theme: Theme,

    storage_key: String,
    tokens: TokenSource,
    persisted_revision: u64,
    pane_title: String,
}

impl AppState {
    /// Creates the initial state.
    ///
    /// # Parameters
    ///
    /// * `theme` - Color scheme for rendering
    /// * `storage_key` - Key the watched list is persisted under
    /// * `rating` - Rating input template; reset to its default on every new movie
    #[must_use]
    pub fn new(theme: Theme, storage_key: impl Into<String>, rating: RatingState) -> Self {
        Self {
            search: SearchState::default(),
            selection: Selection::Closed,
            detail: DetailState::default(),
            watched: WatchedState::default(),
            rating,
            focus: Focus::Normal,
            active_list: ActiveList::Results,
            panels: Panels::default(),
            results_cursor: 0,
            watched_cursor: 0,
            notice: None,
            theme,
            storage_key: storage_key.into(),
            tokens: TokenSource::default(),
            persisted_revision: 0,
            pane_title: DEFAULT_TITLE.to_string(),
        }
    }

    /// Side effects to run once the plugin is loaded: read the stored watched
    /// list and set the initial pane title.
    #[must_use]
    pub fn startup_actions(&self) -> Vec<Action> {
        vec![
            Action::PostToWorker(WorkerMessage::load_watched(self.storage_key.clone())),
            Action::SetPaneTitle(self.pane_title.clone()),
        ]
    }

    /// Current pane title.
    #[must_use]
    pub fn pane_title(&self) -> &str {
        &self.pane_title
    }

    /// Replaces the query, closing the detail view and starting a search
    /// when the query is long enough.
    pub fn apply_query(&mut self, query: String) -> Vec<Action> {
        let (search, fetch) = search::set_query(std::mem::take(&mut self.search), query, &mut self.tokens);
        self.search = search;
        self.results_cursor = 0;
        self.close_detail();

        fetch
            .map(|(request, token)| Action::Fetch { request, token })
            .into_iter()
            .collect()
    }

    /// Toggles the detail view for `id`.
    ///
    /// Opening a movie starts its detail fetch and resets the rating input;
    /// selecting the open movie again closes it.
    pub fn toggle_movie(&mut self, id: String) -> Vec<Action> {
        self.selection = std::mem::take(&mut self.selection).reduce(SelectionMsg::Select(id));
        self.rating = self.rating.clone().reduce(RatingMsg::Reset);

        let Some(open_id) = self.selection.open_id() else {
            self.detail = std::mem::take(&mut self.detail).reduce(DetailMsg::Cleared);
            return vec![];
        };

        let token = self.tokens.issue();
        let request = ApiRequest::Detail {
            id: open_id.to_string(),
        };
        self.detail = std::mem::take(&mut self.detail).reduce(DetailMsg::FetchStarted(token.clone()));
        vec![Action::Fetch { request, token }]
    }

    /// Closes the detail view, cancelling its fetch if outstanding.
    pub fn close_detail(&mut self) {
        self.selection = std::mem::take(&mut self.selection).reduce(SelectionMsg::Close);
        self.detail = std::mem::take(&mut self.detail).reduce(DetailMsg::Cleared);
        self.rating = self.rating.clone().reduce(RatingMsg::Reset);
    }

    /// Whether the rating input is shown: a detail is loaded and the movie is
    /// not yet watched.
    #[must_use]
    pub fn can_rate(&self) -> bool {
        self.detail
            .detail
            .as_ref()
            .is_some_and(|detail| !self.watched.contains(&detail.id))
    }

    /// Whether the open movie can be added right now.
    #[must_use]
    pub fn can_add(&self) -> bool {
        self.can_rate() && self.rating.rating() > 0
    }

    /// Applies a rating input change if the input is shown.
    pub fn rate(&mut self, msg: RatingMsg) -> bool {
        if !self.can_rate() {
            return false;
        }
        self.rating = self.rating.clone().reduce(msg);
        true
    }

    /// Adds the open movie with the committed rating and closes the detail
    /// view. Returns `false` when adding is not allowed.
    pub fn add_open_to_watched(&mut self) -> bool {
        if !self.can_add() {
            return false;
        }
        let Some(detail) = self.detail.detail.as_ref() else {
            return false;
        };
        let entry = WatchedEntry::from_detail(detail, self.rating.rating());
        self.watched = std::mem::take(&mut self.watched).reduce(WatchedMsg::Add(entry));
        self.close_detail();
        true
    }

    /// Removes the watched entry under the cursor.
    pub fn remove_selected_watched(&mut self) -> bool {
        let Some(id) = self.selected_watched().map(|entry| entry.id.clone()) else {
            return false;
        };
        self.watched = std::mem::take(&mut self.watched).reduce(WatchedMsg::Remove(id));
        self.clamp_cursors();
        true
    }

    /// Applies a watched-list message, e.g. the startup load.
    pub fn apply_watched(&mut self, msg: WatchedMsg) {
        self.watched = std::mem::take(&mut self.watched).reduce(msg);
        self.clamp_cursors();
    }

    /// Side effects implied by the state after an event: a pane title change
    /// and a write of the watched list if it changed since the last write.
    ///
    /// Nothing is written before the stored list has been loaded; the load
    /// merges any earlier additions and bumps the revision itself.
    pub fn sync_effects(&mut self) -> Vec<Action> {
        let mut actions = vec![];

        let title = self.detail.display_title();
        if title != self.pane_title {
            tracing::debug!(title = %title, "pane title changed");
            self.pane_title.clone_from(&title);
            actions.push(Action::SetPaneTitle(title));
        }

        if self.watched.loaded && self.watched.revision() != self.persisted_revision {
            self.persisted_revision = self.watched.revision();
            actions.push(Action::PostToWorker(WorkerMessage::save_watched(
                self.storage_key.clone(),
                self.watched.entries.clone(),
            )));
        }

        actions
    }

    /// Moves the cursor of the active list down, wrapping to the top.
    pub fn move_selection_down(&mut self) {
        let (cursor, len) = self.active_cursor();
        if len == 0 {
            return;
        }
        *cursor = (*cursor + 1) % len;
    }

    /// Moves the cursor of the active list up, wrapping to the bottom.
    pub fn move_selection_up(&mut self) {
        let (cursor, len) = self.active_cursor();
        if len == 0 {
            return;
        }
        *cursor = if *cursor == 0 { len - 1 } else { *cursor - 1 };
    }

    fn active_cursor(&mut self) -> (&mut usize, usize) {
        match self.active_list {
            ActiveList::Results => (&mut self.results_cursor, self.search.results.len()),
            ActiveList::Watched => (&mut self.watched_cursor, self.watched.entries.len()),
        }
    }

    /// Keeps both cursors inside their lists.
    pub fn clamp_cursors(&mut self) {
        self.results_cursor = self.results_cursor.min(self.search.results.len().saturating_sub(1));
        self.watched_cursor = self.watched_cursor.min(self.watched.entries.len().saturating_sub(1));
    }

    #[must_use]
    pub fn selected_result(&self) -> Option<&SearchResultItem> {
        self.search.results.get(self.results_cursor)
    }

    #[must_use]
    pub fn selected_watched(&self) -> Option<&WatchedEntry> {
        self.watched.entries.get(self.watched_cursor)
    }

    /// Computes a renderable view model for a `rows` x `cols` pane.
    ///
    /// Lists are windowed around their cursor so the cursor stays visible.
    #[must_use]
    pub fn compute_viewmodel(&self, rows: usize, cols: usize) -> UIViewModel {
        let body_rows = rows.saturating_sub(CHROME_ROWS);
        let panel_cols = cols / 2;

        UIViewModel {
            header: HeaderInfo {
                title: " usePopcorn ".to_string(),
                result_count: format!("Found {} results", self.search.result_count()),
            },
            search_bar: SearchBarInfo {
                query: self.search.query.clone(),
                is_focused: self.focus == Focus::Search,
            },
            left: Panel {
                open: self.panels.left_open,
                body: self.compute_results_body(body_rows, panel_cols),
            },
            right: Panel {
                open: self.panels.right_open,
                body: self.compute_right_body(body_rows.saturating_sub(SUMMARY_ROWS), panel_cols),
            },
            footer: FooterInfo {
                keybindings: self.compute_keybindings(),
                notice: self.notice.clone(),
            },
        }
    }

    fn compute_results_body(&self, available_rows: usize, cols: usize) -> ResultsBody {
        if self.search.is_loading {
            return ResultsBody::Loading;
        }
        if let Some(error) = &self.search.error {
            return ResultsBody::Error(error.clone());
        }

        let (start, end) = visible_window(self.results_cursor, self.search.results.len(), available_rows);
        let matcher = if self.search.query.is_empty() {
            None
        } else {
            Some(SkimMatcherV2::default())
        };
        let title_width = cols.saturating_sub(10);

        let items = self.search.results[start..end]
            .iter()
            .enumerate()
            .map(|(relative_idx, item)| {
                let title = truncate(&item.title, title_width);
                let highlight_ranges = matcher
                    .as_ref()
                    .map_or_else(Vec::new, |m| self.compute_highlight_ranges(&title, m));
                ResultItem {
                    highlight_ranges,
                    title,
                    year: item.year.clone(),
                    is_selected: start + relative_idx == self.results_cursor,
                    is_open: self.selection.open_id() == Some(item.id.as_str()),
                }
            })
            .collect();

        ResultsBody::List(ListView {
            items,
            selected_index: self.results_cursor.saturating_sub(start),
            is_active: self.focus == Focus::Normal && self.active_list == ActiveList::Results,
        })
    }

    fn compute_right_body(&self, available_rows: usize, cols: usize) -> RightBody {
        if self.selection.is_open() {
            return RightBody::Detail(self.compute_detail_body());
        }

        let summary = Summary::of(&self.watched.entries);
        let (start, end) = visible_window(self.watched_cursor, self.watched.entries.len(), available_rows);
        let title_width = cols.saturating_sub(4);

        let items = self.watched.entries[start..end]
            .iter()
            .enumerate()
            .map(|(relative_idx, entry)| WatchedItem {
                title: truncate(&entry.title, title_width),
                catalog_rating: format!("{:.1}", entry.catalog_rating),
                user_rating: entry.user_rating.to_string(),
                runtime: format!("{} min", entry.runtime_minutes),
                is_selected: start + relative_idx == self.watched_cursor,
            })
            .collect();

        RightBody::Watched {
            summary: SummaryView {
                count: format!("{} movies", summary.count),
                avg_catalog_rating: format!("{:.1}", summary.avg_catalog_rating),
                avg_user_rating: format!("{:.1}", summary.avg_user_rating),
                avg_runtime: format!("{:.0} min", summary.avg_runtime),
            },
            list: ListView {
                items,
                selected_index: self.watched_cursor.saturating_sub(start),
                is_active: self.focus == Focus::Normal && self.active_list == ActiveList::Watched,
            },
        }
    }

    fn compute_detail_body(&self) -> DetailBody {
        if self.detail.is_loading {
            return DetailBody::Loading;
        }
        if let Some(error) = &self.detail.error {
            return DetailBody::Error(error.clone());
        }
        let Some(detail) = &self.detail.detail else {
            return DetailBody::Loading;
        };

        let rating_control = match self.watched.user_rating_for(&detail.id) {
            Some(user_rating) => RatingControl::Rated(user_rating),
            None => RatingControl::Input {
                stars: StarsView {
                    filled: (1..=self.rating.max()).map(|i| self.rating.is_filled(i)).collect(),
                    label: self.rating.label(),
                },
                can_add: self.rating.rating() > 0,
            },
        };

        DetailBody::Loaded(Box::new(DetailView {
            title: detail.title.clone(),
            released: detail.released.clone(),
            runtime: detail.runtime.clone(),
            genre: detail.genre.clone(),
            rating: detail.rating.clone(),
            is_top_rated: detail.is_top_rated(),
            plot: detail.plot.clone(),
            actors: detail.actors.clone(),
            director: detail.director.clone(),
            rating_control,
        }))
    }

    /// Coalesces fuzzy match character indices into `(start, end)` ranges.
    fn compute_highlight_ranges(&self, text: &str, matcher: &SkimMatcherV2) -> Vec<(usize, usize)> {
        use fuzzy_matcher::FuzzyMatcher;

        let Some((_score, indices)) = matcher.fuzzy_indices(text, &self.search.query) else {
            return vec![];
        };

        let mut ranges: Vec<(usize, usize)> = Vec::new();
        for idx in indices {
            match ranges.last_mut() {
                Some((_, end)) if *end == idx => *end = idx + 1,
                _ => ranges.push((idx, idx + 1)),
            }
        }
        ranges
    }

    fn compute_keybindings(&self) -> String {
        match self.focus {
            Focus::Search => "Type to search (3+ chars)  Enter: results  Esc: close".to_string(),
            Focus::Normal if self.can_rate() => {
                "h/l: preview  r: rate  1-9,0: rate  a: add  o: close  Esc: back".to_string()
            }
            Focus::Normal if self.selection.is_open() => "o/Esc: close  /: search  q: quit".to_string(),
            Focus::Normal => match self.active_list {
                ActiveList::Results => {
                    "j/k: move  o: open  /: search  Enter: new search  Tab: watched  [ ]: panels  q: quit"
                        .to_string()
                }
                ActiveList::Watched => "j/k: move  d: delete  Tab: results  /: search  q: quit".to_string(),
            },
        }
    }
}

/// Window of at most `available` items keeping `selected` near the middle.
fn visible_window(selected: usize, len: usize, available: usize) -> (usize, usize) {
    if len == 0 || available == 0 {
        return (0, 0);
    }
    let mut start = selected.saturating_sub(available / 2);
    let end = (start + available).min(len);
    if end - start < available && len >= available {
        start = end - available;
    }
    (start, end)
}

/// Truncates to `width` characters, marking the cut with `...`.
fn truncate(text: &str, width: usize) -> String {
    if text.chars().count() <= width {
        return text.to_string();
    }
    let kept: String = text.chars().take(width.saturating_sub(3)).collect();
    format!("{kept}...")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::MovieDetail;

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

    fn fetch_token(actions: &[Action]) -> u64 {
        match actions.first() {
            Some(Action::Fetch { token, .. }) => token.id(),
            other => panic!("expected fetch, got {other:?}"),
        }
    }

    fn loaded_detail(state: &mut AppState, id: &str) {
        let token_id = fetch_token(&state.toggle_movie(id.to_string()));
        state.detail = std::mem::take(&mut state.detail).reduce(DetailMsg::Settled {
            token_id,
            result: Ok(MovieDetail {
                id: id.to_string(),
                title: "Heat".to_string(),
                rating: "8.3".to_string(),
                runtime: "170 min".to_string(),
                ..MovieDetail::default()
            }),
        });
    }

    #[test]
    fn visible_window_keeps_cursor_in_view() {
        assert_eq!(visible_window(0, 3, 10), (0, 3));
        assert_eq!(visible_window(9, 10, 4), (6, 10));
        assert_eq!(visible_window(5, 10, 4), (3, 7));
        assert_eq!(visible_window(0, 0, 4), (0, 0));
    }

    #[test]
    fn truncate_counts_characters() {
        assert_eq!(truncate("Amélie", 10), "Amélie");
        assert_eq!(truncate("The Lord of the Rings", 10), "The Lor...");
    }

    #[test]
    fn cursor_wraps_in_active_list() {
        let mut state = state();
        state.search.results = vec![result("tt1", "A"), result("tt2", "B")];
        state.move_selection_up();
        assert_eq!(state.results_cursor, 1);
        state.move_selection_down();
        assert_eq!(state.results_cursor, 0);
    }

    #[test]
    fn rating_and_add_require_loaded_unwatched_detail() {
        let mut state = state();
        assert!(!state.rate(RatingMsg::Commit(5)));

        loaded_detail(&mut state, "tt1");
        assert!(state.can_rate());
        assert!(!state.can_add());
        assert!(state.rate(RatingMsg::Commit(8)));
        assert!(state.add_open_to_watched());

        assert!(!state.selection.is_open());
        assert_eq!(state.watched.user_rating_for("tt1"), Some(8));
    }

    #[test]
    fn watched_movie_shows_existing_rating() {
        let mut state = state();
        loaded_detail(&mut state, "tt1");
        state.rate(RatingMsg::Commit(7));
        state.add_open_to_watched();

        loaded_detail(&mut state, "tt1");
        let vm = state.compute_viewmodel(30, 120);
        match vm.right.body {
            RightBody::Detail(DetailBody::Loaded(view)) => {
                assert_eq!(view.rating_control, RatingControl::Rated(7));
                assert!(view.is_top_rated);
            }
            other => panic!("unexpected body {other:?}"),
        }
    }

    #[test]
    fn sync_effects_persist_only_after_load() {
        let mut state = state();
        loaded_detail(&mut state, "tt1");
        state.rate(RatingMsg::Commit(8));
        state.add_open_to_watched();

        let actions = state.sync_effects();
        assert!(!actions.iter().any(|a| matches!(a, Action::PostToWorker(_))));

        state.apply_watched(WatchedMsg::Loaded(vec![]));
        let actions = state.sync_effects();
        assert!(actions.iter().any(|a| matches!(
            a,
            Action::PostToWorker(WorkerMessage::SaveWatched { entries, .. }) if entries.len() == 1
        )));
        assert!(state.sync_effects().is_empty());
    }

    #[test]
    fn highlight_ranges_are_coalesced() {
        let mut state = state();
        state.search.query = "mat".to_string();
        let ranges = state.compute_highlight_ranges("The Matrix", &SkimMatcherV2::default());
        assert_eq!(ranges, vec![(4, 7)]);
    }

    #[test]
    fn summary_formats_to_fixed_decimals() {
        let mut state = state();
        state.apply_watched(WatchedMsg::Loaded(vec![WatchedEntry {
            id: "tt1".to_string(),
            title: "Heat".to_string(),
            year: "1995".to_string(),
            poster: "N/A".to_string(),
            catalog_rating: 8.25,
            runtime_minutes: 170,
            user_rating: 9,
        }]));
        let vm = state.compute_viewmodel(30, 120);
        match vm.right.body {
            RightBody::Watched { summary, list } => {
                assert_eq!(summary.count, "1 movies");
                assert_eq!(summary.avg_user_rating, "9.0");
                assert_eq!(summary.avg_runtime, "170 min");
                assert_eq!(list.items.len(), 1);
            }
            other => panic!("unexpected body {other:?}"),
        }
    }
}
