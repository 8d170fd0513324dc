//! View model types representing renderable UI state.
//!
//! View models are computed from `AppState` by
//! [`AppState::compute_viewmodel`](crate::app::AppState::compute_viewmodel)
//! and consumed by the renderer. They carry display-ready strings and flags
//! and no business logic.

/// Complete UI view model for one frame.
#[derive(Debug, Clone, PartialEq)]
pub struct UIViewModel {
    pub header: HeaderInfo,
    pub search_bar: SearchBarInfo,
    pub left: Panel<ResultsBody>,
    pub right: Panel<RightBody>,
    pub footer: FooterInfo,
}

/// A collapsible box.
#[derive(Debug, Clone, PartialEq)]
pub struct Panel<T> {
    pub open: bool,
    pub body: T,
}

/// Top bar: logo on the left, result count on the right.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HeaderInfo {
    pub title: String,
    /// "Found N results".
    pub result_count: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchBarInfo {
    pub query: String,
    pub is_focused: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FooterInfo {
    pub keybindings: String,
    /// Transient status line, e.g. a storage failure.
    pub notice: Option<String>,
}

/// Left box contents.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResultsBody {
    Loading,
    Error(String),
    List(ListView<ResultItem>),
}

/// A windowed list with a cursor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListView<T> {
    pub items: Vec<T>,
    /// Cursor position within `items`.
    pub selected_index: usize,
    /// Whether cursor keys currently move this list.
    pub is_active: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResultItem {
    pub title: String,
    pub year: String,
    /// Character ranges of `title` matching the query `(start, end)`.
    pub highlight_ranges: Vec<(usize, usize)>,
    pub is_selected: bool,
    /// The detail view shows this movie.
    pub is_open: bool,
}

/// Right box contents: the open movie, or the watched summary and list.
#[derive(Debug, Clone, PartialEq)]
pub enum RightBody {
    Detail(DetailBody),
    Watched {
        summary: SummaryView,
        list: ListView<WatchedItem>,
    },
}

#[derive(Debug, Clone, PartialEq)]
pub enum DetailBody {
    Loading,
    Error(String),
    Loaded(Box<DetailView>),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DetailView {
    pub title: String,
    pub released: String,
    pub runtime: String,
    pub genre: String,
    pub rating: String,
    pub is_top_rated: bool,
    pub plot: String,
    pub actors: String,
    pub director: String,
    pub rating_control: RatingControl,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RatingControl {
    /// Not yet watched: stars plus the add hint once a rating is committed.
    Input { stars: StarsView, can_add: bool },
    /// Already in the watched list with this rating.
    Rated(u8),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StarsView {
    /// One flag per unit, `true` when filled.
    pub filled: Vec<bool>,
    pub label: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SummaryView {
    pub count: String,
    pub avg_catalog_rating: String,
    pub avg_user_rating: String,
    pub avg_runtime: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WatchedItem {
    pub title: String,
    pub catalog_rating: String,
    pub user_rating: String,
    pub runtime: String,
    pub is_selected: bool,
}
