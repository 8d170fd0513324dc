//! Focus and layout mode types.
//!
//! # State Machine
//!
//! Input is either typed into the search field ([`Focus::Search`]) or
//! interpreted as commands ([`Focus::Normal`]). In normal focus, one of the
//! two lists receives cursor movement:
//!
//! - **Results**: the search results in the left panel
//! - **Watched**: the watched list in the right panel
//!
//! # Example
//!
//! ```rust
//! use popcorn::app::modes::{ActiveList, Focus, Panels};
//!
//! let focus = Focus::Search;
//! let list = ActiveList::Results.toggled();
//! assert_eq!(list, ActiveList::Watched);
//! assert!(Panels::default().left_open);
//! ```

/// Where keyboard input goes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Focus {
    /// Characters edit the query.
    ///
    /// Enter returns to the results list, Esc leaves the field and closes the
    /// detail view.
    Search,

    /// Single-key commands: navigation, selection, rating, watched list edits.
    Normal,
}

/// Which list the cursor keys move through in [`Focus::Normal`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActiveList {
    Results,
    Watched,
}

impl ActiveList {
    #[must_use]
    pub const fn toggled(self) -> Self {
        match self {
            Self::Results => Self::Watched,
            Self::Watched => Self::Results,
        }
    }
}

/// Open/collapsed state of the two boxes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Panels {
    /// Results box.
    pub left_open: bool,
    /// Detail or watched box.
    pub right_open: bool,
}

impl Default for Panels {
    fn default() -> Self {
        Self {
            left_open: true,
            right_open: true,
        }
    }
}
