//! Application layer coordinating state, events, and actions.
//!
//! # Architecture
//!
//! The application layer follows a unidirectional data flow pattern:
//!
//! ```text
//! User Input → Events → Event Handler → Reducers → Actions → Side Effects
//!                           ↑                                  ↓
//!                           └──── Fetch results / Worker ──────┘
//! ```
//!
//! Each concern owns a small state with a pure `reduce(self, msg) -> Self`:
//!
//! - [`search`]: Query controller and result state
//! - [`selection`]: Which movie is open
//! - [`detail`]: Detail fetch state and pane title
//! - [`watched`]: Watched list with change tracking
//! - [`rating`]: Star rating input
//! - [`summary`]: Averages over the watched list
//!
//! [`state`] composes them, [`handler`] maps events onto them, [`actions`]
//! are the side effects handed back to the runtime, and [`modes`] holds
//! focus and layout flags.

pub mod actions;
pub mod detail;
pub mod handler;
pub mod modes;
pub mod rating;
pub mod search;
pub mod selection;
pub mod state;
pub mod summary;
pub mod watched;

pub use actions::Action;
pub use handler::{handle_event, Event};
pub use modes::{ActiveList, Focus, Panels};
pub use state::AppState;
