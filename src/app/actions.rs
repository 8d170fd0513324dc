//! Actions representing side effects to be executed by the plugin runtime.
//!
//! The event handler returns a `Vec<Action>` after processing each event; the
//! runtime executes them in order. Actions are the only way state changes
//! reach the network, the worker thread, or the host pane.
//!
//! # Example
//!
//! ```rust
//! use popcorn::app::Action;
//! use popcorn::worker::WorkerMessage;
//!
//! let actions = vec![
//!     Action::PostToWorker(WorkerMessage::load_watched("watched".to_string())),
//!     Action::SetPaneTitle("usePopcorn".to_string()),
//! ];
//! assert_eq!(actions.len(), 2);
//! ```

use crate::omdb::ApiRequest;
use crate::request::CancellationToken;
use crate::worker::WorkerMessage;

/// Commands for the plugin runtime.
#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    /// Hides the plugin pane.
    CloseFocus,

    /// Issues a catalog request.
    ///
    /// The runtime registers `token` with the in-flight registry so the
    /// response can be checked for cancellation when it arrives.
    Fetch {
        request: ApiRequest,
        token: CancellationToken,
    },

    /// Renames the plugin pane.
    SetPaneTitle(String),

    /// Posts a message to the background worker thread.
    PostToWorker(WorkerMessage),
}
