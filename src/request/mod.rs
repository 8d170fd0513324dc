//! Request lifecycle: cancellation tokens and the in-flight registry.
//!
//! - [`token`]: Shared cancellation flags and the token source
//! - [`pending`]: Tracks requests handed to the host and decodes their responses

pub mod pending;
pub mod token;

pub use pending::{Outcome, PendingRequests, Settled};
pub use token::{CancellationToken, TokenSource};
