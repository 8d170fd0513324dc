//! Cooperative cancellation tokens.
//!
//! A token is issued for every catalog request and travels with the fetch
//! action to the runtime. The controller that issued it keeps a clone; when a
//! newer request supersedes it, the controller calls [`CancellationToken::cancel`]
//! and the runtime observes the flag once the host delivers the response.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

/// Shared cancellation flag with a stable request id.
///
/// Clones share the flag. Equality compares ids only.
#[derive(Debug, Clone)]
pub struct CancellationToken {
    id: u64,
    cancelled: Arc<AtomicBool>,
}

impl CancellationToken {
    fn new(id: u64) -> Self {
        Self {
            id,
            cancelled: Arc::new(AtomicBool::new(false)),
        }
    }

    /// Request id this token guards.
    #[must_use]
    pub const fn id(&self) -> u64 {
        self.id
    }

    /// Marks the request as superseded. Idempotent.
    pub fn cancel(&self) {
        self.cancelled.store(true, Ordering::SeqCst);
    }

    #[must_use]
    pub fn is_cancelled(&self) -> bool {
        self.cancelled.load(Ordering::SeqCst)
    }
}

impl PartialEq for CancellationToken {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for CancellationToken {}

/// Issues tokens with monotonically increasing ids.
#[derive(Debug, Clone, Default)]
pub struct TokenSource {
    next_id: u64,
}

impl TokenSource {
    /// Returns a fresh, uncancelled token.
    pub fn issue(&mut self) -> CancellationToken {
        self.next_id += 1;
        CancellationToken::new(self.next_id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clones_share_the_flag() {
        let mut source = TokenSource::default();
        let token = source.issue();
        let held_by_runtime = token.clone();
        assert!(!held_by_runtime.is_cancelled());
        token.cancel();
        assert!(held_by_runtime.is_cancelled());
    }

    #[test]
    fn ids_are_unique() {
        let mut source = TokenSource::default();
        let a = source.issue();
        let b = source.issue();
        assert_ne!(a, b);
        assert!(b.id() > a.id());
    }
}
