//! Request sequencing for searches issued by a session.
//!
//! Every mutation that triggers a search takes a fresh version number. When the
//! store answers, the response is applied only if its version is still the
//! active one; answers to older requests are dropped instead of overwriting
//! newer results.

use std::sync::atomic::{AtomicU64, Ordering};

/// Tracks the active search version.
#[derive(Debug, Default)]
pub struct SearchVersionTracker {
    active_version: AtomicU64,
}

impl SearchVersionTracker {
    pub fn new() -> Self {
        Self {
            active_version: AtomicU64::new(0),
        }
    }

    /// Increments the active version and returns the new version number.
    ///
    /// Any request holding an older version becomes stale.
    pub fn next_version(&self) -> u64 {
        self.active_version.fetch_add(1, Ordering::SeqCst) + 1
    }

    /// Returns the current active version without incrementing.
    pub fn current_version(&self) -> u64 {
        self.active_version.load(Ordering::SeqCst)
    }

    /// Returns `Some(())` while `version` is still active, `None` once a newer
    /// search has started. Usable with `?` for early returns.
    #[inline]
    pub fn is_current(&self, version: u64) -> Option<()> {
        if version == self.current_version() {
            Some(())
        } else {
            None
        }
    }
}
