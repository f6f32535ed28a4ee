//! Ledger time source.
//!
//! The core only ever sees `u32` unix-second timestamps through the
//! [`Clock`] trait; all expiry and buffer checks are threshold
//! comparisons against that value. Callers must supply a non-decreasing
//! clock.

use std::sync::Arc;
use std::sync::atomic::{AtomicU32, Ordering};

/// Source of the current ledger time in unix seconds.
pub trait Clock: Send + Sync {
    fn now(&self) -> u32;
}

/// Wall-clock time, clamped into the 32-bit protocol range.
#[derive(Debug, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> u32 {
        u32::try_from(chrono::Utc::now().timestamp()).unwrap_or(u32::MAX)
    }
}

/// A hand-advanced clock for tests. Clones share the same underlying
/// time, so a test can keep a handle while the ledger owns a boxed copy.
#[derive(Debug, Clone, Default)]
pub struct ManualClock {
    now: Arc<AtomicU32>,
}

impl ManualClock {
    #[must_use]
    pub fn new(start: u32) -> Self {
        Self {
            now: Arc::new(AtomicU32::new(start)),
        }
    }

    /// Move time forward to `now`. Moving backwards is ignored.
    pub fn set(&self, now: u32) {
        self.now.fetch_max(now, Ordering::SeqCst);
    }

    /// Advance time by `secs`, saturating at the protocol horizon.
    pub fn advance(&self, secs: u32) {
        let current = self.now.load(Ordering::SeqCst);
        self.set(current.saturating_add(secs));
    }
}

impl Clock for ManualClock {
    fn now(&self) -> u32 {
        self.now.load(Ordering::SeqCst)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn manual_clock_is_monotone() {
        let clock = ManualClock::new(100);
        assert_eq!(clock.now(), 100);
        clock.set(50);
        assert_eq!(clock.now(), 100, "time never moves backwards");
        clock.advance(10);
        assert_eq!(clock.now(), 110);
    }

    #[test]
    fn clones_share_time() {
        let clock = ManualClock::new(0);
        let handle = clock.clone();
        clock.set(42);
        assert_eq!(handle.now(), 42);
    }

    #[test]
    fn system_clock_is_past_2020() {
        assert!(SystemClock.now() > 1_577_836_800);
    }
}
