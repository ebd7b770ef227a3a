//! Clock Module
//!
//! Time sources used to stamp entries. All timestamps are milliseconds on a
//! monotonic scale local to the clock; they are never compared across clocks.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};

/// Converts a duration to whole milliseconds, saturating at `u64::MAX`.
pub(crate) fn duration_to_ms(duration: Duration) -> u64 {
    u64::try_from(duration.as_millis()).unwrap_or(u64::MAX)
}

// == Clock Trait ==
/// A monotonic millisecond time source.
pub trait Clock {
    /// Returns the current time in milliseconds. Must never decrease.
    fn now_ms(&self) -> u64;
}

// == Monotonic Clock ==
/// Wall-time clock backed by [`Instant`], counting from its creation.
#[derive(Debug, Clone, Copy)]
pub struct MonotonicClock {
    origin: Instant,
}

impl MonotonicClock {
    pub fn new() -> Self {
        Self {
            origin: Instant::now(),
        }
    }
}

impl Default for MonotonicClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for MonotonicClock {
    fn now_ms(&self) -> u64 {
        duration_to_ms(self.origin.elapsed())
    }
}

// == Manual Clock ==
/// Clock that only moves when told to.
///
/// Clones share the same underlying time, so a test can keep one handle and
/// hand another to the cache.
#[derive(Debug, Clone, Default)]
pub struct ManualClock {
    now: Arc<AtomicU64>,
}

impl ManualClock {
    /// Creates a clock starting at 0ms.
    pub fn new() -> Self {
        Self::default()
    }

    /// Moves the clock forward, stopping at `u64::MAX`.
    pub fn advance(&self, by: Duration) {
        let by = duration_to_ms(by);
        let mut current = self.now.load(Ordering::SeqCst);
        while let Err(actual) = self.now.compare_exchange_weak(
            current,
            current.saturating_add(by),
            Ordering::SeqCst,
            Ordering::SeqCst,
        ) {
            current = actual;
        }
    }

    /// Jumps to an absolute time. Earlier values are ignored.
    pub fn set_ms(&self, ms: u64) {
        self.now.fetch_max(ms, Ordering::SeqCst);
    }
}

impl Clock for ManualClock {
    fn now_ms(&self) -> u64 {
        self.now.load(Ordering::SeqCst)
    }
}
