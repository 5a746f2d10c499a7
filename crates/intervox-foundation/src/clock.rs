//! Monotonic clock abstraction.
//!
//! All timing in the pipeline (candidate hysteresis, silence thresholds,
//! warning cooldowns) runs against `Instant` through this trait, so the same
//! code can execute on real time or on a virtual clock in tests. The clock is
//! monotonic by contract; wall-clock adjustments must never move it backwards.

use parking_lot::Mutex;
use std::sync::Arc;
use std::time::{Duration, Instant};

/// Source of monotonic time.
pub trait Clock: Send + Sync {
    fn now(&self) -> Instant;

    /// Block until `duration` has elapsed on this clock.
    fn sleep(&self, duration: Duration);
}

/// Wall-time clock backed by `std::time::Instant`.
pub struct RealClock;

impl RealClock {
    pub fn new() -> Self {
        Self
    }
}

impl Default for RealClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for RealClock {
    fn now(&self) -> Instant {
        Instant::now()
    }

    fn sleep(&self, duration: Duration) {
        std::thread::sleep(duration);
    }
}

/// Virtual clock for deterministic tests. Time only moves when the test
/// advances it.
pub struct TestClock {
    current: Mutex<Instant>,
}

impl TestClock {
    pub fn new() -> Self {
        Self {
            current: Mutex::new(Instant::now()),
        }
    }

    pub fn starting_at(start: Instant) -> Self {
        Self {
            current: Mutex::new(start),
        }
    }

    /// Move the virtual clock forward.
    pub fn advance(&self, duration: Duration) {
        *self.current.lock() += duration;
    }

    /// Convenience for tick-style tests.
    pub fn advance_ms(&self, ms: u64) {
        self.advance(Duration::from_millis(ms));
    }
}

impl Default for TestClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for TestClock {
    fn now(&self) -> Instant {
        *self.current.lock()
    }

    fn sleep(&self, duration: Duration) {
        // Virtual time: sleeping is just advancing.
        self.advance(duration);
    }
}

/// Clock handle shareable across components.
pub type SharedClock = Arc<dyn Clock>;

pub fn real_clock() -> SharedClock {
    Arc::new(RealClock::new())
}

pub fn test_clock() -> Arc<TestClock> {
    Arc::new(TestClock::new())
}
