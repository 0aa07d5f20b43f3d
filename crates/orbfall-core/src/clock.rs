//! Time sources for spawn timing.
//!
//! The simulation only needs a monotonic "time since start". Wall-clock runs
//! use [`MonotonicClock`]; tests and reproducible runs use
//! [`FixedStepClock`], which advances by a fixed step on every read.

use std::time::{Duration, Instant};

/// Monotonic time source.
pub trait Clock {
    /// Time elapsed since the clock started. Never decreases.
    fn now(&mut self) -> Duration;
}

/// Wall clock backed by [`Instant`].
#[derive(Debug, Clone, Copy)]
pub struct MonotonicClock {
    start: Instant,
}

impl MonotonicClock {
    /// Starts a clock at the current instant.
    #[must_use]
    pub fn new() -> Self {
        Self {
            start: Instant::now(),
        }
    }
}

impl Default for MonotonicClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for MonotonicClock {
    fn now(&mut self) -> Duration {
        self.start.elapsed()
    }
}

/// Deterministic clock that advances `step` per read.
///
/// The first read returns `step`, so a simulation driven at 60 Hz with a
/// one second spawn interval sees its first obstacle on tick 61.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FixedStepClock {
    elapsed: Duration,
    step: Duration,
}

impl FixedStepClock {
    /// Creates a clock at zero.
    #[must_use]
    pub const fn new(step: Duration) -> Self {
        Self {
            elapsed: Duration::ZERO,
            step,
        }
    }

    /// One read per frame at `hz` frames per second.
    #[must_use]
    pub fn from_hz(hz: u32) -> Self {
        Self::new(Duration::from_secs(1) / hz.max(1))
    }

    /// Time returned by the most recent read.
    #[must_use]
    pub const fn elapsed(&self) -> Duration {
        self.elapsed
    }
}

impl Clock for FixedStepClock {
    fn now(&mut self) -> Duration {
        self.elapsed += self.step;
        self.elapsed
    }
}
