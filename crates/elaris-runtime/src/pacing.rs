#![forbid(unsafe_code)]

//! Fixed-cadence frame pacing.
//!
//! After each iteration the loop sleeps for whatever is left of the frame
//! interval, measured from the iteration's start. An iteration that overran
//! does not sleep at all, and the overrun is not paid back on later frames.

use std::time::{Duration, Instant};

use crate::stop::StopSignal;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FramePacer {
    interval: Duration,
}

impl FramePacer {
    pub const fn new(interval: Duration) -> Self {
        Self { interval }
    }

    #[inline]
    pub const fn interval(&self) -> Duration {
        self.interval
    }

    /// Time left in the frame that began at `started`, zero if overrun.
    pub fn remaining(&self, started: Instant) -> Duration {
        self.interval.saturating_sub(started.elapsed())
    }

    /// Sleep out the rest of the frame. Wakes early and returns `true` if
    /// `stop` is raised meanwhile.
    pub fn wait(&self, started: Instant, stop: &StopSignal) -> bool {
        let remaining = self.remaining(started);
        if remaining.is_zero() {
            return stop.is_stopped();
        }
        stop.wait_timeout(remaining)
    }
}
