#![forbid(unsafe_code)]

//! Cooperative cancellation shared by the loop thread and input workers.
//!
//! A [`StopTrigger`] raises the flag; any number of [`StopSignal`]s observe
//! it. Workers block in [`StopSignal::wait_timeout`] instead of sleeping so
//! that a stop wakes them immediately.

use std::sync::{Arc, Condvar, Mutex, MutexGuard, PoisonError};
use std::time::{Duration, Instant};

type Shared = Arc<(Mutex<bool>, Condvar)>;

fn lock(inner: &Shared) -> MutexGuard<'_, bool> {
    inner.0.lock().unwrap_or_else(PoisonError::into_inner)
}

/// Read side of the stop flag.
#[derive(Debug, Clone)]
pub struct StopSignal {
    inner: Shared,
}

impl StopSignal {
    /// Create a connected (signal, trigger) pair, initially not stopped.
    pub fn new() -> (Self, StopTrigger) {
        let inner: Shared = Arc::new((Mutex::new(false), Condvar::new()));
        let signal = Self {
            inner: Arc::clone(&inner),
        };
        (signal, StopTrigger { inner })
    }

    /// Check if the stop signal has been raised.
    pub fn is_stopped(&self) -> bool {
        *lock(&self.inner)
    }

    /// Wait for either the stop signal or a timeout.
    ///
    /// Returns `true` if stopped, `false` if the full duration elapsed.
    /// Spurious wakeups are absorbed.
    pub fn wait_timeout(&self, duration: Duration) -> bool {
        let (_, cvar) = &*self.inner;
        let mut stopped = lock(&self.inner);
        if *stopped {
            return true;
        }

        let start = Instant::now();
        let mut remaining = duration;
        loop {
            let (guard, result) = cvar
                .wait_timeout(stopped, remaining)
                .unwrap_or_else(PoisonError::into_inner);
            stopped = guard;
            if *stopped {
                return true;
            }
            if result.timed_out() {
                return false;
            }
            let elapsed = start.elapsed();
            if elapsed >= duration {
                return false;
            }
            remaining = duration - elapsed;
        }
    }
}

/// Write side of the stop flag.
#[derive(Debug, Clone)]
pub struct StopTrigger {
    inner: Shared,
}

impl StopTrigger {
    /// Raise the flag and wake every waiter.
    pub fn stop(&self) {
        let (_, cvar) = &*self.inner;
        let mut stopped = lock(&self.inner);
        *stopped = true;
        cvar.notify_all();
    }

    /// Lower the flag so the owning loop can run again.
    pub(crate) fn reset(&self) {
        *lock(&self.inner) = false;
    }

    /// A new observer of this trigger's flag.
    pub fn signal(&self) -> StopSignal {
        StopSignal {
            inner: Arc::clone(&self.inner),
        }
    }
}
