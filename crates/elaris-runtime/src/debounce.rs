#![forbid(unsafe_code)]

//! Latest-wins debouncing.
//!
//! Every [`schedule`](Debouncer::schedule) supersedes the tickets handed
//! out before it. Delayed work checks its ticket when it wakes and does
//! nothing if a newer schedule happened in the meantime.
//!
//! ```
//! use elaris_runtime::Debouncer;
//!
//! let debouncer = Debouncer::new();
//! let first = debouncer.schedule();
//! let second = debouncer.schedule();
//! assert!(!debouncer.is_current(first));
//! assert!(debouncer.is_current(second));
//! ```

use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use std::thread::{self, JoinHandle};
use std::time::Duration;

/// Proof of one schedule call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct DebounceTicket(u64);

/// Shared generation counter. Clones observe the same generation.
#[derive(Debug, Clone, Default)]
pub struct Debouncer {
    generation: Arc<AtomicU64>,
}

impl Debouncer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start a new generation, invalidating every earlier ticket.
    pub fn schedule(&self) -> DebounceTicket {
        DebounceTicket(self.generation.fetch_add(1, Ordering::AcqRel) + 1)
    }

    /// True if no schedule happened after `ticket`.
    pub fn is_current(&self, ticket: DebounceTicket) -> bool {
        self.generation.load(Ordering::Acquire) == ticket.0
    }

    /// Invalidate every outstanding ticket.
    pub fn cancel(&self) {
        self.generation.fetch_add(1, Ordering::AcqRel);
    }

    /// Schedule `f` to run on a worker thread after `delay`, unless another
    /// schedule (or a cancel) happens first. The handle yields whether `f`
    /// ran.
    pub fn spawn_after<F>(&self, delay: Duration, f: F) -> JoinHandle<bool>
    where
        F: FnOnce() + Send + 'static,
    {
        let ticket = self.schedule();
        let debouncer = self.clone();
        thread::spawn(move || {
            thread::sleep(delay);
            if debouncer.is_current(ticket) {
                f();
                true
            } else {
                false
            }
        })
    }
}
