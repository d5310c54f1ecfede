#![forbid(unsafe_code)]

//! Input sources.
//!
//! The loop asks an [`InputSource`] whether an event is ready (waiting at
//! most a short timeout) and then reads it. A failed or cancelled read is
//! indistinguishable from "nothing this tick": sources swallow their own
//! errors and return `None`.
//!
//! - [`CrosstermInput`] polls the terminal on a worker thread and hands
//!   finished events to the loop over a channel
//! - [`ChannelInput`] is fed from any thread through an [`mpsc::Sender`]
//! - [`ScriptedInput`] replays a fixed queue, for tests

use std::collections::VecDeque;
use std::io;
use std::sync::mpsc::{self, Receiver, RecvTimeoutError, Sender};
use std::thread::{self, JoinHandle};
use std::time::Duration;

use elaris_core::event::Event;
use tracing::{debug, trace};

use crate::stop::StopSignal;

/// How often the terminal worker rechecks the stop signal.
const WORKER_POLL: Duration = Duration::from_millis(10);

/// A source of input events for the application loop.
pub trait InputSource {
    /// Called once before the first poll. `stop` is raised when the loop
    /// ends; workers must exit promptly once it is.
    fn start(&mut self, _stop: StopSignal) -> io::Result<()> {
        Ok(())
    }

    /// Wait up to `timeout` for an event. Never blocks longer.
    fn poll(&mut self, timeout: Duration) -> bool;

    /// Take the next ready event, if any.
    fn read(&mut self) -> Option<Event>;

    /// Called once after the loop ends (stop is already raised).
    fn shutdown(&mut self) {}
}

impl<T: InputSource + ?Sized> InputSource for Box<T> {
    fn start(&mut self, stop: StopSignal) -> io::Result<()> {
        (**self).start(stop)
    }

    fn poll(&mut self, timeout: Duration) -> bool {
        (**self).poll(timeout)
    }

    fn read(&mut self) -> Option<Event> {
        (**self).read()
    }

    fn shutdown(&mut self) {
        (**self).shutdown();
    }
}

// ── Channel ─────────────────────────────────────────────────────────────

/// Events pushed from elsewhere through a channel.
#[derive(Debug)]
pub struct ChannelInput {
    rx: Receiver<Event>,
    pending: Option<Event>,
}

impl ChannelInput {
    /// Create the source and the sender that feeds it.
    pub fn new() -> (Self, Sender<Event>) {
        let (tx, rx) = mpsc::channel();
        (Self { rx, pending: None }, tx)
    }

    fn from_receiver(rx: Receiver<Event>) -> Self {
        Self { rx, pending: None }
    }
}

impl InputSource for ChannelInput {
    fn poll(&mut self, timeout: Duration) -> bool {
        if self.pending.is_some() {
            return true;
        }
        let received = if timeout.is_zero() {
            self.rx.try_recv().ok()
        } else {
            match self.rx.recv_timeout(timeout) {
                Ok(event) => Some(event),
                Err(RecvTimeoutError::Timeout | RecvTimeoutError::Disconnected) => None,
            }
        };
        self.pending = received;
        self.pending.is_some()
    }

    fn read(&mut self) -> Option<Event> {
        self.pending.take().or_else(|| self.rx.try_recv().ok())
    }
}

// ── Scripted ────────────────────────────────────────────────────────────

/// A fixed queue of events, delivered in order without waiting.
#[derive(Debug, Clone, Default)]
pub struct ScriptedInput {
    queue: VecDeque<Event>,
}

impl ScriptedInput {
    pub fn new(events: impl IntoIterator<Item = Event>) -> Self {
        Self {
            queue: events.into_iter().collect(),
        }
    }

    /// Append an event to the end of the script.
    pub fn push(&mut self, event: impl Into<Event>) {
        self.queue.push_back(event.into());
    }

    /// Events not yet read.
    pub fn remaining(&self) -> usize {
        self.queue.len()
    }
}

impl InputSource for ScriptedInput {
    fn poll(&mut self, _timeout: Duration) -> bool {
        !self.queue.is_empty()
    }

    fn read(&mut self) -> Option<Event> {
        self.queue.pop_front()
    }
}

// ── Terminal ────────────────────────────────────────────────────────────

/// Terminal input serviced by a background worker.
///
/// The worker owns every blocking terminal read, so a slow keypress never
/// holds up frame pacing. It polls in short slices and exits once the stop
/// signal is raised.
#[derive(Debug, Default)]
pub struct CrosstermInput {
    inner: Option<ChannelInput>,
    worker: Option<JoinHandle<()>>,
}

impl CrosstermInput {
    pub fn new() -> Self {
        Self::default()
    }
}

impl InputSource for CrosstermInput {
    fn start(&mut self, stop: StopSignal) -> io::Result<()> {
        let (tx, rx) = mpsc::channel();
        let worker = thread::Builder::new()
            .name("elaris-input".into())
            .spawn(move || input_worker(&tx, &stop))?;
        self.inner = Some(ChannelInput::from_receiver(rx));
        self.worker = Some(worker);
        Ok(())
    }

    fn poll(&mut self, timeout: Duration) -> bool {
        self.inner.as_mut().is_some_and(|inner| inner.poll(timeout))
    }

    fn read(&mut self) -> Option<Event> {
        self.inner.as_mut().and_then(ChannelInput::read)
    }

    fn shutdown(&mut self) {
        self.inner = None;
        if let Some(worker) = self.worker.take() {
            let _ = worker.join();
        }
    }
}

fn input_worker(tx: &Sender<Event>, stop: &StopSignal) {
    debug!("input worker started");
    while !stop.is_stopped() {
        match crossterm::event::poll(WORKER_POLL) {
            Ok(true) => match crossterm::event::read() {
                Ok(raw) => {
                    if let Some(event) = Event::from_crossterm(raw) {
                        if tx.send(event).is_err() {
                            break;
                        }
                    }
                }
                Err(err) => trace!(%err, "terminal read failed"),
            },
            Ok(false) => {}
            Err(err) => {
                trace!(%err, "terminal poll failed");
                if stop.wait_timeout(WORKER_POLL) {
                    break;
                }
            }
        }
    }
    debug!("input worker stopped");
}
