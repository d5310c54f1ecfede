#![forbid(unsafe_code)]

//! Terminal session lifecycle guard.
//!
//! [`TerminalSession`] owns raw mode for the lifetime of an application run.
//! Dropping it restores the terminal, and a process-wide panic hook plus a
//! SIGINT/SIGTERM watcher restore it on the exit paths that never reach
//! `Drop` (a panic with `panic = "abort"`, or a signal).
//!
//! The session deliberately does not write the screen setup sequence
//! (alternate buffer, clear, hidden cursor); the runtime backend emits that
//! through the renderer's encoder so it can be captured in tests. The session
//! only performs the restoration half as a last-resort fallback.
//!
//! # Restore order
//!
//! 1. Disable mouse capture (if enabled)
//! 2. Show cursor
//! 3. Leave alternate screen
//! 4. Reset style
//! 5. Exit raw mode
//! 6. Flush stdout

use std::io::{self, Write};
use std::sync::OnceLock;
use std::time::Duration;

use crate::event::Event;

#[cfg(unix)]
use signal_hook::consts::signal::{SIGINT, SIGTERM};
#[cfg(unix)]
use signal_hook::iterator::Signals;

const RESTORE_SEQUENCE: &[u8] = b"\x1b[?25h\x1b[?1049l\x1b[0m";

/// Options for a terminal session. Everything defaults to off.
#[derive(Debug, Clone, Default)]
pub struct SessionOptions {
    /// Enable mouse capture so clicks are reported as events.
    pub mouse_capture: bool,
}

impl SessionOptions {
    /// Enable or disable mouse capture.
    #[must_use]
    pub fn with_mouse_capture(mut self, enabled: bool) -> Self {
        self.mouse_capture = enabled;
        self
    }
}

/// RAII guard over raw mode.
///
/// Only one session should exist at a time.
#[derive(Debug)]
pub struct TerminalSession {
    options: SessionOptions,
    raw_mode_enabled: bool,
    mouse_enabled: bool,
    #[cfg(unix)]
    signal_guard: Option<SignalGuard>,
}

impl TerminalSession {
    /// Enter raw mode and enable the requested features.
    ///
    /// # Errors
    ///
    /// Returns an error if raw mode or mouse capture cannot be enabled. Any
    /// state already changed is restored before returning.
    pub fn new(options: SessionOptions) -> io::Result<Self> {
        install_panic_hook();

        crossterm::terminal::enable_raw_mode()?;
        #[cfg(feature = "tracing")]
        tracing::info!("terminal raw mode enabled");

        let mut session = Self {
            options: options.clone(),
            raw_mode_enabled: true,
            mouse_enabled: false,
            #[cfg(unix)]
            signal_guard: None,
        };

        #[cfg(unix)]
        {
            session.signal_guard = Some(SignalGuard::new()?);
        }

        if options.mouse_capture {
            crossterm::execute!(io::stdout(), crossterm::event::EnableMouseCapture)?;
            session.mouse_enabled = true;
            #[cfg(feature = "tracing")]
            tracing::info!("mouse capture enabled");
        }

        Ok(session)
    }

    /// Current terminal size as `(columns, rows)`.
    pub fn size(&self) -> io::Result<(u16, u16)> {
        crossterm::terminal::size()
    }

    /// Wait up to `timeout` for an input event to become readable.
    pub fn poll_event(&self, timeout: Duration) -> io::Result<bool> {
        crossterm::event::poll(timeout)
    }

    /// Read the next event, blocking until one is available.
    ///
    /// Returns `Ok(None)` for terminal events the toolkit does not model.
    pub fn read_event(&self) -> io::Result<Option<Event>> {
        crossterm::event::read().map(Event::from_crossterm)
    }

    /// The options this session was created with.
    pub fn options(&self) -> &SessionOptions {
        &self.options
    }

    fn cleanup(&mut self) {
        #[cfg(unix)]
        let _ = self.signal_guard.take();

        let mut stdout = io::stdout();

        if self.mouse_enabled {
            let _ = crossterm::execute!(stdout, crossterm::event::DisableMouseCapture);
            self.mouse_enabled = false;
            #[cfg(feature = "tracing")]
            tracing::info!("mouse capture disabled");
        }

        if self.raw_mode_enabled {
            let _ = crossterm::terminal::disable_raw_mode();
            self.raw_mode_enabled = false;
            #[cfg(feature = "tracing")]
            tracing::info!("terminal raw mode disabled");
        }

        let _ = stdout.flush();
    }
}

impl Drop for TerminalSession {
    fn drop(&mut self) {
        self.cleanup();
    }
}

fn install_panic_hook() {
    static HOOK: OnceLock<()> = OnceLock::new();
    HOOK.get_or_init(|| {
        let previous = std::panic::take_hook();
        std::panic::set_hook(Box::new(move |info| {
            best_effort_restore();
            previous(info);
        }));
    });
}

/// Restore the terminal without any session state: disable mouse capture,
/// show the cursor, leave the alternate screen, reset style, and leave raw
/// mode. Every step ignores its own failure.
pub fn best_effort_restore() {
    let mut stdout = io::stdout();

    let _ = crossterm::execute!(stdout, crossterm::event::DisableMouseCapture);
    let _ = stdout.write_all(RESTORE_SEQUENCE);
    let _ = crossterm::terminal::disable_raw_mode();
    let _ = stdout.flush();
}

#[cfg(unix)]
#[derive(Debug)]
struct SignalGuard {
    handle: signal_hook::iterator::Handle,
    thread: Option<std::thread::JoinHandle<()>>,
}

#[cfg(unix)]
impl SignalGuard {
    fn new() -> io::Result<Self> {
        let mut signals = Signals::new([SIGINT, SIGTERM]).map_err(io::Error::other)?;
        let handle = signals.handle();
        let thread = std::thread::Builder::new()
            .name("elaris-signals".into())
            .spawn(move || {
                for signal in signals.forever() {
                    #[cfg(feature = "tracing")]
                    tracing::warn!(signal, "termination signal received, restoring terminal");
                    best_effort_restore();
                    std::process::exit(128 + signal);
                }
            })?;
        Ok(Self {
            handle,
            thread: Some(thread),
        })
    }
}

#[cfg(unix)]
impl Drop for SignalGuard {
    fn drop(&mut self) {
        self.handle.close();
        if let Some(thread) = self.thread.take() {
            let _ = thread.join();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn options_default_to_minimal() {
        let opts = SessionOptions::default();
        assert!(!opts.mouse_capture);
        assert!(SessionOptions::default().with_mouse_capture(true).mouse_capture);
    }

    #[test]
    fn restore_sequence_order() {
        // show cursor, leave alternate screen, reset style
        assert_eq!(RESTORE_SEQUENCE, b"\x1b[?25h\x1b[?1049l\x1b[0m");
    }

    // Entering raw mode from a unit test would disturb the test runner's
    // terminal; session behavior is covered through the runtime's headless
    // backend instead.
}
