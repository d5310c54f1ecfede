#![forbid(unsafe_code)]

//! Terminal backends.
//!
//! A [`Backend`] reports the terminal size, provides the byte sink frames
//! are flushed into, and brackets a run with the startup and shutdown
//! sequences. [`CrosstermBackend`] drives the real terminal;
//! [`HeadlessBackend`] keeps everything in memory for tests and embedding.

use std::io::{self, BufWriter, Stdout, Write};

use elaris_core::terminal_session::{SessionOptions, TerminalSession};
use elaris_render::ansi;
use tracing::{debug, info};

use crate::config::AppConfig;

/// Output and lifecycle side of the terminal.
pub trait Backend {
    type Writer: Write;

    /// Current size as `(columns, rows)`.
    fn size(&self) -> io::Result<(u16, u16)>;

    /// Sink for encoded frames.
    fn writer(&mut self) -> &mut Self::Writer;

    /// Prepare the terminal: raw mode, then the startup sequence.
    fn start(&mut self, config: &AppConfig) -> io::Result<()>;

    /// Undo [`start`](Self::start). Every step is best-effort and this
    /// never fails, so it is safe to call on any exit path, twice.
    fn restore(&mut self);
}

// ── Crossterm ───────────────────────────────────────────────────────────

/// The process terminal via crossterm and stdout.
#[derive(Debug)]
pub struct CrosstermBackend {
    out: BufWriter<Stdout>,
    session: Option<TerminalSession>,
    alternate_screen: bool,
}

impl Default for CrosstermBackend {
    fn default() -> Self {
        Self::new()
    }
}

impl CrosstermBackend {
    pub fn new() -> Self {
        Self {
            out: BufWriter::new(io::stdout()),
            session: None,
            alternate_screen: true,
        }
    }
}

impl Backend for CrosstermBackend {
    type Writer = BufWriter<Stdout>;

    fn size(&self) -> io::Result<(u16, u16)> {
        match &self.session {
            Some(session) => session.size(),
            None => crossterm::terminal::size(),
        }
    }

    fn writer(&mut self) -> &mut Self::Writer {
        &mut self.out
    }

    fn start(&mut self, config: &AppConfig) -> io::Result<()> {
        let options = SessionOptions::default().with_mouse_capture(config.mouse_capture);
        self.session = Some(TerminalSession::new(options)?);
        self.alternate_screen = config.alternate_screen;
        ansi::startup_sequence(&mut self.out, self.alternate_screen)?;
        self.out.flush()?;
        info!(alternate_screen = self.alternate_screen, "terminal session started");
        Ok(())
    }

    fn restore(&mut self) {
        let Some(session) = self.session.take() else {
            return;
        };
        let _ = ansi::shutdown_sequence(&mut self.out, self.alternate_screen);
        let _ = self.out.flush();
        // Dropping the session leaves raw mode and repeats the restore
        // sequence, which is idempotent.
        drop(session);
        info!("terminal session restored");
    }
}

impl Drop for CrosstermBackend {
    fn drop(&mut self) {
        self.restore();
    }
}

// ── Headless ────────────────────────────────────────────────────────────

/// An in-memory terminal of a settable size.
#[derive(Debug, Clone)]
pub struct HeadlessBackend {
    width: u16,
    height: u16,
    output: Vec<u8>,
    starts: usize,
    restores: usize,
    alternate_screen: bool,
    fail_size: bool,
}

impl HeadlessBackend {
    pub fn new(width: u16, height: u16) -> Self {
        Self {
            width,
            height,
            output: Vec::new(),
            starts: 0,
            restores: 0,
            alternate_screen: true,
            fail_size: false,
        }
    }

    /// Change the size the next [`size`](Backend::size) call reports.
    pub fn set_size(&mut self, width: u16, height: u16) {
        debug!(width, height, "headless size changed");
        self.width = width;
        self.height = height;
    }

    /// Make size queries fail until turned off again.
    pub fn set_size_unavailable(&mut self, unavailable: bool) {
        self.fail_size = unavailable;
    }

    /// Everything written so far.
    pub fn output(&self) -> &[u8] {
        &self.output
    }

    /// Output as (lossy) UTF-8.
    pub fn output_text(&self) -> String {
        String::from_utf8_lossy(&self.output).into_owned()
    }

    /// Take and clear the captured output.
    pub fn take_output(&mut self) -> Vec<u8> {
        std::mem::take(&mut self.output)
    }

    /// Number of completed [`start`](Backend::start) calls.
    pub fn starts(&self) -> usize {
        self.starts
    }

    /// Number of [`restore`](Backend::restore) calls that did work.
    pub fn restores(&self) -> usize {
        self.restores
    }

    /// True between a start and its restore.
    pub fn is_active(&self) -> bool {
        self.starts > self.restores
    }
}

impl Backend for HeadlessBackend {
    type Writer = Vec<u8>;

    fn size(&self) -> io::Result<(u16, u16)> {
        if self.fail_size {
            return Err(io::Error::other("terminal size unavailable"));
        }
        Ok((self.width, self.height))
    }

    fn writer(&mut self) -> &mut Self::Writer {
        &mut self.output
    }

    fn start(&mut self, config: &AppConfig) -> io::Result<()> {
        self.alternate_screen = config.alternate_screen;
        ansi::startup_sequence(&mut self.output, self.alternate_screen)?;
        self.starts += 1;
        Ok(())
    }

    fn restore(&mut self) {
        if !self.is_active() {
            return;
        }
        let _ = ansi::shutdown_sequence(&mut self.output, self.alternate_screen);
        self.restores += 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn headless_brackets_a_run() {
        let mut backend = HeadlessBackend::new(10, 4);
        backend.start(&AppConfig::default()).unwrap();
        assert!(backend.is_active());
        assert_eq!(backend.output_text(), "\x1b%G\x1b[?1049h\x1b[2J\x1b[?25l");

        backend.take_output();
        backend.restore();
        backend.restore();
        assert_eq!(backend.restores(), 1);
        assert_eq!(backend.output_text(), "\x1b[?25h\x1b[?1049l\x1b[0m");
    }

    #[test]
    fn headless_without_alternate_screen() {
        let mut backend = HeadlessBackend::new(1, 1);
        let config = AppConfig::default().with_alternate_screen(false);
        backend.start(&config).unwrap();
        backend.restore();
        assert_eq!(
            backend.output_text(),
            "\x1b%G\x1b[2J\x1b[?25l\x1b[?25h\x1b[0m"
        );
    }

    #[test]
    fn headless_size_is_settable_and_can_fail() {
        let mut backend = HeadlessBackend::new(80, 24);
        assert_eq!(backend.size().unwrap(), (80, 24));
        backend.set_size(100, 30);
        assert_eq!(backend.size().unwrap(), (100, 30));
        backend.set_size_unavailable(true);
        assert!(backend.size().is_err());
    }
}
