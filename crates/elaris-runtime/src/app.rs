#![forbid(unsafe_code)]

//! The application loop.
//!
//! # Lifecycle
//!
//! `run` moves through: start the backend and input source, initialize
//! (size the screen to the terminal, give the root the whole screen, pick
//! the initial focus), then iterate until stopped, then tear down. Teardown
//! runs on every exit path, including a panic inside a widget.
//!
//! # One iteration
//!
//! 1. Dispatch up to `max_events_per_frame` ready events. Reserved keys
//!    (quit, focus next, focus previous) are handled here; every other key
//!    goes to the focused widget and is dropped if it declines. With mouse
//!    capture on, a left click goes to the top-most widget under it.
//! 2. Compare the terminal size with the screen; on a change, reallocate the
//!    screen and resize the root.
//! 3. Clear the back grid, render the tree, flush the changed cells.
//!
//! The frame pacer then sleeps out the rest of the frame interval.
//!
//! All widget, focus and screen mutation happens on the thread that calls
//! `run`. Other threads interact only through an [`AppHandle`].

use std::any::Any;
use std::io;
use std::panic::{self, AssertUnwindSafe};
use std::time::{Duration, Instant};

use elaris_core::event::{Event, KeyEvent, MouseEvent};
use elaris_core::geometry::Rect;
use elaris_render::presenter::FlushStats;
use elaris_render::screen::ScreenBuffer;
use elaris_widgets::{FocusController, TreeError, WidgetId, WidgetTree};
use tracing::{debug, debug_span, info, info_span, trace, warn};

use crate::backend::Backend;
use crate::config::{AppConfig, KeyAction};
use crate::input::InputSource;
use crate::pacing::FramePacer;
use crate::stop::{StopSignal, StopTrigger};

/// Why [`Application::run`] returned an error.
#[derive(Debug, thiserror::Error)]
pub enum RunError {
    #[error("application is already running")]
    AlreadyRunning,
    #[error("terminal I/O failed: {0}")]
    Io(#[from] io::Error),
    #[error(transparent)]
    Tree(#[from] TreeError),
    /// A widget or hook panicked. The terminal was restored first.
    #[error("application loop panicked: {0}")]
    Panicked(String),
}

/// Everything one loop instance mutates, in one place.
#[derive(Debug)]
pub struct LoopState {
    pub screen: ScreenBuffer,
    pub tree: WidgetTree,
    pub root: WidgetId,
    pub focus: FocusController,
    pub running: bool,
    /// Completed iterations.
    pub frames: u64,
    pub last_flush: FlushStats,
}

/// Stops a running [`Application`] from any thread.
#[derive(Debug, Clone)]
pub struct AppHandle {
    trigger: StopTrigger,
}

impl AppHandle {
    /// Ask the loop to stop after its current iteration.
    pub fn stop(&self) {
        self.trigger.stop();
    }

    /// True once a stop has been requested and not yet consumed by teardown.
    pub fn is_stop_requested(&self) -> bool {
        self.trigger.signal().is_stopped()
    }
}

/// A widget tree bound to a terminal backend and an input source.
pub struct Application<B: Backend, I: InputSource> {
    backend: B,
    input: I,
    config: AppConfig,
    state: LoopState,
    stop: StopSignal,
    trigger: StopTrigger,
}

impl<B: Backend, I: InputSource> Application<B, I> {
    /// Bind `tree` to a backend and input source. `root` receives the full
    /// screen and is the root of rendering, focus and hit testing.
    pub fn new(backend: B, input: I, tree: WidgetTree, root: WidgetId) -> Self {
        let (stop, trigger) = StopSignal::new();
        Self {
            backend,
            input,
            config: AppConfig::default(),
            state: LoopState {
                screen: ScreenBuffer::new(0, 0),
                tree,
                root,
                focus: FocusController::new(),
                running: false,
                frames: 0,
                last_flush: FlushStats::default(),
            },
            stop,
            trigger,
        }
    }

    #[must_use]
    pub fn with_config(mut self, config: AppConfig) -> Self {
        self.config = config;
        self
    }

    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    /// A clonable, `Send` handle that can stop the loop.
    pub fn handle(&self) -> AppHandle {
        AppHandle {
            trigger: self.trigger.clone(),
        }
    }

    /// Request a stop; the loop exits before its next iteration.
    pub fn stop(&self) {
        self.trigger.stop();
    }

    pub fn state(&self) -> &LoopState {
        &self.state
    }

    pub fn tree(&self) -> &WidgetTree {
        &self.state.tree
    }

    pub fn tree_mut(&mut self) -> &mut WidgetTree {
        &mut self.state.tree
    }

    pub fn root(&self) -> WidgetId {
        self.state.root
    }

    pub fn focused(&self) -> Option<WidgetId> {
        self.state.focus.focused()
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    pub fn backend_mut(&mut self) -> &mut B {
        &mut self.backend
    }

    /// Run until stopped by a quit key, [`stop`](Self::stop), or an
    /// [`AppHandle`]. The terminal is restored before this returns, whatever
    /// the outcome.
    ///
    /// A stop requested before `run` makes it return right after
    /// initialization. Fails with [`RunError::AlreadyRunning`] while the
    /// loop is being driven by hand through [`initialize`](Self::initialize)
    /// and [`step`](Self::step).
    pub fn run(&mut self) -> Result<(), RunError> {
        if self.state.running {
            return Err(RunError::AlreadyRunning);
        }
        let _span = info_span!("elaris.app.run").entered();

        if let Err(err) = self.backend.start(&self.config) {
            self.backend.restore();
            return Err(err.into());
        }
        if let Err(err) = self.input.start(self.stop.clone()) {
            self.backend.restore();
            return Err(err.into());
        }
        info!(root = %self.state.root, "application started");

        let outcome = panic::catch_unwind(AssertUnwindSafe(|| self.run_loop()));
        self.teardown();

        match outcome {
            Ok(result) => result,
            Err(payload) => {
                let message = panic_message(payload.as_ref());
                warn!(%message, "application loop panicked");
                Err(RunError::Panicked(message))
            }
        }
    }

    fn run_loop(&mut self) -> Result<(), RunError> {
        self.initialize()?;
        let pacer = FramePacer::new(self.config.frame_interval);
        while !self.stop.is_stopped() {
            let started = Instant::now();
            self.step()?;
            if pacer.wait(started, &self.stop) {
                break;
            }
        }
        Ok(())
    }

    /// Size the screen to the terminal, give the root the whole screen, and
    /// set the initial focus (firing `on_focus`).
    ///
    /// `run` calls this; call it directly only when driving the loop by hand
    /// with [`step`](Self::step).
    pub fn initialize(&mut self) -> Result<(), RunError> {
        let (width, height) = self.backend.size()?;
        let state = &mut self.state;
        state.screen = ScreenBuffer::new(width, height);
        state.screen.invalidate();
        state
            .tree
            .set_bounds(state.root, Rect::new(0, 0, i32::from(width), i32::from(height)))?;
        state.tree.relayout(state.root);
        let focused = state
            .focus
            .initialize(&mut state.tree, state.root, self.config.initial_focus);
        state.running = true;
        info!(width, height, focused = ?focused, "application initialized");
        Ok(())
    }

    /// One iteration: input, resize check, render and flush.
    pub fn step(&mut self) -> io::Result<()> {
        let _span = debug_span!("elaris.app.frame", frame = self.state.frames).entered();

        self.process_input();
        self.check_resize();

        let state = &mut self.state;
        state.screen.clear();
        state.tree.render(state.root, &mut state.screen);
        state.last_flush = state.screen.flush(self.backend.writer())?;
        state.frames += 1;
        trace!(
            cells = state.last_flush.cells_written,
            bytes = state.last_flush.bytes_written,
            "frame flushed"
        );
        Ok(())
    }

    fn process_input(&mut self) {
        let mut timeout = self.config.input_poll_timeout;
        for _ in 0..self.config.max_events_per_frame.max(1) {
            if self.stop.is_stopped() || !self.input.poll(timeout) {
                break;
            }
            timeout = Duration::ZERO;
            if let Some(event) = self.input.read() {
                self.dispatch(event);
            }
        }
    }

    /// Route one event as the loop would.
    pub fn dispatch(&mut self, event: Event) {
        match event {
            Event::Key(key) => self.dispatch_key(&key),
            Event::Mouse(mouse) => self.dispatch_mouse(&mouse),
            // Size is polled once per iteration instead.
            Event::Resize { width, height } => trace!(width, height, "resize event noted"),
        }
    }

    fn dispatch_key(&mut self, key: &KeyEvent) {
        if !key.is_press() {
            trace!(?key, "key release ignored");
            return;
        }
        let state = &mut self.state;
        match self.config.key_bindings.action(key) {
            Some(KeyAction::Quit) => {
                debug!(?key, "quit key");
                self.trigger.stop();
            }
            Some(KeyAction::FocusNext) => {
                state.focus.focus_next(&mut state.tree, state.root);
            }
            Some(KeyAction::FocusPrevious) => {
                state.focus.focus_previous(&mut state.tree, state.root);
            }
            None => match state.focus.focused() {
                Some(target) => {
                    if !state.tree.dispatch_key(target, key) {
                        trace!(?key, %target, "key not consumed");
                    }
                }
                None => trace!(?key, "no focused widget; key dropped"),
            },
        }
    }

    fn dispatch_mouse(&mut self, mouse: &MouseEvent) {
        if !self.config.mouse_capture || !mouse.is_left_click() {
            return;
        }
        let state = &mut self.state;
        let point = mouse.point();
        match state.tree.hit_test(state.root, point) {
            Some(target) => {
                if !state.tree.dispatch_click(target, point) {
                    trace!(%target, ?point, "click not consumed");
                }
            }
            None => trace!(?point, "click hit nothing"),
        }
    }

    fn check_resize(&mut self) {
        let (width, height) = match self.backend.size() {
            Ok(size) => size,
            Err(err) => {
                warn!(%err, "terminal size unavailable; keeping current size");
                return;
            }
        };
        let state = &mut self.state;
        let (old_width, old_height) = (state.screen.width(), state.screen.height());
        if (width, height) == (old_width, old_height) {
            return;
        }
        info!(old_width, old_height, width, height, "terminal resized");
        state.screen.resize(width, height);
        state.screen.invalidate();
        let bounds = Rect::new(0, 0, i32::from(width), i32::from(height));
        if let Err(err) = state.tree.set_bounds(state.root, bounds) {
            warn!(%err, "could not resize root widget");
        }
    }

    fn teardown(&mut self) {
        self.trigger.stop();
        self.input.shutdown();
        self.backend.restore();
        self.state.running = false;
        self.trigger.reset();
        info!(frames = self.state.frames, "application stopped");
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        (*s).to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "non-string panic payload".to_string()
    }
}
