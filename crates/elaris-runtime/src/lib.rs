#![forbid(unsafe_code)]

//! Elaris runtime
//!
//! Ties a [`WidgetTree`](elaris_widgets::WidgetTree) to a terminal: the
//! [`Application`] loop reads input, dispatches it through focus, keeps the
//! screen sized to the terminal, and flushes one frame per iteration at a
//! fixed cadence.
//!
//! # Key Components
//!
//! - [`Application`] - the loop, plus [`AppHandle`] to stop it from elsewhere
//! - [`AppConfig`] / [`KeyBindings`] - cadence, reserved keys, terminal modes
//! - [`Backend`] - [`CrosstermBackend`] for a real terminal, [`HeadlessBackend`] for tests
//! - [`InputSource`] - [`CrosstermInput`], [`ChannelInput`], [`ScriptedInput`]
//! - [`FramePacer`] - sleeps out the remainder of each frame
//! - [`Debouncer`] - latest-wins delayed work

pub mod app;
pub mod backend;
pub mod config;
pub mod debounce;
pub mod input;
pub mod pacing;
pub mod stop;

pub use app::{AppHandle, Application, LoopState, RunError};
pub use backend::{Backend, CrosstermBackend, HeadlessBackend};
pub use config::{AppConfig, KeyAction, KeyBinding, KeyBindings};
pub use debounce::{DebounceTicket, Debouncer};
pub use input::{ChannelInput, CrosstermInput, InputSource, ScriptedInput};
pub use pacing::FramePacer;
pub use stop::{StopSignal, StopTrigger};
