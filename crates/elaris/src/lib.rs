#![forbid(unsafe_code)]

//! Elaris public facade crate.
//!
//! Re-exports the types an application needs from the layer crates, a
//! [`prelude`] for day-to-day use, a top-level [`Error`], and a logging
//! bootstrap that keeps log output off the terminal the UI is drawing on.
//!
//! ```no_run
//! use elaris::prelude::*;
//!
//! fn main() -> elaris::Result<()> {
//!     let mut tree = WidgetTree::new();
//!     let root = tree.insert(Label::new("Hello, world"));
//!     let mut app = Application::new(CrosstermBackend::new(), CrosstermInput::new(), tree, root);
//!     app.run()?;
//!     Ok(())
//! }
//! ```

pub mod logging;

// --- Core re-exports -------------------------------------------------------

pub use elaris_core::event::{
    Event, KeyCode, KeyEvent, KeyEventKind, Modifiers, MouseButton, MouseEvent, MouseEventKind,
};
pub use elaris_core::geometry::{Point, Rect, Sides};
pub use elaris_core::terminal_session::{SessionOptions, TerminalSession};

// --- Render re-exports -----------------------------------------------------

pub use elaris_render::cell::{Cell, PackedRgba, StyleFlags};
pub use elaris_render::drawing::{BorderChars, BorderStyle};
pub use elaris_render::presenter::FlushStats;
pub use elaris_render::screen::ScreenBuffer;

// --- Layout and widget re-exports -----------------------------------------

pub use elaris_layout::{Layout, LayoutPolicy};
pub use elaris_widgets::{
    Alignment, Container, FocusController, Label, Panel, TreeError, Widget, WidgetId, WidgetState,
    WidgetTree,
};

// --- Runtime re-exports ----------------------------------------------------

pub use elaris_runtime::{
    AppConfig, AppHandle, Application, CrosstermBackend, CrosstermInput, HeadlessBackend,
    KeyBinding, KeyBindings, RunError, ScriptedInput,
};

// --- Errors ---------------------------------------------------------------

/// Top-level error type for Elaris apps.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// I/O failure during terminal operations.
    #[error("terminal I/O failed: {0}")]
    Io(#[from] std::io::Error),
    /// A structural widget-tree operation was rejected.
    #[error(transparent)]
    Tree(#[from] TreeError),
    /// The application loop failed.
    #[error(transparent)]
    Run(#[from] RunError),
    /// Logging could not be installed.
    #[error("logging setup failed: {0}")]
    Logging(String),
}

/// Standard result type for Elaris APIs.
pub type Result<T> = std::result::Result<T, Error>;

// --- Prelude --------------------------------------------------------------

pub mod prelude {
    pub use crate::{
        AppConfig, AppHandle, Application, BorderStyle, Cell, Container, CrosstermBackend,
        CrosstermInput, Error, Event, KeyCode, KeyEvent, Label, Layout, LayoutPolicy, Modifiers,
        PackedRgba, Panel, Point, Rect, Result, ScreenBuffer, StyleFlags, Widget, WidgetId,
        WidgetState, WidgetTree,
    };

    pub use crate::{core, layout, render, runtime, widgets};
}

pub use elaris_core as core;
pub use elaris_layout as layout;
pub use elaris_render as render;
pub use elaris_runtime as runtime;
pub use elaris_widgets as widgets;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn errors_convert_with_question_mark() {
        fn tree_op() -> Result<()> {
            let mut tree = WidgetTree::new();
            let a = tree.insert(Container::new());
            tree.add_child(a, a)?;
            Ok(())
        }
        assert!(matches!(tree_op(), Err(Error::Tree(_))));

        let io: Error = std::io::Error::other("gone").into();
        assert_eq!(io.to_string(), "terminal I/O failed: gone");
        let run: Error = RunError::AlreadyRunning.into();
        assert_eq!(run.to_string(), "application is already running");
    }
}
