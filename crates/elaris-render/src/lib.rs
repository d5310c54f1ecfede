#![forbid(unsafe_code)]

//! Render kernel: cells, buffers, diffs, ANSI encoding, and the
//! double-buffered screen.

pub mod ansi;
pub mod buffer;
pub mod cell;
pub mod diff;
pub mod drawing;
pub mod presenter;
pub mod screen;

pub use cell::{Cell, PackedRgba, StyleFlags};
pub use drawing::{BorderChars, BorderStyle};
pub use presenter::FlushStats;
pub use screen::ScreenBuffer;
