#![forbid(unsafe_code)]

//! Widget tree, layout containers, focus, and reference widgets.
//!
//! - [`WidgetTree`] owns every widget and the parent/child graph
//! - [`Widget`] is the contract a concrete widget implements
//! - [`FocusController`] derives the focus order and tracks the holder
//! - [`Container`], [`Label`] and [`Panel`] are small building blocks

pub mod container;
pub mod focus;
pub mod label;
pub mod panel;
pub mod tree;
pub mod widget;

pub use container::Container;
pub use focus::FocusController;
pub use label::{Alignment, Label};
pub use panel::Panel;
pub use tree::{ResizeCallback, TreeError, WidgetTree};
pub use widget::{AsAny, Widget, WidgetId, WidgetState};
