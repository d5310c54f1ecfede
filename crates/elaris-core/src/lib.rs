#![forbid(unsafe_code)]

//! Core: geometry, input events, and the terminal session guard.

pub mod event;
pub mod geometry;
pub mod terminal_session;

pub use geometry::{Point, Rect, Sides};
