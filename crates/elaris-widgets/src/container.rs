#![forbid(unsafe_code)]

//! Layout container.
//!
//! [`Container`] draws nothing but its optional background; its job is to
//! carry a [`Layout`] in the tree so its children get arranged. The helpers
//! on [`WidgetTree`] insert one with its layout already attached.

use elaris_core::geometry::Rect;
use elaris_layout::Layout;
use elaris_render::screen::ScreenBuffer;

use crate::tree::WidgetTree;
use crate::widget::{Widget, WidgetId, WidgetState};

/// A widget whose only purpose is to hold and arrange children.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Container;

impl Container {
    pub fn new() -> Self {
        Self
    }
}

impl Widget for Container {
    fn render(&self, state: &WidgetState, screen: &mut ScreenBuffer) {
        // Transparent by default, in which case this is a no-op.
        screen.fill_rect(state.bounds(), ' ', state.fg(), state.bg());
    }
}

impl WidgetTree {
    /// Insert a [`Container`] with `layout` and `bounds`.
    pub fn insert_container(&mut self, layout: Layout, bounds: Rect) -> WidgetId {
        let id = self.insert_with_bounds(Container::new(), bounds);
        // The id was just created, so this cannot fail.
        let _ = self.set_layout(id, layout);
        id
    }
}
