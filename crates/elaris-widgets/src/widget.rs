#![forbid(unsafe_code)]

//! The widget contract.
//!
//! A [`Widget`] only draws itself and reacts to input; everything structural
//! (bounds, visibility, z-order, parent and children) is owned by the
//! [`WidgetTree`](crate::tree::WidgetTree) and handed to the widget as a
//! read-only [`WidgetState`]. Every hook has a no-op default.

use std::any::Any;
use std::fmt;

use elaris_core::event::KeyEvent;
use elaris_core::geometry::{Point, Rect};
use elaris_render::cell::PackedRgba;
use elaris_render::screen::ScreenBuffer;

/// Handle to a widget stored in a [`WidgetTree`](crate::tree::WidgetTree).
///
/// Handles are generational: once a widget is despawned its id never
/// resolves again, even if the slot is reused.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct WidgetId {
    pub(crate) index: u32,
    pub(crate) generation: u32,
}

impl WidgetId {
    /// Slot index (stable for the widget's lifetime).
    #[inline]
    pub const fn index(self) -> u32 {
        self.index
    }
}

impl fmt::Display for WidgetId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}v{}", self.index, self.generation)
    }
}

/// Structural state of a widget, owned by the tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WidgetState {
    pub(crate) id: WidgetId,
    pub(crate) bounds: Rect,
    pub(crate) visible: bool,
    pub(crate) enabled: bool,
    pub(crate) focused: bool,
    pub(crate) z_index: i32,
    pub(crate) fg: PackedRgba,
    pub(crate) bg: PackedRgba,
    pub(crate) parent: Option<WidgetId>,
    pub(crate) children: Vec<WidgetId>,
}

impl WidgetState {
    pub(crate) fn new(id: WidgetId) -> Self {
        Self {
            id,
            bounds: Rect::default(),
            visible: true,
            enabled: true,
            focused: false,
            z_index: 0,
            fg: PackedRgba::WHITE,
            bg: PackedRgba::TRANSPARENT,
            parent: None,
            children: Vec::new(),
        }
    }

    #[inline]
    pub fn id(&self) -> WidgetId {
        self.id
    }

    #[inline]
    pub fn bounds(&self) -> Rect {
        self.bounds
    }

    #[inline]
    pub fn is_visible(&self) -> bool {
        self.visible
    }

    #[inline]
    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// True while this widget holds input focus.
    #[inline]
    pub fn is_focused(&self) -> bool {
        self.focused
    }

    #[inline]
    pub fn z_index(&self) -> i32 {
        self.z_index
    }

    /// Foreground color (default opaque white).
    #[inline]
    pub fn fg(&self) -> PackedRgba {
        self.fg
    }

    /// Background color (default transparent).
    #[inline]
    pub fn bg(&self) -> PackedRgba {
        self.bg
    }

    #[inline]
    pub fn parent(&self) -> Option<WidgetId> {
        self.parent
    }

    /// Children in paint order (ascending z, ties by attach order).
    #[inline]
    pub fn children(&self) -> &[WidgetId] {
        &self.children
    }
}

/// Object-safe access to `Any`, so trees can hand out concrete widget types.
pub trait AsAny: Any {
    fn as_any(&self) -> &dyn Any;
    fn as_any_mut(&mut self) -> &mut dyn Any;
}

impl<T: Any> AsAny for T {
    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}

/// A renderable, optionally interactive node of the widget tree.
///
/// `render` draws only this widget; the tree renders children afterwards in
/// z-order. Children are not clipped to the parent's bounds. `render` must
/// tolerate zero or negative sizes by drawing nothing.
pub trait Widget: AsAny {
    /// Draw this widget into the back grid.
    fn render(&self, state: &WidgetState, screen: &mut ScreenBuffer);

    /// React to a key while focused. Return `true` if the key was consumed.
    ///
    /// Unconsumed keys are dropped; they do not bubble to ancestors.
    fn handle_key(&mut self, _key: &KeyEvent, _state: &WidgetState) -> bool {
        false
    }

    /// React to a left click inside this widget's bounds.
    fn handle_click(&mut self, _point: Point, _state: &WidgetState) -> bool {
        false
    }

    /// Whether this widget can take keyboard focus.
    fn is_focusable(&self) -> bool {
        false
    }

    fn on_focus(&mut self, _state: &WidgetState) {}

    fn on_blur(&mut self, _state: &WidgetState) {}

    fn on_bounds_changed(&mut self, _state: &WidgetState) {}

    fn on_visible_changed(&mut self, _state: &WidgetState) {}

    fn on_enabled_changed(&mut self, _state: &WidgetState) {}

    fn on_child_added(&mut self, _child: WidgetId, _state: &WidgetState) {}

    fn on_child_removed(&mut self, _child: WidgetId, _state: &WidgetState) {}
}
