#![forbid(unsafe_code)]

//! Arena-backed widget tree.
//!
//! Widgets live in a slot arena and are addressed by generational
//! [`WidgetId`]s. Parents own their children through an ordered id list;
//! each child keeps a non-owning back-reference to its parent. The tree is a
//! strict forest: attaching a widget that already has a parent, or one that
//! would close a cycle, is refused and leaves the tree untouched.
//!
//! # Child order
//!
//! A parent's children are kept sorted by `(z_index, attach order)`. That is
//! the paint order for [`render`](WidgetTree::render), the traversal order
//! for focus, and (reversed) the search order for
//! [`hit_test`](WidgetTree::hit_test).
//!
//! # Hooks
//!
//! Setters fire the matching [`Widget`] hook only when the value actually
//! changes. A widget carrying a [`Layout`] re-arranges its direct children
//! after every bounds change and after every child add/remove.

use std::fmt;

use elaris_core::event::KeyEvent;
use elaris_core::geometry::{Point, Rect};
use elaris_layout::{ChildSlot, Layout, LayoutPolicy};
use elaris_render::cell::PackedRgba;
use elaris_render::screen::ScreenBuffer;
use tracing::{debug, trace, warn};

use crate::widget::{Widget, WidgetId, WidgetState};

/// Structural errors. A failed call never modifies the tree.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum TreeError {
    #[error("widget {child} is already attached to {parent}")]
    AlreadyParented { child: WidgetId, parent: WidgetId },
    #[error("widget {child} is not a child of {parent}")]
    NotAChild { child: WidgetId, parent: WidgetId },
    #[error("unknown widget {0}")]
    UnknownWidget(WidgetId),
    #[error("attaching {child} under {parent} would create a cycle")]
    WouldCycle { child: WidgetId, parent: WidgetId },
}

/// Called after a container's bounds change (and after its layout ran) with
/// the new width and height.
pub type ResizeCallback = Box<dyn FnMut(&mut WidgetTree, WidgetId, i32, i32)>;

struct Node {
    widget: Box<dyn Widget>,
    state: WidgetState,
    layout: Option<Layout>,
    on_resize: Option<ResizeCallback>,
    attach_seq: u64,
}

struct Slot {
    generation: u32,
    node: Option<Node>,
}

/// Owner of every widget and of the parent/child graph between them.
#[derive(Default)]
pub struct WidgetTree {
    slots: Vec<Slot>,
    free: Vec<u32>,
    next_seq: u64,
    len: usize,
}

impl fmt::Debug for WidgetTree {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("WidgetTree")
            .field("len", &self.len)
            .field("slots", &self.slots.len())
            .finish()
    }
}

impl WidgetTree {
    pub fn new() -> Self {
        Self::default()
    }

    // ── Arena ───────────────────────────────────────────────────────────

    fn node(&self, id: WidgetId) -> Option<&Node> {
        let slot = self.slots.get(id.index as usize)?;
        if slot.generation != id.generation {
            return None;
        }
        slot.node.as_ref()
    }

    fn node_mut(&mut self, id: WidgetId) -> Option<&mut Node> {
        let slot = self.slots.get_mut(id.index as usize)?;
        if slot.generation != id.generation {
            return None;
        }
        slot.node.as_mut()
    }

    fn require(&self, id: WidgetId) -> Result<&Node, TreeError> {
        self.node(id).ok_or(TreeError::UnknownWidget(id))
    }

    fn require_mut(&mut self, id: WidgetId) -> Result<&mut Node, TreeError> {
        self.node_mut(id).ok_or(TreeError::UnknownWidget(id))
    }

    /// Add a detached widget to the arena.
    pub fn insert<W: Widget>(&mut self, widget: W) -> WidgetId {
        self.insert_boxed(Box::new(widget))
    }

    /// Add a detached widget with initial bounds.
    pub fn insert_with_bounds<W: Widget>(&mut self, widget: W, bounds: Rect) -> WidgetId {
        let id = self.insert(widget);
        self.update_bounds(id, bounds);
        id
    }

    /// Add an already boxed widget.
    pub fn insert_boxed(&mut self, widget: Box<dyn Widget>) -> WidgetId {
        let id = match self.free.pop() {
            Some(index) => WidgetId {
                index,
                generation: self.slots[index as usize].generation,
            },
            None => {
                let index = self.slots.len() as u32;
                self.slots.push(Slot {
                    generation: 0,
                    node: None,
                });
                WidgetId {
                    index,
                    generation: 0,
                }
            }
        };
        self.slots[id.index as usize].node = Some(Node {
            widget,
            state: WidgetState::new(id),
            layout: None,
            on_resize: None,
            attach_seq: 0,
        });
        self.len += 1;
        trace!(widget = %id, "widget inserted");
        id
    }

    /// Number of live widgets.
    #[inline]
    pub fn len(&self) -> usize {
        self.len
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// True if `id` refers to a live widget.
    #[inline]
    pub fn contains(&self, id: WidgetId) -> bool {
        self.node(id).is_some()
    }

    /// Live widget ids in slot order.
    pub fn ids(&self) -> impl Iterator<Item = WidgetId> + '_ {
        self.slots
            .iter()
            .filter_map(|slot| slot.node.as_ref().map(|node| node.state.id))
    }

    // ── Structure ───────────────────────────────────────────────────────

    /// True if `ancestor` appears on the parent chain of `id`.
    pub fn is_ancestor(&self, ancestor: WidgetId, id: WidgetId) -> bool {
        let mut cursor = self.parent(id);
        while let Some(current) = cursor {
            if current == ancestor {
                return true;
            }
            cursor = self.parent(current);
        }
        false
    }

    /// Attach `child` under `parent`.
    ///
    /// Fails if either id is unknown, if `child` already has a parent, or if
    /// `child` is `parent` itself or one of its ancestors.
    pub fn add_child(&mut self, parent: WidgetId, child: WidgetId) -> Result<(), TreeError> {
        self.require(parent)?;
        if let Some(existing) = self.require(child)?.state.parent {
            warn!(child = %child, parent = %existing, "widget already has a parent");
            return Err(TreeError::AlreadyParented {
                child,
                parent: existing,
            });
        }
        if child == parent || self.is_ancestor(child, parent) {
            warn!(child = %child, parent = %parent, "refusing to create a cycle");
            return Err(TreeError::WouldCycle { child, parent });
        }

        let seq = self.next_seq;
        self.next_seq += 1;
        if let Some(node) = self.node_mut(child) {
            node.state.parent = Some(parent);
            node.attach_seq = seq;
        }
        if let Some(node) = self.node_mut(parent) {
            node.state.children.push(child);
        }
        self.sort_children(parent);

        if let Some(node) = self.node_mut(parent) {
            node.widget.on_child_added(child, &node.state);
        }
        self.relayout(parent);
        Ok(())
    }

    /// Detach `child` from `parent`. Fails with [`TreeError::NotAChild`] if
    /// it is not currently one of `parent`'s children.
    pub fn remove_child(&mut self, parent: WidgetId, child: WidgetId) -> Result<(), TreeError> {
        let node = self.require_mut(parent)?;
        let Some(pos) = node.state.children.iter().position(|&c| c == child) else {
            return Err(TreeError::NotAChild { child, parent });
        };
        node.state.children.remove(pos);

        if let Some(child_node) = self.node_mut(child) {
            child_node.state.parent = None;
        }
        if let Some(node) = self.node_mut(parent) {
            node.widget.on_child_removed(child, &node.state);
        }
        self.relayout(parent);
        Ok(())
    }

    /// Detach every child of `parent`.
    pub fn clear_children(&mut self, parent: WidgetId) -> Result<(), TreeError> {
        let children = self.require(parent)?.state.children.clone();
        for child in children {
            self.remove_child(parent, child)?;
        }
        Ok(())
    }

    /// Detach `id` from its parent and drop it together with its whole
    /// subtree. Their ids never resolve again.
    pub fn despawn(&mut self, id: WidgetId) -> Result<(), TreeError> {
        if let Some(parent) = self.require(id)?.state.parent {
            self.remove_child(parent, id)?;
        }

        let mut stack = vec![id];
        while let Some(current) = stack.pop() {
            let Some(slot) = self.slots.get_mut(current.index as usize) else {
                continue;
            };
            if slot.generation != current.generation {
                continue;
            }
            if let Some(node) = slot.node.take() {
                stack.extend(node.state.children.iter().copied());
                slot.generation = slot.generation.wrapping_add(1);
                self.free.push(current.index);
                self.len -= 1;
            }
        }
        debug!(widget = %id, "widget despawned");
        Ok(())
    }

    fn sort_children(&mut self, parent: WidgetId) {
        let Some(node) = self.node_mut(parent) else {
            return;
        };
        let mut children = std::mem::take(&mut node.state.children);
        children.sort_by_key(|&c| {
            self.node(c)
                .map(|n| (n.state.z_index, n.attach_seq))
                .unwrap_or((i32::MAX, u64::MAX))
        });
        if let Some(node) = self.node_mut(parent) {
            node.state.children = children;
        }
    }

    // ── Queries ─────────────────────────────────────────────────────────

    /// Structural state of a widget.
    pub fn state(&self, id: WidgetId) -> Option<&WidgetState> {
        self.node(id).map(|n| &n.state)
    }

    pub fn parent(&self, id: WidgetId) -> Option<WidgetId> {
        self.node(id).and_then(|n| n.state.parent)
    }

    /// Children in paint order. Empty for unknown ids.
    pub fn children(&self, id: WidgetId) -> &[WidgetId] {
        match self.node(id) {
            Some(node) => &node.state.children,
            None => &[],
        }
    }

    /// The top of `id`'s parent chain (possibly `id` itself).
    pub fn root_of(&self, id: WidgetId) -> Option<WidgetId> {
        let mut current = self.node(id)?.state.id;
        while let Some(parent) = self.parent(current) {
            current = parent;
        }
        Some(current)
    }

    pub fn bounds(&self, id: WidgetId) -> Option<Rect> {
        self.node(id).map(|n| n.state.bounds)
    }

    /// The layout a container applies to its children, if any.
    pub fn layout(&self, id: WidgetId) -> Option<Layout> {
        self.node(id).and_then(|n| n.layout)
    }

    /// Whether the widget reports itself focusable.
    pub fn is_focusable(&self, id: WidgetId) -> bool {
        self.node(id).is_some_and(|n| n.widget.is_focusable())
    }

    /// Borrow the concrete widget behind `id`.
    pub fn widget<T: Widget>(&self, id: WidgetId) -> Option<&T> {
        let widget: &dyn Widget = self.node(id)?.widget.as_ref();
        widget.as_any().downcast_ref::<T>()
    }

    /// Mutably borrow the concrete widget behind `id`.
    pub fn widget_mut<T: Widget>(&mut self, id: WidgetId) -> Option<&mut T> {
        let widget: &mut dyn Widget = self.node_mut(id)?.widget.as_mut();
        widget.as_any_mut().downcast_mut::<T>()
    }

    // ── Properties ──────────────────────────────────────────────────────

    /// Apply new bounds: hook, layout, resize callback. Returns false for an
    /// unknown id.
    fn update_bounds(&mut self, id: WidgetId, bounds: Rect) -> bool {
        let Some(node) = self.node_mut(id) else {
            return false;
        };
        if node.state.bounds == bounds {
            return true;
        }
        node.state.bounds = bounds;
        node.widget.on_bounds_changed(&node.state);
        self.relayout(id);
        self.run_resize_callback(id);
        true
    }

    fn run_resize_callback(&mut self, id: WidgetId) {
        let Some(node) = self.node_mut(id) else {
            return;
        };
        let Some(mut callback) = node.on_resize.take() else {
            return;
        };
        let Rect { width, height, .. } = node.state.bounds;
        callback(self, id, width, height);
        if let Some(node) = self.node_mut(id) {
            if node.on_resize.is_none() {
                node.on_resize = Some(callback);
            }
        }
    }

    pub fn set_bounds(&mut self, id: WidgetId, bounds: Rect) -> Result<(), TreeError> {
        self.require(id)?;
        self.update_bounds(id, bounds);
        Ok(())
    }

    pub fn set_x(&mut self, id: WidgetId, x: i32) -> Result<(), TreeError> {
        let b = self.require(id)?.state.bounds;
        self.set_bounds(id, b.with_position(x, b.y))
    }

    pub fn set_y(&mut self, id: WidgetId, y: i32) -> Result<(), TreeError> {
        let b = self.require(id)?.state.bounds;
        self.set_bounds(id, b.with_position(b.x, y))
    }

    pub fn set_width(&mut self, id: WidgetId, width: i32) -> Result<(), TreeError> {
        let b = self.require(id)?.state.bounds;
        self.set_bounds(id, b.with_size(width, b.height))
    }

    pub fn set_height(&mut self, id: WidgetId, height: i32) -> Result<(), TreeError> {
        let b = self.require(id)?.state.bounds;
        self.set_bounds(id, b.with_size(b.width, height))
    }

    pub fn set_visible(&mut self, id: WidgetId, visible: bool) -> Result<(), TreeError> {
        let node = self.require_mut(id)?;
        if node.state.visible != visible {
            node.state.visible = visible;
            node.widget.on_visible_changed(&node.state);
        }
        Ok(())
    }

    pub fn set_enabled(&mut self, id: WidgetId, enabled: bool) -> Result<(), TreeError> {
        let node = self.require_mut(id)?;
        if node.state.enabled != enabled {
            node.state.enabled = enabled;
            node.widget.on_enabled_changed(&node.state);
        }
        Ok(())
    }

    /// Change paint order among siblings. The parent's child list is
    /// re-sorted (stable: equal z keeps attach order).
    pub fn set_z_index(&mut self, id: WidgetId, z_index: i32) -> Result<(), TreeError> {
        let node = self.require_mut(id)?;
        if node.state.z_index == z_index {
            return Ok(());
        }
        node.state.z_index = z_index;
        if let Some(parent) = node.state.parent {
            self.sort_children(parent);
        }
        Ok(())
    }

    pub fn set_colors(&mut self, id: WidgetId, fg: PackedRgba, bg: PackedRgba) -> Result<(), TreeError> {
        let node = self.require_mut(id)?;
        node.state.fg = fg;
        node.state.bg = bg;
        Ok(())
    }

    // ── Layout ──────────────────────────────────────────────────────────

    /// Give `id` a layout and arrange its children immediately.
    pub fn set_layout(&mut self, id: WidgetId, layout: Layout) -> Result<(), TreeError> {
        self.require_mut(id)?.layout = Some(layout);
        self.relayout(id);
        Ok(())
    }

    fn edit_layout(&mut self, id: WidgetId, edit: impl FnOnce(&mut Layout)) -> Result<(), TreeError> {
        let mut layout = self.require(id)?.layout.unwrap_or_default();
        edit(&mut layout);
        self.set_layout(id, layout)
    }

    pub fn set_policy(&mut self, id: WidgetId, policy: LayoutPolicy) -> Result<(), TreeError> {
        self.edit_layout(id, |l| l.set_policy(policy))
    }

    /// Clamped to ≥ 0.
    pub fn set_padding(&mut self, id: WidgetId, padding: i32) -> Result<(), TreeError> {
        self.edit_layout(id, |l| l.set_padding(padding))
    }

    /// Clamped to ≥ 0.
    pub fn set_spacing(&mut self, id: WidgetId, spacing: i32) -> Result<(), TreeError> {
        self.edit_layout(id, |l| l.set_spacing(spacing))
    }

    /// Install a callback run after every bounds change of `id`.
    pub fn set_on_resize<F>(&mut self, id: WidgetId, callback: F) -> Result<(), TreeError>
    where
        F: FnMut(&mut WidgetTree, WidgetId, i32, i32) + 'static,
    {
        self.require_mut(id)?.on_resize = Some(Box::new(callback));
        Ok(())
    }

    /// Re-arrange `id`'s direct children under its layout.
    ///
    /// A no-op for widgets without a layout or without children.
    pub fn relayout(&mut self, id: WidgetId) {
        let Some(node) = self.node(id) else {
            return;
        };
        let Some(layout) = node.layout else {
            return;
        };
        if node.state.children.is_empty() {
            return;
        }
        let area = node.state.bounds;
        let children = node.state.children.clone();
        let slots: Vec<ChildSlot> = children
            .iter()
            .map(|&c| match self.node(c) {
                Some(n) => ChildSlot::new(n.state.bounds).with_visible(n.state.visible),
                None => ChildSlot::new(Rect::default()).with_visible(false),
            })
            .collect();

        for (child, placed) in children.into_iter().zip(layout.arrange(area, &slots)) {
            if let Some(rect) = placed {
                self.update_bounds(child, rect);
            }
        }
    }

    // ── Rendering and input ─────────────────────────────────────────────

    /// Draw `id` and then its children in paint order. Invisible widgets
    /// skip their whole subtree.
    pub fn render(&self, id: WidgetId, screen: &mut ScreenBuffer) {
        let Some(node) = self.node(id) else {
            return;
        };
        if !node.state.visible {
            return;
        }
        node.widget.render(&node.state, screen);
        for &child in &node.state.children {
            self.render(child, screen);
        }
    }

    /// The top-most visible widget under `point` in `id`'s subtree.
    ///
    /// Children are searched in reverse paint order before their parent, so
    /// the deepest, last-painted widget wins.
    pub fn hit_test(&self, id: WidgetId, point: Point) -> Option<WidgetId> {
        let node = self.node(id)?;
        if !node.state.visible {
            return None;
        }
        node.state
            .children
            .iter()
            .rev()
            .find_map(|&child| self.hit_test(child, point))
            .or_else(|| node.state.bounds.contains(point).then_some(id))
    }

    /// Deliver a key to one widget. Returns whether it was consumed.
    pub fn dispatch_key(&mut self, id: WidgetId, key: &KeyEvent) -> bool {
        match self.node_mut(id) {
            Some(node) => node.widget.handle_key(key, &node.state),
            None => false,
        }
    }

    /// Deliver a click to one widget. Returns whether it was consumed.
    pub fn dispatch_click(&mut self, id: WidgetId, point: Point) -> bool {
        match self.node_mut(id) {
            Some(node) => node.widget.handle_click(point, &node.state),
            None => false,
        }
    }

    /// Set the focused flag and fire `on_focus`/`on_blur`.
    pub(crate) fn set_focused_flag(&mut self, id: WidgetId, focused: bool) {
        let Some(node) = self.node_mut(id) else {
            return;
        };
        node.state.focused = focused;
        if focused {
            node.widget.on_focus(&node.state);
        } else {
            node.widget.on_blur(&node.state);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::rc::Rc;

    type Log = Rc<RefCell<Vec<String>>>;

    struct Probe {
        name: &'static str,
        log: Log,
        glyph: char,
    }

    impl Probe {
        fn new(name: &'static str, log: &Log) -> Self {
            Self {
                name,
                log: Rc::clone(log),
                glyph: name.chars().next().unwrap_or('?'),
            }
        }

        fn push(&self, event: &str) {
            self.log.borrow_mut().push(format!("{}:{event}", self.name));
        }
    }

    impl Widget for Probe {
        fn render(&self, state: &WidgetState, screen: &mut ScreenBuffer) {
            self.push("render");
            let b = state.bounds();
            if b.is_drawable() {
                screen.set_cell(b.x, b.y, elaris_render::cell::Cell::new(self.glyph));
            }
        }

        fn on_bounds_changed(&mut self, _: &WidgetState) {
            self.push("bounds");
        }

        fn on_visible_changed(&mut self, _: &WidgetState) {
            self.push("visible");
        }

        fn on_enabled_changed(&mut self, _: &WidgetState) {
            self.push("enabled");
        }

        fn on_child_added(&mut self, _: WidgetId, _: &WidgetState) {
            self.push("child+");
        }

        fn on_child_removed(&mut self, _: WidgetId, _: &WidgetState) {
            self.push("child-");
        }
    }

    fn log() -> Log {
        Rc::new(RefCell::new(Vec::new()))
    }

    fn take(log: &Log) -> Vec<String> {
        std::mem::take(&mut *log.borrow_mut())
    }

    #[test]
    fn second_add_of_parented_child_fails_and_changes_nothing() {
        let l = log();
        let mut tree = WidgetTree::new();
        let a = tree.insert(Probe::new("a", &l));
        let b = tree.insert(Probe::new("b", &l));
        let c = tree.insert(Probe::new("c", &l));

        tree.add_child(a, c).unwrap();
        take(&l);
        assert_eq!(
            tree.add_child(b, c),
            Err(TreeError::AlreadyParented { child: c, parent: a })
        );
        assert_eq!(tree.parent(c), Some(a));
        assert!(tree.children(b).is_empty());
        assert!(take(&l).is_empty());
    }

    #[test]
    fn remove_then_re_add_succeeds() {
        let l = log();
        let mut tree = WidgetTree::new();
        let a = tree.insert(Probe::new("a", &l));
        let b = tree.insert(Probe::new("b", &l));
        let c = tree.insert(Probe::new("c", &l));

        tree.add_child(a, c).unwrap();
        tree.remove_child(a, c).unwrap();
        assert_eq!(tree.parent(c), None);
        tree.add_child(b, c).unwrap();
        assert_eq!(tree.children(b), &[c]);
        assert_eq!(take(&l), ["a:child+", "a:child-", "b:child+"]);
    }

    #[test]
    fn removing_a_non_child_fails() {
        let l = log();
        let mut tree = WidgetTree::new();
        let a = tree.insert(Probe::new("a", &l));
        let b = tree.insert(Probe::new("b", &l));
        assert_eq!(
            tree.remove_child(a, b),
            Err(TreeError::NotAChild { child: b, parent: a })
        );
    }

    #[test]
    fn cycles_are_refused() {
        let l = log();
        let mut tree = WidgetTree::new();
        let a = tree.insert(Probe::new("a", &l));
        let b = tree.insert(Probe::new("b", &l));
        tree.add_child(a, b).unwrap();

        assert_eq!(tree.add_child(a, a), Err(TreeError::WouldCycle { child: a, parent: a }));
        assert_eq!(tree.add_child(b, a), Err(TreeError::WouldCycle { child: a, parent: b }));
        assert_eq!(tree.root_of(b), Some(a));
    }

    #[test]
    fn despawn_drops_subtree_and_invalidates_ids() {
        let l = log();
        let mut tree = WidgetTree::new();
        let root = tree.insert(Probe::new("r", &l));
        let mid = tree.insert(Probe::new("m", &l));
        let leaf = tree.insert(Probe::new("l", &l));
        tree.add_child(root, mid).unwrap();
        tree.add_child(mid, leaf).unwrap();

        tree.despawn(mid).unwrap();
        assert_eq!(tree.len(), 1);
        assert!(!tree.contains(mid));
        assert!(!tree.contains(leaf));
        assert!(tree.children(root).is_empty());

        let fresh = tree.insert(Probe::new("f", &l));
        assert!(fresh != mid && fresh != leaf);
        assert_eq!(tree.despawn(leaf), Err(TreeError::UnknownWidget(leaf)));
    }

    #[test]
    fn setters_fire_hooks_only_on_change() {
        let l = log();
        let mut tree = WidgetTree::new();
        let a = tree.insert(Probe::new("a", &l));

        tree.set_bounds(a, Rect::new(0, 0, 5, 5)).unwrap();
        tree.set_bounds(a, Rect::new(0, 0, 5, 5)).unwrap();
        tree.set_x(a, 0).unwrap();
        tree.set_width(a, 6).unwrap();
        tree.set_visible(a, true).unwrap();
        tree.set_visible(a, false).unwrap();
        tree.set_enabled(a, false).unwrap();
        tree.set_enabled(a, false).unwrap();

        assert_eq!(take(&l), ["a:bounds", "a:bounds", "a:visible", "a:enabled"]);
        assert_eq!(tree.bounds(a), Some(Rect::new(0, 0, 6, 5)));
    }

    #[test]
    fn z_order_sort_is_stable_and_reversible() {
        let l = log();
        let mut tree = WidgetTree::new();
        let root = tree.insert(Probe::new("r", &l));
        let ids: Vec<_> = ["a", "b", "c"]
            .into_iter()
            .map(|n| tree.insert(Probe::new(n, &l)))
            .collect();
        for &id in &ids {
            tree.add_child(root, id).unwrap();
        }

        tree.set_z_index(ids[0], 5).unwrap();
        assert_eq!(tree.children(root), &[ids[1], ids[2], ids[0]]);
        tree.set_z_index(ids[0], 0).unwrap();
        assert_eq!(tree.children(root), ids.as_slice());
        tree.set_z_index(ids[2], -1).unwrap();
        assert_eq!(tree.children(root), &[ids[2], ids[0], ids[1]]);
    }

    #[test]
    fn render_walks_z_order_and_skips_invisible_subtrees() {
        let l = log();
        let mut tree = WidgetTree::new();
        let root = tree.insert(Probe::new("r", &l));
        let a = tree.insert(Probe::new("a", &l));
        let b = tree.insert(Probe::new("b", &l));
        let hidden = tree.insert(Probe::new("h", &l));
        let under_hidden = tree.insert(Probe::new("u", &l));
        tree.add_child(root, a).unwrap();
        tree.add_child(root, b).unwrap();
        tree.add_child(root, hidden).unwrap();
        tree.add_child(hidden, under_hidden).unwrap();
        tree.set_z_index(a, 1).unwrap();
        tree.set_visible(hidden, false).unwrap();
        take(&l);

        let mut screen = ScreenBuffer::new(4, 4);
        tree.render(root, &mut screen);
        assert_eq!(take(&l), ["r:render", "b:render", "a:render"]);
    }

    #[test]
    fn children_may_draw_outside_parent() {
        let l = log();
        let mut tree = WidgetTree::new();
        let root = tree.insert_with_bounds(Probe::new("r", &l), Rect::new(0, 0, 1, 1));
        let child = tree.insert_with_bounds(Probe::new("c", &l), Rect::new(3, 2, 1, 1));
        tree.add_child(root, child).unwrap();

        let mut screen = ScreenBuffer::new(5, 5);
        tree.render(root, &mut screen);
        assert_eq!(screen.back().get(3, 2).map(|c| c.ch), Some('c'));
    }

    #[test]
    fn hit_test_prefers_topmost_deepest() {
        let l = log();
        let mut tree = WidgetTree::new();
        let root = tree.insert_with_bounds(Probe::new("r", &l), Rect::new(0, 0, 20, 20));
        let low = tree.insert_with_bounds(Probe::new("l", &l), Rect::new(0, 0, 10, 10));
        let high = tree.insert_with_bounds(Probe::new("h", &l), Rect::new(5, 5, 10, 10));
        let inner = tree.insert_with_bounds(Probe::new("i", &l), Rect::new(6, 6, 2, 2));
        tree.add_child(root, low).unwrap();
        tree.add_child(root, high).unwrap();
        tree.add_child(high, inner).unwrap();

        assert_eq!(tree.hit_test(root, Point::new(6, 6)), Some(inner));
        assert_eq!(tree.hit_test(root, Point::new(9, 9)), Some(high));
        assert_eq!(tree.hit_test(root, Point::new(1, 1)), Some(low));
        assert_eq!(tree.hit_test(root, Point::new(19, 0)), Some(root));
        assert_eq!(tree.hit_test(root, Point::new(30, 30)), None);

        tree.set_z_index(low, 9).unwrap();
        assert_eq!(tree.hit_test(root, Point::new(7, 7)), Some(low));
        tree.set_visible(low, false).unwrap();
        assert_eq!(tree.hit_test(root, Point::new(7, 7)), Some(inner));
    }

    #[test]
    fn vertical_container_relayouts_on_add_remove_and_bounds() {
        let l = log();
        let mut tree = WidgetTree::new();
        let root = tree.insert_with_bounds(Probe::new("r", &l), Rect::new(0, 0, 40, 20));
        tree.set_layout(
            root,
            Layout::new(LayoutPolicy::Vertical).with_padding(1).with_spacing(1),
        )
        .unwrap();
        let a = tree.insert_with_bounds(Probe::new("a", &l), Rect::new(0, 0, 3, 3));
        let b = tree.insert_with_bounds(Probe::new("b", &l), Rect::new(0, 0, 3, 3));
        tree.add_child(root, a).unwrap();
        tree.add_child(root, b).unwrap();

        assert_eq!(tree.bounds(a), Some(Rect::new(1, 1, 38, 3)));
        assert_eq!(tree.bounds(b), Some(Rect::new(1, 5, 38, 3)));

        tree.remove_child(root, a).unwrap();
        assert_eq!(tree.bounds(b), Some(Rect::new(1, 1, 38, 3)));

        tree.set_width(root, 20).unwrap();
        assert_eq!(tree.bounds(b), Some(Rect::new(1, 1, 18, 3)));

        tree.set_padding(root, -3).unwrap();
        assert_eq!(tree.layout(root).map(|l| l.padding()), Some(0));
        assert_eq!(tree.bounds(b), Some(Rect::new(0, 0, 20, 3)));
    }

    #[test]
    fn fill_container_covers_interior() {
        let l = log();
        let mut tree = WidgetTree::new();
        let root = tree.insert_with_bounds(Probe::new("r", &l), Rect::new(2, 2, 30, 10));
        let a = tree.insert(Probe::new("a", &l));
        let b = tree.insert(Probe::new("b", &l));
        tree.add_child(root, a).unwrap();
        tree.add_child(root, b).unwrap();
        tree.set_policy(root, LayoutPolicy::Fill).unwrap();
        tree.set_padding(root, 1).unwrap();

        assert_eq!(tree.bounds(a), Some(Rect::new(3, 3, 28, 8)));
        assert_eq!(tree.bounds(b), Some(Rect::new(3, 3, 28, 8)));
    }

    #[test]
    fn resize_callback_sees_new_size_and_can_mutate_tree() {
        let l = log();
        let mut tree = WidgetTree::new();
        let root = tree.insert(Probe::new("r", &l));
        let child = tree.insert(Probe::new("c", &l));
        tree.add_child(root, child).unwrap();
        tree.set_on_resize(root, move |tree, _id, width, _height| {
            let _ = tree.set_visible(child, width >= 40);
        })
        .unwrap();

        tree.set_bounds(root, Rect::new(0, 0, 80, 24)).unwrap();
        assert!(tree.state(child).unwrap().is_visible());
        tree.set_bounds(root, Rect::new(0, 0, 30, 24)).unwrap();
        assert!(!tree.state(child).unwrap().is_visible());
    }

    #[test]
    fn concrete_widget_access() {
        let l = log();
        let mut tree = WidgetTree::new();
        let a = tree.insert(Probe::new("a", &l));
        assert_eq!(tree.widget::<Probe>(a).map(|p| p.name), Some("a"));
        if let Some(p) = tree.widget_mut::<Probe>(a) {
            p.glyph = 'Z';
        }
        assert_eq!(tree.widget::<Probe>(a).map(|p| p.glyph), Some('Z'));
        assert!(tree.widget::<crate::container::Container>(a).is_none());
    }
}
