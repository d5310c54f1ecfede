#![forbid(unsafe_code)]

//! Focus tracking.
//!
//! The focus order is derived, never stored on widgets: a depth-first
//! pre-order walk collects every widget that is visible, enabled and
//! focusable, and does not descend into an invisible or disabled widget.
//! A disabled container therefore hides its whole subtree from focus.
//!
//! At most one widget is focused at a time. Every transition fires
//! `on_blur` on the previous holder and then `on_focus` on the new one,
//! exactly once each; setting focus to the current holder fires nothing.

use tracing::debug;

use crate::tree::WidgetTree;
use crate::widget::WidgetId;

/// Tracks the focused widget and the most recently computed focus order.
#[derive(Debug, Clone, Default)]
pub struct FocusController {
    order: Vec<WidgetId>,
    focused: Option<WidgetId>,
}

impl FocusController {
    pub fn new() -> Self {
        Self::default()
    }

    /// Recompute the focus order from `root`.
    pub fn compute_focusable(&mut self, tree: &WidgetTree, root: WidgetId) -> &[WidgetId] {
        self.order.clear();
        collect(tree, root, &mut self.order);
        &self.order
    }

    /// The order as of the last [`compute_focusable`](Self::compute_focusable).
    #[inline]
    pub fn order(&self) -> &[WidgetId] {
        &self.order
    }

    /// The widget currently holding focus.
    #[inline]
    pub fn focused(&self) -> Option<WidgetId> {
        self.focused
    }

    /// Move focus to `target`. Returns `false` (and fires no hook) when
    /// `target` already holds focus.
    pub fn set_focus(&mut self, tree: &mut WidgetTree, target: Option<WidgetId>) -> bool {
        if self.focused == target {
            return false;
        }
        if let Some(previous) = self.focused.take() {
            tree.set_focused_flag(previous, false);
        }
        self.focused = target;
        if let Some(next) = target {
            tree.set_focused_flag(next, true);
        }
        debug!(focused = ?target, "focus changed");
        true
    }

    /// Drop focus entirely (fires `on_blur` on the holder, if any).
    pub fn clear(&mut self, tree: &mut WidgetTree) {
        self.set_focus(tree, None);
    }

    /// Pick the startup focus: `preferred` if it is in the focus order, else
    /// the first focusable widget, else `root`.
    pub fn initialize(
        &mut self,
        tree: &mut WidgetTree,
        root: WidgetId,
        preferred: Option<WidgetId>,
    ) -> Option<WidgetId> {
        self.compute_focusable(tree, root);
        let target = preferred
            .filter(|id| self.order.contains(id))
            .or_else(|| self.order.first().copied())
            .unwrap_or(root);
        self.set_focus(tree, Some(target));
        self.focused
    }

    /// Focus the next widget in a freshly computed order, wrapping around.
    pub fn focus_next(&mut self, tree: &mut WidgetTree, root: WidgetId) -> Option<WidgetId> {
        self.step(tree, root, true)
    }

    /// Focus the previous widget in a freshly computed order, wrapping around.
    pub fn focus_previous(&mut self, tree: &mut WidgetTree, root: WidgetId) -> Option<WidgetId> {
        self.step(tree, root, false)
    }

    fn step(&mut self, tree: &mut WidgetTree, root: WidgetId, forward: bool) -> Option<WidgetId> {
        self.compute_focusable(tree, root);
        let len = self.order.len();
        let target = if len == 0 {
            root
        } else {
            match self.focused.and_then(|f| self.order.iter().position(|&id| id == f)) {
                Some(i) if forward => self.order[(i + 1) % len],
                Some(i) => self.order[(i + len - 1) % len],
                // Current holder vanished from the order (hidden, disabled,
                // despawned) or nothing was focused.
                None => self.order[0],
            }
        };
        self.set_focus(tree, Some(target));
        self.focused
    }
}

fn collect(tree: &WidgetTree, id: WidgetId, out: &mut Vec<WidgetId>) {
    let Some(state) = tree.state(id) else {
        return;
    };
    if !state.is_visible() || !state.is_enabled() {
        return;
    }
    if tree.is_focusable(id) {
        out.push(id);
    }
    for &child in state.children() {
        collect(tree, child, out);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::container::Container;
    use crate::widget::{Widget, WidgetState};
    use elaris_render::screen::ScreenBuffer;
    use std::cell::RefCell;
    use std::rc::Rc;

    type Log = Rc<RefCell<Vec<String>>>;

    struct Focusable {
        name: &'static str,
        log: Log,
    }

    impl Widget for Focusable {
        fn render(&self, _: &WidgetState, _: &mut ScreenBuffer) {}

        fn is_focusable(&self) -> bool {
            true
        }

        fn on_focus(&mut self, state: &WidgetState) {
            assert!(state.is_focused());
            self.log.borrow_mut().push(format!("{}:focus", self.name));
        }

        fn on_blur(&mut self, state: &WidgetState) {
            assert!(!state.is_focused());
            self.log.borrow_mut().push(format!("{}:blur", self.name));
        }
    }

    fn focusable(tree: &mut WidgetTree, name: &'static str, log: &Log) -> WidgetId {
        tree.insert(Focusable {
            name,
            log: Rc::clone(log),
        })
    }

    fn take(log: &Log) -> Vec<String> {
        std::mem::take(&mut *log.borrow_mut())
    }

    #[test]
    fn disabled_ancestor_prunes_subtree() {
        let log = Log::default();
        let mut tree = WidgetTree::new();
        let root = tree.insert(Container::new());
        let a = focusable(&mut tree, "a", &log);
        let b = focusable(&mut tree, "b", &log);
        let c = tree.insert(Container::new());
        let d = focusable(&mut tree, "d", &log);
        tree.add_child(root, a).unwrap();
        tree.add_child(root, b).unwrap();
        tree.add_child(root, c).unwrap();
        tree.add_child(c, d).unwrap();
        tree.set_visible(b, false).unwrap();
        tree.set_enabled(c, false).unwrap();

        let mut focus = FocusController::new();
        assert_eq!(focus.compute_focusable(&tree, root), &[a]);
    }

    #[test]
    fn transition_fires_blur_then_focus_once() {
        let log = Log::default();
        let mut tree = WidgetTree::new();
        let x = focusable(&mut tree, "x", &log);
        let y = focusable(&mut tree, "y", &log);

        let mut focus = FocusController::new();
        assert!(focus.set_focus(&mut tree, Some(x)));
        take(&log);

        assert!(focus.set_focus(&mut tree, Some(y)));
        assert_eq!(take(&log), ["x:blur", "y:focus"]);
        assert!(!focus.set_focus(&mut tree, Some(y)));
        assert!(take(&log).is_empty());
        assert!(tree.state(y).unwrap().is_focused());
        assert!(!tree.state(x).unwrap().is_focused());
    }

    #[test]
    fn next_and_previous_wrap() {
        let log = Log::default();
        let mut tree = WidgetTree::new();
        let root = tree.insert(Container::new());
        let ids: Vec<_> = ["a", "b", "c"]
            .into_iter()
            .map(|n| focusable(&mut tree, n, &log))
            .collect();
        for &id in &ids {
            tree.add_child(root, id).unwrap();
        }

        let mut focus = FocusController::new();
        assert_eq!(focus.initialize(&mut tree, root, None), Some(ids[0]));
        assert_eq!(focus.focus_next(&mut tree, root), Some(ids[1]));
        assert_eq!(focus.focus_next(&mut tree, root), Some(ids[2]));
        assert_eq!(focus.focus_next(&mut tree, root), Some(ids[0]));
        assert_eq!(focus.focus_previous(&mut tree, root), Some(ids[2]));
    }

    #[test]
    fn vanished_holder_falls_back_to_first() {
        let log = Log::default();
        let mut tree = WidgetTree::new();
        let root = tree.insert(Container::new());
        let a = focusable(&mut tree, "a", &log);
        let b = focusable(&mut tree, "b", &log);
        tree.add_child(root, a).unwrap();
        tree.add_child(root, b).unwrap();

        let mut focus = FocusController::new();
        focus.set_focus(&mut tree, Some(b));
        tree.set_visible(b, false).unwrap();
        assert_eq!(focus.focus_previous(&mut tree, root), Some(a));
    }

    #[test]
    fn empty_order_falls_back_to_root() {
        let mut tree = WidgetTree::new();
        let root = tree.insert(Container::new());
        let mut focus = FocusController::new();
        assert_eq!(focus.initialize(&mut tree, root, None), Some(root));
        assert_eq!(focus.focus_next(&mut tree, root), Some(root));
    }

    #[test]
    fn preferred_initial_focus_must_be_focusable() {
        let log = Log::default();
        let mut tree = WidgetTree::new();
        let root = tree.insert(Container::new());
        let a = focusable(&mut tree, "a", &log);
        let b = focusable(&mut tree, "b", &log);
        tree.add_child(root, a).unwrap();
        tree.add_child(root, b).unwrap();

        let mut focus = FocusController::new();
        assert_eq!(focus.initialize(&mut tree, root, Some(b)), Some(b));

        let mut tree_focus = FocusController::new();
        tree.set_enabled(b, false).unwrap();
        assert_eq!(tree_focus.initialize(&mut tree, root, Some(b)), Some(a));
    }

    #[test]
    fn clear_blurs_holder() {
        let log = Log::default();
        let mut tree = WidgetTree::new();
        let a = focusable(&mut tree, "a", &log);
        let mut focus = FocusController::new();
        focus.set_focus(&mut tree, Some(a));
        take(&log);
        focus.clear(&mut tree);
        assert_eq!(take(&log), ["a:blur"]);
        assert_eq!(focus.focused(), None);
    }
}
