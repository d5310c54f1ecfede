#![forbid(unsafe_code)]

//! Container layout policies.
//!
//! A container repositions its direct children whenever its own bounds or
//! its child set change. The rules live here as a pure solver so they can be
//! tested without a widget tree:
//!
//! - [`LayoutPolicy::Absolute`] - leave every child where it is
//! - [`LayoutPolicy::Vertical`] - stack top to bottom at full interior width
//! - [`LayoutPolicy::Horizontal`] - stack left to right at full interior height
//! - [`LayoutPolicy::Fill`] - every visible child covers the whole interior
//!
//! # Example
//!
//! ```
//! use elaris_layout::{ChildSlot, Layout, LayoutPolicy};
//! use elaris_core::geometry::Rect;
//!
//! let layout = Layout::new(LayoutPolicy::Vertical)
//!     .with_padding(1)
//!     .with_spacing(1);
//!
//! let placed = layout.arrange(
//!     Rect::new(0, 0, 40, 20),
//!     &[
//!         ChildSlot::new(Rect::new(0, 0, 10, 3)),
//!         ChildSlot::new(Rect::new(0, 0, 10, 3)),
//!     ],
//! );
//! assert_eq!(placed[0], Some(Rect::new(1, 1, 38, 3)));
//! assert_eq!(placed[1], Some(Rect::new(1, 5, 38, 3)));
//! ```

pub use elaris_core::geometry::{Rect, Sides};

/// The repositioning rule a container applies to its direct children.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum LayoutPolicy {
    /// Children keep their explicitly set rectangles.
    #[default]
    Absolute,
    /// Top to bottom; widths forced to the interior width.
    Vertical,
    /// Left to right; heights forced to the interior height.
    Horizontal,
    /// Every visible child resized to the interior rectangle.
    Fill,
}

/// What the solver needs to know about one child.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChildSlot {
    /// The child's current rectangle. Stacks keep its size along the
    /// stacking axis.
    pub bounds: Rect,
    /// Invisible children take no space and are not repositioned.
    pub visible: bool,
}

impl ChildSlot {
    /// A visible child with the given current bounds.
    pub const fn new(bounds: Rect) -> Self {
        Self {
            bounds,
            visible: true,
        }
    }

    /// Set visibility.
    #[must_use]
    pub const fn with_visible(mut self, visible: bool) -> Self {
        self.visible = visible;
        self
    }
}

/// A layout policy plus the container's padding and spacing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Layout {
    policy: LayoutPolicy,
    padding: i32,
    spacing: i32,
}

impl Layout {
    /// A layout with zero padding and spacing.
    pub const fn new(policy: LayoutPolicy) -> Self {
        Self {
            policy,
            padding: 0,
            spacing: 0,
        }
    }

    /// Set the padding (clamped to ≥ 0).
    #[must_use]
    pub fn with_padding(mut self, padding: i32) -> Self {
        self.set_padding(padding);
        self
    }

    /// Set the spacing between stacked children (clamped to ≥ 0).
    #[must_use]
    pub fn with_spacing(mut self, spacing: i32) -> Self {
        self.set_spacing(spacing);
        self
    }

    #[inline]
    pub const fn policy(&self) -> LayoutPolicy {
        self.policy
    }

    #[inline]
    pub const fn padding(&self) -> i32 {
        self.padding
    }

    #[inline]
    pub const fn spacing(&self) -> i32 {
        self.spacing
    }

    pub fn set_policy(&mut self, policy: LayoutPolicy) {
        self.policy = policy;
    }

    pub fn set_padding(&mut self, padding: i32) {
        self.padding = padding.max(0);
    }

    pub fn set_spacing(&mut self, spacing: i32) {
        self.spacing = spacing.max(0);
    }

    /// The interior rectangle of `area` after padding.
    #[inline]
    pub const fn interior(&self, area: Rect) -> Rect {
        area.inset(self.padding)
    }

    /// Compute new rectangles for `children` inside the container `area`.
    ///
    /// The result has one entry per child, in order. `None` means "leave
    /// this child alone": every child under [`LayoutPolicy::Absolute`],
    /// invisible children, and children past the point where a stack ran out
    /// of room (they keep their last geometry and are not hidden).
    pub fn arrange(&self, area: Rect, children: &[ChildSlot]) -> Vec<Option<Rect>> {
        let mut placed = vec![None; children.len()];
        if children.is_empty() {
            return placed;
        }
        let interior = self.interior(area);

        match self.policy {
            LayoutPolicy::Absolute => {}
            LayoutPolicy::Vertical => {
                let limit = area.bottom().saturating_sub(self.padding);
                let mut cursor = interior.y;
                for (slot, child) in placed.iter_mut().zip(children) {
                    if !child.visible {
                        continue;
                    }
                    *slot = Some(Rect::new(
                        interior.x,
                        cursor,
                        interior.width,
                        child.bounds.height,
                    ));
                    cursor = cursor
                        .saturating_add(child.bounds.height)
                        .saturating_add(self.spacing);
                    if cursor >= limit {
                        break;
                    }
                }
            }
            LayoutPolicy::Horizontal => {
                let limit = area.right().saturating_sub(self.padding);
                let mut cursor = interior.x;
                for (slot, child) in placed.iter_mut().zip(children) {
                    if !child.visible {
                        continue;
                    }
                    *slot = Some(Rect::new(
                        cursor,
                        interior.y,
                        child.bounds.width,
                        interior.height,
                    ));
                    cursor = cursor
                        .saturating_add(child.bounds.width)
                        .saturating_add(self.spacing);
                    if cursor >= limit {
                        break;
                    }
                }
            }
            LayoutPolicy::Fill => {
                for (slot, child) in placed.iter_mut().zip(children) {
                    if child.visible {
                        *slot = Some(interior);
                    }
                }
            }
        }

        placed
    }
}

impl From<LayoutPolicy> for Layout {
    fn from(policy: LayoutPolicy) -> Self {
        Self::new(policy)
    }
}
