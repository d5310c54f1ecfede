#![forbid(unsafe_code)]

//! Geometric primitives.
//!
//! Widget bounds live in a signed coordinate space: a rectangle may start left
//! of or above the screen, and its width or height may be zero or negative to
//! mean "not drawable". Drawing code clips against the screen; nothing here
//! panics on degenerate input.

/// A point in terminal cell coordinates (0-indexed, origin at top-left).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Point {
    /// Column.
    pub x: i32,
    /// Row.
    pub y: i32,
}

impl Point {
    /// The origin.
    pub const ZERO: Self = Self { x: 0, y: 0 };

    /// Create a new point.
    #[inline]
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }
}

impl From<(i32, i32)> for Point {
    fn from((x, y): (i32, i32)) -> Self {
        Self::new(x, y)
    }
}

/// A rectangle used for widget bounds, layout areas, and hit testing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Rect {
    /// Left edge (inclusive).
    pub x: i32,
    /// Top edge (inclusive).
    pub y: i32,
    /// Width in cells. Zero or negative means nothing to draw.
    pub width: i32,
    /// Height in cells. Zero or negative means nothing to draw.
    pub height: i32,
}

impl Rect {
    /// Create a new rectangle.
    #[inline]
    pub const fn new(x: i32, y: i32, width: i32, height: i32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Create a rectangle anchored at the origin.
    #[inline]
    pub const fn from_size(width: i32, height: i32) -> Self {
        Self::new(0, 0, width, height)
    }

    /// Right edge (exclusive).
    #[inline]
    pub const fn right(&self) -> i32 {
        self.x.saturating_add(self.width)
    }

    /// Bottom edge (exclusive).
    #[inline]
    pub const fn bottom(&self) -> i32 {
        self.y.saturating_add(self.height)
    }

    /// Top-left corner.
    #[inline]
    pub const fn position(&self) -> Point {
        Point::new(self.x, self.y)
    }

    /// Top-left corner. Alias for [`Rect::position`].
    #[inline]
    pub const fn top_left(&self) -> Point {
        self.position()
    }

    /// Top-right corner (exclusive right edge, matching [`Rect::right`]).
    #[inline]
    pub const fn top_right(&self) -> Point {
        Point::new(self.right(), self.y)
    }

    /// Bottom-left corner (exclusive bottom edge).
    #[inline]
    pub const fn bottom_left(&self) -> Point {
        Point::new(self.x, self.bottom())
    }

    /// Bottom-right corner (exclusive on both axes).
    #[inline]
    pub const fn bottom_right(&self) -> Point {
        Point::new(self.right(), self.bottom())
    }

    /// True when the rectangle covers at least one cell.
    #[inline]
    pub const fn is_drawable(&self) -> bool {
        self.width > 0 && self.height > 0
    }

    /// Area in cells; zero for non-drawable rectangles.
    #[inline]
    pub const fn area(&self) -> u64 {
        if self.is_drawable() {
            self.width as u64 * self.height as u64
        } else {
            0
        }
    }

    /// Check if a point lies inside the rectangle.
    #[inline]
    pub const fn contains(&self, point: Point) -> bool {
        point.x >= self.x && point.x < self.right() && point.y >= self.y && point.y < self.bottom()
    }

    /// Shrink the rectangle by `padding` on every side.
    ///
    /// The result may have a zero or negative size when the padding exceeds
    /// the available space; callers treat that as "nothing to place".
    #[inline]
    pub const fn inset(&self, padding: i32) -> Rect {
        self.inner(Sides::all(padding))
    }

    /// Shrink the rectangle by per-side margins.
    pub const fn inner(&self, margin: Sides) -> Rect {
        Rect {
            x: self.x.saturating_add(margin.left),
            y: self.y.saturating_add(margin.top),
            width: self
                .width
                .saturating_sub(margin.left)
                .saturating_sub(margin.right),
            height: self
                .height
                .saturating_sub(margin.top)
                .saturating_sub(margin.bottom),
        }
    }

    /// Intersection with another rectangle, or `None` when they do not overlap.
    pub fn intersection(&self, other: &Rect) -> Option<Rect> {
        let x = self.x.max(other.x);
        let y = self.y.max(other.y);
        let right = self.right().min(other.right());
        let bottom = self.bottom().min(other.bottom());

        if x < right && y < bottom {
            Some(Rect::new(
                x,
                y,
                right.saturating_sub(x),
                bottom.saturating_sub(y),
            ))
        } else {
            None
        }
    }

    /// Return a copy with a different origin.
    #[inline]
    #[must_use]
    pub const fn with_position(mut self, x: i32, y: i32) -> Self {
        self.x = x;
        self.y = y;
        self
    }

    /// Return a copy with a different size.
    #[inline]
    #[must_use]
    pub const fn with_size(mut self, width: i32, height: i32) -> Self {
        self.width = width;
        self.height = height;
        self
    }
}

/// Per-side spacing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Sides {
    /// Top.
    pub top: i32,
    /// Right.
    pub right: i32,
    /// Bottom.
    pub bottom: i32,
    /// Left.
    pub left: i32,
}

impl Sides {
    /// Explicit per-side values, clockwise from the top.
    pub const fn new(top: i32, right: i32, bottom: i32, left: i32) -> Self {
        Self {
            top,
            right,
            bottom,
            left,
        }
    }

    /// The same value on every side.
    pub const fn all(value: i32) -> Self {
        Self::new(value, value, value, value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn edges_are_exclusive() {
        let r = Rect::new(2, 3, 10, 4);
        assert_eq!(r.right(), 12);
        assert_eq!(r.bottom(), 7);
        assert!(r.contains(Point::new(11, 6)));
        assert!(!r.contains(Point::new(12, 6)));
        assert!(!r.contains(Point::new(11, 7)));
    }

    #[test]
    fn corners() {
        let r = Rect::new(1, 1, 4, 2);
        assert_eq!(r.top_left(), Point::new(1, 1));
        assert_eq!(r.top_right(), Point::new(5, 1));
        assert_eq!(r.bottom_left(), Point::new(1, 3));
        assert_eq!(r.bottom_right(), Point::new(5, 3));
    }

    #[test]
    fn degenerate_sizes_are_not_drawable() {
        assert!(!Rect::new(0, 0, 0, 5).is_drawable());
        assert!(!Rect::new(0, 0, 5, -1).is_drawable());
        assert_eq!(Rect::new(0, 0, -3, 4).area(), 0);
        assert!(!Rect::new(0, 0, -3, 4).contains(Point::ZERO));
    }

    #[test]
    fn inset_can_go_negative() {
        let r = Rect::new(0, 0, 2, 2).inset(2);
        assert_eq!(r, Rect::new(2, 2, -2, -2));
        assert!(!r.is_drawable());
    }

    #[test]
    fn inset_matches_padding_rule() {
        assert_eq!(Rect::new(2, 2, 30, 10).inset(1), Rect::new(3, 3, 28, 8));
    }

    #[test]
    fn intersection_overlap_and_disjoint() {
        let a = Rect::new(0, 0, 10, 10);
        let b = Rect::new(5, 5, 10, 10);
        assert_eq!(a.intersection(&b), Some(Rect::new(5, 5, 5, 5)));
        assert_eq!(a.intersection(&Rect::new(20, 20, 1, 1)), None);
    }

    #[test]
    fn negative_origin_intersection() {
        let screen = Rect::from_size(80, 24);
        let r = Rect::new(-5, -2, 10, 4);
        assert_eq!(r.intersection(&screen), Some(Rect::new(0, 0, 5, 2)));
    }
}
