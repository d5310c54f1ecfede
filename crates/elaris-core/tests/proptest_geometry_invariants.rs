//! Property-based invariant tests for geometry primitives (Rect, Point, Sides).
//!
//! 1. Intersection is commutative.
//! 2. Intersection fits within both inputs.
//! 3. Contains agrees with intersection.
//! 4. Inset shrinks each dimension by twice the padding.
//! 5. Non-drawable rectangles contain no points.
//! 6. No panics on extreme i32 values.

use elaris_core::geometry::{Point, Rect, Sides};
use proptest::prelude::*;

// ── Helpers ─────────────────────────────────────────────────────────────

fn small_rect_strategy() -> impl Strategy<Value = Rect> {
    (-200i32..=200, -200i32..=200, -20i32..=300, -20i32..=300)
        .prop_map(|(x, y, w, h)| Rect::new(x, y, w, h))
}

fn any_rect_strategy() -> impl Strategy<Value = Rect> {
    (any::<i32>(), any::<i32>(), any::<i32>(), any::<i32>())
        .prop_map(|(x, y, w, h)| Rect::new(x, y, w, h))
}

fn point_strategy() -> impl Strategy<Value = Point> {
    (-250i32..=550, -250i32..=550).prop_map(|(x, y)| Point::new(x, y))
}

// ═════════════════════════════════════════════════════════════════════════
// 1-2. Intersection
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn intersection_commutative(a in small_rect_strategy(), b in small_rect_strategy()) {
        prop_assert_eq!(a.intersection(&b), b.intersection(&a));
    }

    #[test]
    fn intersection_within_both(a in small_rect_strategy(), b in small_rect_strategy()) {
        if let Some(i) = a.intersection(&b) {
            prop_assert!(i.is_drawable());
            prop_assert!(i.x >= a.x && i.x >= b.x);
            prop_assert!(i.y >= a.y && i.y >= b.y);
            prop_assert!(i.right() <= a.right() && i.right() <= b.right());
            prop_assert!(i.bottom() <= a.bottom() && i.bottom() <= b.bottom());
        }
    }
}

// ═════════════════════════════════════════════════════════════════════════
// 3. Contains agrees with intersection
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn contains_matches_intersection(
        a in small_rect_strategy(),
        b in small_rect_strategy(),
        p in point_strategy(),
    ) {
        let in_both = a.contains(p) && b.contains(p);
        let in_intersection = a.intersection(&b).is_some_and(|i| i.contains(p));
        prop_assert_eq!(in_both, in_intersection);
    }
}

// ═════════════════════════════════════════════════════════════════════════
// 4-5. Inset and degenerate rectangles
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn inset_shrinks_by_twice_padding(r in small_rect_strategy(), pad in 0i32..=50) {
        let inner = r.inset(pad);
        prop_assert_eq!(inner.x, r.x + pad);
        prop_assert_eq!(inner.y, r.y + pad);
        prop_assert_eq!(inner.width, r.width - 2 * pad);
        prop_assert_eq!(inner.height, r.height - 2 * pad);
        prop_assert_eq!(inner, r.inner(Sides::all(pad)));
    }

    #[test]
    fn non_drawable_contains_nothing(
        x in -100i32..100,
        y in -100i32..100,
        w in -50i32..=0,
        h in -50i32..50,
        p in point_strategy(),
    ) {
        let r = Rect::new(x, y, w, h);
        prop_assert!(!r.is_drawable());
        prop_assert!(!r.contains(p));
        prop_assert_eq!(r.area(), 0);
    }
}

// ═════════════════════════════════════════════════════════════════════════
// 6. Extreme values
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn extreme_values_do_not_panic(a in any_rect_strategy(), b in any_rect_strategy(), pad in any::<i32>()) {
        let _ = a.right();
        let _ = a.bottom();
        let _ = a.area();
        let _ = a.inset(pad);
        let _ = a.intersection(&b);
        let _ = a.contains(b.position());
    }
}
