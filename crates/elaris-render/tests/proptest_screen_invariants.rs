//! Property-based invariant tests for the double-buffered screen.
//!
//! 1. The cells flushed are exactly the cells where back differs from the
//!    prior front.
//! 2. Flushing an unchanged back buffer emits nothing.
//! 3. After a resize the next flush redraws every cell, empty ones included.
//! 4. Drawing primitives never panic and never write outside the grid, for
//!    any coordinates including negative ones.

use elaris_core::geometry::Rect;
use elaris_render::cell::{Cell, PackedRgba, StyleFlags};
use elaris_render::screen::ScreenBuffer;
use proptest::prelude::*;

// ── Helpers ─────────────────────────────────────────────────────────────

fn glyph_strategy() -> impl Strategy<Value = char> {
    prop_oneof![Just(' '), Just('a'), Just('b'), Just('#'), Just('─')]
}

fn cell_strategy() -> impl Strategy<Value = Cell> {
    (glyph_strategy(), any::<bool>(), any::<bool>()).prop_map(|(ch, bold, blue)| {
        let mut cell = Cell::new(ch);
        if bold {
            cell = cell.with_flags(StyleFlags::BOLD);
        }
        if blue {
            cell = cell.with_bg(PackedRgba::BLUE);
        }
        cell
    })
}

fn writes_strategy(w: u16, h: u16) -> impl Strategy<Value = Vec<(i32, i32, Cell)>> {
    proptest::collection::vec(
        (-2i32..i32::from(w) + 2, -2i32..i32::from(h) + 2, cell_strategy()),
        0..40,
    )
}

fn rect_strategy() -> impl Strategy<Value = Rect> {
    (-30i32..30, -30i32..30, -5i32..40, -5i32..40)
        .prop_map(|(x, y, w, h)| Rect::new(x, y, w, h))
}

fn apply(screen: &mut ScreenBuffer, writes: &[(i32, i32, Cell)]) {
    for &(x, y, cell) in writes {
        screen.set_cell(x, y, cell);
    }
}

/// Positions where the two buffers differ, computed cell by cell.
fn naive_changes(screen: &ScreenBuffer) -> Vec<(u16, u16)> {
    let mut out = Vec::new();
    for y in 0..screen.height() {
        for x in 0..screen.width() {
            if screen.front().get(x, y) != screen.back().get(x, y) {
                out.push((x, y));
            }
        }
    }
    out
}

// ═════════════════════════════════════════════════════════════════════════
// 1-2. Diff minimality
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn flush_emits_exactly_the_differing_cells(
        first in writes_strategy(12, 6),
        second in writes_strategy(12, 6),
    ) {
        let mut screen = ScreenBuffer::new(12, 6);
        apply(&mut screen, &first);
        screen.flush(&mut Vec::new()).unwrap();

        screen.clear();
        apply(&mut screen, &second);
        let expected = naive_changes(&screen);
        let diff = screen.changed_cells();
        prop_assert_eq!(diff.changes(), expected.as_slice());

        let stats = screen.flush(&mut Vec::new()).unwrap();
        prop_assert_eq!(stats.cells_written, expected.len());
        prop_assert_eq!(screen.front(), screen.back());
    }

    #[test]
    fn reflush_is_silent(writes in writes_strategy(8, 4)) {
        let mut screen = ScreenBuffer::new(8, 4);
        apply(&mut screen, &writes);
        screen.flush(&mut Vec::new()).unwrap();

        let mut out = Vec::new();
        let stats = screen.flush(&mut out).unwrap();
        prop_assert_eq!(stats.cells_written, 0);
        prop_assert!(out.is_empty());
    }
}

// ═════════════════════════════════════════════════════════════════════════
// 3. Resize clears history
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn resize_redraws_every_cell(
        writes in writes_strategy(10, 5),
        w in 1u16..16,
        h in 1u16..8,
    ) {
        let mut screen = ScreenBuffer::new(10, 5);
        apply(&mut screen, &writes);
        screen.flush(&mut Vec::new()).unwrap();

        screen.resize(w, h);
        prop_assert!(screen.front().cells().iter().all(Cell::is_empty));
        apply(&mut screen, &writes);

        let stats = screen.flush(&mut Vec::new()).unwrap();
        prop_assert_eq!(stats.cells_written, usize::from(w) * usize::from(h));
        prop_assert_eq!(screen.front(), screen.back());
    }
}

// ═════════════════════════════════════════════════════════════════════════
// 4. Clip safety
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn drawing_primitives_clip(
        rect in rect_strategy(),
        x in -40i32..40,
        y in -40i32..40,
        text in "[a-z ]{0,30}",
    ) {
        let mut screen = ScreenBuffer::new(20, 10);
        screen.fill_rect(rect, '#', PackedRgba::WHITE, PackedRgba::RED);
        screen.draw_border(rect, PackedRgba::WHITE, PackedRgba::TRANSPARENT);
        screen.write_text(x, y, &text, PackedRgba::WHITE, PackedRgba::TRANSPARENT, StyleFlags::empty());

        prop_assert_eq!(screen.back().len(), 200);
        // Nothing drawn outside the intersection of rect and screen, except text.
        if y < 0 || y >= 10 || text.is_empty() {
            let visible = rect.intersection(&screen.bounds());
            for yy in 0..10u16 {
                for xx in 0..20u16 {
                    let inside = visible
                        .map(|v| v.contains((i32::from(xx), i32::from(yy)).into()))
                        .unwrap_or(false);
                    if !inside {
                        prop_assert!(screen.back().get(xx, yy).unwrap().is_empty());
                    }
                }
            }
        }
    }
}
