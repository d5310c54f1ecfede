#![forbid(unsafe_code)]

//! Diff computation between buffers.
//!
//! [`BufferDiff::compute`] walks both grids row-major and records every
//! position whose cells differ. The result is ordered by `(y, x)`, which is
//! also the order the presenter emits cells in.
//!
//! ```
//! use elaris_render::buffer::Buffer;
//! use elaris_render::cell::Cell;
//! use elaris_render::diff::BufferDiff;
//!
//! let old = Buffer::new(80, 24);
//! let mut new = Buffer::new(80, 24);
//! new.set(5, 5, Cell::new('X'));
//! new.set(6, 5, Cell::new('Y'));
//!
//! let diff = BufferDiff::compute(&old, &new);
//! assert_eq!(diff.changes(), &[(5, 5), (6, 5)]);
//! ```

use crate::buffer::Buffer;

/// Positions `(x, y)` where two equally sized buffers differ.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BufferDiff {
    changes: Vec<(u16, u16)>,
}

impl BufferDiff {
    /// Create an empty diff.
    pub fn new() -> Self {
        Self::default()
    }

    /// Compute the diff between two buffers.
    ///
    /// Buffers of different sizes are a caller bug; in that case only the
    /// overlapping region is compared (and a debug assertion fires).
    pub fn compute(old: &Buffer, new: &Buffer) -> Self {
        #[cfg(feature = "tracing")]
        let _span =
            tracing::debug_span!("diff_compute", width = old.width(), height = old.height())
                .entered();

        debug_assert_eq!(old.width(), new.width(), "buffer widths must match");
        debug_assert_eq!(old.height(), new.height(), "buffer heights must match");

        let width = old.width().min(new.width());
        let height = old.height().min(new.height());
        let mut changes = Vec::new();

        for y in 0..height {
            let before = old.row(y);
            let after = new.row(y);
            for x in 0..width {
                if before[x as usize] != after[x as usize] {
                    changes.push((x, y));
                }
            }
        }

        #[cfg(feature = "tracing")]
        tracing::trace!(changes = changes.len(), "diff computed");

        Self { changes }
    }

    /// Every position of a `width x height` grid, row-major.
    pub fn full(width: u16, height: u16) -> Self {
        let changes = (0..height)
            .flat_map(|y| (0..width).map(move |x| (x, y)))
            .collect();
        Self { changes }
    }

    /// Number of changed cells.
    #[inline]
    pub fn len(&self) -> usize {
        self.changes.len()
    }

    /// True if nothing changed.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.changes.is_empty()
    }

    /// Changed positions in row-major order.
    #[inline]
    pub fn changes(&self) -> &[(u16, u16)] {
        &self.changes
    }

    /// Iterate over changed positions.
    #[inline]
    pub fn iter(&self) -> impl Iterator<Item = (u16, u16)> + '_ {
        self.changes.iter().copied()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cell::{Cell, PackedRgba, StyleFlags};

    #[test]
    fn identical_buffers_produce_empty_diff() {
        let diff = BufferDiff::compute(&Buffer::new(10, 10), &Buffer::new(10, 10));
        assert!(diff.is_empty());
        assert_eq!(diff.len(), 0);
    }

    #[test]
    fn scattered_changes_are_row_major() {
        let old = Buffer::new(10, 10);
        let mut new = Buffer::new(10, 10);
        new.set(9, 9, Cell::new('B'));
        new.set(0, 0, Cell::new('A'));
        new.set(5, 3, Cell::new('C'));

        let diff = BufferDiff::compute(&old, &new);
        assert_eq!(diff.changes(), &[(0, 0), (5, 3), (9, 9)]);
    }

    #[test]
    fn style_only_change_is_detected() {
        let old = Buffer::new(3, 1);
        let mut new = Buffer::new(3, 1);
        new.set(1, 0, Cell::EMPTY.with_flags(StyleFlags::UNDERLINE));
        new.set(2, 0, Cell::EMPTY.with_bg(PackedRgba::BLUE));

        assert_eq!(BufferDiff::compute(&old, &new).changes(), &[(1, 0), (2, 0)]);
    }

    #[test]
    fn full_diff_covers_every_position() {
        let diff = BufferDiff::full(3, 2);
        assert_eq!(diff.changes(), &[(0, 0), (1, 0), (2, 0), (0, 1), (1, 1), (2, 1)]);
        assert!(BufferDiff::full(0, 4).is_empty());
    }

    #[test]
    fn writing_the_same_value_is_not_a_change() {
        let mut old = Buffer::new(3, 1);
        let mut new = Buffer::new(3, 1);
        old.set(0, 0, Cell::new('q'));
        new.set(0, 0, Cell::new('q'));
        assert!(BufferDiff::compute(&old, &new).is_empty());
    }
}
