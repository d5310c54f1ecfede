#![forbid(unsafe_code)]

//! Double-buffered screen.
//!
//! [`ScreenBuffer`] owns two equally sized grids. `back` is where the current
//! frame is drawn; `front` records what the terminal last received. A
//! [`flush`](ScreenBuffer::flush) diffs the two, emits only the cells that
//! differ and then copies exactly those cells into `front`.
//!
//! `back` is cleared (not swapped) at the start of every frame, so each frame
//! starts blank while `front` keeps the physical history used for diffing.
//!
//! # Invariants
//!
//! 1. `front` and `back` always share dimensions
//! 2. After a flush, `front == back`
//! 3. A flush of an unchanged `back` writes zero bytes
//! 4. After [`resize`](ScreenBuffer::resize) the next flush treats every
//!    cell as changed, empty ones included

use std::io::{self, Write};

use elaris_core::geometry::Rect;

use crate::buffer::Buffer;
use crate::cell::{Cell, PackedRgba, StyleFlags};
use crate::diff::BufferDiff;
use crate::drawing::BorderChars;
use crate::presenter::{FlushStats, Presenter};

/// Front/back grid pair with diff-and-flush.
#[derive(Debug, Clone)]
pub struct ScreenBuffer {
    front: Buffer,
    back: Buffer,
    pending_clear: bool,
    full_redraw: bool,
}

impl ScreenBuffer {
    /// Allocate both grids at `width x height`, all cells empty.
    pub fn new(width: u16, height: u16) -> Self {
        Self {
            front: Buffer::new(width, height),
            back: Buffer::new(width, height),
            pending_clear: false,
            full_redraw: false,
        }
    }

    #[inline]
    pub fn width(&self) -> u16 {
        self.back.width()
    }

    #[inline]
    pub fn height(&self) -> u16 {
        self.back.height()
    }

    /// The whole screen as a rectangle.
    #[inline]
    pub fn bounds(&self) -> Rect {
        self.back.bounds()
    }

    /// Last flushed state.
    #[inline]
    pub fn front(&self) -> &Buffer {
        &self.front
    }

    /// Frame being drawn.
    #[inline]
    pub fn back(&self) -> &Buffer {
        &self.back
    }

    /// Write a single cell into the back grid. Out-of-bounds is a no-op.
    #[inline]
    pub fn set_cell(&mut self, x: i32, y: i32, cell: Cell) {
        self.back.set(x, y, cell);
    }

    /// Write `text` left to right starting at `(x, y)`, one cell per `char`.
    ///
    /// Stops at the right edge; never wraps. Characters left of column 0, or
    /// on a row outside the grid, are skipped.
    pub fn write_text(
        &mut self,
        x: i32,
        y: i32,
        text: &str,
        fg: PackedRgba,
        bg: PackedRgba,
        flags: StyleFlags,
    ) {
        if y < 0 || y >= i32::from(self.height()) {
            return;
        }
        let width = i32::from(self.width());
        for (i, ch) in text.chars().enumerate() {
            let Ok(offset) = i32::try_from(i) else {
                break;
            };
            let col = x.saturating_add(offset);
            if col >= width {
                break;
            }
            if col >= 0 {
                self.back.set(col, y, Cell::styled(ch, fg, bg, flags));
            }
        }
    }

    /// Fill `rect` with `ch` in the given colors.
    ///
    /// A transparent background (alpha 0) makes the whole call a no-op: fills
    /// never blend.
    pub fn fill_rect(&mut self, rect: Rect, ch: char, fg: PackedRgba, bg: PackedRgba) {
        if bg.is_transparent() {
            return;
        }
        self.back
            .fill_rect(rect, Cell::styled(ch, fg, bg, StyleFlags::empty()));
    }

    /// Outline `rect` with the single-line box glyphs.
    pub fn draw_border(&mut self, rect: Rect, fg: PackedRgba, bg: PackedRgba) {
        self.draw_border_with(rect, BorderChars::SINGLE, fg, bg);
    }

    /// Outline `rect` with an arbitrary glyph set.
    ///
    /// Each edge cell is clipped individually, so a box hanging off the
    /// screen still draws its visible part. Non-drawable rects draw nothing.
    pub fn draw_border_with(&mut self, rect: Rect, chars: BorderChars, fg: PackedRgba, bg: PackedRgba) {
        if !rect.is_drawable() {
            return;
        }
        let cell = |ch| Cell::styled(ch, fg, bg, StyleFlags::empty());
        let (left, top) = (rect.x, rect.y);
        let (right, bottom) = (rect.right() - 1, rect.bottom() - 1);
        let width = i32::from(self.width());
        let height = i32::from(self.height());

        for x in left.max(0)..rect.right().min(width) {
            self.back.set(x, top, cell(chars.horizontal));
            self.back.set(x, bottom, cell(chars.horizontal));
        }
        for y in top.max(0)..rect.bottom().min(height) {
            self.back.set(left, y, cell(chars.vertical));
            self.back.set(right, y, cell(chars.vertical));
        }

        self.back.set(left, top, cell(chars.top_left));
        self.back.set(right, top, cell(chars.top_right));
        self.back.set(left, bottom, cell(chars.bottom_left));
        self.back.set(right, bottom, cell(chars.bottom_right));
    }

    /// Reset the back grid to empty cells. `front` is untouched.
    pub fn clear(&mut self) {
        self.back.clear();
    }

    /// Reallocate both grids at the new size, all cells empty.
    ///
    /// The next flush writes every cell, empty ones included, even when the
    /// size did not change. Whatever the terminal showed before is
    /// overwritten.
    pub fn resize(&mut self, width: u16, height: u16) {
        #[cfg(feature = "tracing")]
        tracing::debug!(
            old_width = self.width(),
            old_height = self.height(),
            width,
            height,
            "screen resized"
        );
        self.front = Buffer::new(width, height);
        self.back = Buffer::new(width, height);
        self.full_redraw = true;
    }

    /// Force a full redraw on the next flush without resizing.
    ///
    /// Both grids are reset and the next flush erases the terminal first, so
    /// cells that are empty in the new frame do not keep stale content.
    pub fn invalidate(&mut self) {
        self.front.clear();
        self.back.clear();
        self.pending_clear = true;
    }

    /// True if [`invalidate`](Self::invalidate) is waiting for a flush.
    #[inline]
    pub fn is_invalidated(&self) -> bool {
        self.pending_clear
    }

    /// Positions where `back` differs from `front`, row-major. Every
    /// position right after a [`resize`](Self::resize).
    pub fn changed_cells(&self) -> BufferDiff {
        if self.full_redraw {
            return BufferDiff::full(self.width(), self.height());
        }
        BufferDiff::compute(&self.front, &self.back)
    }

    /// Emit every changed cell to `out`, then record them in `front`.
    pub fn flush<W: Write>(&mut self, out: &mut W) -> io::Result<FlushStats> {
        let mut presenter = Presenter::new(out);
        self.flush_with(&mut presenter)
    }

    /// [`flush`](Self::flush) through an existing presenter.
    pub fn flush_with<W: Write>(&mut self, presenter: &mut Presenter<W>) -> io::Result<FlushStats> {
        let diff = self.changed_cells();

        #[cfg(feature = "tracing")]
        let _span = tracing::debug_span!("screen_flush", changes = diff.len()).entered();

        let stats = presenter.present(&self.back, &diff, self.pending_clear)?;
        self.pending_clear = false;
        self.full_redraw = false;

        for (x, y) in diff.iter() {
            if let (Some(src), Some(dst)) = (self.back.get(x, y).copied(), self.front.get_mut(x, y)) {
                *dst = src;
            }
        }
        Ok(stats)
    }
}
