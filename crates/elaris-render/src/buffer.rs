#![forbid(unsafe_code)]

//! Buffer grid storage.
//!
//! A [`Buffer`] is a 2D grid of [`Cell`]s stored row-major
//! (`index = y * width + x`). Reads use unsigned grid coordinates; writes take
//! signed coordinates and silently drop anything outside the grid, so callers
//! can draw widgets that hang off the screen edge without pre-clipping.
//!
//! # Invariants
//!
//! 1. `cells.len() == width * height`
//! 2. A zero-sized buffer is valid and ignores every write

use elaris_core::geometry::Rect;

use crate::cell::Cell;

/// A 2D grid of terminal cells.
///
/// # Example
///
/// ```
/// use elaris_render::buffer::Buffer;
/// use elaris_render::cell::Cell;
///
/// let mut buffer = Buffer::new(80, 24);
/// assert!(buffer.set(0, 0, Cell::new('H')));
/// assert!(!buffer.set(-1, 0, Cell::new('x')));
/// assert_eq!(buffer.get(0, 0).map(|c| c.ch), Some('H'));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Buffer {
    width: u16,
    height: u16,
    cells: Vec<Cell>,
}

impl Buffer {
    /// Create a buffer filled with [`Cell::EMPTY`].
    pub fn new(width: u16, height: u16) -> Self {
        Self {
            width,
            height,
            cells: vec![Cell::EMPTY; width as usize * height as usize],
        }
    }

    /// Buffer width in cells.
    #[inline]
    pub const fn width(&self) -> u16 {
        self.width
    }

    /// Buffer height in cells.
    #[inline]
    pub const fn height(&self) -> u16 {
        self.height
    }

    /// Total number of cells.
    #[inline]
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    /// True for a zero-sized buffer.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// The whole grid as a rectangle.
    #[inline]
    pub const fn bounds(&self) -> Rect {
        Rect::from_size(self.width as i32, self.height as i32)
    }

    #[inline]
    fn index(&self, x: i32, y: i32) -> Option<usize> {
        if x >= 0 && y >= 0 && x < self.width as i32 && y < self.height as i32 {
            Some(y as usize * self.width as usize + x as usize)
        } else {
            None
        }
    }

    /// Cell at `(x, y)`, or `None` outside the grid.
    #[inline]
    pub fn get(&self, x: u16, y: u16) -> Option<&Cell> {
        self.index(x as i32, y as i32).map(|i| &self.cells[i])
    }

    /// Mutable cell at `(x, y)`, or `None` outside the grid.
    #[inline]
    pub fn get_mut(&mut self, x: u16, y: u16) -> Option<&mut Cell> {
        self.index(x as i32, y as i32).map(|i| &mut self.cells[i])
    }

    /// Write a cell. Returns `false` (and writes nothing) when `(x, y)` is
    /// outside the grid.
    #[inline]
    pub fn set(&mut self, x: i32, y: i32, cell: Cell) -> bool {
        match self.index(x, y) {
            Some(i) => {
                self.cells[i] = cell;
                true
            }
            None => false,
        }
    }

    /// Overwrite every cell in the part of `rect` that lies inside the grid.
    pub fn fill_rect(&mut self, rect: Rect, cell: Cell) {
        let Some(area) = rect.intersection(&self.bounds()) else {
            return;
        };
        let width = self.width as usize;
        for y in area.y..area.bottom() {
            let row = y as usize * width;
            let start = row + area.x as usize;
            let end = row + area.right() as usize;
            self.cells[start..end].fill(cell);
        }
    }

    /// Overwrite every cell.
    pub fn fill(&mut self, cell: Cell) {
        self.cells.fill(cell);
    }

    /// Reset every cell to [`Cell::EMPTY`].
    pub fn clear(&mut self) {
        self.fill(Cell::EMPTY);
    }

    /// One row of cells. Empty slice when `y` is out of range.
    pub fn row(&self, y: u16) -> &[Cell] {
        if y >= self.height {
            return &[];
        }
        let start = y as usize * self.width as usize;
        &self.cells[start..start + self.width as usize]
    }

    /// All cells in row-major order.
    #[inline]
    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    /// The characters of one row as a `String` (test and debug helper).
    pub fn row_text(&self, y: u16) -> String {
        self.row(y).iter().map(|c| c.ch).collect()
    }
}
