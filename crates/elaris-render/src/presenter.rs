#![forbid(unsafe_code)]

//! Presenter: turns a buffer diff into terminal output.
//!
//! Each changed cell is emitted as a self-contained
//! `cursor move + SGR + glyph + reset` unit (see [`crate::ansi`]), so the
//! presenter keeps no style state between cells. The whole frame is
//! buffered and flushed once, bracketed by hide/show cursor.
//!
//! # Usage
//!
//! ```
//! use elaris_render::buffer::Buffer;
//! use elaris_render::cell::Cell;
//! use elaris_render::diff::BufferDiff;
//! use elaris_render::presenter::Presenter;
//!
//! let current = Buffer::new(10, 2);
//! let mut next = Buffer::new(10, 2);
//! next.set(0, 0, Cell::new('A'));
//!
//! let diff = BufferDiff::compute(&current, &next);
//! let mut presenter = Presenter::new(Vec::new());
//! let stats = presenter.present(&next, &diff, false)?;
//! assert_eq!(stats.cells_written, 1);
//! # Ok::<(), std::io::Error>(())
//! ```

use std::io::{self, BufWriter, Write};

use crate::ansi;
use crate::buffer::Buffer;
use crate::diff::BufferDiff;

/// Size of the internal write buffer (64KB).
const BUFFER_CAPACITY: usize = 64 * 1024;

/// What one presented frame cost.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FlushStats {
    /// Cells emitted (equals the diff length).
    pub cells_written: usize,
    /// Bytes handed to the writer, control sequences included.
    pub bytes_written: u64,
}

impl FlushStats {
    /// True when the frame emitted no cells.
    #[inline]
    pub const fn is_idle(&self) -> bool {
        self.cells_written == 0
    }
}

/// Counts bytes on their way into the buffered writer.
struct ByteCounter<W: Write> {
    inner: W,
    count: u64,
}

impl<W: Write> Write for ByteCounter<W> {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        let n = self.inner.write(buf)?;
        self.count += n as u64;
        Ok(n)
    }

    fn flush(&mut self) -> io::Result<()> {
        self.inner.flush()
    }
}

/// Stateless ANSI presenter over a buffered writer.
pub struct Presenter<W: Write> {
    writer: ByteCounter<BufWriter<W>>,
}

impl<W: Write> Presenter<W> {
    /// Create a new presenter writing to `writer`.
    pub fn new(writer: W) -> Self {
        Self {
            writer: ByteCounter {
                inner: BufWriter::with_capacity(BUFFER_CAPACITY, writer),
                count: 0,
            },
        }
    }

    /// Present the cells named by `diff`, reading their values from `buffer`.
    ///
    /// Order: hide cursor, optional clear-screen, changed cells in row-major
    /// order, show cursor, flush. An empty diff without a pending clear
    /// writes nothing at all.
    pub fn present(
        &mut self,
        buffer: &Buffer,
        diff: &BufferDiff,
        clear_first: bool,
    ) -> io::Result<FlushStats> {
        if diff.is_empty() && !clear_first {
            return Ok(FlushStats::default());
        }

        let start = self.writer.count;
        let w = &mut self.writer;

        ansi::cursor_hide(w)?;
        if clear_first {
            ansi::clear_screen(w)?;
        }
        let mut cells = 0usize;
        for (x, y) in diff.iter() {
            if let Some(cell) = buffer.get(x, y) {
                ansi::encode_cell(w, x, y, cell)?;
                cells += 1;
            }
        }
        ansi::cursor_show(w)?;
        w.flush()?;

        Ok(FlushStats {
            cells_written: cells,
            bytes_written: self.writer.count - start,
        })
    }

    /// Write raw bytes (startup/shutdown sequences) and flush.
    pub fn write_raw(&mut self, bytes: &[u8]) -> io::Result<()> {
        self.writer.write_all(bytes)?;
        self.writer.flush()
    }

    /// Total bytes written over the presenter's lifetime.
    #[inline]
    pub fn bytes_written(&self) -> u64 {
        self.writer.count
    }

    /// Borrow the underlying writer.
    pub fn get_ref(&self) -> &W {
        self.writer.inner.get_ref()
    }

    /// Flush and recover the underlying writer.
    pub fn into_inner(self) -> io::Result<W> {
        self.writer.inner.into_inner().map_err(|e| e.into_error())
    }
}
