#![forbid(unsafe_code)]

//! ANSI escape sequence generation.
//!
//! Pure byte-generation functions: no state, no terminal queries. The
//! presenter uses [`encode_cell`] per changed cell; the runtime uses
//! [`startup_sequence`] and [`shutdown_sequence`] once per run.
//!
//! # Sequence Reference
//!
//! | Sequence | Description |
//! |----------|-------------|
//! | `ESC % G` | Select UTF-8 character set |
//! | `ESC [ row ; col H` | CUP (Cursor Position, 1-indexed) |
//! | `ESC [ 1;3;4;38;2;r;g;b;48;2;r;g;b m` | SGR style + true color |
//! | `ESC [ 0 m` | SGR reset |
//! | `ESC [ 2 J` | Erase display |
//! | `ESC [ K` | Erase to end of line |
//! | `ESC [ ? 25 l` / `h` | Hide / show cursor |
//! | `ESC [ ? 1049 h` / `l` | Enter / leave alternate screen |
//!
//! # Cell encoding
//!
//! ```text
//! CUP  "ESC ["  [1;][3;][4;]  38;2;R;G;B  [;48;2;R;G;B]  "m"  glyph  "ESC [0m"
//! ```
//!
//! Style prefixes come before the colors. The background selector is only
//! emitted for a non-transparent background. The trailing reset keeps each
//! cell self-contained, so neighbouring untouched cells keep their look.

use std::io::{self, Write};

use crate::cell::{Cell, PackedRgba, StyleFlags};

// =============================================================================
// Constants
// =============================================================================

/// SGR reset: `CSI 0 m`
pub const SGR_RESET: &[u8] = b"\x1b[0m";
/// Select the UTF-8 character set: `ESC % G`
pub const SELECT_UTF8: &[u8] = b"\x1b%G";
/// Erase the whole display: `CSI 2 J`
pub const CLEAR_SCREEN: &[u8] = b"\x1b[2J";
/// Erase from the cursor to the end of the line: `CSI K`
pub const CLEAR_LINE: &[u8] = b"\x1b[K";
/// Hide the cursor: `CSI ? 25 l`
pub const CURSOR_HIDE: &[u8] = b"\x1b[?25l";
/// Show the cursor: `CSI ? 25 h`
pub const CURSOR_SHOW: &[u8] = b"\x1b[?25h";
/// Enter the alternate screen buffer: `CSI ? 1049 h`
pub const ALT_SCREEN_ENTER: &[u8] = b"\x1b[?1049h";
/// Leave the alternate screen buffer: `CSI ? 1049 l`
pub const ALT_SCREEN_LEAVE: &[u8] = b"\x1b[?1049l";

// =============================================================================
// Control helpers
// =============================================================================

/// Write SGR reset.
#[inline]
pub fn reset<W: Write>(w: &mut W) -> io::Result<()> {
    w.write_all(SGR_RESET)
}

/// Select UTF-8 output.
#[inline]
pub fn select_utf8<W: Write>(w: &mut W) -> io::Result<()> {
    w.write_all(SELECT_UTF8)
}

/// Erase the display.
#[inline]
pub fn clear_screen<W: Write>(w: &mut W) -> io::Result<()> {
    w.write_all(CLEAR_SCREEN)
}

/// Erase from the cursor to the end of the line.
#[inline]
pub fn clear_line<W: Write>(w: &mut W) -> io::Result<()> {
    w.write_all(CLEAR_LINE)
}

/// Hide the cursor.
#[inline]
pub fn cursor_hide<W: Write>(w: &mut W) -> io::Result<()> {
    w.write_all(CURSOR_HIDE)
}

/// Show the cursor.
#[inline]
pub fn cursor_show<W: Write>(w: &mut W) -> io::Result<()> {
    w.write_all(CURSOR_SHOW)
}

/// Enter the alternate screen buffer.
#[inline]
pub fn alt_screen_enter<W: Write>(w: &mut W) -> io::Result<()> {
    w.write_all(ALT_SCREEN_ENTER)
}

/// Leave the alternate screen buffer.
#[inline]
pub fn alt_screen_leave<W: Write>(w: &mut W) -> io::Result<()> {
    w.write_all(ALT_SCREEN_LEAVE)
}

/// Startup sequence: UTF-8 select, alternate screen (optional), clear,
/// hide cursor, in that order.
pub fn startup_sequence<W: Write>(w: &mut W, alternate_screen: bool) -> io::Result<()> {
    select_utf8(w)?;
    if alternate_screen {
        alt_screen_enter(w)?;
    }
    clear_screen(w)?;
    cursor_hide(w)
}

/// Shutdown sequence: show cursor, leave alternate screen (optional), reset
/// style, in that order.
pub fn shutdown_sequence<W: Write>(w: &mut W, alternate_screen: bool) -> io::Result<()> {
    cursor_show(w)?;
    if alternate_screen {
        alt_screen_leave(w)?;
    }
    reset(w)
}

// =============================================================================
// Cursor positioning
// =============================================================================

/// CUP (Cursor Position): `CSI row ; col H`.
///
/// Takes 0-indexed `(row, col)` and emits the 1-indexed form.
pub fn cup<W: Write>(w: &mut W, row: u16, col: u16) -> io::Result<()> {
    write!(
        w,
        "\x1b[{};{}H",
        u32::from(row) + 1,
        u32::from(col) + 1
    )
}

// =============================================================================
// SGR
// =============================================================================

/// Write the style prefix parameters (`1;`, `3;`, `4;`) for set flags.
fn style_params<W: Write>(w: &mut W, flags: StyleFlags) -> io::Result<()> {
    if flags.contains(StyleFlags::BOLD) {
        w.write_all(b"1;")?;
    }
    if flags.contains(StyleFlags::ITALIC) {
        w.write_all(b"3;")?;
    }
    if flags.contains(StyleFlags::UNDERLINE) {
        w.write_all(b"4;")?;
    }
    Ok(())
}

/// Write a full SGR opener for the given colors and flags:
/// `CSI [1;][3;][4;]38;2;r;g;b[;48;2;r;g;b]m`.
pub fn sgr<W: Write>(w: &mut W, fg: PackedRgba, bg: PackedRgba, flags: StyleFlags) -> io::Result<()> {
    w.write_all(b"\x1b[")?;
    style_params(w, flags)?;
    write!(w, "38;2;{};{};{}", fg.r(), fg.g(), fg.b())?;
    if !bg.is_transparent() {
        write!(w, ";48;2;{};{};{}", bg.r(), bg.g(), bg.b())?;
    }
    w.write_all(b"m")
}

/// Encode one cell at 0-indexed `(x, y)`: cursor move, SGR, glyph, reset.
pub fn encode_cell<W: Write>(w: &mut W, x: u16, y: u16, cell: &Cell) -> io::Result<()> {
    cup(w, y, x)?;
    sgr(w, cell.fg, cell.bg, cell.flags)?;
    let mut utf8 = [0u8; 4];
    w.write_all(cell.ch.encode_utf8(&mut utf8).as_bytes())?;
    reset(w)
}

// =============================================================================
// Styled text helpers
// =============================================================================

/// `text` in a true-color foreground, followed by a reset.
pub fn with_fg(text: &str, color: PackedRgba) -> String {
    format!(
        "\x1b[38;2;{};{};{}m{text}\x1b[0m",
        color.r(),
        color.g(),
        color.b()
    )
}

/// `text` on a true-color background, followed by a reset.
pub fn with_bg(text: &str, color: PackedRgba) -> String {
    format!(
        "\x1b[48;2;{};{};{}m{text}\x1b[0m",
        color.r(),
        color.g(),
        color.b()
    )
}

/// `text` with both colors, followed by a reset.
pub fn with_colors(text: &str, fg: PackedRgba, bg: PackedRgba) -> String {
    format!(
        "\x1b[38;2;{};{};{};48;2;{};{};{}m{text}\x1b[0m",
        fg.r(),
        fg.g(),
        fg.b(),
        bg.r(),
        bg.g(),
        bg.b()
    )
}

/// `text` with style flags and a foreground color, followed by a reset.
pub fn with_style(text: &str, fg: PackedRgba, flags: StyleFlags) -> String {
    let mut out = Vec::with_capacity(text.len() + 24);
    // Writing into a Vec cannot fail.
    let _ = sgr(&mut out, fg, PackedRgba::TRANSPARENT, flags);
    out.extend_from_slice(text.as_bytes());
    out.extend_from_slice(SGR_RESET);
    String::from_utf8_lossy(&out).into_owned()
}
