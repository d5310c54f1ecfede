#![forbid(unsafe_code)]

//! Cell types.
//!
//! A [`Cell`] is one character position on the screen: a single `char`, a
//! foreground and background color, and bold/italic/underline flags. Cells
//! are plain values; the screen buffer replaces them wholesale and compares
//! them field-by-field when diffing.
//!
//! # Layout
//!
//! ```text
//! Cell {
//!     ch: char,          // 4 bytes
//!     fg: PackedRgba,    // 4 bytes
//!     bg: PackedRgba,    // 4 bytes
//!     flags: StyleFlags, // 1 byte (+ padding)
//! }
//! ```

/// A single screen cell.
///
/// # Default
///
/// The default cell is [`Cell::EMPTY`]: a space, opaque white foreground,
/// transparent background, no style flags.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Cell {
    /// The character drawn in this cell.
    pub ch: char,
    /// Foreground color.
    pub fg: PackedRgba,
    /// Background color. Alpha 0 means "leave the terminal's background".
    pub bg: PackedRgba,
    /// Style flags.
    pub flags: StyleFlags,
}

const _: () = assert!(core::mem::size_of::<Cell>() == 16);

impl Cell {
    /// The blank cell every grid starts (and every frame restarts) from.
    pub const EMPTY: Self = Self {
        ch: ' ',
        fg: PackedRgba::WHITE,
        bg: PackedRgba::TRANSPARENT,
        flags: StyleFlags::empty(),
    };

    /// Create a cell with the default colors.
    #[inline]
    pub const fn new(ch: char) -> Self {
        Self { ch, ..Self::EMPTY }
    }

    /// Create a fully specified cell.
    #[inline]
    pub const fn styled(ch: char, fg: PackedRgba, bg: PackedRgba, flags: StyleFlags) -> Self {
        Self { ch, fg, bg, flags }
    }

    /// Replace the character.
    #[inline]
    #[must_use]
    pub const fn with_char(mut self, ch: char) -> Self {
        self.ch = ch;
        self
    }

    /// Set the foreground color.
    #[inline]
    #[must_use]
    pub const fn with_fg(mut self, fg: PackedRgba) -> Self {
        self.fg = fg;
        self
    }

    /// Set the background color.
    #[inline]
    #[must_use]
    pub const fn with_bg(mut self, bg: PackedRgba) -> Self {
        self.bg = bg;
        self
    }

    /// Set the style flags.
    #[inline]
    #[must_use]
    pub const fn with_flags(mut self, flags: StyleFlags) -> Self {
        self.flags = flags;
        self
    }

    /// True if this cell equals [`Cell::EMPTY`].
    #[inline]
    pub fn is_empty(&self) -> bool {
        *self == Self::EMPTY
    }
}

impl Default for Cell {
    fn default() -> Self {
        Self::EMPTY
    }
}

/// A compact RGBA color.
///
/// - **Size:** 4 bytes.
/// - **Layout:** `0xRRGGBBAA` (R in bits 31..24, A in bits 7..0).
///
/// The toolkit never blends: alpha only distinguishes "transparent" (0) from
/// "painted" (anything else).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Hash)]
#[repr(transparent)]
pub struct PackedRgba(pub u32);

impl PackedRgba {
    /// Fully transparent (alpha = 0).
    pub const TRANSPARENT: Self = Self(0);
    /// Opaque black.
    pub const BLACK: Self = Self::rgb(0, 0, 0);
    /// Opaque white.
    pub const WHITE: Self = Self::rgb(255, 255, 255);
    /// Opaque red.
    pub const RED: Self = Self::rgb(255, 0, 0);
    /// Opaque green.
    pub const GREEN: Self = Self::rgb(0, 255, 0);
    /// Opaque blue.
    pub const BLUE: Self = Self::rgb(0, 0, 255);
    /// Opaque yellow.
    pub const YELLOW: Self = Self::rgb(255, 255, 0);
    /// Opaque cyan.
    pub const CYAN: Self = Self::rgb(0, 255, 255);
    /// Opaque gray.
    pub const GRAY: Self = Self::rgb(128, 128, 128);

    /// Create an opaque RGB color (alpha = 255).
    #[inline]
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self::rgba(r, g, b, 255)
    }

    /// Create an RGBA color with explicit alpha.
    #[inline]
    pub const fn rgba(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self(((r as u32) << 24) | ((g as u32) << 16) | ((b as u32) << 8) | (a as u32))
    }

    /// Red channel.
    #[inline]
    pub const fn r(self) -> u8 {
        (self.0 >> 24) as u8
    }

    /// Green channel.
    #[inline]
    pub const fn g(self) -> u8 {
        (self.0 >> 16) as u8
    }

    /// Blue channel.
    #[inline]
    pub const fn b(self) -> u8 {
        (self.0 >> 8) as u8
    }

    /// Alpha channel.
    #[inline]
    pub const fn a(self) -> u8 {
        self.0 as u8
    }

    /// True when alpha is zero.
    #[inline]
    pub const fn is_transparent(self) -> bool {
        self.a() == 0
    }
}

bitflags::bitflags! {
    /// Cell style flags.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct StyleFlags: u8 {
        /// Bold / increased intensity.
        const BOLD      = 0b0000_0001;
        /// Italic text.
        const ITALIC    = 0b0000_0010;
        /// Underlined text.
        const UNDERLINE = 0b0000_0100;
    }
}
