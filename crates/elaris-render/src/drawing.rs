#![forbid(unsafe_code)]

//! Border glyph sets.
//!
//! [`BorderChars`] holds the six characters a box outline needs.
//! [`BorderStyle`] is the coarse choice widgets expose to callers and maps
//! onto one of the presets.

/// Characters used to draw a border around a rectangle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BorderChars {
    pub top_left: char,
    pub top_right: char,
    pub bottom_left: char,
    pub bottom_right: char,
    pub horizontal: char,
    pub vertical: char,
}

impl BorderChars {
    /// Single-line box drawing (U+250x). The default border.
    pub const SINGLE: Self = Self {
        top_left: '┌',
        top_right: '┐',
        bottom_left: '└',
        bottom_right: '┘',
        horizontal: '─',
        vertical: '│',
    };

    /// Rounded corners.
    pub const ROUNDED: Self = Self {
        top_left: '╭',
        top_right: '╮',
        bottom_left: '╰',
        bottom_right: '╯',
        ..Self::SINGLE
    };

    /// Double-line border.
    pub const DOUBLE: Self = Self {
        top_left: '╔',
        top_right: '╗',
        bottom_left: '╚',
        bottom_right: '╝',
        horizontal: '═',
        vertical: '║',
    };

    /// Heavy (thick) border.
    pub const HEAVY: Self = Self {
        top_left: '┏',
        top_right: '┓',
        bottom_left: '┗',
        bottom_right: '┛',
        horizontal: '━',
        vertical: '┃',
    };

    /// ASCII-only border for terminals without box-drawing glyphs.
    pub const ASCII: Self = Self {
        top_left: '+',
        top_right: '+',
        bottom_left: '+',
        bottom_right: '+',
        horizontal: '-',
        vertical: '|',
    };
}

impl Default for BorderChars {
    fn default() -> Self {
        Self::SINGLE
    }
}

/// Border choice for widgets that optionally outline themselves.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BorderStyle {
    #[default]
    None,
    Single,
    Double,
    Rounded,
}

impl BorderStyle {
    /// The glyph set for this style, or `None` when no border is drawn.
    pub const fn chars(self) -> Option<BorderChars> {
        match self {
            Self::None => None,
            Self::Single => Some(BorderChars::SINGLE),
            Self::Double => Some(BorderChars::DOUBLE),
            Self::Rounded => Some(BorderChars::ROUNDED),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rounded_keeps_single_edges() {
        assert_eq!(BorderChars::ROUNDED.horizontal, '─');
        assert_eq!(BorderChars::ROUNDED.vertical, '│');
        assert_eq!(BorderChars::ROUNDED.top_left, '╭');
    }

    #[test]
    fn style_mapping() {
        assert_eq!(BorderStyle::None.chars(), None);
        assert_eq!(BorderStyle::Single.chars(), Some(BorderChars::SINGLE));
        assert_eq!(BorderStyle::Double.chars(), Some(BorderChars::DOUBLE));
        assert_eq!(BorderStyle::Rounded.chars(), Some(BorderChars::ROUNDED));
        assert_eq!(BorderStyle::default(), BorderStyle::None);
        assert_eq!(BorderChars::default(), BorderChars::SINGLE);
    }
}
