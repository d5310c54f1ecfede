#![forbid(unsafe_code)]

//! Single-line text label.

use elaris_render::cell::StyleFlags;
use elaris_render::screen::ScreenBuffer;
use unicode_width::UnicodeWidthChar;

use crate::widget::{Widget, WidgetState};

/// Horizontal placement of text within the widget's bounds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Alignment {
    #[default]
    Left,
    Center,
    Right,
}

/// A line of text drawn on the first row of the widget's bounds.
///
/// The screen grid holds one `char` per cell, so text longer than the bounds
/// is truncated to one cell per character. Zero-width and control characters
/// are dropped. Not focusable.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Label {
    text: String,
    flags: StyleFlags,
    alignment: Alignment,
}

impl Label {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn with_flags(mut self, flags: StyleFlags) -> Self {
        self.flags = flags;
        self
    }

    #[must_use]
    pub fn with_alignment(mut self, alignment: Alignment) -> Self {
        self.alignment = alignment;
        self
    }

    #[must_use]
    pub fn bold(self) -> Self {
        let flags = self.flags | StyleFlags::BOLD;
        self.with_flags(flags)
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn set_text(&mut self, text: impl Into<String>) {
        self.text = text.into();
    }

    pub fn flags(&self) -> StyleFlags {
        self.flags
    }

    pub fn set_flags(&mut self, flags: StyleFlags) {
        self.flags = flags;
    }

    /// The prefix of the text that fits in `max_width` cells, and its length.
    fn visible_text(&self, max_width: usize) -> (String, usize) {
        fit_cells(&self.text, max_width)
    }
}

/// Keep the printable characters of `text` that fit in `max_cells` grid
/// cells, matching [`ScreenBuffer::write_text`]'s one cell per `char`.
pub(crate) fn fit_cells(text: &str, max_cells: usize) -> (String, usize) {
    let out: String = text
        .chars()
        .filter(|ch| ch.width().is_some_and(|w| w > 0))
        .take(max_cells)
        .collect();
    let used = out.chars().count();
    (out, used)
}

impl Widget for Label {
    fn render(&self, state: &WidgetState, screen: &mut ScreenBuffer) {
        let bounds = state.bounds();
        if !bounds.is_drawable() || self.text.is_empty() {
            return;
        }
        let max_width = usize::try_from(bounds.width).unwrap_or(0);
        let (text, used) = self.visible_text(max_width);
        let slack = i32::try_from(max_width - used).unwrap_or(0);
        let x = match self.alignment {
            Alignment::Left => bounds.x,
            Alignment::Center => bounds.x + slack / 2,
            Alignment::Right => bounds.x + slack,
        };
        screen.write_text(x, bounds.y, &text, state.fg(), state.bg(), self.flags);
    }
}
