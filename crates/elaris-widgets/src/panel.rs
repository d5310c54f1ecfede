#![forbid(unsafe_code)]

//! Panel widget: background fill, optional border, optional title.

use elaris_core::geometry::Rect;
use elaris_render::cell::StyleFlags;
use elaris_render::drawing::BorderStyle;
use elaris_render::screen::ScreenBuffer;
use crate::label::fit_cells;
use crate::widget::{Widget, WidgetState};

/// A framed region. Children are drawn on top of it by the tree.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Panel {
    border: BorderStyle,
    title: Option<String>,
}

impl Panel {
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_border(mut self, border: BorderStyle) -> Self {
        self.border = border;
        self
    }

    #[must_use]
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    pub fn border(&self) -> BorderStyle {
        self.border
    }

    pub fn title(&self) -> Option<&str> {
        self.title.as_deref()
    }

    pub fn set_title(&mut self, title: Option<String>) {
        self.title = title;
    }

    /// The area inside the border (the full bounds when borderless).
    pub fn inner(&self, bounds: Rect) -> Rect {
        match self.border {
            BorderStyle::None => bounds,
            _ => bounds.inset(1),
        }
    }
}

impl Widget for Panel {
    fn render(&self, state: &WidgetState, screen: &mut ScreenBuffer) {
        let bounds = state.bounds();
        if !bounds.is_drawable() {
            return;
        }
        screen.fill_rect(bounds, ' ', state.fg(), state.bg());

        let Some(chars) = self.border.chars() else {
            return;
        };
        screen.draw_border_with(bounds, chars, state.fg(), state.bg());

        // Title sits on the top edge: "┌ Title ───┐".
        if let Some(title) = self.title.as_deref() {
            let room = usize::try_from(bounds.width - 4).unwrap_or(0);
            if room == 0 {
                return;
            }
            let mut text = String::with_capacity(title.len() + 2);
            text.push(' ');
            text.push_str(&fit_cells(title, room).0);
            text.push(' ');
            screen.write_text(
                bounds.x + 1,
                bounds.y,
                &text,
                state.fg(),
                state.bg(),
                StyleFlags::BOLD,
            );
        }
    }
}
