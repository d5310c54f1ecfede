#![forbid(unsafe_code)]

//! The demo screen: a titled panel with a greeting, a row of buttons that
//! count their presses, and a status line that follows the terminal size.

use elaris::prelude::*;
use elaris::BorderChars;
use tracing::debug;

const ACCENT: PackedRgba = PackedRgba::rgb(95, 175, 255);
const PANEL_BG: PackedRgba = PackedRgba::rgb(24, 26, 33);

/// A focusable button that counts presses (Enter, Space, or a click).
#[derive(Debug, Clone)]
pub struct Button {
    caption: &'static str,
    presses: u32,
}

impl Button {
    pub fn new(caption: &'static str) -> Self {
        Self {
            caption,
            presses: 0,
        }
    }

    pub fn caption(&self) -> &'static str {
        self.caption
    }

    pub fn presses(&self) -> u32 {
        self.presses
    }

    fn press(&mut self) {
        self.presses = self.presses.saturating_add(1);
        debug!(caption = self.caption, presses = self.presses, "button pressed");
    }
}

impl Widget for Button {
    fn render(&self, state: &WidgetState, screen: &mut ScreenBuffer) {
        let b = state.bounds();
        if !b.is_drawable() {
            return;
        }
        let focused = state.is_focused();
        let (fg, bg, border, flags) = if focused {
            (ACCENT, state.bg(), BorderChars::DOUBLE, StyleFlags::BOLD)
        } else {
            (state.fg(), state.bg(), BorderChars::SINGLE, StyleFlags::empty())
        };
        screen.fill_rect(b, ' ', fg, bg);
        screen.draw_border_with(b, border, fg, bg);

        let text = format!("{} {}", self.caption, self.presses);
        let len = i32::try_from(text.chars().count()).unwrap_or(i32::MAX);
        let x = b.x + ((b.width - len).max(0) / 2);
        screen.write_text(x, b.y + b.height / 2, &text, fg, bg, flags);
    }

    fn handle_key(&mut self, key: &KeyEvent, _: &WidgetState) -> bool {
        if key.code == KeyCode::Enter || key.is_char(' ') {
            self.press();
            true
        } else {
            false
        }
    }

    fn handle_click(&mut self, _: Point, _: &WidgetState) -> bool {
        self.press();
        true
    }

    fn is_focusable(&self) -> bool {
        true
    }
}

/// Ids the demo needs after building.
#[derive(Debug, Clone, Copy)]
pub struct Screen {
    pub root: WidgetId,
    pub buttons: [WidgetId; 3],
    pub status: WidgetId,
}

/// Build the widget tree for the demo.
pub fn build() -> Result<(WidgetTree, Screen)> {
    let mut tree = WidgetTree::new();

    let root = tree.insert(
        Panel::new()
            .with_border(BorderStyle::Rounded)
            .with_title("Elaris"),
    );
    tree.set_colors(root, PackedRgba::WHITE, PANEL_BG)?;
    tree.set_layout(root, Layout::new(LayoutPolicy::Vertical).with_padding(1).with_spacing(1))?;

    let greeting = tree.insert_with_bounds(Label::new("Hello, world").bold(), Rect::new(0, 0, 0, 1));
    tree.add_child(root, greeting)?;

    let row = tree.insert_container(
        Layout::new(LayoutPolicy::Horizontal).with_padding(0).with_spacing(2),
        Rect::new(0, 0, 0, 3),
    );
    tree.add_child(root, row)?;

    let buttons = ["One", "Two", "Three"].map(|caption| {
        tree.insert_with_bounds(Button::new(caption), Rect::new(0, 0, 12, 3))
    });
    for &button in &buttons {
        tree.set_colors(button, PackedRgba::GRAY, PANEL_BG)?;
        tree.add_child(row, button)?;
    }

    let help = tree.insert_with_bounds(
        Label::new("Tab/Shift-Tab: focus  Enter/Space: press  Esc: quit"),
        Rect::new(0, 0, 0, 1),
    );
    tree.set_colors(help, PackedRgba::GRAY, PANEL_BG)?;
    tree.add_child(root, help)?;

    let status = tree.insert_with_bounds(Label::new(""), Rect::new(0, 0, 0, 1));
    tree.set_colors(status, ACCENT, PANEL_BG)?;
    tree.add_child(root, status)?;

    tree.set_on_resize(root, move |tree, _, width, height| {
        if let Some(label) = tree.widget_mut::<Label>(status) {
            label.set_text(format!("terminal {width}x{height}"));
        }
    })?;

    Ok((
        tree,
        Screen {
            root,
            buttons,
            status,
        },
    ))
}
