//! End-to-end tests for the draw → diff → encode → flush pipeline.
//!
//! Covers the exact per-frame byte stream the terminal receives:
//! - cells are emitted row-major as `CUP SGR glyph reset`
//! - the frame is bracketed by hide/show cursor
//! - a frame redrawn identically after `clear()` emits nothing
//! - erasing a cell (drawing nothing there) emits an empty cell

use elaris_core::geometry::Rect;
use elaris_render::cell::{PackedRgba, StyleFlags};
use elaris_render::drawing::BorderChars;
use elaris_render::screen::ScreenBuffer;

fn draw_frame(screen: &mut ScreenBuffer, label: &str) {
    screen.clear();
    screen.fill_rect(Rect::new(0, 0, 6, 3), ' ', PackedRgba::WHITE, PackedRgba::BLACK);
    screen.draw_border_with(Rect::new(0, 0, 6, 3), BorderChars::ASCII, PackedRgba::WHITE, PackedRgba::BLACK);
    screen.write_text(1, 1, label, PackedRgba::GREEN, PackedRgba::BLACK, StyleFlags::BOLD);
}

#[test]
fn first_frame_draws_every_painted_cell() {
    let mut screen = ScreenBuffer::new(8, 3);
    draw_frame(&mut screen, "ok");

    let mut out = Vec::new();
    let stats = screen.flush(&mut out).unwrap();

    // 6x3 filled panel; columns 6 and 7 stay empty.
    assert_eq!(stats.cells_written, 18);
    let text = String::from_utf8(out).unwrap();
    assert!(text.starts_with("\x1b[?25l\x1b[1;1H"));
    assert!(text.ends_with("\x1b[?25h"));
    assert!(text.contains("\x1b[2;2H\x1b[1;38;2;0;255;0;48;2;0;0;0mo\x1b[0m"));
    assert_eq!(stats.bytes_written, text.len() as u64);
}

#[test]
fn identical_frame_is_free() {
    let mut screen = ScreenBuffer::new(8, 3);
    draw_frame(&mut screen, "ok");
    screen.flush(&mut Vec::new()).unwrap();

    draw_frame(&mut screen, "ok");
    let mut out = Vec::new();
    let stats = screen.flush(&mut out).unwrap();
    assert!(stats.is_idle());
    assert!(out.is_empty());
}

#[test]
fn only_the_changed_glyph_is_sent() {
    let mut screen = ScreenBuffer::new(8, 3);
    draw_frame(&mut screen, "ok");
    screen.flush(&mut Vec::new()).unwrap();

    draw_frame(&mut screen, "oh");
    let mut out = Vec::new();
    let stats = screen.flush(&mut out).unwrap();
    assert_eq!(stats.cells_written, 1);
    assert_eq!(
        out,
        b"\x1b[?25l\x1b[2;3H\x1b[1;38;2;0;255;0;48;2;0;0;0mh\x1b[0m\x1b[?25h"
    );
}

#[test]
fn vacated_cells_are_blanked() {
    let mut screen = ScreenBuffer::new(4, 1);
    screen.write_text(0, 0, "ab", PackedRgba::WHITE, PackedRgba::TRANSPARENT, StyleFlags::empty());
    screen.flush(&mut Vec::new()).unwrap();

    screen.clear();
    screen.write_text(0, 0, "a", PackedRgba::WHITE, PackedRgba::TRANSPARENT, StyleFlags::empty());
    let mut out = Vec::new();
    let stats = screen.flush(&mut out).unwrap();
    assert_eq!(stats.cells_written, 1);
    assert!(String::from_utf8(out).unwrap().contains("\x1b[1;2H\x1b[38;2;255;255;255m \x1b[0m"));
}
