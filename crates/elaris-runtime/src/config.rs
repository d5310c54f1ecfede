#![forbid(unsafe_code)]

//! Application configuration.
//!
//! # Environment overrides
//!
//! [`AppConfig::from_env`] starts from the defaults and applies:
//!
//! | Variable         | Effect                                  |
//! |------------------|-----------------------------------------|
//! | `ELARIS_FPS`     | target frames per second (1 to 1000)    |
//! | `ELARIS_POLL_MS` | input poll timeout in milliseconds      |
//! | `ELARIS_MOUSE`   | `1`/`true` enables mouse capture        |
//!
//! Values that do not parse are ignored with a warning.

use std::time::Duration;

use elaris_core::event::{KeyCode, KeyEvent, Modifiers};
use elaris_widgets::WidgetId;
use tracing::warn;

/// Default target frame rate.
pub const DEFAULT_FPS: u32 = 30;
/// Highest accepted target frame rate.
pub const MAX_FPS: u32 = 1_000;

/// One key plus the exact modifier set that triggers a binding.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct KeyBinding {
    pub code: KeyCode,
    pub modifiers: Modifiers,
}

impl KeyBinding {
    pub const fn new(code: KeyCode, modifiers: Modifiers) -> Self {
        Self { code, modifiers }
    }

    /// A binding with no modifiers held.
    pub const fn plain(code: KeyCode) -> Self {
        Self::new(code, Modifiers::NONE)
    }

    /// Ctrl plus a character.
    pub const fn ctrl(c: char) -> Self {
        Self::new(KeyCode::Char(c), Modifiers::CTRL)
    }

    /// True if `key` has this code and exactly these modifiers.
    pub fn matches(&self, key: &KeyEvent) -> bool {
        key.code == self.code && key.modifiers == self.modifiers
    }
}

/// What a reserved key does. Reserved keys never reach widgets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KeyAction {
    Quit,
    FocusNext,
    FocusPrevious,
}

/// The reserved bindings the loop handles before widget dispatch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyBindings {
    pub quit: Vec<KeyBinding>,
    pub focus_next: Vec<KeyBinding>,
    pub focus_previous: Vec<KeyBinding>,
}

impl Default for KeyBindings {
    fn default() -> Self {
        Self {
            quit: vec![KeyBinding::plain(KeyCode::Escape), KeyBinding::ctrl('c')],
            focus_next: vec![KeyBinding::plain(KeyCode::Tab)],
            focus_previous: vec![
                KeyBinding::new(KeyCode::Tab, Modifiers::SHIFT),
                KeyBinding::plain(KeyCode::BackTab),
                KeyBinding::new(KeyCode::BackTab, Modifiers::SHIFT),
            ],
        }
    }
}

impl KeyBindings {
    /// No reserved keys at all; every key goes to the focused widget.
    pub fn none() -> Self {
        Self {
            quit: Vec::new(),
            focus_next: Vec::new(),
            focus_previous: Vec::new(),
        }
    }

    #[must_use]
    pub fn with_quit(mut self, keys: Vec<KeyBinding>) -> Self {
        self.quit = keys;
        self
    }

    #[must_use]
    pub fn with_focus_next(mut self, keys: Vec<KeyBinding>) -> Self {
        self.focus_next = keys;
        self
    }

    #[must_use]
    pub fn with_focus_previous(mut self, keys: Vec<KeyBinding>) -> Self {
        self.focus_previous = keys;
        self
    }

    /// The reserved action for `key`, checked quit first.
    pub fn action(&self, key: &KeyEvent) -> Option<KeyAction> {
        let hit = |list: &[KeyBinding]| list.iter().any(|b| b.matches(key));
        if hit(&self.quit) {
            Some(KeyAction::Quit)
        } else if hit(&self.focus_next) {
            Some(KeyAction::FocusNext)
        } else if hit(&self.focus_previous) {
            Some(KeyAction::FocusPrevious)
        } else {
            None
        }
    }
}

/// Configuration for an [`Application`](crate::Application).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    /// Target time between frame starts.
    pub frame_interval: Duration,
    /// Longest the loop waits for input in one iteration.
    pub input_poll_timeout: Duration,
    /// Upper bound on events dispatched per iteration.
    pub max_events_per_frame: usize,
    pub key_bindings: KeyBindings,
    /// Preferred widget to focus at startup. Ignored unless focusable.
    pub initial_focus: Option<WidgetId>,
    pub mouse_capture: bool,
    pub alternate_screen: bool,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            frame_interval: fps_interval(DEFAULT_FPS),
            input_poll_timeout: Duration::from_millis(10),
            max_events_per_frame: 1,
            key_bindings: KeyBindings::default(),
            initial_focus: None,
            mouse_capture: false,
            alternate_screen: true,
        }
    }
}

impl AppConfig {
    /// Defaults plus any `ELARIS_*` overrides from the process environment.
    pub fn from_env() -> Self {
        Self::default().with_env_overrides(|name| std::env::var(name).ok())
    }

    /// Apply overrides read through `lookup`.
    #[must_use]
    pub fn with_env_overrides(mut self, lookup: impl Fn(&str) -> Option<String>) -> Self {
        if let Some(raw) = lookup("ELARIS_FPS") {
            match raw.trim().parse::<u32>() {
                Ok(fps) => self = self.with_target_fps(fps),
                Err(_) => warn!(value = %raw, "ignoring unparseable ELARIS_FPS"),
            }
        }
        if let Some(raw) = lookup("ELARIS_POLL_MS") {
            match raw.trim().parse::<u64>() {
                Ok(ms) => self.input_poll_timeout = Duration::from_millis(ms),
                Err(_) => warn!(value = %raw, "ignoring unparseable ELARIS_POLL_MS"),
            }
        }
        if let Some(raw) = lookup("ELARIS_MOUSE") {
            match raw.trim().to_ascii_lowercase().as_str() {
                "1" | "true" => self.mouse_capture = true,
                "0" | "false" => self.mouse_capture = false,
                _ => warn!(value = %raw, "ignoring unparseable ELARIS_MOUSE"),
            }
        }
        self
    }

    #[must_use]
    pub fn with_frame_interval(mut self, interval: Duration) -> Self {
        self.frame_interval = interval;
        self
    }

    /// Set the frame interval from a rate; `fps` is clamped to `1..=MAX_FPS`.
    #[must_use]
    pub fn with_target_fps(mut self, fps: u32) -> Self {
        self.frame_interval = fps_interval(fps);
        self
    }

    #[must_use]
    pub fn with_input_poll_timeout(mut self, timeout: Duration) -> Self {
        self.input_poll_timeout = timeout;
        self
    }

    /// Clamped to at least 1.
    #[must_use]
    pub fn with_max_events_per_frame(mut self, max: usize) -> Self {
        self.max_events_per_frame = max.max(1);
        self
    }

    #[must_use]
    pub fn with_key_bindings(mut self, bindings: KeyBindings) -> Self {
        self.key_bindings = bindings;
        self
    }

    #[must_use]
    pub fn with_initial_focus(mut self, id: WidgetId) -> Self {
        self.initial_focus = Some(id);
        self
    }

    #[must_use]
    pub fn with_mouse_capture(mut self, enabled: bool) -> Self {
        self.mouse_capture = enabled;
        self
    }

    #[must_use]
    pub fn with_alternate_screen(mut self, enabled: bool) -> Self {
        self.alternate_screen = enabled;
        self
    }
}

fn fps_interval(fps: u32) -> Duration {
    Duration::from_secs(1) / fps.clamp(1, MAX_FPS)
}
