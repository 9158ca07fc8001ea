//! Test utilities for slice-dispatch applications
//!
//! - [`key`]: Create `KeyEvent` from string (e.g., `key("ctrl+c")`)
//! - [`RenderHarness`]: Render components into an in-memory terminal
//! - Assertion macros for verifying emitted actions
//!
//! # Example
//!
//! ```ignore
//! use slice_dispatch::testing::{key, RenderHarness};
//!
//! let actions: Vec<_> = list.handle_event(&EventKind::Key(key("space")), props).into_iter().collect();
//! assert_emitted!(actions, Action::UserLocation(_));
//!
//! let mut render = RenderHarness::new(40, 10);
//! let output = render.render_to_string_plain(|frame| list.render(frame, frame.area(), props));
//! assert!(output.contains("Home"));
//! ```

use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyEventState, KeyModifiers};
use ratatui::backend::TestBackend;
use ratatui::buffer::Buffer;
use ratatui::{Frame, Terminal};

/// Parse a key description such as `"q"`, `"enter"`, `"ctrl+c"` or `"shift+tab"`.
///
/// Returns `None` for unknown key names.
pub fn parse_key(s: &str) -> Option<KeyEvent> {
    let mut modifiers = KeyModifiers::empty();
    let mut parts: Vec<&str> = s.split('+').collect();
    // "+" alone, or a trailing "ctrl++"
    if s.ends_with('+') && parts.len() >= 2 {
        parts.truncate(parts.len() - 2);
        parts.push("+");
    }
    let (code_part, modifier_parts) = parts.split_last()?;

    for part in modifier_parts {
        match part.to_ascii_lowercase().as_str() {
            "ctrl" | "control" => modifiers |= KeyModifiers::CONTROL,
            "alt" => modifiers |= KeyModifiers::ALT,
            "shift" => modifiers |= KeyModifiers::SHIFT,
            _ => return None,
        }
    }

    let code = match code_part.to_ascii_lowercase().as_str() {
        "enter" | "return" => KeyCode::Enter,
        "esc" | "escape" => KeyCode::Esc,
        "tab" if modifiers.contains(KeyModifiers::SHIFT) => {
            modifiers.remove(KeyModifiers::SHIFT);
            KeyCode::BackTab
        }
        "tab" => KeyCode::Tab,
        "backtab" => KeyCode::BackTab,
        "backspace" => KeyCode::Backspace,
        "delete" | "del" => KeyCode::Delete,
        "space" => KeyCode::Char(' '),
        "up" => KeyCode::Up,
        "down" => KeyCode::Down,
        "left" => KeyCode::Left,
        "right" => KeyCode::Right,
        "home" => KeyCode::Home,
        "end" => KeyCode::End,
        _ => {
            let mut chars = code_part.chars();
            match (chars.next(), chars.next()) {
                (Some(c), None) => KeyCode::Char(c),
                _ => return None,
            }
        }
    };

    Some(KeyEvent {
        code,
        modifiers,
        kind: KeyEventKind::Press,
        state: KeyEventState::empty(),
    })
}

/// Create a `KeyEvent` from a key string.
///
/// # Panics
///
/// Panics if the key string cannot be parsed.
pub fn key(s: &str) -> KeyEvent {
    parse_key(s).unwrap_or_else(|| panic!("Invalid key string: {:?}", s))
}

/// Create a `KeyEvent` for a character with no modifiers.
pub fn char_key(c: char) -> KeyEvent {
    KeyEvent {
        code: KeyCode::Char(c),
        modifiers: KeyModifiers::empty(),
        kind: KeyEventKind::Press,
        state: KeyEventState::empty(),
    }
}

/// Render the buffer as plain text, one line per row, trailing spaces trimmed.
pub fn buffer_to_string_plain(buffer: &Buffer) -> String {
    let area = buffer.area;
    let mut lines = Vec::with_capacity(area.height as usize);
    for y in area.top()..area.bottom() {
        let mut line = String::new();
        for x in area.left()..area.right() {
            line.push_str(buffer[(x, y)].symbol());
        }
        lines.push(line.trim_end().to_string());
    }
    lines.join("\n")
}

/// Renders into an in-memory terminal for assertions on output.
pub struct RenderHarness {
    terminal: Terminal<TestBackend>,
}

impl RenderHarness {
    /// Create a harness with the given terminal size.
    ///
    /// # Panics
    ///
    /// Panics if the test terminal cannot be created.
    pub fn new(width: u16, height: u16) -> Self {
        let terminal = Terminal::new(TestBackend::new(width, height))
            .unwrap_or_else(|e| panic!("Failed to create test terminal: {e}"));
        Self { terminal }
    }

    /// Draw one frame and return it as plain text.
    ///
    /// # Panics
    ///
    /// Panics if drawing fails.
    pub fn render_to_string_plain<F>(&mut self, render: F) -> String
    where
        F: FnOnce(&mut Frame),
    {
        let completed = self
            .terminal
            .draw(render)
            .unwrap_or_else(|e| panic!("Failed to draw frame: {e}"));
        buffer_to_string_plain(completed.buffer)
    }
}

/// Assert that a specific action was emitted.
///
/// # Example
///
/// ```ignore
/// let actions: Vec<Action> = component.handle_event(&event, props).into_iter().collect();
/// assert_emitted!(actions, Action::Quit);
/// ```
#[macro_export]
macro_rules! assert_emitted {
    ($actions:expr, $pattern:pat $(if $guard:expr)?) => {
        assert!(
            $actions.iter().any(|a| matches!(a, $pattern $(if $guard)?)),
            "Expected action matching `{}` to be emitted, but got: {:?}",
            stringify!($pattern),
            $actions
        );
    };
}

/// Assert that a specific action was NOT emitted.
#[macro_export]
macro_rules! assert_not_emitted {
    ($actions:expr, $pattern:pat $(if $guard:expr)?) => {
        assert!(
            !$actions.iter().any(|a| matches!(a, $pattern $(if $guard)?)),
            "Expected action matching `{}` NOT to be emitted, but it was: {:?}",
            stringify!($pattern),
            $actions
        );
    };
}

/// Count how many actions match a pattern.
#[macro_export]
macro_rules! count_emitted {
    ($actions:expr, $pattern:pat $(if $guard:expr)?) => {
        $actions.iter().filter(|a| matches!(a, $pattern $(if $guard)?)).count()
    };
}

#[cfg(test)]
mod tests {
    use super::*;
    use ratatui::widgets::Paragraph;

    #[test]
    fn test_key_simple() {
        let k = key("q");
        assert_eq!(k.code, KeyCode::Char('q'));
        assert_eq!(k.modifiers, KeyModifiers::empty());
    }

    #[test]
    fn test_key_with_ctrl() {
        let k = key("ctrl+c");
        assert_eq!(k.code, KeyCode::Char('c'));
        assert!(k.modifiers.contains(KeyModifiers::CONTROL));
    }

    #[test]
    fn test_key_special() {
        assert_eq!(key("esc").code, KeyCode::Esc);
        assert_eq!(key("enter").code, KeyCode::Enter);
        assert_eq!(key("space").code, KeyCode::Char(' '));
        assert_eq!(key("+").code, KeyCode::Char('+'));

        let k = key("shift+tab");
        assert_eq!(k.code, KeyCode::BackTab);
        assert!(k.modifiers.is_empty());
    }

    #[test]
    fn test_parse_key_rejects_unknown() {
        assert!(parse_key("hyper+x").is_none());
        assert!(parse_key("nosuchkey").is_none());
    }

    #[test]
    fn test_char_key() {
        let k = char_key('x');
        assert_eq!(k.code, KeyCode::Char('x'));
        assert_eq!(k.modifiers, KeyModifiers::empty());
    }

    #[test]
    fn test_render_harness_plain_output() {
        let mut render = RenderHarness::new(12, 2);
        let output =
            render.render_to_string_plain(|frame| frame.render_widget(Paragraph::new("hi"), frame.area()));
        assert_eq!(output, "hi\n");
    }

    #[test]
    fn test_assert_macros() {
        let actions = vec![Some(1), None, Some(3)];

        assert_emitted!(actions, Some(1));
        assert_emitted!(actions, Some(n) if *n > 2);
        assert_not_emitted!(actions, Some(2));
        assert_eq!(count_emitted!(actions, Some(_)), 2);
    }
}
