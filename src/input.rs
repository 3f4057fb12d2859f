//! Input model: Keys, symbolic key identifiers, and host events.
//!
//! Hosts either forward crossterm events through
//! [`InputEvent::from_crossterm`] or build [`Key`]s from symbolic
//! identifiers such as `"enter"`, `"space"`, or `"ctrl+o"`.

use crossterm::event::{self, Event, KeyEventKind};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Key codes for keyboard input.
///
/// This is a simplified subset of crossterm's `KeyCode`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KeyCode {
    /// A printable character (space included).
    Char(char),
    /// Function key (F1-F12).
    F(u8),
    /// Backspace key.
    Backspace,
    /// Enter/Return key.
    Enter,
    /// Left arrow.
    Left,
    /// Right arrow.
    Right,
    /// Up arrow.
    Up,
    /// Down arrow.
    Down,
    /// Home key.
    Home,
    /// End key.
    End,
    /// Page Up.
    PageUp,
    /// Page Down.
    PageDown,
    /// Tab key.
    Tab,
    /// Backtab (Shift+Tab).
    BackTab,
    /// Delete key.
    Delete,
    /// Insert key.
    Insert,
    /// Escape key.
    Esc,
}

/// Key modifiers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct KeyModifiers {
    /// Shift key held.
    pub shift: bool,
    /// Control key held.
    pub control: bool,
    /// Alt/Option key held.
    pub alt: bool,
}

impl KeyModifiers {
    /// No modifiers.
    pub const NONE: Self = Self {
        shift: false,
        control: false,
        alt: false,
    };

    /// Control only.
    pub const CONTROL: Self = Self {
        shift: false,
        control: true,
        alt: false,
    };

    /// Check if any modifier is active.
    pub const fn any(&self) -> bool {
        self.shift || self.control || self.alt
    }
}

/// A key press: code plus modifiers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Key {
    /// The key code.
    pub code: KeyCode,
    /// Modifiers held during the key press.
    pub modifiers: KeyModifiers,
}

impl Key {
    /// Enter without modifiers.
    pub const ENTER: Self = Self::plain(KeyCode::Enter);
    /// Space without modifiers.
    pub const SPACE: Self = Self::plain(KeyCode::Char(' '));

    /// Create a key with the given modifiers.
    pub const fn new(code: KeyCode, modifiers: KeyModifiers) -> Self {
        Self { code, modifiers }
    }

    /// Create a key without modifiers.
    pub const fn plain(code: KeyCode) -> Self {
        Self::new(code, KeyModifiers::NONE)
    }

    /// Create a Ctrl+key combination.
    pub const fn ctrl(code: KeyCode) -> Self {
        Self::new(code, KeyModifiers::CONTROL)
    }
}

/// Error returned when a symbolic key identifier cannot be parsed.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum KeyParseError {
    /// The identifier was empty or only modifiers.
    #[error("empty key identifier")]
    Empty,
    /// The key name is not recognized.
    #[error("unknown key `{0}`")]
    UnknownKey(String),
    /// A modifier prefix is not recognized.
    #[error("unknown modifier `{0}`")]
    UnknownModifier(String),
}

impl FromStr for Key {
    type Err = KeyParseError;

    /// Parse identifiers like `enter`, `space`, `x`, `f5`, `ctrl+o`,
    /// `shift+tab`. Names are case-insensitive; a single character is taken
    /// literally.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.is_empty() {
            return Err(KeyParseError::Empty);
        }
        if s.chars().count() == 1 {
            return parse_code(s).map(Self::plain);
        }

        // A trailing '+' is the plus key itself ("ctrl++")
        let (mods, name) = match s.strip_suffix("++") {
            Some(rest) => (Some(rest), "+"),
            None => match s.rsplit_once('+') {
                Some((mods, name)) if !name.is_empty() => (Some(mods), name),
                Some(_) => return Err(KeyParseError::Empty),
                None => (None, s),
            },
        };

        let mut modifiers = KeyModifiers::NONE;
        for part in mods.into_iter().flat_map(|m| m.split('+')) {
            match part.to_ascii_lowercase().as_str() {
                "ctrl" | "control" | "c" => modifiers.control = true,
                "alt" | "meta" | "option" | "m" => modifiers.alt = true,
                "shift" | "s" => modifiers.shift = true,
                "" => return Err(KeyParseError::Empty),
                other => return Err(KeyParseError::UnknownModifier(other.to_string())),
            }
        }

        let code = parse_code(name)?;
        Ok(Self::new(code, modifiers))
    }
}

fn parse_code(name: &str) -> Result<KeyCode, KeyParseError> {
    let mut chars = name.chars();
    if let (Some(c), None) = (chars.next(), chars.next()) {
        return Ok(KeyCode::Char(c));
    }

    let lower = name.to_ascii_lowercase();
    let code = match lower.as_str() {
        "enter" | "return" | "cr" => KeyCode::Enter,
        "space" | "spc" => KeyCode::Char(' '),
        "tab" => KeyCode::Tab,
        "backtab" => KeyCode::BackTab,
        "backspace" | "bs" => KeyCode::Backspace,
        "esc" | "escape" => KeyCode::Esc,
        "left" => KeyCode::Left,
        "right" => KeyCode::Right,
        "up" => KeyCode::Up,
        "down" => KeyCode::Down,
        "home" => KeyCode::Home,
        "end" => KeyCode::End,
        "pageup" | "pgup" => KeyCode::PageUp,
        "pagedown" | "pgdn" => KeyCode::PageDown,
        "delete" | "del" => KeyCode::Delete,
        "insert" | "ins" => KeyCode::Insert,
        f if f.starts_with('f') => match f[1..].parse::<u8>() {
            Ok(n @ 1..=12) => KeyCode::F(n),
            _ => return Err(KeyParseError::UnknownKey(name.to_string())),
        },
        _ => return Err(KeyParseError::UnknownKey(name.to_string())),
    };
    Ok(code)
}

impl fmt::Display for Key {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.modifiers.control {
            f.write_str("ctrl+")?;
        }
        if self.modifiers.alt {
            f.write_str("alt+")?;
        }
        if self.modifiers.shift {
            f.write_str("shift+")?;
        }
        match self.code {
            KeyCode::Char(' ') => f.write_str("space"),
            KeyCode::Char(c) => write!(f, "{c}"),
            KeyCode::F(n) => write!(f, "f{n}"),
            KeyCode::Backspace => f.write_str("backspace"),
            KeyCode::Enter => f.write_str("enter"),
            KeyCode::Left => f.write_str("left"),
            KeyCode::Right => f.write_str("right"),
            KeyCode::Up => f.write_str("up"),
            KeyCode::Down => f.write_str("down"),
            KeyCode::Home => f.write_str("home"),
            KeyCode::End => f.write_str("end"),
            KeyCode::PageUp => f.write_str("pageup"),
            KeyCode::PageDown => f.write_str("pagedown"),
            KeyCode::Tab => f.write_str("tab"),
            KeyCode::BackTab => f.write_str("backtab"),
            KeyCode::Delete => f.write_str("delete"),
            KeyCode::Insert => f.write_str("insert"),
            KeyCode::Esc => f.write_str("esc"),
        }
    }
}

/// Events a host delivers to a widget.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InputEvent {
    /// A key was pressed.
    Key(Key),

    /// Terminal (or widget viewport) was resized.
    Resize {
        /// New width in columns.
        width: u16,
        /// New height in rows.
        height: u16,
    },

    /// Focus gained.
    FocusGained,

    /// Focus lost.
    FocusLost,
}

impl InputEvent {
    /// Convert a crossterm event.
    ///
    /// Returns `None` for events that widgets never consume (mouse, paste,
    /// key release/repeat, unsupported key codes).
    pub fn from_crossterm(event: Event) -> Option<Self> {
        match event {
            Event::Key(key_event) => {
                // Only process key press events (not release or repeat)
                if key_event.kind != KeyEventKind::Press {
                    return None;
                }
                Key::try_from(key_event).ok().map(Self::Key)
            }
            Event::Resize(width, height) => Some(Self::Resize { width, height }),
            Event::FocusGained => Some(Self::FocusGained),
            Event::FocusLost => Some(Self::FocusLost),
            Event::Mouse(_) | Event::Paste(_) => None,
        }
    }
}

impl TryFrom<event::KeyEvent> for Key {
    type Error = KeyParseError;

    fn try_from(key_event: event::KeyEvent) -> Result<Self, Self::Error> {
        let code = match key_event.code {
            event::KeyCode::Char(c) => KeyCode::Char(c),
            event::KeyCode::F(n) => KeyCode::F(n),
            event::KeyCode::Backspace => KeyCode::Backspace,
            event::KeyCode::Enter => KeyCode::Enter,
            event::KeyCode::Left => KeyCode::Left,
            event::KeyCode::Right => KeyCode::Right,
            event::KeyCode::Up => KeyCode::Up,
            event::KeyCode::Down => KeyCode::Down,
            event::KeyCode::Home => KeyCode::Home,
            event::KeyCode::End => KeyCode::End,
            event::KeyCode::PageUp => KeyCode::PageUp,
            event::KeyCode::PageDown => KeyCode::PageDown,
            event::KeyCode::Tab => KeyCode::Tab,
            event::KeyCode::BackTab => KeyCode::BackTab,
            event::KeyCode::Delete => KeyCode::Delete,
            event::KeyCode::Insert => KeyCode::Insert,
            event::KeyCode::Esc => KeyCode::Esc,
            other => return Err(KeyParseError::UnknownKey(format!("{other:?}"))),
        };

        let mods = key_event.modifiers;
        let mut modifiers = KeyModifiers {
            shift: mods.contains(event::KeyModifiers::SHIFT),
            control: mods.contains(event::KeyModifiers::CONTROL),
            alt: mods.contains(event::KeyModifiers::ALT),
        };
        // Shift is already folded into the character itself
        if matches!(code, KeyCode::Char(_)) {
            modifiers.shift = false;
        }

        Ok(Self::new(code, modifiers))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_case::test_case;

    #[test_case("enter", Key::ENTER ; "enter")]
    #[test_case("Enter", Key::ENTER ; "enter mixed case")]
    #[test_case("space", Key::SPACE ; "space name")]
    #[test_case(" ", Key::SPACE ; "literal space")]
    #[test_case("+", Key::plain(KeyCode::Char('+')) ; "literal plus")]
    #[test_case("ctrl+o", Key::ctrl(KeyCode::Char('o')) ; "ctrl o")]
    #[test_case("f5", Key::plain(KeyCode::F(5)) ; "function key")]
    #[test_case("x", Key::plain(KeyCode::Char('x')) ; "single char")]
    #[test_case("E", Key::plain(KeyCode::Char('E')) ; "single char keeps case")]
    #[test_case("shift+tab", Key::new(KeyCode::Tab, KeyModifiers { shift: true, ..KeyModifiers::NONE }) ; "shift tab")]
    #[test_case("ctrl++", Key::ctrl(KeyCode::Char('+')) ; "ctrl plus")]
    fn test_parse_key(input: &str, expected: Key) {
        assert_eq!(input.parse::<Key>(), Ok(expected));
    }

    #[test_case("" ; "empty")]
    #[test_case("ctrl+" ; "modifier only")]
    #[test_case("hyper+x" ; "unknown modifier")]
    #[test_case("f13" ; "function key out of range")]
    #[test_case("launch-missiles" ; "unknown name")]
    fn test_parse_key_rejects(input: &str) {
        assert!(input.parse::<Key>().is_err());
    }

    #[test]
    fn test_parse_error_messages() {
        assert_eq!(
            "hyper+x".parse::<Key>().unwrap_err().to_string(),
            "unknown modifier `hyper`"
        );
        assert_eq!(
            "bogus".parse::<Key>().unwrap_err(),
            KeyParseError::UnknownKey("bogus".to_string())
        );
    }

    #[test]
    fn test_display_round_trips_names() {
        for name in ["enter", "space", "ctrl+o", "f5", "shift+tab", "esc"] {
            let key: Key = name.parse().unwrap();
            assert_eq!(key.to_string(), name);
        }
    }

    #[test]
    fn test_from_crossterm_press_only() {
        let press = event::KeyEvent::new(event::KeyCode::Enter, event::KeyModifiers::NONE);
        assert_eq!(
            InputEvent::from_crossterm(Event::Key(press)),
            Some(InputEvent::Key(Key::ENTER))
        );

        let release = event::KeyEvent::new_with_kind(
            event::KeyCode::Enter,
            event::KeyModifiers::NONE,
            KeyEventKind::Release,
        );
        assert_eq!(InputEvent::from_crossterm(Event::Key(release)), None);
    }

    #[test]
    fn test_from_crossterm_resize_and_ctrl() {
        assert_eq!(
            InputEvent::from_crossterm(Event::Resize(80, 24)),
            Some(InputEvent::Resize { width: 80, height: 24 })
        );

        let ctrl_o = event::KeyEvent::new(event::KeyCode::Char('o'), event::KeyModifiers::CONTROL);
        assert_eq!(
            InputEvent::from_crossterm(Event::Key(ctrl_o)),
            Some(InputEvent::Key(Key::ctrl(KeyCode::Char('o'))))
        );
    }
}
