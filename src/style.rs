//! Style: Colors, text modifiers, and SGR emission for rendered blocks.
//!
//! Rendered output is plain text with embedded SGR escape sequences. Every
//! styled span is closed with a reset so spans never bleed into each other
//! and truncating a line never leaves the terminal in a styled state.

use bitflags::bitflags;
use std::fmt::Write;

/// True-color RGB representation.
#[derive(Clone, Copy, PartialEq, Eq, Default, Hash)]
pub struct Rgb {
    /// Red channel (0-255)
    pub r: u8,
    /// Green channel (0-255)
    pub g: u8,
    /// Blue channel (0-255)
    pub b: u8,
}

impl Rgb {
    /// Create a new RGB color.
    #[inline]
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// White (255, 255, 255)
    pub const WHITE: Self = Self::new(255, 255, 255);

    /// Create from a 24-bit hex color (e.g., 0xFF5500).
    #[inline]
    pub const fn from_u32(hex: u32) -> Self {
        Self::new(
            ((hex >> 16) & 0xFF) as u8,
            ((hex >> 8) & 0xFF) as u8,
            (hex & 0xFF) as u8,
        )
    }
}

impl std::fmt::Debug for Rgb {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

bitflags! {
    /// Text style modifiers.
    ///
    /// These can be combined using bitwise OR.
    ///
    /// # Example
    /// ```
    /// use foldout::Modifiers;
    /// let style = Modifiers::BOLD | Modifiers::DIM;
    /// ```
    #[derive(Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct Modifiers: u8 {
        /// Bold text
        const BOLD = 0b0000_0001;
        /// Dim/faint text
        const DIM = 0b0000_0010;
        /// Italic text
        const ITALIC = 0b0000_0100;
        /// Underlined text
        const UNDERLINE = 0b0000_1000;
        /// Reversed colors (fg/bg swapped)
        const REVERSED = 0b0010_0000;
        /// Strikethrough text
        const STRIKETHROUGH = 0b1000_0000;
    }
}

impl std::fmt::Debug for Modifiers {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        bitflags::parser::to_writer(self, f)
    }
}

/// SGR parameter for each modifier, in emission order.
const MODIFIER_CODES: [(Modifiers, u8); 6] = [
    (Modifiers::BOLD, 1),
    (Modifiers::DIM, 2),
    (Modifiers::ITALIC, 3),
    (Modifiers::UNDERLINE, 4),
    (Modifiers::REVERSED, 7),
    (Modifiers::STRIKETHROUGH, 9),
];

/// Foreground color plus modifiers for a span of text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Hash)]
pub struct Style {
    /// Foreground color (`None` = terminal default).
    pub fg: Option<Rgb>,
    /// Text modifiers.
    pub modifiers: Modifiers,
}

impl Style {
    /// The unstyled style.
    pub const PLAIN: Self = Self {
        fg: None,
        modifiers: Modifiers::empty(),
    };

    /// A style with only a foreground color.
    pub const fn fg(color: Rgb) -> Self {
        Self {
            fg: Some(color),
            modifiers: Modifiers::empty(),
        }
    }

    /// Add modifiers to this style.
    #[must_use]
    pub const fn with_modifiers(mut self, modifiers: Modifiers) -> Self {
        self.modifiers = self.modifiers.union(modifiers);
        self
    }

    /// Whether painting with this style emits no escape sequences.
    pub const fn is_plain(&self) -> bool {
        self.fg.is_none() && self.modifiers.is_empty()
    }

    /// Append `text` wrapped in this style's SGR sequences to `out`.
    pub fn paint_into(&self, text: &str, out: &mut String) {
        if self.is_plain() || text.is_empty() {
            out.push_str(text);
            return;
        }

        for (modifier, code) in MODIFIER_CODES {
            if self.modifiers.contains(modifier) {
                let _ = write!(out, "\x1b[{code}m");
            }
        }
        if let Some(color) = self.fg {
            let _ = write!(out, "\x1b[38;2;{};{};{}m", color.r, color.g, color.b);
        }
        out.push_str(text);
        out.push_str("\x1b[0m");
    }

    /// Return `text` wrapped in this style's SGR sequences.
    pub fn paint(&self, text: &str) -> String {
        let mut out = String::with_capacity(text.len() + 24);
        self.paint_into(text, &mut out);
        out
    }
}

/// Styles used by the block renderers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Theme {
    /// Header label.
    pub header: Style,
    /// Source descriptor in the header.
    pub source: Style,
    /// Idle status icon.
    pub idle: Style,
    /// Running status icon.
    pub running: Style,
    /// Complete status icon.
    pub complete: Style,
    /// Error status icon.
    pub error: Style,
    /// Warning status icon.
    pub warning: Style,
    /// Plain buffer lines and unchanged diff lines.
    pub content: Style,
    /// Added diff lines.
    pub added: Style,
    /// Removed diff lines.
    pub removed: Style,
    /// Elided-run separators, truncation notices, and summaries.
    pub muted: Style,
    /// Line number gutters.
    pub gutter: Style,
    /// Modifiers added to the header while the block is focused.
    pub focus: Modifiers,
}

impl Default for Theme {
    fn default() -> Self {
        Self {
            header: Style::fg(Rgb::new(220, 220, 220)),
            source: Style::fg(Rgb::new(130, 130, 130)),
            idle: Style::fg(Rgb::new(130, 130, 130)),
            running: Style::fg(Rgb::new(100, 160, 240)),
            complete: Style::fg(Rgb::new(0, 200, 100)),
            error: Style::fg(Rgb::new(230, 80, 80)),
            warning: Style::fg(Rgb::new(230, 190, 60)),
            content: Style::fg(Rgb::new(200, 200, 200)),
            added: Style::fg(Rgb::new(0, 200, 100)),
            removed: Style::fg(Rgb::new(230, 80, 80)),
            muted: Style::fg(Rgb::new(120, 120, 120)).with_modifiers(Modifiers::DIM),
            gutter: Style::fg(Rgb::new(100, 100, 100)),
            focus: Modifiers::BOLD,
        }
    }
}

impl Theme {
    /// A theme that emits no escape sequences at all.
    pub const fn plain() -> Self {
        Self {
            header: Style::PLAIN,
            source: Style::PLAIN,
            idle: Style::PLAIN,
            running: Style::PLAIN,
            complete: Style::PLAIN,
            error: Style::PLAIN,
            warning: Style::PLAIN,
            content: Style::PLAIN,
            added: Style::PLAIN,
            removed: Style::PLAIN,
            muted: Style::PLAIN,
            gutter: Style::PLAIN,
            focus: Modifiers::empty(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rgb_from_u32() {
        assert_eq!(Rgb::from_u32(0xFF5500), Rgb::new(255, 85, 0));
    }

    #[test]
    fn test_plain_style_passes_through() {
        assert_eq!(Style::PLAIN.paint("hello"), "hello");
    }

    #[test]
    fn test_paint_wraps_and_resets() {
        let style = Style::fg(Rgb::new(1, 2, 3)).with_modifiers(Modifiers::BOLD);
        assert_eq!(style.paint("x"), "\x1b[1m\x1b[38;2;1;2;3mx\x1b[0m");
    }

    #[test]
    fn test_paint_empty_text_emits_nothing() {
        let style = Style::fg(Rgb::WHITE);
        assert_eq!(style.paint(""), "");
    }

    #[test]
    fn test_modifiers_combine() {
        let style = Style::PLAIN
            .with_modifiers(Modifiers::BOLD)
            .with_modifiers(Modifiers::DIM);
        assert!(style.modifiers.contains(Modifiers::BOLD | Modifiers::DIM));
        assert!(!style.is_plain());
    }
}
