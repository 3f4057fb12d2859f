//! Text measurement: Display widths, truncation, and wrapping.
//!
//! Every function here is grapheme-aware and takes the width function as a
//! parameter, so hosts with their own notion of cell width (ambiguous-width
//! CJK, emoji presentation) can plug it in through [`Measure`].

use unicode_segmentation::UnicodeSegmentation;
use unicode_width::UnicodeWidthStr;

/// A display-width function for strings.
pub type Measure = fn(&str) -> usize;

/// Columns a tab expands to.
const TAB_WIDTH: usize = 4;

/// Marker appended to truncated lines.
pub const ELLIPSIS: &str = "…";

/// Default display width: Unicode East Asian Width rules.
pub fn display_width(text: &str) -> usize {
    UnicodeWidthStr::width(text)
}

/// Truncate `text` so its width is at most `width`.
///
/// Text that does not fit is cut at a grapheme boundary and ends with
/// [`ELLIPSIS`].
pub fn truncate(text: &str, width: usize, measure: Measure) -> String {
    if measure(text) <= width {
        return text.to_string();
    }
    if width == 0 {
        return String::new();
    }

    let budget = width.saturating_sub(measure(ELLIPSIS));
    let mut used = 0;
    let mut out = String::with_capacity(text.len());
    for grapheme in text.graphemes(true) {
        let w = measure(grapheme);
        if used + w > budget {
            break;
        }
        used += w;
        out.push_str(grapheme);
    }
    out.push_str(ELLIPSIS);
    out
}

/// Hard-wrap `text` into rows no wider than `width`.
///
/// Always returns at least one row. Graphemes wider than the whole row are
/// dropped.
pub fn wrap(text: &str, width: usize, measure: Measure) -> Vec<String> {
    let mut rows = Vec::new();
    let mut row = String::new();
    let mut used = 0;

    for grapheme in text.graphemes(true) {
        let w = measure(grapheme);
        if w > width {
            continue;
        }
        if used + w > width {
            rows.push(std::mem::take(&mut row));
            used = 0;
        }
        used += w;
        row.push_str(grapheme);
    }
    rows.push(row);
    rows
}

/// Remove ANSI escape sequences (CSI, OSC, and two-byte escapes).
pub fn strip_ansi(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut chars = text.chars().peekable();

    while let Some(ch) = chars.next() {
        if ch != '\x1b' {
            out.push(ch);
            continue;
        }
        match chars.next() {
            Some('[') => {
                // CSI: parameters, then a final byte in @..~
                for c in chars.by_ref() {
                    if ('@'..='~').contains(&c) {
                        break;
                    }
                }
            }
            Some(']') => {
                // OSC: terminated by BEL or ST (ESC \)
                while let Some(c) = chars.next() {
                    if c == '\x07' {
                        break;
                    }
                    if c == '\x1b' && chars.peek() == Some(&'\\') {
                        chars.next();
                        break;
                    }
                }
            }
            _ => {}
        }
    }

    out
}

/// Make a line of captured output safe to lay out.
///
/// Escape sequences are removed, tabs are expanded, and remaining control
/// characters are dropped.
pub fn sanitize(line: &str) -> String {
    let stripped = strip_ansi(line);
    let mut out = String::with_capacity(stripped.len());
    let mut col = 0;

    for ch in stripped.chars() {
        match ch {
            '\t' => {
                let spaces = TAB_WIDTH - (col % TAB_WIDTH);
                out.extend(std::iter::repeat(' ').take(spaces));
                col += spaces;
            }
            c if c.is_control() => {}
            c => {
                out.push(c);
                col += unicode_width::UnicodeWidthChar::width(c).unwrap_or(0);
            }
        }
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_truncate_fits() {
        assert_eq!(truncate("hello", 5, display_width), "hello");
    }

    #[test]
    fn test_truncate_adds_ellipsis() {
        assert_eq!(truncate("hello world", 6, display_width), "hello…");
        assert_eq!(truncate("hello", 0, display_width), "");
    }

    #[test]
    fn test_truncate_wide_chars() {
        // Each CJK char is 2 columns wide
        let out = truncate("日本語テキスト", 5, display_width);
        assert_eq!(out, "日本…");
        assert!(display_width(&out) <= 5);
    }

    #[test]
    fn test_wrap_rows() {
        assert_eq!(wrap("abcdefg", 3, display_width), vec!["abc", "def", "g"]);
        assert_eq!(wrap("", 3, display_width), vec![""]);
    }

    #[test]
    fn test_wrap_wide_chars() {
        let rows = wrap("日本語", 5, display_width);
        assert_eq!(rows, vec!["日本", "語"]);
    }

    #[test]
    fn test_strip_ansi() {
        assert_eq!(strip_ansi("\x1b[1m\x1b[38;2;1;2;3mx\x1b[0m"), "x");
        assert_eq!(strip_ansi("\x1b]0;title\x07text"), "text");
        assert_eq!(strip_ansi("plain"), "plain");
    }

    #[test]
    fn test_sanitize_expands_tabs() {
        assert_eq!(sanitize("a\tb"), "a   b");
        assert_eq!(sanitize("\x1b[31mred\x1b[0m\r"), "red");
    }
}
