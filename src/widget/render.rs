//! Block renderers: Turn a [`DisclosureState`] into styled text.
//!
//! Two renderers share one interface: [`PlainRenderer`] for captured output
//! and [`DiffRenderer`] for diffs. A block picks one at construction.
//!
//! Every rendered line fits the viewport width as measured by the block's
//! width function (escape sequences excluded). Lines are joined with `\n`
//! without a trailing newline, and a zero-width viewport renders nothing.

use super::config::BlockConfig;
use super::spinner;
use super::state::{DisclosureState, Status};
use crate::diff::{ContextWindow, DiffRow, Line, LineKind, Summary};
use crate::style::{Style, Theme};
use crate::text::{sanitize, truncate, wrap, Measure};

/// Label and source descriptor shown on a block's header line.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Header {
    /// What the block shows (e.g. a tool name).
    pub label: String,
    /// Where it comes from (e.g. a file path or command line).
    pub source: Option<String>,
}

impl Header {
    /// Create a header with only a label.
    pub fn new(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            source: None,
        }
    }

    /// Set the source descriptor.
    #[must_use]
    pub fn with_source(mut self, source: impl Into<String>) -> Self {
        self.source = Some(source.into());
        self
    }
}

/// Renders the visible state of a block.
pub trait BlockRenderer {
    /// Render `state` under `header` into text.
    fn render(&self, state: &DisclosureState, header: &Header) -> String;
}

/// Paint `spans` left to right, truncating the first span that overflows
/// `width` and dropping the rest.
fn fit(spans: &[(&str, Style)], width: usize, measure: Measure) -> String {
    let mut out = String::new();
    let mut left = width;
    for &(text, style) in spans {
        let w = measure(text);
        if w <= left {
            style.paint_into(text, &mut out);
            left -= w;
        } else {
            style.paint_into(&truncate(text, left, measure), &mut out);
            break;
        }
    }
    out
}

fn status_icon(state: &DisclosureState, theme: &Theme) -> (char, Style) {
    match state.status() {
        Status::Idle => ('○', theme.idle),
        Status::Running => (spinner::frame(state.frame()), theme.running),
        Status::Complete => ('✓', theme.complete),
        Status::Error => ('✗', theme.error),
        Status::Warning => ('⚠', theme.warning),
    }
}

/// Render the header line shared by every block.
fn render_header(
    state: &DisclosureState,
    header: &Header,
    theme: &Theme,
    width: usize,
    measure: Measure,
) -> String {
    let disclosure = if state.is_expanded() { "▼" } else { "▶" };
    let (icon, icon_style) = status_icon(state, theme);
    let icon = icon.to_string();
    let label_style = if state.is_focused() {
        theme.header.with_modifiers(theme.focus)
    } else {
        theme.header
    };
    let label = sanitize(&header.label);
    let source = header
        .source
        .as_deref()
        .map(|source| format!(" · {}", sanitize(source)))
        .unwrap_or_default();

    fit(
        &[
            (disclosure, theme.gutter),
            (" ", Style::PLAIN),
            (&icon, icon_style),
            (" ", Style::PLAIN),
            (&label, label_style),
            (&source, theme.source),
        ],
        width,
        measure,
    )
}

/// Renderer for captured command or tool output.
#[derive(Debug, Clone)]
pub struct PlainRenderer {
    show_line_numbers: bool,
    follow_tail: bool,
    theme: Theme,
    measure: Measure,
}

impl PlainRenderer {
    /// Create a renderer from a block configuration.
    pub fn new(config: &BlockConfig) -> Self {
        Self {
            show_line_numbers: config.show_line_numbers,
            follow_tail: config.streaming_enabled,
            theme: config.theme,
            measure: config.measure,
        }
    }

    /// Header plus at most `max_visible_lines` truncated lines and a notice
    /// counting the hidden ones.
    fn collapsed(&self, out: &mut Vec<String>, state: &DisclosureState, texts: &[&str], width: usize) {
        let total = texts.len();
        let max = state.max_visible_lines();
        let shown = if max == 0 { total } else { max.min(total) };
        let hidden = total - shown;
        let notice = format!("[{hidden} more lines ...]");
        let notice = fit(&[(&notice, self.theme.muted)], width, self.measure);

        let visible = if self.follow_tail {
            &texts[total - shown..]
        } else {
            &texts[..shown]
        };

        for line in visible {
            out.push(fit(&[(line, self.theme.content)], width, self.measure));
        }
        if hidden > 0 {
            out.push(notice);
        }
    }

    /// Header plus every line, wrapped, with an optional number gutter.
    fn expanded(&self, out: &mut Vec<String>, state: &DisclosureState, texts: &[&str], width: usize) {
        let discarded = state.lines().discarded();
        if discarded > 0 {
            let notice = format!("[{discarded} earlier lines discarded]");
            out.push(fit(&[(&notice, self.theme.muted)], width, self.measure));
        }

        let digits = (discarded + texts.len()).to_string().len();
        let gutter_width = digits + 1;
        let numbered = self.show_line_numbers && gutter_width < width;
        let content_width = if numbered { width - gutter_width } else { width };
        let blank_gutter = " ".repeat(gutter_width);

        for (i, line) in texts.iter().enumerate() {
            for (row_index, row) in wrap(line, content_width, self.measure).iter().enumerate() {
                let mut rendered = String::new();
                if numbered {
                    let gutter = if row_index == 0 {
                        format!("{:>digits$} ", discarded + i + 1)
                    } else {
                        blank_gutter.clone()
                    };
                    self.theme.gutter.paint_into(&gutter, &mut rendered);
                }
                self.theme.content.paint_into(row, &mut rendered);
                out.push(rendered);
            }
        }
    }
}

impl BlockRenderer for PlainRenderer {
    fn render(&self, state: &DisclosureState, header: &Header) -> String {
        let width = usize::from(state.viewport_width());
        if width == 0 {
            return String::new();
        }

        let mut out = vec![render_header(state, header, &self.theme, width, self.measure)];
        let texts = state.lines().texts();
        if state.is_expanded() {
            self.expanded(&mut out, state, &texts, width);
        } else {
            self.collapsed(&mut out, state, &texts, width);
        }
        out.join("\n")
    }
}

/// Renderer for diffs: a summary while collapsed, windowed hunks while
/// expanded. Plain text lines in the buffer are not shown.
#[derive(Debug, Clone)]
pub struct DiffRenderer {
    window: ContextWindow,
    show_line_numbers: bool,
    theme: Theme,
    measure: Measure,
}

impl DiffRenderer {
    /// Create a renderer from a block configuration.
    pub fn new(config: &BlockConfig) -> Self {
        Self {
            window: ContextWindow::new(config.context_radius),
            show_line_numbers: config.show_line_numbers,
            theme: config.theme,
            measure: config.measure,
        }
    }

    fn render_line(&self, line: &Line, gutter: Option<usize>, width: usize) -> String {
        let (marker, style) = match line.kind {
            LineKind::Added => ("+ ", self.theme.added),
            LineKind::Removed => ("- ", self.theme.removed),
            LineKind::Unchanged => ("  ", self.theme.content),
        };
        let numbers = gutter
            .map(|digits| {
                let column = |n: Option<usize>| match n {
                    Some(n) => format!("{n:>digits$}"),
                    None => " ".repeat(digits),
                };
                format!("{} {} ", column(line.old_line), column(line.new_line))
            })
            .unwrap_or_default();
        let content = sanitize(&line.content);

        fit(
            &[(&numbers, self.theme.gutter), (marker, style), (&content, style)],
            width,
            self.measure,
        )
    }
}

impl BlockRenderer for DiffRenderer {
    fn render(&self, state: &DisclosureState, header: &Header) -> String {
        let width = usize::from(state.viewport_width());
        if width == 0 {
            return String::new();
        }

        let lines = state.lines().diff_lines();
        let summary = Summary::of(lines);
        if summary.is_unchanged() {
            return String::new();
        }

        let mut out = vec![render_header(state, header, &self.theme, width, self.measure)];

        if !state.is_expanded() {
            out.push(fit(&[(&summary.to_string(), self.theme.muted)], width, self.measure));
            return out.join("\n");
        }

        let largest = lines
            .iter()
            .flat_map(|line| [line.old_line, line.new_line])
            .flatten()
            .max()
            .unwrap_or(0);
        let digits = largest.to_string().len();
        // Two number columns, their separators, and the two-column marker
        let gutter = (self.show_line_numbers && 2 * digits + 4 < width).then_some(digits);

        for row in self.window.window(lines) {
            match row {
                DiffRow::Line(line) => out.push(self.render_line(&line, gutter, width)),
                DiffRow::Elided(run) => {
                    let separator = format!("⋯ {} unchanged lines", run.skipped);
                    out.push(fit(&[(&separator, self.theme.muted)], width, self.measure));
                }
            }
        }

        out.join("\n")
    }
}
