//! Blocks: Collapsible widgets composed of a controller and a renderer.
//!
//! # Example
//!
//! ```
//! use foldout::{BlockConfig, Disclosure, OutputBlock, Status, Widget};
//!
//! let mut block = OutputBlock::new("cargo test", &BlockConfig::default());
//! block.resize(80, 24);
//! block.set_status(Status::Running);
//! block.append_line("running 3 tests");
//! assert!(!block.render().is_empty());
//! ```

use super::config::BlockConfig;
use super::render::{BlockRenderer, DiffRenderer, Header, PlainRenderer};
use super::state::DisclosureController;
use super::traits::{Disclosure, Widget};
use crate::diff::{diff_text, Summary};
use crate::input::InputEvent;
use tracing::trace;

/// A collapsible block drawn by the renderer `R`.
#[derive(Debug)]
pub struct Block<R> {
    controller: DisclosureController,
    renderer: R,
    header: Header,
}

/// A block showing captured command or tool output.
pub type OutputBlock = Block<PlainRenderer>;

/// A block showing a line diff.
pub type DiffBlock = Block<DiffRenderer>;

impl<R: BlockRenderer> Block<R> {
    /// Create a block with an explicit renderer.
    pub fn with_renderer(header: Header, config: &BlockConfig, renderer: R) -> Self {
        Self {
            controller: DisclosureController::new(config),
            renderer,
            header,
        }
    }

    /// Set the source descriptor shown after the label.
    #[must_use]
    pub fn with_source(mut self, source: impl Into<String>) -> Self {
        self.header.source = Some(source.into());
        self
    }

    /// The header shown on the first line.
    pub const fn header(&self) -> &Header {
        &self.header
    }
}

impl OutputBlock {
    /// Create an output block labelled `label`.
    pub fn new(label: impl Into<String>, config: &BlockConfig) -> Self {
        Self::with_renderer(Header::new(label), config, PlainRenderer::new(config))
    }
}

impl DiffBlock {
    /// Create a diff block labelled `label`.
    pub fn new(label: impl Into<String>, config: &BlockConfig) -> Self {
        Self::with_renderer(Header::new(label), config, DiffRenderer::new(config))
    }

    /// Compute the diff between `old` and `new` and show it.
    pub fn set_diff(&mut self, old: &str, new: &str) {
        let lines = diff_text(old, new);
        let summary = Summary::of(&lines);
        trace!(added = summary.added, removed = summary.removed, "diff computed");
        self.controller.set_diff(lines);
    }

    /// Added/removed counts of the current diff.
    pub fn summary(&self) -> Summary {
        Summary::of(self.controller.state().lines().diff_lines())
    }
}

impl<R: BlockRenderer> Widget for Block<R> {
    fn resize(&mut self, width: u16, height: u16) {
        self.controller.resize(width, height);
    }

    fn render(&self) -> String {
        self.renderer.render(self.controller.state(), &self.header)
    }

    fn handle_input(&mut self, event: &InputEvent) -> bool {
        match *event {
            InputEvent::Key(key) => self.controller.handle_key(key),
            InputEvent::Resize { width, height } => {
                self.controller.resize(width, height);
                false
            }
            InputEvent::FocusGained | InputEvent::FocusLost => false,
        }
    }

    fn needs_redraw(&self) -> bool {
        self.controller.needs_redraw()
    }

    fn clear_redraw(&mut self) {
        self.controller.clear_redraw();
    }
}

impl<R: BlockRenderer> Disclosure for Block<R> {
    fn controller(&self) -> &DisclosureController {
        &self.controller
    }

    fn controller_mut(&mut self) -> &mut DisclosureController {
        &mut self.controller
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::input::{Key, KeyCode};
    use crate::style::Theme;
    use crate::widget::Status;

    fn plain() -> BlockConfig {
        BlockConfig {
            theme: Theme::plain(),
            ..BlockConfig::default()
        }
    }

    #[test]
    fn test_collapsed_thirteen_lines() {
        let config = BlockConfig {
            max_visible_lines: 3,
            ..plain()
        };
        let mut block = OutputBlock::new("bash", &config);
        block.resize(80, 24);
        for i in 1..=13 {
            block.append_line(&format!("line {i}"));
        }

        let out = block.render();
        let lines: Vec<&str> = out.lines().collect();
        assert_eq!(
            lines,
            vec!["▶ ○ bash", "line 11", "line 12", "line 13", "[10 more lines ...]"]
        );
        assert!(lines.last().is_some_and(|l| l.contains("10 more")));
    }

    #[test]
    fn test_zero_width_then_resize() {
        let mut block = OutputBlock::new("bash", &plain());
        block.append_line("hello");
        block.resize(0, 24);
        assert_eq!(block.render(), "");

        block.toggle();
        assert_eq!(block.render(), "");

        block.resize(80, 24);
        assert!(!block.render().is_empty());
    }

    #[test]
    fn test_diff_block_summary() {
        let mut block = DiffBlock::new("edit", &plain()).with_source("notes.txt");
        block.resize(80, 24);
        block.set_diff("line 1\nline 2\nline 3", "line 1\nline 2 modified\nline 3");

        let summary = block.summary();
        assert_eq!((summary.added, summary.removed), (1, 1));
        assert_eq!(
            block.render(),
            "▶ ○ edit · notes.txt\nAdded 1 lines, removed 1 lines"
        );
    }

    #[test]
    fn test_diff_survives_appended_output() {
        let config = BlockConfig {
            max_buffered_lines: 2,
            ..plain()
        };
        let mut block = DiffBlock::new("edit", &config);
        block.resize(80, 24);
        block.set_diff("a\nb\nc", "x\ny\nz");
        assert_eq!((block.summary().added, block.summary().removed), (3, 3));

        block.append_line("note");
        block.append_chunk("more\nand more");
        assert_eq!((block.summary().added, block.summary().removed), (3, 3));
        assert_eq!(block.render(), "▶ ○ edit\nAdded 3 lines, removed 3 lines");
    }

    #[test]
    fn test_handle_input_routes_keys() {
        let mut block = OutputBlock::new("bash", &plain());
        block.append_line("output");

        let enter = InputEvent::Key(Key::ENTER);
        assert!(!block.handle_input(&enter));
        assert!(!block.is_expanded());

        block.focus();
        assert!(block.handle_input(&enter));
        assert!(block.is_expanded());
        assert!(!block.handle_input(&InputEvent::Key(Key::plain(KeyCode::Char('q')))));
    }

    #[test]
    fn test_handle_input_resize_not_consumed() {
        let mut block = OutputBlock::new("bash", &plain());
        let resize = InputEvent::Resize { width: 40, height: 10 };

        assert!(!block.handle_input(&resize));
        assert_eq!(block.state().viewport_width(), 40);
        assert!(!block.handle_input(&InputEvent::FocusGained));
    }

    #[test]
    fn test_redraw_tracking() {
        let mut block = OutputBlock::new("bash", &plain());
        assert!(block.needs_redraw());
        block.clear_redraw();
        assert!(!block.needs_redraw());

        block.set_status(Status::Complete);
        assert!(block.needs_redraw());
    }
}
