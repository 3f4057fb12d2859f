//! Disclosure state machine shared by every block.
//!
//! The state is a product of three independent axes:
//!
//! ```text
//!   status   : Idle | Running | Complete | Error | Warning
//!   expanded : Collapsed | Expanded
//!   focused  : Blurred | Focused
//! ```
//!
//! No axis constrains another: blurring keeps the disclosure and status,
//! status changes keep focus, and any status may follow any other so a
//! finished block can be reset to `Running` for a rerun.

use super::config::BlockConfig;
use super::line_buffer::LineBuffer;
use crate::diff::{split_lines, Line};
use crate::input::Key;
use tracing::trace;

/// Lifecycle status of the operation a block displays.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Status {
    /// Nothing has run yet.
    #[default]
    Idle,
    /// The operation is producing output.
    Running,
    /// The operation finished successfully.
    Complete,
    /// The operation failed.
    Error,
    /// The operation finished with warnings.
    Warning,
}

/// Observable state of a block.
#[derive(Debug)]
pub struct DisclosureState {
    expanded: bool,
    focused: bool,
    status: Status,
    lines: LineBuffer,
    max_visible_lines: usize,
    viewport_width: u16,
    viewport_height: u16,
    /// A diff has been computed into `lines`.
    has_diff: bool,
    /// Spinner frame counter.
    frame: u64,
    dirty: bool,
}

impl DisclosureState {
    /// Whether the full content is shown.
    pub const fn is_expanded(&self) -> bool {
        self.expanded
    }

    /// Whether the block receives key input.
    pub const fn is_focused(&self) -> bool {
        self.focused
    }

    /// Current status.
    pub const fn status(&self) -> Status {
        self.status
    }

    /// Buffered content.
    pub const fn lines(&self) -> &LineBuffer {
        &self.lines
    }

    /// Lines shown while collapsed (0 = unlimited).
    pub const fn max_visible_lines(&self) -> usize {
        self.max_visible_lines
    }

    /// Viewport width in columns (0 until the first resize).
    pub const fn viewport_width(&self) -> u16 {
        self.viewport_width
    }

    /// Viewport height in rows.
    pub const fn viewport_height(&self) -> u16 {
        self.viewport_height
    }

    /// Whether a diff has been computed into the buffer.
    pub const fn has_diff(&self) -> bool {
        self.has_diff
    }

    /// Spinner ticks applied so far.
    pub const fn frame(&self) -> u64 {
        self.frame
    }

    /// True when there is nothing to disclose.
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty() && !self.has_diff
    }
}

/// Owner of a [`DisclosureState`] and the only way to mutate it.
#[derive(Debug)]
pub struct DisclosureController {
    state: DisclosureState,
    toggle_key: Key,
}

impl DisclosureController {
    /// Create a controller from a block configuration.
    pub fn new(config: &BlockConfig) -> Self {
        Self {
            state: DisclosureState {
                expanded: config.start_expanded,
                focused: false,
                status: config.initial_status,
                lines: LineBuffer::new(config.max_buffered_lines),
                max_visible_lines: config.max_visible_lines,
                viewport_width: 0,
                viewport_height: 0,
                has_diff: false,
                frame: 0,
                dirty: true,
            },
            toggle_key: config.toggle_key,
        }
    }

    /// Read-only view of the state.
    pub const fn state(&self) -> &DisclosureState {
        &self.state
    }

    /// Flip between collapsed and expanded.
    ///
    /// Returns `false` without changing anything when the block is empty.
    pub fn toggle(&mut self) -> bool {
        if self.state.is_empty() {
            return false;
        }
        self.state.expanded = !self.state.expanded;
        self.state.dirty = true;
        trace!(expanded = self.state.expanded, "block toggled");
        true
    }

    /// Give the block key focus.
    pub fn focus(&mut self) {
        if !self.state.focused {
            self.state.focused = true;
            self.state.dirty = true;
        }
    }

    /// Take key focus away from the block.
    pub fn blur(&mut self) {
        if self.state.focused {
            self.state.focused = false;
            self.state.dirty = true;
        }
    }

    /// Whether `key` toggles the disclosure.
    pub fn is_toggle_key(&self, key: Key) -> bool {
        key == Key::ENTER || key == Key::SPACE || key == self.toggle_key
    }

    /// Handle a key press.
    ///
    /// Returns `true` if the key was consumed. Keys are only consumed while
    /// focused, and only the toggle keys are consumed.
    pub fn handle_key(&mut self, key: Key) -> bool {
        if !self.state.focused || !self.is_toggle_key(key) {
            return false;
        }
        self.toggle();
        true
    }

    /// Handle a key given by its symbolic identifier (e.g. `"ctrl+o"`).
    ///
    /// Malformed identifiers are treated as unhandled keys.
    pub fn handle_key_symbol(&mut self, symbol: &str) -> bool {
        match symbol.parse::<Key>() {
            Ok(key) => self.handle_key(key),
            Err(err) => {
                trace!(symbol, %err, "ignoring unrecognized key");
                false
            }
        }
    }

    /// Append one line of output.
    ///
    /// Text containing line breaks is split into several lines.
    pub fn append_line(&mut self, text: &str) {
        if text.contains('\n') {
            for line in split_lines(text) {
                self.state.lines.push_text(line);
            }
        } else {
            self.state.lines.push_text(text);
        }
        self.state.dirty = true;
    }

    /// Append several lines of output in order.
    pub fn append_lines<I, S>(&mut self, lines: I)
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        for line in lines {
            self.append_line(line.as_ref());
        }
    }

    /// Append a streamed chunk that may end mid-line.
    pub fn append_chunk(&mut self, chunk: &str) {
        if chunk.is_empty() {
            return;
        }
        self.state.lines.push_chunk(chunk);
        self.state.dirty = true;
    }

    /// Replace the content with a computed diff.
    pub fn set_diff(&mut self, lines: Vec<Line>) {
        self.state.lines.set_diff(lines);
        self.state.has_diff = true;
        self.state.dirty = true;
    }

    /// Remove all content, including any computed diff.
    pub fn clear(&mut self) {
        self.state.lines.clear();
        self.state.has_diff = false;
        self.state.dirty = true;
    }

    /// Change the status. Every transition is allowed.
    pub fn set_status(&mut self, status: Status) {
        if self.state.status != status {
            trace!(from = ?self.state.status, to = ?status, "block status changed");
            self.state.status = status;
            self.state.dirty = true;
        }
    }

    /// Record a new viewport size.
    pub fn resize(&mut self, width: u16, height: u16) {
        if (width, height) != (self.state.viewport_width, self.state.viewport_height) {
            self.state.viewport_width = width;
            self.state.viewport_height = height;
            self.state.dirty = true;
        }
    }

    /// Advance the spinner by one frame.
    pub fn tick(&mut self) {
        self.state.frame = self.state.frame.wrapping_add(1);
        if self.state.status == Status::Running {
            self.state.dirty = true;
        }
    }

    /// Check if the block needs to be redrawn.
    pub const fn needs_redraw(&self) -> bool {
        self.state.dirty
    }

    /// Clear the redraw flag after rendering.
    pub fn clear_redraw(&mut self) {
        self.state.dirty = false;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::input::KeyCode;

    fn controller() -> DisclosureController {
        DisclosureController::new(&BlockConfig::default())
    }

    #[test]
    fn test_initial_state() {
        let c = controller();
        let state = c.state();

        assert!(!state.is_expanded());
        assert!(!state.is_focused());
        assert_eq!(state.status(), Status::Idle);
        assert_eq!(state.viewport_width(), 0);
        assert!(state.is_empty());
    }

    #[test]
    fn test_config_initial_values() {
        let config = BlockConfig {
            start_expanded: true,
            initial_status: Status::Running,
            ..BlockConfig::default()
        };
        let c = DisclosureController::new(&config);

        assert!(c.state().is_expanded());
        assert_eq!(c.state().status(), Status::Running);
    }

    #[test]
    fn test_toggle_empty_is_noop() {
        let mut c = controller();
        assert!(!c.toggle());
        assert!(!c.state().is_expanded());
    }

    #[test]
    fn test_toggle_twice_restores() {
        let mut c = controller();
        c.append_line("output");

        assert!(c.toggle());
        assert!(c.state().is_expanded());
        assert!(c.toggle());
        assert!(!c.state().is_expanded());
    }

    #[test]
    fn test_toggle_with_empty_diff() {
        let mut c = controller();
        c.set_diff(Vec::new());
        assert!(c.toggle());
    }

    #[test]
    fn test_blur_keeps_expanded_and_status() {
        let mut c = controller();
        c.append_line("output");
        c.focus();
        c.toggle();
        c.set_status(Status::Error);
        c.blur();

        assert!(!c.state().is_focused());
        assert!(c.state().is_expanded());
        assert_eq!(c.state().status(), Status::Error);
    }

    #[test]
    fn test_handle_key_requires_focus() {
        let mut c = controller();
        c.append_line("output");

        assert!(!c.handle_key(Key::ENTER));
        assert!(!c.state().is_expanded());

        c.focus();
        assert!(c.handle_key(Key::ENTER));
        assert!(c.state().is_expanded());
        assert!(c.handle_key(Key::SPACE));
        assert!(!c.state().is_expanded());
        assert!(c.handle_key(Key::ctrl(KeyCode::Char('o'))));
        assert!(c.state().is_expanded());
    }

    #[test]
    fn test_handle_key_ignores_other_keys() {
        let mut c = controller();
        c.append_line("output");
        c.focus();

        assert!(!c.handle_key(Key::plain(KeyCode::Char('x'))));
        assert!(!c.handle_key(Key::plain(KeyCode::Esc)));
        assert!(!c.state().is_expanded());
    }

    #[test]
    fn test_handle_key_symbol() {
        let mut c = controller();
        c.append_line("output");
        c.focus();

        assert!(c.handle_key_symbol("enter"));
        assert!(c.state().is_expanded());
        assert!(!c.handle_key_symbol("not a key"));
        assert!(!c.handle_key_symbol(""));
        assert!(c.state().is_expanded());
    }

    #[test]
    fn test_custom_toggle_key() {
        let config = BlockConfig {
            toggle_key: Key::plain(KeyCode::Char('e')),
            ..BlockConfig::default()
        };
        let mut c = DisclosureController::new(&config);
        c.append_line("output");
        c.focus();

        assert!(!c.handle_key(Key::ctrl(KeyCode::Char('o'))));
        assert!(c.handle_key(Key::plain(KeyCode::Char('e'))));
        assert!(c.state().is_expanded());
    }

    #[test]
    fn test_append_does_not_touch_disclosure() {
        let mut c = controller();
        c.focus();
        c.append_lines(["a", "b\nc"]);
        c.append_chunk("partial");

        assert_eq!(c.state().lines().texts(), vec!["a", "b", "c", "partial"]);
        assert!(!c.state().is_expanded());
        assert!(c.state().is_focused());
    }

    #[test]
    fn test_status_rerun() {
        let mut c = controller();
        c.set_status(Status::Running);
        c.set_status(Status::Complete);
        c.set_status(Status::Running);
        assert_eq!(c.state().status(), Status::Running);
    }

    #[test]
    fn test_resize_keeps_expanded() {
        let mut c = controller();
        c.append_line("output");
        c.toggle();
        c.resize(80, 24);

        assert_eq!(c.state().viewport_width(), 80);
        assert_eq!(c.state().viewport_height(), 24);
        assert!(c.state().is_expanded());
    }

    #[test]
    fn test_tick_marks_running_dirty() {
        let mut c = controller();
        c.clear_redraw();
        c.tick();
        assert!(!c.needs_redraw());
        assert_eq!(c.state().frame(), 1);

        c.set_status(Status::Running);
        c.clear_redraw();
        c.tick();
        assert!(c.needs_redraw());
        assert_eq!(c.state().frame(), 2);
    }

    #[test]
    fn test_clear_forgets_diff() {
        let mut c = controller();
        c.set_diff(vec![Line::added("x", 1)]);
        c.clear();
        assert!(c.state().is_empty());
        assert!(!c.toggle());
    }
}
