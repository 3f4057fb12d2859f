//! Widget traits: The capability interfaces every block implements.
//!
//! [`Widget`] is what a host needs to lay out, draw, and route events to a
//! component. [`Disclosure`] exposes the collapse/expand behaviour shared by
//! all blocks; implementors only provide access to their controller.

use super::state::{DisclosureController, DisclosureState, Status};
use crate::input::{InputEvent, Key};

/// A UI component that renders to text and handles input.
///
/// All widgets implement this trait, allowing hosts to handle them
/// uniformly regardless of what they display.
pub trait Widget {
    /// Record a new viewport size.
    ///
    /// Called when the layout changes (e.g., terminal resize).
    fn resize(&mut self, width: u16, height: u16);

    /// Render this widget to text with embedded SGR sequences.
    ///
    /// No line of the output is wider than the viewport.
    fn render(&self) -> String;

    /// Handle an input event.
    ///
    /// Returns `true` if the event was consumed by this widget,
    /// `false` if it should propagate to other widgets.
    fn handle_input(&mut self, event: &InputEvent) -> bool;

    /// Check if this widget needs to be redrawn.
    fn needs_redraw(&self) -> bool;

    /// Clear the redraw flag after rendering.
    fn clear_redraw(&mut self);
}

/// A widget that can be collapsed and expanded.
pub trait Disclosure {
    /// The controller owning this widget's state.
    fn controller(&self) -> &DisclosureController;

    /// Mutable access to the controller.
    fn controller_mut(&mut self) -> &mut DisclosureController;

    /// Current state.
    fn state(&self) -> &DisclosureState {
        self.controller().state()
    }

    /// Whether the full content is shown.
    fn is_expanded(&self) -> bool {
        self.state().is_expanded()
    }

    /// Whether the widget has key focus.
    fn is_focused(&self) -> bool {
        self.state().is_focused()
    }

    /// Current status.
    fn status(&self) -> Status {
        self.state().status()
    }

    /// Flip between collapsed and expanded. See [`DisclosureController::toggle`].
    fn toggle(&mut self) -> bool {
        self.controller_mut().toggle()
    }

    /// Give the widget key focus.
    fn focus(&mut self) {
        self.controller_mut().focus();
    }

    /// Take key focus away.
    fn blur(&mut self) {
        self.controller_mut().blur();
    }

    /// Handle a key press; returns `true` if consumed.
    fn handle_key(&mut self, key: Key) -> bool {
        self.controller_mut().handle_key(key)
    }

    /// Handle a key given by its symbolic identifier.
    fn handle_key_symbol(&mut self, symbol: &str) -> bool {
        self.controller_mut().handle_key_symbol(symbol)
    }

    /// Append one line of output.
    fn append_line(&mut self, text: &str) {
        self.controller_mut().append_line(text);
    }

    /// Append several lines of output in order.
    fn append_lines<I, S>(&mut self, lines: I)
    where
        Self: Sized,
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.controller_mut().append_lines(lines);
    }

    /// Append a streamed chunk that may end mid-line.
    fn append_chunk(&mut self, chunk: &str) {
        self.controller_mut().append_chunk(chunk);
    }

    /// Remove all content.
    fn clear(&mut self) {
        self.controller_mut().clear();
    }

    /// Change the status.
    fn set_status(&mut self, status: Status) {
        self.controller_mut().set_status(status);
    }

    /// Advance the spinner by one frame.
    fn tick(&mut self) {
        self.controller_mut().tick();
    }
}
