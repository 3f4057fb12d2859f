//! Status Bar Widget: Three-section status bar.
//!
//! A horizontal status bar with left, center, and right sections, rendered
//! as one line filling the viewport width. Hosts typically place it under a
//! stack of blocks to show overall progress.

use super::traits::Widget;
use crate::input::InputEvent;
use crate::style::{Rgb, Style};
use crate::text::{display_width, truncate, Measure};

/// Configuration for the status bar widget.
#[derive(Debug, Clone)]
pub struct StatusBarConfig {
    /// Left section style.
    pub left: Style,
    /// Center section style.
    pub center: Style,
    /// Right section style.
    pub right: Style,
    /// Width function used for alignment.
    pub measure: Measure,
}

impl Default for StatusBarConfig {
    fn default() -> Self {
        Self {
            left: Style::fg(Rgb::WHITE),
            center: Style::fg(Rgb::new(150, 150, 150)),
            right: Style::fg(Rgb::new(100, 200, 100)),
            measure: display_width,
        }
    }
}

/// A three-section status bar (left, center, right).
#[derive(Debug)]
pub struct StatusBar {
    /// Left section content.
    left: String,
    /// Center section content.
    center: String,
    /// Right section content.
    right: String,
    /// Viewport width in columns.
    width: u16,
    /// Configuration.
    config: StatusBarConfig,
    /// Needs redraw flag.
    dirty: bool,
}

impl StatusBar {
    /// Create an empty status bar with default styles.
    pub fn new() -> Self {
        Self::with_config(StatusBarConfig::default())
    }

    /// Create an empty status bar with custom configuration.
    pub const fn with_config(config: StatusBarConfig) -> Self {
        Self {
            left: String::new(),
            center: String::new(),
            right: String::new(),
            width: 0,
            config,
            dirty: true,
        }
    }

    /// Set the left section content.
    pub fn set_left(&mut self, text: impl Into<String>) {
        self.left = text.into();
        self.dirty = true;
    }

    /// Set the center section content.
    pub fn set_center(&mut self, text: impl Into<String>) {
        self.center = text.into();
        self.dirty = true;
    }

    /// Set the right section content.
    pub fn set_right(&mut self, text: impl Into<String>) {
        self.right = text.into();
        self.dirty = true;
    }

    /// Set all sections at once.
    pub fn set_all(&mut self, left: impl Into<String>, center: impl Into<String>, right: impl Into<String>) {
        self.left = left.into();
        self.center = center.into();
        self.right = right.into();
        self.dirty = true;
    }

    /// Get the left section content.
    pub fn left(&self) -> &str {
        &self.left
    }

    /// Get the center section content.
    pub fn center(&self) -> &str {
        &self.center
    }

    /// Get the right section content.
    pub fn right(&self) -> &str {
        &self.right
    }
}

impl Default for StatusBar {
    fn default() -> Self {
        Self::new()
    }
}

impl Widget for StatusBar {
    fn resize(&mut self, width: u16, _height: u16) {
        if self.width != width {
            self.width = width;
            self.dirty = true;
        }
    }

    fn render(&self) -> String {
        let width = usize::from(self.width);
        let measure = self.config.measure;
        let third = width / 3;

        let left = truncate(&self.left, third, measure);
        let center = truncate(&self.center, third, measure);
        let right = truncate(&self.right, third, measure);
        let (left_w, center_w, right_w) = (measure(&left), measure(&center), measure(&right));

        // Each section is at most a third wide, so they never overlap
        let center_start = (width - center_w) / 2;
        let right_start = width - right_w;

        let mut out = String::new();
        self.config.left.paint_into(&left, &mut out);
        out.push_str(&" ".repeat(center_start - left_w));
        self.config.center.paint_into(&center, &mut out);
        out.push_str(&" ".repeat(right_start - center_start - center_w));
        self.config.right.paint_into(&right, &mut out);
        out
    }

    fn handle_input(&mut self, event: &InputEvent) -> bool {
        if let InputEvent::Resize { width, height } = *event {
            self.resize(width, height);
        }
        // Status bar doesn't consume input
        false
    }

    fn needs_redraw(&self) -> bool {
        self.dirty
    }

    fn clear_redraw(&mut self) {
        self.dirty = false;
    }
}
