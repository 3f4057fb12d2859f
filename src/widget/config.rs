//! Block configuration.

use super::state::Status;
use crate::input::{Key, KeyCode};
use crate::style::Theme;
use crate::text::{self, Measure};

/// Construction-time configuration for a block.
///
/// Override individual fields with struct update syntax:
///
/// ```
/// use foldout::BlockConfig;
///
/// let config = BlockConfig {
///     max_visible_lines: 3,
///     context_radius: Some(2),
///     ..BlockConfig::default()
/// };
/// assert!(!config.start_expanded);
/// ```
#[derive(Debug, Clone)]
pub struct BlockConfig {
    /// Lines shown while collapsed (0 = unlimited).
    pub max_visible_lines: usize,
    /// Context radius for expanded diffs (`None` = show every line).
    pub context_radius: Option<usize>,
    /// Whether the block starts expanded.
    pub start_expanded: bool,
    /// Whether expanded rendering shows line numbers.
    pub show_line_numbers: bool,
    /// Status the block starts in.
    pub initial_status: Status,
    /// Whether the collapsed view follows the latest streamed lines.
    pub streaming_enabled: bool,
    /// Maximum number of buffered lines; older lines are discarded beyond it.
    pub max_buffered_lines: usize,
    /// Dedicated expand/collapse binding (Enter and Space always toggle).
    pub toggle_key: Key,
    /// Styles for rendered output.
    pub theme: Theme,
    /// Display-width function.
    pub measure: Measure,
}

impl Default for BlockConfig {
    fn default() -> Self {
        Self {
            max_visible_lines: 10,
            context_radius: None,
            start_expanded: false,
            show_line_numbers: false,
            initial_status: Status::Idle,
            streaming_enabled: true,
            max_buffered_lines: 10_000,
            toggle_key: Key::ctrl(KeyCode::Char('o')),
            theme: Theme::default(),
            measure: text::display_width,
        }
    }
}
