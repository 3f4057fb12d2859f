//! # Foldout
//!
//! Collapsible output and diff blocks for agentic terminal UIs.
//!
//! Foldout renders the results of long-running operations (shell commands,
//! tool calls, file edits) as blocks that stay compact while collapsed and
//! disclose everything on demand. It draws to text: the host owns the
//! terminal, the layout, and the event loop.
//!
//! ## Core Concepts
//!
//! - **Line diffs**: Myers O(N·D) diff grouped into hunks, with context windowing
//! - **Disclosure**: One state machine (status × expanded × focused) shared by every block
//! - **Renderers**: Plain output and diff views behind one trait
//! - **Streaming**: Bounded line buffer with partial-line chunks and serial event delivery
//!
//! ## Example
//!
//! ```
//! use foldout::{BlockConfig, DiffBlock, Disclosure, Widget};
//!
//! let mut block = DiffBlock::new("edit", &BlockConfig::default());
//! block.resize(80, 24);
//! block.set_diff("line 1\nline 2\nline 3", "line 1\nline 2 modified\nline 3");
//! assert_eq!(block.summary().to_string(), "Added 1 lines, removed 1 lines");
//!
//! block.focus();
//! block.handle_key_symbol("enter");
//! assert!(block.is_expanded());
//! ```

#![warn(missing_docs)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::must_use_candidate)]

pub mod diff;
pub mod dispatch;
pub mod input;
pub mod style;
pub mod text;
pub mod widget;

// Re-exports for convenience
pub use diff::{diff_lines, diff_text, split_lines, ContextWindow, DiffRow, ElidedRun, Line, LineKind, Summary};
pub use dispatch::{BlockEvent, EventQueue, EventSender};
pub use input::{InputEvent, Key, KeyCode, KeyModifiers, KeyParseError};
pub use style::{Modifiers, Rgb, Style, Theme};
pub use widget::{
    Block, BlockConfig, BlockRenderer, DiffBlock, DiffRenderer, Disclosure, DisclosureController,
    DisclosureState, Header, OutputBlock, PlainRenderer, Status, StatusBar, StatusBarConfig, Widget,
};
