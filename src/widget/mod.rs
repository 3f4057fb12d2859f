//! Widgets: Collapsible output and diff blocks.
//!
//! Every block shares one [`DisclosureController`] for its state and one of
//! two [`BlockRenderer`]s for drawing:
//!
//! ```text
//!   host events ──► DisclosureController ──► DisclosureState
//!                                                  │
//!                          PlainRenderer / DiffRenderer
//!                                                  │
//!                                                  ▼
//!                                           styled text
//! ```
//!
//! The controller never renders and the renderers never mutate, so a block
//! can be redrawn at any time from its current state.

mod block;
mod config;
mod line_buffer;
mod render;
pub mod spinner;
mod state;
mod status_bar;
mod traits;

pub use block::{Block, DiffBlock, OutputBlock};
pub use config::BlockConfig;
pub use line_buffer::LineBuffer;
pub use render::{BlockRenderer, DiffRenderer, Header, PlainRenderer};
pub use state::{DisclosureController, DisclosureState, Status};
pub use status_bar::{StatusBar, StatusBarConfig};
pub use traits::{Disclosure, Widget};
