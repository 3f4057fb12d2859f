//! Spinner frames for the running status icon.
//!
//! The spinner has no clock of its own: the host delivers tick events and
//! each tick advances the frame counter by exactly one.

/// Braille spinner frames.
pub const FRAMES: [char; 10] = ['⠋', '⠙', '⠹', '⠸', '⠼', '⠴', '⠦', '⠧', '⠇', '⠏'];

/// Frame to show after `ticks` ticks.
#[allow(clippy::cast_possible_truncation)]
pub const fn frame(ticks: u64) -> char {
    FRAMES[(ticks % FRAMES.len() as u64) as usize]
}
