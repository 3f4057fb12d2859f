//! Line buffer: Bounded storage for a block's content.
//!
//! Output lines are kept in a ring buffer; once the cap is reached the
//! oldest lines are discarded and counted. Streamed chunks accumulate in a
//! pending partial line until a line break completes it, and the pending
//! line counts against the cap. A diff is stored whole, apart from the
//! ring, so later output never evicts part of it.

use crate::diff::Line;
use crate::text::sanitize;
use std::collections::VecDeque;
use tracing::debug;

/// Pending text longer than this is completed as a line of its own.
pub const MAX_PENDING_BYTES: usize = 64 * 1024;

/// Ring buffer of output lines with a pending partial line.
#[derive(Debug)]
pub struct LineBuffer {
    /// Completed output lines.
    lines: VecDeque<String>,
    /// Raw text of the partial line being streamed.
    pending: String,
    /// Sanitized copy of `pending`, kept for rendering.
    pending_display: String,
    /// The diff, never evicted.
    diff: Vec<Line>,
    /// Maximum number of output lines to retain, pending included.
    max_lines: usize,
    /// Lines discarded because the buffer was full.
    discarded: usize,
    /// Whether an overflow has been logged since the last clear.
    overflowing: bool,
}

impl LineBuffer {
    /// Create a buffer retaining at most `max_lines` lines (at least one).
    pub fn new(max_lines: usize) -> Self {
        Self {
            lines: VecDeque::new(),
            pending: String::new(),
            pending_display: String::new(),
            diff: Vec::new(),
            max_lines: max_lines.max(1),
            discarded: 0,
            overflowing: false,
        }
    }

    /// Number of retained output lines, the pending partial line included.
    pub fn len(&self) -> usize {
        self.lines.len() + usize::from(!self.pending.is_empty())
    }

    /// True when there is no output, no pending text, and no diff.
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty() && self.pending.is_empty() && self.diff.is_empty()
    }

    /// Lines discarded since the last clear.
    pub const fn discarded(&self) -> usize {
        self.discarded
    }

    /// Maximum number of retained lines.
    pub const fn capacity(&self) -> usize {
        self.max_lines
    }

    /// Text of every output line including the pending partial line, oldest first.
    pub fn texts(&self) -> Vec<&str> {
        let mut texts: Vec<&str> = self.lines.iter().map(String::as_str).collect();
        if !self.pending.is_empty() {
            texts.push(&self.pending_display);
        }
        texts
    }

    /// The full diff, in order.
    pub fn diff_lines(&self) -> &[Line] {
        &self.diff
    }

    /// Append a line of captured output.
    ///
    /// Any pending partial line is completed first.
    pub fn push_text(&mut self, text: &str) {
        self.flush_pending();
        self.lines.push_back(sanitize(text));
        self.trim();
    }

    /// Append a streamed chunk, completing lines at each `\n`.
    pub fn push_chunk(&mut self, chunk: &str) {
        let mut parts = chunk.split('\n');
        if let Some(first) = parts.next() {
            self.pending.push_str(first);
        }
        for part in parts {
            let done = std::mem::take(&mut self.pending);
            self.lines.push_back(sanitize(&done));
            self.pending.push_str(part);
        }
        if self.pending.len() > MAX_PENDING_BYTES {
            let done = std::mem::take(&mut self.pending);
            self.lines.push_back(sanitize(&done));
        }
        self.pending_display = sanitize(&self.pending);
        self.trim();
    }

    /// Complete the pending partial line, if any.
    pub fn flush_pending(&mut self) {
        if !self.pending.is_empty() {
            let done = std::mem::take(&mut self.pending);
            self.pending_display.clear();
            self.lines.push_back(sanitize(&done));
        }
    }

    /// Replace the whole content with a diff.
    pub fn set_diff(&mut self, lines: Vec<Line>) {
        self.clear();
        self.diff = lines;
    }

    /// Remove all content.
    pub fn clear(&mut self) {
        self.lines.clear();
        self.pending.clear();
        self.pending_display.clear();
        self.diff.clear();
        self.discarded = 0;
        self.overflowing = false;
    }

    // Logs the first eviction after creation or a clear; the ring stays full until then.
    fn trim(&mut self) {
        let mut evicted = 0;
        while !self.lines.is_empty() && self.len() > self.max_lines {
            self.lines.pop_front();
            evicted += 1;
        }
        if evicted > 0 {
            self.discarded += evicted;
            if !self.overflowing {
                debug!(max_lines = self.max_lines, "line buffer full, discarding oldest lines");
                self.overflowing = true;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_line_buffer_push_text() {
        let mut buf = LineBuffer::new(100);
        buf.push_text("Line 1");
        buf.push_text("Line 2");

        assert_eq!(buf.len(), 2);
        assert_eq!(buf.texts(), vec!["Line 1", "Line 2"]);
    }

    #[test]
    fn test_line_buffer_capacity() {
        let mut buf = LineBuffer::new(3);
        for i in 1..=5 {
            buf.push_text(&format!("Line {i}"));
        }

        assert_eq!(buf.len(), 3);
        assert_eq!(buf.discarded(), 2);
        // Lines 1 and 2 should have been discarded
        assert_eq!(buf.texts()[0], "Line 3");
    }

    #[test]
    fn test_line_buffer_chunks() {
        let mut buf = LineBuffer::new(100);
        buf.push_chunk("Hel");
        buf.push_chunk("lo\nWor");
        assert_eq!(buf.len(), 2);
        assert_eq!(buf.texts(), vec!["Hello", "Wor"]);

        buf.push_chunk("ld\n");
        assert_eq!(buf.texts(), vec!["Hello", "World"]);
        assert!(!buf.is_empty());
    }

    #[test]
    fn test_line_buffer_pending_counts_against_capacity() {
        let mut buf = LineBuffer::new(2);
        buf.push_text("1");
        buf.push_text("2");
        buf.push_chunk("3");

        assert_eq!(buf.texts(), vec!["2", "3"]);
        assert_eq!(buf.len(), 2);
        assert_eq!(buf.discarded(), 1);

        buf.push_chunk("4\n5");
        assert_eq!(buf.texts(), vec!["34", "5"]);
        assert_eq!(buf.discarded(), 2);
    }

    #[test]
    fn test_line_buffer_long_pending_is_completed() {
        let mut buf = LineBuffer::new(10);
        let chunk = "x".repeat(MAX_PENDING_BYTES / 2 + 1);
        buf.push_chunk(&chunk);
        buf.push_chunk(&chunk);

        assert_eq!(buf.len(), 1);
        assert_eq!(buf.texts()[0].len(), 2 * chunk.len());

        buf.push_chunk("tail");
        assert_eq!(buf.texts().last(), Some(&"tail"));
    }

    #[test]
    fn test_line_buffer_push_text_completes_pending() {
        let mut buf = LineBuffer::new(100);
        buf.push_chunk("partial");
        buf.push_text("whole");
        assert_eq!(buf.texts(), vec!["partial", "whole"]);
    }

    #[test]
    fn test_line_buffer_set_diff_replaces() {
        let mut buf = LineBuffer::new(100);
        buf.push_text("old output");
        buf.set_diff(vec![Line::added("x", 1)]);

        assert!(buf.texts().is_empty());
        assert_eq!(buf.diff_lines(), [Line::added("x", 1)]);
    }

    #[test]
    fn test_line_buffer_output_never_evicts_diff() {
        let mut buf = LineBuffer::new(2);
        let diff = vec![Line::removed("a", 1), Line::added("x", 1), Line::added("y", 2)];
        buf.set_diff(diff.clone());
        buf.push_text("one");
        buf.push_text("two");
        buf.push_chunk("three");

        assert_eq!(buf.diff_lines(), diff.as_slice());
        assert_eq!(buf.texts(), vec!["two", "three"]);
    }

    #[test]
    fn test_line_buffer_clear() {
        let mut buf = LineBuffer::new(2);
        buf.push_text("a");
        buf.push_text("b");
        buf.push_text("c");
        buf.push_chunk("d");
        buf.clear();

        assert!(buf.is_empty());
        assert_eq!(buf.discarded(), 0);
    }

    #[test]
    fn test_line_buffer_overflow_rearms_after_clear() {
        let mut buf = LineBuffer::new(1);
        buf.push_text("a");
        assert!(!buf.overflowing);

        buf.push_text("b");
        assert!(buf.overflowing);

        buf.clear();
        assert!(!buf.overflowing);
        buf.push_text("c");
        assert!(!buf.overflowing);
        buf.push_text("d");
        assert!(buf.overflowing);
        assert_eq!(buf.discarded(), 1);
    }
}
