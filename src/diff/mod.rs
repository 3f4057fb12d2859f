//! Diff module: Line-oriented diffing for diff blocks.
//!
//! This module contains:
//! - [`split_lines`]: Splits a text blob into lines
//! - [`diff_lines`]: Aligns two line sequences and classifies every line
//! - [`Summary`]: Added/removed counts over a full diff
//! - [`window`]: Context windowing around changes
//!
//! The alignment itself lives in [`myers`].

mod myers;
pub mod window;

use myers::Op;
use std::fmt;

pub use window::{ContextWindow, DiffRow, ElidedRun};

/// Classification of a single diff line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LineKind {
    /// Present on both sides.
    Unchanged,
    /// Present only on the new side.
    Added,
    /// Present only on the old side.
    Removed,
}

impl LineKind {
    /// Whether this line is part of a hunk.
    #[inline]
    pub const fn is_change(self) -> bool {
        matches!(self, Self::Added | Self::Removed)
    }
}

/// A classified line of diff output.
///
/// `old_line` is `None` exactly for [`LineKind::Added`] and `new_line` is
/// `None` exactly for [`LineKind::Removed`]. Line numbers are 1-based.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Line {
    /// Line classification.
    pub kind: LineKind,
    /// Text of the line, without its line break.
    pub content: String,
    /// Line number on the old side.
    pub old_line: Option<usize>,
    /// Line number on the new side.
    pub new_line: Option<usize>,
}

impl Line {
    /// Create an unchanged line.
    pub fn unchanged(content: impl Into<String>, old_line: usize, new_line: usize) -> Self {
        Self {
            kind: LineKind::Unchanged,
            content: content.into(),
            old_line: Some(old_line),
            new_line: Some(new_line),
        }
    }

    /// Create an added line.
    pub fn added(content: impl Into<String>, new_line: usize) -> Self {
        Self {
            kind: LineKind::Added,
            content: content.into(),
            old_line: None,
            new_line: Some(new_line),
        }
    }

    /// Create a removed line.
    pub fn removed(content: impl Into<String>, old_line: usize) -> Self {
        Self {
            kind: LineKind::Removed,
            content: content.into(),
            old_line: Some(old_line),
            new_line: None,
        }
    }
}

/// Added/removed counts for a diff.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Summary {
    /// Number of added lines.
    pub added: usize,
    /// Number of removed lines.
    pub removed: usize,
}

impl Summary {
    /// Count the changes in a full (un-windowed) diff.
    pub fn of(lines: &[Line]) -> Self {
        lines.iter().fold(Self::default(), |mut acc, line| {
            match line.kind {
                LineKind::Added => acc.added += 1,
                LineKind::Removed => acc.removed += 1,
                LineKind::Unchanged => {}
            }
            acc
        })
    }

    /// True when the diff has no added or removed lines.
    pub const fn is_unchanged(&self) -> bool {
        self.added == 0 && self.removed == 0
    }
}

impl fmt::Display for Summary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Added {} lines, removed {} lines", self.added, self.removed)
    }
}

/// Split a text blob into lines.
///
/// Splits on `\n`, dropping a `\r` that precedes it. A trailing line break
/// does not produce a trailing empty line, and empty input yields no lines:
///
/// ```
/// use foldout::diff::split_lines;
///
/// assert_eq!(split_lines("a\nb\n"), vec!["a", "b"]);
/// assert_eq!(split_lines("a\nb"), vec!["a", "b"]);
/// assert!(split_lines("").is_empty());
/// ```
pub fn split_lines(text: &str) -> Vec<&str> {
    text.lines().collect()
}

/// Diff two texts line by line.
pub fn diff_text(old: &str, new: &str) -> Vec<Line> {
    diff_lines(&split_lines(old), &split_lines(new))
}

/// Align two line sequences and classify every line.
///
/// Each maximal change region is emitted as all of its removed lines (old
/// order) followed by all of its added lines (new order).
pub fn diff_lines<S: AsRef<str>>(old: &[S], new: &[S]) -> Vec<Line> {
    let old: Vec<&str> = old.iter().map(AsRef::as_ref).collect();
    let new: Vec<&str> = new.iter().map(AsRef::as_ref).collect();
    let ops = myers::edit_script(&old, &new, myers::MAX_EDIT_COST);

    let mut out = Vec::with_capacity(ops.len());
    let (mut oi, mut ni) = (0usize, 0usize);
    let mut i = 0;

    while i < ops.len() {
        if ops[i] == Op::Equal {
            out.push(Line::unchanged(old[oi], oi + 1, ni + 1));
            oi += 1;
            ni += 1;
            i += 1;
            continue;
        }

        // Hunk: count both sides, then emit removals before additions
        let (mut deletes, mut inserts) = (0, 0);
        while i < ops.len() && ops[i] != Op::Equal {
            match ops[i] {
                Op::Delete => deletes += 1,
                Op::Insert => inserts += 1,
                Op::Equal => unreachable!(),
            }
            i += 1;
        }

        for offset in 0..deletes {
            out.push(Line::removed(old[oi + offset], oi + offset + 1));
        }
        for offset in 0..inserts {
            out.push(Line::added(new[ni + offset], ni + offset + 1));
        }
        oi += deletes;
        ni += inserts;
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn kinds(lines: &[Line]) -> Vec<LineKind> {
        lines.iter().map(|l| l.kind).collect()
    }

    #[test]
    fn test_split_lines_trailing_newline() {
        assert_eq!(split_lines("a\nb\n"), vec!["a", "b"]);
        assert_eq!(split_lines("a\nb"), vec!["a", "b"]);
        assert_eq!(split_lines(""), Vec::<&str>::new());
    }

    #[test]
    fn test_split_lines_keeps_blank_lines() {
        assert_eq!(split_lines("\na"), vec!["", "a"]);
        assert_eq!(split_lines("a\n\n"), vec!["a", ""]);
        assert_eq!(split_lines("a\r\nb\r\n"), vec!["a", "b"]);
    }

    #[test]
    fn test_diff_modified_line() {
        let lines = diff_text("line 1\nline 2\nline 3", "line 1\nline 2 modified\nline 3");

        assert_eq!(
            lines,
            vec![
                Line::unchanged("line 1", 1, 1),
                Line::removed("line 2", 2),
                Line::added("line 2 modified", 2),
                Line::unchanged("line 3", 3, 3),
            ]
        );

        let summary = Summary::of(&lines);
        assert_eq!(summary, Summary { added: 1, removed: 1 });
        assert_eq!(summary.to_string(), "Added 1 lines, removed 1 lines");
    }

    #[test]
    fn test_diff_identical() {
        let lines = diff_text("a\nb\nc", "a\nb\nc");
        assert_eq!(kinds(&lines), vec![LineKind::Unchanged; 3]);
        assert!(Summary::of(&lines).is_unchanged());
    }

    #[test]
    fn test_diff_empty_sides() {
        let added = diff_text("", "x\ny");
        assert_eq!(added, vec![Line::added("x", 1), Line::added("y", 2)]);

        let removed = diff_text("x\ny", "");
        assert_eq!(removed, vec![Line::removed("x", 1), Line::removed("y", 2)]);

        assert!(diff_text("", "").is_empty());
    }

    #[test]
    fn test_diff_hunk_groups_removals_first() {
        let lines = diff_lines(&["keep", "a", "b", "end"], &["keep", "x", "y", "z", "end"]);

        assert_eq!(
            kinds(&lines),
            vec![
                LineKind::Unchanged,
                LineKind::Removed,
                LineKind::Removed,
                LineKind::Added,
                LineKind::Added,
                LineKind::Added,
                LineKind::Unchanged,
            ]
        );
        assert_eq!(lines[6], Line::unchanged("end", 4, 5));
    }

    #[test]
    fn test_diff_reorder_is_not_a_move() {
        let lines = diff_lines(&["a", "b"], &["b", "a"]);
        let summary = Summary::of(&lines);

        assert_eq!(summary, Summary { added: 1, removed: 1 });
        assert_eq!(lines.iter().filter(|l| l.kind == LineKind::Unchanged).count(), 1);
    }

    #[test]
    fn test_diff_numbering_is_contiguous() {
        let lines = diff_text("a\nb\nc\nd\ne", "a\nc\nX\nd\ne\nf");

        let olds: Vec<usize> = lines.iter().filter_map(|l| l.old_line).collect();
        let news: Vec<usize> = lines.iter().filter_map(|l| l.new_line).collect();

        assert_eq!(olds, (1..=5).collect::<Vec<_>>());
        assert_eq!(news, (1..=6).collect::<Vec<_>>());
    }
}
