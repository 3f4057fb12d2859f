//! Context windowing: Keep only the unchanged lines near a change.

use super::Line;

/// Placeholder for a run of unchanged lines that fell outside the window.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ElidedRun {
    /// Number of lines the run stands in for (always at least 1).
    pub skipped: usize,
}

/// A row of a windowed diff.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DiffRow {
    /// A line that survived windowing.
    Line(Line),
    /// A run of dropped unchanged lines.
    Elided(ElidedRun),
}

/// Context windowing policy.
///
/// With no radius every line is kept. With a radius, unchanged lines further
/// than the radius from every change are dropped. A radius of 0 still keeps
/// the unchanged lines immediately adjacent to a change.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ContextWindow {
    /// Context radius in lines (`None` = no windowing).
    pub radius: Option<usize>,
}

impl ContextWindow {
    /// A window that keeps every line.
    pub const UNLIMITED: Self = Self { radius: None };

    /// Create a window with the given radius.
    pub const fn new(radius: Option<usize>) -> Self {
        Self { radius }
    }

    /// Apply the window to a full diff.
    ///
    /// A diff with no changes is returned unfiltered.
    pub fn window(&self, lines: &[Line]) -> Vec<DiffRow> {
        let Some(radius) = self.radius else {
            return lines.iter().cloned().map(DiffRow::Line).collect();
        };
        let keep = keep_mask(lines, radius.max(1));

        let mut rows = Vec::with_capacity(lines.len());
        let mut skipped = 0;
        for (line, keep) in lines.iter().zip(keep) {
            if keep {
                if skipped > 0 {
                    rows.push(DiffRow::Elided(ElidedRun { skipped }));
                    skipped = 0;
                }
                rows.push(DiffRow::Line(line.clone()));
            } else {
                skipped += 1;
            }
        }
        if skipped > 0 {
            rows.push(DiffRow::Elided(ElidedRun { skipped }));
        }

        rows
    }
}

/// Mark lines within `radius` positions of a change.
fn keep_mask(lines: &[Line], radius: usize) -> Vec<bool> {
    let changes: Vec<usize> = lines
        .iter()
        .enumerate()
        .filter(|(_, line)| line.kind.is_change())
        .map(|(i, _)| i)
        .collect();

    if changes.is_empty() {
        return vec![true; lines.len()];
    }

    let mut keep = vec![false; lines.len()];
    for &c in &changes {
        let start = c.saturating_sub(radius);
        let end = (c + radius).min(lines.len() - 1);
        keep[start..=end].iter_mut().for_each(|k| *k = true);
    }
    keep
}

/// Apply a window with the given radius.
pub fn window(lines: &[Line], radius: Option<usize>) -> Vec<DiffRow> {
    ContextWindow::new(radius).window(lines)
}
