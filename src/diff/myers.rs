//! Myers' O((N+M)·D) shortest edit script.
//!
//! The common prefix and suffix are trimmed before the search. The greedy
//! forward pass keeps one snapshot of the furthest-reaching paths per edit
//! distance, each covering only the diagonals reachable at that distance, so
//! memory grows with D² rather than D·(N+M).

use tracing::warn;

/// Edit distance beyond which the middle of a diff is reported as a single
/// replacement instead of being aligned.
pub const MAX_EDIT_COST: usize = 1024;

/// A single step of an edit script.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Op {
    /// Consume one line from both sides.
    Equal,
    /// Consume one line from the old side.
    Delete,
    /// Consume one line from the new side.
    Insert,
}

/// Compute a minimal edit script turning `old` into `new`.
///
/// If the edit distance of the untrimmed middle exceeds `max_cost`, the
/// middle is replaced wholesale (every old line deleted, then every new line
/// inserted).
pub fn edit_script<T: PartialEq>(old: &[T], new: &[T], max_cost: usize) -> Vec<Op> {
    let prefix = old.iter().zip(new).take_while(|(a, b)| a == b).count();
    let suffix = old[prefix..]
        .iter()
        .rev()
        .zip(new[prefix..].iter().rev())
        .take_while(|(a, b)| a == b)
        .count();

    let a = &old[prefix..old.len() - suffix];
    let b = &new[prefix..new.len() - suffix];

    let mut ops = Vec::with_capacity(old.len() + new.len());
    ops.resize(prefix, Op::Equal);

    if a.is_empty() || b.is_empty() {
        ops.extend(std::iter::repeat(Op::Delete).take(a.len()));
        ops.extend(std::iter::repeat(Op::Insert).take(b.len()));
    } else if let Some(middle) = shortest_path(a, b, max_cost) {
        ops.extend(middle);
    } else {
        warn!(
            old_lines = a.len(),
            new_lines = b.len(),
            max_cost,
            "diff exceeds edit cost ceiling, reporting as replacement"
        );
        ops.extend(std::iter::repeat(Op::Delete).take(a.len()));
        ops.extend(std::iter::repeat(Op::Insert).take(b.len()));
    }

    ops.extend(std::iter::repeat(Op::Equal).take(suffix));
    ops
}

/// Index of diagonal `k` inside the snapshot taken before round `d`.
///
/// Snapshots cover diagonals `-(d + 1)..=(d + 1)`.
#[inline]
#[allow(clippy::cast_sign_loss)]
const fn slot(k: isize, d: isize) -> usize {
    (k + d + 1) as usize
}

/// Run the forward search and backtrack it into an edit script.
///
/// Returns `None` when no path of cost `<= max_cost` exists.
#[allow(clippy::cast_possible_wrap, clippy::cast_sign_loss)]
fn shortest_path<T: PartialEq>(a: &[T], b: &[T], max_cost: usize) -> Option<Vec<Op>> {
    let n = a.len() as isize;
    let m = b.len() as isize;
    let limit = (a.len() + b.len()).min(max_cost) as isize;

    // Furthest x per diagonal, offset so diagonal k lives at k + limit + 1
    let offset = limit + 1;
    let mut v = vec![0isize; (2 * offset + 1) as usize];
    let mut trace: Vec<Vec<isize>> = Vec::new();

    for d in 0..=limit {
        let lo = (-d - 1 + offset) as usize;
        let hi = (d + 1 + offset) as usize;
        trace.push(v[lo..=hi].to_vec());

        let mut k = -d;
        while k <= d {
            let down = k == -d || (k != d && v[(k - 1 + offset) as usize] < v[(k + 1 + offset) as usize]);
            let mut x = if down {
                v[(k + 1 + offset) as usize]
            } else {
                v[(k - 1 + offset) as usize] + 1
            };
            let mut y = x - k;

            while x < n && y < m && a[x as usize] == b[y as usize] {
                x += 1;
                y += 1;
            }
            v[(k + offset) as usize] = x;

            if x >= n && y >= m {
                return Some(backtrack(&trace, n, m));
            }
            k += 2;
        }
    }

    None
}

/// Walk the snapshots from the end back to the origin.
#[allow(clippy::cast_possible_wrap)]
fn backtrack(trace: &[Vec<isize>], n: isize, m: isize) -> Vec<Op> {
    let mut ops = Vec::new();
    let (mut x, mut y) = (n, m);

    for (d, v) in trace.iter().enumerate().rev() {
        let d = d as isize;
        let k = x - y;

        let prev_k = if k == -d || (k != d && v[slot(k - 1, d)] < v[slot(k + 1, d)]) {
            k + 1
        } else {
            k - 1
        };
        let prev_x = v[slot(prev_k, d)];
        let prev_y = prev_x - prev_k;

        while x > prev_x && y > prev_y {
            ops.push(Op::Equal);
            x -= 1;
            y -= 1;
        }

        if d > 0 {
            ops.push(if x == prev_x { Op::Insert } else { Op::Delete });
        }

        x = prev_x;
        y = prev_y;
    }

    ops.reverse();
    ops
}
