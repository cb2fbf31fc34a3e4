//! Myers shortest-edit-script search over chars.
//!
//! The edit graph has the old text along x and the new text along y. A
//! diagonal move consumes one matching char from each side, a move right
//! deletes `old[x]`, a move down inserts `new[y]`. For each distance `d` the
//! search records the furthest x reached on every diagonal `k = x - y` in
//! `[-d, d]`; the list of those levels is the trace that backtracking walks
//! from `(N, M)` back to the origin.
//!
//! Moves that would leave the graph are never taken, so every recorded
//! point satisfies `x <= N` and `y <= M`.

use crate::edit::{Diff, DiffKind, EditScript};
use crate::error::{DiffError, DiffResult};

/// Marks a diagonal the level never reached.
const UNREACHED: u32 = u32::MAX;

/// Longest text, in chars, the search accepts, so that every x fits in a
/// `u32` slot below the unreached marker.
pub const MAX_TEXT_CHARS: usize = UNREACHED as usize - 1;

/// Furthest-reaching x per diagonal for one distance level.
///
/// Holds `2d + 1` four-byte slots indexed by `k + d`. Diagonals of the
/// wrong parity, or that no path of exactly `d` edits can reach, stay
/// [`UNREACHED`].
#[derive(Debug)]
struct Level {
    d: usize,
    xs: Vec<u32>,
}

impl Level {
    fn new(d: usize) -> Self {
        Self {
            d,
            xs: vec![UNREACHED; 2 * d + 1],
        }
    }

    fn slot(&self, k: isize) -> Option<usize> {
        let index = k + self.d as isize;
        (index >= 0 && (index as usize) < self.xs.len()).then_some(index as usize)
    }

    fn get(&self, k: isize) -> Option<usize> {
        self.slot(k)
            .map(|i| self.xs[i])
            .filter(|&x| x != UNREACHED)
            .map(|x| x as usize)
    }

    /// `x` is at most [`MAX_TEXT_CHARS`]; [`search`] rejects longer texts.
    fn set(&mut self, k: isize, x: usize) {
        if let Some(i) = self.slot(k) {
            self.xs[i] = x as u32;
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Step {
    /// Down from diagonal `k + 1`.
    Insert,
    /// Right from diagonal `k - 1`.
    Delete,
}

/// How diagonal `k` is entered from the previous level, and the x right
/// after that single edit (before following the snake).
///
/// Follows the textbook rule: go down when `v[k-1] < v[k+1]`, otherwise go
/// right. Both trace construction and backtracking call this, so they
/// always agree on the predecessor.
fn enter(prev: &Level, k: isize, old_len: usize, new_len: usize) -> Option<(Step, usize)> {
    let down = prev
        .get(k + 1)
        .filter(|&x| x as isize - k <= new_len as isize)
        .map(|x| (Step::Insert, x));
    let right = prev
        .get(k - 1)
        .map(|x| x + 1)
        .filter(|&x| x <= old_len)
        .map(|x| (Step::Delete, x));

    match (down, right) {
        (Some(down), Some(right)) => Some(if right.1 > down.1 { right } else { down }),
        (down, right) => down.or(right),
    }
}

/// Run the forward search and return the trace, one level per distance
/// `0..=D`. The last level is the one that reached `(N, M)`.
fn search(old: &[char], new: &[char], limit: Option<usize>) -> DiffResult<Vec<Level>> {
    let (n, m) = (old.len(), new.len());
    if n.max(m) > MAX_TEXT_CHARS {
        return Err(DiffError::InputTooLarge {
            len: n.max(m),
            max: MAX_TEXT_CHARS,
        });
    }
    let mut trace: Vec<Level> = Vec::new();

    for d in 0..=n + m {
        if let Some(limit) = limit {
            if d > limit {
                return Err(DiffError::EditDistanceExceeded { limit });
            }
        }

        let mut level = Level::new(d);
        let di = d as isize;
        for k in (-di..=di).step_by(2) {
            let start = match trace.last() {
                None => Some(0),
                Some(prev) => enter(prev, k, n, m).map(|(_, x)| x),
            };
            let Some(mut x) = start else {
                continue;
            };
            let mut y = (x as isize - k) as usize;
            while x < n && y < m && old[x] == new[y] {
                x += 1;
                y += 1;
            }
            level.set(k, x);

            if x == n && y == m {
                trace.push(level);
                return Ok(trace);
            }
        }
        trace.push(level);
    }

    Err(DiffError::SearchExhausted {
        old_len: n,
        new_len: m,
    })
}

/// Walk the trace back from `(N, M)` and collect the edits in
/// left-to-right order, coalescing runs of single-char edits.
fn backtrack(old: &[char], new: &[char], trace: &[Level]) -> DiffResult<EditScript> {
    let (n, m) = (old.len(), new.len());
    let (mut x, mut y) = (n, m);
    let mut edits: Vec<(DiffKind, usize, char)> = Vec::with_capacity(trace.len());

    for d in (1..trace.len()).rev() {
        let prev = &trace[d - 1];
        let k = x as isize - y as isize;
        let corrupt = DiffError::CorruptTrace { level: d, diagonal: k };

        let (step, _) = enter(prev, k, n, m).ok_or_else(|| corrupt.clone())?;
        let prev_k = match step {
            Step::Insert => k + 1,
            Step::Delete => k - 1,
        };
        let prev_x = prev.get(prev_k).ok_or(corrupt)?;
        let prev_y = (prev_x as isize - prev_k) as usize;

        match step {
            Step::Insert => edits.push((DiffKind::Insert, prev_x, new[prev_y])),
            Step::Delete => edits.push((DiffKind::Delete, prev_x, old[prev_x])),
        }
        x = prev_x;
        y = prev_y;
    }

    edits.reverse();
    Ok(coalesce(edits))
}

fn coalesce(edits: Vec<(DiffKind, usize, char)>) -> EditScript {
    let mut ops: Vec<Diff> = Vec::new();
    let mut run_len = 0usize;

    for (kind, position, ch) in edits {
        if let Some(last) = ops.last_mut() {
            let extends = last.kind == kind
                && match kind {
                    DiffKind::Insert => last.position == position,
                    DiffKind::Delete => last.position + run_len == position,
                };
            if extends {
                last.text.push(ch);
                run_len += 1;
                continue;
            }
        }
        ops.push(Diff {
            kind,
            position,
            text: ch.to_string(),
        });
        run_len = 1;
    }

    EditScript::from_ops(ops)
}

/// Compute the shortest edit script turning `old` into `new`.
///
/// `limit` caps the edit distance; the search fails with
/// [`DiffError::EditDistanceExceeded`] instead of running past it.
pub fn shortest_edit_script(old: &str, new: &str, limit: Option<usize>) -> DiffResult<EditScript> {
    if old == new {
        return Ok(EditScript::new());
    }
    let old: Vec<char> = old.chars().collect();
    let new: Vec<char> = new.chars().collect();
    let trace = search(&old, &new, limit)?;
    backtrack(&old, &new, &trace)
}
