//! Greedy line diff.
//!
//! A single forward pass over two cursors. At each step the current lines are
//! either equal, or one of them is classified by a plain "does it occur
//! anywhere on the other side" test over the whole line sequence, not just
//! the part past the cursor. This is deliberately not a longest common
//! subsequence: duplicated or reordered lines can yield a larger script than
//! optimal, and the history view depends on that exact shape.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::myers;

/// Classification of a single line.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DiffKind {
    /// Present in both revisions at the aligned position.
    Unchanged,
    /// Present only in the new revision.
    Added,
    /// Present only in the old revision.
    Removed,
}

impl DiffKind {
    /// Marker used when rendering a line in unified style.
    pub fn marker(self) -> char {
        match self {
            DiffKind::Unchanged => ' ',
            DiffKind::Added => '+',
            DiffKind::Removed => '-',
        }
    }
}

/// One line of an edit script.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct DiffOp {
    pub kind: DiffKind,
    pub text: String,
}

impl DiffOp {
    pub fn unchanged(text: impl Into<String>) -> Self {
        Self {
            kind: DiffKind::Unchanged,
            text: text.into(),
        }
    }

    pub fn added(text: impl Into<String>) -> Self {
        Self {
            kind: DiffKind::Added,
            text: text.into(),
        }
    }

    pub fn removed(text: impl Into<String>) -> Self {
        Self {
            kind: DiffKind::Removed,
            text: text.into(),
        }
    }

    /// Whether this line belongs to the old revision.
    pub fn in_old(&self) -> bool {
        self.kind != DiffKind::Added
    }

    /// Whether this line belongs to the new revision.
    pub fn in_new(&self) -> bool {
        self.kind != DiffKind::Removed
    }
}

impl fmt::Display for DiffOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.kind.marker(), self.text)
    }
}

/// Which alignment to run.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DiffStrategy {
    /// Cheap forward pass. Output shape is stable and relied upon.
    #[default]
    Greedy,
    /// Minimal edit script (Myers). Differs from `Greedy` on duplicated or
    /// reordered lines.
    Myers,
}

/// A complete edit script between two revisions.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LineDiff {
    pub ops: Vec<DiffOp>,
}

impl LineDiff {
    /// Diff `old` against `new` with the given strategy.
    pub fn between(old: &str, new: &str, strategy: DiffStrategy) -> Self {
        Self {
            ops: diff_lines_with(old, new, strategy),
        }
    }

    /// Returns `true` if every op is `Unchanged`.
    pub fn is_unchanged(&self) -> bool {
        self.ops.iter().all(|op| op.kind == DiffKind::Unchanged)
    }

    /// Number of added lines.
    pub fn additions(&self) -> usize {
        self.count(DiffKind::Added)
    }

    /// Number of removed lines.
    pub fn deletions(&self) -> usize {
        self.count(DiffKind::Removed)
    }

    /// Added and removed ops in order, skipping unchanged lines.
    pub fn changes(&self) -> impl Iterator<Item = &DiffOp> {
        self.ops.iter().filter(|op| op.kind != DiffKind::Unchanged)
    }

    /// Rebuild the old revision from the script.
    pub fn old_text(&self) -> String {
        join(self.ops.iter().filter(|op| op.in_old()))
    }

    /// Rebuild the new revision from the script.
    pub fn new_text(&self) -> String {
        join(self.ops.iter().filter(|op| op.in_new()))
    }

    fn count(&self, kind: DiffKind) -> usize {
        self.ops.iter().filter(|op| op.kind == kind).count()
    }
}

impl From<Vec<DiffOp>> for LineDiff {
    fn from(ops: Vec<DiffOp>) -> Self {
        Self { ops }
    }
}

fn join<'a>(ops: impl Iterator<Item = &'a DiffOp>) -> String {
    ops.map(|op| op.text.as_str()).collect::<Vec<_>>().join("\n")
}

/// Split text into lines on `\n`.
///
/// The empty string yields a single empty line, and a trailing line break
/// yields a trailing empty line, so joining with `\n` is always lossless.
pub fn split_lines(text: &str) -> Vec<&str> {
    text.split('\n').collect()
}

/// Compute the greedy line diff between two revisions.
pub fn diff_lines(old: &str, new: &str) -> Vec<DiffOp> {
    let old_lines = split_lines(old);
    let new_lines = split_lines(new);
    let (mut i, mut j) = (0, 0);
    let mut ops = Vec::with_capacity(old_lines.len().max(new_lines.len()));

    while i < old_lines.len() || j < new_lines.len() {
        let old_line = old_lines.get(i).copied();
        let new_line = new_lines.get(j).copied();

        match (old_line, new_line) {
            (Some(o), Some(n)) if o == n => {
                ops.push(DiffOp::unchanged(o));
                i += 1;
                j += 1;
            }
            (Some(o), Some(n)) => {
                if !old_lines.contains(&n) {
                    ops.push(DiffOp::added(n));
                    j += 1;
                } else if !new_lines.contains(&o) {
                    ops.push(DiffOp::removed(o));
                    i += 1;
                } else {
                    // Both lines occur on the other side; treat as a substitution.
                    ops.push(DiffOp::removed(o));
                    ops.push(DiffOp::added(n));
                    i += 1;
                    j += 1;
                }
            }
            (None, Some(n)) => {
                ops.push(DiffOp::added(n));
                j += 1;
            }
            (Some(o), None) => {
                ops.push(DiffOp::removed(o));
                i += 1;
            }
            (None, None) => break,
        }
    }

    ops
}

/// Compute a line diff with an explicit strategy.
pub fn diff_lines_with(old: &str, new: &str, strategy: DiffStrategy) -> Vec<DiffOp> {
    match strategy {
        DiffStrategy::Greedy => diff_lines(old, new),
        DiffStrategy::Myers => myers::diff_lines_minimal(old, new),
    }
}
