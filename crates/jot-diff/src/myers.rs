//! Minimal line diff via the `similar` crate (Myers algorithm).
//!
//! Lines are split exactly like the greedy differ, so both strategies cover
//! the same line sequences and reconstruct their inputs identically.

use similar::{Algorithm, ChangeTag, TextDiff};

use crate::line_diff::{split_lines, DiffOp};

/// Compute a minimal edit script between two revisions.
pub fn diff_lines_minimal(old: &str, new: &str) -> Vec<DiffOp> {
    let old_lines = split_lines(old);
    let new_lines = split_lines(new);

    let text_diff = TextDiff::configure()
        .algorithm(Algorithm::Myers)
        .diff_slices(&old_lines, &new_lines);

    text_diff
        .iter_all_changes()
        .map(|change| {
            let text = change.value().to_string();
            match change.tag() {
                ChangeTag::Equal => DiffOp::unchanged(text),
                ChangeTag::Delete => DiffOp::removed(text),
                ChangeTag::Insert => DiffOp::added(text),
            }
        })
        .collect()
}
