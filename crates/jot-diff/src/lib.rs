//! Line diff engine for Jotter.
//!
//! Compares two revisions of a note line by line and produces an edit script
//! the history view renders as added/removed spans.
//!
//! # Key Types
//!
//! - [`DiffOp`] / [`DiffKind`] -- One classified line of the edit script
//! - [`LineDiff`] -- Edit script with summary and reconstruction helpers
//! - [`DiffStrategy`] -- Greedy (default, compatibility) or Myers (minimal)

pub mod line_diff;
pub mod myers;

pub use line_diff::{diff_lines, diff_lines_with, split_lines, DiffKind, DiffOp, DiffStrategy, LineDiff};
