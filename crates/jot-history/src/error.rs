//! Error types for history operations.

use thiserror::Error;

/// Errors that can occur while reading or updating note histories.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum HistoryError {
    /// The note name is not acceptable.
    #[error("invalid note name {name:?}: {reason}")]
    InvalidNoteName { name: String, reason: String },

    /// No history exists for the note.
    #[error("note not found: {name}")]
    NoteNotFound { name: String },

    /// A rename target already has a history.
    #[error("note already exists: {name}")]
    DuplicateNote { name: String },

    /// The requested revision index is past the end of the history.
    #[error("revision {index} out of range for {name} ({count} revisions)")]
    RevisionOutOfRange {
        name: String,
        index: usize,
        count: usize,
    },

    /// The history lock was poisoned by a panicking writer.
    #[error("history lock poisoned: {0}")]
    LockPoisoned(String),
}

/// Convenience alias for history results.
pub type HistoryResult<T> = Result<T, HistoryError>;
