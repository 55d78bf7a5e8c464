use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One saved snapshot of a note's text.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Revision {
    /// Zero-based position in the note's history.
    pub index: usize,
    /// Full note body at save time.
    pub text: String,
    /// When the revision was appended.
    pub saved_at: DateTime<Utc>,
}

impl Revision {
    pub fn new(index: usize, text: impl Into<String>) -> Self {
        Self {
            index,
            text: text.into(),
            saved_at: Utc::now(),
        }
    }

    /// Whether this is the first revision of its note.
    pub fn is_initial(&self) -> bool {
        self.index == 0
    }
}
