use jot_diff::{DiffStrategy, LineDiff};

use crate::error::{HistoryError, HistoryResult};
use crate::revision::Revision;

/// Write boundary for note histories.
pub trait HistoryWriter: Send + Sync {
    /// Append a new revision of `note`, creating its history on first save.
    fn append(&self, note: &str, text: &str) -> HistoryResult<Revision>;

    /// Move the history of `from` to `to`.
    ///
    /// Fails if `from` has no history, `to` is not a valid name, or `to`
    /// already has a history.
    fn rename(&self, from: &str, to: &str) -> HistoryResult<()>;

    /// Drop the whole history of `note`. Returns `true` if it existed.
    fn discard(&self, note: &str) -> HistoryResult<bool>;
}

/// Read boundary for note histories.
///
/// Reads of unknown notes are not errors: they yield an empty history.
pub trait HistoryReader: Send + Sync {
    fn revisions(&self, note: &str) -> HistoryResult<Vec<Revision>>;

    fn get(&self, note: &str, index: usize) -> HistoryResult<Option<Revision>>;

    fn latest(&self, note: &str) -> HistoryResult<Option<Revision>>;

    fn count(&self, note: &str) -> HistoryResult<usize>;

    /// Names of all notes with a history, sorted.
    fn notes(&self) -> HistoryResult<Vec<String>>;

    /// Line diff introduced by revision `index` of `note`.
    fn delta(&self, note: &str, index: usize) -> HistoryResult<LineDiff> {
        self.delta_with(note, index, DiffStrategy::Greedy)
    }

    /// [`HistoryReader::delta`] with an explicit diff strategy.
    fn delta_with(
        &self,
        note: &str,
        index: usize,
        strategy: DiffStrategy,
    ) -> HistoryResult<LineDiff> {
        let Some(current) = self.get(note, index)? else {
            let count = self.count(note)?;
            if count == 0 {
                return Err(HistoryError::NoteNotFound {
                    name: note.to_string(),
                });
            }
            return Err(HistoryError::RevisionOutOfRange {
                name: note.to_string(),
                index,
                count,
            });
        };
        let previous = match index.checked_sub(1) {
            Some(prev) => self.get(note, prev)?.map(|r| r.text).unwrap_or_default(),
            None => String::new(),
        };
        Ok(LineDiff::between(&previous, &current.text, strategy))
    }

    /// Delta of every revision of `note`, oldest first, from one read of
    /// the history.
    fn deltas_with(&self, note: &str, strategy: DiffStrategy) -> HistoryResult<Vec<LineDiff>> {
        let revisions = self.revisions(note)?;
        if revisions.is_empty() {
            return Err(HistoryError::NoteNotFound {
                name: note.to_string(),
            });
        }
        let mut previous = "";
        let mut deltas = Vec::with_capacity(revisions.len());
        for revision in &revisions {
            deltas.push(LineDiff::between(previous, &revision.text, strategy));
            previous = &revision.text;
        }
        Ok(deltas)
    }
}
