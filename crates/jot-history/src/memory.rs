//! In-memory history store.
//!
//! [`InMemoryHistory`] keeps every note's revisions in a `HashMap` behind a
//! `RwLock`. It backs one editing session; data is lost when dropped.

use std::collections::HashMap;
use std::sync::RwLock;

use tracing::debug;

use crate::error::{HistoryError, HistoryResult};
use crate::names::validate_note_name;
use crate::revision::Revision;
use crate::traits::{HistoryReader, HistoryWriter};

/// An in-memory implementation of [`HistoryWriter`] and [`HistoryReader`].
#[derive(Debug, Default)]
pub struct InMemoryHistory {
    notes: RwLock<HashMap<String, Vec<Revision>>>,
}

impl InMemoryHistory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Total number of revisions across all notes.
    pub fn total_revisions(&self) -> HistoryResult<usize> {
        let notes = self.read_lock()?;
        Ok(notes.values().map(Vec::len).sum())
    }

    fn read_lock(
        &self,
    ) -> HistoryResult<std::sync::RwLockReadGuard<'_, HashMap<String, Vec<Revision>>>> {
        self.notes
            .read()
            .map_err(|e| HistoryError::LockPoisoned(e.to_string()))
    }

    fn write_lock(
        &self,
    ) -> HistoryResult<std::sync::RwLockWriteGuard<'_, HashMap<String, Vec<Revision>>>> {
        self.notes
            .write()
            .map_err(|e| HistoryError::LockPoisoned(e.to_string()))
    }
}

impl HistoryWriter for InMemoryHistory {
    fn append(&self, note: &str, text: &str) -> HistoryResult<Revision> {
        validate_note_name(note)?;

        let mut notes = self.write_lock()?;
        let history = notes.entry(note.to_string()).or_default();
        let revision = Revision::new(history.len(), text);
        history.push(revision.clone());

        debug!(note, index = revision.index, bytes = text.len(), "revision appended");
        Ok(revision)
    }

    fn rename(&self, from: &str, to: &str) -> HistoryResult<()> {
        validate_note_name(to)?;

        let mut notes = self.write_lock()?;
        if !notes.contains_key(from) {
            return Err(HistoryError::NoteNotFound {
                name: from.to_string(),
            });
        }
        if from == to {
            return Ok(());
        }
        if notes.contains_key(to) {
            return Err(HistoryError::DuplicateNote {
                name: to.to_string(),
            });
        }

        if let Some(history) = notes.remove(from) {
            notes.insert(to.to_string(), history);
        }
        debug!(from, to, "history renamed");
        Ok(())
    }

    fn discard(&self, note: &str) -> HistoryResult<bool> {
        let mut notes = self.write_lock()?;
        let removed = notes.remove(note);
        if let Some(history) = &removed {
            debug!(note, revisions = history.len(), "history discarded");
        }
        Ok(removed.is_some())
    }
}

impl HistoryReader for InMemoryHistory {
    fn revisions(&self, note: &str) -> HistoryResult<Vec<Revision>> {
        let notes = self.read_lock()?;
        Ok(notes.get(note).cloned().unwrap_or_default())
    }

    fn get(&self, note: &str, index: usize) -> HistoryResult<Option<Revision>> {
        let notes = self.read_lock()?;
        Ok(notes.get(note).and_then(|h| h.get(index)).cloned())
    }

    fn latest(&self, note: &str) -> HistoryResult<Option<Revision>> {
        let notes = self.read_lock()?;
        Ok(notes.get(note).and_then(|h| h.last()).cloned())
    }

    fn count(&self, note: &str) -> HistoryResult<usize> {
        let notes = self.read_lock()?;
        Ok(notes.get(note).map_or(0, Vec::len))
    }

    fn notes(&self) -> HistoryResult<Vec<String>> {
        let notes = self.read_lock()?;
        let mut names: Vec<String> = notes.keys().cloned().collect();
        names.sort();
        Ok(names)
    }
}
