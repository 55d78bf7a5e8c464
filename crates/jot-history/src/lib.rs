//! Per-note version history for Jotter.
//!
//! Every save of a note appends an immutable [`Revision`]. Histories are
//! keyed by note name, ordered oldest first, and only ever removed as a
//! whole when the note itself is deleted. The delta of a revision is its
//! line diff against the previous one (the first revision is compared with
//! the empty note).
//!
//! - [`HistoryWriter`] / [`HistoryReader`] trait boundaries
//! - [`InMemoryHistory`] implementation for the app session and tests
//! - [`validate_note_name`] naming rules shared by create and rename

pub mod error;
pub mod memory;
pub mod names;
pub mod revision;
pub mod traits;

pub use error::{HistoryError, HistoryResult};
pub use memory::InMemoryHistory;
pub use names::validate_note_name;
pub use revision::Revision;
pub use traits::{HistoryReader, HistoryWriter};
