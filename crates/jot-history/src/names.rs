//! Note name validation.
//!
//! Notes live in folders, so a name may contain `/` separators. Valid names:
//! - Must not be empty or whitespace only
//! - Must not contain line breaks, tabs or NUL
//! - Must not start or end with `/`, or contain `//`
//! - Must not contain `.` or `..` path components

use crate::error::{HistoryError, HistoryResult};

const FORBIDDEN_CHARS: &[char] = &['\n', '\r', '\t', '\0'];

/// Validate a note name, returning `Ok(())` if it can key a history.
///
/// # Examples
///
/// ```
/// use jot_history::validate_note_name;
///
/// assert!(validate_note_name("Untitled.md").is_ok());
/// assert!(validate_note_name("work/standup.md").is_ok());
/// assert!(validate_note_name("   ").is_err());
/// ```
pub fn validate_note_name(name: &str) -> HistoryResult<()> {
    let invalid = |reason: &str| HistoryError::InvalidNoteName {
        name: name.to_string(),
        reason: reason.to_string(),
    };

    if name.trim().is_empty() {
        return Err(invalid("note name must not be empty"));
    }

    if let Some(ch) = name.chars().find(|c| FORBIDDEN_CHARS.contains(c)) {
        return Err(invalid(&format!("contains forbidden character: {ch:?}")));
    }

    if name.starts_with('/') || name.ends_with('/') {
        return Err(invalid("must not start or end with '/'"));
    }

    for component in name.split('/') {
        if component.is_empty() {
            return Err(invalid("folder components must not be empty"));
        }
        if component == "." || component == ".." {
            return Err(invalid("must not contain '.' or '..' components"));
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn valid_names() {
        assert!(validate_note_name("Untitled.md").is_ok());
        assert!(validate_note_name("shopping list").is_ok());
        assert!(validate_note_name("work/2024/plan.md").is_ok());
        assert!(validate_note_name(".hidden").is_ok());
    }

    #[test]
    fn reject_empty_and_blank() {
        assert!(validate_note_name("").is_err());
        assert!(validate_note_name(" \t ").is_err());
    }

    #[test]
    fn reject_control_chars() {
        assert!(validate_note_name("a\nb").is_err());
        assert!(validate_note_name("a\rb").is_err());
        assert!(validate_note_name("a\0b").is_err());
    }

    #[test]
    fn reject_bad_folders() {
        assert!(validate_note_name("/abs.md").is_err());
        assert!(validate_note_name("dir/").is_err());
        assert!(validate_note_name("a//b").is_err());
        assert!(validate_note_name("../escape").is_err());
        assert!(validate_note_name("a/./b").is_err());
    }

    #[test]
    fn error_carries_name() {
        let err = validate_note_name("").unwrap_err();
        assert!(matches!(err, HistoryError::InvalidNoteName { ref name, .. } if name.is_empty()));
    }
}
