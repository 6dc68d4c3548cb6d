//! Pure predicates over link drafts.

use crate::entities::LinkDraft;
use crate::enums::TagDelimiter;
use crate::errors::CoreError;

/// True iff the trimmed title and the trimmed url are both non-empty.
#[must_use]
pub fn is_persistable(draft: &LinkDraft) -> bool {
    !draft.title.trim().is_empty() && !draft.url.trim().is_empty()
}

/// Reject drafts that [`is_persistable`] refuses.
///
/// # Errors
///
/// Returns `CoreError::Validation` when the title or url is blank.
pub fn validate(draft: &LinkDraft) -> Result<(), CoreError> {
    if is_persistable(draft) {
        Ok(())
    } else {
        Err(CoreError::Validation("title and url are required".into()))
    }
}

/// Split a joined tag string into trimmed, non-empty tags, keeping order.
#[must_use]
pub fn normalize_tags(input: &str, delimiter: TagDelimiter) -> Vec<String> {
    input
        .split(delimiter.as_char())
        .map(str::trim)
        .filter(|tag| !tag.is_empty())
        .map(str::to_string)
        .collect()
}
