//! Filter state and the visibility predicate.

use hub_core::entities::LinkRecord;
use serde::{Deserialize, Serialize};

/// The active search and facet selections.
///
/// An empty string selection means "no selection", same as `None`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilterState {
    #[serde(default)]
    pub query: String,
    #[serde(default)]
    pub favorite_only: bool,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub location: Option<String>,
    #[serde(default)]
    pub tag: Option<String>,
}

impl FilterState {
    #[must_use]
    pub fn with_query(mut self, query: impl Into<String>) -> Self {
        self.query = query.into();
        self
    }

    #[must_use]
    pub const fn with_favorite_only(mut self, favorite_only: bool) -> Self {
        self.favorite_only = favorite_only;
        self
    }

    #[must_use]
    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category = Some(category.into());
        self
    }

    #[must_use]
    pub fn with_location(mut self, location: impl Into<String>) -> Self {
        self.location = Some(location.into());
        self
    }

    #[must_use]
    pub fn with_tag(mut self, tag: impl Into<String>) -> Self {
        self.tag = Some(tag.into());
        self
    }

    /// True when at least one filter would exclude something.
    #[must_use]
    pub fn is_active(&self) -> bool {
        !self.query.trim().is_empty()
            || self.favorite_only
            || selection(self.category.as_ref()).is_some()
            || selection(self.location.as_ref()).is_some()
            || selection(self.tag.as_ref()).is_some()
    }
}

fn selection(value: Option<&String>) -> Option<&str> {
    value.map(String::as_str).filter(|v| !v.is_empty())
}

/// Whether `record` passes every active filter in `filter`.
#[must_use]
pub fn matches(record: &LinkRecord, filter: &FilterState) -> bool {
    if filter.favorite_only && !record.favorite {
        return false;
    }
    if let Some(category) = selection(filter.category.as_ref()) {
        if record.category.as_deref().unwrap_or_default() != category {
            return false;
        }
    }
    if let Some(location) = selection(filter.location.as_ref()) {
        if record.location.as_deref().unwrap_or_default() != location {
            return false;
        }
    }
    if let Some(tag) = selection(filter.tag.as_ref()) {
        if !record.tag_list().iter().any(|t| t == tag) {
            return false;
        }
    }

    let query = filter.query.trim().to_lowercase();
    query.is_empty() || haystack(record).contains(&query)
}

/// Lowercased, space-joined searchable text of a record.
fn haystack(record: &LinkRecord) -> String {
    let tags = record.tag_list().join(" ");
    [
        record.title.as_str(),
        record.url.as_str(),
        record.description.as_deref().unwrap_or_default(),
        record.category.as_deref().unwrap_or_default(),
        record.location.as_deref().unwrap_or_default(),
        tags.as_str(),
    ]
    .join(" ")
    .to_lowercase()
}

/// The records visible under `filter`, in input order.
#[must_use]
pub fn filter_links<'a>(records: &'a [LinkRecord], filter: &FilterState) -> Vec<&'a LinkRecord> {
    records.iter().filter(|r| matches(r, filter)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_state_is_inactive() {
        assert!(!FilterState::default().is_active());
        assert!(!FilterState::default().with_category("").is_active());
        assert!(!FilterState::default().with_query("   ").is_active());
        assert!(FilterState::default().with_favorite_only(true).is_active());
    }
}
