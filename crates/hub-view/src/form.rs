//! The add/edit form as the user fills it in.

use hub_core::entities::{LinkDraft, LinkRecord};
use hub_core::enums::TagDelimiter;
use hub_core::record::normalize_tags;
use serde::{Deserialize, Serialize};

/// Raw form fields. Tags are one comma-separated string.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LinkForm {
    pub title: String,
    pub url: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub category: String,
    #[serde(default)]
    pub location: String,
    #[serde(default)]
    pub tags: String,
}

impl LinkForm {
    #[must_use]
    pub fn new(title: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            url: url.into(),
            ..Self::default()
        }
    }

    /// Prefill from an existing record, tags joined with `", "`.
    #[must_use]
    pub fn from_record(record: &LinkRecord) -> Self {
        Self {
            title: record.title.clone(),
            url: record.url.clone(),
            description: record.description.clone().unwrap_or_default(),
            category: record.category.clone().unwrap_or_default(),
            location: record.location.clone().unwrap_or_default(),
            tags: record.tag_list().join(", "),
        }
    }

    /// The normalized draft: trimmed title/url, blanks as `None`, tags split on commas.
    #[must_use]
    pub fn into_draft(self) -> LinkDraft {
        let tags = normalize_tags(&self.tags, TagDelimiter::Comma);
        LinkDraft {
            title: self.title,
            url: self.url,
            description: Some(self.description),
            category: Some(self.category),
            location: Some(self.location),
            tags: Some(tags),
        }
        .normalized()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn into_draft_normalizes_every_field() {
        let form = LinkForm {
            title: "  Stok Gudang A ".into(),
            url: " https://example.com/s1 ".into(),
            description: "   ".into(),
            category: "Stok".into(),
            location: String::new(),
            tags: " harian , , stok,".into(),
        };
        let draft = form.into_draft();
        assert_eq!(draft.title, "Stok Gudang A");
        assert_eq!(draft.url, "https://example.com/s1");
        assert_eq!(draft.description, None);
        assert_eq!(draft.category.as_deref(), Some("Stok"));
        assert_eq!(draft.location, None);
        assert_eq!(draft.tags, Some(vec!["harian".to_string(), "stok".to_string()]));
    }

    #[test]
    fn blank_tags_become_none() {
        let draft = LinkForm::new("A", "https://a").into_draft();
        assert_eq!(draft.tags, None);
    }
}
