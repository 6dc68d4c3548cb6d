use chrono::{DateTime, Utc};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// One catalogued spreadsheet link as stored in `links`.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct LinkRecord {
    pub id: String,
    pub title: String,
    pub url: String,
    pub description: Option<String>,
    pub category: Option<String>,
    pub location: Option<String>,
    #[serde(default)]
    pub tags: Option<Vec<String>>,
    #[serde(default)]
    pub favorite: bool,
    #[serde(default)]
    pub clicks: u64,
    pub created_by: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl LinkRecord {
    /// Tags as a slice; an absent tag list reads as empty.
    #[must_use]
    pub fn tag_list(&self) -> &[String] {
        self.tags.as_deref().unwrap_or_default()
    }
}

/// User-editable fields of a link, as submitted by a form or an import row.
#[derive(Debug, Clone, Default, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct LinkDraft {
    pub title: String,
    pub url: String,
    pub description: Option<String>,
    pub category: Option<String>,
    pub location: Option<String>,
    pub tags: Option<Vec<String>>,
}

impl LinkDraft {
    /// Trim title and url, and collapse blank optional text to `None`.
    ///
    /// An empty tag list also collapses to `None`, matching what the store
    /// receives when no tags were entered.
    #[must_use]
    pub fn normalized(self) -> Self {
        Self {
            title: self.title.trim().to_string(),
            url: self.url.trim().to_string(),
            description: non_blank(self.description),
            category: non_blank(self.category),
            location: non_blank(self.location),
            tags: self.tags.filter(|tags| !tags.is_empty()),
        }
    }
}

fn non_blank(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

/// Insert payload: a draft plus the fields the client sets on creation.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct NewLink {
    #[serde(flatten)]
    pub draft: LinkDraft,
    pub favorite: bool,
    pub clicks: u64,
    pub created_by: Option<String>,
}

impl NewLink {
    /// A fresh, unfavorited, never-clicked link owned by `created_by`.
    #[must_use]
    pub fn new(draft: LinkDraft, created_by: Option<String>) -> Self {
        Self {
            draft,
            favorite: false,
            clicks: 0,
            created_by,
        }
    }
}

/// Partial update of a link. Only `Some` fields are sent to the store.
///
/// Nullable columns use `Option<Option<_>>` so that `Some(None)` clears the
/// column while `None` leaves it untouched.
#[derive(Debug, Clone, Default, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct LinkPatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<Option<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<Option<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location: Option<Option<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tags: Option<Option<Vec<String>>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub favorite: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub clicks: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
}

impl LinkPatch {
    /// Replace every editable field with the draft's values.
    #[must_use]
    pub fn from_draft(draft: LinkDraft, updated_at: DateTime<Utc>) -> Self {
        Self {
            title: Some(draft.title),
            url: Some(draft.url),
            description: Some(draft.description),
            category: Some(draft.category),
            location: Some(draft.location),
            tags: Some(draft.tags),
            updated_at: Some(updated_at),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn favorite(value: bool) -> Self {
        Self {
            favorite: Some(value),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn clicks(value: u64) -> Self {
        Self {
            clicks: Some(value),
            ..Self::default()
        }
    }

    /// Apply the present fields to `record`. Used by in-process stores.
    pub fn apply_to(&self, record: &mut LinkRecord) {
        if let Some(title) = &self.title {
            record.title.clone_from(title);
        }
        if let Some(url) = &self.url {
            record.url.clone_from(url);
        }
        if let Some(description) = &self.description {
            record.description.clone_from(description);
        }
        if let Some(category) = &self.category {
            record.category.clone_from(category);
        }
        if let Some(location) = &self.location {
            record.location.clone_from(location);
        }
        if let Some(tags) = &self.tags {
            record.tags.clone_from(tags);
        }
        if let Some(favorite) = self.favorite {
            record.favorite = favorite;
        }
        if let Some(clicks) = self.clicks {
            record.clicks = clicks;
        }
        if let Some(updated_at) = self.updated_at {
            record.updated_at = updated_at;
        }
    }
}
