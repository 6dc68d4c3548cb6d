//! Distinct facet values for the filter selectors.

use hub_core::entities::LinkRecord;
use serde::Serialize;

/// Distinct non-empty values across a record set, in first-seen order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Facets {
    pub categories: Vec<String>,
    pub locations: Vec<String>,
    pub tags: Vec<String>,
}

impl Facets {
    /// Collect facets from the full (unfiltered) record set.
    #[must_use]
    pub fn derive(records: &[LinkRecord]) -> Self {
        let mut facets = Self::default();
        for record in records {
            push_distinct(&mut facets.categories, record.category.as_deref());
            push_distinct(&mut facets.locations, record.location.as_deref());
            for tag in record.tag_list() {
                push_distinct(&mut facets.tags, Some(tag));
            }
        }
        facets
    }
}

fn push_distinct(values: &mut Vec<String>, value: Option<&str>) {
    if let Some(value) = value.filter(|v| !v.is_empty()) {
        if !values.iter().any(|v| v == value) {
            values.push(value.to_string());
        }
    }
}
