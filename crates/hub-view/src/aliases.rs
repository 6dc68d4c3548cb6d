//! Header aliases accepted by CSV import.
//!
//! Resolved once per row: the first non-empty value among a field's accepted
//! spellings wins.

use hub_codec::CsvRow;
use hub_core::entities::LinkDraft;
use hub_core::enums::TagDelimiter;
use hub_core::record::normalize_tags;

pub const TITLE: &[&str] = &["title", "judul", "name"];
pub const URL: &[&str] = &["url", "link"];
pub const DESCRIPTION: &[&str] = &["description", "deskripsi"];
pub const CATEGORY: &[&str] = &["category", "kategori"];
pub const LOCATION: &[&str] = &["location", "lokasi"];
pub const TAGS: &[&str] = &["tags"];

fn first_non_empty<'a>(row: &'a CsvRow, names: &[&str]) -> Option<&'a str> {
    names
        .iter()
        .filter_map(|name| row.get(name))
        .find(|value| !value.is_empty())
}

/// Map one decoded row onto a draft. Tags are pipe-delimited.
///
/// The draft is not validated; rows without title or url are left for the
/// caller to drop.
#[must_use]
pub fn resolve_row(row: &CsvRow) -> LinkDraft {
    let text = |names: &[&str]| first_non_empty(row, names).map(str::to_string);
    LinkDraft {
        title: text(TITLE).unwrap_or_default(),
        url: text(URL).unwrap_or_default(),
        description: text(DESCRIPTION),
        category: text(CATEGORY),
        location: text(LOCATION),
        tags: first_non_empty(row, TAGS).map(|raw| normalize_tags(raw, TagDelimiter::Pipe)),
    }
    .normalized()
}
