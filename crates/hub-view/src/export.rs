//! Export of the full link list as CSV or JSON files.

use std::fs;
use std::path::{Path, PathBuf};

use hub_codec::{CsvRow, encode_csv, encode_json};
use hub_config::GeneralConfig;
use hub_core::entities::LinkRecord;

use crate::error::HubError;

/// Exported CSV columns, in order. Server-managed fields are left out so the
/// file re-imports cleanly.
pub const CSV_COLUMNS: [&str; 8] = [
    "title",
    "url",
    "description",
    "category",
    "location",
    "tags",
    "favorite",
    "clicks",
];

/// Where exports land.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportTarget {
    pub dir: PathBuf,
    pub csv_file_name: String,
    pub json_file_name: String,
}

impl Default for ExportTarget {
    fn default() -> Self {
        Self::from(&GeneralConfig::default())
    }
}

impl From<&GeneralConfig> for ExportTarget {
    fn from(config: &GeneralConfig) -> Self {
        Self {
            dir: config.export_dir.clone(),
            csv_file_name: config.csv_file_name.clone(),
            json_file_name: config.json_file_name.clone(),
        }
    }
}

impl ExportTarget {
    #[must_use]
    pub fn in_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.dir = dir.into();
        self
    }

    #[must_use]
    pub fn csv_path(&self) -> PathBuf {
        self.dir.join(&self.csv_file_name)
    }

    #[must_use]
    pub fn json_path(&self) -> PathBuf {
        self.dir.join(&self.json_file_name)
    }
}

fn to_row(record: &LinkRecord) -> CsvRow {
    CSV_COLUMNS
        .iter()
        .zip([
            record.title.clone(),
            record.url.clone(),
            record.description.clone().unwrap_or_default(),
            record.category.clone().unwrap_or_default(),
            record.location.clone().unwrap_or_default(),
            record.tag_list().join("|"),
            record.favorite.to_string(),
            record.clicks.to_string(),
        ])
        .map(|(column, value)| (*column, value))
        .collect()
}

/// CSV text for `records`. Empty input yields empty text.
#[must_use]
pub fn csv_text(records: &[LinkRecord]) -> String {
    let rows: Vec<CsvRow> = records.iter().map(to_row).collect();
    encode_csv(&rows)
}

/// Pretty-printed JSON array of full records.
///
/// # Errors
///
/// Returns `HubError::Codec` if serialization fails.
pub fn json_text(records: &[LinkRecord]) -> Result<String, HubError> {
    Ok(encode_json(records)?)
}

/// Write `contents` to `path`, creating the parent directory.
///
/// # Errors
///
/// Returns `HubError::Write` on any filesystem failure.
pub fn write_file(path: &Path, contents: &str) -> Result<(), HubError> {
    let write_err = |source| HubError::Write {
        path: path.to_path_buf(),
        source,
    };
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(write_err)?;
    }
    fs::write(path, contents).map_err(write_err)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    #[test]
    fn row_has_exactly_the_export_columns() {
        let now = Utc::now();
        let record = LinkRecord {
            id: "lnk-1".into(),
            title: "A".into(),
            url: "https://a".into(),
            description: None,
            category: Some("Stok".into()),
            location: None,
            tags: Some(vec!["x".into(), "y".into()]),
            favorite: true,
            clicks: 7,
            created_by: Some("user-1".into()),
            created_at: now,
            updated_at: now,
        };
        let row = to_row(&record);
        assert_eq!(row.keys().collect::<Vec<_>>(), CSV_COLUMNS.to_vec());
        assert_eq!(row.get("tags"), Some("x|y"));
        assert_eq!(row.get("favorite"), Some("true"));
        assert_eq!(row.get("clicks"), Some("7"));
        assert_eq!(row.get("description"), Some(""));
    }

    #[test]
    fn default_target_uses_config_file_names() {
        let target = ExportTarget::default().in_dir("out");
        assert_eq!(target.csv_path(), PathBuf::from("out/pergudangan-links.csv"));
        assert_eq!(target.json_path(), PathBuf::from("out/pergudangan-links.json"));
    }
}
