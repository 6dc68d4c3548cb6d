//! JSON export/import of record sequences.

use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::error::CodecError;

/// Pretty-print a record sequence as a JSON array (2-space indent).
///
/// # Errors
///
/// Returns `CodecError::Json` if a record cannot be serialized.
pub fn encode_json<T: Serialize>(records: &[T]) -> Result<String, CodecError> {
    Ok(serde_json::to_string_pretty(records)?)
}

/// Parse a JSON array back into records.
///
/// # Errors
///
/// Returns `CodecError::Json` if the text is not an array of `T`.
pub fn decode_json<T: DeserializeOwned>(text: &str) -> Result<Vec<T>, CodecError> {
    Ok(serde_json::from_str(text)?)
}

#[cfg(test)]
mod tests {
    use chrono::Utc;
    use hub_core::entities::LinkRecord;
    use pretty_assertions::assert_eq;

    use super::*;

    fn record(id: &str) -> LinkRecord {
        LinkRecord {
            id: id.into(),
            title: format!("Sheet {id}"),
            url: format!("https://example.com/{id}"),
            description: None,
            category: Some("Stok".into()),
            location: None,
            tags: Some(vec!["a".into()]),
            favorite: false,
            clicks: 2,
            created_by: None,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn encodes_pretty_array_with_all_fields() {
        let text = encode_json(&[record("lnk-1")]).unwrap();
        assert!(text.starts_with("[\n  {"));
        assert!(text.contains("\"id\": \"lnk-1\""));
        assert!(text.contains("\"created_at\""));
        assert!(text.contains("\"updated_at\""));
    }

    #[test]
    fn decodes_what_it_encodes() {
        let records = vec![record("lnk-1"), record("lnk-2")];
        let text = encode_json(&records).unwrap();
        let decoded: Vec<LinkRecord> = decode_json(&text).unwrap();
        assert_eq!(decoded, records);
    }

    #[test]
    fn empty_sequence_is_empty_array() {
        let empty: Vec<LinkRecord> = Vec::new();
        assert_eq!(encode_json(&empty).unwrap(), "[]");
    }

    #[test]
    fn rejects_non_array() {
        assert!(decode_json::<LinkRecord>("{\"id\": 1}").is_err());
    }
}
