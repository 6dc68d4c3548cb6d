//! Quoted CSV encoding and a single-pass quote-aware decoder.
//!
//! Encoding quotes every value and doubles embedded quotes. Decoding honours
//! quoted fields containing commas. Values never contain line breaks on
//! either side: a record is always exactly one line.

/// One flat CSV row: header names mapped to text values, in column order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CsvRow {
    fields: Vec<(String, String)>,
}

impl CsvRow {
    #[must_use]
    pub const fn new() -> Self {
        Self { fields: Vec::new() }
    }

    /// Set `key` to `value`, replacing an existing value in place.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) {
        let key = key.into();
        let value = value.into();
        if let Some(slot) = self.fields.iter_mut().find(|(k, _)| *k == key) {
            slot.1 = value;
        } else {
            self.fields.push((key, value));
        }
    }

    /// Value of `key`, or `None` when the column was missing from the line.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&str> {
        self.fields
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.fields.iter().map(|(k, _)| k.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.fields.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for CsvRow {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut row = Self::new();
        for (key, value) in iter {
            row.insert(key, value);
        }
        row
    }
}

/// Encode rows as CSV text. The header is the key list of the first row.
///
/// Rows are expected to share the first row's field set; a key missing from
/// a later row is written as an empty quoted value.
#[must_use]
pub fn encode_csv(rows: &[CsvRow]) -> String {
    let Some(first) = rows.first() else {
        return String::new();
    };

    let headers: Vec<&str> = first.keys().collect();
    let mut lines = Vec::with_capacity(rows.len() + 1);
    lines.push(headers.join(","));
    for row in rows {
        let line = headers
            .iter()
            .map(|header| quote(row.get(header).unwrap_or_default()))
            .collect::<Vec<_>>()
            .join(",");
        lines.push(line);
    }
    lines.join("\n")
}

fn quote(value: &str) -> String {
    format!("\"{}\"", value.replace('"', "\"\""))
}

/// Decode CSV text into rows keyed by the header line.
///
/// A leading byte-order mark is ignored and blank lines are skipped.
/// Trailing columns absent from a data line are absent from its row.
#[must_use]
pub fn decode_csv(text: &str) -> Vec<CsvRow> {
    let text = text.strip_prefix('\u{feff}').unwrap_or(text);
    let mut lines = text
        .split('\n')
        .map(|line| line.strip_suffix('\r').unwrap_or(line))
        .filter(|line| !line.is_empty());

    let Some(header_line) = lines.next() else {
        return Vec::new();
    };
    let headers: Vec<&str> = header_line.split(',').map(strip_outer_quotes).collect();

    lines
        .map(|line| {
            let cols = split_line(line);
            headers
                .iter()
                .zip(cols)
                .map(|(header, value)| (*header, value))
                .collect()
        })
        .collect()
}

/// Remove at most one leading and one trailing double quote.
fn strip_outer_quotes(cell: &str) -> &str {
    let cell = cell.strip_prefix('"').unwrap_or(cell);
    cell.strip_suffix('"').unwrap_or(cell)
}

/// Split one data line into fields.
///
/// Outside quotes a comma ends a field. Inside quotes `""` is a literal
/// quote, and a lone quote toggles quote mode in either direction.
fn split_line(line: &str) -> Vec<String> {
    let mut cols = Vec::new();
    let mut current = String::new();
    let mut in_quotes = false;
    let mut chars = line.chars().peekable();

    while let Some(c) = chars.next() {
        match c {
            '"' if in_quotes && chars.peek() == Some(&'"') => {
                current.push('"');
                chars.next();
            }
            '"' => in_quotes = !in_quotes,
            ',' if !in_quotes => cols.push(std::mem::take(&mut current)),
            _ => current.push(c),
        }
    }
    cols.push(current);
    cols
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    fn row(pairs: &[(&str, &str)]) -> CsvRow {
        pairs.iter().copied().collect()
    }

    #[test]
    fn empty_input_encodes_to_empty_text() {
        assert_eq!(encode_csv(&[]), "");
    }

    #[test]
    fn encode_quotes_every_value() {
        let text = encode_csv(&[row(&[("title", "Stok \"A\""), ("url", "https://x/1")])]);
        assert_eq!(text, "title,url\n\"Stok \"\"A\"\"\",\"https://x/1\"");
    }

    #[test]
    fn encode_uses_first_row_keys_for_all_rows() {
        let text = encode_csv(&[
            row(&[("a", "1"), ("b", "2")]),
            row(&[("b", "4"), ("c", "5")]),
        ]);
        assert_eq!(text, "a,b\n\"1\",\"2\"\n\"\",\"4\"");
    }

    #[test]
    fn decode_handles_quoted_commas_and_escaped_quotes() {
        let rows = decode_csv("title,url\n\"Stok, Gudang \"\"A\"\"\",https://x/1\n");
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].get("title"), Some("Stok, Gudang \"A\""));
        assert_eq!(rows[0].get("url"), Some("https://x/1"));
    }

    #[test]
    fn decode_strips_quotes_from_header_and_skips_blank_lines() {
        let rows = decode_csv("\"judul\",\"link\"\r\n\r\nA,https://a\r\n\nB,https://b");
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].keys().collect::<Vec<_>>(), vec!["judul", "link"]);
        assert_eq!(rows[1].get("judul"), Some("B"));
    }

    #[test]
    fn missing_trailing_fields_are_absent() {
        let rows = decode_csv("title,url,tags\nOnly title");
        assert_eq!(rows[0].get("title"), Some("Only title"));
        assert_eq!(rows[0].get("url"), None);
        assert_eq!(rows[0].get("tags"), None);
        assert_eq!(rows[0].len(), 1);
    }

    #[test]
    fn leading_byte_order_mark_is_not_part_of_the_header() {
        let rows = decode_csv("\u{feff}title,url\r\n\"Stok A\",\"https://x/1\"\r\n");
        assert_eq!(rows, vec![row(&[("title", "Stok A"), ("url", "https://x/1")])]);
    }

    #[test]
    fn header_only_yields_no_rows() {
        assert!(decode_csv("title,url\n").is_empty());
        assert!(decode_csv("").is_empty());
    }

    #[rstest]
    #[case("plain")]
    #[case("with, comma")]
    #[case("with \"quotes\"")]
    #[case("\"starts and ends with quotes\"")]
    #[case("")]
    #[case("a|b|c")]
    fn values_survive_roundtrip(#[case] value: &str) {
        let rows = vec![
            row(&[("title", value), ("url", "https://x/1")]),
            row(&[("title", "second"), ("url", value)]),
        ];
        assert_eq!(decode_csv(&encode_csv(&rows)), rows);
    }
}
