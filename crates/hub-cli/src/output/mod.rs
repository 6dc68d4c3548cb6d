use serde::Serialize;
use serde_json::Value;

use crate::cli::OutputFormat;
use crate::ui;

pub mod table;

/// Column order for link rows in table output.
pub const LINK_COLUMNS: &[&str] = &[
    "id", "title", "category", "location", "tags", "favorite", "clicks", "url",
];

/// Render a serializable response to a string in the requested format.
pub fn render<T: Serialize>(value: &T, format: OutputFormat) -> anyhow::Result<String> {
    render_with_columns(value, &[], format)
}

/// Like [`render`], but array tables use `columns` in that order.
///
/// With no columns, headers are every key seen, sorted.
pub fn render_with_columns<T: Serialize>(
    value: &T,
    columns: &[&str],
    format: OutputFormat,
) -> anyhow::Result<String> {
    match format {
        OutputFormat::Json => Ok(serde_json::to_string_pretty(value)?),
        OutputFormat::Table => Ok(render_table(serde_json::to_value(value)?, columns)),
        OutputFormat::Raw => Ok(serde_json::to_string(value)?),
    }
}

/// Print a serializable response in the requested format.
pub fn output<T: Serialize>(value: &T, format: OutputFormat) -> anyhow::Result<()> {
    println!("{}", render(value, format)?);
    Ok(())
}

/// Print rows; table output uses `columns` in that order.
pub fn output_rows<T: Serialize>(
    value: &T,
    columns: &[&str],
    format: OutputFormat,
) -> anyhow::Result<()> {
    println!("{}", render_with_columns(value, columns, format)?);
    Ok(())
}

fn table_options() -> table::TableOptions {
    let prefs = ui::prefs();
    table::TableOptions {
        max_width: prefs.term_width,
        color: prefs.table_color,
    }
}

fn render_table(value: Value, columns: &[&str]) -> String {
    match value {
        Value::Array(items) => render_array_table(&items, columns),
        Value::Object(map) => {
            let rows = map
                .into_iter()
                .map(|(key, value)| vec![key, value_to_cell(&value)])
                .collect::<Vec<_>>();
            table::render_table(&["key", "value"], &rows, table_options())
        }
        scalar => table::render_table(&["value"], &[vec![value_to_cell(&scalar)]], table_options()),
    }
}

fn render_array_table(items: &[Value], columns: &[&str]) -> String {
    if items.is_empty() {
        return String::from("(no rows)");
    }

    if !items.iter().all(Value::is_object) {
        let rows = items
            .iter()
            .map(|item| vec![value_to_cell(item)])
            .collect::<Vec<_>>();
        return table::render_table(&["value"], &rows, table_options());
    }

    let headers: Vec<String> = if columns.is_empty() {
        let mut seen = Vec::<String>::new();
        for key in items.iter().filter_map(Value::as_object).flat_map(|map| map.keys()) {
            if !seen.contains(key) {
                seen.push(key.clone());
            }
        }
        seen.sort();
        seen
    } else {
        columns.iter().map(ToString::to_string).collect()
    };

    let header_refs = headers.iter().map(String::as_str).collect::<Vec<_>>();
    let rows = items
        .iter()
        .filter_map(Value::as_object)
        .map(|map| {
            headers
                .iter()
                .map(|header| map.get(header).map_or_else(|| String::from("-"), value_to_cell))
                .collect::<Vec<_>>()
        })
        .collect::<Vec<_>>();

    table::render_table(&header_refs, &rows, table_options())
}

fn value_to_cell(value: &Value) -> String {
    match value {
        Value::Null => String::from("-"),
        Value::Bool(v) => v.to_string(),
        Value::Number(v) => v.to_string(),
        Value::String(v) => v.clone(),
        Value::Array(items) => items
            .iter()
            .map(value_to_cell)
            .collect::<Vec<_>>()
            .join(", "),
        other => serde_json::to_string(other).unwrap_or_else(|_| String::from("<invalid-json>")),
    }
}

#[cfg(test)]
mod tests {
    use serde::Serialize;

    use super::{LINK_COLUMNS, render, render_with_columns};
    use crate::cli::OutputFormat;

    #[derive(Serialize)]
    struct Example {
        id: &'static str,
        tags: Vec<&'static str>,
        note: Option<&'static str>,
    }

    fn example() -> Example {
        Example {
            id: "lnk-1",
            tags: vec!["harian", "stok"],
            note: None,
        }
    }

    #[test]
    fn json_render_is_pretty() {
        let out = render(&example(), OutputFormat::Json).expect("json render should work");
        let parsed: serde_json::Value = serde_json::from_str(&out).expect("json should parse");
        assert_eq!(parsed["id"], "lnk-1");
        assert!(out.contains('\n'));
    }

    #[test]
    fn raw_render_is_single_line_json() {
        let out = render(&example(), OutputFormat::Raw).expect("raw render should work");
        assert!(!out.contains('\n'));
    }

    #[test]
    fn object_table_is_key_value() {
        let out = render(&example(), OutputFormat::Table).expect("table render should work");
        assert!(out.lines().next().is_some_and(|line| line.starts_with("key")));
        assert!(out.contains("harian, stok"));
    }

    #[test]
    fn array_table_follows_column_order() {
        let out = render_with_columns(&vec![example()], &["tags", "id"], OutputFormat::Table)
            .expect("table render should work");
        let header = out.lines().next().unwrap();
        assert!(header.find("tags").unwrap() < header.find("id").unwrap());
        assert!(!header.contains("note"));
    }

    #[test]
    fn empty_arrays_say_so() {
        let rows: Vec<Example> = Vec::new();
        let out = render_with_columns(&rows, LINK_COLUMNS, OutputFormat::Table)
            .expect("table render should work");
        assert_eq!(out, "(no rows)");
    }
}
