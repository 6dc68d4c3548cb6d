#[derive(Clone, Copy, Debug)]
pub struct TableOptions {
    pub max_width: Option<usize>,
    pub color: bool,
}

/// Render an aligned table; columns shrink (widest first) to fit `max_width`.
#[must_use]
pub fn render_table(headers: &[&str], rows: &[Vec<String>], options: TableOptions) -> String {
    let mut widths: Vec<usize> = headers
        .iter()
        .enumerate()
        .map(|(index, header)| {
            rows.iter()
                .filter_map(|row| row.get(index))
                .map(|cell| cell.chars().count())
                .max()
                .unwrap_or(0)
                .max(header.chars().count())
        })
        .collect();

    shrink_to_fit(&mut widths, headers, options.max_width);

    let header_line = headers
        .iter()
        .zip(&widths)
        .map(|(header, width)| pad(&truncate(header, *width), *width, 0))
        .collect::<Vec<_>>()
        .join("  ");
    let divider = "-".repeat(header_line.trim_end().chars().count());

    let mut lines = Vec::with_capacity(rows.len() + 2);
    lines.push(header_line.trim_end().to_string());
    lines.push(divider);
    for row in rows {
        let line = widths
            .iter()
            .enumerate()
            .map(|(index, width)| {
                let cell = truncate(row.get(index).map_or("-", String::as_str), *width);
                let visible = cell.chars().count();
                let cell = if options.color { highlight(&cell) } else { cell };
                pad(&cell, *width, visible)
            })
            .collect::<Vec<_>>()
            .join("  ");
        lines.push(line.trim_end().to_string());
    }
    lines.join("\n")
}

fn shrink_to_fit(widths: &mut [usize], headers: &[&str], max_width: Option<usize>) {
    let Some(max_width) = max_width else {
        return;
    };
    let separators = widths.len().saturating_sub(1) * 2;

    while widths.iter().sum::<usize>() + separators > max_width {
        let widest = widths
            .iter()
            .enumerate()
            .filter(|(index, width)| **width > headers[*index].len().max(6))
            .max_by_key(|(_, width)| **width)
            .map(|(index, _)| index);
        let Some(index) = widest else {
            break;
        };
        widths[index] -= 1;
    }
}

fn truncate(value: &str, width: usize) -> String {
    if value.chars().count() <= width {
        return value.to_string();
    }
    if width <= 1 {
        return "…".to_string();
    }
    let mut out: String = value.chars().take(width - 1).collect();
    out.push('…');
    out
}

/// Left-align `value` in `width` columns. `visible` is the printable length
/// when `value` carries escape codes; zero means "count it".
fn pad(value: &str, width: usize, visible: usize) -> String {
    let len = if visible == 0 {
        value.chars().count()
    } else {
        visible
    };
    format!("{value}{}", " ".repeat(width.saturating_sub(len)))
}

fn highlight(value: &str) -> String {
    let code = match value {
        "true" | "admin" | "authenticated" => Some("32"),
        "staff" => Some("36"),
        "anonymous" | "skipped" => Some("33"),
        _ => None,
    };
    match code {
        Some(code) => format!("\u{1b}[{code}m{value}\u{1b}[0m"),
        None => value.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::{TableOptions, render_table};

    const PLAIN: TableOptions = TableOptions {
        max_width: None,
        color: false,
    };

    #[test]
    fn columns_align_to_the_widest_cell() {
        let rows = vec![
            vec!["lnk-1".to_string(), "Stok".to_string()],
            vec!["lnk-200".to_string(), "Outbound harian".to_string()],
        ];
        let table = render_table(&["id", "title"], &rows, PLAIN);
        let lines: Vec<&str> = table.lines().collect();

        assert_eq!(lines.len(), 4);
        assert_eq!(lines[0], "id       title");
        assert!(lines[1].chars().all(|c| c == '-'));
        assert_eq!(lines[2], "lnk-1    Stok");
        assert_eq!(lines[3], "lnk-200  Outbound harian");
    }

    #[test]
    fn narrow_terminals_truncate_the_widest_column() {
        let rows = vec![vec![
            "lnk-1".to_string(),
            "https://docs.example.com/spreadsheets/d/very-long-id".to_string(),
        ]];
        let table = render_table(
            &["id", "url"],
            &rows,
            TableOptions {
                max_width: Some(30),
                color: false,
            },
        );
        let row = table.lines().nth(2).unwrap();
        assert!(row.chars().count() <= 30);
        assert!(row.ends_with('…'));
    }

    #[test]
    fn missing_cells_render_as_dash() {
        let rows = vec![vec!["lnk-1".to_string()]];
        let table = render_table(&["id", "title"], &rows, PLAIN);
        assert!(table.lines().nth(2).unwrap().ends_with('-'));
    }
}
