pub mod config;
pub mod dedupe;
pub mod inspect;
pub mod redact;
pub mod scrub;

use encarte_core::CellValue;

/// Render rows as a left-aligned text table with a leading row-index column
pub fn render_table(headers: &[String], rows: &[(usize, &[CellValue])]) -> String {
    let index_width = rows
        .iter()
        .map(|(idx, _)| idx.to_string().len())
        .max()
        .unwrap_or(0);

    let mut widths: Vec<usize> = headers.iter().map(|h| h.chars().count()).collect();
    let rendered: Vec<(String, Vec<String>)> = rows
        .iter()
        .map(|(idx, cells)| {
            let cells: Vec<String> = cells.iter().map(ToString::to_string).collect();
            for (col, text) in cells.iter().enumerate() {
                let len = text.chars().count();
                match widths.get_mut(col) {
                    Some(width) => *width = (*width).max(len),
                    None => widths.push(len),
                }
            }
            (idx.to_string(), cells)
        })
        .collect();

    let mut out = String::new();
    out.push_str(&format_line(&" ".repeat(index_width), headers, &widths));
    for (idx, cells) in &rendered {
        out.push_str(&format_line(&format!("{:>index_width$}", idx), cells, &widths));
    }
    out
}

fn format_line(index: &str, cells: &[String], widths: &[usize]) -> String {
    let mut line = index.to_string();
    for (col, width) in widths.iter().enumerate() {
        let text = cells.get(col).map(String::as_str).unwrap_or("");
        let pad = width.saturating_sub(text.chars().count());
        line.push_str("  ");
        line.push_str(text);
        line.push_str(&" ".repeat(pad));
    }
    line.truncate(line.trim_end().len());
    line.push('\n');
    line
}
