use anyhow::{Context, Result};
use encarte_config::Config;
use encarte_sheets::{SheetPreview, preview};
use std::path::PathBuf;

use super::render_table;

pub fn handle(
    config: &Config,
    files: Vec<PathBuf>,
    rows: Option<usize>,
    sheet: Option<String>,
    json: bool,
) -> Result<()> {
    let files = if files.is_empty() {
        config.inspect.files.clone()
    } else {
        files
    };
    let rows = rows.unwrap_or(config.inspect.rows);

    let mut previews = Vec::with_capacity(files.len());
    for file in &files {
        let head = preview(file, sheet.as_deref(), rows)
            .with_context(|| format!("Failed to read {}", file.display()))?;
        previews.push(head);
    }

    if json {
        println!("{}", serde_json::to_string_pretty(&previews)?);
        return Ok(());
    }

    for (i, head) in previews.iter().enumerate() {
        if i > 0 {
            println!();
        }
        print_preview(head);
    }

    Ok(())
}

fn print_preview(head: &SheetPreview) {
    println!("{} [{}] ({} rows)", head.path, head.sheet, head.total_rows);
    println!("Columns: {:?}", head.columns);

    if head.rows.is_empty() {
        println!("No rows.");
        return;
    }

    println!("\nFirst {} rows:", head.rows.len());
    let rows: Vec<_> = head
        .rows
        .iter()
        .enumerate()
        .map(|(idx, cells)| (idx, cells.as_slice()))
        .collect();
    print!("{}", render_table(&head.columns, &rows));
}
