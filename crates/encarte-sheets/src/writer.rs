use encarte_core::{CellValue, Dataset};
use std::path::{Path, PathBuf};
use time::macros::{datetime, format_description};
use time::{OffsetDateTime, PrimitiveDateTime};
use tracing::{debug, info};
use umya_spreadsheet::{Cell, new_file, writer};

use crate::error::{Result, SheetError};

const DATETIME_FORMAT_CODE: &str = "yyyy-mm-dd hh:mm:ss";

/// Overwrite `path` with a fresh single-sheet xlsx workbook: header row, then
/// one row per record. No index column is written.
pub fn save_dataset(dataset: &Dataset, path: impl AsRef<Path>) -> Result<()> {
    let path = path.as_ref();

    match path.extension().and_then(|s| s.to_str()) {
        Some(ext) if ext.eq_ignore_ascii_case("xlsx") => {}
        other => {
            return Err(SheetError::UnsupportedFormat(
                other.unwrap_or("<none>").to_string(),
            ));
        }
    }

    let mut book = new_file();
    let sheet = book.get_active_sheet_mut();
    sheet.set_name(dataset.sheet_name.clone());

    // Excel uses 1-based indexing
    for (col_idx, header) in dataset.headers.iter().enumerate() {
        if !header.is_empty() {
            sheet
                .get_cell_mut((col_idx as u32 + 1, 1))
                .set_value_string(header.clone());
        }
    }

    for (row_idx, record) in dataset.records.iter().enumerate() {
        let row_num = row_idx as u32 + 2;
        for (col_idx, value) in record.cells.iter().enumerate() {
            if value.is_empty() {
                continue;
            }
            write_cell(sheet.get_cell_mut((col_idx as u32 + 1, row_num)), value);
        }
    }

    writer::xlsx::write(&book, path)
        .map_err(|e| SheetError::Write(format!("Failed to save workbook {}: {}", path.display(), e)))?;

    debug!(
        "Wrote {} records to {}#{}",
        dataset.len(),
        path.display(),
        dataset.sheet_name
    );

    Ok(())
}

fn write_cell(cell: &mut Cell, value: &CellValue) {
    match value {
        CellValue::Empty => {}
        CellValue::String(s) => {
            cell.set_value_string(s.clone());
        }
        CellValue::Number(n) => {
            cell.set_value_number(*n);
        }
        CellValue::Boolean(b) => {
            cell.set_value_bool(*b);
        }
        CellValue::DateTime(dt) => match excel_serial(dt) {
            Some(serial) => {
                cell.set_value_number(serial);
                cell.get_style_mut()
                    .get_number_format_mut()
                    .set_format_code(DATETIME_FORMAT_CODE);
            }
            None => {
                cell.set_value_string(dt.clone());
            }
        },
        CellValue::Error(e) => {
            cell.set_value_string(e.clone());
        }
    }
}

/// Excel serial (days since 1899-12-30) of an ISO 8601 date-time, if it parses
fn excel_serial(iso: &str) -> Option<f64> {
    let parsed = PrimitiveDateTime::parse(
        iso,
        format_description!("[year]-[month]-[day]T[hour]:[minute]:[second]"),
    )
    .ok()?;
    let elapsed = parsed - datetime!(1899-12-30 0:00);

    Some(elapsed.whole_seconds() as f64 / 86_400.0)
}

/// Copy the file to `<path>.backup.<YYYYMMDD_HHMMSS>` before it is overwritten
pub fn create_backup(path: impl AsRef<Path>) -> Result<PathBuf> {
    let path = path.as_ref();

    if !path.exists() {
        return Err(SheetError::FileNotFound(path.to_path_buf()));
    }

    let stamp = OffsetDateTime::now_utc()
        .format(format_description!(
            "[year][month][day]_[hour][minute][second]"
        ))
        .map_err(|e| SheetError::Write(format!("Failed to format backup timestamp: {}", e)))?;

    let mut backup = path.as_os_str().to_owned();
    backup.push(format!(".backup.{}", stamp));
    let backup = PathBuf::from(backup);

    std::fs::copy(path, &backup)?;
    info!("Backed up {} to {}", path.display(), backup.display());

    Ok(backup)
}
