use calamine::{Data, Range, Reader, Sheets, open_workbook_auto};
use encarte_core::{CellValue, Dataset, Record};
use serde::Serialize;
use std::path::Path;
use time::Duration;
use time::macros::{datetime, format_description};
use tracing::debug;

use crate::error::{Result, SheetError};

/// Columns and leading rows of one sheet
#[derive(Debug, Clone, Serialize)]
pub struct SheetPreview {
    pub path: String,
    pub sheet: String,
    pub columns: Vec<String>,
    pub rows: Vec<Vec<CellValue>>,
    pub total_rows: usize,
}

/// Load a sheet into memory. Row 0 is the header, every later row a record.
/// Without `sheet`, the first sheet in the workbook is used.
pub fn load_dataset(path: impl AsRef<Path>, sheet: Option<&str>) -> Result<Dataset> {
    let path = path.as_ref();
    let (sheet_name, range) = open_range(path, sheet)?;

    let mut rows = range.rows();
    let headers: Vec<String> = rows
        .next()
        .map(|row| row.iter().map(header_text).collect())
        .ok_or_else(|| SheetError::EmptySheet(sheet_name.clone()))?;

    let records: Vec<Record> = rows
        .map(|row| Record::new(row.iter().map(convert_cell_value).collect()))
        .collect();

    debug!(
        "Loaded {} records x {} columns from {}#{}",
        records.len(),
        headers.len(),
        path.display(),
        sheet_name
    );

    Ok(Dataset::new(sheet_name, headers, records))
}

/// Header names plus the first `max_rows` records of a sheet
pub fn preview(path: impl AsRef<Path>, sheet: Option<&str>, max_rows: usize) -> Result<SheetPreview> {
    let path = path.as_ref();
    let dataset = load_dataset(path, sheet)?;
    let total_rows = dataset.len();

    Ok(SheetPreview {
        path: path.display().to_string(),
        sheet: dataset.sheet_name,
        columns: dataset.headers,
        rows: dataset
            .records
            .into_iter()
            .take(max_rows)
            .map(|record| record.cells)
            .collect(),
        total_rows,
    })
}

fn open_range(path: &Path, sheet: Option<&str>) -> Result<(String, Range<Data>)> {
    if !path.exists() {
        return Err(SheetError::FileNotFound(path.to_path_buf()));
    }

    let mut workbook: Sheets<_> = open_workbook_auto(path).map_err(|e| {
        SheetError::Read(format!("Failed to open workbook {}: {}", path.display(), e))
    })?;

    let sheet_names = workbook.sheet_names();
    let target = match sheet {
        Some(name) => {
            if !sheet_names.iter().any(|n| n == name) {
                return Err(SheetError::SheetNotFound(name.to_string()));
            }
            name.to_string()
        }
        None => sheet_names
            .first()
            .cloned()
            .ok_or_else(|| SheetError::Read(format!("Workbook {} has no sheets", path.display())))?,
    };

    let range = workbook
        .worksheet_range(&target)
        .map_err(|e| SheetError::Read(format!("Failed to read sheet '{}': {}", target, e)))?;

    Ok((target, range))
}

fn header_text(cell: &Data) -> String {
    match convert_cell_value(cell) {
        CellValue::Empty => String::new(),
        other => other.to_string(),
    }
}

/// Convert calamine Data to our CellValue
fn convert_cell_value(cell: &Data) -> CellValue {
    match cell {
        Data::Empty => CellValue::Empty,
        Data::String(s) => CellValue::String(s.clone()),
        Data::Float(f) => CellValue::Number(*f),
        Data::Int(i) => CellValue::Number(*i as f64),
        Data::Bool(b) => CellValue::Boolean(*b),
        Data::DateTime(dt) => CellValue::DateTime(format_excel_datetime(dt.as_f64())),
        Data::DateTimeIso(s) => CellValue::DateTime(s.clone()),
        Data::DurationIso(s) => CellValue::String(s.clone()),
        Data::Error(e) => CellValue::Error(e.to_string()),
    }
}

/// Format an Excel serial date (days since 1899-12-30) as ISO 8601
fn format_excel_datetime(value: f64) -> String {
    let epoch = datetime!(1899-12-30 0:00);
    let seconds = (value * 86_400.0).round() as i64;

    epoch
        .checked_add(Duration::seconds(seconds))
        .and_then(|dt| {
            dt.format(format_description!(
                "[year]-[month]-[day]T[hour]:[minute]:[second]"
            ))
            .ok()
        })
        .unwrap_or_else(|| value.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_excel_datetime() {
        assert_eq!(format_excel_datetime(1.0), "1899-12-31T00:00:00");
        assert_eq!(format_excel_datetime(45000.0), "2023-03-15T00:00:00");
        assert_eq!(format_excel_datetime(45000.5), "2023-03-15T12:00:00");
    }

    #[test]
    fn test_convert_cell_value() {
        assert_eq!(convert_cell_value(&Data::Int(3)), CellValue::Number(3.0));
        assert_eq!(
            convert_cell_value(&Data::String("Sardinha".into())),
            CellValue::String("Sardinha".into())
        );
        assert_eq!(convert_cell_value(&Data::Empty), CellValue::Empty);
        assert_eq!(
            convert_cell_value(&Data::Error(calamine::CellErrorType::Div0)),
            CellValue::Error("#DIV/0!".into())
        );
    }

    #[test]
    fn test_header_text() {
        assert_eq!(header_text(&Data::String("nome".into())), "nome");
        assert_eq!(header_text(&Data::Float(2024.0)), "2024");
        assert_eq!(header_text(&Data::Empty), "");
    }

    #[test]
    fn test_missing_file() {
        let err = load_dataset("/definitely/not/here.xlsx", None).unwrap_err();
        assert!(matches!(err, SheetError::FileNotFound(_)));
    }
}
