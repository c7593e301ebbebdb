//! Dataset domain model

use serde::{Deserialize, Serialize};

use crate::cell::CellValue;
use crate::error::{CoreError, Result};

/// One data row. Identity is its position in the dataset.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct Record {
    pub cells: Vec<CellValue>,
}

impl Record {
    pub fn new(cells: Vec<CellValue>) -> Self {
        Self { cells }
    }

    /// Text in the given column, if the cell holds a string
    pub fn text(&self, column: usize) -> Option<&str> {
        self.cells.get(column).and_then(CellValue::as_str)
    }

    /// Overwrite a cell, growing the row if it is shorter than `column`
    pub fn set(&mut self, column: usize, value: CellValue) {
        if self.cells.len() <= column {
            self.cells.resize(column + 1, CellValue::Empty);
        }
        self.cells[column] = value;
    }
}

/// A single sheet loaded fully into memory: header row plus ordered records
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Dataset {
    pub sheet_name: String,
    pub headers: Vec<String>,
    pub records: Vec<Record>,
}

impl Dataset {
    /// Build a dataset, padding every record to the header width
    pub fn new(sheet_name: impl Into<String>, headers: Vec<String>, records: Vec<Record>) -> Self {
        let width = headers.len();
        let records = records
            .into_iter()
            .map(|mut record| {
                if record.cells.len() < width {
                    record.cells.resize(width, CellValue::Empty);
                }
                record
            })
            .collect();

        Self {
            sheet_name: sheet_name.into(),
            headers,
            records,
        }
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Index of the column whose header equals `name` exactly
    pub fn column_index(&self, name: &str) -> Result<usize> {
        self.headers
            .iter()
            .position(|h| h == name)
            .ok_or_else(|| CoreError::ColumnNotFound(name.to_string()))
    }

    /// Indices of records whose text in `column` equals `value` exactly
    pub fn find_exact(&self, column: usize, value: &str) -> Vec<usize> {
        self.records
            .iter()
            .enumerate()
            .filter(|(_, record)| record.text(column) == Some(value))
            .map(|(idx, _)| idx)
            .collect()
    }

    pub fn set_text(&mut self, row: usize, column: usize, value: &str) -> Result<()> {
        let len = self.records.len();
        let record = self
            .records
            .get_mut(row)
            .ok_or(CoreError::RowOutOfRange { row, len })?;
        record.set(column, CellValue::from(value));
        Ok(())
    }
}
