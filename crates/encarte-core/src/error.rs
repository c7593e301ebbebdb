use thiserror::Error;

#[derive(Error, Debug)]
pub enum CoreError {
    #[error("Column not found: {0}")]
    ColumnNotFound(String),

    #[error("Row out of range: {row} (dataset has {len} rows)")]
    RowOutOfRange { row: usize, len: usize },

    #[error("Invalid pattern: {0}")]
    InvalidPattern(#[from] regex::Error),
}

pub type Result<T> = std::result::Result<T, CoreError>;
