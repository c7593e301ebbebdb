//! Error types for encarte-sheets

use std::path::PathBuf;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, SheetError>;

#[derive(Error, Debug)]
pub enum SheetError {
    #[error("File not found: {}", .0.display())]
    FileNotFound(PathBuf),

    #[error("Sheet not found: {0}")]
    SheetNotFound(String),

    #[error("Sheet '{0}' has no header row")]
    EmptySheet(String),

    #[error("Unsupported output format: {0} (only .xlsx can be written)")]
    UnsupportedFormat(String),

    #[error("Read error: {0}")]
    Read(String),

    #[error("Write error: {0}")]
    Write(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
