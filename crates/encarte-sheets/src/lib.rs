//! Spreadsheet I/O for encarte
//!
//! This crate provides:
//! - Loading a sheet into a `Dataset` (any format calamine reads)
//! - Overwriting an xlsx file from a `Dataset`
//! - Column/row previews for inspection
//! - Timestamped backup copies

pub mod error;
pub mod reader;
pub mod writer;

pub use error::{Result, SheetError};
pub use reader::{load_dataset, preview, SheetPreview};
pub use writer::{create_backup, save_dataset};
