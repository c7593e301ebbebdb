//! Core domain models and logic for encarte
//!
//! This crate contains:
//! - Tabular data model (Dataset, Record, CellValue)
//! - Duplicate-name correction over a dataset
//! - Shared error type

pub mod cell;
pub mod dataset;
pub mod dedupe;
pub mod error;

pub use cell::CellValue;
pub use dataset::{Dataset, Record};
pub use dedupe::{
    CorrectionReport, DEFAULT_MARKER, DisambiguationStrategy, DuplicateNameCorrector, LabelRule,
    Rename, RuleOutcome,
};
pub use error::{CoreError, Result};
