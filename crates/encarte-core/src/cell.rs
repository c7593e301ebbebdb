//! Cell values

use serde::{Deserialize, Serialize};
use std::fmt;

/// A single spreadsheet cell with type information
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(tag = "type", content = "value", rename_all = "snake_case")]
pub enum CellValue {
    #[default]
    Empty,
    String(String),
    Number(f64),
    Boolean(bool),
    /// ISO 8601, e.g. `2024-03-01T00:00:00`
    DateTime(String),
    /// Excel error literal, e.g. `#DIV/0!`
    Error(String),
}

impl CellValue {
    /// Text content, only for string cells
    pub fn as_str(&self) -> Option<&str> {
        match self {
            CellValue::String(s) => Some(s),
            _ => None,
        }
    }

    pub fn is_empty(&self) -> bool {
        matches!(self, CellValue::Empty)
    }
}

impl From<&str> for CellValue {
    fn from(value: &str) -> Self {
        CellValue::String(value.to_string())
    }
}

impl From<String> for CellValue {
    fn from(value: String) -> Self {
        CellValue::String(value)
    }
}

impl From<f64> for CellValue {
    fn from(value: f64) -> Self {
        CellValue::Number(value)
    }
}

impl From<bool> for CellValue {
    fn from(value: bool) -> Self {
        CellValue::Boolean(value)
    }
}

impl fmt::Display for CellValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CellValue::Empty => Ok(()),
            CellValue::String(s) | CellValue::DateTime(s) | CellValue::Error(s) => {
                write!(f, "{}", s)
            }
            // Integral floats print like integers (42, not 42.0)
            CellValue::Number(n) if n.fract() == 0.0 && n.abs() < 1e15 => {
                write!(f, "{}", *n as i64)
            }
            CellValue::Number(n) => write!(f, "{}", n),
            CellValue::Boolean(b) => write!(f, "{}", if *b { "TRUE" } else { "FALSE" }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_numbers() {
        assert_eq!(CellValue::Number(42.0).to_string(), "42");
        assert_eq!(CellValue::Number(-3.0).to_string(), "-3");
        assert_eq!(CellValue::Number(12.5).to_string(), "12.5");
    }

    #[test]
    fn test_display_other_values() {
        assert_eq!(CellValue::Empty.to_string(), "");
        assert_eq!(CellValue::Boolean(true).to_string(), "TRUE");
        assert_eq!(CellValue::Error("#DIV/0!".into()).to_string(), "#DIV/0!");
        assert_eq!(CellValue::from("Sardinha").to_string(), "Sardinha");
    }

    #[test]
    fn test_as_str_only_for_strings() {
        assert_eq!(CellValue::from("abc").as_str(), Some("abc"));
        assert_eq!(CellValue::Number(1.0).as_str(), None);
        assert_eq!(CellValue::DateTime("2024-01-01T00:00:00".into()).as_str(), None);
    }

    #[test]
    fn test_serde_tagging() {
        let json = serde_json::to_string(&CellValue::Number(2.0)).unwrap();
        assert_eq!(json, r#"{"type":"number","value":2.0}"#);

        let parsed: CellValue = serde_json::from_str(r#"{"type":"empty"}"#).unwrap();
        assert_eq!(parsed, CellValue::Empty);
    }
}
