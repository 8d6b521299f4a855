//! Cell values and the row abstraction the table reads from.

use serde_json::{Map, Value};
use std::{cmp::Ordering, fmt};

/// A single cell as seen by the sort comparator and the default renderer.
#[derive(Clone, Debug, PartialEq)]
pub enum CellValue {
    Number(f64),
    Text(String),
    Missing,
}

impl CellValue {
    #[must_use]
    pub fn is_missing(&self) -> bool {
        matches!(self, Self::Missing)
    }
}

impl fmt::Display for CellValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Number(value) => write!(f, "{value}"),
            Self::Text(value) => f.write_str(value),
            Self::Missing => f.write_str("-"),
        }
    }
}

impl From<&Value> for CellValue {
    fn from(value: &Value) -> Self {
        match value {
            Value::Null => Self::Missing,
            Value::Number(number) => number.as_f64().map_or(Self::Missing, Self::Number),
            Value::String(text) => Self::Text(text.clone()),
            other => Self::Text(other.to_string()),
        }
    }
}

impl From<Option<f64>> for CellValue {
    fn from(value: Option<f64>) -> Self {
        value.map_or(Self::Missing, Self::Number)
    }
}

impl From<&str> for CellValue {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

/// A record the table can display: maps a column key to a cell.
pub trait TableRow {
    fn cell(&self, key: &str) -> CellValue;
}

impl TableRow for Map<String, Value> {
    fn cell(&self, key: &str) -> CellValue {
        self.get(key).map_or(CellValue::Missing, CellValue::from)
    }
}

impl TableRow for Value {
    fn cell(&self, key: &str) -> CellValue {
        self.get(key).map_or(CellValue::Missing, CellValue::from)
    }
}

/// Ascending comparison of two present cells.
///
/// Numbers sort before text. Two numbers compare numerically, two texts
/// compare case-insensitively first and fall back to the raw strings, so the
/// order is total. Missing cells are handled by the caller.
#[must_use]
pub fn compare_present(a: &CellValue, b: &CellValue) -> Ordering {
    match (a, b) {
        (CellValue::Number(x), CellValue::Number(y)) => x.total_cmp(y),
        (CellValue::Number(_), _) => Ordering::Less,
        (_, CellValue::Number(_)) => Ordering::Greater,
        _ => {
            let left = a.to_string();
            let right = b.to_string();
            left.to_lowercase()
                .cmp(&right.to_lowercase())
                .then_with(|| left.cmp(&right))
        }
    }
}
