//! FILENAME: core/subtable-engine/src/key.rs
//! Composite keys - hashable tuples of dimension values.
//!
//! Aggregation buckets and table row keys are ordered tuples such as
//! `(token, applicant_country, application_year)`. Two keys are the same
//! bucket when they hold the same values in the same order.

use std::fmt;

use chrono::NaiveDateTime;
use engine::{format_number, CellValue};
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

// ============================================================================
// KEY VALUE
// ============================================================================

/// A normalized, hashable representation of a cell value.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum KeyValue {
    Empty,
    Number(OrderedFloat),
    Text(String),
    Boolean(bool),
    Date(NaiveDateTime),
    /// Label of a synthetic margin row or column. Never produced from a
    /// source cell, so it cannot collide with data keys.
    Margin(String),
}

impl KeyValue {
    pub fn text(s: impl Into<String>) -> Self {
        KeyValue::Text(s.into())
    }

    pub fn margin(label: impl Into<String>) -> Self {
        KeyValue::Margin(label.into())
    }

    pub fn number(n: f64) -> Self {
        KeyValue::Number(OrderedFloat(n))
    }

    /// Converts back to a cell value for output tables.
    pub fn to_cell(&self) -> CellValue {
        match self {
            KeyValue::Empty => CellValue::Empty,
            KeyValue::Number(n) => CellValue::Number(n.0),
            KeyValue::Text(s) | KeyValue::Margin(s) => CellValue::Text(s.clone()),
            KeyValue::Boolean(b) => CellValue::Boolean(*b),
            KeyValue::Date(dt) => CellValue::Date(*dt),
        }
    }
}

impl From<&CellValue> for KeyValue {
    fn from(value: &CellValue) -> Self {
        match value {
            CellValue::Empty => KeyValue::Empty,
            CellValue::Number(n) => KeyValue::Number(OrderedFloat(*n)),
            CellValue::Text(s) if s.trim().is_empty() => KeyValue::Empty,
            CellValue::Text(s) => KeyValue::Text(s.clone()),
            CellValue::Boolean(b) => KeyValue::Boolean(*b),
            CellValue::Date(dt) => KeyValue::Date(*dt),
        }
    }
}

impl From<&str> for KeyValue {
    fn from(value: &str) -> Self {
        KeyValue::Text(value.to_string())
    }
}

impl From<i64> for KeyValue {
    fn from(value: i64) -> Self {
        KeyValue::Number(OrderedFloat(value as f64))
    }
}

impl fmt::Display for KeyValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            KeyValue::Empty => Ok(()),
            KeyValue::Number(n) => f.write_str(&format_number(n.0)),
            KeyValue::Text(s) | KeyValue::Margin(s) => f.write_str(s),
            KeyValue::Boolean(b) => f.write_str(if *b { "TRUE" } else { "FALSE" }),
            KeyValue::Date(dt) => write!(f, "{}", dt.format("%Y-%m-%d %H:%M:%S")),
        }
    }
}

/// Wrapper around f64 that implements Eq and Hash for use as HashMap keys.
/// NaN values are treated as equal to each other.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct OrderedFloat(pub f64);

impl PartialEq for OrderedFloat {
    fn eq(&self, other: &Self) -> bool {
        if self.0.is_nan() && other.0.is_nan() {
            true
        } else {
            self.0 == other.0
        }
    }
}

impl Eq for OrderedFloat {}

impl std::hash::Hash for OrderedFloat {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        if self.0.is_nan() {
            u64::MAX.hash(state);
        } else if self.0 == 0.0 {
            // -0.0 == 0.0, so both must hash alike
            0u64.hash(state);
        } else {
            self.0.to_bits().hash(state);
        }
    }
}

// ============================================================================
// COMPOSITE KEY
// ============================================================================

/// An ordered tuple of dimension values.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CompositeKey {
    parts: SmallVec<[KeyValue; 3]>,
}

impl CompositeKey {
    pub fn new(parts: impl IntoIterator<Item = KeyValue>) -> Self {
        CompositeKey {
            parts: parts.into_iter().collect(),
        }
    }

    /// A one-component key (scalar row label).
    pub fn single(value: impl Into<KeyValue>) -> Self {
        let mut parts = SmallVec::new();
        parts.push(value.into());
        CompositeKey { parts }
    }

    pub fn part(&self, index: usize) -> Option<&KeyValue> {
        self.parts.get(index)
    }

    pub fn parts(&self) -> &[KeyValue] {
        &self.parts
    }

    pub fn len(&self) -> usize {
        self.parts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.parts.is_empty()
    }

    /// Key made of the first `n` components.
    pub fn prefix(&self, n: usize) -> CompositeKey {
        CompositeKey {
            parts: self.parts.iter().take(n).cloned().collect(),
        }
    }
}

impl fmt::Display for CompositeKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.parts.len() == 1 {
            return write!(f, "{}", self.parts[0]);
        }
        f.write_str("(")?;
        for (i, part) in self.parts.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{}", part)?;
        }
        f.write_str(")")
    }
}
