//! FILENAME: core/subtable-engine/src/error.rs

use thiserror::Error;

use crate::definition::TableId;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum TableError {
    #[error("table {table}: required field '{field}' (column '{header}') is missing")]
    MissingField {
        table: TableId,
        field: String,
        header: String,
    },

    #[error("table {table}: record {row}, field '{field}': cannot use '{value}': {reason}")]
    MalformedValue {
        table: TableId,
        field: String,
        row: usize,
        value: String,
        reason: String,
    },

    #[error("Unknown row key: {0}")]
    UnknownRow(String),

    #[error("Unknown column key: {0}")]
    UnknownColumn(String),
}
