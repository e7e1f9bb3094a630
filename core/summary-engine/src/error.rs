//! FILENAME: core/summary-engine/src/error.rs

use thiserror::Error;

#[derive(Error, Debug)]
pub enum SummaryError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid summary config: {0}")]
    Config(#[from] serde_json::Error),

    #[error("Summary config has no '{0}' section")]
    MissingSetting(String),

    #[error("Column '{0}' not found in the input")]
    MissingColumn(String),

    #[error("Column '{column}', record {row}: '{value}' is not a year")]
    MalformedYear {
        column: String,
        row: usize,
        value: String,
    },
}
