//! FILENAME: core/persistence/src/error.rs

use thiserror::Error;

#[derive(Error, Debug)]
pub enum PersistenceError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("XLSX write error: {0}")]
    XlsxWrite(#[from] rust_xlsxwriter::XlsxError),

    #[error("Spreadsheet read error: {0}")]
    SpreadsheetRead(#[from] calamine::Error),

    #[error("CSV error at record {row}: {reason}")]
    Csv { row: u64, reason: String },

    #[error("Invalid file format: {0}")]
    InvalidFormat(String),

    #[error("Unsupported format: {0}")]
    UnsupportedFormat(String),

    #[error("Workbook contains no data: {0}")]
    EmptyWorkbook(String),
}

impl PersistenceError {
    /// Maps a csv error, keeping IO failures as IO.
    pub(crate) fn from_csv(err: csv::Error, fallback_row: u64) -> Self {
        let reason = err.to_string();
        let pos = err.position().cloned();

        match err.into_kind() {
            csv::ErrorKind::Io(e) => PersistenceError::Io(e),
            _ => {
                let row = pos
                    .map(|p| p.record())
                    .filter(|r| *r > 0)
                    .unwrap_or(fallback_row);
                PersistenceError::Csv { row, reason }
            }
        }
    }
}
