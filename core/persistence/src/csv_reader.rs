//! FILENAME: core/persistence/src/csv_reader.rs
//! Reads a UTF-8 CSV file into a record set.

use engine::{CellValue, RecordSet};
use std::io::Read;
use std::path::Path;

use crate::PersistenceError;

/// Loads a CSV file; the first record holds the headers.
pub fn load_csv(path: &Path) -> Result<RecordSet, PersistenceError> {
    let file = std::fs::File::open(path)?;
    read_csv(file)
}

/// Reads CSV from any source. Rows may vary in width; rows with no
/// non-blank field are skipped.
pub fn read_csv<R: Read>(source: R) -> Result<RecordSet, PersistenceError> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_reader(source);

    let mut records = reader.records();
    let headers: Vec<String> = match records.next() {
        Some(first) => first
            .map_err(|e| PersistenceError::from_csv(e, 1))?
            .iter()
            .enumerate()
            .map(|(i, h)| if i == 0 { h.trim_start_matches('\u{feff}') } else { h })
            .map(str::to_string)
            .collect(),
        None => return Err(PersistenceError::InvalidFormat("CSV input is empty".to_string())),
    };

    let mut rows = Vec::new();
    for (index, record) in records.enumerate() {
        let record = record.map_err(|e| PersistenceError::from_csv(e, index as u64 + 2))?;
        let row: Vec<CellValue> = record.iter().map(typed_cell).collect();
        if row.iter().any(|c| !c.is_empty()) {
            rows.push(row);
        }
    }

    Ok(RecordSet::new(headers, rows))
}

/// blank -> Empty, numeric -> Number, anything else -> Text.
fn typed_cell(field: &str) -> CellValue {
    let trimmed = field.trim();
    if trimmed.is_empty() {
        return CellValue::Empty;
    }
    match trimmed.parse::<f64>() {
        Ok(n) if n.is_finite() => CellValue::Number(n),
        _ => CellValue::Text(field.to_string()),
    }
}
