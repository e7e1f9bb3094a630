//! FILENAME: core/persistence/src/xlsx_reader.rs
//! Reads the first worksheet of an XLSX/ODS/XLS workbook into a record set.

use calamine::{open_workbook_auto, Data, Reader};
use engine::{from_excel_serial, parse_date, CellValue, RecordSet};
use std::path::Path;

use crate::PersistenceError;

/// Loads the first worksheet. The first row holds the headers; rows that
/// are entirely empty are skipped.
pub fn load_spreadsheet(path: &Path) -> Result<RecordSet, PersistenceError> {
    let mut workbook = open_workbook_auto(path)?;

    let range = workbook
        .worksheet_range_at(0)
        .ok_or_else(|| PersistenceError::EmptyWorkbook(path.display().to_string()))??;

    let mut rows = range.rows();
    let headers: Vec<String> = match rows.next() {
        Some(first) => first.iter().map(|c| convert_cell(c).display()).collect(),
        None => return Err(PersistenceError::EmptyWorkbook(path.display().to_string())),
    };

    let records: Vec<Vec<CellValue>> = rows
        .map(|row| row.iter().map(convert_cell).collect::<Vec<_>>())
        .filter(|row| row.iter().any(|c| !c.is_empty()))
        .collect();

    Ok(RecordSet::new(headers, records))
}

fn convert_cell(cell: &Data) -> CellValue {
    match cell {
        Data::Empty => CellValue::Empty,
        Data::String(s) => CellValue::text(s.as_str()),
        Data::Float(f) => CellValue::Number(*f),
        Data::Int(i) => CellValue::Number(*i as f64),
        Data::Bool(b) => CellValue::Boolean(*b),
        Data::Error(e) => CellValue::Text(format!("{:?}", e)),
        Data::DateTime(dt) => from_excel_serial(dt.as_f64())
            .map(CellValue::Date)
            .unwrap_or(CellValue::Number(dt.as_f64())),
        Data::DateTimeIso(s) => {
            let text = CellValue::text(s.as_str());
            match parse_date(&text) {
                Ok(Some(dt)) => CellValue::Date(dt),
                _ => text,
            }
        }
        Data::DurationIso(s) => CellValue::text(s.as_str()),
    }
}
