//! FILENAME: core/engine/src/record.rs
//! PURPOSE: The flat input table every report is generated from.
//! CONTEXT: A `RecordSet` is an immutable, ordered sequence of records with
//! named columns. Unlike the sparse spreadsheet grid, rows are dense: short
//! source rows are padded with `Empty` so every record has one cell per header.

use serde::{Deserialize, Serialize};

use crate::cell::CellValue;

static EMPTY: CellValue = CellValue::Empty;

/// Immutable view of the flat input table.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RecordSet {
    headers: Vec<String>,
    rows: Vec<Vec<CellValue>>,
}

impl RecordSet {
    /// Creates a record set, padding or truncating rows to the header width.
    pub fn new(headers: Vec<String>, rows: Vec<Vec<CellValue>>) -> Self {
        let width = headers.len();
        let rows = rows
            .into_iter()
            .map(|mut row| {
                row.resize(width, CellValue::Empty);
                row
            })
            .collect();
        RecordSet { headers, rows }
    }

    pub fn headers(&self) -> &[String] {
        &self.headers
    }

    /// Number of records (rows, excluding the header).
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Position of the first column with exactly this header.
    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.headers.iter().position(|h| h == name)
    }

    pub fn record(&self, position: usize) -> Option<Record<'_>> {
        self.rows.get(position).map(|cells| Record { position, cells })
    }

    /// Iterates records in input order.
    pub fn records(&self) -> impl Iterator<Item = Record<'_>> + '_ {
        self.rows
            .iter()
            .enumerate()
            .map(|(position, cells)| Record { position, cells })
    }

    /// Returns a copy without the named column (no-op when it is absent).
    pub fn without_column(&self, name: &str) -> RecordSet {
        match self.column_index(name) {
            None => self.clone(),
            Some(idx) => {
                let mut headers = self.headers.clone();
                headers.remove(idx);
                let rows = self
                    .rows
                    .iter()
                    .map(|row| {
                        let mut row = row.clone();
                        row.remove(idx);
                        row
                    })
                    .collect();
                RecordSet { headers, rows }
            }
        }
    }
}

/// One row of a `RecordSet`.
#[derive(Debug, Clone, Copy)]
pub struct Record<'a> {
    position: usize,
    cells: &'a [CellValue],
}

impl<'a> Record<'a> {
    /// 0-based position of this record in the source table.
    pub fn position(&self) -> usize {
        self.position
    }

    /// Cell at the given column; out-of-range columns read as `Empty`.
    pub fn get(&self, column: usize) -> &'a CellValue {
        self.cells.get(column).unwrap_or(&EMPTY)
    }

    /// Display string of the cell at the given column.
    pub fn text(&self, column: usize) -> String {
        self.get(column).display()
    }

    pub fn cells(&self) -> &'a [CellValue] {
        self.cells
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> RecordSet {
        RecordSet::new(
            vec!["№".to_string(), "Name".to_string(), "RU".to_string()],
            vec![
                vec![CellValue::Number(1.0), CellValue::text("alpha")],
                vec![
                    CellValue::Number(2.0),
                    CellValue::text("beta"),
                    CellValue::text("RU123"),
                ],
            ],
        )
    }

    #[test]
    fn short_rows_are_padded() {
        let set = sample();
        let first = set.record(0).unwrap();
        assert_eq!(first.cells().len(), 3);
        assert_eq!(first.get(2), &CellValue::Empty);
    }

    #[test]
    fn records_keep_input_order() {
        let set = sample();
        let names: Vec<String> = set.records().map(|r| r.text(1)).collect();
        assert_eq!(names, vec!["alpha", "beta"]);
    }

    #[test]
    fn drops_named_column() {
        let set = sample().without_column("№");
        assert_eq!(set.headers(), &["Name".to_string(), "RU".to_string()]);
        assert_eq!(set.record(1).unwrap().text(0), "beta");
        assert_eq!(set.len(), 2);
    }

    #[test]
    fn missing_column_is_noop() {
        let set = sample();
        assert_eq!(set.without_column("absent"), set);
    }
}
