//! FILENAME: core/persistence/src/lib.rs
//! Persistence Module
//!
//! Loads the flat patent record set from XLSX/ODS/XLS/CSV files and exports
//! report tables to XLSX or CSV.

mod csv_reader;
mod csv_writer;
mod error;
mod layout;
mod xlsx_reader;
mod xlsx_writer;

pub use csv_reader::{load_csv, read_csv};
pub use csv_writer::{save_csv_table, write_csv_table};
pub use error::PersistenceError;
pub use xlsx_reader::load_spreadsheet;
pub use xlsx_writer::save_xlsx_table;

use engine::{FieldCatalog, RecordSet};
use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use subtable_engine::{MultiLevelTable, TableId};

// ============================================================================
// FORMATS
// ============================================================================

/// Source file formats that can be loaded.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputFormat {
    Xlsx,
    Ods,
    Xls,
    Csv,
}

impl InputFormat {
    /// Detects the format from a file extension.
    pub fn from_path(path: &Path) -> Result<Self, PersistenceError> {
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .ok_or_else(|| PersistenceError::UnsupportedFormat(path.display().to_string()))?;
        ext.parse()
    }
}

impl FromStr for InputFormat {
    type Err = PersistenceError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "xlsx" => Ok(InputFormat::Xlsx),
            "ods" => Ok(InputFormat::Ods),
            "xls" => Ok(InputFormat::Xls),
            "csv" => Ok(InputFormat::Csv),
            _ => Err(PersistenceError::UnsupportedFormat(s.to_string())),
        }
    }
}

/// Formats report tables can be exported to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Xlsx,
    Csv,
}

impl OutputFormat {
    pub fn extension(&self) -> &'static str {
        match self {
            OutputFormat::Xlsx => "xlsx",
            OutputFormat::Csv => "csv",
        }
    }

    /// Output format used when none is requested: CSV stays CSV, every
    /// spreadsheet input is exported as XLSX.
    pub fn default_for(input: InputFormat) -> Self {
        match input {
            InputFormat::Csv => OutputFormat::Csv,
            InputFormat::Xlsx | InputFormat::Ods | InputFormat::Xls => OutputFormat::Xlsx,
        }
    }
}

impl FromStr for OutputFormat {
    type Err = PersistenceError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "xlsx" => Ok(OutputFormat::Xlsx),
            "csv" => Ok(OutputFormat::Csv),
            _ => Err(PersistenceError::UnsupportedFormat(s.to_string())),
        }
    }
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.extension())
    }
}

// ============================================================================
// LOAD / EXPORT
// ============================================================================

/// Loads a record set, dropping the catalog's running-number column.
pub fn load_records(path: &Path, catalog: &FieldCatalog) -> Result<RecordSet, PersistenceError> {
    let records = match InputFormat::from_path(path)? {
        InputFormat::Csv => load_csv(path)?,
        InputFormat::Xlsx | InputFormat::Ods | InputFormat::Xls => load_spreadsheet(path)?,
    };
    Ok(records.without_column(&catalog.row_number_column))
}

/// File name a report table is exported under, e.g. `OUT61.xlsx`.
pub fn output_file_name(id: TableId, format: OutputFormat) -> String {
    format!("OUT{}.{}", id.number(), format.extension())
}

/// Writes one report table into `dir` and returns the file path.
pub fn export_table(
    id: TableId,
    table: &MultiLevelTable,
    dir: &Path,
    format: OutputFormat,
) -> Result<PathBuf, PersistenceError> {
    let path = dir.join(output_file_name(id, format));
    match format {
        OutputFormat::Xlsx => save_xlsx_table(table, &path)?,
        OutputFormat::Csv => save_csv_table(table, &path)?,
    }
    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use calamine::{open_workbook, Data, Reader, Xlsx};
    use engine::CellValue;
    use subtable_engine::{ColumnHeader, ColumnKey, CompositeKey};

    fn bilateral_like() -> MultiLevelTable {
        let header = ColumnHeader::new([
            ColumnKey::grouped("Grant", "RU"),
            ColumnKey::grouped("Grant", "US"),
            ColumnKey::flat("Total"),
        ])
        .with_level_names(vec!["Kind".to_string(), "Applicant".to_string()]);
        let mut table = MultiLevelTable::new("6.5", header, CellValue::Number(0.0));
        let ru = CompositeKey::single("RU");
        table.push_row(ru.clone());
        table.set(&ru, &ColumnKey::grouped("Grant", "US"), CellValue::Number(3.0)).unwrap();
        table.set(&ru, &ColumnKey::flat("Total"), CellValue::Number(3.0)).unwrap();
        table
    }

    #[test]
    fn parses_formats_case_insensitively() {
        assert_eq!("XLSX".parse::<OutputFormat>().unwrap(), OutputFormat::Xlsx);
        assert_eq!(InputFormat::from_path(Path::new("data.Ods")).unwrap(), InputFormat::Ods);
        assert!(matches!(
            "pdf".parse::<OutputFormat>(),
            Err(PersistenceError::UnsupportedFormat(_))
        ));
        assert!("ods".parse::<OutputFormat>().is_err());
        assert_eq!(OutputFormat::default_for(InputFormat::Ods), OutputFormat::Xlsx);
    }

    #[test]
    fn csv_load_drops_row_numbers() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("input.csv");
        std::fs::write(&path, "№,Заявитель\n1,ACME\n2,Beta\n").unwrap();

        let set = load_records(&path, &FieldCatalog::default()).unwrap();
        assert_eq!(set.headers(), &["Заявитель".to_string()]);
        assert_eq!(set.len(), 2);
    }

    #[test]
    fn exports_csv_with_two_header_lines() {
        let dir = tempfile::tempdir().unwrap();
        let path = export_table(TableId::Bilateral65, &bilateral_like(), dir.path(), OutputFormat::Csv).unwrap();
        assert!(path.ends_with("OUT65.csv"));

        let text = std::fs::read_to_string(&path).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines[0], "Kind,Grant,Grant,Total");
        assert_eq!(lines[1], "Applicant,RU,US,");
        assert_eq!(lines[2], "RU,0,3,3");
    }

    #[test]
    fn exports_xlsx_readable_by_calamine() {
        let dir = tempfile::tempdir().unwrap();
        let path = export_table(TableId::Bilateral65, &bilateral_like(), dir.path(), OutputFormat::Xlsx).unwrap();
        assert!(path.ends_with("OUT65.xlsx"));

        let mut workbook: Xlsx<_> = open_workbook(&path).unwrap();
        let range = workbook.worksheet_range("6.5").unwrap();
        assert_eq!(range.get_value((0, 1)), Some(&Data::String("Grant".to_string())));
        assert_eq!(range.get_value((1, 2)), Some(&Data::String("US".to_string())));
        assert_eq!(range.get_value((2, 0)), Some(&Data::String("RU".to_string())));
        assert_eq!(range.get_value((2, 2)), Some(&Data::Float(3.0)));
    }

    #[test]
    fn xlsx_round_trip_through_loader() {
        let dir = tempfile::tempdir().unwrap();
        let header = ColumnHeader::new([ColumnKey::flat("№"), ColumnKey::flat("Название")]);
        let mut table = MultiLevelTable::new("src", header, CellValue::Empty).with_row_index(Vec::new(), false);
        let row = table.push_row(CompositeKey::single(0i64));
        table.set_at(row, 0, CellValue::Number(1.0));
        table.set_at(row, 1, CellValue::text("Battery"));
        let path = dir.path().join("source.xlsx");
        save_xlsx_table(&table, &path).unwrap();

        let set = load_records(&path, &FieldCatalog::default()).unwrap();
        assert_eq!(set.headers(), &["Название".to_string()]);
        assert_eq!(set.record(0).unwrap().text(0), "Battery");
    }
}
