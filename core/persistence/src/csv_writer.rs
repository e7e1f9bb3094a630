//! FILENAME: core/persistence/src/csv_writer.rs

use crate::layout::SheetLayout;
use crate::PersistenceError;
use std::io::Write;
use std::path::Path;
use subtable_engine::MultiLevelTable;

/// Writes a table to a UTF-8 CSV file.
pub fn save_csv_table(table: &MultiLevelTable, path: &Path) -> Result<(), PersistenceError> {
    let file = std::fs::File::create(path)?;
    write_csv_table(table, file)
}

/// Writes the header lines (group labels repeated per column) and one
/// record per row.
pub fn write_csv_table<W: Write>(table: &MultiLevelTable, sink: W) -> Result<(), PersistenceError> {
    let mut writer = csv::WriterBuilder::new().flexible(false).from_writer(sink);
    let layout = SheetLayout::of(table);
    let mut line_no: u64 = 0;

    for line in 0..layout.header_lines {
        let mut record = layout.index_labels(table, line);
        record.extend((0..table.column_count()).map(|col| layout.column_label(table, col, line)));
        line_no += 1;
        writer
            .write_record(&record)
            .map_err(|e| PersistenceError::from_csv(e, line_no))?;
    }

    for row in 0..table.row_count() {
        let record: Vec<String> = layout
            .index_cells(table, row)
            .iter()
            .chain(table.row_cells(row).iter())
            .map(|cell| cell.display())
            .collect();
        line_no += 1;
        writer
            .write_record(&record)
            .map_err(|e| PersistenceError::from_csv(e, line_no))?;
    }

    writer.flush()?;
    Ok(())
}
