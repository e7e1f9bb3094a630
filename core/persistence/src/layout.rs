//! FILENAME: core/persistence/src/layout.rs
//! Grid layout shared by the XLSX and CSV writers.
//!
//! A table is written as `header_lines` header rows followed by one line per
//! row key. When the row index is visible it occupies the leftmost
//! `index_width` columns; the table's own columns follow.

use engine::CellValue;
use subtable_engine::MultiLevelTable;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct SheetLayout {
    pub index_width: usize,
    pub header_lines: usize,
}

impl SheetLayout {
    pub fn of(table: &MultiLevelTable) -> Self {
        let index_width = if table.index_visible() {
            let key_width = table.row_keys().map(|k| k.len()).max().unwrap_or(1);
            key_width.max(table.row_index_names().len()).max(1)
        } else {
            0
        };
        SheetLayout {
            index_width,
            header_lines: table.header().levels(),
        }
    }

    /// Labels written above the index columns on one header line.
    ///
    /// Column level names go on their own header line in the first index
    /// column; otherwise the row index names sit on the last header line.
    pub fn index_labels(&self, table: &MultiLevelTable, line: usize) -> Vec<String> {
        let mut labels = vec![String::new(); self.index_width];
        if self.index_width == 0 {
            return labels;
        }
        let level_names = table.header().level_names();
        if !level_names.is_empty() {
            if let Some(name) = level_names.get(line) {
                labels[0] = name.clone();
            }
        } else if line + 1 == self.header_lines {
            for (slot, name) in labels.iter_mut().zip(table.row_index_names()) {
                *slot = name.clone();
            }
        }
        labels
    }

    /// Index cells of one data row, padded to the index width.
    pub fn index_cells(&self, table: &MultiLevelTable, row: usize) -> Vec<CellValue> {
        let mut cells = vec![CellValue::Empty; self.index_width];
        if let Some(key) = table.row_key(row) {
            for (slot, part) in cells.iter_mut().zip(key.parts()) {
                *slot = part.to_cell();
            }
        }
        cells
    }

    /// Header text of one table column on one header line.
    pub fn column_label(&self, table: &MultiLevelTable, col: usize, line: usize) -> String {
        let Some(key) = table.header().keys().get(col) else {
            return String::new();
        };
        match line {
            0 => key.group_label().to_string(),
            _ => key.sub_label(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use subtable_engine::{ColumnHeader, ColumnKey, CompositeKey, KeyValue};

    fn pivot() -> MultiLevelTable {
        let header = ColumnHeader::new([ColumnKey::grouped("Years", 2020i64)]);
        let mut table = MultiLevelTable::new("t", header, CellValue::Number(0.0))
            .with_row_index(vec!["Object".to_string(), "Country".to_string()], true);
        table.push_row(CompositeKey::new([KeyValue::text("A01"), KeyValue::text("RU")]));
        table
    }

    #[test]
    fn index_names_sit_on_last_header_line() {
        let table = pivot();
        let layout = SheetLayout::of(&table);
        assert_eq!(layout, SheetLayout { index_width: 2, header_lines: 2 });
        assert_eq!(layout.index_labels(&table, 0), vec!["", ""]);
        assert_eq!(layout.index_labels(&table, 1), vec!["Object", "Country"]);
        assert_eq!(layout.index_cells(&table, 0)[1], CellValue::text("RU"));
        assert_eq!(layout.column_label(&table, 0, 1), "2020");
    }

    #[test]
    fn hidden_index_takes_no_columns() {
        let header = ColumnHeader::new([ColumnKey::flat("Title")]);
        let mut table = MultiLevelTable::new("t", header, CellValue::Empty).with_row_index(Vec::new(), false);
        table.push_row(CompositeKey::single(0i64));
        let layout = SheetLayout::of(&table);
        assert_eq!(layout.index_width, 0);
        assert_eq!(layout.header_lines, 1);
        assert!(layout.index_cells(&table, 0).is_empty());
    }
}
