//! FILENAME: core/subtable-engine/src/table.rs
//! Multi-level table - the output structure of every report builder.
//!
//! Rows are addressed by composite keys, columns by flat or two-level
//! (group, sub-label) keys. Cells are stored sparsely per row; any cell that
//! was never written reads as the table's declared zero value.

use std::fmt;
use std::ops::Range;

use engine::CellValue;
use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

use crate::error::TableError;
use crate::key::{CompositeKey, KeyValue};

// ============================================================================
// COLUMN KEYS
// ============================================================================

/// A column address: a single label, a (group, sub-label) pair, or a
/// grouped column tied to one source column.
///
/// `Sourced` columns are told apart by source position, so several of them
/// may show the same sub-label.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ColumnKey {
    Flat(String),
    Grouped { group: String, sub: KeyValue },
    Sourced { group: String, sub: String, source: usize },
}

impl ColumnKey {
    pub fn flat(label: impl Into<String>) -> Self {
        ColumnKey::Flat(label.into())
    }

    pub fn grouped(group: impl Into<String>, sub: impl Into<KeyValue>) -> Self {
        ColumnKey::Grouped {
            group: group.into(),
            sub: sub.into(),
        }
    }

    pub fn sourced(group: impl Into<String>, sub: impl Into<String>, source: usize) -> Self {
        ColumnKey::Sourced {
            group: group.into(),
            sub: sub.into(),
            source,
        }
    }

    /// Top header label.
    pub fn group_label(&self) -> &str {
        match self {
            ColumnKey::Flat(label) => label,
            ColumnKey::Grouped { group, .. } | ColumnKey::Sourced { group, .. } => group,
        }
    }

    /// Second header line; empty for flat columns.
    pub fn sub_label(&self) -> String {
        match self {
            ColumnKey::Flat(_) => String::new(),
            ColumnKey::Grouped { sub, .. } => sub.to_string(),
            ColumnKey::Sourced { sub, .. } => sub.clone(),
        }
    }

    pub fn is_grouped(&self) -> bool {
        !matches!(self, ColumnKey::Flat(_))
    }
}

impl fmt::Display for ColumnKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ColumnKey::Flat(label) => f.write_str(label),
            ColumnKey::Grouped { group, sub } => write!(f, "({}, {})", group, sub),
            ColumnKey::Sourced { group, sub, source } => write!(f, "({}, {} #{})", group, sub, source),
        }
    }
}

/// A run of adjacent columns sharing one top header label.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GroupSpan {
    pub label: String,
    pub start: usize,
    pub len: usize,
    /// Flat columns span both header lines.
    pub flat: bool,
}

/// Ordered column index.
#[derive(Debug, Clone, Default)]
pub struct ColumnHeader {
    keys: Vec<ColumnKey>,
    positions: FxHashMap<ColumnKey, usize>,
    level_names: Vec<String>,
}

impl ColumnHeader {
    pub fn new(keys: impl IntoIterator<Item = ColumnKey>) -> Self {
        let mut header = ColumnHeader::default();
        for key in keys {
            header.push(key);
        }
        header
    }

    /// Names of the header levels (shown above the row index on export).
    pub fn with_level_names(mut self, names: Vec<String>) -> Self {
        self.level_names = names;
        self
    }

    /// Appends a column. An existing key keeps its position.
    pub fn push(&mut self, key: ColumnKey) -> usize {
        if let Some(&pos) = self.positions.get(&key) {
            return pos;
        }
        let pos = self.keys.len();
        self.positions.insert(key.clone(), pos);
        self.keys.push(key);
        pos
    }

    pub fn keys(&self) -> &[ColumnKey] {
        &self.keys
    }

    pub fn len(&self) -> usize {
        self.keys.len()
    }

    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }

    pub fn position(&self, key: &ColumnKey) -> Option<usize> {
        self.positions.get(key).copied()
    }

    pub fn level_names(&self) -> &[String] {
        &self.level_names
    }

    /// Number of header lines: 2 when any column is grouped.
    pub fn levels(&self) -> usize {
        if self.keys.iter().any(ColumnKey::is_grouped) {
            2
        } else {
            1
        }
    }

    /// Contiguous runs of grouped columns with the same group label.
    /// Every flat column is a span of its own.
    pub fn group_spans(&self) -> Vec<GroupSpan> {
        let mut spans: Vec<GroupSpan> = Vec::new();
        for (i, key) in self.keys.iter().enumerate() {
            let flat = !key.is_grouped();
            if let Some(last) = spans.last_mut() {
                if !flat && !last.flat && last.label == key.group_label() {
                    last.len += 1;
                    continue;
                }
            }
            spans.push(GroupSpan {
                label: key.group_label().to_string(),
                start: i,
                len: 1,
                flat,
            });
        }
        spans
    }
}

// ============================================================================
// TABLE
// ============================================================================

#[derive(Debug, Clone)]
struct TableRow {
    key: CompositeKey,
    /// Sparse storage: column position -> value.
    cells: FxHashMap<usize, CellValue>,
}

/// A table with composite row keys, (possibly) two-level column keys and a
/// sparse cell store.
#[derive(Debug, Clone)]
pub struct MultiLevelTable {
    name: String,
    header: ColumnHeader,
    rows: Vec<TableRow>,
    row_positions: FxHashMap<CompositeKey, usize>,
    zero: CellValue,
    row_index_names: Vec<String>,
    index_visible: bool,
}

impl MultiLevelTable {
    /// Creates an empty table with the given columns and zero value.
    pub fn new(name: impl Into<String>, header: ColumnHeader, zero: CellValue) -> Self {
        MultiLevelTable {
            name: name.into(),
            header,
            rows: Vec::new(),
            row_positions: FxHashMap::default(),
            zero,
            row_index_names: Vec::new(),
            index_visible: true,
        }
    }

    /// Sets the row index level names and whether the index is exported.
    pub fn with_row_index(mut self, names: Vec<String>, visible: bool) -> Self {
        self.row_index_names = names;
        self.index_visible = visible;
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn header(&self) -> &ColumnHeader {
        &self.header
    }

    pub fn zero(&self) -> &CellValue {
        &self.zero
    }

    pub fn row_index_names(&self) -> &[String] {
        &self.row_index_names
    }

    pub fn index_visible(&self) -> bool {
        self.index_visible
    }

    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    pub fn column_count(&self) -> usize {
        self.header.len()
    }

    /// Row keys in table order.
    pub fn row_keys(&self) -> impl Iterator<Item = &CompositeKey> + '_ {
        self.rows.iter().map(|r| &r.key)
    }

    pub fn row_key(&self, index: usize) -> Option<&CompositeKey> {
        self.rows.get(index).map(|r| &r.key)
    }

    pub fn row_index(&self, key: &CompositeKey) -> Option<usize> {
        self.row_positions.get(key).copied()
    }

    pub fn column_index(&self, key: &ColumnKey) -> Option<usize> {
        self.header.position(key)
    }

    /// Appends a row. An existing key keeps its position.
    pub fn push_row(&mut self, key: CompositeKey) -> usize {
        if let Some(&pos) = self.row_positions.get(&key) {
            return pos;
        }
        let pos = self.rows.len();
        self.row_positions.insert(key.clone(), pos);
        self.rows.push(TableRow {
            key,
            cells: FxHashMap::default(),
        });
        pos
    }

    fn locate(&self, row: &CompositeKey, col: &ColumnKey) -> Result<(usize, usize), TableError> {
        let r = self
            .row_index(row)
            .ok_or_else(|| TableError::UnknownRow(row.to_string()))?;
        let c = self
            .column_index(col)
            .ok_or_else(|| TableError::UnknownColumn(col.to_string()))?;
        Ok((r, c))
    }

    pub fn set(&mut self, row: &CompositeKey, col: &ColumnKey, value: CellValue) -> Result<(), TableError> {
        let (r, c) = self.locate(row, col)?;
        self.set_at(r, c, value);
        Ok(())
    }

    /// Reads a cell; unset cells read as the zero value, unknown keys as None.
    pub fn get(&self, row: &CompositeKey, col: &ColumnKey) -> Option<&CellValue> {
        let (r, c) = self.locate(row, col).ok()?;
        Some(self.cell_at(r, c))
    }

    /// Adds `delta` to a numeric cell (unset or non-numeric cells count as 0).
    pub fn add(&mut self, row: &CompositeKey, col: &ColumnKey, delta: f64) -> Result<(), TableError> {
        let (r, c) = self.locate(row, col)?;
        let current = self.cell_at(r, c).as_number().unwrap_or(0.0);
        self.set_at(r, c, CellValue::Number(current + delta));
        Ok(())
    }

    /// Writes by position. Out-of-range positions are ignored.
    pub fn set_at(&mut self, row: usize, col: usize, value: CellValue) {
        if col >= self.header.len() {
            return;
        }
        if let Some(r) = self.rows.get_mut(row) {
            r.cells.insert(col, value);
        }
    }

    /// Reads by position; anything unset reads as the zero value.
    pub fn cell_at(&self, row: usize, col: usize) -> &CellValue {
        self.rows
            .get(row)
            .and_then(|r| r.cells.get(&col))
            .unwrap_or(&self.zero)
    }

    /// Dense copy of one row's cells in column order.
    pub fn row_cells(&self, row: usize) -> Vec<CellValue> {
        (0..self.header.len())
            .map(|c| self.cell_at(row, c).clone())
            .collect()
    }

    /// Removes rows whose cells in `columns` all equal the zero value.
    /// Returns the number of rows removed.
    pub fn drop_all_zero_rows(&mut self, columns: Range<usize>) -> usize {
        let before = self.rows.len();
        let zero = self.zero.clone();
        self.rows.retain(|row| {
            columns
                .clone()
                .any(|c| row.cells.get(&c).map_or(false, |v| *v != zero))
        });
        let removed = before - self.rows.len();
        if removed > 0 {
            self.reindex_rows();
        }
        removed
    }

    fn reindex_rows(&mut self) {
        self.row_positions = self
            .rows
            .iter()
            .enumerate()
            .map(|(i, r)| (r.key.clone(), i))
            .collect();
    }

    /// Sums the numeric cells of one row over the given columns.
    pub fn row_total(&self, row: &CompositeKey, columns: &[ColumnKey]) -> Result<f64, TableError> {
        let mut total = 0.0;
        for col in columns {
            let (r, c) = self.locate(row, col)?;
            total += self.cell_at(r, c).as_number().unwrap_or(0.0);
        }
        Ok(total)
    }

    /// Sums the numeric cells of one column over the given rows.
    pub fn column_total(&self, col: &ColumnKey, rows: &[CompositeKey]) -> Result<f64, TableError> {
        let mut total = 0.0;
        for row in rows {
            let (r, c) = self.locate(row, col)?;
            total += self.cell_at(r, c).as_number().unwrap_or(0.0);
        }
        Ok(total)
    }
}
