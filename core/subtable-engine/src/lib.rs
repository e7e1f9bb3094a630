//! FILENAME: core/subtable-engine/src/lib.rs
//! Subtable Engine - reshapes a flat patent record set into the report tables.
//!
//! Architecture:
//! - key.rs: CompositeKey and its hashable components
//! - aggregate.rs: CompositeKeyAggregator (first-seen ordered counts)
//! - table.rs: MultiLevelTable with two-level column headers and margins
//! - definition.rs: table identities and the fixed report vocabulary
//! - builders/: one builder per report table
//!
//! Every builder is a pure function of the same immutable inputs, so a
//! failure in one table never affects the others.

pub mod aggregate;
pub mod builders;
pub mod definition;
pub mod error;
pub mod key;
pub mod table;

pub use aggregate::{aggregate, DistinctValues, KeyCounts};
pub use definition::TableId;
pub use error::TableError;
pub use key::{CompositeKey, KeyValue, OrderedFloat};
pub use table::{ColumnHeader, ColumnKey, GroupSpan, MultiLevelTable};

use engine::{locate_dynamic_columns, DynamicColumns, FieldCatalog, RecordSet};

/// Builds one report table.
pub fn generate(
    id: TableId,
    records: &RecordSet,
    catalog: &FieldCatalog,
    dynamic: &DynamicColumns,
) -> Result<MultiLevelTable, TableError> {
    match id {
        TableId::Narrative61 => builders::narrative::build(records, catalog, dynamic),
        TableId::ClassifierYears64 => builders::classifier_years::build(records, catalog, dynamic),
        TableId::Bilateral65 => builders::bilateral::build(records, catalog, dynamic),
        TableId::Geography66 => builders::geography::build(records, catalog, dynamic),
    }
}

/// Builds every report table. Dynamic column groups are located once and
/// shared; each table carries its own result.
pub fn generate_all(
    records: &RecordSet,
    catalog: &FieldCatalog,
) -> Vec<(TableId, Result<MultiLevelTable, TableError>)> {
    let dynamic = locate_dynamic_columns(records, catalog);
    TableId::ALL
        .iter()
        .map(|&id| (id, generate(id, records, catalog, &dynamic)))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::builders::fixtures::{patent, record_set};

    #[test]
    fn generates_all_four_tables() {
        let set = record_set(vec![
            patent("RU", "RU", 2020.0, "A01.B02"),
            patent("US", "RU", 2019.0, "A01"),
        ]);
        let results = generate_all(&set, &FieldCatalog::default());
        let ids: Vec<TableId> = results.iter().map(|(id, _)| *id).collect();
        assert_eq!(ids, TableId::ALL.to_vec());
        assert!(results.iter().all(|(_, r)| r.is_ok()));
    }

    #[test]
    fn failing_table_does_not_stop_siblings() {
        // no marker column: 6.1 and 6.4 fail, 6.5 and 6.6 still build
        let set = record_set(vec![patent("RU", "RU", 2020.0, "A01")]).without_column("Tag");
        let results = generate_all(&set, &FieldCatalog::default());
        let ok: Vec<TableId> = results
            .iter()
            .filter(|(_, r)| r.is_ok())
            .map(|(id, _)| *id)
            .collect();
        assert_eq!(ok, vec![TableId::Bilateral65, TableId::Geography66]);
    }
}
