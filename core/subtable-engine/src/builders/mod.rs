//! FILENAME: core/subtable-engine/src/builders/mod.rs
//! Report table builders.
//!
//! Each builder is a pure function of the record set, the field catalog and
//! the dynamic column groups located once for that record set. Builders do
//! not share state; one failing never affects another.

pub mod bilateral;
pub mod classifier_years;
pub mod geography;
pub mod narrative;

use engine::{
    format_date, ColumnRange, FieldCatalog, LogicalField, Record, RecordSet,
};

use crate::definition::TableId;
use crate::error::TableError;

/// Catalog field name reported when the marker column is absent.
pub(crate) const MARKER_FIELD: &str = "marker column";

/// Field name reported when no two-letter country header exists.
pub(crate) const COUNTRY_BLOCK_FIELD: &str = "country block";

/// Header pattern reported for a missing country block.
pub(crate) const COUNTRY_BLOCK_PATTERN: &str = "first two-letter header";

/// Resolves a logical field or fails the table naming it.
pub(crate) fn require(
    table: TableId,
    field: LogicalField,
    catalog: &FieldCatalog,
    records: &RecordSet,
) -> Result<usize, TableError> {
    catalog
        .resolve(field, records)
        .ok_or_else(|| TableError::MissingField {
            table,
            field: field.to_string(),
            header: catalog.header(field).to_string(),
        })
}

/// Requires the "other country" publication columns after the marker.
pub(crate) fn require_other_publications<'a>(
    table: TableId,
    group: Option<&'a ColumnRange>,
    catalog: &FieldCatalog,
) -> Result<&'a ColumnRange, TableError> {
    group.ok_or_else(|| TableError::MissingField {
        table,
        field: MARKER_FIELD.to_string(),
        header: catalog.marker_column.clone(),
    })
}

/// Formats a date cell, failing the whole table on an unreadable value.
pub(crate) fn report_date(
    table: TableId,
    field: LogicalField,
    record: &Record<'_>,
    column: usize,
    layout: &str,
) -> Result<String, TableError> {
    format_date(record.get(column), layout).map_err(|e| TableError::MalformedValue {
        table,
        field: field.to_string(),
        row: record.position(),
        value: e.value,
        reason: "not a date".to_string(),
    })
}
