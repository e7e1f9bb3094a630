//! FILENAME: core/subtable-engine/src/builders/bilateral.rs
//! Table 6.5 - mutual patenting activity between countries.
//!
//! Rows are applicant countries (first-seen order) followed by the `Итого`
//! total row. Columns are one sub-column per grant country, the national /
//! abroad split of the same counts, and the `Всего` grand total.
//!
//! Both views partition the same records, so for every row the grant-country
//! cells, `national + abroad` and `Всего` all sum to the same figure, and the
//! total row's `Всего` equals the record count.

use engine::{CellValue, DynamicColumns, FieldCatalog, LogicalField, RecordSet};

use super::require;
use crate::aggregate::{aggregate, DistinctValues};
use crate::definition::bilateral::*;
use crate::definition::TableId;
use crate::error::TableError;
use crate::key::{CompositeKey, KeyValue};
use crate::table::{ColumnHeader, ColumnKey, MultiLevelTable};

const TABLE: TableId = TableId::Bilateral65;

/// Builds table 6.5.
pub fn build(
    records: &RecordSet,
    catalog: &FieldCatalog,
    _dynamic: &DynamicColumns,
) -> Result<MultiLevelTable, TableError> {
    let applicant_col = require(TABLE, LogicalField::ApplicantCountry, catalog, records)?;
    let grant_col = require(TABLE, LogicalField::GrantCountry, catalog, records)?;

    let mut applicants = DistinctValues::new();
    let mut grants = DistinctValues::new();
    for record in records.records() {
        applicants.insert(KeyValue::from(record.get(applicant_col)));
        grants.insert(KeyValue::from(record.get(grant_col)));
    }

    let pairs = aggregate(records, |record| {
        Some(CompositeKey::new([
            KeyValue::from(record.get(applicant_col)),
            KeyValue::from(record.get(grant_col)),
        ]))
    });

    let national = ColumnKey::grouped(GROUP_PATENT_COUNT, SUB_NATIONAL);
    let abroad = ColumnKey::grouped(GROUP_PATENT_COUNT, SUB_ABROAD);
    let grand_total = ColumnKey::flat(COL_GRAND_TOTAL);

    let grant_columns: Vec<ColumnKey> = grants
        .iter()
        .map(|country| ColumnKey::grouped(GROUP_GRANT_COUNTRY, country.clone()))
        .collect();
    let header = ColumnHeader::new(
        grant_columns
            .iter()
            .cloned()
            .chain([national.clone(), abroad.clone(), grand_total.clone()]),
    )
    .with_level_names(vec![" ".to_string(), LEVEL_APPLICANT.to_string()]);

    let mut table = MultiLevelTable::new(TABLE.to_string(), header, CellValue::Number(0.0));

    let applicant_rows: Vec<CompositeKey> = applicants
        .iter()
        .map(|country| CompositeKey::single(country.clone()))
        .collect();
    for row in &applicant_rows {
        table.push_row(row.clone());
    }
    let total_row = CompositeKey::single(KeyValue::margin(ROW_TOTAL));
    table.push_row(total_row.clone());

    for (pair, count) in pairs.iter() {
        let (applicant, grant) = match pair.parts() {
            [applicant, grant] => (applicant, grant),
            _ => continue,
        };
        let row = CompositeKey::single(applicant.clone());
        let count = count as f64;
        table.set(
            &row,
            &ColumnKey::grouped(GROUP_GRANT_COUNTRY, grant.clone()),
            CellValue::Number(count),
        )?;
        let split = if applicant == grant { &national } else { &abroad };
        table.add(&row, split, count)?;
    }

    for row in &applicant_rows {
        let total = table.row_total(row, &[national.clone(), abroad.clone()])?;
        table.set(row, &grand_total, CellValue::Number(total))?;
    }

    let mut margin_columns = grant_columns;
    margin_columns.extend([national, abroad, grand_total]);
    for column in &margin_columns {
        let total = table.column_total(column, &applicant_rows)?;
        table.set(&total_row, column, CellValue::Number(total))?;
    }

    Ok(table)
}
