//! FILENAME: core/subtable-engine/src/builders/geography.rs
//! Table 6.6 - geography of patenting.
//!
//! A record-order-preserving concatenation of five fixed columns (dates in
//! `DD.MM.YYYY`) and the dynamic country block copied verbatim.

use engine::{CellValue, DynamicColumns, FieldCatalog, LogicalField, RecordSet, DOTTED_DATE};

use super::{report_date, require, COUNTRY_BLOCK_FIELD, COUNTRY_BLOCK_PATTERN};
use crate::definition::geography::*;
use crate::definition::TableId;
use crate::error::TableError;
use crate::key::CompositeKey;
use crate::table::{ColumnHeader, ColumnKey, MultiLevelTable};

const TABLE: TableId = TableId::Geography66;

/// Builds table 6.6.
pub fn build(
    records: &RecordSet,
    catalog: &FieldCatalog,
    dynamic: &DynamicColumns,
) -> Result<MultiLevelTable, TableError> {
    let applicant = require(TABLE, LogicalField::Applicant, catalog, records)?;
    let title = require(TABLE, LogicalField::InventionTitle, catalog, records)?;
    let application = require(TABLE, LogicalField::ApplicationNumber, catalog, records)?;
    let priority = require(TABLE, LogicalField::PriorityDate, catalog, records)?;
    let published = require(TABLE, LogicalField::PublicationDate, catalog, records)?;
    let countries = dynamic
        .country_block
        .as_ref()
        .ok_or_else(|| TableError::MissingField {
            table: TABLE,
            field: COUNTRY_BLOCK_FIELD.to_string(),
            header: COUNTRY_BLOCK_PATTERN.to_string(),
        })?;

    let fixed = [
        COL_OWNER,
        COL_SOLUTION,
        COL_PRIMARY_APPLICATION,
        COL_PRIORITY_DATE,
        COL_PRIMARY_PUBLICATION,
    ];
    let mut header = ColumnHeader::new(fixed.iter().map(|label| ColumnKey::grouped(*label, BLANK_SUB)));

    // Source column -> output column, one each; a repeated code keeps both columns.
    let country_targets: Vec<(usize, usize)> = countries
        .indices()
        .zip(countries.headers(records))
        .map(|(source, code)| {
            let target = header.push(ColumnKey::sourced(GROUP_COUNTRIES, code.as_str(), source));
            (source, target)
        })
        .collect();

    let mut table = MultiLevelTable::new(TABLE.to_string(), header, CellValue::Empty)
        .with_row_index(Vec::new(), true);

    for record in records.records() {
        let priority_date = report_date(TABLE, LogicalField::PriorityDate, &record, priority, DOTTED_DATE)?;
        let publication_date =
            report_date(TABLE, LogicalField::PublicationDate, &record, published, DOTTED_DATE)?;

        let row = table.push_row(CompositeKey::single(record.position() as i64));
        table.set_at(row, 0, record.get(applicant).clone());
        table.set_at(row, 1, record.get(title).clone());
        table.set_at(row, 2, record.get(application).clone());
        table.set_at(row, 3, CellValue::text(priority_date));
        table.set_at(row, 4, CellValue::text(publication_date));
        for &(source, target) in &country_targets {
            table.set_at(row, target, record.get(source).clone());
        }
    }

    Ok(table)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::builders::fixtures::{col, headers, patent, record_set};
    use engine::locate_dynamic_columns;

    fn run(records: &RecordSet) -> Result<MultiLevelTable, TableError> {
        let catalog = FieldCatalog::default();
        let dynamic = locate_dynamic_columns(records, &catalog);
        build(records, &catalog, &dynamic)
    }

    #[test]
    fn copies_fixed_block_and_countries() {
        let mut row = patent("RU", "RU", 2020.0, "A01");
        row[col("RU")] = CellValue::text("RU2700000");
        row[col("US")] = CellValue::Number(10123456.0);
        let table = run(&record_set(vec![row])).unwrap();

        assert_eq!(table.column_count(), 7);
        let cells = table.row_cells(0);
        assert_eq!(cells[0], CellValue::text("ACME Corp"));
        assert_eq!(cells[1], CellValue::text("Battery"));
        assert_eq!(cells[2], CellValue::Number(2019101.0));
        assert_eq!(cells[3], CellValue::text("15.04.2019"));
        assert_eq!(cells[4], CellValue::text("30.01.2020"));
        assert_eq!(cells[5], CellValue::text("RU2700000"));
        assert_eq!(cells[6], CellValue::Number(10123456.0));
    }

    #[test]
    fn header_has_blank_fixed_subs_and_country_codes() {
        let table = run(&record_set(vec![patent("RU", "RU", 2020.0, "A01")])).unwrap();
        let header = table.header();
        assert_eq!(header.levels(), 2);
        assert_eq!(header.keys()[0], ColumnKey::grouped(COL_OWNER, " "));
        assert_eq!(header.keys()[6].sub_label(), "US");

        let spans = header.group_spans();
        assert_eq!(spans.len(), 6);
        assert_eq!(spans[5].label, GROUP_COUNTRIES);
        assert_eq!((spans[5].start, spans[5].len), (5, 2));
        assert!(table.index_visible());
    }

    #[test]
    fn row_count_matches_record_count() {
        let rows = (0..4).map(|_| patent("RU", "RU", 2020.0, "A01")).collect();
        let set = record_set(rows);
        assert_eq!(run(&set).unwrap().row_count(), 4);
        assert_eq!(run(&record_set(Vec::new())).unwrap().row_count(), 0);
    }

    #[test]
    fn repeated_country_header_keeps_every_column() {
        let mut headers = headers();
        headers.push("RU".to_string());
        let mut row = patent("RU", "RU", 2020.0, "A01");
        row[col("RU")] = CellValue::text("RU111");
        row[col("US")] = CellValue::text("US222");
        row.push(CellValue::text("RU333"));
        let table = run(&RecordSet::new(headers, vec![row])).unwrap();

        assert_eq!(table.column_count(), 8);
        let cells = table.row_cells(0);
        assert_eq!(
            cells[5..].to_vec(),
            vec![CellValue::text("RU111"), CellValue::text("US222"), CellValue::text("RU333")]
        );
        let subs: Vec<String> = table.header().keys()[5..].iter().map(ColumnKey::sub_label).collect();
        assert_eq!(subs, vec!["RU", "US", "RU"]);
    }

    #[test]
    fn empty_country_cells_stay_empty() {
        let table = run(&record_set(vec![patent("RU", "RU", 2020.0, "A01")])).unwrap();
        assert_eq!(table.cell_at(0, 5), &CellValue::Empty);
    }

    #[test]
    fn missing_country_block_is_reported() {
        let set = record_set(vec![patent("RU", "RU", 2020.0, "A01")])
            .without_column("RU")
            .without_column("US");
        let err = run(&set).unwrap_err();
        assert!(matches!(err, TableError::MissingField { table: TableId::Geography66, .. }));
    }

    #[test]
    fn unreadable_priority_date_fails_the_table() {
        let mut row = patent("RU", "RU", 2020.0, "A01");
        row[col("Дата приоритета")] = CellValue::Boolean(true);
        assert!(run(&record_set(vec![row])).is_err());
    }
}
