//! FILENAME: core/subtable-engine/src/builders/narrative.rs
//! Table 6.1 - patent documentation.
//!
//! One row per record, four synthesized text cells, no aggregation. Missing
//! values degrade to empty text inside a cell; only an unreadable date fails
//! the table.

use engine::{DynamicColumns, FieldCatalog, LogicalField, Record, RecordSet, CellValue, DASHED_DATE};

use super::{report_date, require, require_other_publications};
use crate::definition::narrative::*;
use crate::definition::TableId;
use crate::error::TableError;
use crate::key::CompositeKey;
use crate::table::{ColumnHeader, ColumnKey, MultiLevelTable};

const TABLE: TableId = TableId::Narrative61;

/// Resolved source columns for the narrative table.
struct Columns {
    full_id: usize,
    classification_index: usize,
    applicant: usize,
    grant_country: usize,
    inventor: usize,
    application_number: usize,
    priority_date: usize,
    priority_documents: usize,
    publication_date: usize,
    invention_title: usize,
    legal_status: usize,
}

impl Columns {
    fn resolve(catalog: &FieldCatalog, records: &RecordSet) -> Result<Self, TableError> {
        let field = |f| require(TABLE, f, catalog, records);
        Ok(Columns {
            full_id: field(LogicalField::FullId)?,
            classification_index: field(LogicalField::ClassificationIndex)?,
            applicant: field(LogicalField::Applicant)?,
            grant_country: field(LogicalField::GrantCountry)?,
            inventor: field(LogicalField::Inventor)?,
            application_number: field(LogicalField::ApplicationNumber)?,
            priority_date: field(LogicalField::PriorityDate)?,
            priority_documents: field(LogicalField::PriorityDocuments)?,
            publication_date: field(LogicalField::PublicationDate)?,
            invention_title: field(LogicalField::InventionTitle)?,
            legal_status: field(LogicalField::LegalStatus)?,
        })
    }
}

/// Builds table 6.1. Output rows follow input record order.
pub fn build(
    records: &RecordSet,
    catalog: &FieldCatalog,
    dynamic: &DynamicColumns,
) -> Result<MultiLevelTable, TableError> {
    let columns = Columns::resolve(catalog, records)?;
    let other = require_other_publications(TABLE, dynamic.other_publications.as_ref(), catalog)?;

    let header = ColumnHeader::new(
        [COL_DOCUMENT, COL_APPLICANT, COL_TITLE, COL_STATUS].map(ColumnKey::flat),
    );
    let mut table = MultiLevelTable::new(TABLE.to_string(), header, CellValue::Empty)
        .with_row_index(Vec::new(), false);

    for record in records.records() {
        let also_published: Vec<String> = other
            .indices()
            .map(|c| record.get(c))
            .filter(|v| !v.is_empty())
            .map(CellValue::display)
            .collect();

        let document = format!(
            "{}{}{}{}{}",
            reformat_full_id(&record.text(columns.full_id)),
            LABEL_IPC,
            split_classification_index(&record.text(columns.classification_index)),
            LABEL_ALSO_PUBLISHED,
            also_published.join(",\n"),
        );

        let row = table.push_row(CompositeKey::single(record.position() as i64));
        table.set_at(row, 0, CellValue::Text(document));
        table.set_at(row, 1, CellValue::Text(applicant_block(&columns, &record)?));
        table.set_at(row, 2, CellValue::Text(record.text(columns.invention_title)));
        table.set_at(row, 3, CellValue::Text(record.text(columns.legal_status)));
    }

    Ok(table)
}

/// Cell 2: applicant, country, inventors, application and dates.
fn applicant_block(columns: &Columns, record: &Record<'_>) -> Result<String, TableError> {
    let priority = report_date(TABLE, LogicalField::PriorityDate, record, columns.priority_date, DASHED_DATE)?;
    let published = report_date(
        TABLE,
        LogicalField::PublicationDate,
        record,
        columns.publication_date,
        DASHED_DATE,
    )?;

    let mut text = String::new();
    text.push_str(LABEL_APPLICANTS);
    text.push_str(&record.text(columns.applicant));
    text.push_str("; ");
    text.push_str(&record.text(columns.grant_country));
    text.push_str(LABEL_INVENTORS);
    text.push_str(&record.text(columns.inventor));
    text.push_str(LABEL_APPLICATION);
    text.push_str(&record.text(columns.application_number));
    text.push_str(LABEL_PRIORITY_DATE);
    text.push_str(&priority);
    text.push_str(LABEL_PRIORITY_DOCS);
    text.push_str(&record.text(columns.priority_documents));
    text.push_str(LABEL_PUBLISHED);
    text.push_str(&published);
    Ok(text)
}

/// `RU-1234-A1` becomes `RU-1234 (A1)`. Ids with fewer than three
/// components are returned unchanged.
pub fn reformat_full_id(full_id: &str) -> String {
    let parts: Vec<&str> = full_id.split('-').collect();
    if parts.len() < 3 {
        return full_id.to_string();
    }
    format!("{}-{} ({})", parts[0], parts[1], parts[2])
}

/// Puts each `;`-separated classification index on its own line.
pub fn split_classification_index(index: &str) -> String {
    index.split(';').collect::<Vec<_>>().join(";\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::builders::fixtures::{col, patent, record_set};
    use engine::locate_dynamic_columns;

    fn run(records: &RecordSet) -> Result<MultiLevelTable, TableError> {
        let catalog = FieldCatalog::default();
        let dynamic = locate_dynamic_columns(records, &catalog);
        build(records, &catalog, &dynamic)
    }

    fn cell(table: &MultiLevelTable, row: usize, col: usize) -> String {
        table.cell_at(row, col).display()
    }

    #[test]
    fn first_cell_starts_with_reformatted_id() {
        let set = record_set(vec![patent("RU", "RU", 2020.0, "A01")]);
        let table = run(&set).unwrap();
        assert!(cell(&table, 0, 0).starts_with("RU-1234 (A1)"));
        assert!(cell(&table, 0, 0).contains("\nМПК: H01M 10/00;\nH01M 4/00"));
    }

    #[test]
    fn lists_only_non_empty_other_publications() {
        let mut row = patent("RU", "RU", 2020.0, "A01");
        row[col("US")] = CellValue::text("US2020123");
        let mut second = patent("RU", "RU", 2020.0, "A01");
        second[col("RU")] = CellValue::text("RU111");
        second[col("US")] = CellValue::text("US222");
        let table = run(&record_set(vec![row, second])).unwrap();

        assert!(cell(&table, 0, 0).ends_with("Также опубликовано, как: US2020123"));
        assert!(cell(&table, 1, 0).ends_with("Также опубликовано, как: RU111,\nUS222"));
    }

    #[test]
    fn applicant_block_uses_dashed_dates() {
        let set = record_set(vec![patent("RU", "DE", 2020.0, "A01")]);
        let table = run(&set).unwrap();
        let expected = "Заявитель(и ); страна: ACME Corp; DE. \nИзобретатель(и): Ivanov I.\
                        \nЗаявка: 2019101\nДата приоритета: 15-04-2019\
                        \nПриоритетные документы:\nRU2019101\nОпубликовано: 30-01-2020";
        assert_eq!(cell(&table, 0, 1), expected);
        assert_eq!(cell(&table, 0, 2), "Battery");
        assert_eq!(cell(&table, 0, 3), "Active");
    }

    #[test]
    fn malformed_id_and_missing_values_degrade_per_cell() {
        let mut row = patent("RU", "RU", 2020.0, "A01");
        row[col("Full ID")] = CellValue::text("RU1234");
        row[col("Изобретатель")] = CellValue::Empty;
        row[col("Дата приоритета")] = CellValue::Empty;
        let table = run(&record_set(vec![row])).unwrap();

        assert!(cell(&table, 0, 0).starts_with("RU1234\nМПК: "));
        assert!(cell(&table, 0, 1).contains("Изобретатель(и): \nЗаявка"));
        assert!(cell(&table, 0, 1).contains("Дата приоритета: \nПриоритетные"));
    }

    #[test]
    fn unreadable_date_fails_the_table() {
        let mut row = patent("RU", "RU", 2020.0, "A01");
        row[col("Дата публикации")] = CellValue::text("someday");
        let err = run(&record_set(vec![patent("RU", "RU", 2020.0, "A01"), row])).unwrap_err();
        match err {
            TableError::MalformedValue { table, row, value, .. } => {
                assert_eq!(table, TableId::Narrative61);
                assert_eq!(row, 1);
                assert_eq!(value, "someday");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn row_count_matches_record_count() {
        let rows = (0..5).map(|_| patent("RU", "US", 2019.0, "B02")).collect();
        let set = record_set(rows);
        let table = run(&set).unwrap();
        assert_eq!(table.row_count(), set.len());
        assert!(!table.index_visible());

        let empty = record_set(Vec::new());
        assert_eq!(run(&empty).unwrap().row_count(), 0);
    }

    #[test]
    fn missing_marker_is_reported() {
        let set = record_set(vec![patent("RU", "RU", 2020.0, "A01")]).without_column("Tag");
        let err = run(&set).unwrap_err();
        assert!(matches!(err, TableError::MissingField { ref header, .. } if header == "Tag"));
    }

    #[test]
    fn missing_field_names_the_column() {
        let set = record_set(vec![patent("RU", "RU", 2020.0, "A01")]).without_column("Название");
        let err = run(&set).unwrap_err();
        assert_eq!(
            err.to_string(),
            "table 6.1: required field 'invention title' (column 'Название') is missing"
        );
    }
}
