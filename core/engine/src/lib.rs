//! FILENAME: core/engine/src/lib.rs
//! PURPOSE: Main library entry point for the patent record model.
//! CONTEXT: Re-exports public types and modules for use by the table
//! generator, the persistence layer and the summary tool.

pub mod catalog;
pub mod cell;
pub mod dates;
pub mod record;

// Re-export commonly used types at the crate root
pub use catalog::{
    is_country_header, locate_dynamic_columns, CatalogError, ColumnRange, DynamicColumns,
    FieldCatalog, LogicalField,
};
pub use cell::{format_number, CellValue};
pub use dates::{format_date, from_excel_serial, parse_date, DateParseError, DASHED_DATE, DOTTED_DATE};
pub use record::{Record, RecordSet};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn resolves_fields_against_loaded_headers() {
        let catalog = FieldCatalog::default();
        let set = RecordSet::new(
            vec![
                catalog.applicant.clone(),
                catalog.marker_column.clone(),
                "RU".to_string(),
            ],
            vec![vec![CellValue::text("ACME"), CellValue::Empty, CellValue::text("RU1")]],
        );

        assert_eq!(catalog.resolve(LogicalField::Applicant, &set), Some(0));
        assert_eq!(catalog.resolve(LogicalField::Inventor, &set), None);

        let dynamic = locate_dynamic_columns(&set, &catalog);
        assert_eq!(dynamic.other_publications.map(|r| r.indices()), Some(2..3));
        assert_eq!(dynamic.country_block.map(|r| r.indices()), Some(2..3));
    }
}
