//! FILENAME: core/engine/src/catalog.rs
//! PURPOSE: Maps logical patent fields to source columns.
//! CONTEXT: Source tables use fixed Russian-language headers. The catalog
//! holds those names in one configuration struct that is passed to every
//! report builder. Column groups that have no fixed name (the "other country"
//! publication columns after the marker, the block of two-letter country
//! columns) are discovered structurally by `locate_dynamic_columns`.

use std::fmt;
use std::ops::Range;
use std::path::Path;

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::record::RecordSet;

static COUNTRY_HEADER: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[A-Z]{2}$").unwrap());

// ============================================================================
// LOGICAL FIELDS
// ============================================================================

/// Fields the report builders read by name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum LogicalField {
    Applicant,
    GrantCountry,
    ApplicantCountry,
    ApplicationYear,
    Classifiers,
    FullId,
    ClassificationIndex,
    Inventor,
    ApplicationNumber,
    PriorityDate,
    PriorityDocuments,
    PublicationDate,
    InventionTitle,
    LegalStatus,
}

impl LogicalField {
    pub const ALL: [LogicalField; 14] = [
        LogicalField::Applicant,
        LogicalField::GrantCountry,
        LogicalField::ApplicantCountry,
        LogicalField::ApplicationYear,
        LogicalField::Classifiers,
        LogicalField::FullId,
        LogicalField::ClassificationIndex,
        LogicalField::Inventor,
        LogicalField::ApplicationNumber,
        LogicalField::PriorityDate,
        LogicalField::PriorityDocuments,
        LogicalField::PublicationDate,
        LogicalField::InventionTitle,
        LogicalField::LegalStatus,
    ];
}

impl fmt::Display for LogicalField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            LogicalField::Applicant => "applicant",
            LogicalField::GrantCountry => "grant country",
            LogicalField::ApplicantCountry => "applicant country",
            LogicalField::ApplicationYear => "application year",
            LogicalField::Classifiers => "classifier list",
            LogicalField::FullId => "composite id",
            LogicalField::ClassificationIndex => "classification index",
            LogicalField::Inventor => "inventor",
            LogicalField::ApplicationNumber => "application number",
            LogicalField::PriorityDate => "priority date",
            LogicalField::PriorityDocuments => "priority documents",
            LogicalField::PublicationDate => "publication date",
            LogicalField::InventionTitle => "invention title",
            LogicalField::LegalStatus => "legal-status info",
        };
        f.write_str(name)
    }
}

// ============================================================================
// FIELD CATALOG
// ============================================================================

#[derive(Error, Debug)]
pub enum CatalogError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid catalog: {0}")]
    Json(#[from] serde_json::Error),
}

/// Source column names for every logical field.
///
/// Any field left out of a JSON override keeps its default header.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FieldCatalog {
    pub applicant: String,
    pub grant_country: String,
    pub applicant_country: String,
    pub application_year: String,
    pub classifiers: String,
    pub full_id: String,
    pub classification_index: String,
    pub inventor: String,
    pub application_number: String,
    pub priority_date: String,
    pub priority_documents: String,
    pub publication_date: String,
    pub invention_title: String,
    pub legal_status: String,

    /// Column after which the "other country" publication columns start.
    pub marker_column: String,

    /// Running-number column dropped on load.
    pub row_number_column: String,
}

impl Default for FieldCatalog {
    fn default() -> Self {
        FieldCatalog {
            applicant: "Заявитель".to_string(),
            grant_country: "Страна выдачи".to_string(),
            applicant_country: "Страна заявитель".to_string(),
            application_year: "Год подачи заявки".to_string(),
            classifiers: "Классификатор(ы)".to_string(),
            full_id: "Full ID".to_string(),
            classification_index: "Классификационный индекс (IPC)".to_string(),
            inventor: "Изобретатель".to_string(),
            application_number: "Номер заявки".to_string(),
            priority_date: "Дата приоритета".to_string(),
            priority_documents: "Приоритетные документы".to_string(),
            publication_date: "Дата публикации".to_string(),
            invention_title: "Название".to_string(),
            legal_status: "Сведения о действии".to_string(),
            marker_column: "Tag".to_string(),
            row_number_column: "№".to_string(),
        }
    }
}

impl FieldCatalog {
    /// Loads a catalog override from a JSON file.
    pub fn from_json_file(path: &Path) -> Result<Self, CatalogError> {
        let text = std::fs::read_to_string(path)?;
        Ok(serde_json::from_str(&text)?)
    }

    /// Source header configured for a logical field.
    pub fn header(&self, field: LogicalField) -> &str {
        match field {
            LogicalField::Applicant => &self.applicant,
            LogicalField::GrantCountry => &self.grant_country,
            LogicalField::ApplicantCountry => &self.applicant_country,
            LogicalField::ApplicationYear => &self.application_year,
            LogicalField::Classifiers => &self.classifiers,
            LogicalField::FullId => &self.full_id,
            LogicalField::ClassificationIndex => &self.classification_index,
            LogicalField::Inventor => &self.inventor,
            LogicalField::ApplicationNumber => &self.application_number,
            LogicalField::PriorityDate => &self.priority_date,
            LogicalField::PriorityDocuments => &self.priority_documents,
            LogicalField::PublicationDate => &self.publication_date,
            LogicalField::InventionTitle => &self.invention_title,
            LogicalField::LegalStatus => &self.legal_status,
        }
    }

    /// Column position of a logical field in the given record set.
    pub fn resolve(&self, field: LogicalField, records: &RecordSet) -> Option<usize> {
        records.column_index(self.header(field))
    }

    /// Logical fields whose header is not present in the record set.
    pub fn missing_fields(&self, records: &RecordSet) -> Vec<LogicalField> {
        LogicalField::ALL
            .iter()
            .copied()
            .filter(|f| self.resolve(*f, records).is_none())
            .collect()
    }
}

// ============================================================================
// DYNAMIC COLUMN GROUPS
// ============================================================================

/// A contiguous run of source columns discovered by structure, not by name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnRange {
    range: Range<usize>,
}

impl ColumnRange {
    pub fn new(start: usize, end: usize) -> Self {
        ColumnRange { range: start..end.max(start) }
    }

    pub fn start(&self) -> usize {
        self.range.start
    }

    pub fn end(&self) -> usize {
        self.range.end
    }

    pub fn len(&self) -> usize {
        self.range.len()
    }

    pub fn is_empty(&self) -> bool {
        self.range.is_empty()
    }

    /// Column positions in source order.
    pub fn indices(&self) -> Range<usize> {
        self.range.clone()
    }

    /// Headers of the covered columns, in source order.
    pub fn headers<'a>(&self, records: &'a RecordSet) -> &'a [String] {
        let headers = records.headers();
        let end = self.range.end.min(headers.len());
        let start = self.range.start.min(end);
        &headers[start..end]
    }
}

/// Column groups located once per record set and handed to the builders.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DynamicColumns {
    /// Columns after the marker column up to the end of the table.
    pub other_publications: Option<ColumnRange>,

    /// Columns from the first two-uppercase-letter header to the end.
    pub country_block: Option<ColumnRange>,
}

/// Returns true for headers such as `RU` or `US`.
pub fn is_country_header(header: &str) -> bool {
    COUNTRY_HEADER.is_match(header)
}

/// Discovers the dynamic column groups of a record set.
pub fn locate_dynamic_columns(records: &RecordSet, catalog: &FieldCatalog) -> DynamicColumns {
    let headers = records.headers();
    let width = headers.len();

    let other_publications = records
        .column_index(&catalog.marker_column)
        .map(|marker| ColumnRange::new(marker + 1, width));

    let country_block = headers
        .iter()
        .position(|h| is_country_header(h))
        .map(|first| ColumnRange::new(first, width));

    DynamicColumns {
        other_publications,
        country_block,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cell::CellValue;
    use std::io::Write;

    fn headers(names: &[&str]) -> RecordSet {
        RecordSet::new(
            names.iter().map(|s| s.to_string()).collect(),
            vec![vec![CellValue::Empty; names.len()]],
        )
    }

    #[test]
    fn finds_columns_after_marker() {
        let set = headers(&["Full ID", "Tag", "EP", "WO"]);
        let dynamic = locate_dynamic_columns(&set, &FieldCatalog::default());
        let group = dynamic.other_publications.unwrap();
        assert_eq!(group.indices(), 2..4);
        assert_eq!(group.headers(&set), &["EP".to_string(), "WO".to_string()]);
    }

    #[test]
    fn marker_as_last_column_gives_empty_group() {
        let set = headers(&["Full ID", "Tag"]);
        let dynamic = locate_dynamic_columns(&set, &FieldCatalog::default());
        assert!(dynamic.other_publications.unwrap().is_empty());
    }

    #[test]
    fn country_block_starts_at_first_two_letter_header() {
        let set = headers(&["Заявитель", "Full ID", "Tag", "RU", "US", "Notes"]);
        let dynamic = locate_dynamic_columns(&set, &FieldCatalog::default());
        assert_eq!(dynamic.country_block.unwrap().indices(), 3..6);
    }

    #[test]
    fn two_letter_rule_is_strict() {
        assert!(is_country_header("RU"));
        assert!(!is_country_header("Ru"));
        assert!(!is_country_header("RUS"));
        assert!(!is_country_header("R1"));
    }

    #[test]
    fn missing_marker_and_countries_are_none() {
        let set = headers(&["Заявитель", "Название"]);
        let dynamic = locate_dynamic_columns(&set, &FieldCatalog::default());
        assert_eq!(dynamic, DynamicColumns::default());
    }

    #[test]
    fn json_override_keeps_defaults() {
        let catalog: FieldCatalog =
            serde_json::from_str(r#"{"applicant": "Applicant", "marker_column": "Marker"}"#).unwrap();
        assert_eq!(catalog.header(LogicalField::Applicant), "Applicant");
        assert_eq!(catalog.marker_column, "Marker");
        assert_eq!(catalog.header(LogicalField::GrantCountry), "Страна выдачи");
    }

    #[test]
    fn loads_catalog_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{"invention_title": "Title"}}"#).unwrap();
        let catalog = FieldCatalog::from_json_file(file.path()).unwrap();
        assert_eq!(catalog.header(LogicalField::InventionTitle), "Title");
    }

    #[test]
    fn reports_missing_fields() {
        let set = headers(&["Заявитель", "Название"]);
        let missing = FieldCatalog::default().missing_fields(&set);
        assert_eq!(missing.len(), 12);
        assert!(!missing.contains(&LogicalField::Applicant));
    }
}
