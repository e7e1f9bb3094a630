//! FILENAME: core/subtable-engine/src/builders/classifier_years.rs
//! Table 6.4 - published documents per classifier, applicant country and
//! application year.
//!
//! Algorithm:
//! 1. Read every record's application year; the year axis is the ascending
//!    set of distinct years.
//! 2. Split classifier cells on `.` into tokens, de-duplicated across the
//!    record set in first-seen order.
//! 3. A record counts toward a token when the token occurs anywhere in its
//!    raw classifier string (substring containment, so `A1` also matches a
//!    record filed under `A12`).
//! 4. Count `(token, applicant country, year)`; rows are the observed
//!    `(token, country)` pairs, grouped by token.
//! 5. Drop rows that are zero across every year column.

use chrono::Datelike;
use engine::{CellValue, DynamicColumns, FieldCatalog, LogicalField, RecordSet};

use super::{require, require_other_publications};
use crate::aggregate::{aggregate, DistinctValues};
use crate::definition::classifier_years::*;
use crate::definition::TableId;
use crate::error::TableError;
use crate::key::{CompositeKey, KeyValue};
use crate::table::{ColumnHeader, ColumnKey, MultiLevelTable};

const TABLE: TableId = TableId::ClassifierYears64;

/// Builds table 6.4.
pub fn build(
    records: &RecordSet,
    catalog: &FieldCatalog,
    dynamic: &DynamicColumns,
) -> Result<MultiLevelTable, TableError> {
    let country_col = require(TABLE, LogicalField::ApplicantCountry, catalog, records)?;
    let classifier_col = require(TABLE, LogicalField::Classifiers, catalog, records)?;
    let year_col = require(TABLE, LogicalField::ApplicationYear, catalog, records)?;
    // The "other country" columns are not counted here but must exist.
    require_other_publications(TABLE, dynamic.other_publications.as_ref(), catalog)?;

    let mut years = Vec::with_capacity(records.len());
    for record in records.records() {
        let value = record.get(year_col);
        let year = application_year(value).ok_or_else(|| TableError::MalformedValue {
            table: TABLE,
            field: LogicalField::ApplicationYear.to_string(),
            row: record.position(),
            value: value.display(),
            reason: "not an integer year".to_string(),
        })?;
        years.push(year);
    }
    let mut year_axis = years.clone();
    year_axis.sort_unstable();
    year_axis.dedup();

    let tokens: DistinctValues<String> = records
        .records()
        .flat_map(|r| classifier_tokens(&r.text(classifier_col)))
        .collect();

    let counts = aggregate(records, |record| {
        let raw = record.text(classifier_col);
        let country = KeyValue::from(record.get(country_col));
        let year = KeyValue::from(years[record.position()]);
        tokens
            .iter()
            .filter(|token| raw.contains(token.as_str()))
            .map(|token| CompositeKey::new([KeyValue::text(token.as_str()), country.clone(), year.clone()]))
            .collect::<Vec<_>>()
    });

    // Observed (token, country) pairs, token-major, countries first-seen.
    let mut row_keys = counts
        .keys()
        .map(|key| key.prefix(2))
        .collect::<DistinctValues<_>>()
        .into_vec();
    row_keys.sort_by_key(|key| token_position(&tokens, key));

    let header = ColumnHeader::new(year_axis.iter().map(|&y| ColumnKey::grouped(GROUP_YEARS, y)));
    let mut table = MultiLevelTable::new(TABLE.to_string(), header, CellValue::Number(0.0))
        .with_row_index(vec![INDEX_OBJECT.to_string(), INDEX_COUNTRY.to_string()], true);

    for key in row_keys {
        table.push_row(key);
    }
    for (key, count) in counts.iter() {
        let year = key.part(2).cloned().unwrap_or(KeyValue::Empty);
        let column = ColumnKey::Grouped {
            group: GROUP_YEARS.to_string(),
            sub: year,
        };
        table.set(&key.prefix(2), &column, CellValue::Number(count as f64))?;
    }

    let width = table.column_count();
    table.drop_all_zero_rows(0..width);
    Ok(table)
}

/// Splits a classifier cell on `.`, skipping blank pieces.
pub fn classifier_tokens(raw: &str) -> Vec<String> {
    raw.split('.')
        .filter(|t| !t.trim().is_empty())
        .map(str::to_string)
        .collect()
}

/// Integer year of a cell: whole numbers, numeric text or a date.
fn application_year(value: &CellValue) -> Option<i64> {
    match value {
        CellValue::Number(n) if n.is_finite() => Some(n.trunc() as i64),
        CellValue::Text(s) => {
            let s = s.trim();
            s.parse::<i64>().ok().or_else(|| {
                s.parse::<f64>()
                    .ok()
                    .filter(|n| n.is_finite())
                    .map(|n| n.trunc() as i64)
            })
        }
        CellValue::Date(dt) => Some(dt.year() as i64),
        _ => None,
    }
}

fn token_position(tokens: &DistinctValues<String>, key: &CompositeKey) -> usize {
    match key.part(0) {
        Some(KeyValue::Text(token)) => tokens.position(token).unwrap_or(usize::MAX),
        _ => usize::MAX,
    }
}
