//! FILENAME: core/summary-engine/src/shares.rs
//! Share breakdowns of multi-valued categorical columns.
//!
//! Cells may hold several `"; "`-separated items (co-applicants, several
//! classifiers). Every item is counted once per occurrence. When a column
//! has more distinct items than the configured limit, the least frequent
//! items are folded into a trailing `Other` bucket while their combined
//! count stays within the configured share of the total.

use engine::{CellValue, RecordSet};
use rustc_hash::FxHashMap;

use crate::error::SummaryError;

/// Label of the folded tail bucket.
pub const OTHER_LABEL: &str = "Other";

/// Separator between items of one cell.
pub const ITEM_SEPARATOR: &str = "; ";

/// One row of a breakdown.
#[derive(Debug, Clone, PartialEq)]
pub struct ShareEntry {
    pub label: String,
    pub count: u64,
}

/// Item counts of one column, most frequent first.
#[derive(Debug, Clone, PartialEq)]
pub struct CategoryShares {
    pub column: String,
    pub entries: Vec<ShareEntry>,
}

impl CategoryShares {
    /// Sum of all counts, the `Other` bucket included.
    pub fn total(&self) -> u64 {
        self.entries.iter().map(|e| e.count).sum()
    }

    /// Percentage of the total held by an entry.
    pub fn percent(&self, entry: &ShareEntry) -> f64 {
        let total = self.total();
        if total == 0 {
            0.0
        } else {
            entry.count as f64 * 100.0 / total as f64
        }
    }
}

/// Counts the items of a column and applies the `Other` folding rule.
///
/// Ties keep first-seen order.
pub fn category_shares(
    records: &RecordSet,
    column: &str,
    units_limit: usize,
    percent_limit: f64,
) -> Result<CategoryShares, SummaryError> {
    let col = records
        .column_index(column)
        .ok_or_else(|| SummaryError::MissingColumn(column.to_string()))?;

    let mut slots: FxHashMap<String, usize> = FxHashMap::default();
    let mut entries: Vec<ShareEntry> = Vec::new();
    for record in records.records() {
        let text = record.text(col);
        for item in text.split(ITEM_SEPARATOR).filter(|s| !s.is_empty()) {
            match slots.get(item) {
                Some(&slot) => entries[slot].count += 1,
                None => {
                    slots.insert(item.to_string(), entries.len());
                    entries.push(ShareEntry {
                        label: item.to_string(),
                        count: 1,
                    });
                }
            }
        }
    }
    // stable: equal counts stay in first-seen order
    entries.sort_by(|a, b| b.count.cmp(&a.count));

    if entries.len() > units_limit {
        fold_tail(&mut entries, percent_limit);
    }

    Ok(CategoryShares {
        column: column.to_string(),
        entries,
    })
}

/// Folds the longest least-frequent tail whose running sum stays within
/// `percent_limit` of the total into a trailing `Other` entry.
fn fold_tail(entries: &mut Vec<ShareEntry>, percent_limit: f64) {
    let total: u64 = entries.iter().map(|e| e.count).sum();
    let budget = percent_limit * total as f64;

    let mut running = 0u64;
    let mut other = 0u64;
    let mut folded = 0usize;
    for entry in entries.iter().rev() {
        running += entry.count;
        if running as f64 > budget {
            break;
        }
        other = running;
        folded += 1;
    }

    entries.truncate(entries.len() - folded);
    entries.push(ShareEntry {
        label: OTHER_LABEL.to_string(),
        count: other,
    });
}

/// Number of records per year, ascending. Blank cells are skipped.
pub fn year_distribution(records: &RecordSet, column: &str) -> Result<Vec<(i64, u64)>, SummaryError> {
    let col = records
        .column_index(column)
        .ok_or_else(|| SummaryError::MissingColumn(column.to_string()))?;

    let mut counts: FxHashMap<i64, u64> = FxHashMap::default();
    for record in records.records() {
        let value = record.get(col);
        if value.is_empty() {
            continue;
        }
        let year = year_of(value).ok_or_else(|| SummaryError::MalformedYear {
            column: column.to_string(),
            row: record.position(),
            value: value.display(),
        })?;
        *counts.entry(year).or_insert(0) += 1;
    }

    let mut years: Vec<(i64, u64)> = counts.into_iter().collect();
    years.sort_unstable_by_key(|(year, _)| *year);
    Ok(years)
}

fn year_of(value: &CellValue) -> Option<i64> {
    match value {
        CellValue::Number(n) if n.is_finite() => Some(n.trunc() as i64),
        CellValue::Text(s) => s.trim().parse::<f64>().ok().filter(|n| n.is_finite()).map(|n| n.trunc() as i64),
        _ => None,
    }
}
