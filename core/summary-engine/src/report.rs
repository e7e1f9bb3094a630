//! FILENAME: core/summary-engine/src/report.rs
//! Text rendering of summary breakdowns and the per-mode driver.

use engine::RecordSet;
use std::path::{Path, PathBuf};

use crate::config::{SummaryConfig, SummaryMode};
use crate::error::SummaryError;
use crate::shares::{category_shares, year_distribution, CategoryShares};

/// Header of the count column in text reports.
pub const COUNT_HEADER: &str = "Количество";

/// Renders a two-column, left-aligned text table.
fn render_columns(left_header: &str, rows: &[(String, String)]) -> String {
    let width = rows
        .iter()
        .map(|(label, _)| label.chars().count())
        .chain(std::iter::once(left_header.chars().count()))
        .max()
        .unwrap_or(0);

    let mut out = String::new();
    let mut push_line = |left: &str, right: &str| {
        let pad = width - left.chars().count();
        out.push_str(left);
        out.push_str(&" ".repeat(pad + 2));
        out.push_str(right);
        out.push('\n');
    };
    push_line(left_header, COUNT_HEADER);
    for (label, count) in rows {
        push_line(label, count);
    }
    out
}

pub fn render_shares(shares: &CategoryShares) -> String {
    let rows: Vec<(String, String)> = shares
        .entries
        .iter()
        .map(|e| (e.label.clone(), e.count.to_string()))
        .collect();
    render_columns(&shares.column, &rows)
}

pub fn render_years(column: &str, years: &[(i64, u64)]) -> String {
    let rows: Vec<(String, String)> = years
        .iter()
        .map(|(year, count)| (year.to_string(), count.to_string()))
        .collect();
    render_columns(column, &rows)
}

/// Writes `<prefix><file_name>` into `dir`.
pub fn write_report(dir: &Path, prefix: &str, file_name: &str, text: &str) -> Result<PathBuf, SummaryError> {
    let path = dir.join(format!("{}{}", prefix, file_name));
    std::fs::write(&path, text)?;
    Ok(path)
}

/// Runs every section of a mode plus the year distribution and returns
/// the written files in order.
pub fn run_summary(
    records: &RecordSet,
    config: &SummaryConfig,
    mode: SummaryMode,
    dir: &Path,
    prefix: &str,
) -> Result<Vec<PathBuf>, SummaryError> {
    let mut written = Vec::new();

    for section in mode.sections() {
        let settings = config.section(section.setting)?;
        let shares = category_shares(
            records,
            &settings.column_name,
            settings.units_limit,
            settings.percent_limit,
        )?;
        written.push(write_report(dir, prefix, section.output, &render_shares(&shares))?);
    }

    let years = year_distribution(records, mode.year_column())?;
    written.push(write_report(
        dir,
        prefix,
        mode.year_output(),
        &render_years(mode.year_column(), &years),
    )?);

    Ok(written)
}
