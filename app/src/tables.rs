//! FILENAME: app/src/tables.rs
// PURPOSE: Load a record set, build the requested report tables and export them.
// CONTEXT: Each table is built and exported on its own; a failure is logged
// and recorded in the report while the remaining tables are still written.

use crate::{log_debug, log_enter, log_enter_info, log_error, log_exit, log_exit_info, log_info, log_warn};
use engine::{locate_dynamic_columns, FieldCatalog, RecordSet};
use persistence::{export_table, load_records, OutputFormat};
use std::path::{Path, PathBuf};
use subtable_engine::{generate, TableId};

/// Everything one generation run needs.
#[derive(Debug, Clone)]
pub struct GenerateRequest {
    pub input: PathBuf,
    pub out_dir: PathBuf,
    pub format: OutputFormat,
    pub catalog: FieldCatalog,
    pub tables: Vec<TableId>,
}

/// What happened to one table.
#[derive(Debug, Clone, PartialEq)]
pub struct TableOutcome {
    pub id: TableId,
    pub result: Result<PathBuf, String>,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct GenerationReport {
    pub outcomes: Vec<TableOutcome>,
}

impl GenerationReport {
    /// True when every requested table was written.
    pub fn is_success(&self) -> bool {
        self.outcomes.iter().all(|o| o.result.is_ok())
    }

    pub fn written(&self) -> Vec<&Path> {
        self.outcomes
            .iter()
            .filter_map(|o| o.result.as_ref().ok().map(PathBuf::as_path))
            .collect()
    }

    pub fn failures(&self) -> Vec<(TableId, &str)> {
        self.outcomes
            .iter()
            .filter_map(|o| o.result.as_ref().err().map(|e| (o.id, e.as_str())))
            .collect()
    }
}

/// Loads the input file and runs [`generate_tables`] on it.
pub fn run_generation(request: &GenerateRequest) -> Result<GenerationReport, String> {
    log_enter_info!("GEN", "run_generation", "input={:?} format={}", request.input, request.format);

    let records = load_records(&request.input, &request.catalog).map_err(|e| {
        log_error!("GEN", "failed to load {:?}: {}", request.input, e);
        e.to_string()
    })?;
    log_info!("GEN", "loaded {} records, {} columns", records.len(), records.headers().len());

    let missing = request.catalog.missing_fields(&records);
    if !missing.is_empty() {
        let names: Vec<String> = missing.iter().map(|f| f.to_string()).collect();
        log_warn!("GEN", "fields not present in the input: {}", names.join(", "));
    }

    let report = generate_tables(&records, request);
    log_exit_info!(
        "GEN",
        "run_generation",
        "written={} failed={}",
        report.written().len(),
        report.failures().len()
    );
    Ok(report)
}

/// Builds and exports every requested table of an already loaded record set.
pub fn generate_tables(records: &RecordSet, request: &GenerateRequest) -> GenerationReport {
    log_enter!("GEN", "generate_tables", "tables={}", request.tables.len());
    let dynamic = locate_dynamic_columns(records, &request.catalog);
    log_debug!(
        "GEN",
        "other publications={:?} country block={:?}",
        dynamic.other_publications.as_ref().map(|r| r.indices()),
        dynamic.country_block.as_ref().map(|r| r.indices())
    );
    let mut report = GenerationReport::default();

    for &id in &request.tables {
        let result = generate(id, records, &request.catalog, &dynamic)
            .map_err(|e| e.to_string())
            .and_then(|table| {
                log_info!(
                    "GEN",
                    "table {} built: {} rows x {} columns",
                    id,
                    table.row_count(),
                    table.column_count()
                );
                export_table(id, &table, &request.out_dir, request.format).map_err(|e| e.to_string())
            });

        match &result {
            Ok(path) => log_info!("GEN", "table {} written to {:?}", id, path),
            Err(e) => log_error!("GEN", "table {} failed: {}", id, e),
        }
        report.outcomes.push(TableOutcome { id, result });
    }

    log_exit!("GEN", "generate_tables", "failed={}", report.failures().len());
    report
}
