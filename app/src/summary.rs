//! FILENAME: app/src/summary.rs
// PURPOSE: Report summary workflow behind the patent-summary binary.

use crate::{log_enter_info, log_error, log_exit_info};
use engine::FieldCatalog;
use persistence::load_records;
use std::path::{Path, PathBuf};
use summary_engine::{run_summary, SummaryConfig, SummaryMode};

/// Loads the input and config, writes every breakdown of the mode.
pub fn run_summary_files(
    input: &Path,
    config_path: &Path,
    mode: SummaryMode,
    out_dir: &Path,
    prefix: &str,
) -> Result<Vec<PathBuf>, String> {
    log_enter_info!("SUM", "run_summary_files", "input={:?} mode={}", input, mode);

    let config = SummaryConfig::from_json_file(config_path).map_err(|e| {
        log_error!("SUM", "config {:?}: {}", config_path, e);
        e.to_string()
    })?;
    let records = load_records(input, &FieldCatalog::default()).map_err(|e| e.to_string())?;

    let written = run_summary(&records, &config, mode, out_dir, prefix).map_err(|e| {
        log_error!("SUM", "{}", e);
        e.to_string()
    })?;

    log_exit_info!("SUM", "run_summary_files", "{} files", written.len());
    Ok(written)
}
