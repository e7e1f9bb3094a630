//! FILENAME: app/src/cli.rs
// PURPOSE: Command-line surfaces of the two tools.

use clap::Parser;
use persistence::{InputFormat, OutputFormat};
use std::path::{Path, PathBuf};
use subtable_engine::TableId;
use summary_engine::SummaryMode;

/// Printed when the input or output format is not supported.
pub const UNSUPPORTED_FORMATS: &str = "Script works with XLSX, CSV and ODS formats only";

/// Generates the 6.1, 6.4, 6.5 and 6.6 report tables from a patent list.
#[derive(Parser, Debug)]
#[command(name = "subtablegen")]
#[command(about = "Script generates subtables")]
pub struct TablesCli {
    /// Path to the source XLSX, ODS or CSV file
    pub pathtofile: PathBuf,

    /// Output files' format (xlsx or csv); defaults to the input format
    #[arg(short = 'o', long = "outformat")]
    pub outformat: Option<String>,

    /// Directory the OUT<nn> files are written to
    #[arg(long, default_value = ".")]
    pub out_dir: PathBuf,

    /// JSON file overriding source column names
    #[arg(long)]
    pub catalog: Option<PathBuf>,

    /// Generate only these tables (61, 64, 65, 66); repeatable
    #[arg(long = "table", value_parser = parse_table_id)]
    pub tables: Vec<TableId>,

    /// Also write log lines to this file
    #[arg(long)]
    pub log_file: Option<PathBuf>,

    /// Echo debug log lines to the console
    #[arg(short, long)]
    pub verbose: bool,
}

impl TablesCli {
    /// Requested tables, or all of them.
    pub fn selected_tables(&self) -> Vec<TableId> {
        if self.tables.is_empty() {
            TableId::ALL.to_vec()
        } else {
            self.tables.clone()
        }
    }
}

/// Summarizes categorical columns of a patent or paper list.
#[derive(Parser, Debug)]
#[command(name = "patent-summary")]
pub struct SummaryCli {
    /// Path to XLSX input file
    pub path_to_file: PathBuf,

    /// Program mode
    #[arg(long, default_value = "patents", value_parser = parse_mode)]
    pub mode: SummaryMode,

    /// Prefix for generated files
    #[arg(long, default_value = "")]
    pub prefix: String,

    /// Path to JSON config
    #[arg(long, default_value = "config.json")]
    pub config: PathBuf,

    /// Directory the reports are written to
    #[arg(long, default_value = ".")]
    pub out_dir: PathBuf,

    /// Also write log lines to this file
    #[arg(long)]
    pub log_file: Option<PathBuf>,
}

fn parse_table_id(s: &str) -> Result<TableId, String> {
    s.parse()
}

fn parse_mode(s: &str) -> Result<SummaryMode, String> {
    s.parse()
}

/// Resolves input and output formats. ODS and XLS inputs default to XLSX
/// output since spreadsheets are only written as XLSX.
pub fn resolve_formats(input: &Path, outformat: Option<&str>) -> Result<(InputFormat, OutputFormat), String> {
    let input_format = InputFormat::from_path(input).map_err(|_| UNSUPPORTED_FORMATS.to_string())?;
    let output_format = match outformat {
        Some(requested) => requested
            .parse::<OutputFormat>()
            .map_err(|_| UNSUPPORTED_FORMATS.to_string())?,
        None => OutputFormat::default_for(input_format),
    };
    Ok((input_format, output_format))
}
