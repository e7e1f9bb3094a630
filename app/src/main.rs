//! FILENAME: app/src/main.rs
// PURPOSE: subtablegen entry point.
// FORMAT: seq|level|category|message

use anyhow::{anyhow, Context, Result};
use app_lib::{init_log_file, resolve_formats, run_generation, set_verbose, GenerateRequest, TablesCli};
use clap::Parser;
use engine::FieldCatalog;
use std::process::ExitCode;

fn main() -> ExitCode {
    match run() {
        Ok(code) => code,
        Err(e) => {
            eprintln!("Error: {:#}", e);
            ExitCode::FAILURE
        }
    }
}

fn run() -> Result<ExitCode> {
    let cli = TablesCli::parse();
    set_verbose(cli.verbose);
    if let Some(path) = &cli.log_file {
        init_log_file(path).map_err(|e| anyhow!(e))?;
    }

    let (_, format) = match resolve_formats(&cli.pathtofile, cli.outformat.as_deref()) {
        Ok(formats) => formats,
        Err(message) => {
            println!("{}", message);
            return Ok(ExitCode::from(2));
        }
    };

    let catalog = match &cli.catalog {
        Some(path) => FieldCatalog::from_json_file(path)
            .with_context(|| format!("reading catalog {}", path.display()))?,
        None => FieldCatalog::default(),
    };

    let request = GenerateRequest {
        input: cli.pathtofile.clone(),
        out_dir: cli.out_dir.clone(),
        format,
        catalog,
        tables: cli.selected_tables(),
    };
    let report = run_generation(&request).map_err(|e| anyhow!(e))?;

    for path in report.written() {
        println!("{}", path.display());
    }
    if report.is_success() {
        Ok(ExitCode::SUCCESS)
    } else {
        for (id, error) in report.failures() {
            eprintln!("table {}: {}", id, error);
        }
        Ok(ExitCode::FAILURE)
    }
}
