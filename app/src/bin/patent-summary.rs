//! FILENAME: app/src/bin/patent-summary.rs
// PURPOSE: patent-summary entry point.

use anyhow::{anyhow, bail, Result};
use app_lib::{init_log_file, run_summary_files, SummaryCli};
use clap::Parser;
use persistence::InputFormat;

fn main() -> Result<()> {
    let cli = SummaryCli::parse();
    if let Some(path) = &cli.log_file {
        init_log_file(path).map_err(|e| anyhow!(e))?;
    }

    if !cli.path_to_file.is_file() {
        bail!("cannot open {}", cli.path_to_file.display());
    }
    match InputFormat::from_path(&cli.path_to_file) {
        Ok(InputFormat::Xlsx | InputFormat::Ods | InputFormat::Xls) => {}
        _ => bail!("unsupported input format: {} (use XLSX, ODS or XLS)", cli.path_to_file.display()),
    }

    let written = run_summary_files(&cli.path_to_file, &cli.config, cli.mode, &cli.out_dir, &cli.prefix)
        .map_err(|e| anyhow!(e))?;
    for path in written {
        println!("{}", path.display());
    }
    println!("{} analysis finished", cli.mode);
    Ok(())
}
