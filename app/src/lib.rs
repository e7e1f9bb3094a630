//! FILENAME: app/src/lib.rs
// PURPOSE: Library side of the command-line tools, shared by both binaries
// and the integration tests.

pub mod cli;
pub mod logging;
pub mod summary;
pub mod tables;

pub use cli::{resolve_formats, SummaryCli, TablesCli, UNSUPPORTED_FORMATS};
pub use logging::{init_log_file, next_seq, set_verbose, write_log};
pub use summary::run_summary_files;
pub use tables::{generate_tables, run_generation, GenerateRequest, GenerationReport, TableOutcome};
