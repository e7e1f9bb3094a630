//! FILENAME: core/summary-engine/src/lib.rs
//! Summary Engine - share breakdowns of a patent or paper record set.
//!
//! Architecture:
//! - config.rs: JSON section settings and summary modes
//! - shares.rs: item counting with `Other` folding, year distribution
//! - report.rs: aligned text output and the per-mode driver

pub mod config;
pub mod error;
pub mod report;
pub mod shares;

pub use config::{CategorySettings, SummaryConfig, SummaryMode, SummarySection};
pub use error::SummaryError;
pub use report::{render_shares, render_years, run_summary, write_report};
pub use shares::{category_shares, year_distribution, CategoryShares, ShareEntry, OTHER_LABEL};
