//! FILENAME: core/summary-engine/src/config.rs
//! PURPOSE: JSON configuration of the report summary.
//! CONTEXT: The config file maps section names (`grant_countries_settings`,
//! `organizations_settings`, ...) to the column they summarize and the
//! bucketing limits applied to it. Which sections are read depends on the
//! summary mode.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::path::Path;
use std::str::FromStr;

use crate::error::SummaryError;

/// Settings of one summarized column.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategorySettings {
    pub column_name: String,
    #[serde(default)]
    pub diagram_title: String,
    #[serde(default)]
    pub file_name: String,
    /// Distinct-value count above which the tail is folded into `Other`.
    pub units_limit: usize,
    /// Share of the total the folded tail may hold (0.0 - 1.0).
    pub percent_limit: f64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SummaryConfig {
    sections: BTreeMap<String, CategorySettings>,
}

impl SummaryConfig {
    pub fn from_json_str(text: &str) -> Result<Self, SummaryError> {
        Ok(serde_json::from_str(text)?)
    }

    pub fn from_json_file(path: &Path) -> Result<Self, SummaryError> {
        let text = std::fs::read_to_string(path)?;
        Self::from_json_str(&text)
    }

    pub fn section(&self, name: &str) -> Result<&CategorySettings, SummaryError> {
        self.sections
            .get(name)
            .ok_or_else(|| SummaryError::MissingSetting(name.to_string()))
    }
}

// ============================================================================
// MODES
// ============================================================================

/// What kind of records are being summarized.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SummaryMode {
    #[default]
    Patents,
    Papers,
}

/// One config section and the text file its breakdown is written to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SummarySection {
    pub setting: &'static str,
    pub output: &'static str,
}

const PATENT_SECTIONS: &[SummarySection] = &[
    SummarySection { setting: "grant_countries_settings", output: "patents_granting_countries.txt" },
    SummarySection { setting: "apply_countries_settings", output: "patents_applying_countries.txt" },
    SummarySection { setting: "appliers_settings", output: "patents_appliers.txt" },
    SummarySection { setting: "classificator_settings", output: "patents_classificator.txt" },
];

const PAPER_SECTIONS: &[SummarySection] = &[
    SummarySection { setting: "organizations_settings", output: "papers_orgs_file.txt" },
    SummarySection { setting: "countries_settings", output: "papers_countries_file.txt" },
];

impl SummaryMode {
    pub fn sections(&self) -> &'static [SummarySection] {
        match self {
            SummaryMode::Patents => PATENT_SECTIONS,
            SummaryMode::Papers => PAPER_SECTIONS,
        }
    }

    /// Column holding the year the distribution is drawn from.
    pub fn year_column(&self) -> &'static str {
        match self {
            SummaryMode::Patents => "Год подачи заявки",
            SummaryMode::Papers => "Год публикации",
        }
    }

    pub fn year_output(&self) -> &'static str {
        match self {
            SummaryMode::Patents => "patents_years.txt",
            SummaryMode::Papers => "papers_years.txt",
        }
    }
}

impl FromStr for SummaryMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "patents" => Ok(SummaryMode::Patents),
            "papers" => Ok(SummaryMode::Papers),
            other => Err(format!("unknown mode '{}' (use patents or papers)", other)),
        }
    }
}

impl fmt::Display for SummaryMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SummaryMode::Patents => f.write_str("patents"),
            SummaryMode::Papers => f.write_str("papers"),
        }
    }
}
