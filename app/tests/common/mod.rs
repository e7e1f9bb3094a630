//! FILENAME: tests/common/mod.rs
//! Test harness and fixtures for the report generation integration tests.

#![allow(dead_code)]

use app_lib::GenerateRequest;
use engine::FieldCatalog;
use persistence::OutputFormat;
use std::path::{Path, PathBuf};
use subtable_engine::TableId;
use tempfile::TempDir;

/// One source patent row in the fixture layout.
pub struct PatentRow {
    pub applicant: &'static str,
    pub grant_country: &'static str,
    pub applicant_country: &'static str,
    pub year: &'static str,
    pub classifiers: &'static str,
    pub ru_number: &'static str,
    pub us_number: &'static str,
}

/// Test harness owning a temporary working directory with a CSV input file.
pub struct TestHarness {
    pub dir: TempDir,
    pub input: PathBuf,
}

impl TestHarness {
    /// Harness with the sample patent list, marker column included.
    pub fn with_sample_data() -> Self {
        Self::with_rows(&sample_rows(), true)
    }

    /// Harness whose input has no marker column.
    pub fn without_marker() -> Self {
        Self::with_rows(&sample_rows(), false)
    }

    pub fn with_rows(rows: &[PatentRow], with_marker: bool) -> Self {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("patents.csv");
        std::fs::write(&input, render_csv(rows, with_marker)).unwrap();
        TestHarness { dir, input }
    }

    pub fn out_dir(&self) -> &Path {
        self.dir.path()
    }

    /// Request for the given tables with CSV output.
    pub fn request(&self, tables: Vec<TableId>) -> GenerateRequest {
        GenerateRequest {
            input: self.input.clone(),
            out_dir: self.dir.path().to_path_buf(),
            format: OutputFormat::Csv,
            catalog: FieldCatalog::default(),
            tables,
        }
    }

    pub fn output(&self, name: &str) -> PathBuf {
        self.dir.path().join(name)
    }

    pub fn read_output(&self, name: &str) -> String {
        std::fs::read_to_string(self.output(name)).unwrap()
    }
}

/// Two RU applicants (one granted in US) and one US applicant.
pub fn sample_rows() -> Vec<PatentRow> {
    vec![
        PatentRow {
            applicant: "ACME Corp",
            grant_country: "RU",
            applicant_country: "RU",
            year: "2019",
            classifiers: "H01M;H01B",
            ru_number: "RU2700001",
            us_number: "",
        },
        PatentRow {
            applicant: "ACME Corp",
            grant_country: "US",
            applicant_country: "RU",
            year: "2020",
            classifiers: "H01M",
            ru_number: "",
            us_number: "US10000001",
        },
        PatentRow {
            applicant: "Globex",
            grant_country: "US",
            applicant_country: "US",
            year: "2020",
            classifiers: "H01B",
            ru_number: "",
            us_number: "US10000002",
        },
    ]
}

fn quoted(field: &str) -> String {
    format!("\"{}\"", field.replace('"', "\"\""))
}

fn render_csv(rows: &[PatentRow], with_marker: bool) -> String {
    let c = FieldCatalog::default();
    let mut headers = vec![
        c.row_number_column.clone(),
        c.applicant.clone(),
        c.grant_country.clone(),
        c.applicant_country.clone(),
        c.application_year.clone(),
        c.classifiers.clone(),
        c.full_id.clone(),
        c.classification_index.clone(),
        c.inventor.clone(),
        c.application_number.clone(),
        c.priority_date.clone(),
        c.priority_documents.clone(),
        c.publication_date.clone(),
        c.invention_title.clone(),
        c.legal_status.clone(),
    ];
    if with_marker {
        headers.push(c.marker_column.clone());
    }
    headers.push("RU".to_string());
    headers.push("US".to_string());

    let mut out = String::new();
    out.push_str(&headers.iter().map(|h| quoted(h)).collect::<Vec<_>>().join(","));
    out.push('\n');

    for (i, row) in rows.iter().enumerate() {
        let number = (i + 1).to_string();
        let mut fields = vec![
            number.as_str(),
            row.applicant,
            row.grant_country,
            row.applicant_country,
            row.year,
            row.classifiers,
            "RU-2700001-C1",
            "H01M 10/00;H01M 4/00",
            "Ivanov I.",
            "2019101",
            "2019-04-15",
            "RU2019101",
            "2020-01-30",
            "Battery",
            "Active",
        ];
        if with_marker {
            fields.push("");
        }
        fields.push(row.ru_number);
        fields.push(row.us_number);
        out.push_str(&fields.iter().map(|f| quoted(f)).collect::<Vec<_>>().join(","));
        out.push('\n');
    }
    out
}
