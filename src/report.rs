//! Compliance report writing
//!
//! Writes the three run outputs into the output directory: the per-satellite
//! match listing, the compliance table as text, and the same table as CSV.
//! The table is built as a polars `DataFrame` so the text and CSV renderings
//! share one column layout.

use crate::constants::{output_columns, outputs};
use crate::error::Result;
use crate::models::{ComplianceReport, Evaluation};

use polars::prelude::*;
use std::fmt::Write as _;
use std::fs::{self, File};
use std::path::{Path, PathBuf};
use std::sync::Once;
use tracing::{debug, info};

/// Table rendering settings for compliance.txt: every row, no shape or dtype lines
const TABLE_FORMAT: &[(&str, &str)] = &[
    ("POLARS_FMT_MAX_ROWS", "-1"),
    ("POLARS_FMT_MAX_COLS", "-1"),
    ("POLARS_FMT_STR_LEN", "64"),
    ("POLARS_FMT_TABLE_HIDE_DATAFRAME_SHAPE_INFORMATION", "1"),
    ("POLARS_FMT_TABLE_HIDE_COLUMN_DATA_TYPES", "1"),
];

static TABLE_FORMAT_INIT: Once = Once::new();

/// Configure polars' table display so the text report is never elided.
///
/// Polars reads its display settings from the process environment. The binary
/// calls this before starting the runtime; `ReportWriter::write` calls it again
/// so library callers get the same rendering. Only the first call has effect.
pub fn apply_table_format() {
    TABLE_FORMAT_INIT.call_once(|| {
        for (key, value) in TABLE_FORMAT {
            // std serializes environment access behind its own lock
            unsafe {
                std::env::set_var(key, value);
            }
        }
    });
}

/// Paths of the files written for one run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReportPaths {
    pub matches: PathBuf,
    pub compliance_text: PathBuf,
    pub compliance_csv: PathBuf,
}

impl ReportPaths {
    pub fn in_dir(output_dir: &Path) -> Self {
        Self {
            matches: output_dir.join(outputs::MATCHES),
            compliance_text: output_dir.join(outputs::COMPLIANCE_TEXT),
            compliance_csv: output_dir.join(outputs::COMPLIANCE_CSV),
        }
    }
}

/// Writes compliance reports into one output directory
#[derive(Debug, Clone)]
pub struct ReportWriter {
    output_dir: PathBuf,
}

impl ReportWriter {
    pub fn new(output_dir: PathBuf) -> Self {
        Self { output_dir }
    }

    pub fn output_dir(&self) -> &Path {
        &self.output_dir
    }

    /// Write all three outputs, creating the output directory if needed
    pub fn write(&self, report: &ComplianceReport) -> Result<ReportPaths> {
        fs::create_dir_all(&self.output_dir)?;
        let paths = ReportPaths::in_dir(&self.output_dir);

        fs::write(&paths.matches, render_matches(report))?;
        debug!("Wrote {}", paths.matches.display());

        // Text table: full polars display, CSV: same frame
        apply_table_format();
        let mut frame = compliance_frame(report)?;
        fs::write(&paths.compliance_text, format!("{}\n", frame))?;
        debug!("Wrote {}", paths.compliance_text.display());

        let mut file = File::create(&paths.compliance_csv)?;
        CsvWriter::new(&mut file)
            .include_header(true)
            .finish(&mut frame)?;
        debug!("Wrote {}", paths.compliance_csv.display());

        info!(
            "Reports for {} satellites written to {}",
            report.records.len(),
            self.output_dir.display()
        );

        Ok(paths)
    }
}

/// Compliance table: one row per satellite, in evaluation order
pub fn compliance_frame(report: &ComplianceReport) -> Result<DataFrame> {
    let records = &report.records;

    let norad: Vec<u32> = records.iter().map(|r| r.satellite.norad_id).collect();
    let names: Vec<&str> = records.iter().map(|r| r.satellite.name.as_str()).collect();
    let countries: Vec<&str> = records.iter().map(|r| r.satellite.country.as_str()).collect();
    let longitudes: Vec<f64> = records.iter().map(|r| r.satellite.longitude).collect();
    let verdicts: Vec<String> = records.iter().map(|r| r.verdict_label()).collect();

    let frame = df!(
        output_columns::NORAD => norad,
        output_columns::NAME => names,
        output_columns::COUNTRY => countries,
        output_columns::LONGITUDE => longitudes,
        output_columns::COMPLIANCE => verdicts,
    )?;

    Ok(frame)
}

/// Match listing: a satellite line, its matched networks, then a blank gap
pub fn render_matches(report: &ComplianceReport) -> String {
    let mut out = String::new();

    for record in &report.records {
        let satellite = &record.satellite;
        let _ = writeln!(
            out,
            "NORAD: {} | SATNAME: {} | COUNTRY: {} | LONGITUDE: {}",
            satellite.norad_id, satellite.name, satellite.country, satellite.longitude
        );

        match &record.evaluation {
            Evaluation::Matched(matched) => {
                for network in &matched.networks {
                    let _ = writeln!(out, "{}", network);
                }
            }
            Evaluation::Unresolved { reason } => {
                let _ = writeln!(out, "Unresolved: {}", reason);
            }
        }

        out.push_str("\n\n");
    }

    out
}
