//! Core data structures for compliance evaluation.
//!
//! Defines the reference records loaded from the input tables (satellites,
//! coordination networks, suspensions), the per-satellite match results and
//! the final compliance report.

use crate::constants::{
    MISSING_KEY_MARKERS, MISSING_VALUE_MARKERS, NON_PLANNED_LABEL, PLANNED_LABEL,
    TOTAL_SUSPENSION,
};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::PathBuf;

/// NORAD catalog number
pub type NoradId = u32;

/// Normalize a join key (network name, administration code, country label)
pub fn normalize_key(value: &str) -> String {
    value.trim().to_string()
}

/// True when a cell holds one of the "no value" markers
pub fn is_missing(value: &str) -> bool {
    MISSING_VALUE_MARKERS.contains(&value.trim())
}

/// True when a join-key cell is blank or the "n/a" sentinel
pub fn is_missing_key(value: &str) -> bool {
    MISSING_KEY_MARKERS.contains(&value.trim())
}

/// A satellite joined from the longitude and catalog tables
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Satellite {
    pub norad_id: NoradId,
    pub name: String,
    pub country: String,
    pub longitude: f64,
}

/// Regulatory category of a filing
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PlannedStatus {
    Planned,
    NonPlanned,
    /// Any other label; qualifies for no status-based tier
    Other(String),
}

impl PlannedStatus {
    /// Parse the published label, ignoring surrounding whitespace and case
    pub fn from_label(label: &str) -> Self {
        let label = label.trim();
        if label.eq_ignore_ascii_case(PLANNED_LABEL) {
            PlannedStatus::Planned
        } else if label.eq_ignore_ascii_case(NON_PLANNED_LABEL) {
            PlannedStatus::NonPlanned
        } else {
            PlannedStatus::Other(label.to_string())
        }
    }

    pub fn label(&self) -> &str {
        match self {
            PlannedStatus::Planned => PLANNED_LABEL,
            PlannedStatus::NonPlanned => NON_PLANNED_LABEL,
            PlannedStatus::Other(label) => label,
        }
    }
}

impl fmt::Display for PlannedStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// A filing date as published, with its parsed year
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilingDate {
    pub raw: String,
    pub year: i32,
}

/// A coordination network filing
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Network {
    pub name: String,
    pub administration: String,
    pub longitude: f64,
    pub status: PlannedStatus,
    pub brought_into_use: Option<FilingDate>,
    pub early_stage_filing: Option<FilingDate>,
}

/// Kind of suspension published for a network
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum SuspensionType {
    /// Rights fully inactive for the suspension window
    Total,
    /// Does not remove coordination rights
    Partial(String),
}

impl SuspensionType {
    pub fn from_label(label: &str) -> Self {
        let label = label.trim();
        if label == TOTAL_SUSPENSION {
            SuspensionType::Total
        } else {
            SuspensionType::Partial(label.to_string())
        }
    }
}

/// One row of the suspended networks list
///
/// Dates are kept as published (trimmed, `None` when blank) and parsed when
/// the record is evaluated against a reference date.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SuspensionRecord {
    pub administration: String,
    pub network_name: String,
    pub suspension_type: SuspensionType,
    pub start: Option<String>,
    pub end: Option<String>,
}

/// Tolerance tier under which a network covers a longitude
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ToleranceTier {
    NonPlanned,
    Planned,
    LegacyFiling,
}

impl fmt::Display for ToleranceTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ToleranceTier::NonPlanned => write!(f, "non-planned"),
            ToleranceTier::Planned => write!(f, "planned"),
            ToleranceTier::LegacyFiling => write!(f, "legacy-filing"),
        }
    }
}

/// Audit summary of a network judged compliant for a satellite
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatchedNetwork {
    pub name: String,
    pub longitude: f64,
    pub administration: String,
    pub status: PlannedStatus,
    pub early_stage_filing: Option<String>,
    pub distance: f64,
    pub tiers: Vec<ToleranceTier>,
}

impl fmt::Display for MatchedNetwork {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let tiers: Vec<String> = self.tiers.iter().map(|t| t.to_string()).collect();
        write!(
            f,
            "Network Name: {} | Longitude: {} | ITU Administration: {} | Planned Status: {} | Early Stage Filing Date: {} | Distance: {:.4} | Tiers: {}",
            self.name,
            self.longitude,
            self.administration,
            self.status,
            self.early_stage_filing.as_deref().unwrap_or("n/a"),
            self.distance,
            tiers.join(",")
        )
    }
}

/// Networks judged compliant for one satellite
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatchRecord {
    pub norad_id: NoradId,
    pub networks: Vec<MatchedNetwork>,
}

impl MatchRecord {
    pub fn is_compliant(&self) -> bool {
        !self.networks.is_empty()
    }
}

/// Binary compliance verdict
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Verdict {
    Yes,
    No,
}

impl fmt::Display for Verdict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Verdict::Yes => write!(f, "Yes"),
            Verdict::No => write!(f, "No"),
        }
    }
}

/// Outcome of evaluating one satellite
#[derive(Debug, Clone, PartialEq)]
pub enum Evaluation {
    Matched(MatchRecord),
    /// Evaluation could not run (e.g. unknown operator country)
    Unresolved { reason: String },
}

/// One row of the final compliance table
#[derive(Debug, Clone, PartialEq)]
pub struct ComplianceRecord {
    pub satellite: Satellite,
    pub evaluation: Evaluation,
}

impl ComplianceRecord {
    /// `None` for unresolved satellites
    pub fn verdict(&self) -> Option<Verdict> {
        match &self.evaluation {
            Evaluation::Matched(record) if record.is_compliant() => Some(Verdict::Yes),
            Evaluation::Matched(_) => Some(Verdict::No),
            Evaluation::Unresolved { .. } => None,
        }
    }

    /// Label written to the compliance column
    pub fn verdict_label(&self) -> String {
        self.verdict()
            .map(|v| v.to_string())
            .unwrap_or_else(|| "Unresolved".to_string())
    }

    pub fn matches(&self) -> &[MatchedNetwork] {
        match &self.evaluation {
            Evaluation::Matched(record) => &record.networks,
            Evaluation::Unresolved { .. } => &[],
        }
    }
}

/// Compliance table for one run
#[derive(Debug, Clone)]
pub struct ComplianceReport {
    pub reference_date: NaiveDate,
    pub records: Vec<ComplianceRecord>,
    /// Data issues surfaced while evaluating (malformed suspension dates)
    pub issues: Vec<String>,
}

impl ComplianceReport {
    pub fn compliant_count(&self) -> usize {
        self.count_verdict(Verdict::Yes)
    }

    pub fn non_compliant_count(&self) -> usize {
        self.count_verdict(Verdict::No)
    }

    pub fn unresolved(&self) -> impl Iterator<Item = &ComplianceRecord> {
        self.records.iter().filter(|r| r.verdict().is_none())
    }

    fn count_verdict(&self, verdict: Verdict) -> usize {
        self.records
            .iter()
            .filter(|r| r.verdict() == Some(verdict))
            .count()
    }
}

/// Run statistics reported by the command line
#[derive(Debug, Default)]
pub struct RunStats {
    pub satellites_evaluated: usize,
    pub compliant: usize,
    pub non_compliant: usize,
    pub unresolved: usize,
    pub data_issues: usize,
    pub output_dir: PathBuf,
    pub processing_time_ms: u128,
}

/// The five input tables
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TableKind {
    Longitudes,
    Catalog,
    Networks,
    Suspensions,
    Administrations,
}

impl TableKind {
    pub const ALL: [TableKind; 5] = [
        TableKind::Longitudes,
        TableKind::Catalog,
        TableKind::Networks,
        TableKind::Suspensions,
        TableKind::Administrations,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            TableKind::Longitudes => "Longitudes",
            TableKind::Catalog => "Catalog",
            TableKind::Networks => "Networks",
            TableKind::Suspensions => "Suspensions",
            TableKind::Administrations => "Administrations",
        }
    }
}

impl fmt::Display for TableKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
