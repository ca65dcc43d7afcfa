//! Shared fixtures for engine tests

use crate::config::ComplianceConfig;
use crate::engine::{AdministrationCodes, AdministrationRegistry, AdministrationRow};
use crate::models::{
    FilingDate, Network, PlannedStatus, Satellite, SuspensionRecord, SuspensionType,
};
use chrono::NaiveDate;

pub mod administration_tests;
pub mod pipeline_tests;

/// The date the sample tables were collected
pub fn reference_date() -> NaiveDate {
    NaiveDate::from_ymd_opt(2023, 8, 5).unwrap()
}

pub fn date(day: u32, month: u32, year: i32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).unwrap()
}

pub fn satellite(norad_id: u32, name: &str, country: &str, longitude: f64) -> Satellite {
    Satellite {
        norad_id,
        name: name.to_string(),
        country: country.to_string(),
        longitude,
    }
}

fn filing(raw: Option<&str>) -> Option<FilingDate> {
    raw.map(|raw| FilingDate {
        raw: raw.to_string(),
        year: raw[..4].parse().unwrap(),
    })
}

/// Network filing with explicit dates
pub fn network_with_dates(
    name: &str,
    administration: &str,
    longitude: f64,
    status: PlannedStatus,
    brought_into_use: Option<&str>,
    early_stage_filing: Option<&str>,
) -> Network {
    Network {
        name: name.to_string(),
        administration: administration.to_string(),
        longitude,
        status,
        brought_into_use: filing(brought_into_use),
        early_stage_filing: filing(early_stage_filing),
    }
}

/// Recent filing that never qualifies for the legacy tier
pub fn network(name: &str, administration: &str, longitude: f64, status: PlannedStatus) -> Network {
    network_with_dates(
        name,
        administration,
        longitude,
        status,
        Some("2015-03-01"),
        Some("2012-06-11"),
    )
}

pub fn suspension(
    administration: &str,
    network_name: &str,
    suspension_type: &str,
    start: Option<&str>,
    end: Option<&str>,
) -> SuspensionRecord {
    SuspensionRecord {
        administration: administration.to_string(),
        network_name: network_name.to_string(),
        suspension_type: SuspensionType::from_label(suspension_type),
        start: start.map(str::to_string),
        end: end.map(str::to_string),
    }
}

pub fn codes(codes: &[&str]) -> AdministrationCodes {
    AdministrationCodes::from_cells(codes.iter().copied())
}

pub fn registry(rows: &[(&str, &[&str])]) -> AdministrationRegistry {
    let rows = rows.iter().map(|(country, codes)| AdministrationRow {
        country: country.to_string(),
        codes: codes.iter().map(|c| c.to_string()).collect(),
    });
    AdministrationRegistry::from_rows(rows).0
}

/// Deterministic config for engine runs
pub fn test_config() -> ComplianceConfig {
    ComplianceConfig::default()
        .with_reference_date(reference_date())
        .with_workers(2)
        .with_batch_size(2)
        .without_progress()
}
