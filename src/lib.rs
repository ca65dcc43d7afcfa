//! ITU Compliance Monitor Library
//!
//! Checks whether geostationary satellites sit at orbital longitudes covered
//! by an active ITU coordination filing of one of their operator's
//! administrations.
//!
//! This library provides tools for:
//! - Loading satellite, network filing, suspension and administration tables
//! - Resolving operator countries to ITU administration codes
//! - Screening out networks totally suspended on a reference date
//! - Matching satellite longitudes against filings under tiered tolerances
//! - Writing the per-satellite compliance table and match audit trail

pub mod cli;
pub mod config;
pub mod constants;
pub mod engine;
pub mod error;
pub mod models;
pub mod report;
pub mod tables;

pub use config::{ComplianceConfig, TablePaths, ToleranceConfig};
pub use engine::ComplianceEngine;
pub use error::{ComplianceError, Result};
pub use models::{ComplianceRecord, ComplianceReport, MatchRecord, Satellite, Verdict};
pub use report::ReportWriter;
pub use tables::{LoadStats, ReferenceTables};
