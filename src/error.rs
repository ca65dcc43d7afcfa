//! Error handling for compliance evaluation.
//!
//! Distinguishes fatal input problems (missing tables, missing columns),
//! per-record data errors (malformed dates, non-numeric longitudes) and
//! per-satellite evaluation failures (unknown operator country).

use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ComplianceError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("Polars error: {0}")]
    Polars(#[from] polars::error::PolarsError),

    #[error("{table} table not found at path: {path}")]
    TableNotFound { table: String, path: PathBuf },

    #[error("{table} table is missing required column '{column}'")]
    MissingColumn { table: String, column: String },

    #[error("{table} table contains no records")]
    EmptyTable { table: String },

    #[error("Satellite {norad_id}: country '{country}' has no administration code entry")]
    UnknownCountry { norad_id: u32, country: String },

    #[error("Malformed date '{value}' in {context}")]
    MalformedDate { context: String, value: String },

    #[error("Non-numeric longitude '{value}' in {context}")]
    NonNumericLongitude { context: String, value: String },

    #[error("Malformed NORAD id '{value}' in {context}")]
    MalformedNoradId { context: String, value: String },

    #[error("Configuration error: {message}")]
    Configuration { message: String },

    #[error("Processing failed: {reason}")]
    ProcessingFailed { reason: String },
}

impl ComplianceError {
    /// True for errors that only invalidate a single record or satellite
    pub fn is_per_record(&self) -> bool {
        matches!(
            self,
            ComplianceError::UnknownCountry { .. }
                | ComplianceError::MalformedDate { .. }
                | ComplianceError::NonNumericLongitude { .. }
                | ComplianceError::MalformedNoradId { .. }
        )
    }
}

pub type Result<T> = std::result::Result<T, ComplianceError>;
