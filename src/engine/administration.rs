//! Country to administration code resolution
//!
//! Maps the operator country label of the satellite registry to the set of
//! ITU administration codes that country may file under. Built once per run
//! and shared read-only between evaluation tasks.

use crate::error::{ComplianceError, Result};
use crate::models::{NoradId, is_missing_key, normalize_key};
use std::collections::HashMap;
use tracing::{debug, warn};

/// Administration codes a country may file under
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AdministrationCodes {
    /// Ordered, de-duplicated, non-empty list of codes
    Codes(Vec<String>),
    /// No administration on file; matches no filing at all
    NoneOnFile,
}

impl AdministrationCodes {
    /// Build from raw cells: trims, drops blanks, removes duplicates
    pub fn from_cells<'a>(cells: impl IntoIterator<Item = &'a str>) -> Self {
        let mut codes: Vec<String> = Vec::new();
        for cell in cells {
            if is_missing_key(cell) {
                continue;
            }
            let code = normalize_key(cell);
            if !codes.contains(&code) {
                codes.push(code);
            }
        }

        if codes.is_empty() {
            AdministrationCodes::NoneOnFile
        } else {
            AdministrationCodes::Codes(codes)
        }
    }

    /// Membership test on the trimmed code
    pub fn contains(&self, code: &str) -> bool {
        match self {
            AdministrationCodes::Codes(codes) => {
                let code = code.trim();
                codes.iter().any(|c| c == code)
            }
            AdministrationCodes::NoneOnFile => false,
        }
    }

    pub fn codes(&self) -> &[String] {
        match self {
            AdministrationCodes::Codes(codes) => codes,
            AdministrationCodes::NoneOnFile => &[],
        }
    }

    pub fn is_none_on_file(&self) -> bool {
        matches!(self, AdministrationCodes::NoneOnFile)
    }
}

/// One row of the administration reference table
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AdministrationRow {
    pub country: String,
    pub codes: Vec<String>,
}

/// Country label to administration codes, read-only after construction
#[derive(Debug, Clone, Default)]
pub struct AdministrationRegistry {
    countries: HashMap<String, AdministrationCodes>,
}

impl AdministrationRegistry {
    /// Build the registry; the first row wins for a repeated country
    ///
    /// Returns the registry together with a description of every duplicate
    /// row that was ignored.
    pub fn from_rows(rows: impl IntoIterator<Item = AdministrationRow>) -> (Self, Vec<String>) {
        let mut countries = HashMap::new();
        let mut duplicates = Vec::new();

        for row in rows {
            let country = normalize_key(&row.country);
            if countries.contains_key(&country) {
                warn!("Duplicate administration row for country '{}', keeping first", country);
                duplicates.push(format!(
                    "Administrations: duplicate row for country '{}' ignored",
                    country
                ));
                continue;
            }

            let codes = AdministrationCodes::from_cells(row.codes.iter().map(String::as_str));
            countries.insert(country, codes);
        }

        debug!("Administration registry built for {} countries", countries.len());
        (Self { countries }, duplicates)
    }

    /// Codes for a country label; unknown labels are an error, never an empty set
    pub fn resolve(&self, norad_id: NoradId, country: &str) -> Result<&AdministrationCodes> {
        self.countries
            .get(country.trim())
            .ok_or_else(|| ComplianceError::UnknownCountry {
                norad_id,
                country: country.trim().to_string(),
            })
    }

    pub fn contains_country(&self, country: &str) -> bool {
        self.countries.contains_key(country.trim())
    }

    pub fn country_count(&self) -> usize {
        self.countries.len()
    }
}
