//! Suspension screening of coordination networks
//!
//! A network whose filing is totally suspended on the reference date cannot
//! make a satellite compliant. Each suspension record is evaluated with an
//! explicit decision table over (type, start date, end date).

use crate::constants::SUSPENSION_DATE_FORMAT;
use crate::engine::administration::AdministrationCodes;
use crate::error::{ComplianceError, Result};
use crate::models::{SuspensionRecord, SuspensionType, is_missing, normalize_key};
use chrono::NaiveDate;
use std::collections::HashSet;
use tracing::{debug, warn};

/// Filing state of a network on the reference date
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SuspensionState {
    Active,
    Suspended,
}

/// Networks excluded for one administration code set
#[derive(Debug, Default)]
pub struct SuspensionScreen {
    /// Trimmed names of totally suspended networks
    pub excluded: HashSet<String>,
    /// Records whose dates could not be evaluated
    pub issues: Vec<ComplianceError>,
}

impl SuspensionScreen {
    pub fn is_excluded(&self, network_name: &str) -> bool {
        self.excluded.contains(network_name.trim())
    }
}

/// Parse a day.month.year cell; blanks and "n/a" are absent
pub fn parse_suspension_date(value: Option<&str>, context: &str) -> Result<Option<NaiveDate>> {
    let Some(value) = value.filter(|v| !is_missing(v)) else {
        return Ok(None);
    };

    NaiveDate::parse_from_str(value.trim(), SUSPENSION_DATE_FORMAT)
        .map(Some)
        .map_err(|_| ComplianceError::MalformedDate {
            context: context.to_string(),
            value: value.trim().to_string(),
        })
}

/// Evaluate one suspension record against the reference date
///
/// | type    | start          | end        | state     |
/// |---------|----------------|------------|-----------|
/// | partial | any            | any        | Active    |
/// | total   | none           | any        | Active    |
/// | total   | on/after ref   | any        | Active    |
/// | total   | before ref     | none       | Suspended |
/// | total   | before ref     | on/after   | Suspended |
/// | total   | before ref     | before ref | Active    |
///
/// A malformed date is an error whatever the record type.
pub fn suspension_state(
    record: &SuspensionRecord,
    reference_date: NaiveDate,
) -> Result<SuspensionState> {
    // Both dates are read for every record so a bad cell is always reported
    let context = format!(
        "suspension of '{}' ({})",
        record.network_name, record.administration
    );
    let start = parse_suspension_date(record.start.as_deref(), &context)?;
    let end = parse_suspension_date(record.end.as_deref(), &context)?;

    if let SuspensionType::Partial(_) = record.suspension_type {
        return Ok(SuspensionState::Active);
    }
    let Some(start) = start else {
        return Ok(SuspensionState::Active);
    };

    let state = match end {
        _ if start >= reference_date => SuspensionState::Active,
        None => SuspensionState::Suspended,
        Some(end) if end >= reference_date => SuspensionState::Suspended,
        Some(_) => SuspensionState::Active,
    };

    Ok(state)
}

/// Names of networks totally suspended on the reference date
///
/// Only records filed by one of `codes` are considered. A network is
/// excluded as soon as any of its records says so. Records with malformed
/// dates are logged, reported in the screen and left out of the decision.
pub fn suspended_networks(
    records: &[SuspensionRecord],
    codes: &AdministrationCodes,
    reference_date: NaiveDate,
) -> SuspensionScreen {
    let mut screen = SuspensionScreen::default();

    for record in records
        .iter()
        .filter(|record| codes.contains(&record.administration))
    {
        match suspension_state(record, reference_date) {
            Ok(SuspensionState::Suspended) => {
                screen.excluded.insert(normalize_key(&record.network_name));
            }
            Ok(SuspensionState::Active) => {}
            Err(e) => {
                warn!("Skipping suspension record: {}", e);
                screen.issues.push(e);
            }
        }
    }

    debug!(
        "Suspension screen for {:?}: {} networks excluded, {} records unreadable",
        codes.codes(),
        screen.excluded.len(),
        screen.issues.len()
    );

    screen
}
