//! Longitude proximity matching
//!
//! Decides which of a country's active coordination networks cover a
//! satellite's longitude. A network qualifies through its status-based tier
//! (planned / non-planned) or through the legacy-filing tier; boundaries are
//! inclusive.

use crate::config::ToleranceConfig;
use crate::constants::tolerances::BOUNDARY_EPSILON_DEG;
use crate::engine::administration::AdministrationCodes;
use crate::engine::suspension::SuspensionScreen;
use crate::models::{FilingDate, MatchedNetwork, Network, PlannedStatus, ToleranceTier};

/// Angular separation of two longitudes, folded onto 0..=180 degrees
pub fn circular_difference(a: f64, b: f64) -> f64 {
    let diff = (a - b).abs() % 360.0;
    if diff > 180.0 { 360.0 - diff } else { diff }
}

/// Inclusive tier test with a small slack for decimal round-off
fn within(diff: f64, limit: f64) -> bool {
    diff <= limit + BOUNDARY_EPSILON_DEG
}

fn year_or_default(date: &Option<FilingDate>, missing_year: i32) -> i32 {
    date.as_ref().map_or(missing_year, |d| d.year)
}

/// True when both filing years are early enough for the legacy tier
pub fn is_legacy_filing(network: &Network, tolerances: &ToleranceConfig) -> bool {
    let brought_into_use = year_or_default(&network.brought_into_use, tolerances.missing_date_year);
    let early_filing = year_or_default(&network.early_stage_filing, tolerances.missing_date_year);

    brought_into_use < tolerances.legacy_brought_into_use_before
        && early_filing < tolerances.legacy_early_filing_before
}

/// Tiers under which `network` covers a satellite `diff` degrees away
pub fn qualifying_tiers(
    network: &Network,
    diff: f64,
    tolerances: &ToleranceConfig,
) -> Vec<ToleranceTier> {
    let mut tiers = Vec::new();

    match network.status {
        PlannedStatus::NonPlanned if within(diff, tolerances.non_planned_deg) => {
            tiers.push(ToleranceTier::NonPlanned)
        }
        PlannedStatus::Planned if within(diff, tolerances.planned_deg) => {
            tiers.push(ToleranceTier::Planned)
        }
        _ => {}
    }

    if within(diff, tolerances.legacy_deg) && is_legacy_filing(network, tolerances) {
        tiers.push(ToleranceTier::LegacyFiling);
    }

    tiers
}

/// Networks of `codes` not excluded by `screen` that cover `longitude`
///
/// Output keeps the order of `networks`; each network appears at most once.
pub fn match_networks(
    longitude: f64,
    networks: &[Network],
    codes: &AdministrationCodes,
    screen: &SuspensionScreen,
    tolerances: &ToleranceConfig,
) -> Vec<MatchedNetwork> {
    networks
        .iter()
        .filter(|network| codes.contains(&network.administration))
        .filter(|network| !screen.is_excluded(&network.name))
        .filter_map(|network| {
            let distance = circular_difference(network.longitude, longitude);
            let tiers = qualifying_tiers(network, distance, tolerances);
            if tiers.is_empty() {
                return None;
            }

            Some(MatchedNetwork {
                name: network.name.clone(),
                longitude: network.longitude,
                administration: network.administration.clone(),
                status: network.status.clone(),
                early_stage_filing: network.early_stage_filing.as_ref().map(|d| d.raw.clone()),
                distance,
                tiers,
            })
        })
        .collect()
}
