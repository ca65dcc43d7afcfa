//! Reference tables for a compliance run
//!
//! Loads the longitude telemetry, satellite catalog, network filings,
//! suspension list and administration code table from CSV, and exposes them
//! as typed, read-only collections for the engine.

use crate::engine::AdministrationRegistry;
use crate::models::{Network, Satellite, SuspensionRecord};

pub mod loader;
pub mod parser;
pub mod stats;

#[cfg(test)]
pub mod tests;

pub use loader::join_satellites;
pub use stats::{LoadStats, TableCounts};

/// Every table a run needs, loaded once and never mutated
#[derive(Debug, Clone, Default)]
pub struct ReferenceTables {
    /// Satellites in longitude table order
    pub satellites: Vec<Satellite>,

    /// Network filings in table order
    pub networks: Vec<Network>,

    pub suspensions: Vec<SuspensionRecord>,

    pub administrations: AdministrationRegistry,
}

impl ReferenceTables {
    pub fn satellite_count(&self) -> usize {
        self.satellites.len()
    }

    pub fn network_count(&self) -> usize {
        self.networks.len()
    }
}
