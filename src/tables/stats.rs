//! Table loading statistics
//!
//! Row counts per input table plus every per-record problem found while
//! loading, so the command line can report what was skipped and why.

use crate::models::TableKind;
use std::time::Duration;

/// Rows read and rows kept for one table
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TableCounts {
    pub rows_read: usize,
    pub rows_loaded: usize,
}

impl TableCounts {
    pub fn rows_skipped(&self) -> usize {
        self.rows_read - self.rows_loaded
    }
}

/// Statistics about loading the five reference tables
#[derive(Debug, Clone, Default)]
pub struct LoadStats {
    pub longitudes: TableCounts,
    pub catalog: TableCounts,
    pub networks: TableCounts,
    pub suspensions: TableCounts,
    pub administrations: TableCounts,

    /// Satellites produced by joining longitudes with the catalog
    pub satellites_joined: usize,

    /// Longitude rows whose NORAD id has no catalog entry
    pub unmatched_longitudes: usize,

    /// Time taken to load every table
    pub load_duration: Duration,

    /// Per-record problems, already formatted for display
    pub errors: Vec<String>,
}

impl LoadStats {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn counts(&self, table: TableKind) -> &TableCounts {
        match table {
            TableKind::Longitudes => &self.longitudes,
            TableKind::Catalog => &self.catalog,
            TableKind::Networks => &self.networks,
            TableKind::Suspensions => &self.suspensions,
            TableKind::Administrations => &self.administrations,
        }
    }

    pub(crate) fn counts_mut(&mut self, table: TableKind) -> &mut TableCounts {
        match table {
            TableKind::Longitudes => &mut self.longitudes,
            TableKind::Catalog => &mut self.catalog,
            TableKind::Networks => &mut self.networks,
            TableKind::Suspensions => &mut self.suspensions,
            TableKind::Administrations => &mut self.administrations,
        }
    }

    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }

    /// One-line summary for logging
    pub fn summary(&self) -> String {
        format!(
            "Joined {} satellites ({} longitudes without catalog entry), {} networks, {} suspensions, {} countries; {} issues in {:.2}s",
            self.satellites_joined,
            self.unmatched_longitudes,
            self.networks.rows_loaded,
            self.suspensions.rows_loaded,
            self.administrations.rows_loaded,
            self.errors.len(),
            self.load_duration.as_secs_f64()
        )
    }
}
