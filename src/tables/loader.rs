//! Reference table loading
//!
//! Reads the five input tables with the `csv` crate, checks that each has its
//! required columns and enough rows, and joins longitudes with the catalog
//! into satellites. Per-record problems are logged and collected in
//! [`LoadStats`] without failing the load.

use super::ReferenceTables;
use super::parser::{
    AdministrationColumns, CatalogColumns, CatalogEntry, HeaderIndex, LongitudeColumns,
    LongitudeEntry, NetworkColumns, SuspensionColumns, parse_administration_record,
    parse_catalog_record, parse_longitude_record, parse_network_record, parse_suspension_record,
};
use super::stats::LoadStats;
use crate::config::TablePaths;
use crate::engine::{AdministrationRegistry, AdministrationRow};
use crate::error::{ComplianceError, Result};
use crate::models::{Network, NoradId, Satellite, SuspensionRecord, TableKind};
use csv::StringRecord;
use std::collections::hash_map::Entry;
use std::collections::{HashMap, HashSet};
use std::fs::File;
use std::path::Path;
use std::time::Instant;
use tracing::{debug, info, warn};

impl ReferenceTables {
    /// Load and join every reference table
    ///
    /// # Errors
    /// * `TableNotFound` if any of the five files is missing
    /// * `MissingColumn` if a table lacks a required column
    /// * `EmptyTable` if the longitude, catalog, network or administration
    ///   table yields no usable rows
    /// * `Csv` / `Io` for unreadable files
    pub fn load(paths: &TablePaths) -> Result<(Self, LoadStats)> {
        let start_time = Instant::now();

        // Fail fast on missing files before reading anything
        for table in TableKind::ALL {
            let path = paths.path(table);
            if !path.is_file() {
                return Err(ComplianceError::TableNotFound {
                    table: table.to_string(),
                    path,
                });
            }
        }

        info!("Loading reference tables from {}", paths.data_dir.display());
        let mut stats = LoadStats::new();

        let longitudes = load_longitudes(&paths.path(TableKind::Longitudes), &mut stats)?;
        let catalog = load_catalog(&paths.path(TableKind::Catalog), &mut stats)?;
        let networks = load_networks(&paths.path(TableKind::Networks), &mut stats)?;
        let suspensions = load_suspensions(&paths.path(TableKind::Suspensions), &mut stats)?;
        let rows = load_administrations(&paths.path(TableKind::Administrations), &mut stats)?;

        // Suspensions may be empty, the other tables may not
        for table in [
            TableKind::Longitudes,
            TableKind::Catalog,
            TableKind::Networks,
            TableKind::Administrations,
        ] {
            if stats.counts(table).rows_loaded == 0 {
                return Err(ComplianceError::EmptyTable {
                    table: table.to_string(),
                });
            }
        }

        let (administrations, duplicates) = AdministrationRegistry::from_rows(rows);
        stats.errors.extend(duplicates);

        let satellites = join_satellites(longitudes, catalog, &mut stats);
        if satellites.is_empty() {
            warn!("No longitude record matched a catalog entry");
        }

        stats.load_duration = start_time.elapsed();
        info!("Reference tables loaded: {}", stats.summary());

        Ok((
            Self {
                satellites,
                networks,
                suspensions,
                administrations,
            },
            stats,
        ))
    }
}

/// Open a table and index its header row
fn open_table(table: TableKind, path: &Path) -> Result<(csv::Reader<File>, HeaderIndex)> {
    debug!("Reading {} table: {}", table, path.display());

    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_path(path)?;
    let headers = reader.headers()?.clone();

    Ok((reader, HeaderIndex::new(table, &headers)))
}

/// Read every data row, handing each to `handle` with its 1-based row number
fn for_each_record(
    table: TableKind,
    reader: &mut csv::Reader<File>,
    stats: &mut LoadStats,
    mut handle: impl FnMut(&StringRecord, usize, &mut LoadStats) -> bool,
) -> Result<()> {
    let mut record = StringRecord::new();
    let mut row = 0;

    loop {
        match reader.read_record(&mut record) {
            Ok(true) => {}
            Ok(false) => break,
            // Undecodable bytes cost only their own row; the reader resumes after it
            Err(e) if matches!(e.kind(), csv::ErrorKind::Utf8 { .. }) => {
                row += 1;
                stats.counts_mut(table).rows_read += 1;
                record_issue(stats, ComplianceError::Csv(e));
                continue;
            }
            Err(e) => return Err(e.into()),
        }

        row += 1;
        stats.counts_mut(table).rows_read += 1;
        if handle(&record, row, stats) {
            stats.counts_mut(table).rows_loaded += 1;
        }
    }

    debug!(
        "{} table: {} rows read, {} loaded",
        table,
        stats.counts(table).rows_read,
        stats.counts(table).rows_loaded
    );
    Ok(())
}

fn record_issue(stats: &mut LoadStats, error: ComplianceError) {
    warn!("Skipping record: {}", error);
    stats.errors.push(error.to_string());
}

fn load_longitudes(path: &Path, stats: &mut LoadStats) -> Result<Vec<LongitudeEntry>> {
    let (mut reader, index) = open_table(TableKind::Longitudes, path)?;
    let columns = LongitudeColumns::locate(&index)?;
    let mut entries = Vec::new();

    for_each_record(TableKind::Longitudes, &mut reader, stats, |record, row, stats| {
        match parse_longitude_record(record, &columns, row) {
            Ok(entry) => {
                entries.push(entry);
                true
            }
            Err(e) => {
                record_issue(stats, e);
                false
            }
        }
    })?;

    Ok(entries)
}

fn load_catalog(path: &Path, stats: &mut LoadStats) -> Result<Vec<CatalogEntry>> {
    let (mut reader, index) = open_table(TableKind::Catalog, path)?;
    let columns = CatalogColumns::locate(&index)?;
    let mut entries = Vec::new();

    for_each_record(TableKind::Catalog, &mut reader, stats, |record, row, stats| {
        match parse_catalog_record(record, &columns, row) {
            Ok(entry) => {
                entries.push(entry);
                true
            }
            Err(e) => {
                record_issue(stats, e);
                false
            }
        }
    })?;

    Ok(entries)
}

fn load_networks(path: &Path, stats: &mut LoadStats) -> Result<Vec<Network>> {
    let (mut reader, index) = open_table(TableKind::Networks, path)?;
    let columns = NetworkColumns::locate(&index)?;
    let mut networks = Vec::new();

    for_each_record(TableKind::Networks, &mut reader, stats, |record, row, stats| {
        match parse_network_record(record, &columns, row) {
            Ok((network, date_errors)) => {
                for e in date_errors {
                    warn!("Loading network without filing date: {}", e);
                    stats.errors.push(e.to_string());
                }
                networks.push(network);
                true
            }
            Err(e) => {
                record_issue(stats, e);
                false
            }
        }
    })?;

    Ok(networks)
}

fn load_suspensions(path: &Path, stats: &mut LoadStats) -> Result<Vec<SuspensionRecord>> {
    let (mut reader, index) = open_table(TableKind::Suspensions, path)?;
    let columns = SuspensionColumns::locate(&index)?;
    let mut records = Vec::new();

    for_each_record(TableKind::Suspensions, &mut reader, stats, |record, _row, _stats| {
        records.push(parse_suspension_record(record, &columns));
        true
    })?;

    Ok(records)
}

fn load_administrations(path: &Path, stats: &mut LoadStats) -> Result<Vec<AdministrationRow>> {
    let (mut reader, index) = open_table(TableKind::Administrations, path)?;
    let columns = AdministrationColumns::locate(&index)?;
    let mut rows = Vec::new();

    for_each_record(TableKind::Administrations, &mut reader, stats, |record, row, _stats| {
        match parse_administration_record(record, &columns) {
            Some(parsed) => {
                rows.push(parsed);
                true
            }
            None => {
                debug!("Administrations row {} has no country label, skipped", row);
                false
            }
        }
    })?;

    Ok(rows)
}

/// Inner join on NORAD id, in longitude table order
///
/// The first catalog row and the first longitude row win for a repeated id;
/// later duplicates and longitudes without a catalog entry are reported.
pub fn join_satellites(
    longitudes: Vec<LongitudeEntry>,
    catalog: Vec<CatalogEntry>,
    stats: &mut LoadStats,
) -> Vec<Satellite> {
    let mut by_norad: HashMap<NoradId, CatalogEntry> = HashMap::with_capacity(catalog.len());
    for entry in catalog {
        match by_norad.entry(entry.norad_id) {
            Entry::Vacant(slot) => {
                slot.insert(entry);
            }
            Entry::Occupied(_) => {
                warn!("Duplicate catalog entry for NORAD {}, keeping first", entry.norad_id);
                stats.errors.push(format!(
                    "Catalog: duplicate entry for NORAD {} ignored",
                    entry.norad_id
                ));
            }
        }
    }

    let mut seen = HashSet::with_capacity(longitudes.len());
    let mut satellites = Vec::with_capacity(longitudes.len());

    for entry in longitudes {
        if !seen.insert(entry.norad_id) {
            warn!("Duplicate longitude for NORAD {}, keeping first", entry.norad_id);
            stats.errors.push(format!(
                "Longitudes: duplicate entry for NORAD {} ignored",
                entry.norad_id
            ));
            continue;
        }

        let Some(catalog_entry) = by_norad.get(&entry.norad_id) else {
            debug!("NORAD {} has no catalog entry", entry.norad_id);
            stats.unmatched_longitudes += 1;
            stats.errors.push(format!(
                "Longitudes: NORAD {} has no catalog entry",
                entry.norad_id
            ));
            continue;
        };

        satellites.push(Satellite {
            norad_id: entry.norad_id,
            name: catalog_entry.name.clone(),
            country: catalog_entry.country.clone(),
            longitude: entry.longitude,
        });
    }

    stats.satellites_joined = satellites.len();
    satellites
}
