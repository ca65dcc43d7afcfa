//! Record parsing for the input tables
//!
//! Column positions are resolved once per table from the trimmed header row;
//! each data row is then turned into a typed record. Problems with a single
//! cell become per-record errors, never a failed load.

use crate::constants::{
    MAX_ADMINISTRATION_CODES, administration_columns, catalog_columns, longitude_columns,
    network_columns, suspension_columns,
};
use crate::engine::AdministrationRow;
use crate::error::{ComplianceError, Result};
use crate::models::{
    FilingDate, Network, NoradId, PlannedStatus, SuspensionRecord, SuspensionType, TableKind,
    is_missing, is_missing_key, normalize_key,
};
use csv::StringRecord;
use std::collections::HashMap;

/// Trimmed header name to position; the first occurrence of a name wins
#[derive(Debug, Clone)]
pub struct HeaderIndex {
    table: TableKind,
    positions: HashMap<String, usize>,
    names: Vec<String>,
}

impl HeaderIndex {
    pub fn new(table: TableKind, headers: &StringRecord) -> Self {
        let names: Vec<String> = headers
            .iter()
            .map(|h| h.trim_start_matches('\u{feff}').trim().to_string())
            .collect();

        let mut positions = HashMap::new();
        for (position, name) in names.iter().enumerate() {
            positions.entry(name.clone()).or_insert(position);
        }

        Self {
            table,
            positions,
            names,
        }
    }

    /// Position of a column the table cannot do without
    pub fn require(&self, column: &str) -> Result<usize> {
        self.positions
            .get(column)
            .copied()
            .ok_or_else(|| ComplianceError::MissingColumn {
                table: self.table.to_string(),
                column: column.to_string(),
            })
    }

    pub fn table(&self) -> TableKind {
        self.table
    }

    pub fn names(&self) -> &[String] {
        &self.names
    }
}

/// Cell text, empty when the row is shorter than the header
fn cell(record: &StringRecord, position: usize) -> &str {
    record.get(position).unwrap_or("")
}

fn optional_cell(record: &StringRecord, position: usize) -> Option<String> {
    let value = cell(record, position);
    if is_missing(value) {
        None
    } else {
        Some(value.trim().to_string())
    }
}

/// Parse a NORAD catalog number; integral floats such as "25544.0" are accepted
pub fn parse_norad_id(value: &str, context: &str) -> Result<NoradId> {
    let value = value.trim();
    let malformed = || ComplianceError::MalformedNoradId {
        context: context.to_string(),
        value: value.to_string(),
    };

    if let Ok(id) = value.parse::<NoradId>() {
        return Ok(id);
    }

    match value.parse::<f64>() {
        Ok(id) if id.fract() == 0.0 && id >= 0.0 && id <= NoradId::MAX as f64 => Ok(id as NoradId),
        _ => Err(malformed()),
    }
}

/// Parse a longitude in degrees; blanks and non-finite values are rejected
pub fn parse_longitude(value: &str, context: &str) -> Result<f64> {
    let value = value.trim();
    match value.parse::<f64>() {
        Ok(longitude) if longitude.is_finite() => Ok(longitude),
        _ => Err(ComplianceError::NonNumericLongitude {
            context: context.to_string(),
            value: value.to_string(),
        }),
    }
}

/// Parse a filing date, keeping the raw text and the year of its first four characters
pub fn parse_filing_date(value: &str, context: &str) -> Result<Option<FilingDate>> {
    if is_missing(value) {
        return Ok(None);
    }

    let raw = value.trim();
    let year = raw
        .get(..4)
        .and_then(|prefix| prefix.parse::<i32>().ok())
        .ok_or_else(|| ComplianceError::MalformedDate {
            context: context.to_string(),
            value: raw.to_string(),
        })?;

    Ok(Some(FilingDate {
        raw: raw.to_string(),
        year,
    }))
}

fn row_context(table: TableKind, row: usize) -> String {
    format!("{} row {}", table, row)
}

// =============================================================================
// Longitudes
// =============================================================================

#[derive(Debug, Clone, Copy)]
pub struct LongitudeColumns {
    norad: usize,
    longitude: usize,
}

impl LongitudeColumns {
    pub fn locate(index: &HeaderIndex) -> Result<Self> {
        Ok(Self {
            norad: index.require(longitude_columns::NORAD)?,
            longitude: index.require(longitude_columns::LONGITUDE)?,
        })
    }
}

/// One observed longitude
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LongitudeEntry {
    pub norad_id: NoradId,
    pub longitude: f64,
}

pub fn parse_longitude_record(
    record: &StringRecord,
    columns: &LongitudeColumns,
    row: usize,
) -> Result<LongitudeEntry> {
    let context = row_context(TableKind::Longitudes, row);
    Ok(LongitudeEntry {
        norad_id: parse_norad_id(cell(record, columns.norad), &context)?,
        longitude: parse_longitude(cell(record, columns.longitude), &context)?,
    })
}

// =============================================================================
// Catalog
// =============================================================================

#[derive(Debug, Clone, Copy)]
pub struct CatalogColumns {
    norad: usize,
    name: usize,
    country: usize,
}

impl CatalogColumns {
    pub fn locate(index: &HeaderIndex) -> Result<Self> {
        Ok(Self {
            norad: index.require(catalog_columns::NORAD)?,
            name: index.require(catalog_columns::NAME)?,
            country: index.require(catalog_columns::COUNTRY)?,
        })
    }
}

/// Name and operator country of one catalogued object
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CatalogEntry {
    pub norad_id: NoradId,
    pub name: String,
    pub country: String,
}

pub fn parse_catalog_record(
    record: &StringRecord,
    columns: &CatalogColumns,
    row: usize,
) -> Result<CatalogEntry> {
    let context = row_context(TableKind::Catalog, row);
    Ok(CatalogEntry {
        norad_id: parse_norad_id(cell(record, columns.norad), &context)?,
        name: cell(record, columns.name).trim().to_string(),
        country: normalize_key(cell(record, columns.country)),
    })
}

// =============================================================================
// Networks
// =============================================================================

#[derive(Debug, Clone, Copy)]
pub struct NetworkColumns {
    name: usize,
    administration: usize,
    longitude: usize,
    status: usize,
    brought_into_use: usize,
    early_stage_filing: usize,
}

impl NetworkColumns {
    pub fn locate(index: &HeaderIndex) -> Result<Self> {
        Ok(Self {
            name: index.require(network_columns::NAME)?,
            administration: index.require(network_columns::ADMINISTRATION)?,
            longitude: index.require(network_columns::LONGITUDE)?,
            status: index.require(network_columns::PLANNED_STATUS)?,
            brought_into_use: index.require(network_columns::BROUGHT_INTO_USE)?,
            early_stage_filing: index.require(network_columns::EARLY_STAGE_FILING)?,
        })
    }
}

/// Parse a network filing
///
/// A bad longitude rejects the record. A malformed filing date only drops
/// that date; the date errors are returned next to the network.
pub fn parse_network_record(
    record: &StringRecord,
    columns: &NetworkColumns,
    row: usize,
) -> Result<(Network, Vec<ComplianceError>)> {
    let name = normalize_key(cell(record, columns.name));
    let context = format!("{} ('{}')", row_context(TableKind::Networks, row), name);
    let longitude = parse_longitude(cell(record, columns.longitude), &context)?;

    let mut date_errors = Vec::new();
    let mut filing_date = |position: usize, label: &str| {
        match parse_filing_date(cell(record, position), &format!("{} {}", context, label)) {
            Ok(date) => date,
            Err(e) => {
                date_errors.push(e);
                None
            }
        }
    };
    let brought_into_use = filing_date(columns.brought_into_use, network_columns::BROUGHT_INTO_USE);
    let early_stage_filing =
        filing_date(columns.early_stage_filing, network_columns::EARLY_STAGE_FILING);

    let network = Network {
        name,
        administration: normalize_key(cell(record, columns.administration)),
        longitude,
        status: PlannedStatus::from_label(cell(record, columns.status)),
        brought_into_use,
        early_stage_filing,
    };

    Ok((network, date_errors))
}

// =============================================================================
// Suspensions
// =============================================================================

#[derive(Debug, Clone, Copy)]
pub struct SuspensionColumns {
    administration: usize,
    network_name: usize,
    suspension_type: usize,
    start: usize,
    end: usize,
}

impl SuspensionColumns {
    pub fn locate(index: &HeaderIndex) -> Result<Self> {
        Ok(Self {
            administration: index.require(suspension_columns::ADMINISTRATION)?,
            network_name: index.require(suspension_columns::NETWORK_NAME)?,
            suspension_type: index.require(suspension_columns::TYPE)?,
            start: index.require(suspension_columns::START)?,
            end: index.require(suspension_columns::END)?,
        })
    }
}

/// Dates stay as text; they are parsed when screened against a reference date
pub fn parse_suspension_record(record: &StringRecord, columns: &SuspensionColumns) -> SuspensionRecord {
    SuspensionRecord {
        administration: normalize_key(cell(record, columns.administration)),
        network_name: normalize_key(cell(record, columns.network_name)),
        suspension_type: SuspensionType::from_label(cell(record, columns.suspension_type)),
        start: optional_cell(record, columns.start),
        end: optional_cell(record, columns.end),
    }
}

// =============================================================================
// Administrations
// =============================================================================

/// Country column plus the code columns that follow it
///
/// Code columns are positional: the cells right of the country label, up to
/// the maximum number of codes a country may file under. Their header names
/// are not used and may be blank.
#[derive(Debug, Clone)]
pub struct AdministrationColumns {
    country: usize,
    codes: Vec<usize>,
}

impl AdministrationColumns {
    pub fn locate(index: &HeaderIndex) -> Result<Self> {
        let country = index.require(administration_columns::COUNTRY)?;
        let codes = (country + 1..=country + MAX_ADMINISTRATION_CODES).collect();
        Ok(Self { country, codes })
    }

    pub fn code_count(&self) -> usize {
        self.codes.len()
    }
}

/// `None` for rows without a country label
pub fn parse_administration_record(
    record: &StringRecord,
    columns: &AdministrationColumns,
) -> Option<AdministrationRow> {
    let country = cell(record, columns.country);
    if is_missing_key(country) {
        return None;
    }

    Some(AdministrationRow {
        country: normalize_key(country),
        codes: columns
            .codes
            .iter()
            .map(|&position| cell(record, position).to_string())
            .collect(),
    })
}
