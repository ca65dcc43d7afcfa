//! Application constants for the compliance monitor
//!
//! Column names of the input tables, sentinel values, date formats and the
//! default tolerance thresholds used throughout the crate.

// =============================================================================
// Input Table Files
// =============================================================================

/// Default file names looked up inside the data directory
pub mod files {
    pub const LONGITUDES: &str = "longitudes.csv";
    pub const CATALOG: &str = "satellitecatalog.csv";
    pub const NETWORKS: &str = "networks.csv";
    pub const SUSPENSIONS: &str = "snl_suspended.csv";
    pub const ADMINISTRATIONS: &str = "SpaceTrackcountries.csv";
}

/// Default file names written to the output directory
pub mod outputs {
    pub const MATCHES: &str = "matches.txt";
    pub const COMPLIANCE_TEXT: &str = "compliance.txt";
    pub const COMPLIANCE_CSV: &str = "sat_data.csv";
}

// =============================================================================
// Column Names
// =============================================================================

/// Longitude telemetry table
pub mod longitude_columns {
    pub const NORAD: &str = "NORAD";
    pub const LONGITUDE: &str = "Longitude";
}

/// Satellite catalog table
pub mod catalog_columns {
    pub const NORAD: &str = "NORAD";
    pub const NAME: &str = "SATNAME";
    pub const COUNTRY: &str = "COUNTRY";
}

/// Coordination network filings table
pub mod network_columns {
    pub const NAME: &str = "Network Name";
    pub const ADMINISTRATION: &str = "ITU Administration";
    pub const LONGITUDE: &str = "Longitude";
    pub const PLANNED_STATUS: &str = "Planned or Non-Planned";
    pub const BROUGHT_INTO_USE: &str = "Brought-into-Use Date";
    pub const EARLY_STAGE_FILING: &str = "Early-Stage Filing Date";
}

/// Suspended networks list
pub mod suspension_columns {
    pub const ADMINISTRATION: &str = "ADM";
    /// The published list keeps the HTML entity in its header
    pub const NETWORK_NAME: &str = "Satellite&nbsp;Name";
    pub const TYPE: &str = "Type";
    pub const START: &str = "Date of suspension";
    pub const END: &str = "Date of resumption of operation";
}

/// Country to administration code reference table
pub mod administration_columns {
    pub const COUNTRY: &str = "SpaceTrack Abbreviation";
}

/// Output table columns
pub mod output_columns {
    pub const NORAD: &str = "NORAD";
    pub const NAME: &str = "SATNAME";
    pub const COUNTRY: &str = "COUNTRY";
    pub const LONGITUDE: &str = "LONGITUDE";
    pub const COMPLIANCE: &str = "COMPLIANCE";
}

// =============================================================================
// Values and Formats
// =============================================================================

/// Maximum number of administration code columns per country row
pub const MAX_ADMINISTRATION_CODES: usize = 31;

/// Cell values that mean "no value" in the published tables
pub const MISSING_VALUE_MARKERS: &[&str] = &["", "n/a", "N/A", "nan", "NaN", "NA"];

/// Markers for blank join-key cells (country labels, administration codes);
/// two-letter codes such as "NA" are real values there
pub const MISSING_KEY_MARKERS: &[&str] = &["", "n/a"];

/// Suspension type marking a total suspension
pub const TOTAL_SUSPENSION: &str = "T";

/// Planned status labels
pub const PLANNED_LABEL: &str = "Planned";
pub const NON_PLANNED_LABEL: &str = "Non-Planned";

/// Date format of the suspension list (day.month.year)
pub const SUSPENSION_DATE_FORMAT: &str = "%d.%m.%Y";

/// Accepted formats for the reference date on the command line
pub const REFERENCE_DATE_FORMATS: &[&str] = &["%d.%m.%Y", "%Y-%m-%d"];

/// Date the published sample tables were collected (05.08.2023)
pub const DEFAULT_REFERENCE_DATE: (i32, u32, u32) = (2023, 8, 5);

// =============================================================================
// Tolerance Defaults
// =============================================================================

/// Positional tolerance tiers in degrees of longitude
pub mod tolerances {
    /// Non-planned filings
    pub const NON_PLANNED_DEG: f64 = 0.5;

    /// Planned filings
    pub const PLANNED_DEG: f64 = 0.1;

    /// Legacy filings (brought into use and filed early enough)
    pub const LEGACY_DEG: f64 = 1.0;

    /// Brought-into-use year must be strictly before this for the legacy tier
    pub const LEGACY_BROUGHT_INTO_USE_BEFORE: i32 = 1987;

    /// Early-stage filing year must be strictly before this for the legacy tier
    pub const LEGACY_EARLY_FILING_BEFORE: i32 = 1982;

    /// Year assumed for filings without a date; never satisfies the legacy tier
    pub const MISSING_DATE_YEAR: i32 = 2000;

    /// Slack on every tier boundary so decimal inputs such as 100.1 / 100.2 land
    /// on the boundary instead of 1e-14 past it
    pub const BOUNDARY_EPSILON_DEG: f64 = 1e-9;
}

// =============================================================================
// Processing Defaults
// =============================================================================

/// Satellites evaluated per blocking task
pub const DEFAULT_BATCH_SIZE: usize = 256;

/// Configuration directory name under the user config dir
pub const CONFIG_DIR_NAME: &str = "itu-compliance";

/// Configuration file name
pub const CONFIG_FILE_NAME: &str = "config.toml";
