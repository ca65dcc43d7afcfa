//! Configuration management and validation.
//!
//! Provides the run configuration: reference evaluation date, tolerance
//! tiers, worker settings and the locations of the input tables. Values are
//! layered as defaults, then an optional TOML file, then command-line
//! overrides applied by the caller.

use crate::constants::{
    CONFIG_DIR_NAME, CONFIG_FILE_NAME, DEFAULT_BATCH_SIZE, DEFAULT_REFERENCE_DATE,
    REFERENCE_DATE_FORMATS, files, tolerances,
};
use crate::error::{ComplianceError, Result};
use crate::models::TableKind;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::debug;

/// Positional tolerance tiers
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ToleranceConfig {
    /// Tolerance for non-planned filings (degrees)
    pub non_planned_deg: f64,

    /// Tolerance for planned filings (degrees)
    pub planned_deg: f64,

    /// Tolerance for legacy filings (degrees)
    pub legacy_deg: f64,

    /// Brought-into-use year must be before this for the legacy tier
    pub legacy_brought_into_use_before: i32,

    /// Early-stage filing year must be before this for the legacy tier
    pub legacy_early_filing_before: i32,

    /// Year assumed when a filing date is absent
    pub missing_date_year: i32,
}

impl Default for ToleranceConfig {
    fn default() -> Self {
        Self {
            non_planned_deg: tolerances::NON_PLANNED_DEG,
            planned_deg: tolerances::PLANNED_DEG,
            legacy_deg: tolerances::LEGACY_DEG,
            legacy_brought_into_use_before: tolerances::LEGACY_BROUGHT_INTO_USE_BEFORE,
            legacy_early_filing_before: tolerances::LEGACY_EARLY_FILING_BEFORE,
            missing_date_year: tolerances::MISSING_DATE_YEAR,
        }
    }
}

impl ToleranceConfig {
    fn validate(&self) -> Result<()> {
        for (name, value) in [
            ("non_planned_deg", self.non_planned_deg),
            ("planned_deg", self.planned_deg),
            ("legacy_deg", self.legacy_deg),
        ] {
            if !value.is_finite() || value <= 0.0 || value > 180.0 {
                return Err(ComplianceError::Configuration {
                    message: format!("tolerances.{} must be in (0, 180], got {}", name, value),
                });
            }
        }

        if self.planned_deg > self.non_planned_deg || self.non_planned_deg > self.legacy_deg {
            return Err(ComplianceError::Configuration {
                message: format!(
                    "tolerances must satisfy planned ({}) <= non-planned ({}) <= legacy ({})",
                    self.planned_deg, self.non_planned_deg, self.legacy_deg
                ),
            });
        }

        Ok(())
    }
}

/// Locations of the five input tables
///
/// Relative file names are resolved against `data_dir`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TablePaths {
    pub data_dir: PathBuf,
    pub longitudes: PathBuf,
    pub catalog: PathBuf,
    pub networks: PathBuf,
    pub suspensions: PathBuf,
    pub administrations: PathBuf,
}

impl Default for TablePaths {
    fn default() -> Self {
        Self::in_dir(PathBuf::from("data"))
    }
}

impl TablePaths {
    /// Default file names inside `data_dir`
    pub fn in_dir(data_dir: PathBuf) -> Self {
        Self {
            data_dir,
            longitudes: PathBuf::from(files::LONGITUDES),
            catalog: PathBuf::from(files::CATALOG),
            networks: PathBuf::from(files::NETWORKS),
            suspensions: PathBuf::from(files::SUSPENSIONS),
            administrations: PathBuf::from(files::ADMINISTRATIONS),
        }
    }

    /// Resolved path of a table
    pub fn path(&self, table: TableKind) -> PathBuf {
        let file = match table {
            TableKind::Longitudes => &self.longitudes,
            TableKind::Catalog => &self.catalog,
            TableKind::Networks => &self.networks,
            TableKind::Suspensions => &self.suspensions,
            TableKind::Administrations => &self.administrations,
        };

        if file.is_absolute() {
            file.clone()
        } else {
            self.data_dir.join(file)
        }
    }

    /// Override the file of one table
    pub fn set(&mut self, table: TableKind, file: PathBuf) {
        match table {
            TableKind::Longitudes => self.longitudes = file,
            TableKind::Catalog => self.catalog = file,
            TableKind::Networks => self.networks = file,
            TableKind::Suspensions => self.suspensions = file,
            TableKind::Administrations => self.administrations = file,
        }
    }
}

/// Global configuration for a compliance run
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ComplianceConfig {
    /// Date suspensions are evaluated against (never wall-clock time)
    pub reference_date: NaiveDate,

    /// Positional tolerance tiers
    pub tolerances: ToleranceConfig,

    /// Number of satellite batches evaluated concurrently
    pub workers: usize,

    /// Satellites per blocking evaluation task
    pub batch_size: usize,

    /// Show a progress bar while evaluating
    pub show_progress: bool,

    /// Input table locations
    pub tables: TablePaths,

    /// Directory the reports are written to
    pub output_dir: PathBuf,
}

impl Default for ComplianceConfig {
    fn default() -> Self {
        let (year, month, day) = DEFAULT_REFERENCE_DATE;
        Self {
            reference_date: NaiveDate::from_ymd_opt(year, month, day).unwrap_or_default(),
            tolerances: ToleranceConfig::default(),
            workers: num_cpus::get(),
            batch_size: DEFAULT_BATCH_SIZE,
            show_progress: true,
            tables: TablePaths::default(),
            output_dir: PathBuf::from("results"),
        }
    }
}

impl ComplianceConfig {
    /// Set the reference evaluation date
    pub fn with_reference_date(mut self, reference_date: NaiveDate) -> Self {
        self.reference_date = reference_date;
        self
    }

    /// Create configuration with custom worker count
    pub fn with_workers(mut self, workers: usize) -> Self {
        self.workers = workers;
        self
    }

    /// Create configuration with custom batch size
    pub fn with_batch_size(mut self, batch_size: usize) -> Self {
        self.batch_size = batch_size;
        self
    }

    /// Configure tolerance tiers
    pub fn with_tolerances(mut self, tolerances: ToleranceConfig) -> Self {
        self.tolerances = tolerances;
        self
    }

    /// Configure input table locations
    pub fn with_tables(mut self, tables: TablePaths) -> Self {
        self.tables = tables;
        self
    }

    /// Set the report directory
    pub fn with_output_dir(mut self, output_dir: PathBuf) -> Self {
        self.output_dir = output_dir;
        self
    }

    /// Disable the progress bar
    pub fn without_progress(mut self) -> Self {
        self.show_progress = false;
        self
    }

    /// Parse configuration from TOML text; absent keys keep their defaults
    pub fn from_toml_str(text: &str) -> Result<Self> {
        toml::from_str(text).map_err(|e| ComplianceError::Configuration {
            message: format!("Invalid configuration: {}", e),
        })
    }

    /// Load configuration from a TOML file
    pub fn from_file(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)?;
        let config = Self::from_toml_str(&text)?;
        debug!("Loaded configuration from {}", path.display());
        Ok(config)
    }

    /// Default config file location (`<config dir>/itu-compliance/config.toml`)
    pub fn default_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join(CONFIG_DIR_NAME).join(CONFIG_FILE_NAME))
    }

    /// Defaults, overlaid by the explicit file or else the default file if present
    pub fn load_layered(config_file: Option<&Path>) -> Result<Self> {
        match config_file {
            Some(path) => {
                if !path.exists() {
                    return Err(ComplianceError::Configuration {
                        message: format!("Config file not found: {}", path.display()),
                    });
                }
                Self::from_file(path)
            }
            None => match Self::default_config_path().filter(|path| path.exists()) {
                Some(path) => Self::from_file(&path),
                None => {
                    debug!("No config file found, using defaults");
                    Ok(Self::default())
                }
            },
        }
    }

    /// Validate settings before a run
    pub fn validate(&self) -> Result<()> {
        self.tolerances.validate()?;

        if self.workers == 0 {
            return Err(ComplianceError::Configuration {
                message: "workers must be at least 1".to_string(),
            });
        }

        if self.batch_size == 0 {
            return Err(ComplianceError::Configuration {
                message: "batch_size must be at least 1".to_string(),
            });
        }

        Ok(())
    }
}

/// Parse a reference date given as DD.MM.YYYY or YYYY-MM-DD
pub fn parse_reference_date(value: &str) -> Result<NaiveDate> {
    let value = value.trim();
    REFERENCE_DATE_FORMATS
        .iter()
        .find_map(|format| NaiveDate::parse_from_str(value, format).ok())
        .ok_or_else(|| ComplianceError::MalformedDate {
            context: "reference date".to_string(),
            value: value.to_string(),
        })
}
