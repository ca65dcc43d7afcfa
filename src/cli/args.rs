//! Command line arguments for the compliance monitor

use crate::error::{ComplianceError, Result};
use crate::models::TableKind;
use clap::Parser;
use std::path::{Path, PathBuf};

/// Check geostationary satellites against the ITU filings of their administration
#[derive(Parser, Debug)]
#[command(name = "itu-compliance")]
#[command(about = "Check geostationary satellite longitudes against ITU coordination filings")]
#[command(version = env!("CARGO_PKG_VERSION"))]
pub struct Args {
    /// Directory holding the five input tables
    ///
    /// Tables are looked up by their default file names (longitudes.csv,
    /// satellitecatalog.csv, networks.csv, snl_suspended.csv,
    /// SpaceTrackcountries.csv) unless overridden individually.
    #[arg(value_name = "DATA_DIR")]
    pub data_dir: Option<PathBuf>,

    /// Output directory for matches.txt, compliance.txt and sat_data.csv
    #[arg(
        short = 'o',
        long = "output",
        value_name = "PATH",
        help = "Output directory for the generated reports"
    )]
    pub output_dir: Option<PathBuf>,

    /// Date the suspension list is evaluated at (DD.MM.YYYY or YYYY-MM-DD)
    #[arg(long = "date", value_name = "DD.MM.YYYY")]
    pub reference_date: Option<String>,

    /// Path to configuration file
    ///
    /// TOML configuration file for tolerances and processing settings. If not
    /// specified, looks for ~/.config/itu-compliance/config.toml
    #[arg(
        short = 'c',
        long = "config",
        value_name = "FILE",
        help = "Path to configuration file (TOML format)"
    )]
    pub config_file: Option<PathBuf>,

    /// Longitude telemetry table
    #[arg(long = "longitudes", value_name = "FILE")]
    pub longitudes: Option<PathBuf>,

    /// Satellite catalog table
    #[arg(long = "catalog", value_name = "FILE")]
    pub catalog: Option<PathBuf>,

    /// Coordination network filings table
    #[arg(long = "networks", value_name = "FILE")]
    pub networks: Option<PathBuf>,

    /// Suspended networks list
    #[arg(long = "suspensions", value_name = "FILE")]
    pub suspensions: Option<PathBuf>,

    /// Country to administration code table
    #[arg(long = "administrations", value_name = "FILE")]
    pub administrations: Option<PathBuf>,

    /// Number of parallel workers
    #[arg(
        short = 'j',
        long = "workers",
        value_name = "COUNT",
        help = "Number of parallel evaluation workers (default: CPU count)"
    )]
    pub workers: Option<usize>,

    /// Satellites evaluated per task
    #[arg(long = "batch-size", value_name = "COUNT")]
    pub batch_size: Option<usize>,

    /// Logging verbosity level
    #[arg(
        short = 'v',
        long = "verbose",
        action = clap::ArgAction::Count,
        help = "Increase logging verbosity (-v: info, -vv: debug, -vvv: trace)"
    )]
    pub verbose: u8,

    /// Suppress output (quiet mode)
    ///
    /// Only show errors. Overrides verbose settings.
    #[arg(
        short = 'q',
        long = "quiet",
        help = "Suppress all output except errors",
        conflicts_with = "verbose"
    )]
    pub quiet: bool,

    /// Hide the progress bar
    #[arg(long = "no-progress")]
    pub no_progress: bool,
}

impl Args {
    /// Validate arguments that clap cannot check on its own
    pub fn validate(&self) -> Result<()> {
        if let Some(data_dir) = &self.data_dir {
            if !data_dir.is_dir() {
                return Err(ComplianceError::Configuration {
                    message: format!("Data directory does not exist: {}", data_dir.display()),
                });
            }
        }

        if self.workers == Some(0) {
            return Err(ComplianceError::Configuration {
                message: "Number of workers must be greater than 0".to_string(),
            });
        }

        if self.batch_size == Some(0) {
            return Err(ComplianceError::Configuration {
                message: "Batch size must be greater than 0".to_string(),
            });
        }

        Ok(())
    }

    pub fn get_log_level(&self) -> &'static str {
        if self.quiet {
            "error"
        } else {
            match self.verbose {
                0 => "warn",
                1 => "info",
                2 => "debug",
                _ => "trace",
            }
        }
    }

    pub fn show_progress(&self) -> bool {
        !self.quiet && !self.no_progress
    }

    /// Table files given explicitly on the command line
    pub fn table_overrides(&self) -> Vec<(TableKind, &Path)> {
        [
            (TableKind::Longitudes, &self.longitudes),
            (TableKind::Catalog, &self.catalog),
            (TableKind::Networks, &self.networks),
            (TableKind::Suspensions, &self.suspensions),
            (TableKind::Administrations, &self.administrations),
        ]
        .into_iter()
        .filter_map(|(table, path)| path.as_deref().map(|path| (table, path)))
        .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_defaults() {
        let args = Args::parse_from(["itu-compliance"]);

        assert!(args.data_dir.is_none());
        assert_eq!(args.get_log_level(), "warn");
        assert!(args.show_progress());
        assert!(args.table_overrides().is_empty());
        assert!(args.validate().is_ok());
    }

    #[test]
    fn test_full_command_line() {
        let temp_dir = TempDir::new().unwrap();
        let data_dir = temp_dir.path().to_str().unwrap();

        let args = Args::parse_from([
            "itu-compliance",
            data_dir,
            "-o",
            "out",
            "--date",
            "01.01.2024",
            "--networks",
            "/tmp/networks.csv",
            "-j",
            "4",
            "-vv",
            "--no-progress",
        ]);

        assert!(args.validate().is_ok());
        assert_eq!(args.output_dir, Some(PathBuf::from("out")));
        assert_eq!(args.reference_date.as_deref(), Some("01.01.2024"));
        assert_eq!(args.workers, Some(4));
        assert_eq!(args.get_log_level(), "debug");
        assert!(!args.show_progress());
        assert_eq!(
            args.table_overrides(),
            vec![(TableKind::Networks, Path::new("/tmp/networks.csv"))]
        );
    }

    #[test]
    fn test_quiet_conflicts_with_verbose() {
        assert!(Args::try_parse_from(["itu-compliance", "-q", "-v"]).is_err());

        let args = Args::parse_from(["itu-compliance", "-q"]);
        assert_eq!(args.get_log_level(), "error");
        assert!(!args.show_progress());
    }

    #[test]
    fn test_validate_rejects_bad_values() {
        let args = Args::parse_from(["itu-compliance", "/nonexistent/data"]);
        assert!(args.validate().is_err());

        let args = Args::parse_from(["itu-compliance", "-j", "0"]);
        assert!(args.validate().is_err());
    }
}
