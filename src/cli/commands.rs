//! Compliance run command
//!
//! Wires the library together for the binary: logging, layered
//! configuration, table loading, evaluation, report writing and the
//! colored run summary.

use crate::cli::args::Args;
use crate::config::{ComplianceConfig, parse_reference_date};
use crate::engine::ComplianceEngine;
use crate::models::{ComplianceReport, RunStats};
use crate::report::{ReportPaths, ReportWriter};
use crate::tables::ReferenceTables;
use anyhow::{Context, Result};
use colored::*;
use indicatif::HumanDuration;
use std::time::{Duration, Instant};
use tracing::{debug, info, warn};

/// Issues printed in the summary before truncating
const MAX_LISTED_ISSUES: usize = 10;

/// Run one compliance evaluation end to end
pub async fn run(args: Args) -> Result<RunStats> {
    let start_time = Instant::now();

    // Initialize logging based on verbosity
    setup_logging(&args)?;
    info!("Starting ITU compliance run");
    debug!("Command line arguments: {:?}", args);

    // Validate arguments and layer the configuration
    args.validate()?;
    let config = load_configuration(&args)?;
    debug!("Loaded configuration: {:?}", config);

    // Table loading is blocking file I/O
    let paths = config.tables.clone();
    let (tables, load_stats) = tokio::task::spawn_blocking(move || ReferenceTables::load(&paths))
        .await
        .context("Table loading task failed")?
        .context("Failed to load reference tables")?;

    // Evaluate every satellite
    let (engine, satellites) = ComplianceEngine::from_tables(tables, config.clone());
    let mut report = engine
        .run(&satellites)
        .await
        .context("Compliance evaluation failed")?;

    // Load issues first, then those found while screening suspensions
    let mut issues = load_stats.errors;
    issues.append(&mut report.issues);
    report.issues = issues;

    // Write matches.txt, compliance.txt and sat_data.csv
    let writer = ReportWriter::new(config.output_dir.clone());
    let report_paths = writer.write(&report).with_context(|| {
        format!(
            "Failed to write reports to {}",
            config.output_dir.display()
        )
    })?;

    let stats = RunStats {
        satellites_evaluated: report.records.len(),
        compliant: report.compliant_count(),
        non_compliant: report.non_compliant_count(),
        unresolved: report.unresolved().count(),
        data_issues: report.issues.len(),
        output_dir: config.output_dir.clone(),
        processing_time_ms: start_time.elapsed().as_millis(),
    };

    // Display summary unless in quiet mode
    if !args.quiet {
        print_summary(&stats, &report, &report_paths);
    }

    Ok(stats)
}

/// Set up structured logging to stderr
pub fn setup_logging(args: &Args) -> Result<()> {
    use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

    let log_level = args.get_log_level();

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("itu_compliance={}", log_level)));

    if args.quiet {
        tracing_subscriber::registry()
            .with(filter)
            .with(
                fmt::layer()
                    .with_target(false)
                    .with_level(true)
                    .with_writer(std::io::stderr)
                    .compact(),
            )
            .try_init()
            .context("Failed to initialize logging")?;
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(
                fmt::layer()
                    .with_target(false)
                    .with_level(true)
                    .with_timer(fmt::time::uptime())
                    .with_writer(std::io::stderr),
            )
            .try_init()
            .context("Failed to initialize logging")?;
    }

    debug!("Logging initialized at level: {}", log_level);
    Ok(())
}

/// Load configuration using the layered approach (defaults -> file -> args)
pub fn load_configuration(args: &Args) -> Result<ComplianceConfig> {
    match &args.config_file {
        Some(path) => info!("Using config file: {}", path.display()),
        None => debug!("No config file given, checking default location"),
    }

    let mut config = ComplianceConfig::load_layered(args.config_file.as_deref())
        .context("Failed to read configuration file")?;

    apply_cli_overrides(&mut config, args)?;
    config.validate().context("Invalid configuration")?;

    Ok(config)
}

/// Apply command line overrides on top of the loaded configuration
pub fn apply_cli_overrides(config: &mut ComplianceConfig, args: &Args) -> Result<()> {
    if let Some(data_dir) = &args.data_dir {
        config.tables.data_dir = data_dir.clone();
    }
    for (table, path) in args.table_overrides() {
        config.tables.set(table, path.to_path_buf());
    }
    if let Some(output_dir) = &args.output_dir {
        config.output_dir = output_dir.clone();
    }
    if let Some(date) = &args.reference_date {
        config.reference_date = parse_reference_date(date)
            .with_context(|| format!("Invalid --date value '{}'", date))?;
    }
    if let Some(workers) = args.workers {
        config.workers = workers;
    }
    if let Some(batch_size) = args.batch_size {
        config.batch_size = batch_size;
    }
    if !args.show_progress() {
        config.show_progress = false;
    }

    Ok(())
}

/// Print the colored run summary to stdout
pub fn print_summary(stats: &RunStats, report: &ComplianceReport, paths: &ReportPaths) {
    println!("\n{}", "Compliance Summary".bright_green().bold());
    println!("{}", "━".repeat(40));
    println!(
        "   Reference date:        {}",
        report.reference_date.format("%d.%m.%Y")
    );
    println!(
        "   Satellites evaluated:  {}",
        stats.satellites_evaluated.to_string().bright_white().bold()
    );
    println!(
        "   Compliant:             {}",
        stats.compliant.to_string().bright_green().bold()
    );
    println!(
        "   Non-compliant:         {}",
        stats.non_compliant.to_string().bright_red().bold()
    );
    if stats.unresolved > 0 {
        println!(
            "   Unresolved:            {}",
            stats.unresolved.to_string().bright_yellow().bold()
        );
        for record in report.unresolved() {
            println!(
                "     • {} ({}): country '{}'",
                record.satellite.norad_id, record.satellite.name, record.satellite.country
            );
        }
    }
    if stats.data_issues > 0 {
        println!(
            "   Data issues:           {}",
            stats.data_issues.to_string().bright_yellow().bold()
        );
        for issue in report.issues.iter().take(MAX_LISTED_ISSUES) {
            println!("     • {}", issue);
        }
        if report.issues.len() > MAX_LISTED_ISSUES {
            warn!(
                "{} further data issues not listed",
                report.issues.len() - MAX_LISTED_ISSUES
            );
            println!(
                "     … and {} more (run with -v to see all)",
                report.issues.len() - MAX_LISTED_ISSUES
            );
        }
    }
    println!(
        "   Processing time:       {}",
        HumanDuration(Duration::from_millis(stats.processing_time_ms as u64))
    );

    println!("\n{}", "Output Files".bright_green().bold());
    for path in [&paths.matches, &paths.compliance_text, &paths.compliance_csv] {
        println!("   • {}", path.display());
    }
    println!();
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::TableKind;
    use chrono::NaiveDate;
    use clap::Parser;
    use std::path::PathBuf;

    #[test]
    fn test_cli_overrides_take_precedence() {
        let args = Args::parse_from([
            "itu-compliance",
            "--date",
            "2024-01-01",
            "--suspensions",
            "/srv/snl.csv",
            "-o",
            "/tmp/results",
            "-j",
            "3",
            "--batch-size",
            "8",
            "-q",
        ]);
        let mut config = ComplianceConfig::default();

        apply_cli_overrides(&mut config, &args).unwrap();

        assert_eq!(
            config.reference_date,
            NaiveDate::from_ymd_opt(2024, 1, 1).unwrap()
        );
        assert_eq!(
            config.tables.path(TableKind::Suspensions),
            PathBuf::from("/srv/snl.csv")
        );
        assert_eq!(config.output_dir, PathBuf::from("/tmp/results"));
        assert_eq!(config.workers, 3);
        assert_eq!(config.batch_size, 8);
        assert!(!config.show_progress);
    }

    #[test]
    fn test_bad_date_override_is_rejected() {
        let args = Args::parse_from(["itu-compliance", "--date", "tomorrow"]);
        let mut config = ComplianceConfig::default();

        assert!(apply_cli_overrides(&mut config, &args).is_err());
    }
}
