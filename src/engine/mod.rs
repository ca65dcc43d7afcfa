//! Compliance evaluation engine.
//!
//! Runs the matching pipeline over every satellite of a run:
//!
//! 1. [`administration`] resolves the operator country to administration codes
//! 2. [`suspension`] screens out networks totally suspended on the reference date
//! 3. [`proximity`] keeps the networks whose tolerance tier covers the longitude
//! 4. [`aggregate`] folds the match lists into the compliance table
//!
//! Reference tables are shared read-only between evaluation tasks. The
//! country resolution and suspension screen are computed once per distinct
//! country, then satellites are evaluated in batches on the blocking pool
//! and joined back in submission order.

pub mod aggregate;
pub mod administration;
pub mod proximity;
pub mod suspension;

#[cfg(test)]
pub mod tests;

pub use administration::{AdministrationCodes, AdministrationRegistry, AdministrationRow};
pub use aggregate::aggregate;
pub use proximity::{circular_difference, match_networks, qualifying_tiers};
pub use suspension::{SuspensionScreen, SuspensionState, suspended_networks, suspension_state};

use crate::config::{ComplianceConfig, ToleranceConfig};
use crate::error::{ComplianceError, Result};
use crate::models::{ComplianceReport, MatchRecord, Network, NoradId, Satellite, SuspensionRecord};
use crate::tables::ReferenceTables;

use futures::stream::{self, StreamExt};
use indicatif::{ProgressBar, ProgressStyle};
use std::collections::HashMap;
use std::sync::Arc;
use tokio::task;
use tracing::{debug, info};

/// Resolved codes and suspension screen for one operator country
#[derive(Debug)]
pub struct CountryContext {
    pub codes: AdministrationCodes,
    pub screen: SuspensionScreen,
}

/// Compliance engine over one set of reference tables
#[derive(Debug, Clone)]
pub struct ComplianceEngine {
    networks: Arc<Vec<Network>>,
    suspensions: Arc<Vec<SuspensionRecord>>,
    administrations: Arc<AdministrationRegistry>,
    config: ComplianceConfig,
}

impl ComplianceEngine {
    /// Create an engine over already loaded reference tables
    pub fn new(
        networks: Vec<Network>,
        suspensions: Vec<SuspensionRecord>,
        administrations: AdministrationRegistry,
        config: ComplianceConfig,
    ) -> Self {
        Self {
            networks: Arc::new(networks),
            suspensions: Arc::new(suspensions),
            administrations: Arc::new(administrations),
            config,
        }
    }

    /// Split loaded tables into an engine and the satellites to evaluate
    pub fn from_tables(tables: ReferenceTables, config: ComplianceConfig) -> (Self, Vec<Satellite>) {
        let ReferenceTables {
            satellites,
            networks,
            suspensions,
            administrations,
        } = tables;
        (
            Self::new(networks, suspensions, administrations, config),
            satellites,
        )
    }

    pub fn config(&self) -> &ComplianceConfig {
        &self.config
    }

    /// Resolve a country and screen its suspended networks
    pub fn country_context(&self, norad_id: NoradId, country: &str) -> Result<CountryContext> {
        let codes = self.administrations.resolve(norad_id, country)?.clone();
        let screen = suspended_networks(&self.suspensions, &codes, self.config.reference_date);
        Ok(CountryContext { codes, screen })
    }

    /// Evaluate a single satellite
    pub fn evaluate_satellite(&self, satellite: &Satellite) -> Result<MatchRecord> {
        let context = self.country_context(satellite.norad_id, &satellite.country)?;
        Ok(match_with_context(
            satellite,
            &context,
            &self.networks,
            &self.config.tolerances,
        ))
    }

    /// Evaluate every satellite and aggregate the compliance table
    ///
    /// Satellites whose country cannot be resolved stay in the table as
    /// unresolved rows; unreadable suspension records are listed in the
    /// report's issues.
    pub async fn run(&self, satellites: &[Satellite]) -> Result<ComplianceReport> {
        // Resolve codes and suspension screens once per country
        let (contexts, issues) = self.build_country_contexts(satellites);
        let contexts = Arc::new(contexts);

        info!(
            "Evaluating {} satellites across {} countries",
            satellites.len(),
            contexts.len()
        );

        // Setup progress tracking
        let pb = if self.config.show_progress {
            let pb = ProgressBar::new(satellites.len() as u64);
            if let Ok(style) = ProgressStyle::default_bar()
                .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} ({eta}) {msg}")
            {
                pb.set_style(style.progress_chars("#>-"));
            }
            pb.set_message("Matching satellites");
            pb
        } else {
            ProgressBar::hidden()
        };

        // Owned chunks so each batch can move onto the blocking pool
        let batch_size = self.config.batch_size.max(1);
        let batches: Vec<Vec<Satellite>> = satellites
            .chunks(batch_size)
            .map(|chunk| chunk.to_vec())
            .collect();
        debug!(
            "Using {} batches of up to {} satellites with {} workers",
            batches.len(),
            batch_size,
            self.config.workers
        );

        // `buffered` yields in submission order, whatever order tasks finish in
        let batch_results: Vec<Result<Vec<Result<MatchRecord>>>> = stream::iter(batches)
            .map(|batch| {
                let contexts = Arc::clone(&contexts);
                let networks = Arc::clone(&self.networks);
                let tolerances = self.config.tolerances.clone();
                let pb = pb.clone();
                async move {
                    let count = batch.len() as u64;
                    let evaluated = task::spawn_blocking(move || {
                        batch
                            .iter()
                            .map(|satellite| {
                                evaluate_in_country(satellite, &contexts, &networks, &tolerances)
                            })
                            .collect::<Vec<_>>()
                    })
                    .await
                    .map_err(|e| ComplianceError::ProcessingFailed {
                        reason: format!("Evaluation task failed: {}", e),
                    })?;
                    pb.inc(count);
                    Ok::<_, ComplianceError>(evaluated)
                }
            })
            .buffered(self.config.workers.max(1))
            .collect()
            .await;

        pb.finish_with_message("All satellites matched");

        // Flatten batches back into one evaluation per satellite
        let mut evaluations = Vec::with_capacity(satellites.len());
        for batch in batch_results {
            evaluations.extend(batch?);
        }

        aggregate(satellites, evaluations, self.config.reference_date, issues)
    }

    /// One context per distinct known country; unknown countries are left out
    fn build_country_contexts(
        &self,
        satellites: &[Satellite],
    ) -> (HashMap<String, CountryContext>, Vec<String>) {
        let mut contexts = HashMap::new();
        let mut issues = Vec::new();

        for satellite in satellites {
            let country = satellite.country.trim();
            // Seen already, or unknown: evaluation reports UnknownCountry per satellite
            if contexts.contains_key(country) || !self.administrations.contains_country(country) {
                continue;
            }

            if let Ok(context) = self.country_context(satellite.norad_id, country) {
                issues.extend(
                    context
                        .screen
                        .issues
                        .iter()
                        .map(|e| format!("Suspensions ({}): {}", country, e)),
                );
                contexts.insert(country.to_string(), context);
            }
        }

        debug!(
            "Built {} country contexts, {} suspension issues",
            contexts.len(),
            issues.len()
        );
        (contexts, issues)
    }
}

fn evaluate_in_country(
    satellite: &Satellite,
    contexts: &HashMap<String, CountryContext>,
    networks: &[Network],
    tolerances: &ToleranceConfig,
) -> Result<MatchRecord> {
    let context = contexts.get(satellite.country.trim()).ok_or_else(|| {
        ComplianceError::UnknownCountry {
            norad_id: satellite.norad_id,
            country: satellite.country.trim().to_string(),
        }
    })?;

    Ok(match_with_context(satellite, context, networks, tolerances))
}

fn match_with_context(
    satellite: &Satellite,
    context: &CountryContext,
    networks: &[Network],
    tolerances: &ToleranceConfig,
) -> MatchRecord {
    MatchRecord {
        norad_id: satellite.norad_id,
        networks: match_networks(
            satellite.longitude,
            networks,
            &context.codes,
            &context.screen,
            tolerances,
        ),
    }
}
