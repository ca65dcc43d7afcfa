//! Compliance aggregation
//!
//! Folds per-satellite match results into the final compliance table. The
//! fold is order-preserving and never re-evaluates anything.

use crate::error::{ComplianceError, Result};
use crate::models::{ComplianceRecord, ComplianceReport, Evaluation, MatchRecord, Satellite};
use chrono::NaiveDate;
use tracing::debug;

/// Join satellites with their evaluations, position by position
///
/// `evaluations[i]` must belong to `satellites[i]`; a NORAD id mismatch or a
/// length mismatch is a processing error. Failed evaluations become
/// unresolved rows rather than being dropped.
pub fn aggregate(
    satellites: &[Satellite],
    evaluations: Vec<Result<MatchRecord>>,
    reference_date: NaiveDate,
    issues: Vec<String>,
) -> Result<ComplianceReport> {
    if satellites.len() != evaluations.len() {
        return Err(ComplianceError::ProcessingFailed {
            reason: format!(
                "{} satellites but {} evaluations",
                satellites.len(),
                evaluations.len()
            ),
        });
    }

    let mut records = Vec::with_capacity(satellites.len());
    for (satellite, evaluation) in satellites.iter().zip(evaluations) {
        let evaluation = match evaluation {
            Ok(record) if record.norad_id != satellite.norad_id => {
                return Err(ComplianceError::ProcessingFailed {
                    reason: format!(
                        "evaluation for NORAD {} joined to satellite {}",
                        record.norad_id, satellite.norad_id
                    ),
                });
            }
            Ok(record) => Evaluation::Matched(record),
            Err(e) if e.is_per_record() => Evaluation::Unresolved {
                reason: e.to_string(),
            },
            Err(e) => return Err(e),
        };

        records.push(ComplianceRecord {
            satellite: satellite.clone(),
            evaluation,
        });
    }

    let report = ComplianceReport {
        reference_date,
        records,
        issues,
    };

    debug!(
        "Aggregated {} satellites: {} compliant, {} non-compliant",
        report.records.len(),
        report.compliant_count(),
        report.non_compliant_count()
    );

    Ok(report)
}
