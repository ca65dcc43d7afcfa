//! End-to-end engine runs over in-memory tables

use super::*;
use crate::engine::ComplianceEngine;
use crate::error::ComplianceError;
use crate::models::{Evaluation, Verdict};

fn engine(suspensions: Vec<SuspensionRecord>) -> ComplianceEngine {
    let networks = vec![
        network("X", "USA", 100.4, PlannedStatus::NonPlanned),
        network("EUTELSAT-A", "F", 10.0, PlannedStatus::NonPlanned),
    ];
    let administrations = registry(&[("US", &["USA"]), ("FR", &["F"]), ("NONE", &[])]);

    ComplianceEngine::new(networks, suspensions, administrations, test_config())
}

#[test]
fn test_evaluate_satellite_matches_own_network() {
    let engine = engine(vec![]);

    let record = engine
        .evaluate_satellite(&satellite(1, "SAT-A", "US", 100.0))
        .unwrap();

    assert_eq!(record.norad_id, 1);
    let names: Vec<&str> = record.networks.iter().map(|n| n.name.as_str()).collect();
    assert_eq!(names, vec!["X"]);
}

#[test]
fn test_evaluate_satellite_with_suspended_network() {
    let engine = engine(vec![suspension(
        "USA",
        "X",
        "T",
        Some("01.01.2020"),
        Some("31.12.2023"),
    )]);

    let record = engine
        .evaluate_satellite(&satellite(1, "SAT-A", "US", 100.0))
        .unwrap();

    assert!(record.networks.is_empty());
    assert!(!record.is_compliant());
}

#[test]
fn test_evaluate_satellite_unknown_country() {
    let engine = engine(vec![]);

    let result = engine.evaluate_satellite(&satellite(9, "SAT-Z", "ATLANTIS", 100.0));

    assert!(matches!(
        result,
        Err(ComplianceError::UnknownCountry { norad_id: 9, .. })
    ));
}

#[tokio::test]
async fn test_run_preserves_order_and_verdicts() {
    let engine = engine(vec![]);
    let satellites = vec![
        satellite(1, "SAT-A", "US", 100.0),
        satellite(2, "SAT-B", "FR", 10.3),
        satellite(3, "SAT-C", "US", 50.0),
        satellite(4, "SAT-D", "ATLANTIS", 10.0),
        satellite(5, "SAT-E", "NONE", 10.0),
    ];

    let report = engine.run(&satellites).await.unwrap();

    let ids: Vec<u32> = report.records.iter().map(|r| r.satellite.norad_id).collect();
    assert_eq!(ids, vec![1, 2, 3, 4, 5]);

    let verdicts: Vec<Option<Verdict>> = report.records.iter().map(|r| r.verdict()).collect();
    assert_eq!(
        verdicts,
        vec![
            Some(Verdict::Yes),
            Some(Verdict::Yes),
            Some(Verdict::No),
            None,
            Some(Verdict::No),
        ]
    );
    assert!(matches!(
        report.records[3].evaluation,
        Evaluation::Unresolved { .. }
    ));
    assert_eq!(report.compliant_count(), 2);
    assert_eq!(report.non_compliant_count(), 2);
    assert_eq!(report.unresolved().count(), 1);
}

#[tokio::test]
async fn test_run_excludes_suspended_network() {
    let engine = engine(vec![suspension(
        "USA",
        "X",
        "T",
        Some("01.01.2020"),
        Some("31.12.2023"),
    )]);

    let report = engine
        .run(&[satellite(1, "SAT-A", "US", 100.0)])
        .await
        .unwrap();

    assert_eq!(report.records[0].verdict(), Some(Verdict::No));
    assert!(report.records[0].matches().is_empty());
}

#[tokio::test]
async fn test_run_after_resumption_is_compliant() {
    let suspensions = vec![suspension(
        "USA",
        "X",
        "T",
        Some("01.01.2020"),
        Some("31.12.2023"),
    )];
    let networks = vec![network("X", "USA", 100.4, PlannedStatus::NonPlanned)];
    let config = test_config().with_reference_date(date(1, 1, 2024));
    let engine = ComplianceEngine::new(networks, suspensions, registry(&[("US", &["USA"])]), config);

    let report = engine
        .run(&[satellite(1, "SAT-A", "US", 100.0)])
        .await
        .unwrap();

    assert_eq!(report.records[0].verdict(), Some(Verdict::Yes));
}

#[tokio::test]
async fn test_run_surfaces_malformed_suspension_dates() {
    let engine = engine(vec![suspension("USA", "X", "T", Some("yesterday"), None)]);

    let report = engine
        .run(&[satellite(1, "SAT-A", "US", 100.0)])
        .await
        .unwrap();

    assert_eq!(report.issues.len(), 1);
    assert!(report.issues[0].contains("yesterday"));
    assert_eq!(report.records[0].verdict(), Some(Verdict::Yes));
}

#[tokio::test]
async fn test_run_is_deterministic_across_worker_counts() {
    let networks: Vec<_> = (0..36)
        .map(|i| network(&format!("NET-{}", i), "USA", i as f64 * 10.0, PlannedStatus::NonPlanned))
        .collect();
    let satellites: Vec<_> = (0..100)
        .map(|i| satellite(i, &format!("SAT-{}", i), "US", (i as f64 * 3.7) % 360.0))
        .collect();

    let mut previous: Option<Vec<String>> = None;
    for (workers, batch_size) in [(1, 1), (3, 7), (8, 256)] {
        let config = test_config().with_workers(workers).with_batch_size(batch_size);
        let engine = ComplianceEngine::new(
            networks.clone(),
            vec![],
            registry(&[("US", &["USA"])]),
            config,
        );

        let report = engine.run(&satellites).await.unwrap();
        let labels: Vec<String> = report.records.iter().map(|r| r.verdict_label()).collect();

        if let Some(previous) = &previous {
            assert_eq!(previous, &labels);
        }
        previous = Some(labels);
    }
}

#[tokio::test]
async fn test_run_with_no_satellites() {
    let engine = engine(vec![]);

    let report = engine.run(&[]).await.unwrap();

    assert!(report.records.is_empty());
}
