//! Tests for country to administration code resolution

use super::*;
use crate::error::ComplianceError;

#[test]
fn test_codes_are_trimmed_and_deduplicated() {
    let codes = codes(&[" USA", "", "USA ", "n/a", "CAN", ""]);

    assert_eq!(
        codes,
        AdministrationCodes::Codes(vec!["USA".to_string(), "CAN".to_string()])
    );
    assert!(codes.contains("USA"));
    assert!(codes.contains(" CAN "));
    assert!(!codes.contains("G"));
}

#[test]
fn test_blank_row_is_none_on_file() {
    let codes = codes(&["", " ", "n/a"]);

    assert!(codes.is_none_on_file());
    assert!(codes.codes().is_empty());
    assert!(!codes.contains(""));
    assert!(!codes.contains("n/a"));
}

#[test]
fn test_na_code_is_kept() {
    let codes = codes(&["NA", "nan", ""]);

    assert_eq!(
        codes,
        AdministrationCodes::Codes(vec!["NA".to_string(), "nan".to_string()])
    );
    assert!(codes.contains("NA"));

    let registry = registry(&[("NA", &["NA"])]);
    assert!(registry.resolve(1, "NA").unwrap().contains("NA"));
}

#[test]
fn test_resolve_known_country() {
    let registry = registry(&[("US", &["USA"]), ("ITSO", &["USA", "F", "G"])]);

    let codes = registry.resolve(1, "ITSO").unwrap();
    assert_eq!(codes.codes(), ["USA", "F", "G"]);
    assert_eq!(registry.country_count(), 2);
}

#[test]
fn test_resolve_trims_country_label() {
    let registry = registry(&[("PRC", &["CHN"])]);

    assert!(registry.resolve(7, "  PRC ").unwrap().contains("CHN"));
    assert!(registry.contains_country("PRC "));
}

#[test]
fn test_unknown_country_is_an_error() {
    let registry = registry(&[("US", &["USA"])]);

    let err = registry.resolve(25544, "ATLANTIS").unwrap_err();
    match err {
        ComplianceError::UnknownCountry { norad_id, country } => {
            assert_eq!(norad_id, 25544);
            assert_eq!(country, "ATLANTIS");
        }
        other => panic!("expected UnknownCountry, got {:?}", other),
    }
}

#[test]
fn test_country_without_codes_resolves_to_none_on_file() {
    let registry = registry(&[("UNK", &["", ""])]);

    assert!(registry.resolve(1, "UNK").unwrap().is_none_on_file());
}

#[test]
fn test_duplicate_country_keeps_first_row() {
    let rows = vec![
        AdministrationRow {
            country: "FR".to_string(),
            codes: vec!["F".to_string()],
        },
        AdministrationRow {
            country: " FR".to_string(),
            codes: vec!["G".to_string()],
        },
    ];

    let (registry, duplicates) = AdministrationRegistry::from_rows(rows);

    assert_eq!(registry.resolve(1, "FR").unwrap().codes(), ["F"]);
    assert_eq!(duplicates.len(), 1);
    assert!(duplicates[0].contains("FR"));
}
