//! Integration tests for schedule loading from the CSV files on disk.

use std::path::Path;

use pretty_assertions::assert_eq;
use rust_decimal_macros::dec;

use paye_core::calculations::compute_tax;
use paye_core::{BracketSchedule, ScheduleError};
use paye_data::{ScheduleLoader, ScheduleLoaderError};

const BUNDLED_CSV: &str = include_str!("../data/schedules.csv");
const UNORDERED_CSV: &str = include_str!("../test-data/schedules_unordered.csv");
const INVALID_CSV: &str = include_str!("../test-data/schedules_invalid.csv");

#[test]
fn test_bundled_file_matches_builtins() {
    let records = ScheduleLoader::parse(BUNDLED_CSV.as_bytes()).expect("Failed to parse CSV");
    let set = ScheduleLoader::build(&records).expect("Failed to build schedules");

    assert_eq!(records.len(), 12);
    assert_eq!(set.len(), 2);
    assert_eq!(set.get("current"), Some(&BracketSchedule::current()));
    assert_eq!(set.get("legacy"), Some(&BracketSchedule::legacy()));
}

#[test]
fn test_load_bundled_file_from_disk() {
    let path = Path::new(env!("CARGO_MANIFEST_DIR")).join("data/schedules.csv");

    let set = ScheduleLoader::load_from_file(&path).expect("Failed to load schedules");

    let legacy = set.require("legacy").expect("legacy schedule");
    assert_eq!(compute_tax(dec!(4356000), legacy), Ok(dec!(837440)));
}

#[test]
fn test_unordered_padded_rows() {
    let records = ScheduleLoader::parse(UNORDERED_CSV.as_bytes()).expect("Failed to parse CSV");
    let set = ScheduleLoader::build(&records).expect("Failed to build schedules");

    // First appearance order: legacy before current.
    assert_eq!(set.names().collect::<Vec<_>>(), vec!["legacy", "current"]);
    assert_eq!(set.get("current"), Some(&BracketSchedule::current()));
    assert_eq!(set.get("legacy"), Some(&BracketSchedule::legacy()));
}

#[test]
fn test_invalid_schedule_is_named() {
    let records = ScheduleLoader::parse(INVALID_CSV.as_bytes()).expect("Failed to parse CSV");

    let err = ScheduleLoader::build(&records).expect_err("Should reject overlap");

    let ScheduleLoaderError::InvalidSchedule { name, source } = err else {
        panic!("Expected InvalidSchedule error, got: {:?}", err);
    };
    assert_eq!(name, "overlapping");
    assert_eq!(
        source,
        ScheduleError::NotContiguous {
            index: 1,
            expected: dec!(500000),
            found: dec!(400000),
        }
    );
}

#[test]
fn test_error_message_includes_schedule_name() {
    let records = ScheduleLoader::parse(INVALID_CSV.as_bytes()).expect("Failed to parse CSV");

    let err = ScheduleLoader::build(&records).expect_err("Should reject overlap");

    assert!(
        err.to_string().starts_with("Invalid schedule 'overlapping'"),
        "got: {}",
        err
    );
}
