//! Integration tests for common allocation workflows.
//!
//! These tests go through the facade crate the way an embedding SDK would.

use allot::prelude::*;
use serde_json::json;

// =============================================================================
// Reference Scenario
// =============================================================================

fn reference_datafile() -> Datafile {
    serde_json::from_value(json!({
        "experiments": {
            "e1": {
                "id": "e1",
                "percentage": 50,
                "variations": [
                    { "id": "a", "percentage": 30 },
                    { "id": "b", "percentage": 20 }
                ]
            }
        },
        "features": {
            "f1": { "id": "f1", "percentage": 25 }
        }
    }))
    .unwrap()
}

#[test]
fn test_reference_scenario() {
    let allocator = Allocator::new(reference_datafile(), 10_000);

    assert_eq!(allocator.feature_allocation("f1"), Some(Allocation::new("f1", 2_500)));
    assert_eq!(allocator.experiment_allocation("e1"), Some(Allocation::new("e1", 5_000)));
    assert_eq!(
        allocator.experiment_allocations("e1").unwrap(),
        vec![Allocation::new("a", 3_000), Allocation::new("b", 5_000)]
    );
}

#[test]
fn test_small_bucket_space_truncates() {
    let datafile = Datafile::new().with_feature(Feature::new("half", 50.0));
    let allocator = Allocator::new(datafile, 3);

    assert_eq!(allocator.feature_allocation("half"), Some(Allocation::new("half", 1)));
}

// =============================================================================
// Absence vs Failure
// =============================================================================

#[test]
fn test_absence_is_not_an_error() {
    let allocator = Allocator::new(reference_datafile(), 10_000);

    assert_eq!(allocator.feature_allocation("nonexistent"), None);
    assert_eq!(allocator.experiment_allocation("nonexistent"), None);
}

#[test]
fn test_variation_lookup_on_unknown_experiment_fails() {
    let allocator = Allocator::new(reference_datafile(), 10_000);

    match allocator.experiment_allocations("nonexistent") {
        Err(AllocationError::ExperimentNotFound(id)) => assert_eq!(id, "nonexistent"),
        other => panic!("expected ExperimentNotFound, got {:?}", other),
    }
}

// =============================================================================
// Downstream Consumption
// =============================================================================

#[test]
fn test_variation_ranges_cover_experiment_share() {
    let allocator = Allocator::new(reference_datafile(), 10_000);

    let ranges = allocator.experiment_ranges("e1").unwrap();
    let covered: u64 = ranges.iter().map(BucketRange::len).sum();

    assert_eq!(covered, 5_000);
    assert_eq!(ranges.first().map(|r| r.start), Some(0));
    assert_eq!(ranges.last().map(|r| r.end), Some(5_000));
}

#[test]
fn test_allocations_serialize_for_other_sdks() {
    let allocator = Allocator::new(reference_datafile(), 10_000);

    let encoded = serde_json::to_value(allocator.experiment_allocations("e1").unwrap()).unwrap();
    assert_eq!(
        encoded,
        json!([
            { "id": "a", "rangeEnd": 3000 },
            { "id": "b", "rangeEnd": 5000 }
        ])
    );
}

#[test]
fn test_configured_allocator_from_loaded_datafile() {
    let raw = serde_json::to_string(&reference_datafile()).unwrap();
    let datafile = DatafileLoader::new(FileFormat::Json).parse(&raw).unwrap();

    let allocator = AllocatorConfig::builder()
        .config(AllocatorConfig::default())
        .datafile(datafile)
        .build()
        .unwrap();

    assert_eq!(allocator.max_buckets(), allot::DEFAULT_MAX_BUCKETS);
    assert_eq!(allocator.feature_allocations(), vec![Allocation::new("f1", 2_500)]);
}
