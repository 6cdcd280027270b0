//! Integration tests for the geofence engine.
//!
//! These tests verify the complete evaluation flow including:
//! - Configuration sections → validated geofence set
//! - Multi-cycle evaluation with moving tracked points
//! - Exclusion-zone precedence over inclusion fences
//!
//! Run with: `cargo test --test geofence_integration`

use std::collections::HashSet;

use chrono::Utc;
use tilefence::config::{ExclusionSections, FenceSections};
use tilefence::coord::Coordinate;
use tilefence::fence::{FenceError, GeofenceSet, PresenceSink};
use tilefence::tracker::TrackedPoint;

// ============================================================================
// Helper Functions
// ============================================================================

/// Sink that records every presence decision it receives.
#[derive(Debug, Default)]
struct RecordingSink {
    calls: Vec<(u32, bool)>,
}

impl PresenceSink for RecordingSink {
    fn set_presence(&mut self, device_id: u32, arrived: bool) {
        self.calls.push((device_id, arrived));
    }
}

fn coord(latitude: f64, longitude: f64) -> Coordinate {
    Coordinate::new(latitude, longitude).unwrap()
}

fn point(name: &str, uuid: &str, latitude: f64, longitude: f64) -> TrackedPoint {
    TrackedPoint::new(name, uuid, coord(latitude, longitude), Utc::now())
}

/// A realistic fence layout around Mount Rainier:
///
/// - circle "liberty island" binds tile `keys` → device 34
/// - polygon "mount rainier" binds tile `backpack` → device 36
/// - exclusion polygon "paradise inn" lists tiles `keys` and `backpack`
fn build_set() -> GeofenceSet {
    let geofences: FenceSections = serde_json::from_value(serde_json::json!({
        "circles": {
            "liberty island": {
                "latitude": 40.690080,
                "longitude": -74.045290,
                "radius": 200,
                "tiles": { "keys": 34 }
            }
        },
        "polygons": {
            "mount rainier": {
                "vertices": [
                    [46.999099, -121.914726],
                    [46.993479, -121.536385],
                    [46.779015, -121.453987],
                    [46.736208, -121.528145],
                    [46.739972, -121.910607]
                ],
                "tiles": { "backpack": 36 }
            }
        }
    }))
    .unwrap();

    let exclusions: ExclusionSections = serde_json::from_value(serde_json::json!({
        "polygons": {
            "paradise inn": {
                "vertices": [
                    [46.786691, -121.734396],
                    [46.787265, -121.733677],
                    [46.786871, -121.733782],
                    [46.786722, -121.733490],
                    [46.786610, -121.733632],
                    [46.786711, -121.733927],
                    [46.786558, -121.734133],
                    [46.786668, -121.734399]
                ],
                "tiles": ["keys", "backpack"]
            }
        }
    }))
    .unwrap();

    let known_devices: HashSet<u32> = [34, 36].into_iter().collect();
    GeofenceSet::from_config(&geofences, &exclusions, &known_devices).unwrap()
}

// ============================================================================
// Integration Tests
// ============================================================================

#[test]
fn test_set_construction_counts() {
    let set = build_set();

    assert_eq!(set.inclusion_count(), 2);
    assert_eq!(set.exclusion_count(), 1);
    assert_eq!(set.tile_count(), 2);
}

#[test]
fn test_handles_only_referenced_tiles() {
    let set = build_set();

    assert!(set.handles_tile("keys", "uuid-keys"));
    assert!(set.handles_tile("backpack", "uuid-backpack"));
    assert!(set.handles_tile("renamed", "keys"));
    assert!(!set.handles_tile("wallet", "uuid-wallet"));
}

#[test]
fn test_arrival_then_departure_over_cycles() {
    let set = build_set();
    let mut sink = RecordingSink::default();

    // Cycle 1: backpack at Giant Falls, inside the Rainier polygon
    let mut backpack = point("backpack", "uuid-backpack", 46.903575, -121.834821);
    set.evaluate(&mut backpack, &mut sink).unwrap();
    assert_eq!(sink.calls, vec![(36, true)]);

    // Cycle 2: still inside, decision reported again (sink dedupes)
    set.evaluate(&mut backpack, &mut sink).unwrap();
    assert_eq!(sink.calls, vec![(36, true), (36, true)]);

    // Cycle 3: moved to Puyallup, outside the polygon
    backpack.update_position(coord(47.163076, -122.283391), Utc::now());
    set.evaluate(&mut backpack, &mut sink).unwrap();
    assert_eq!(sink.calls, vec![(36, true), (36, true), (36, false)]);
}

#[test]
fn test_exclusion_precedence_suppresses_inclusion() {
    let set = build_set();
    let mut sink = RecordingSink::default();

    // Inside the Paradise Inn exclusion AND the Rainier polygon
    let mut backpack = point("backpack", "uuid-backpack", 46.786693, -121.733634);
    set.evaluate(&mut backpack, &mut sink).unwrap();

    assert!(
        sink.calls.is_empty(),
        "exclusion zone must suppress every presence decision"
    );
    assert!(backpack.is_ignored());
}

#[test]
fn test_leaving_exclusion_resumes_presence_updates() {
    let set = build_set();
    let mut sink = RecordingSink::default();
    let mut backpack = point("backpack", "uuid-backpack", 46.786693, -121.733634);

    set.evaluate(&mut backpack, &mut sink).unwrap();
    assert!(sink.calls.is_empty());

    // Walk out of the inn but stay on the mountain
    backpack.update_position(coord(46.903575, -121.834821), Utc::now());
    set.evaluate(&mut backpack, &mut sink).unwrap();

    assert!(!backpack.is_ignored());
    assert_eq!(sink.calls, vec![(36, true)]);
}

#[test]
fn test_independent_points_do_not_share_state() {
    let set = build_set();
    let mut sink = RecordingSink::default();

    let mut keys = point("keys", "uuid-keys", 40.690471, -74.046599);
    let mut backpack = point("backpack", "uuid-backpack", 46.786693, -121.733634);

    // backpack is suppressed by the exclusion; keys still evaluates
    set.evaluate(&mut backpack, &mut sink).unwrap();
    set.evaluate(&mut keys, &mut sink).unwrap();

    assert!(backpack.is_ignored());
    assert!(!keys.is_ignored());
    assert_eq!(sink.calls, vec![(34, true)]);
}

#[test]
fn test_duplicate_device_across_sections_fails_construction() {
    let geofences: FenceSections = serde_json::from_value(serde_json::json!({
        "circles": {
            "home": {
                "latitude": 40.690080,
                "longitude": -74.045290,
                "radius": 200,
                "tiles": { "keys": 34 }
            }
        },
        "polygons": {
            "park": {
                "vertices": [
                    [46.999099, -121.914726],
                    [46.993479, -121.536385],
                    [46.779015, -121.453987]
                ],
                "tiles": { "backpack": 34 }
            }
        }
    }))
    .unwrap();

    let known_devices: HashSet<u32> = [34].into_iter().collect();
    let result = GeofenceSet::from_config(&geofences, &ExclusionSections::default(), &known_devices);

    assert!(matches!(
        result,
        Err(FenceError::DuplicateDevice { device_id: 34, .. })
    ));
}

#[test]
fn test_unknown_device_fails_construction() {
    let geofences: FenceSections = serde_json::from_value(serde_json::json!({
        "circles": {
            "home": {
                "latitude": 40.690080,
                "longitude": -74.045290,
                "radius": 200,
                "tiles": { "keys": 34 }
            }
        }
    }))
    .unwrap();

    // Inventory does not contain device 34
    let known_devices: HashSet<u32> = [35].into_iter().collect();
    let result = GeofenceSet::from_config(&geofences, &ExclusionSections::default(), &known_devices);

    assert!(matches!(
        result,
        Err(FenceError::UnknownDevice { device_id: 34, .. })
    ));
}
