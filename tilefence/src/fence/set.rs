//! Geofence set orchestration.
//!
//! Owns the ordered exclusion and inclusion fences and runs the
//! per-point evaluation pass: exclusion zones first (a match suppresses
//! everything else for that point this cycle), then inclusion fences,
//! each delivering a presence decision to the sink.

use std::collections::HashSet;

use tracing::{debug, info};

use crate::config::{ExclusionSections, FenceSections};
use crate::tracker::TrackedPoint;

use super::error::FenceError;
use super::registry::FenceRegistry;
use super::Fence;

/// Outbound port for presence decisions.
///
/// Implementations are expected to be idempotent: the engine reports a
/// decision for every bound inclusion fence on every cycle, whether or
/// not the state changed, and the sink suppresses redundant commands.
pub trait PresenceSink {
    /// Report that the device's tile has arrived in or departed from its
    /// fence.
    fn set_presence(&mut self, device_id: u32, arrived: bool);
}

/// All configured fences plus the union of referenced tile identifiers.
///
/// Built once at startup from configuration and the hub's device
/// inventory, then shared read-only; evaluation mutates only the tracked
/// point passed in.
#[derive(Debug)]
pub struct GeofenceSet {
    exclusions: Vec<Fence>,
    inclusions: Vec<Fence>,
    tiles: HashSet<String>,
}

impl GeofenceSet {
    /// Build and validate the full fence set.
    ///
    /// Fail-fast: any invalid geometry, out-of-range coordinate,
    /// duplicate device id, or unknown device id aborts construction.
    /// `known_devices` is the hub's presence-device inventory.
    pub fn from_config(
        geofences: &FenceSections,
        exclusions: &ExclusionSections,
        known_devices: &HashSet<u32>,
    ) -> Result<Self, FenceError> {
        let mut registry = FenceRegistry::new();

        let mut exclusion_fences = Vec::new();
        for (name, conf) in &exclusions.circles {
            exclusion_fences.push(registry.register_exclusion_circle(name, conf)?);
        }
        for (name, conf) in &exclusions.polygons {
            exclusion_fences.push(registry.register_exclusion_polygon(name, conf)?);
        }

        let mut inclusion_fences = Vec::new();
        for (name, conf) in &geofences.circles {
            inclusion_fences.push(registry.register_circle(name, conf, known_devices)?);
        }
        for (name, conf) in &geofences.polygons {
            inclusion_fences.push(registry.register_polygon(name, conf, known_devices)?);
        }

        info!(
            inclusions = inclusion_fences.len(),
            exclusions = exclusion_fences.len(),
            tiles = registry.tiles().len(),
            "Geofence set built"
        );

        Ok(Self {
            exclusions: exclusion_fences,
            inclusions: inclusion_fences,
            tiles: registry.into_tiles(),
        })
    }

    /// True if either identifier of a tile is referenced by any fence.
    ///
    /// The poller uses this to decide whether an entity is worth tracking
    /// at all.
    pub fn handles_tile(&self, tile_name: &str, tile_uuid: &str) -> bool {
        self.tiles.contains(tile_name) || self.tiles.contains(tile_uuid)
    }

    /// Number of inclusion fences.
    pub fn inclusion_count(&self) -> usize {
        self.inclusions.len()
    }

    /// Number of exclusion zones.
    pub fn exclusion_count(&self) -> usize {
        self.exclusions.len()
    }

    /// Number of distinct tile identifiers referenced by any fence.
    pub fn tile_count(&self) -> usize {
        self.tiles.len()
    }

    /// Evaluate one tracked point against every fence.
    ///
    /// Exclusion zones run first, in registration order. The first zone
    /// that binds the tile and contains the point wins outright: the
    /// remaining exclusions and all inclusion fences are skipped and the
    /// sink is never called this cycle. The suppression is logged once
    /// per transition, with the flag carried on the point itself.
    ///
    /// If no exclusion matches, every inclusion fence that binds the tile
    /// gets a containment test and an unconditional sink call;
    /// deduplication of unchanged state is the sink's concern.
    pub fn evaluate(
        &self,
        point: &mut TrackedPoint,
        sink: &mut dyn PresenceSink,
    ) -> Result<(), FenceError> {
        for fence in &self.exclusions {
            let Some(_binding) = fence.resolve_binding(point.name(), point.uuid())? else {
                debug!(
                    tile = %point.full_name(),
                    fence = fence.name(),
                    "Tile not referenced by exclusion zone, skipping"
                );
                continue;
            };

            if fence.contains(point.coordinate()) {
                if point.mark_ignored() {
                    info!(
                        tile = %point.full_name(),
                        fence = fence.name(),
                        "Tile entered exclusion zone, suppressing presence updates"
                    );
                }
                return Ok(());
            }
        }

        point.clear_ignored();

        for fence in &self.inclusions {
            let Some(binding) = fence.resolve_binding(point.name(), point.uuid())? else {
                debug!(
                    tile = %point.full_name(),
                    fence = fence.name(),
                    "Tile not referenced by geofence, skipping"
                );
                continue;
            };

            if let Some(device_id) = binding.device_id {
                let arrived = fence.contains(point.coordinate());
                debug!(
                    tile = %point.full_name(),
                    fence = fence.name(),
                    device_id,
                    arrived,
                    "Presence decision"
                );
                sink.set_presence(device_id, arrived);
            }
        }

        Ok(())
    }
}
