//! Cross-fence validation and construction.
//!
//! The registry turns raw configuration sections into validated [`Fence`]
//! values while enforcing the invariants that span fences: a presence
//! device belongs to at most one fence, every bound device exists in the
//! hub inventory, and geometry is well-formed. Validation is eager; the
//! first violation aborts startup.

use std::collections::HashSet;

use tracing::debug;

use crate::config::{
    CircleFenceConfig, ExclusionCircleConfig, ExclusionPolygonConfig, PolygonFenceConfig,
};
use crate::coord::Coordinate;

use super::binding::BindingSet;
use super::circle::CircleFence;
use super::error::FenceError;
use super::polygon::PolygonFence;
use super::{Fence, Geometry};

/// Accumulates cross-fence state while fences are registered.
#[derive(Debug, Default)]
pub struct FenceRegistry {
    /// Union of every tile identifier referenced by any fence.
    tiles: HashSet<String>,

    /// Device ids already claimed by an inclusion fence.
    device_ids: HashSet<u32>,
}

impl FenceRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a circular inclusion fence.
    pub fn register_circle(
        &mut self,
        name: &str,
        conf: &CircleFenceConfig,
        known_devices: &HashSet<u32>,
    ) -> Result<Fence, FenceError> {
        let bindings =
            self.register_bindings(name, BindingSet::from_device_map(&conf.tiles), false, known_devices)?;
        let center = new_coordinate(name, conf.latitude, conf.longitude)?;
        let circle = CircleFence::new(name, center, conf.radius)?;

        debug!(
            fence = name,
            latitude = conf.latitude,
            longitude = conf.longitude,
            radius_m = conf.radius,
            "Registered circle geofence"
        );
        Ok(Fence::new(name, false, bindings, Geometry::Circle(circle)))
    }

    /// Register a polygonal inclusion fence.
    pub fn register_polygon(
        &mut self,
        name: &str,
        conf: &PolygonFenceConfig,
        known_devices: &HashSet<u32>,
    ) -> Result<Fence, FenceError> {
        let bindings =
            self.register_bindings(name, BindingSet::from_device_map(&conf.tiles), false, known_devices)?;
        let polygon = PolygonFence::new(name, parse_vertices(name, &conf.vertices)?)?;

        debug!(
            fence = name,
            vertices = polygon.vertices().len(),
            "Registered polygon geofence"
        );
        Ok(Fence::new(name, false, bindings, Geometry::Polygon(polygon)))
    }

    /// Register a circular exclusion zone.
    ///
    /// Exclusion bindings carry no device ids, so only the tile union is
    /// updated; the known-device inventory is not consulted.
    pub fn register_exclusion_circle(
        &mut self,
        name: &str,
        conf: &ExclusionCircleConfig,
    ) -> Result<Fence, FenceError> {
        let bindings = self.register_bindings(
            name,
            BindingSet::from_tile_list(&conf.tiles),
            true,
            &HashSet::new(),
        )?;
        let center = new_coordinate(name, conf.latitude, conf.longitude)?;
        let circle = CircleFence::new(name, center, conf.radius)?;

        debug!(fence = name, radius_m = conf.radius, "Registered circle exclusion zone");
        Ok(Fence::new(name, true, bindings, Geometry::Circle(circle)))
    }

    /// Register a polygonal exclusion zone.
    pub fn register_exclusion_polygon(
        &mut self,
        name: &str,
        conf: &ExclusionPolygonConfig,
    ) -> Result<Fence, FenceError> {
        let bindings = self.register_bindings(
            name,
            BindingSet::from_tile_list(&conf.tiles),
            true,
            &HashSet::new(),
        )?;
        let polygon = PolygonFence::new(name, parse_vertices(name, &conf.vertices)?)?;

        debug!(
            fence = name,
            vertices = polygon.vertices().len(),
            "Registered polygon exclusion zone"
        );
        Ok(Fence::new(name, true, bindings, Geometry::Polygon(polygon)))
    }

    /// Union of every tile identifier seen so far.
    pub fn tiles(&self) -> &HashSet<String> {
        &self.tiles
    }

    /// Consume the registry, yielding the tile union.
    pub fn into_tiles(self) -> HashSet<String> {
        self.tiles
    }

    fn register_bindings(
        &mut self,
        fence: &str,
        bindings: BindingSet,
        exclusion: bool,
        known_devices: &HashSet<u32>,
    ) -> Result<BindingSet, FenceError> {
        for tile in bindings.tile_ids() {
            self.tiles.insert(tile.to_string());
        }

        if !exclusion {
            for device_id in bindings.device_ids() {
                if !self.device_ids.insert(device_id) {
                    return Err(FenceError::DuplicateDevice {
                        fence: fence.to_string(),
                        device_id,
                    });
                }
                if !known_devices.contains(&device_id) {
                    return Err(FenceError::UnknownDevice {
                        fence: fence.to_string(),
                        device_id,
                    });
                }
            }
        }

        Ok(bindings)
    }
}

fn new_coordinate(fence: &str, latitude: f64, longitude: f64) -> Result<Coordinate, FenceError> {
    Coordinate::new(latitude, longitude).map_err(|source| FenceError::InvalidCoordinate {
        fence: fence.to_string(),
        source,
    })
}

fn parse_vertices(fence: &str, raw: &[[f64; 2]]) -> Result<Vec<Coordinate>, FenceError> {
    raw.iter()
        .map(|[latitude, longitude]| new_coordinate(fence, *latitude, *longitude))
        .collect()
}
