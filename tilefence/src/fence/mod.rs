//! Geofence module
//!
//! Provides the closed set of fence geometries ([`CircleFence`],
//! [`PolygonFence`]) behind a single containment capability, per-fence
//! tile bindings, cross-fence validation ([`FenceRegistry`]), and the
//! [`GeofenceSet`] that orchestrates evaluation.
//!
//! # Example
//!
//! ```ignore
//! use tilefence::fence::GeofenceSet;
//!
//! let geofences = GeofenceSet::from_config(&config.geofences, &config.exclusions, &known)?;
//!
//! for point in &mut points {
//!     geofences.evaluate(point, &mut sink)?;
//! }
//! ```

mod binding;
mod circle;
mod error;
mod polygon;
mod registry;
mod set;

pub use binding::{BindingSet, ResolvedBinding};
pub use circle::CircleFence;
pub use error::FenceError;
pub use polygon::PolygonFence;
pub use registry::FenceRegistry;
pub use set::{GeofenceSet, PresenceSink};

use crate::coord::Coordinate;

/// The geometry of a fence.
///
/// A closed variant set rather than a trait object: configuration
/// deserializes directly into one of these, and containment dispatch is
/// an exhaustive match.
#[derive(Debug, Clone)]
pub enum Geometry {
    Circle(CircleFence),
    Polygon(PolygonFence),
}

impl Geometry {
    /// True if `p` lies inside this geometry.
    #[inline]
    pub fn contains(&self, p: &Coordinate) -> bool {
        match self {
            Geometry::Circle(circle) => circle.contains(p),
            Geometry::Polygon(polygon) => polygon.contains(p),
        }
    }
}

/// A configured geofence: name, exclusion flag, tile bindings, geometry.
///
/// Built once at startup and immutable thereafter; any number of
/// evaluation calls may share it read-only.
#[derive(Debug, Clone)]
pub struct Fence {
    name: String,
    exclusion: bool,
    bindings: BindingSet,
    geometry: Geometry,
}

impl Fence {
    /// Assemble a fence from validated parts.
    pub fn new(name: &str, exclusion: bool, bindings: BindingSet, geometry: Geometry) -> Self {
        Self {
            name: name.to_string(),
            exclusion,
            bindings,
            geometry,
        }
    }

    /// The fence's configured name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// True for exclusion zones.
    pub fn is_exclusion(&self) -> bool {
        self.exclusion
    }

    /// The fence's tile bindings.
    pub fn bindings(&self) -> &BindingSet {
        &self.bindings
    }

    /// True if `p` lies inside the fence geometry.
    #[inline]
    pub fn contains(&self, p: &Coordinate) -> bool {
        self.geometry.contains(p)
    }

    /// Resolve which binding applies to a tracked tile.
    ///
    /// The tile's name takes priority over its uuid; if both identifiers
    /// are present in this fence's bindings the configuration is
    /// ambiguous and evaluation fails. `Ok(None)` means this fence does
    /// not reference the tile at all.
    pub fn resolve_binding(
        &self,
        tile_name: &str,
        tile_uuid: &str,
    ) -> Result<Option<ResolvedBinding<'_>>, FenceError> {
        let by_name = self.bindings.get(tile_name);
        let by_uuid = self.bindings.get(tile_uuid);

        match (by_name, by_uuid) {
            (Some(_), Some(_)) => Err(FenceError::AmbiguousBinding {
                fence: self.name.clone(),
                tile: tile_name.to_string(),
                uuid: tile_uuid.to_string(),
            }),
            (Some(binding), None) => Ok(Some(binding)),
            (None, Some(binding)) => Ok(Some(binding)),
            (None, None) => Ok(None),
        }
    }
}
