//! Circular geofence with great-circle containment.

use crate::coord::Coordinate;

use super::error::FenceError;

/// A circular fence: a center coordinate and a radius in meters.
///
/// Containment uses true haversine distance rather than the planar
/// projection, so circles stay accurate at any latitude the validation
/// ranges allow.
#[derive(Debug, Clone)]
pub struct CircleFence {
    center: Coordinate,
    radius_m: f64,
}

impl CircleFence {
    /// Create a circle fence. The radius must be positive.
    pub fn new(fence: &str, center: Coordinate, radius_m: f64) -> Result<Self, FenceError> {
        if radius_m <= 0.0 {
            return Err(FenceError::InvalidRadius {
                fence: fence.to_string(),
                radius: radius_m,
            });
        }

        Ok(Self { center, radius_m })
    }

    /// Center of the circle.
    pub fn center(&self) -> &Coordinate {
        &self.center
    }

    /// Radius in meters.
    pub fn radius_m(&self) -> f64 {
        self.radius_m
    }

    /// True if `p` is inside the circle; the boundary counts as inside.
    #[inline]
    pub fn contains(&self, p: &Coordinate) -> bool {
        self.center.distance_m(p) <= self.radius_m
    }
}
