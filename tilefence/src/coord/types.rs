//! Coordinate type definitions

use std::fmt;
use std::sync::OnceLock;

use thiserror::Error;

/// Valid latitude range in degrees.
pub const MIN_LAT: f64 = -90.0;
pub const MAX_LAT: f64 = 90.0;

/// Valid longitude range in degrees.
pub const MIN_LON: f64 = -180.0;
pub const MAX_LON: f64 = 180.0;

/// Mean Earth radius in meters, shared by the haversine distance and the
/// spherical Web Mercator projection.
pub const EARTH_RADIUS_M: f64 = 6_371_000.0;

/// Errors that can occur when constructing a coordinate.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum CoordError {
    /// Latitude is outside the valid range (-90 to 90 degrees)
    #[error("Invalid latitude: {0} (must be between {MIN_LAT} and {MAX_LAT})")]
    InvalidLatitude(f64),

    /// Longitude is outside the valid range (-180 to 180 degrees)
    #[error("Invalid longitude: {0} (must be between {MIN_LON} and {MAX_LON})")]
    InvalidLongitude(f64),
}

/// A validated geographic coordinate.
///
/// Immutable once constructed; a tracked tile that moves gets a fresh
/// `Coordinate`, never a mutated one. The planar Web Mercator projection
/// is computed lazily on first use and cached, since a single position is
/// typically tested against every polygon fence in one evaluation pass.
///
/// Two coordinates are equal iff latitude and longitude are numerically
/// equal; the projection cache never participates in comparisons.
#[derive(Debug)]
pub struct Coordinate {
    latitude: f64,
    longitude: f64,
    projected: OnceLock<(f64, f64)>,
}

impl Coordinate {
    /// Create a coordinate, validating both components.
    ///
    /// Boundary values (exactly ±90 latitude, ±180 longitude) are accepted.
    pub fn new(latitude: f64, longitude: f64) -> Result<Self, CoordError> {
        if !(MIN_LAT..=MAX_LAT).contains(&latitude) {
            return Err(CoordError::InvalidLatitude(latitude));
        }
        if !(MIN_LON..=MAX_LON).contains(&longitude) {
            return Err(CoordError::InvalidLongitude(longitude));
        }

        Ok(Self {
            latitude,
            longitude,
            projected: OnceLock::new(),
        })
    }

    /// Latitude in degrees.
    #[inline]
    pub fn latitude(&self) -> f64 {
        self.latitude
    }

    /// Longitude in degrees.
    #[inline]
    pub fn longitude(&self) -> f64 {
        self.longitude
    }

    /// Project to planar Web Mercator `(x, y)` in meters.
    ///
    /// Computed at most once per instance; safe to call from multiple
    /// threads (the cache is a `OnceLock`).
    #[inline]
    pub fn project(&self) -> (f64, f64) {
        *self
            .projected
            .get_or_init(|| super::mercator_project(self.latitude, self.longitude))
    }

    /// Haversine great-circle distance to `other`, in meters.
    #[inline]
    pub fn distance_m(&self, other: &Coordinate) -> f64 {
        super::haversine_distance_m(self, other)
    }
}

impl Clone for Coordinate {
    fn clone(&self) -> Self {
        let projected = OnceLock::new();
        if let Some(p) = self.projected.get() {
            let _ = projected.set(*p);
        }
        Self {
            latitude: self.latitude,
            longitude: self.longitude,
            projected,
        }
    }
}

impl PartialEq for Coordinate {
    fn eq(&self, other: &Self) -> bool {
        self.latitude == other.latitude && self.longitude == other.longitude
    }
}

impl fmt::Display for Coordinate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.latitude, self.longitude)
    }
}
