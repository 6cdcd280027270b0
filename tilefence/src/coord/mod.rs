//! Geographic coordinate module
//!
//! Provides the validated [`Coordinate`] type together with the two pieces
//! of spherical math the geofence engine needs: haversine great-circle
//! distance (circle containment) and the spherical Web Mercator projection
//! (polygon containment on a plane).
//!
//! The two are deliberately separate regimes: Mercator distances distort
//! badly away from the equator, so circles are measured with true geodesic
//! distance, while polygons are tested in projected planar space where
//! ray casting applies directly.

mod types;

pub use types::{Coordinate, CoordError, EARTH_RADIUS_M, MAX_LAT, MAX_LON, MIN_LAT, MIN_LON};

use std::f64::consts::PI;

/// Projects a geographic coordinate to planar Web Mercator meters.
///
/// * `x = lon_rad * R`
/// * `y = (R / 2) * ln((1 + sin(lat_rad)) / (1 - sin(lat_rad)))`
///
/// Valid only for modestly sized, non-polar regions; at exactly ±90°
/// latitude the y value diverges, which is why this projection is never
/// used for distance measurement.
#[inline]
pub fn mercator_project(latitude: f64, longitude: f64) -> (f64, f64) {
    let lat_rad = latitude * PI / 180.0;
    let lon_rad = longitude * PI / 180.0;

    let x = lon_rad * EARTH_RADIUS_M;
    let y = (EARTH_RADIUS_M / 2.0) * ((1.0 + lat_rad.sin()) / (1.0 - lat_rad.sin())).ln();

    (x, y)
}

/// Haversine great-circle distance between two coordinates, in meters.
///
/// Standard spherical law with mean Earth radius; no special-casing for
/// antipodal points (not a realistic input domain for geofencing).
#[inline]
pub fn haversine_distance_m(a: &Coordinate, b: &Coordinate) -> f64 {
    let lat_a = a.latitude() * PI / 180.0;
    let lat_b = b.latitude() * PI / 180.0;
    let d_lat = (b.latitude() - a.latitude()) * PI / 180.0;
    let d_lon = (b.longitude() - a.longitude()) * PI / 180.0;

    let h = (d_lat / 2.0).sin().powi(2) + lat_a.cos() * lat_b.cos() * (d_lon / 2.0).sin().powi(2);

    2.0 * EARTH_RADIUS_M * h.sqrt().asin()
}
