//! Error types for geofence construction and evaluation.

use thiserror::Error;

use crate::coord::CoordError;

/// Errors raised while building or evaluating geofences.
///
/// Everything except [`FenceError::AmbiguousBinding`] is raised eagerly at
/// construction time; an ambiguous binding can only be detected once a
/// tracked tile presents both of its identifiers.
#[derive(Debug, Error)]
pub enum FenceError {
    /// Circle fence configured with a non-positive radius.
    #[error("Geofence '{fence}' has invalid radius {radius} m (must be positive)")]
    InvalidRadius { fence: String, radius: f64 },

    /// Polygon fence configured with fewer than three vertices.
    #[error("Geofence '{fence}' has {count} vertices (a polygon needs at least 3)")]
    TooFewVertices { fence: String, count: usize },

    /// The same vertex appears twice in one polygon.
    #[error("Geofence '{fence}' repeats vertex ({latitude}, {longitude})")]
    DuplicateVertex {
        fence: String,
        latitude: f64,
        longitude: f64,
    },

    /// A configured latitude/longitude is out of range.
    #[error("Geofence '{fence}' has an invalid coordinate: {source}")]
    InvalidCoordinate {
        fence: String,
        #[source]
        source: CoordError,
    },

    /// A device id is claimed by more than one geofence.
    #[error("Device {device_id} is referenced in geofence '{fence}' and another geofence")]
    DuplicateDevice { fence: String, device_id: u32 },

    /// A bound device id does not exist in the hub's presence inventory.
    #[error("Device {device_id} in geofence '{fence}' is not a known virtual presence device")]
    UnknownDevice { fence: String, device_id: u32 },

    /// A tracked tile matches one fence's bindings by both name and uuid.
    #[error("Tile '{tile}' with uuid {uuid} is referenced both by name and uuid in geofence '{fence}'")]
    AmbiguousBinding {
        fence: String,
        tile: String,
        uuid: String,
    },
}
