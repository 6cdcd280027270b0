//! Tracked tile state.

use chrono::{DateTime, Utc};

use crate::coord::Coordinate;

/// One tracked tile: its feed identifiers, last known position, and the
/// per-tile evaluation state the engine threads through cycles.
///
/// The coordinate is replaced wholesale on every position update, so its
/// cached projection can never go stale; the `ignored` flag exists only
/// to log the enter-exclusion-zone transition once instead of every
/// cycle.
#[derive(Debug, Clone)]
pub struct TrackedPoint {
    name: String,
    uuid: String,
    coordinate: Coordinate,
    last_update: DateTime<Utc>,
    ignored: bool,
}

impl TrackedPoint {
    /// Create a tracked point from feed data.
    pub fn new(
        name: &str,
        uuid: &str,
        coordinate: Coordinate,
        last_update: DateTime<Utc>,
    ) -> Self {
        Self {
            name: name.to_string(),
            uuid: uuid.to_string(),
            coordinate,
            last_update,
            ignored: false,
        }
    }

    /// The tile's display name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The tile's uuid.
    pub fn uuid(&self) -> &str {
        &self.uuid
    }

    /// Current position.
    pub fn coordinate(&self) -> &Coordinate {
        &self.coordinate
    }

    /// Timestamp of the last feed update.
    pub fn last_update(&self) -> DateTime<Utc> {
        self.last_update
    }

    /// Combined name and uuid for log lines.
    pub fn full_name(&self) -> String {
        format!("'{}' ({})", self.name, self.uuid)
    }

    /// Replace the position with fresh feed data.
    pub fn update_position(&mut self, coordinate: Coordinate, last_update: DateTime<Utc>) {
        self.coordinate = coordinate;
        self.last_update = last_update;
    }

    /// True while the tile sits in an exclusion zone.
    pub fn is_ignored(&self) -> bool {
        self.ignored
    }

    /// Mark the tile as suppressed by an exclusion zone.
    ///
    /// Returns true only on the transition, so callers can log it once.
    pub fn mark_ignored(&mut self) -> bool {
        let transition = !self.ignored;
        self.ignored = true;
        transition
    }

    /// Clear the exclusion suppression.
    pub fn clear_ignored(&mut self) {
        self.ignored = false;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn point() -> TrackedPoint {
        TrackedPoint::new(
            "keys",
            "uuid-keys",
            Coordinate::new(40.690080, -74.045290).unwrap(),
            Utc::now(),
        )
    }

    #[test]
    fn test_new_point_is_not_ignored() {
        assert!(!point().is_ignored());
    }

    #[test]
    fn test_mark_ignored_reports_transition_once() {
        let mut p = point();

        assert!(p.mark_ignored());
        assert!(p.is_ignored());
        assert!(!p.mark_ignored(), "second mark is not a transition");
    }

    #[test]
    fn test_clear_ignored_resets_transition() {
        let mut p = point();

        p.mark_ignored();
        p.clear_ignored();
        assert!(!p.is_ignored());
        assert!(p.mark_ignored(), "transition fires again after clearing");
    }

    #[test]
    fn test_update_position_replaces_coordinate() {
        let mut p = point();
        let moved = Coordinate::new(46.786515, -121.736888).unwrap();
        let when = Utc::now();

        p.update_position(moved.clone(), when);

        assert_eq!(p.coordinate(), &moved);
        assert_eq!(p.last_update(), when);
    }

    #[test]
    fn test_full_name_format() {
        assert_eq!(point().full_name(), "'keys' (uuid-keys)");
    }
}
