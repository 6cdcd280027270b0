//! Polygonal geofence with planar ray-casting containment.

use std::collections::HashSet;

use crate::coord::Coordinate;

use super::error::FenceError;

/// A polygonal fence defined by an ordered ring of at least three
/// distinct vertices.
///
/// Containment projects the vertices and the query point into Web
/// Mercator space and runs the classic even-odd ray cast there. All
/// projections within one call come from the same transform, so the test
/// is always evaluated in a single consistent planar space.
///
/// A point exactly on an edge may land on either side; the edge-crossing
/// predicate is kept as-is rather than patched with tolerances.
#[derive(Debug, Clone)]
pub struct PolygonFence {
    vertices: Vec<Coordinate>,
}

impl PolygonFence {
    /// Create a polygon fence.
    ///
    /// Fails if fewer than three vertices are supplied or if the same
    /// coordinate appears twice (exact numeric equality).
    pub fn new(fence: &str, vertices: Vec<Coordinate>) -> Result<Self, FenceError> {
        if vertices.len() < 3 {
            return Err(FenceError::TooFewVertices {
                fence: fence.to_string(),
                count: vertices.len(),
            });
        }

        let mut seen = HashSet::new();
        for vertex in &vertices {
            let key = (vertex.latitude().to_bits(), vertex.longitude().to_bits());
            if !seen.insert(key) {
                return Err(FenceError::DuplicateVertex {
                    fence: fence.to_string(),
                    latitude: vertex.latitude(),
                    longitude: vertex.longitude(),
                });
            }
        }

        Ok(Self { vertices })
    }

    /// The polygon's vertex ring.
    pub fn vertices(&self) -> &[Coordinate] {
        &self.vertices
    }

    /// Even-odd ray-casting containment test in projected space.
    ///
    /// Walks consecutive vertex pairs `(i, j = i-1 mod n)` and toggles the
    /// result each time the horizontal ray from `p` crosses an edge.
    pub fn contains(&self, p: &Coordinate) -> bool {
        let (x, y) = p.project();

        let n = self.vertices.len();
        let mut inside = false;
        let mut j = n - 1;

        for i in 0..n {
            let (xi, yi) = self.vertices[i].project();
            let (xj, yj) = self.vertices[j].project();

            if ((yi < y) != (yj < y)) && (x < (xj - xi) * (y - yi) / (yj - yi) + xi) {
                inside = !inside;
            }
            j = i;
        }

        inside
    }
}
