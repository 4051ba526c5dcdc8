//! Route candidates returned by the directions service.

use serde::{Deserialize, Serialize};

use super::Coordinate;

/// One path between two points, as reported by the directions service.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RouteCandidate {
    /// Stable id within one directions response, e.g. `route-0`.
    pub id: String,
    /// Path geometry, `[lon, lat]` points in travel order.
    pub coordinates: Vec<Coordinate>,
    /// Total length in metres.
    pub distance_m: f64,
    /// Duration estimated by the directions service, in seconds.
    pub duration_s: f64,
}

impl RouteCandidate {
    /// Create a candidate with no geometry.
    pub fn new(id: impl Into<String>, distance_m: f64, duration_s: f64) -> Self {
        Self {
            id: id.into(),
            coordinates: Vec::new(),
            distance_m,
            duration_s,
        }
    }

    /// Attach path geometry.
    pub fn with_coordinates(mut self, coordinates: Vec<Coordinate>) -> Self {
        self.coordinates = coordinates;
        self
    }
}
