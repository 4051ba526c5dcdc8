//! Distance metrics between coordinates.

use serde::{Deserialize, Serialize};

use crate::domain::Coordinate;

/// Mean earth radius used by the haversine metric.
pub const EARTH_RADIUS_M: f64 = 6_371_000.0;

/// How to measure the distance between a station and a query point.
///
/// `Planar` treats raw `(lon, lat)` degrees as a flat plane. It is cheap
/// and ranks correctly over a single city, but distorts east-west
/// distances away from the equator. `Haversine` gives great-circle
/// metres for deployments spanning a wide latitude range.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DistanceMetric {
    #[default]
    Planar,
    Haversine,
}

impl DistanceMetric {
    /// Distance between two coordinates.
    ///
    /// Units are degrees for `Planar` and metres for `Haversine`.
    pub fn distance(self, a: Coordinate, b: Coordinate) -> f64 {
        match self {
            DistanceMetric::Planar => planar_distance(a, b),
            DistanceMetric::Haversine => haversine_distance(a, b),
        }
    }
}

/// Euclidean distance on raw `(lon, lat)` degrees.
pub fn planar_distance(a: Coordinate, b: Coordinate) -> f64 {
    (a.lon() - b.lon()).hypot(a.lat() - b.lat())
}

/// Great-circle distance in metres.
pub fn haversine_distance(a: Coordinate, b: Coordinate) -> f64 {
    let lat1 = a.lat().to_radians();
    let lat2 = b.lat().to_radians();
    let delta_lat = (b.lat() - a.lat()).to_radians();
    let delta_lon = (b.lon() - a.lon()).to_radians();

    let h = (delta_lat / 2.0).sin().powi(2)
        + lat1.cos() * lat2.cos() * (delta_lon / 2.0).sin().powi(2);
    // Rounding can push h a hair above 1 for antipodal points
    let c = 2.0 * h.sqrt().min(1.0).asin();

    EARTH_RADIUS_M * c
}
