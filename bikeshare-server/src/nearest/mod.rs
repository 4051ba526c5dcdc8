//! Nearest-station search around a query point.

mod metric;
mod search;

pub use metric::{DistanceMetric, EARTH_RADIUS_M, haversine_distance, planar_distance};
pub use search::{
    DistanceRankedStation, TripCandidates, nearest, nearest_with_metric, trip_candidates,
};
