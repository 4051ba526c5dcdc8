//! Nearest-station search.
//!
//! A linear scan over every station: datasets are a few thousand docks at
//! most, so no spatial index is kept.

use serde::Serialize;

use crate::domain::{Coordinate, Station};

use super::metric::DistanceMetric;

/// A station together with its distance to a query point.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DistanceRankedStation {
    pub station: Station,
    pub distance: f64,
}

/// The `k` stations closest to `query`, nearest first, by planar distance.
///
/// Returns `min(k, stations.len())` results. Stations at equal distance
/// keep their input order.
pub fn nearest(stations: &[Station], query: Coordinate, k: usize) -> Vec<DistanceRankedStation> {
    nearest_with_metric(stations, query, k, DistanceMetric::Planar)
}

/// As [`nearest`], with an explicit distance metric.
pub fn nearest_with_metric(
    stations: &[Station],
    query: Coordinate,
    k: usize,
    metric: DistanceMetric,
) -> Vec<DistanceRankedStation> {
    if k == 0 || stations.is_empty() {
        return Vec::new();
    }

    let mut ranked: Vec<DistanceRankedStation> = stations
        .iter()
        .map(|station| DistanceRankedStation {
            distance: metric.distance(station.coordinate, query),
            station: station.clone(),
        })
        .collect();

    ranked.sort_by(|a, b| a.distance.total_cmp(&b.distance));
    ranked.truncate(k);
    ranked
}

/// Candidate stations around both ends of a trip.
#[derive(Debug, Clone, Serialize)]
pub struct TripCandidates {
    pub near_start: Vec<DistanceRankedStation>,
    pub near_end: Vec<DistanceRankedStation>,
}

impl TripCandidates {
    /// Start candidates followed by end candidates.
    ///
    /// A station near both ends appears twice; deduplication is left to
    /// whoever renders the list.
    pub fn combined(&self) -> Vec<&DistanceRankedStation> {
        self.near_start.iter().chain(self.near_end.iter()).collect()
    }
}

/// Search `k` stations near each end of a trip.
pub fn trip_candidates(
    stations: &[Station],
    start: Coordinate,
    end: Coordinate,
    k: usize,
    metric: DistanceMetric,
) -> TripCandidates {
    TripCandidates {
        near_start: nearest_with_metric(stations, start, k, metric),
        near_end: nearest_with_metric(stations, end, k, metric),
    }
}
