//! Map framing helpers for routes and trips.

use serde::Serialize;

use crate::domain::Coordinate;

/// Axis-aligned bounds of a set of coordinates.
///
/// `min` is the south-west corner and `max` the north-east corner.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct BoundingBox {
    pub min: Coordinate,
    pub max: Coordinate,
}

impl BoundingBox {
    /// Bounds of `points`, or `None` when there are none.
    pub fn of(points: &[Coordinate]) -> Option<Self> {
        let (first, rest) = points.split_first()?;

        let (mut min_lon, mut min_lat) = (first.lon(), first.lat());
        let (mut max_lon, mut max_lat) = (min_lon, min_lat);
        for p in rest {
            min_lon = min_lon.min(p.lon());
            min_lat = min_lat.min(p.lat());
            max_lon = max_lon.max(p.lon());
            max_lat = max_lat.max(p.lat());
        }

        // Components are taken from valid coordinates
        Some(Self {
            min: Coordinate::new(min_lon, min_lat).ok()?,
            max: Coordinate::new(max_lon, max_lat).ok()?,
        })
    }

    /// Centre of the box.
    pub fn center(&self) -> Coordinate {
        self.min.midpoint(self.max)
    }
}

/// Where the map should look after a search or when a route is expanded.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct MapView {
    pub center: Coordinate,
    pub zoom: f64,
    pub pitch: f64,
}

impl MapView {
    /// Zoom used when framing both ends of a trip.
    pub const TRIP_ZOOM: f64 = 13.0;
    /// Zoom and pitch used when a single route is expanded.
    pub const ROUTE_ZOOM: f64 = 14.0;
    pub const ROUTE_PITCH: f64 = 45.0;

    /// Frame both ends of a trip.
    pub fn for_trip(start: Coordinate, end: Coordinate) -> Self {
        Self {
            center: start.midpoint(end),
            zoom: Self::TRIP_ZOOM,
            pitch: 0.0,
        }
    }

    /// Frame one route's path, tilted for perspective.
    pub fn for_route(path: &[Coordinate]) -> Option<Self> {
        let bounds = BoundingBox::of(path)?;
        Some(Self {
            center: bounds.center(),
            zoom: Self::ROUTE_ZOOM,
            pitch: Self::ROUTE_PITCH,
        })
    }
}
