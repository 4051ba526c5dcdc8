//! Data transfer objects for web requests and responses.

use serde::{Deserialize, Serialize};

use crate::dataset::Quarter;
use crate::domain::{Coordinate, Station};
use crate::nearest::{DistanceMetric, DistanceRankedStation, TripCandidates};
use crate::routes::{BoundingBox, MapView, RankedRoute};
use crate::selection::{SelectionAction, TripSelection};
use crate::usage::{DashboardStats, StationUsage};

/// Quarters offered in the dropdown.
#[derive(Debug, Serialize)]
pub struct QuartersResponse {
    pub quarters: Vec<Quarter>,
    pub current: Quarter,
}

/// Request to switch the dashboard to another quarter.
#[derive(Debug, Deserialize)]
pub struct SelectQuarterRequest {
    pub quarter: Quarter,
}

/// Result of switching quarter.
#[derive(Debug, Serialize)]
pub struct QuarterSelectedResponse {
    pub quarter: Quarter,
    pub total_rides: usize,
    /// Rows dropped while loading.
    pub rejected: usize,
}

/// Station usage table.
#[derive(Debug, Serialize)]
pub struct UsageResponse {
    pub quarter: Quarter,
    pub total_rides: usize,
    pub stations: Vec<StationUsage>,
}

/// Chart data for the current quarter.
#[derive(Debug, Serialize)]
pub struct StatsResponse {
    pub quarter: Quarter,
    #[serde(flatten)]
    pub stats: DashboardStats,
}

/// All bike stations.
#[derive(Debug, Serialize)]
pub struct StationsResponse {
    pub stations: Vec<Station>,
}

/// Query for the nearest stations to a point.
#[derive(Debug, Deserialize)]
pub struct NearestQuery {
    pub lon: f64,
    pub lat: f64,

    /// Number of stations; negative means none
    pub k: Option<i64>,

    /// `planar` (default) or `haversine`
    pub metric: Option<DistanceMetric>,
}

/// Nearest stations to a point, closest first.
#[derive(Debug, Serialize)]
pub struct NearestResponse {
    pub query: Coordinate,
    pub metric: DistanceMetric,
    pub stations: Vec<DistanceRankedStation>,
}

/// Request to plan a trip between two typed places.
#[derive(Debug, Deserialize)]
pub struct TripSearchRequest {
    /// Free-text start location
    pub start: String,

    /// Free-text end location
    pub end: String,

    /// Candidates per endpoint
    pub k: Option<i64>,

    pub metric: Option<DistanceMetric>,
}

/// Geocoded trip endpoints with candidate stations.
#[derive(Debug, Serialize)]
pub struct TripSearchResponse {
    pub start: Coordinate,
    pub end: Coordinate,

    /// Map framing for both endpoints
    pub view: MapView,

    #[serde(flatten)]
    pub candidates: TripCandidates,

    /// Start candidates followed by end candidates
    pub combined: Vec<DistanceRankedStation>,
}

/// Apply a selection action to the client's current selection.
#[derive(Debug, Deserialize)]
pub struct TripSelectRequest {
    #[serde(default)]
    pub state: TripSelection,
    pub action: SelectionAction,
}

/// The selection after an action.
#[derive(Debug, Serialize)]
pub struct TripSelectResponse {
    pub selection: TripSelection,
    pub show_card: bool,
    pub complete: bool,
}

impl From<TripSelection> for TripSelectResponse {
    fn from(selection: TripSelection) -> Self {
        Self {
            show_card: selection.show_card(),
            complete: selection.is_complete(),
            selection,
        }
    }
}

/// Request for cycling routes between two points.
#[derive(Debug, Deserialize)]
pub struct RoutesRequest {
    pub start: Coordinate,
    pub end: Coordinate,

    /// Override the configured cycling speed (km/h)
    pub avg_speed_kmh: Option<f64>,
}

/// Routes ranked by ETA.
#[derive(Debug, Serialize)]
pub struct RoutesResponse {
    pub routes: Vec<RankedRoute>,

    /// Extent of every route's geometry
    pub bounds: Option<BoundingBox>,

    /// Map framing for the recommended route
    pub view: Option<MapView>,
}

/// Error response.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
}
