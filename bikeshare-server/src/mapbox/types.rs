//! Mapbox API response DTOs.
//!
//! Only the fields the dashboard reads are modelled; everything else in
//! the responses is ignored. Positions are `[lon, lat]` pairs.

use serde::{Deserialize, Serialize};

/// Response from the forward geocoding endpoint.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct GeocodingResponse {
    /// Matches, best first.
    #[serde(default)]
    pub features: Vec<GeocodingFeature>,
}

/// One geocoding match.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct GeocodingFeature {
    /// Representative point of the match.
    pub center: [f64; 2],

    /// Full display name, e.g. "Union Station, Los Angeles, California".
    pub place_name: Option<String>,
}

/// Response from the directions endpoint.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct DirectionsResponse {
    /// "Ok", "NoRoute", "NoSegment", ...
    pub code: Option<String>,

    /// Candidate routes, in the order the service returns them.
    #[serde(default)]
    pub routes: Vec<DirectionsRoute>,

    /// Error detail when `code` is not "Ok".
    pub message: Option<String>,
}

/// One route from the directions endpoint.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct DirectionsRoute {
    /// Length in metres.
    pub distance: f64,

    /// Estimated travel time in seconds.
    pub duration: f64,

    /// GeoJSON line string (requested with `geometries=geojson`).
    pub geometry: LineString,
}

/// GeoJSON line string geometry.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct LineString {
    #[serde(default)]
    pub coordinates: Vec<[f64; 2]>,
}
