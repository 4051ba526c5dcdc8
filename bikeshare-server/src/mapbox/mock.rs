//! Mock Mapbox client for development without an access token.
//!
//! Serves geocodes and routes from a JSON fixture shaped like:
//!
//! ```json
//! {
//!   "places": { "union station": [-118.2365, 34.0561] },
//!   "directions": { "code": "Ok", "routes": [ ... ] }
//! }
//! ```
//!
//! `directions` is a verbatim directions response and is returned for
//! every pair of endpoints.

use std::collections::HashMap;
use std::path::Path;
use std::sync::Arc;

use serde::Deserialize;

use crate::domain::{Coordinate, RouteCandidate};

use super::convert::convert_directions;
use super::error::MapboxError;
use super::types::DirectionsResponse;

#[derive(Debug, Deserialize)]
struct Fixture {
    #[serde(default)]
    places: HashMap<String, [f64; 2]>,
    #[serde(default)]
    directions: DirectionsResponse,
}

/// Normalise free text for fixture and cache lookups.
pub fn normalize_query(text: &str) -> String {
    text.split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
        .to_lowercase()
}

/// Mock client serving a fixed set of places and routes.
#[derive(Debug, Clone)]
pub struct MockMapbox {
    places: Arc<HashMap<String, Coordinate>>,
    routes: Arc<Vec<RouteCandidate>>,
}

impl MockMapbox {
    /// Load a fixture file.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, MapboxError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path)
            .map_err(|e| MapboxError::Fixture(format!("failed to read {}: {e}", path.display())))?;
        Self::from_json(&json)
            .map_err(|e| MapboxError::Fixture(format!("{}: {e}", path.display())))
    }

    /// Parse a fixture from a JSON string.
    pub fn from_json(json: &str) -> Result<Self, MapboxError> {
        let fixture: Fixture =
            serde_json::from_str(json).map_err(|e| MapboxError::Fixture(e.to_string()))?;

        let places = fixture
            .places
            .into_iter()
            .map(|(name, pair)| Ok((normalize_query(&name), Coordinate::try_from(pair)?)))
            .collect::<Result<HashMap<_, _>, MapboxError>>()?;
        let routes = convert_directions(&fixture.directions)?;

        Ok(Self {
            places: Arc::new(places),
            routes: Arc::new(routes),
        })
    }

    /// Look up a place by name, ignoring case and extra whitespace.
    pub async fn geocode(&self, text: &str) -> Result<Option<Coordinate>, MapboxError> {
        Ok(self.places.get(&normalize_query(text)).copied())
    }

    /// The fixture's routes, whatever the endpoints.
    pub async fn directions(
        &self,
        _start: Coordinate,
        _end: Coordinate,
    ) -> Result<Vec<RouteCandidate>, MapboxError> {
        Ok(self.routes.as_ref().clone())
    }

    /// Number of known places.
    pub fn place_count(&self) -> usize {
        self.places.len()
    }
}
