//! Mapbox geocoding and directions client.
//!
//! The dashboard uses two Mapbox endpoints: forward geocoding to turn a
//! typed place into a coordinate, and cycling directions (with
//! alternatives) between two coordinates. A fixture-backed mock stands
//! in for the live API during development.

mod backend;
mod client;
mod convert;
mod error;
mod mock;
mod types;

pub use backend::MapBackend;
pub use client::{MapboxClient, MapboxConfig};
pub use convert::{convert_directions, convert_geocoding, convert_route};
pub use error::MapboxError;
pub use mock::{MockMapbox, normalize_query};
pub use types::{
    DirectionsResponse, DirectionsRoute, GeocodingFeature, GeocodingResponse, LineString,
};
