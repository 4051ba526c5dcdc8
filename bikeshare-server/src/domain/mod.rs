//! Domain types for the bike-share dashboard.
//!
//! This module contains the validated records that the rest of the crate
//! works with. Raw CSV rows and API payloads are converted into these
//! types at the boundary, so code that receives them can trust their
//! validity.

mod coordinate;
mod error;
mod ride;
mod route;
mod station;

pub use coordinate::Coordinate;
pub use error::DomainError;
pub use ride::RideRecord;
pub use route::RouteCandidate;
pub use station::{Station, StationId, StationIdentity};
