//! Cycling route ranking and map framing.

mod geometry;
mod rank;

pub use geometry::{BoundingBox, MapView};
pub use rank::{DEFAULT_AVG_SPEED_MPS, RankedRoute, RouteError, RouteTag, rank_routes};
