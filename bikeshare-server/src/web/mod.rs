//! Web layer for the bike-share dashboard.
//!
//! Serves the dashboard page, the usage table and chart data, station
//! search, trip selection and cycling routes.

mod dto;
mod routes;
mod state;
pub mod templates;

pub use dto::*;
pub use routes::{AppError, create_router};
pub use state::AppState;
pub use templates::*;
