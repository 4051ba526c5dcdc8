//! Application state for the web layer.

use std::sync::Arc;

use crate::cache::CachedMapbox;
use crate::config::DashboardConfig;
use crate::dataset::{DashboardData, StationCatalog};

/// Shared application state.
///
/// Contains all the services needed to handle requests.
#[derive(Clone)]
pub struct AppState {
    /// Ride data for the selected quarter
    pub data: DashboardData,

    /// Bike stations and their usage counters
    pub stations: StationCatalog,

    /// Cached geocoding and directions
    pub mapbox: Arc<CachedMapbox>,

    /// Station search and route ranking settings
    pub config: Arc<DashboardConfig>,
}

impl AppState {
    /// Create a new app state.
    pub fn new(
        data: DashboardData,
        stations: StationCatalog,
        mapbox: CachedMapbox,
        config: DashboardConfig,
    ) -> Self {
        Self {
            data,
            stations,
            mapbox: Arc::new(mapbox),
            config: Arc::new(config),
        }
    }
}
