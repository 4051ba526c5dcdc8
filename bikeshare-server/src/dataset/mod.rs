//! CSV datasets behind the dashboard.
//!
//! Ride logs are loaded per quarter and swapped in as a whole; station
//! locations and usage counters are loaded once at startup.

mod catalog;
mod error;
mod loader;
mod series;
mod store;

pub use catalog::{
    BIKE_STATIONS_FILE, DAILY_USAGE_FILE, DataPaths, MONTHLY_USAGE_FILE, Quarter,
    STATION_IDENTITIES_FILE,
};
pub use error::DatasetError;
pub use loader::{
    Loaded, UsageCounter, load_bike_stations, load_bike_stations_file, load_daily_usage,
    load_daily_usage_file, load_hourly_usage, load_hourly_usage_file, load_rides, load_rides_file,
    load_station_identities, load_station_identities_file, parse_start_time,
};
pub use series::{DailySeries, HourlySeries, StationCatalog, StationUsageSeries};
pub use store::{DashboardData, DatasetSnapshot, read_snapshot};
