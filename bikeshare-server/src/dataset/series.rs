//! Station locations and per-station usage series.

use std::sync::Arc;

use serde::Serialize;
use tracing::{info, warn};

use crate::domain::{Station, StationId};

use super::catalog::DataPaths;
use super::error::DatasetError;
use super::loader::{
    Loaded, UsageCounter, load_bike_stations_file, load_daily_usage_file, load_hourly_usage_file,
};

/// Usage by hour of day.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct HourlySeries {
    pub hours: Vec<String>,
    pub usage: Vec<u32>,
}

/// Usage by day of month.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct DailySeries {
    pub days: Vec<String>,
    pub usage: Vec<u32>,
}

/// Hourly and daily usage for a single station.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StationUsageSeries {
    pub station_id: StationId,
    /// One day's usage, by hour
    pub daily: HourlySeries,
    /// One month's usage, by day
    pub monthly: DailySeries,
}

fn series_for(counters: &[UsageCounter], id: &StationId) -> (Vec<String>, Vec<u32>) {
    counters
        .iter()
        .filter(|c| &c.station_id == id)
        .map(|c| (c.label.clone(), c.usage))
        .unzip()
}

/// Bike stations plus their usage counters, loaded once at startup.
#[derive(Debug, Clone, Default)]
pub struct StationCatalog {
    stations: Arc<Vec<Station>>,
    hourly: Arc<Vec<UsageCounter>>,
    daily: Arc<Vec<UsageCounter>>,
}

impl StationCatalog {
    pub fn new(stations: Vec<Station>, hourly: Vec<UsageCounter>, daily: Vec<UsageCounter>) -> Self {
        Self {
            stations: Arc::new(stations),
            hourly: Arc::new(hourly),
            daily: Arc::new(daily),
        }
    }

    /// Read the station and usage files.
    ///
    /// The station file is required. Missing usage files leave the
    /// series empty.
    pub fn read(paths: &DataPaths) -> Result<Self, DatasetError> {
        let stations = load_bike_stations_file(&paths.bike_stations())?;
        let hourly = counters_or_empty(load_hourly_usage_file(&paths.daily_usage()), "hourly");
        let daily = counters_or_empty(load_daily_usage_file(&paths.monthly_usage()), "daily");

        info!(
            stations = stations.records.len(),
            rejected = stations.rejected,
            hourly = hourly.len(),
            daily = daily.len(),
            "loaded station catalog"
        );

        Ok(Self::new(stations.records, hourly, daily))
    }

    /// Load on the blocking pool, falling back to an empty catalog.
    pub async fn load(paths: DataPaths) -> Self {
        let result = tokio::task::spawn_blocking(move || Self::read(&paths))
            .await
            .map_err(|e| DatasetError::Task(e.to_string()))
            .and_then(|r| r);

        result.unwrap_or_else(|e| {
            warn!(error = %e, "failed to load bike stations, continuing without them");
            Self::default()
        })
    }

    pub fn stations(&self) -> &[Station] {
        &self.stations
    }

    pub fn get(&self, id: &StationId) -> Option<&Station> {
        self.stations.iter().find(|s| &s.id == id)
    }

    /// Usage series for one station, in file order.
    pub fn usage_series(&self, id: &StationId) -> StationUsageSeries {
        let (hours, hourly_usage) = series_for(&self.hourly, id);
        let (days, daily_usage) = series_for(&self.daily, id);
        StationUsageSeries {
            station_id: id.clone(),
            daily: HourlySeries {
                hours,
                usage: hourly_usage,
            },
            monthly: DailySeries {
                days,
                usage: daily_usage,
            },
        }
    }
}

fn counters_or_empty(
    result: Result<Loaded<UsageCounter>, DatasetError>,
    kind: &'static str,
) -> Vec<UsageCounter> {
    match result {
        Ok(loaded) => loaded.records,
        Err(e) => {
            warn!(kind, error = %e, "usage counters unavailable");
            Vec::new()
        }
    }
}
