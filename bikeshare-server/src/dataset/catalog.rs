//! Dataset file layout and the quarter catalog.

use std::fmt;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use super::error::DatasetError;

/// Station metadata export (kiosk id → kiosk name).
pub const STATION_IDENTITIES_FILE: &str = "metro-bike-share-stations-2024-10-01.csv";

/// Live station locations and availability.
pub const BIKE_STATIONS_FILE: &str = "bike_stations.csv";

/// Per-station hourly usage counters.
pub const DAILY_USAGE_FILE: &str = "daily_usage.csv";

/// Per-station daily usage counters over a month.
pub const MONTHLY_USAGE_FILE: &str = "monthly_usage.csv";

/// A quarter of ride data that the dashboard can show.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum Quarter {
    Y2024Q1,
    Y2024Q2,
    #[default]
    Y2024Q3,
}

impl Quarter {
    /// Every quarter in the catalog, oldest first.
    pub const ALL: [Quarter; 3] = [Quarter::Y2024Q1, Quarter::Y2024Q2, Quarter::Y2024Q3];

    /// Label shown in the dashboard dropdown.
    pub fn label(self) -> &'static str {
        match self {
            Quarter::Y2024Q1 => "2024-Q1",
            Quarter::Y2024Q2 => "2024-Q2",
            Quarter::Y2024Q3 => "2024-Q3",
        }
    }

    /// Ride log file for this quarter.
    pub fn rides_file(self) -> &'static str {
        match self {
            Quarter::Y2024Q1 => "metro-trips-2024-q1.csv",
            Quarter::Y2024Q2 => "metro-trips-2024-q2.csv",
            Quarter::Y2024Q3 => "metro-trips-2024-q3.csv",
        }
    }

    /// Look up a quarter by its label, e.g. `2024-Q2`.
    pub fn parse(label: &str) -> Result<Self, DatasetError> {
        let label = label.trim();
        Self::ALL
            .into_iter()
            .find(|q| q.label().eq_ignore_ascii_case(label))
            .ok_or_else(|| DatasetError::UnknownQuarter(label.to_string()))
    }
}

impl fmt::Display for Quarter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl TryFrom<String> for Quarter {
    type Error = DatasetError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        Self::parse(&s)
    }
}

impl From<Quarter> for String {
    fn from(q: Quarter) -> Self {
        q.label().to_string()
    }
}

/// Locations of the dataset files under one data directory.
#[derive(Debug, Clone)]
pub struct DataPaths {
    dir: PathBuf,
}

impl DataPaths {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub fn rides(&self, quarter: Quarter) -> PathBuf {
        self.dir.join(quarter.rides_file())
    }

    pub fn station_identities(&self) -> PathBuf {
        self.dir.join(STATION_IDENTITIES_FILE)
    }

    pub fn bike_stations(&self) -> PathBuf {
        self.dir.join(BIKE_STATIONS_FILE)
    }

    pub fn daily_usage(&self) -> PathBuf {
        self.dir.join(DAILY_USAGE_FILE)
    }

    pub fn monthly_usage(&self) -> PathBuf {
        self.dir.join(MONTHLY_USAGE_FILE)
    }
}

impl Default for DataPaths {
    fn default() -> Self {
        Self::new("data")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_labels() {
        assert_eq!(Quarter::parse("2024-Q1").unwrap(), Quarter::Y2024Q1);
        assert_eq!(Quarter::parse(" 2024-q2 ").unwrap(), Quarter::Y2024Q2);
        assert!(matches!(
            Quarter::parse("2023-Q4"),
            Err(DatasetError::UnknownQuarter(_))
        ));
    }

    #[test]
    fn default_is_latest() {
        assert_eq!(Quarter::default(), Quarter::Y2024Q3);
        assert_eq!(Quarter::ALL.last(), Some(&Quarter::default()));
    }

    #[test]
    fn serde_uses_label() {
        assert_eq!(
            serde_json::to_string(&Quarter::Y2024Q2).unwrap(),
            "\"2024-Q2\""
        );
        let q: Quarter = serde_json::from_str("\"2024-Q1\"").unwrap();
        assert_eq!(q, Quarter::Y2024Q1);
        assert!(serde_json::from_str::<Quarter>("\"nope\"").is_err());
    }

    #[test]
    fn paths_join_data_dir() {
        let paths = DataPaths::new("/srv/data");
        assert_eq!(
            paths.rides(Quarter::Y2024Q3),
            PathBuf::from("/srv/data/metro-trips-2024-q3.csv")
        );
        assert_eq!(
            paths.station_identities(),
            PathBuf::from("/srv/data").join(STATION_IDENTITIES_FILE)
        );
        assert_eq!(DataPaths::default().dir(), Path::new("data"));
    }
}
