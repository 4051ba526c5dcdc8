//! CSV loaders producing validated domain records.
//!
//! Each loader deserializes rows into a loose raw struct, then converts
//! them into domain types. Rows that fail either step are dropped and
//! counted; they never reach the aggregation code.

use std::fs::File;
use std::io::Read;
use std::path::Path;

use chrono::NaiveDateTime;
use serde::Deserialize;
use serde::de::DeserializeOwned;
use tracing::debug;

use crate::domain::{Coordinate, RideRecord, Station, StationId, StationIdentity};

use super::error::DatasetError;

/// Start-time layouts seen in the ride exports.
const START_TIME_FORMATS: [&str; 4] = [
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%dT%H:%M:%S",
    "%m/%d/%Y %H:%M:%S",
    "%m/%d/%Y %H:%M",
];

/// Records loaded from one file, plus how many rows were rejected.
#[derive(Debug, Clone, PartialEq)]
pub struct Loaded<T> {
    pub records: Vec<T>,
    pub rejected: usize,
}

impl<T> Loaded<T> {
    pub fn empty() -> Self {
        Self {
            records: Vec::new(),
            rejected: 0,
        }
    }
}

/// Deserialize every row and convert it, counting rows that fail.
///
/// Only IO failures abort the load; a malformed row is skipped.
fn load_rows<R, Row, T>(
    reader: R,
    kind: &'static str,
    convert: impl Fn(Row) -> Option<T>,
) -> Result<Loaded<T>, DatasetError>
where
    R: Read,
    Row: DeserializeOwned,
{
    let mut rdr = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .flexible(true)
        .from_reader(reader);

    let mut loaded = Loaded::empty();
    for (line, rec) in rdr.deserialize::<Row>().enumerate() {
        match rec {
            Ok(row) => match convert(row) {
                Some(record) => loaded.records.push(record),
                None => {
                    debug!(kind, row = line + 1, "dropping invalid row");
                    loaded.rejected += 1;
                }
            },
            Err(e) if e.is_io_error() => return Err(e.into()),
            Err(e) => {
                debug!(kind, row = line + 1, error = %e, "dropping unparseable row");
                loaded.rejected += 1;
            }
        }
    }

    Ok(loaded)
}

fn open(path: &Path) -> Result<File, DatasetError> {
    File::open(path).map_err(|source| DatasetError::Io {
        path: path.to_path_buf(),
        source,
    })
}

/// Parse a ride start time, trying each known layout.
pub fn parse_start_time(s: &str) -> Option<NaiveDateTime> {
    let s = s.trim();
    START_TIME_FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(s, fmt).ok())
}

#[derive(Debug, Deserialize)]
struct RideRow {
    start_station: Option<String>,
    end_station: Option<String>,
    start_time: Option<String>,
    passholder_type: Option<String>,
}

/// Load a quarterly ride log.
///
/// Every row is kept: missing stations or times are represented as
/// `None` and handled by the consumers.
pub fn load_rides<R: Read>(reader: R) -> Result<Loaded<RideRecord>, DatasetError> {
    load_rows(reader, "ride", |row: RideRow| {
        Some(RideRecord {
            start_station: StationId::parse_optional(row.start_station.as_deref()),
            end_station: StationId::parse_optional(row.end_station.as_deref()),
            start_time: row.start_time.as_deref().and_then(parse_start_time),
            passholder_type: row.passholder_type.filter(|s| !s.is_empty()),
        })
    })
}

pub fn load_rides_file(path: &Path) -> Result<Loaded<RideRecord>, DatasetError> {
    load_rides(open(path)?)
}

#[derive(Debug, Deserialize)]
struct IdentityRow {
    #[serde(rename = "Kiosk ID")]
    kiosk_id: Option<String>,
    #[serde(rename = "Kiosk Name")]
    kiosk_name: Option<String>,
}

/// Load the station metadata export.
///
/// Rows missing an id or name are kept as partial identities; the name
/// lookup decides what to do with them.
pub fn load_station_identities<R: Read>(
    reader: R,
) -> Result<Loaded<StationIdentity>, DatasetError> {
    load_rows(reader, "station identity", |row: IdentityRow| {
        Some(StationIdentity {
            id: StationId::parse_optional(row.kiosk_id.as_deref()),
            name: row.kiosk_name.filter(|s| !s.is_empty()),
        })
    })
}

pub fn load_station_identities_file(
    path: &Path,
) -> Result<Loaded<StationIdentity>, DatasetError> {
    load_station_identities(open(path)?)
}

#[derive(Debug, Deserialize)]
struct StationRow {
    id: String,
    name: Option<String>,
    latitude: f64,
    longitude: f64,
    bikes_available: Option<u32>,
    total_docks: Option<u32>,
}

/// Load station locations.
///
/// Rows without an id or with an invalid coordinate are rejected.
pub fn load_bike_stations<R: Read>(reader: R) -> Result<Loaded<Station>, DatasetError> {
    load_rows(reader, "bike station", |row: StationRow| {
        let id = StationId::parse(&row.id).ok()?;
        let coordinate = Coordinate::new(row.longitude, row.latitude).ok()?;
        let name = row
            .name
            .filter(|s| !s.is_empty())
            .unwrap_or_else(|| id.to_string());

        Some(
            Station::new(id, name, coordinate).with_availability(
                row.bikes_available.unwrap_or(0),
                row.total_docks.unwrap_or(0),
            ),
        )
    })
}

pub fn load_bike_stations_file(path: &Path) -> Result<Loaded<Station>, DatasetError> {
    load_bike_stations(open(path)?)
}

/// One usage counter for a station: a label (hour or day) and a count.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UsageCounter {
    pub station_id: StationId,
    pub label: String,
    pub usage: u32,
}

#[derive(Debug, Deserialize)]
struct HourlyRow {
    station_id: String,
    hour: Option<String>,
    usage: Option<u32>,
}

#[derive(Debug, Deserialize)]
struct DailyRow {
    station_id: String,
    day: Option<String>,
    usage: Option<u32>,
}

/// Load hourly counters (`station_id,hour,usage`).
///
/// A missing usage value counts as zero.
pub fn load_hourly_usage<R: Read>(reader: R) -> Result<Loaded<UsageCounter>, DatasetError> {
    load_rows(reader, "hourly usage", |row: HourlyRow| {
        Some(UsageCounter {
            station_id: StationId::parse(&row.station_id).ok()?,
            label: row.hour.unwrap_or_default(),
            usage: row.usage.unwrap_or(0),
        })
    })
}

pub fn load_hourly_usage_file(path: &Path) -> Result<Loaded<UsageCounter>, DatasetError> {
    load_hourly_usage(open(path)?)
}

/// Load daily counters (`station_id,day,usage`).
pub fn load_daily_usage<R: Read>(reader: R) -> Result<Loaded<UsageCounter>, DatasetError> {
    load_rows(reader, "daily usage", |row: DailyRow| {
        Some(UsageCounter {
            station_id: StationId::parse(&row.station_id).ok()?,
            label: row.day.unwrap_or_default(),
            usage: row.usage.unwrap_or(0),
        })
    })
}

pub fn load_daily_usage_file(path: &Path) -> Result<Loaded<UsageCounter>, DatasetError> {
    load_daily_usage(open(path)?)
}
