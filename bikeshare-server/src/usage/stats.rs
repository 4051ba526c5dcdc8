//! Ride-volume statistics for the dashboard charts.

use std::collections::{BTreeMap, HashMap};

use chrono::{Datelike, NaiveDate, Timelike};
use serde::Serialize;

use crate::domain::RideRecord;

/// Weekday labels in heatmap column order (Sunday first).
pub const WEEKDAY_LABELS: [&str; 7] = ["Sun", "Mon", "Tue", "Wed", "Thu", "Fri", "Sat"];

/// Label for rides with no pass type.
pub const UNKNOWN_PASSHOLDER: &str = "Unknown";

/// Rides started on one calendar day.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DailyCount {
    pub date: NaiveDate,
    pub total: usize,
}

/// Rides started in one (weekday, hour) cell.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HeatmapCell {
    pub weekday: &'static str,
    pub hour: u32,
    pub count: usize,
}

/// Rides per pass type.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PassholderCount {
    pub passholder_type: String,
    pub count: usize,
}

/// Everything the dashboard charts need, computed in one place.
#[derive(Debug, Clone, Serialize)]
pub struct DashboardStats {
    pub total_rides: usize,
    pub rides_per_day: Vec<DailyCount>,
    pub heatmap: Vec<HeatmapCell>,
    pub passholders: Vec<PassholderCount>,
}

impl DashboardStats {
    pub fn compute(rides: &[RideRecord]) -> Self {
        Self {
            total_rides: rides.len(),
            rides_per_day: rides_per_day(rides),
            heatmap: rides_by_weekday_hour(rides),
            passholders: rides_by_passholder(rides),
        }
    }
}

/// Count rides per start date, earliest first.
///
/// Rides without a start time are left out.
pub fn rides_per_day(rides: &[RideRecord]) -> Vec<DailyCount> {
    let mut per_day: BTreeMap<NaiveDate, usize> = BTreeMap::new();
    for start in rides.iter().filter_map(|r| r.start_time) {
        *per_day.entry(start.date()).or_default() += 1;
    }

    per_day
        .into_iter()
        .map(|(date, total)| DailyCount { date, total })
        .collect()
}

/// Count rides per (weekday, hour) of the start time.
///
/// Only non-empty cells are returned, ordered Sunday..Saturday and then
/// by hour.
pub fn rides_by_weekday_hour(rides: &[RideRecord]) -> Vec<HeatmapCell> {
    let mut cells: BTreeMap<(u32, u32), usize> = BTreeMap::new();
    for start in rides.iter().filter_map(|r| r.start_time) {
        let day = start.weekday().num_days_from_sunday();
        *cells.entry((day, start.hour())).or_default() += 1;
    }

    cells
        .into_iter()
        .map(|((day, hour), count)| HeatmapCell {
            weekday: WEEKDAY_LABELS[day as usize],
            hour,
            count,
        })
        .collect()
}

/// Count rides per pass type, most common first.
///
/// Types with equal counts keep first-encountered order. Rides without a
/// pass type are grouped under [`UNKNOWN_PASSHOLDER`].
pub fn rides_by_passholder(rides: &[RideRecord]) -> Vec<PassholderCount> {
    let mut counts: Vec<PassholderCount> = Vec::new();
    let mut index: HashMap<&str, usize> = HashMap::new();

    for ride in rides {
        let kind = ride
            .passholder_type
            .as_deref()
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .unwrap_or(UNKNOWN_PASSHOLDER);

        let i = *index.entry(kind).or_insert_with(|| {
            counts.push(PassholderCount {
                passholder_type: kind.to_string(),
                count: 0,
            });
            counts.len() - 1
        });
        counts[i].count += 1;
    }

    counts.sort_by(|a, b| b.count.cmp(&a.count));
    counts
}
