//! Ride aggregation for the dashboard.
//!
//! Turns a ride log into the station-usage table and the chart series
//! (rides per day, weekday/hour heatmap, pass-type breakdown).

mod aggregate;
mod names;
mod stats;

pub use aggregate::{StationUsage, aggregate, aggregate_with_names};
pub use names::{StationNameLookup, unknown_label};
pub use stats::{
    DailyCount, DashboardStats, HeatmapCell, PassholderCount, UNKNOWN_PASSHOLDER, WEEKDAY_LABELS,
    rides_by_passholder, rides_by_weekday_hour, rides_per_day,
};
