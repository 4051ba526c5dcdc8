//! Per-station usage counts.
//!
//! Groups rides by the station they start and end at, then ranks
//! stations by total usage for the "popular stations" table.

use std::collections::HashMap;

use serde::Serialize;

use crate::domain::{RideRecord, StationId, StationIdentity};

use super::names::StationNameLookup;

/// Usage counts for one station.
///
/// `total_usage` is always `start_count + end_count`; it is computed at
/// construction and the fields are read-only.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StationUsage {
    station_id: StationId,
    station_name: String,
    start_count: u32,
    end_count: u32,
    total_usage: u32,
}

impl StationUsage {
    /// Create a usage row, deriving the total.
    pub fn new(
        station_id: StationId,
        station_name: impl Into<String>,
        start_count: u32,
        end_count: u32,
    ) -> Self {
        Self {
            station_id,
            station_name: station_name.into(),
            start_count,
            end_count,
            total_usage: start_count + end_count,
        }
    }

    pub fn station_id(&self) -> &StationId {
        &self.station_id
    }

    pub fn station_name(&self) -> &str {
        &self.station_name
    }

    pub fn start_count(&self) -> u32 {
        self.start_count
    }

    pub fn end_count(&self) -> u32 {
        self.end_count
    }

    pub fn total_usage(&self) -> u32 {
        self.total_usage
    }
}

/// Start/end tallies for one station, before name resolution.
#[derive(Debug, Clone)]
struct Tally {
    station_id: StationId,
    start_count: u32,
    end_count: u32,
}

/// Count rides per station.
///
/// Every station seen as a start comes first, in first-seen order, then
/// stations seen only as an end, in their first-seen order.
fn tally(rides: &[RideRecord]) -> Vec<Tally> {
    let mut order: Vec<Tally> = Vec::new();
    let mut index: HashMap<&StationId, usize> = HashMap::new();

    for start in rides.iter().filter_map(|r| r.start_station.as_ref()) {
        let i = slot(&mut index, &mut order, start);
        order[i].start_count += 1;
    }
    for end in rides.iter().filter_map(|r| r.end_station.as_ref()) {
        let i = slot(&mut index, &mut order, end);
        order[i].end_count += 1;
    }

    order
}

/// Position of a station's tally, appending a zeroed one on first sight.
fn slot<'a>(
    index: &mut HashMap<&'a StationId, usize>,
    order: &mut Vec<Tally>,
    id: &'a StationId,
) -> usize {
    *index.entry(id).or_insert_with(|| {
        order.push(Tally {
            station_id: id.clone(),
            start_count: 0,
            end_count: 0,
        });
        order.len() - 1
    })
}

/// Aggregate rides into per-station usage, busiest first.
///
/// Rides missing a start (or end) station simply don't contribute to
/// that side's count. Stations with equal totals keep the order in which
/// they were first encountered. Names come from `identities`; stations
/// without a name are labelled `Unknown (<id>)`.
pub fn aggregate(rides: &[RideRecord], identities: &[StationIdentity]) -> Vec<StationUsage> {
    let names = StationNameLookup::from_identities(identities);
    aggregate_with_names(rides, &names)
}

/// Aggregate using an already-built name lookup.
pub fn aggregate_with_names(rides: &[RideRecord], names: &StationNameLookup) -> Vec<StationUsage> {
    let mut usage: Vec<StationUsage> = tally(rides)
        .into_iter()
        .map(|t| {
            let name = names.display_name(&t.station_id);
            StationUsage::new(t.station_id, name, t.start_count, t.end_count)
        })
        .collect();

    // sort_by is stable, so ties keep first-encountered order
    usage.sort_by(|a, b| b.total_usage.cmp(&a.total_usage));

    usage
}

#[cfg(test)]
mod tests {
    use super::*;

    fn id(s: &str) -> StationId {
        StationId::parse(s).unwrap()
    }

    fn ride(start: Option<&str>, end: Option<&str>) -> RideRecord {
        RideRecord::new(start.map(id), end.map(id))
    }

    #[test]
    fn empty_rides() {
        let identities = vec![StationIdentity::new(id("A"), "Main St")];
        assert!(aggregate(&[], &identities).is_empty());
    }

    #[test]
    fn mixed_presence_scenario() {
        let rides = vec![
            ride(Some("A"), Some("B")),
            ride(Some("A"), Some("C")),
            ride(Some("B"), None),
        ];
        let identities = vec![StationIdentity::new(id("A"), "Main St")];

        let usage = aggregate(&rides, &identities);
        assert_eq!(usage.len(), 3);

        assert_eq!(usage[0], StationUsage::new(id("A"), "Main St", 2, 0));
        assert_eq!(usage[1], StationUsage::new(id("B"), "Unknown (B)", 1, 1));
        assert_eq!(usage[2], StationUsage::new(id("C"), "Unknown (C)", 0, 1));
        assert_eq!(usage[0].total_usage(), 2);
        assert_eq!(usage[1].total_usage(), 2);
        assert_eq!(usage[2].total_usage(), 1);
    }

    #[test]
    fn no_identities_labels_everything_unknown() {
        let rides = vec![ride(Some("3005"), Some("3006"))];
        let usage = aggregate(&rides, &[]);

        assert!(
            usage
                .iter()
                .all(|u| u.station_name() == format!("Unknown ({})", u.station_id()))
        );
    }

    #[test]
    fn ride_with_no_stations_is_ignored() {
        let rides = vec![ride(None, None), ride(Some("A"), None)];
        let usage = aggregate(&rides, &[]);

        assert_eq!(usage.len(), 1);
        assert_eq!(usage[0].start_count(), 1);
        assert_eq!(usage[0].end_count(), 0);
    }

    #[test]
    fn round_trip_to_same_station_counts_both_sides() {
        let rides = vec![ride(Some("A"), Some("A"))];
        let usage = aggregate(&rides, &[]);

        assert_eq!(usage.len(), 1);
        assert_eq!(usage[0].start_count(), 1);
        assert_eq!(usage[0].end_count(), 1);
        assert_eq!(usage[0].total_usage(), 2);
    }

    #[test]
    fn busier_station_first_regardless_of_order() {
        let rides = vec![
            ride(Some("quiet"), None),
            ride(Some("busy"), Some("busy")),
            ride(Some("busy"), None),
        ];
        let usage = aggregate(&rides, &[]);

        assert_eq!(usage[0].station_id().as_str(), "busy");
        assert_eq!(usage[0].total_usage(), 3);
        assert_eq!(usage[1].station_id().as_str(), "quiet");
    }

    #[test]
    fn ties_list_start_stations_before_end_only_stations() {
        let rides = vec![ride(Some("X"), Some("Y")), ride(Some("Z"), Some("W"))];
        let usage = aggregate(&rides, &[]);

        let order: Vec<&str> = usage.iter().map(|u| u.station_id().as_str()).collect();
        assert_eq!(order, vec!["X", "Z", "Y", "W"]);
    }

    #[test]
    fn end_then_start_station_ranks_with_start_stations() {
        // "B" is first seen as an end but also starts a ride
        let rides = vec![ride(Some("A"), Some("B")), ride(Some("C"), None), ride(Some("B"), None)];
        let usage = aggregate(&rides, &[]);

        let order: Vec<&str> = usage.iter().map(|u| u.station_id().as_str()).collect();
        assert_eq!(order, vec!["B", "A", "C"]);
    }

    #[test]
    fn inputs_are_untouched() {
        let rides = vec![ride(Some("A"), Some("B"))];
        let identities = vec![StationIdentity::new(id("A"), "Main St")];
        let rides_before = rides.clone();
        let identities_before = identities.clone();

        let _ = aggregate(&rides, &identities);

        assert_eq!(rides, rides_before);
        assert_eq!(identities, identities_before);
    }
}
