//! Ride records.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use super::StationId;

/// One bike trip from the ride log.
///
/// Any field may be absent in the export. Counting code skips the
/// missing side rather than discarding the whole ride.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RideRecord {
    pub start_station: Option<StationId>,
    pub end_station: Option<StationId>,
    pub start_time: Option<NaiveDateTime>,
    pub passholder_type: Option<String>,
}

impl RideRecord {
    /// Create a ride between two (possibly missing) stations.
    pub fn new(start_station: Option<StationId>, end_station: Option<StationId>) -> Self {
        Self {
            start_station,
            end_station,
            start_time: None,
            passholder_type: None,
        }
    }

    /// Set the start time.
    pub fn with_start_time(mut self, start_time: NaiveDateTime) -> Self {
        self.start_time = Some(start_time);
        self
    }

    /// Set the pass type.
    pub fn with_passholder_type(mut self, passholder_type: impl Into<String>) -> Self {
        self.passholder_type = Some(passholder_type.into());
        self
    }
}
