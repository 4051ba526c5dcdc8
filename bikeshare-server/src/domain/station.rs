//! Station identifier and station record types.

use std::fmt;

use serde::{Deserialize, Serialize};

use super::{Coordinate, DomainError};

/// A non-empty station identifier.
///
/// Ride logs and station metadata both key stations by a raw string id
/// (kiosk id). Surrounding whitespace is trimmed; a blank id is rejected,
/// so an absent station is always represented as `Option<StationId>`.
///
/// # Examples
///
/// ```
/// use bikeshare_server::domain::StationId;
///
/// let id = StationId::parse(" 3005 ").unwrap();
/// assert_eq!(id.as_str(), "3005");
///
/// assert!(StationId::parse("").is_err());
/// assert!(StationId::parse("   ").is_err());
/// ```
#[derive(Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct StationId(String);

impl StationId {
    /// Parse a station id, trimming whitespace.
    pub fn parse(s: &str) -> Result<Self, DomainError> {
        let trimmed = s.trim();
        if trimmed.is_empty() {
            return Err(DomainError::EmptyStationId);
        }
        Ok(Self(trimmed.to_string()))
    }

    /// Parse an optional raw field, treating blank values as absent.
    pub fn parse_optional(s: Option<&str>) -> Option<Self> {
        s.and_then(|s| Self::parse(s).ok())
    }

    /// Returns the id as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for StationId {
    type Error = DomainError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        Self::parse(&s)
    }
}

impl From<StationId> for String {
    fn from(id: StationId) -> Self {
        id.0
    }
}

impl fmt::Debug for StationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "StationId({})", self.0)
    }
}

impl fmt::Display for StationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Maps a raw station id to its display name.
///
/// Either side may be missing in the metadata export; such records are
/// skipped when building a name lookup.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StationIdentity {
    pub id: Option<StationId>,
    pub name: Option<String>,
}

impl StationIdentity {
    /// Create an identity with both fields present.
    pub fn new(id: StationId, name: impl Into<String>) -> Self {
        Self {
            id: Some(id),
            name: Some(name.into()),
        }
    }
}

/// A dock station with its location and live availability.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Station {
    pub id: StationId,
    pub name: String,
    pub coordinate: Coordinate,
    pub bikes_available: u32,
    pub total_docks: u32,
}

impl Station {
    /// Create a station with no availability information.
    pub fn new(id: StationId, name: impl Into<String>, coordinate: Coordinate) -> Self {
        Self {
            id,
            name: name.into(),
            coordinate,
            bikes_available: 0,
            total_docks: 0,
        }
    }

    /// Set availability counts.
    pub fn with_availability(mut self, bikes_available: u32, total_docks: u32) -> Self {
        self.bikes_available = bikes_available;
        self.total_docks = total_docks;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_trims_whitespace() {
        let id = StationId::parse("  4214\t").unwrap();
        assert_eq!(id.as_str(), "4214");
    }

    #[test]
    fn reject_blank() {
        assert_eq!(StationId::parse(""), Err(DomainError::EmptyStationId));
        assert_eq!(StationId::parse(" \n "), Err(DomainError::EmptyStationId));
    }

    #[test]
    fn parse_optional_treats_blank_as_absent() {
        assert_eq!(StationId::parse_optional(None), None);
        assert_eq!(StationId::parse_optional(Some("")), None);
        assert_eq!(
            StationId::parse_optional(Some("3005")),
            Some(StationId::parse("3005").unwrap())
        );
    }

    #[test]
    fn display_and_debug() {
        let id = StationId::parse("3030").unwrap();
        assert_eq!(id.to_string(), "3030");
        assert_eq!(format!("{:?}", id), "StationId(3030)");
    }

    #[test]
    fn serde_rejects_blank_id() {
        let ok: StationId = serde_json::from_str("\"3005\"").unwrap();
        assert_eq!(ok.as_str(), "3005");
        assert!(serde_json::from_str::<StationId>("\"  \"").is_err());
    }

    #[test]
    fn station_builder() {
        let coord = Coordinate::new(-118.25, 34.05).unwrap();
        let station =
            Station::new(StationId::parse("1").unwrap(), "Union Station", coord).with_availability(4, 20);
        assert_eq!(station.bikes_available, 4);
        assert_eq!(station.total_docks, 20);
    }
}
