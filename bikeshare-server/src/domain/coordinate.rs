//! Geographic coordinates.

use std::fmt;

use serde::{Deserialize, Serialize};

use super::DomainError;

/// A validated `(longitude, latitude)` pair in degrees.
///
/// Longitude comes first, matching GeoJSON and the directions API.
/// Both components are finite and within range, so distances computed
/// from coordinates are never NaN.
///
/// # Examples
///
/// ```
/// use bikeshare_server::domain::Coordinate;
///
/// let la = Coordinate::new(-118.2437, 34.0522).unwrap();
/// assert_eq!(la.lon(), -118.2437);
///
/// assert!(Coordinate::new(f64::NAN, 0.0).is_err());
/// assert!(Coordinate::new(0.0, 91.0).is_err());
/// ```
#[derive(Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "[f64; 2]", into = "[f64; 2]")]
pub struct Coordinate {
    lon: f64,
    lat: f64,
}

impl Coordinate {
    /// Create a coordinate, validating range and finiteness.
    pub fn new(lon: f64, lat: f64) -> Result<Self, DomainError> {
        if !lon.is_finite() || !lat.is_finite() {
            return Err(DomainError::InvalidCoordinate {
                reason: "components must be finite",
            });
        }
        if !(-180.0..=180.0).contains(&lon) {
            return Err(DomainError::InvalidCoordinate {
                reason: "longitude must be within [-180, 180]",
            });
        }
        if !(-90.0..=90.0).contains(&lat) {
            return Err(DomainError::InvalidCoordinate {
                reason: "latitude must be within [-90, 90]",
            });
        }
        Ok(Self { lon, lat })
    }

    pub fn lon(&self) -> f64 {
        self.lon
    }

    pub fn lat(&self) -> f64 {
        self.lat
    }

    /// Planar midpoint between two coordinates.
    pub fn midpoint(self, other: Coordinate) -> Coordinate {
        // Average of two in-range values stays in range
        Coordinate {
            lon: (self.lon + other.lon) / 2.0,
            lat: (self.lat + other.lat) / 2.0,
        }
    }
}

impl TryFrom<[f64; 2]> for Coordinate {
    type Error = DomainError;

    fn try_from([lon, lat]: [f64; 2]) -> Result<Self, Self::Error> {
        Self::new(lon, lat)
    }
}

impl From<Coordinate> for [f64; 2] {
    fn from(c: Coordinate) -> Self {
        [c.lon, c.lat]
    }
}

impl fmt::Debug for Coordinate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Coordinate({}, {})", self.lon, self.lat)
    }
}

impl fmt::Display for Coordinate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{},{}", self.lon, self.lat)
    }
}
