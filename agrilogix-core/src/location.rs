//! Geographic points expressed as latitude/longitude degrees.
//!
//! [`Location::new`] accepts any pair of numbers; distance computations on
//! malformed input yield `NaN` rather than failing. Callers that accept data
//! from outside the process should check it with [`Location::try_new`] or
//! [`Location::validate`] before using it.

use geo::{Coord, Point};
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::distance::haversine_km;

/// Valid latitude range in degrees.
pub const LATITUDE_RANGE: std::ops::RangeInclusive<f64> = -90.0..=90.0;

/// Valid longitude range in degrees.
pub const LONGITUDE_RANGE: std::ops::RangeInclusive<f64> = -180.0..=180.0;

/// A WGS84 position in degrees.
///
/// # Examples
/// ```
/// use agrilogix_core::Location;
///
/// let bhubaneswar = Location::new(20.30, 85.82);
/// assert_eq!(bhubaneswar.distance_km(&bhubaneswar), 0.0);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Location {
    /// Degrees north of the equator.
    pub latitude: f64,
    /// Degrees east of the prime meridian.
    pub longitude: f64,
}

/// Errors returned by [`Location::try_new`] and [`Location::validate`].
#[derive(Debug, Clone, Copy, PartialEq, Error)]
pub enum LocationError {
    /// A coordinate was `NaN` or infinite.
    #[error("coordinates must be finite, got ({latitude}, {longitude})")]
    NonFinite {
        /// Latitude as supplied.
        latitude: f64,
        /// Longitude as supplied.
        longitude: f64,
    },
    /// Latitude fell outside `[-90, 90]`.
    #[error("latitude {0} is outside [-90, 90]")]
    LatitudeOutOfRange(f64),
    /// Longitude fell outside `[-180, 180]`.
    #[error("longitude {0} is outside [-180, 180]")]
    LongitudeOutOfRange(f64),
}

impl Location {
    /// Construct a location without validation.
    #[must_use]
    pub const fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
        }
    }

    /// Construct a location, rejecting non-finite or out-of-range degrees.
    ///
    /// # Errors
    /// Returns [`LocationError`] describing the first failed check.
    ///
    /// # Examples
    /// ```
    /// use agrilogix_core::{Location, LocationError};
    ///
    /// assert!(Location::try_new(20.3, 85.8).is_ok());
    /// assert_eq!(
    ///     Location::try_new(91.0, 0.0),
    ///     Err(LocationError::LatitudeOutOfRange(91.0))
    /// );
    /// ```
    pub fn try_new(latitude: f64, longitude: f64) -> Result<Self, LocationError> {
        let location = Self::new(latitude, longitude);
        location.validate()?;
        Ok(location)
    }

    /// Check that both coordinates are finite and within range.
    ///
    /// # Errors
    /// Returns [`LocationError`] describing the first failed check.
    pub fn validate(&self) -> Result<(), LocationError> {
        if !self.latitude.is_finite() || !self.longitude.is_finite() {
            return Err(LocationError::NonFinite {
                latitude: self.latitude,
                longitude: self.longitude,
            });
        }
        if !LATITUDE_RANGE.contains(&self.latitude) {
            return Err(LocationError::LatitudeOutOfRange(self.latitude));
        }
        if !LONGITUDE_RANGE.contains(&self.longitude) {
            return Err(LocationError::LongitudeOutOfRange(self.longitude));
        }
        Ok(())
    }

    /// Great-circle distance to `other` in kilometres.
    #[must_use]
    pub fn distance_km(&self, other: &Self) -> f64 {
        haversine_km(*self, *other)
    }
}

// `geo` uses `x = longitude`, `y = latitude`.
impl From<Location> for Coord<f64> {
    fn from(location: Location) -> Self {
        Self {
            x: location.longitude,
            y: location.latitude,
        }
    }
}

impl From<Coord<f64>> for Location {
    fn from(coord: Coord<f64>) -> Self {
        Self::new(coord.y, coord.x)
    }
}

impl From<Location> for Point<f64> {
    fn from(location: Location) -> Self {
        Self(location.into())
    }
}

impl From<Point<f64>> for Location {
    fn from(point: Point<f64>) -> Self {
        point.0.into()
    }
}
