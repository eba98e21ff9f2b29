//! Great-circle distances between locations.
//!
//! [`haversine_km`] is the single source of distance for every other module.
//! The [`DistanceProvider`] trait lets the pathfinder build its graph from a
//! pluggable edge weight; [`HaversineProvider`] is the default.
//!
//! Inputs are not validated: malformed coordinates produce `NaN`.

use geo::{Distance, HaversineMeasure, Point};
use thiserror::Error;

use crate::Location;

/// Mean Earth radius used by the haversine formula.
pub const EARTH_RADIUS_KM: f64 = 6371.0;

const EARTH_SPHERE: HaversineMeasure = HaversineMeasure::new(EARTH_RADIUS_KM);

/// Square matrix of pairwise distances in kilometres.
///
/// `matrix[i][j]` is the distance from `locations[i]` to `locations[j]`.
pub type DistanceMatrix = Vec<Vec<f64>>;

/// Errors from [`DistanceProvider::get_distance_matrix`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DistanceError {
    /// No locations were provided.
    #[error("at least one location is required")]
    EmptyInput,
}

/// Haversine distance between `from` and `to` in kilometres.
///
/// Symmetric, zero for coincident points, and `NaN` when either input holds
/// `NaN`.
///
/// # Examples
/// ```
/// use agrilogix_core::{Location, haversine_km};
///
/// let a = Location::new(20.30, 85.82);
/// let b = Location::new(19.81, 85.83);
/// assert_eq!(haversine_km(a, b), haversine_km(b, a));
/// assert!((haversine_km(a, b) - 54.4955).abs() < 1e-3);
/// ```
#[must_use]
pub fn haversine_km(from: Location, to: Location) -> f64 {
    let km = EARTH_SPHERE.distance(Point::from(from), Point::from(to));
    if km.is_nan() && is_finite(from) && is_finite(to) {
        // Antipodal inputs can round the haversine above one.
        return antipodal_km();
    }
    km
}

#[expect(
    clippy::float_arithmetic,
    reason = "half the circumference of the sphere"
)]
fn antipodal_km() -> f64 {
    EARTH_RADIUS_KM * std::f64::consts::PI
}

const fn is_finite(location: Location) -> bool {
    location.latitude.is_finite() && location.longitude.is_finite()
}

/// Source of edge weights between locations.
///
/// Implementations must be symmetric and must never return less than the
/// great-circle distance between the two points; the pathfinder's heuristic
/// relies on that floor. Providers must be `Send + Sync` so planners can be
/// shared across threads.
///
/// # Examples
///
/// ```
/// use agrilogix_core::{DistanceProvider, Location, haversine_km};
///
/// /// Inflate every edge to approximate road circuity.
/// struct Circuity(f64);
///
/// impl DistanceProvider for Circuity {
///     fn distance_km(&self, from: Location, to: Location) -> f64 {
///         haversine_km(from, to) * self.0
///     }
/// }
///
/// let provider = Circuity(1.3);
/// let matrix = provider
///     .get_distance_matrix(&[Location::new(0.0, 0.0), Location::new(0.0, 1.0)])
///     .expect("two locations");
/// assert_eq!(matrix.len(), 2);
/// assert_eq!(matrix[0][0], 0.0);
/// ```
pub trait DistanceProvider: Send + Sync {
    /// Distance in kilometres from `from` to `to`.
    fn distance_km(&self, from: Location, to: Location) -> f64;

    /// Return the square distance matrix for `locations`.
    ///
    /// # Errors
    /// Returns [`DistanceError::EmptyInput`] when `locations` is empty.
    fn get_distance_matrix(&self, locations: &[Location]) -> Result<DistanceMatrix, DistanceError> {
        if locations.is_empty() {
            return Err(DistanceError::EmptyInput);
        }
        Ok(locations
            .iter()
            .map(|from| {
                locations
                    .iter()
                    .map(|to| self.distance_km(*from, *to))
                    .collect()
            })
            .collect())
    }
}

/// [`DistanceProvider`] backed by [`haversine_km`].
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct HaversineProvider;

impl DistanceProvider for HaversineProvider {
    fn distance_km(&self, from: Location, to: Location) -> f64 {
        haversine_km(from, to)
    }
}
