//! Cost-bearing routes and the planner seam.
//!
//! A [`Route`] is produced by a [`RoutePlanner`]; the A* implementation lives
//! in the pathfinder crate. Its distance is what the cost model charges for.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::{DistanceError, Location, haversine_km};

/// An ordered path from start to end (inclusive) and its total length.
///
/// Routes serialise for output but never deserialise, so a route's distance
/// always comes from a planner or from [`Route::from_path`].
///
/// # Examples
/// ```
/// use agrilogix_core::{Location, Route};
///
/// let route = Route::direct(Location::new(0.0, 0.0), Location::new(0.0, 1.0));
/// assert_eq!(route.path().len(), 2);
/// assert!((route.distance_km() - 111.195).abs() < 1e-3);
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize))]
pub struct Route {
    path: Vec<Location>,
    distance_km: f64,
}

impl Route {
    /// Construct a route from a path and its precomputed length.
    ///
    /// Intended for [`RoutePlanner`] implementations: `distance_km` must be
    /// the sum of the leg weights the planner searched over. Other callers
    /// should use [`Route::direct`] or [`Route::from_path`], which derive the
    /// distance from the path.
    #[must_use]
    pub const fn new(path: Vec<Location>, distance_km: f64) -> Self {
        Self { path, distance_km }
    }

    /// The two-point segment from `start` to `end`.
    #[must_use]
    pub fn direct(start: Location, end: Location) -> Self {
        Self::new(vec![start, end], haversine_km(start, end))
    }

    /// Build a route whose length is the haversine sum over `path`.
    #[must_use]
    pub fn from_path(path: Vec<Location>) -> Self {
        let distance_km = path
            .windows(2)
            .filter_map(|leg| match leg {
                [from, to] => Some(haversine_km(*from, *to)),
                _ => None,
            })
            .sum();
        Self { path, distance_km }
    }

    /// Locations from start to end.
    #[must_use]
    pub fn path(&self) -> &[Location] {
        &self.path
    }

    /// Total length in kilometres.
    #[must_use]
    pub const fn distance_km(&self) -> f64 {
        self.distance_km
    }

    /// Consume the route, returning its path.
    #[must_use]
    pub fn into_path(self) -> Vec<Location> {
        self.path
    }
}

/// Parameters for [`RoutePlanner::plan`].
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct RouteRequest {
    /// Origin of the route.
    pub start: Location,
    /// Destination of the route.
    pub end: Location,
    /// Intermediate nodes the route may pass through, such as facilities.
    #[cfg_attr(feature = "serde", serde(default))]
    pub waypoints: Vec<Location>,
    /// Longest single leg a vehicle may drive, if limited.
    #[cfg_attr(feature = "serde", serde(default))]
    pub max_leg_km: Option<f64>,
}

impl RouteRequest {
    /// A request with no waypoints and no leg limit.
    #[must_use]
    pub const fn direct(start: Location, end: Location) -> Self {
        Self {
            start,
            end,
            waypoints: Vec::new(),
            max_leg_km: None,
        }
    }

    /// Check the leg limit.
    ///
    /// Coordinates are not checked; malformed ones yield `NaN` distances.
    ///
    /// # Errors
    /// Returns [`RouteError::InvalidMaxLeg`] when the limit is present but
    /// not a positive finite number.
    pub fn validate(&self) -> Result<(), RouteError> {
        match self.max_leg_km {
            Some(limit) if !(limit.is_finite() && limit > 0.0) => {
                Err(RouteError::InvalidMaxLeg(limit))
            }
            _ => Ok(()),
        }
    }
}

/// Errors returned by [`RoutePlanner::plan`].
#[derive(Debug, Clone, PartialEq, Error)]
pub enum RouteError {
    /// The leg limit was non-positive or not finite.
    #[error("max leg distance must be positive and finite, got {0}")]
    InvalidMaxLeg(f64),
    /// No path exists when legs are capped at `max_leg_km`.
    #[error("no route exists with legs of at most {max_leg_km} km")]
    Unreachable {
        /// The limit in force.
        max_leg_km: f64,
    },
    /// Building the distance graph failed.
    #[error(transparent)]
    Distance(#[from] DistanceError),
}

/// Compute a cost-minimising route for a [`RouteRequest`].
///
/// Implementations must return a path that starts at `request.start`, ends
/// at `request.end`, and whose distance is the sum of its legs. Planners must
/// be `Send + Sync` so they can be shared across threads.
pub trait RoutePlanner: Send + Sync {
    /// Plan a route.
    ///
    /// # Errors
    /// Returns [`RouteError`] when the request is invalid or unsatisfiable.
    fn plan(&self, request: &RouteRequest) -> Result<Route, RouteError>;
}

impl<P: RoutePlanner + ?Sized> RoutePlanner for &P {
    fn plan(&self, request: &RouteRequest) -> Result<Route, RouteError> {
        (**self).plan(request)
    }
}
