//! Deterministic fixtures and stub collaborators for unit and behaviour
//! tests.

use crate::{
    DistanceProvider, Facility, FacilityKind, Location, Producer, Route, RouteError,
    RoutePlanner, RouteRequest, haversine_km,
};

/// A cold store in Bhubaneswar and a rice mill near Puri.
#[must_use]
pub fn odisha_facilities() -> Vec<Facility> {
    vec![
        Facility::new(
            "bbsr-cold",
            "Bhubaneswar cold store",
            FacilityKind::Storage,
            Location::new(20.30, 85.82),
            500.0,
        )
        .with_utilization(120.0),
        Facility::new(
            "puri-mill",
            "Puri rice mill",
            FacilityKind::Processing,
            Location::new(19.81, 85.83),
            800.0,
        ),
    ]
}

/// Three farms around Khordha with quantities in each vehicle band.
#[must_use]
pub fn odisha_producers() -> Vec<Producer> {
    vec![
        Producer::new("khordha-1", "Sahu farm", Location::new(20.20, 85.72), 45.0),
        Producer::new("pipili-1", "Pipili cooperative", Location::new(20.11, 85.83), 75.0),
        Producer::new("jatni-1", "Jatni smallholding", Location::new(20.17, 85.70), 12.0),
    ]
}

/// [`RoutePlanner`] that always returns the direct segment.
#[derive(Debug, Default, Clone, Copy)]
pub struct DirectPlanner;

impl RoutePlanner for DirectPlanner {
    fn plan(&self, request: &RouteRequest) -> Result<Route, RouteError> {
        request.validate()?;
        Ok(Route::direct(request.start, request.end))
    }
}

/// [`RoutePlanner`] that rejects every request as unreachable.
#[derive(Debug, Default, Clone, Copy)]
pub struct UnreachablePlanner;

impl RoutePlanner for UnreachablePlanner {
    fn plan(&self, request: &RouteRequest) -> Result<Route, RouteError> {
        Err(RouteError::Unreachable {
            max_leg_km: request.max_leg_km.unwrap_or(0.0),
        })
    }
}

/// [`DistanceProvider`] that multiplies the edge between two locations.
///
/// Every other edge is the haversine distance, so the provider never
/// undercuts the great-circle floor when `factor >= 1`.
#[derive(Debug, Clone, Copy)]
pub struct DetourDistanceProvider {
    /// One end of the inflated edge.
    pub from: Location,
    /// The other end of the inflated edge.
    pub to: Location,
    /// Multiplier applied to that edge.
    pub factor: f64,
}

impl DistanceProvider for DetourDistanceProvider {
    #[expect(
        clippy::float_arithmetic,
        reason = "detours scale a floating-point distance"
    )]
    fn distance_km(&self, from: Location, to: Location) -> f64 {
        let base = haversine_km(from, to);
        let matches = (from == self.from && to == self.to) || (from == self.to && to == self.from);
        if matches { base * self.factor } else { base }
    }
}
