//! Plan a single shipment from a farm gate to the nearest facility.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::nearest::nearest_index;
use crate::{
    CostModel, Facility, Location, LogisticsCost, NearestFacility, Route, RouteError,
    RoutePlanner, RouteRequest, ShipmentQuote,
};

/// Inputs for [`ShipmentPlanner::plan`].
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct ShipmentRequest {
    /// Where the goods are collected.
    pub origin: Location,
    /// Quantity to ship.
    pub quantity: f64,
    /// Candidate destinations.
    pub facilities: Vec<Facility>,
    /// Intermediate nodes the route may use.
    #[cfg_attr(feature = "serde", serde(default))]
    pub waypoints: Vec<Location>,
    /// Longest single leg, if the vehicle's range is limited.
    #[cfg_attr(feature = "serde", serde(default))]
    pub max_leg_km: Option<f64>,
    /// Price per unit of produce; adds a [`ShipmentQuote`] to the plan.
    #[cfg_attr(feature = "serde", serde(default))]
    pub price_per_unit: Option<f64>,
}

/// Destination, route and costs for one shipment.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize))]
pub struct ShipmentPlan {
    /// The facility the goods go to.
    pub facility: NearestFacility,
    /// The route driven.
    pub route: Route,
    /// Transport cost over the route distance.
    pub cost: LogisticsCost,
    /// Purchase quote, when a price was supplied.
    pub quote: Option<ShipmentQuote>,
}

/// Composes facility search, a [`RoutePlanner`] and a [`CostModel`].
///
/// # Examples
/// ```
/// use agrilogix_core::{
///     CostModel, Facility, FacilityKind, Location, Route, RouteError, RoutePlanner, RouteRequest,
///     ShipmentPlanner, ShipmentRequest,
/// };
///
/// struct Straight;
///
/// impl RoutePlanner for Straight {
///     fn plan(&self, request: &RouteRequest) -> Result<Route, RouteError> {
///         Ok(Route::direct(request.start, request.end))
///     }
/// }
///
/// let planner = ShipmentPlanner::new(Straight, CostModel::default());
/// let request = ShipmentRequest {
///     origin: Location::new(20.20, 85.72),
///     quantity: 45.0,
///     facilities: vec![
///         Facility::new("bbsr-cold", "Cold store", FacilityKind::Storage, Location::new(20.30, 85.82), 500.0),
///         Facility::new("puri-mill", "Rice mill", FacilityKind::Processing, Location::new(19.81, 85.83), 800.0),
///     ],
///     waypoints: Vec::new(),
///     max_leg_km: None,
///     price_per_unit: None,
/// };
/// let plan = planner.plan(&request).expect("routable").expect("facilities present");
/// assert_eq!(plan.facility.facility_id, "bbsr-cold");
/// assert_eq!(plan.cost.distance_km, plan.route.distance_km());
/// ```
#[derive(Debug, Clone)]
pub struct ShipmentPlanner<P> {
    planner: P,
    cost_model: CostModel,
}

impl<P: RoutePlanner> ShipmentPlanner<P> {
    /// Construct a planner from a route planner and a cost model.
    #[must_use]
    pub const fn new(planner: P, cost_model: CostModel) -> Self {
        Self {
            planner,
            cost_model,
        }
    }

    /// The cost model in use.
    #[must_use]
    pub const fn cost_model(&self) -> &CostModel {
        &self.cost_model
    }

    /// Pick the nearest facility, route to it and cost the route.
    ///
    /// Returns `Ok(None)` when the request lists no facilities.
    ///
    /// # Errors
    /// Propagates [`RouteError`] from the route planner.
    pub fn plan(&self, request: &ShipmentRequest) -> Result<Option<ShipmentPlan>, RouteError> {
        let Some((index, distance_km)) = nearest_index(
            request.origin,
            request.facilities.iter().map(|f| f.location),
        ) else {
            return Ok(None);
        };
        let Some(destination) = request.facilities.get(index) else {
            return Ok(None);
        };

        let route = self.planner.plan(&RouteRequest {
            start: request.origin,
            end: destination.location,
            waypoints: request.waypoints.clone(),
            max_leg_km: request.max_leg_km,
        })?;
        let cost = self.cost_model.estimate(route.distance_km(), request.quantity);
        let quote = request
            .price_per_unit
            .map(|price| self.cost_model.quote(route.distance_km(), request.quantity, price));
        log::debug!(
            "shipment to {} over {} km as {}",
            destination.id,
            route.distance_km(),
            cost.vehicle_tier
        );

        Ok(Some(ShipmentPlan {
            facility: NearestFacility {
                facility_id: destination.id.clone(),
                facility_name: destination.name.clone(),
                distance_km,
            },
            route,
            cost,
            quote,
        }))
    }
}
