//! Facade crate for the Agrilogix logistics engine.
//!
//! Re-exports the core domain types and, behind the `pathfinder` feature,
//! the A* route planner.
//!
//! ```
//! use agrilogix::{Facility, FacilityKind, Location, nearest_facility};
//!
//! let stores = [Facility::new(
//!     "bbsr-cold",
//!     "Cold store",
//!     FacilityKind::Storage,
//!     Location::new(20.30, 85.82),
//!     500.0,
//! )];
//! let found = nearest_facility(Location::new(20.20, 85.72), &stores).expect("one store");
//! assert_eq!(found.facility_id, "bbsr-cold");
//! ```

#![forbid(unsafe_code)]

pub use agrilogix_core::{
    AssignedFacility, Assignment, AssignmentEngine, AssignmentMode, CostModel, CostModelError,
    DisplayPolyline, DistanceError, DistanceMatrix, DistanceProvider, EARTH_RADIUS_KM, Facility,
    FacilityKind, FacilityLoad, HaversineProvider, Location, LocationError, LogisticsCost,
    NearestFacility, NearestProducer, Producer, Route, RouteError, RoutePlanner, RouteRequest,
    ShipmentPlan, ShipmentPlanner, ShipmentQuote, ShipmentRequest, SnapshotError, TariffConfig,
    VehicleTier, assign_producers, facility_loads, haversine_km, interpolate_polyline,
    nearest_facility, nearest_producers,
};

#[cfg(feature = "pathfinder")]
pub use agrilogix_pathfinder::{AStarPlanner, AStarPlannerConfig, DEFAULT_MAX_WAYPOINTS};
