//! Core domain types and algorithms for the Agrilogix logistics engine.
//!
//! Callers hand in snapshots of producers (farms) and facilities (storage and
//! processing units) on every call; nothing here holds state between calls.
//! The crate provides:
//!
//! - great-circle distances ([`haversine_km`], [`DistanceProvider`]),
//! - nearest-facility and nearest-producer search ([`nearest_facility`],
//!   [`nearest_producers`]),
//! - producer-to-facility assignment ([`AssignmentEngine`]),
//! - route types and the [`RoutePlanner`] seam implemented by the pathfinder
//!   crate,
//! - the vehicle tier and cost model ([`CostModel`]),
//! - shipment planning that composes the above ([`ShipmentPlanner`]).
//!
//! The [`DisplayPolyline`] produced by [`interpolate_polyline`] exists only
//! for drawing; it carries no distance and never feeds the cost model.
//!
//! # Examples
//!
//! ```
//! use agrilogix_core::{Facility, FacilityKind, Location, nearest_facility};
//!
//! let facilities = vec![
//!     Facility::new("cold-1", "Cold store", FacilityKind::Storage, Location::new(20.30, 85.82), 500.0),
//!     Facility::new("mill-1", "Rice mill", FacilityKind::Processing, Location::new(19.81, 85.83), 800.0),
//! ];
//! let nearest = nearest_facility(Location::new(20.20, 85.72), &facilities).expect("one facility");
//! assert_eq!(nearest.facility_id, "cold-1");
//! ```

#![forbid(unsafe_code)]
#![cfg_attr(docsrs, feature(doc_cfg))]

pub mod assignment;
pub mod cost;
pub mod distance;
pub mod entity;
pub mod location;
pub mod nearest;
pub mod polyline;
pub mod route;
pub mod shipment;
#[cfg(any(test, feature = "test-support"))]
#[cfg_attr(docsrs, doc(cfg(feature = "test-support")))]
pub mod test_support;

pub use assignment::{
    AssignedFacility, Assignment, AssignmentEngine, AssignmentMode, FacilityLoad,
    assign_producers, facility_loads,
};
pub use cost::{
    CostModel, CostModelError, LogisticsCost, ShipmentQuote, TariffConfig, VehicleTier,
};
pub use distance::{
    DistanceError, DistanceMatrix, DistanceProvider, EARTH_RADIUS_KM, HaversineProvider,
    haversine_km,
};
pub use entity::{Facility, FacilityKind, Producer, SnapshotError};
pub use location::{Location, LocationError};
pub use nearest::{NearestFacility, NearestProducer, nearest_facility, nearest_producers};
pub use polyline::{DisplayPolyline, interpolate_polyline};
pub use route::{Route, RouteError, RoutePlanner, RouteRequest};
pub use shipment::{ShipmentPlan, ShipmentPlanner, ShipmentRequest};
