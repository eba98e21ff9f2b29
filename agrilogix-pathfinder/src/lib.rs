//! A* route planning over facility waypoints.
//!
//! [`AStarPlanner`] implements [`RoutePlanner`](agrilogix_core::RoutePlanner).
//! Nodes are the start, the end and any waypoints supplied with the request.
//! Every pair of nodes is joined by an edge weighted by a
//! [`DistanceProvider`](agrilogix_core::DistanceProvider), haversine by
//! default, and the search is guided by the great-circle distance to the end.
//! Because edge weights never undercut that distance the heuristic is
//! consistent and the returned route is the shortest over the node set.
//!
//! An optional leg limit removes long edges, which is how a short-range
//! vehicle ends up routed via intermediate facilities.
//!
//! # Examples
//! ```
//! use agrilogix_core::{HaversineProvider, Location, RoutePlanner, RouteRequest};
//! use agrilogix_pathfinder::AStarPlanner;
//!
//! let start = Location::new(0.0, 0.0);
//! let end = Location::new(0.0, 2.0);
//! let mut request = RouteRequest::direct(start, end);
//! request.waypoints = vec![Location::new(0.0, 1.0)];
//! request.max_leg_km = Some(150.0);
//!
//! let route = AStarPlanner::new(HaversineProvider).plan(&request).expect("reachable via the waypoint");
//! assert_eq!(route.path(), [start, Location::new(0.0, 1.0), end]);
//! ```

#![forbid(unsafe_code)]
#![cfg_attr(docsrs, feature(doc_cfg))]

mod astar;
mod planner;

pub use planner::{AStarPlanner, AStarPlannerConfig, DEFAULT_MAX_WAYPOINTS};
