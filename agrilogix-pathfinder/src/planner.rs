//! `AStarPlanner` implementation of the core `RoutePlanner` seam.

use agrilogix_core::{
    DistanceProvider, HaversineProvider, Location, Route, RouteError, RoutePlanner, RouteRequest,
    haversine_km,
};

use crate::astar::{self, GOAL, START};

/// Waypoint cap applied by [`AStarPlannerConfig::default`].
pub const DEFAULT_MAX_WAYPOINTS: usize = 256;

/// Relative slack within which a multi-leg route counts as no shorter than
/// the direct edge. Collinear waypoints can round a few ulps below it.
const DIRECT_TIE_TOLERANCE: f64 = 1e-9;

/// Configuration for [`AStarPlanner`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AStarPlannerConfig {
    /// Largest number of waypoints admitted to the search graph.
    ///
    /// Extra waypoints are dropped, keeping those that add the smallest
    /// detour between start and end.
    pub max_waypoints: usize,
}

impl Default for AStarPlannerConfig {
    fn default() -> Self {
        Self {
            max_waypoints: DEFAULT_MAX_WAYPOINTS,
        }
    }
}

/// A* planner over a complete graph of start, end and waypoints.
///
/// Generic over the edge-weight source; the heuristic is always the
/// great-circle distance to the end.
#[derive(Debug, Clone)]
pub struct AStarPlanner<D = HaversineProvider> {
    distances: D,
    config: AStarPlannerConfig,
}

impl Default for AStarPlanner<HaversineProvider> {
    fn default() -> Self {
        Self::new(HaversineProvider)
    }
}

impl<D: DistanceProvider> AStarPlanner<D> {
    /// Construct a planner using default configuration.
    #[must_use]
    pub fn new(distances: D) -> Self {
        Self::with_config(distances, AStarPlannerConfig::default())
    }

    /// Construct a planner with explicit configuration.
    #[must_use]
    pub const fn with_config(distances: D, config: AStarPlannerConfig) -> Self {
        Self { distances, config }
    }

    /// The configuration in use.
    #[must_use]
    pub const fn config(&self) -> &AStarPlannerConfig {
        &self.config
    }

    /// Keep at most `max_waypoints`, preferring the smallest detour.
    #[expect(
        clippy::float_arithmetic,
        reason = "detour is a sum of two distances"
    )]
    fn admitted_waypoints(&self, request: &RouteRequest) -> Vec<Location> {
        let limit = self.config.max_waypoints;
        if request.waypoints.len() <= limit {
            return request.waypoints.clone();
        }

        let mut ranked: Vec<(usize, f64)> = request
            .waypoints
            .iter()
            .enumerate()
            .map(|(index, waypoint)| {
                let detour = self.distances.distance_km(request.start, *waypoint)
                    + self.distances.distance_km(*waypoint, request.end);
                (index, detour)
            })
            .collect();
        ranked.sort_by(|lhs, rhs| lhs.1.total_cmp(&rhs.1).then_with(|| lhs.0.cmp(&rhs.0)));
        ranked.truncate(limit);
        // Restore input order so node numbering stays deterministic.
        ranked.sort_by_key(|(index, _)| *index);

        log::warn!(
            "pruned {} of {} waypoints to the {limit} with the smallest detour",
            request.waypoints.len() - limit,
            request.waypoints.len()
        );
        ranked
            .into_iter()
            .filter_map(|(index, _)| request.waypoints.get(index).copied())
            .collect()
    }
}

impl<D: DistanceProvider> RoutePlanner for AStarPlanner<D> {
    #[expect(
        clippy::float_arithmetic,
        reason = "tie tolerance scales the direct distance"
    )]
    fn plan(&self, request: &RouteRequest) -> Result<Route, RouteError> {
        request.validate()?;

        let direct_km = self.distances.distance_km(request.start, request.end);
        if !direct_km.is_finite() {
            log::warn!("non-finite distance between route endpoints; returning direct segment");
            return Ok(Route::new(vec![request.start, request.end], direct_km));
        }

        let mut nodes = Vec::with_capacity(request.waypoints.len() + 2);
        nodes.push(request.start);
        nodes.push(request.end);
        nodes.extend(self.admitted_waypoints(request));

        let weights = self.distances.get_distance_matrix(&nodes)?;
        let heuristic: Vec<f64> = nodes
            .iter()
            .map(|node| haversine_km(*node, request.end))
            .collect();

        let Some(found) = astar::search(&weights, &heuristic, request.max_leg_km) else {
            return Err(RouteError::Unreachable {
                max_leg_km: request.max_leg_km.unwrap_or(f64::INFINITY),
            });
        };
        debug_assert_eq!(found.nodes.first(), Some(&START));
        debug_assert_eq!(found.nodes.last(), Some(&GOAL));

        let direct_admitted = request.max_leg_km.is_none_or(|limit| direct_km <= limit);
        if found.nodes.len() > 2
            && direct_admitted
            && found.distance_km >= direct_km * (1.0 - DIRECT_TIE_TOLERANCE)
        {
            log::debug!("detour ties the direct {direct_km} km edge; keeping the direct segment");
            return Ok(Route::new(vec![request.start, request.end], direct_km));
        }
        // Legs along the great circle can sum a few ulps below it.
        let floor_km = heuristic.get(START).copied().unwrap_or(0.0);
        let distance_km = found.distance_km.max(floor_km);

        let path: Vec<Location> = found
            .nodes
            .iter()
            .filter_map(|index| nodes.get(*index).copied())
            .collect();
        log::debug!(
            "planned {distance_km} km route through {} of {} nodes",
            path.len(),
            nodes.len()
        );
        Ok(Route::new(path, distance_km))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use agrilogix_core::test_support::DetourDistanceProvider;
    use rstest::{fixture, rstest};

    #[fixture]
    fn corridor() -> RouteRequest {
        RouteRequest {
            start: Location::new(0.0, 0.0),
            end: Location::new(0.0, 2.0),
            waypoints: vec![Location::new(0.0, 1.0), Location::new(1.0, 1.0)],
            max_leg_km: None,
        }
    }

    #[rstest]
    fn no_waypoints_gives_direct_segment() {
        let request = RouteRequest::direct(Location::new(20.20, 85.72), Location::new(20.30, 85.82));
        let route = AStarPlanner::new(HaversineProvider).plan(&request).expect("direct route");
        assert_eq!(route, Route::direct(request.start, request.end));
    }

    #[rstest]
    fn off_route_waypoint_does_not_displace_direct_segment(mut corridor: RouteRequest) {
        corridor.waypoints = vec![Location::new(1.0, 1.0)];
        let route = AStarPlanner::new(HaversineProvider).plan(&corridor).expect("route");
        assert_eq!(route.path(), [corridor.start, corridor.end]);
    }

    #[rstest]
    fn collinear_waypoints_never_undercut_direct_segment() {
        let planner = AStarPlanner::new(HaversineProvider);
        for step in 1..=400_u32 {
            let offset = f64::from(step) * 0.0025;
            let start = Location::new(0.0, 0.0);
            let end = Location::new(0.0, 2.0 * offset + 0.37);
            let request = RouteRequest {
                start,
                end,
                waypoints: vec![Location::new(0.0, offset), Location::new(0.0, offset / 2.0)],
                max_leg_km: None,
            };
            let route = planner.plan(&request).expect("unlimited route");
            assert_eq!(route.path(), [start, end], "offset {offset}");
            assert_eq!(route.distance_km(), haversine_km(start, end), "offset {offset}");
        }
    }

    #[rstest]
    fn relayed_route_is_never_shorter_than_great_circle() {
        let start = Location::new(0.0, 0.0);
        let end = Location::new(0.0, 2.0);
        let request = RouteRequest {
            start,
            end,
            waypoints: vec![Location::new(0.0, 0.5), Location::new(0.0, 1.0), Location::new(0.0, 1.5)],
            max_leg_km: Some(60.0),
        };
        let route = AStarPlanner::new(HaversineProvider).plan(&request).expect("relayed route");
        assert_eq!(route.path().len(), 5);
        assert!(route.distance_km() >= haversine_km(start, end));
    }

    #[rstest]
    fn inflated_direct_edge_routes_via_waypoint(corridor: RouteRequest) {
        let provider = DetourDistanceProvider {
            from: corridor.start,
            to: corridor.end,
            factor: 3.0,
        };
        let route = AStarPlanner::new(provider).plan(&corridor).expect("route");
        assert_eq!(route.path(), [corridor.start, Location::new(0.0, 1.0), corridor.end]);
        let legs = haversine_km(corridor.start, Location::new(0.0, 1.0))
            + haversine_km(Location::new(0.0, 1.0), corridor.end);
        assert!((route.distance_km() - legs).abs() < 1e-9);
    }

    #[rstest]
    fn leg_limit_without_relay_is_unreachable() {
        let mut request = RouteRequest::direct(Location::new(0.0, 0.0), Location::new(0.0, 2.0));
        request.max_leg_km = Some(150.0);
        let err = AStarPlanner::new(HaversineProvider).plan(&request).expect_err("too far");
        assert_eq!(err, RouteError::Unreachable { max_leg_km: 150.0 });
    }

    #[rstest]
    fn invalid_leg_limit_is_rejected(mut corridor: RouteRequest) {
        corridor.max_leg_km = Some(-1.0);
        let err = AStarPlanner::new(HaversineProvider).plan(&corridor).expect_err("invalid");
        assert_eq!(err, RouteError::InvalidMaxLeg(-1.0));
    }

    #[rstest]
    fn malformed_endpoint_returns_direct_nan_route() {
        let request = RouteRequest::direct(Location::new(f64::NAN, 0.0), Location::new(0.0, 1.0));
        let route = AStarPlanner::new(HaversineProvider).plan(&request).expect("direct fallback");
        assert_eq!(route.path().len(), 2);
        assert!(route.distance_km().is_nan());
    }

    #[rstest]
    fn coincident_endpoints_give_zero_length_route() {
        let point = Location::new(20.3, 85.8);
        let route = AStarPlanner::new(HaversineProvider)
            .plan(&RouteRequest::direct(point, point))
            .expect("trivial route");
        assert_eq!(route.path(), [point, point]);
        assert_eq!(route.distance_km(), 0.0);
    }

    #[rstest]
    fn waypoints_beyond_cap_are_pruned_by_detour(corridor: RouteRequest) {
        let planner = AStarPlanner::with_config(
            HaversineProvider,
            AStarPlannerConfig { max_waypoints: 1 },
        );
        let mut request = corridor;
        request.waypoints = vec![Location::new(5.0, 1.0), Location::new(0.1, 1.0)];
        assert_eq!(planner.admitted_waypoints(&request), [Location::new(0.1, 1.0)]);
    }
}
