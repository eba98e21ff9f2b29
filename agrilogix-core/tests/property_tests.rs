//! Property-based tests for distances, search, assignment and costing.
//!
//! # Invariants tested
//!
//! - **Identity and symmetry:** `d(a, a) == 0` and `d(a, b) == d(b, a)`.
//! - **Nearest oracle:** the selected facility is no farther than any other.
//! - **Assignment minimality:** greedy assignments pick a closest facility.
//! - **Capacity respect:** capacity-aware assignment never oversubscribes.
//! - **Cost linearity:** for a fixed tier, cost scales with distance.
//! - **Tier monotonicity:** more cargo never selects a smaller vehicle.

use agrilogix_core::{
    AssignmentEngine, AssignmentMode, CostModel, Facility, FacilityKind, Location, Producer,
    assign_producers, facility_loads, haversine_km, nearest_facility,
    nearest_producers,
};
use proptest::prelude::*;

fn location_strategy() -> impl Strategy<Value = Location> {
    (-90.0_f64..=90.0, -180.0_f64..=180.0).prop_map(|(lat, lon)| Location::new(lat, lon))
}

/// Points within a couple of degrees of central Odisha.
fn regional_location_strategy() -> impl Strategy<Value = Location> {
    (19.0_f64..21.5, 84.5_f64..87.0).prop_map(|(lat, lon)| Location::new(lat, lon))
}

fn facilities_strategy(max: usize) -> impl Strategy<Value = Vec<Facility>> {
    proptest::collection::vec((regional_location_strategy(), 10.0_f64..500.0), 1..=max).prop_map(
        |specs| {
            specs
                .into_iter()
                .enumerate()
                .map(|(index, (location, capacity))| {
                    Facility::new(
                        format!("f{index}"),
                        format!("Facility {index}"),
                        FacilityKind::Storage,
                        location,
                        capacity,
                    )
                })
                .collect()
        },
    )
}

fn producers_strategy(max: usize) -> impl Strategy<Value = Vec<Producer>> {
    proptest::collection::vec((regional_location_strategy(), 0.0_f64..120.0), 0..=max).prop_map(
        |specs| {
            specs
                .into_iter()
                .enumerate()
                .map(|(index, (location, quantity))| {
                    Producer::new(format!("p{index}"), format!("Producer {index}"), location, quantity)
                })
                .collect()
        },
    )
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(200))]

    #[test]
    fn distance_to_self_is_zero(a in location_strategy()) {
        prop_assert_eq!(haversine_km(a, a), 0.0);
    }

    #[test]
    fn distance_is_symmetric_and_non_negative(a in location_strategy(), b in location_strategy()) {
        let forward = haversine_km(a, b);
        prop_assert_eq!(forward, haversine_km(b, a));
        prop_assert!(forward >= 0.0);
    }

    #[test]
    fn nearest_facility_matches_brute_force(
        point in regional_location_strategy(),
        facilities in facilities_strategy(12),
    ) {
        let nearest = nearest_facility(point, &facilities).expect("non-empty list");
        for facility in &facilities {
            prop_assert!(nearest.distance_km <= haversine_km(point, facility.location));
        }
    }

    #[test]
    fn nearest_producers_are_sorted_and_bounded(
        point in regional_location_strategy(),
        producers in producers_strategy(12),
        limit in 0_usize..16,
    ) {
        let ranked = nearest_producers(point, &producers, limit);
        prop_assert_eq!(ranked.len(), limit.min(producers.len()));
        prop_assert!(ranked.windows(2).all(|pair| pair[0].distance_km <= pair[1].distance_km));
        if let Some(farthest) = ranked.last() {
            let excluded = producers
                .iter()
                .filter(|p| ranked.iter().all(|r| r.producer_id != p.id));
            for producer in excluded {
                prop_assert!(haversine_km(point, producer.location) >= farthest.distance_km);
            }
        }
    }

    #[test]
    fn greedy_assignment_is_minimal(
        producers in producers_strategy(10),
        facilities in facilities_strategy(8),
    ) {
        let assignments = assign_producers(&producers, &facilities);
        prop_assert_eq!(assignments.len(), producers.len());
        for (producer, assignment) in producers.iter().zip(&assignments) {
            prop_assert_eq!(&assignment.producer_id, &producer.id);
            let chosen = assignment.facility.as_ref().expect("facilities present");
            for facility in &facilities {
                prop_assert!(chosen.distance_km <= haversine_km(producer.location, facility.location));
            }
        }
    }

    #[test]
    fn capacity_aware_assignment_never_oversubscribes(
        producers in producers_strategy(10),
        facilities in facilities_strategy(5),
    ) {
        let engine = AssignmentEngine::new(AssignmentMode::CapacityAware);
        let assignments = engine.assign(&producers, &facilities);
        let loads = facility_loads(&assignments, &producers, &facilities);
        for load in &loads {
            prop_assert!(load.projected_utilization <= load.capacity + 1e-9);
        }
    }

    #[test]
    fn cost_is_linear_in_distance(
        distance in 0.1_f64..500.0,
        factor in 1.0_f64..10.0,
        quantity in 0.1_f64..200.0,
    ) {
        let model = CostModel::default();
        let near = model.estimate(distance, quantity);
        let far = model.estimate(distance * factor, quantity);
        prop_assert_eq!(near.vehicle_tier, far.vehicle_tier);
        let expected = near.total_cost * factor;
        prop_assert!((far.total_cost - expected).abs() <= 1e-9 * expected.max(1.0));
    }

    #[test]
    fn degenerate_inputs_cost_nothing(value in 0.0_f64..500.0) {
        let model = CostModel::default();
        prop_assert_eq!(model.estimate(value, 0.0).total_cost, 0.0);
        prop_assert_eq!(model.estimate(0.0, value).total_cost, 0.0);
    }

    #[test]
    fn larger_loads_never_select_smaller_tiers(a in 0.0_f64..200.0, b in 0.0_f64..200.0) {
        let model = CostModel::default();
        let (small, large) = if a <= b { (a, b) } else { (b, a) };
        prop_assert!(model.select_tier(small) <= model.select_tier(large));
    }
}

