//! Criterion benchmarks for `AStarPlanner`.
//!
//! Measures planning time across waypoint counts with and without a leg
//! limit. Waypoints are drawn from a seeded RNG so runs are comparable.
//!
//! Run benchmarks with:
//! ```bash
//! cargo bench --package agrilogix-pathfinder
//! ```

#![allow(missing_docs, reason = "Criterion macros generate undocumented code")]

use agrilogix_core::{HaversineProvider, Location, RoutePlanner, RouteRequest};
use agrilogix_pathfinder::AStarPlanner;
use criterion::{BenchmarkId, Criterion, Throughput, criterion_group, criterion_main};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

/// Seed for deterministic waypoint generation.
const BENCHMARK_SEED: u64 = 42;

/// Waypoint counts to benchmark.
const WAYPOINT_COUNTS: &[usize] = &[10, 50, 200];

/// Leg limit short enough to force relays across the benchmark area.
const LEG_LIMIT_KM: f64 = 60.0;

fn request(waypoint_count: usize, max_leg_km: Option<f64>) -> RouteRequest {
    let mut rng = ChaCha8Rng::seed_from_u64(BENCHMARK_SEED);
    let waypoints = (0..waypoint_count)
        .map(|_| Location::new(rng.gen_range(19.5..21.5), rng.gen_range(84.8..86.8)))
        .collect();
    RouteRequest {
        start: Location::new(19.6, 84.9),
        end: Location::new(21.4, 86.7),
        waypoints,
        max_leg_km,
    }
}

fn bench_plan(c: &mut Criterion) {
    let planner = AStarPlanner::new(HaversineProvider);
    let mut group = c.benchmark_group("astar_plan");

    for &count in WAYPOINT_COUNTS {
        group.throughput(Throughput::Elements(count as u64));
        let unlimited = request(count, None);
        group.bench_with_input(BenchmarkId::new("unlimited", count), &unlimited, |b, req| {
            b.iter(|| planner.plan(req));
        });
        let limited = request(count, Some(LEG_LIMIT_KM));
        group.bench_with_input(BenchmarkId::new("leg_limited", count), &limited, |b, req| {
            b.iter(|| planner.plan(req));
        });
    }
    group.finish();
}

criterion_group!(benches, bench_plan);
criterion_main!(benches);
