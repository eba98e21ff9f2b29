//! Best-first search over a dense distance matrix.

use std::cmp::Ordering;
use std::collections::BinaryHeap;

use agrilogix_core::DistanceMatrix;

/// Index of the start node in the search graph.
pub(crate) const START: usize = 0;
/// Index of the goal node in the search graph.
pub(crate) const GOAL: usize = 1;

/// Node indices from [`START`] to [`GOAL`] and the summed edge weight.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct Found {
    pub(crate) nodes: Vec<usize>,
    pub(crate) distance_km: f64,
}

/// Frontier entry ordered so that [`BinaryHeap`] pops the lowest `f` first,
/// then the lowest node index.
#[derive(Debug, Clone, Copy)]
struct Frontier {
    estimate: f64,
    node: usize,
}

impl PartialEq for Frontier {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for Frontier {}

impl PartialOrd for Frontier {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Frontier {
    fn cmp(&self, other: &Self) -> Ordering {
        other
            .estimate
            .total_cmp(&self.estimate)
            .then_with(|| other.node.cmp(&self.node))
    }
}

/// Search `weights` from [`START`] to [`GOAL`].
///
/// `heuristic[i]` must not exceed the true remaining cost from node `i`.
/// Edges heavier than `max_leg_km`, and `NaN` edges, are skipped. Returns
/// `None` when the goal cannot be reached.
#[expect(
    clippy::float_arithmetic,
    reason = "path costs are sums of floating-point distances"
)]
pub(crate) fn search(
    weights: &DistanceMatrix,
    heuristic: &[f64],
    max_leg_km: Option<f64>,
) -> Option<Found> {
    let node_count = weights.len();
    let mut best_cost = vec![f64::INFINITY; node_count];
    let mut came_from: Vec<Option<usize>> = vec![None; node_count];
    let mut closed = vec![false; node_count];
    let mut frontier = BinaryHeap::new();

    *best_cost.get_mut(START)? = 0.0;
    frontier.push(Frontier {
        estimate: heuristic.get(START).copied().unwrap_or(0.0),
        node: START,
    });

    while let Some(Frontier { node, .. }) = frontier.pop() {
        if node == GOAL {
            return Some(Found {
                nodes: reconstruct(&came_from, GOAL),
                distance_km: *best_cost.get(GOAL)?,
            });
        }
        let visited = closed.get_mut(node)?;
        if *visited {
            continue;
        }
        *visited = true;

        let cost_here = *best_cost.get(node)?;
        let row = weights.get(node)?;
        for (next, &weight) in row.iter().enumerate() {
            if next == node || closed.get(next).copied().unwrap_or(true) {
                continue;
            }
            if !within_leg_limit(weight, max_leg_km) {
                continue;
            }
            let tentative = cost_here + weight;
            let Some(known) = best_cost.get_mut(next) else {
                continue;
            };
            if tentative < *known {
                *known = tentative;
                if let Some(parent) = came_from.get_mut(next) {
                    *parent = Some(node);
                }
                frontier.push(Frontier {
                    estimate: tentative + heuristic.get(next).copied().unwrap_or(0.0),
                    node: next,
                });
            }
        }
    }
    None
}

// `NaN` fails every comparison, so malformed edges never qualify.
fn within_leg_limit(weight: f64, max_leg_km: Option<f64>) -> bool {
    match max_leg_km {
        Some(limit) => weight <= limit,
        None => weight >= 0.0,
    }
}

fn reconstruct(came_from: &[Option<usize>], goal: usize) -> Vec<usize> {
    let mut nodes = vec![goal];
    let mut current = goal;
    while let Some(Some(parent)) = came_from.get(current) {
        nodes.push(*parent);
        current = *parent;
    }
    nodes.reverse();
    nodes
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn matrix(rows: &[&[f64]]) -> DistanceMatrix {
        rows.iter().map(|row| row.to_vec()).collect()
    }

    #[rstest]
    fn frontier_pops_lowest_estimate_then_lowest_node() {
        let mut heap = BinaryHeap::new();
        heap.push(Frontier { estimate: 2.0, node: 0 });
        heap.push(Frontier { estimate: 1.0, node: 3 });
        heap.push(Frontier { estimate: 1.0, node: 2 });
        let order: Vec<usize> = std::iter::from_fn(|| heap.pop().map(|f| f.node)).collect();
        assert_eq!(order, [2, 3, 0]);
    }

    #[rstest]
    fn direct_edge_wins_when_cheapest() {
        let weights = matrix(&[&[0.0, 5.0, 3.0], &[5.0, 0.0, 3.0], &[3.0, 3.0, 0.0]]);
        let found = search(&weights, &[5.0, 0.0, 3.0], None).expect("reachable");
        assert_eq!(found.nodes, [START, GOAL]);
        assert_eq!(found.distance_km, 5.0);
    }

    #[rstest]
    fn detour_is_taken_when_shorter() {
        let weights = matrix(&[&[0.0, 10.0, 3.0], &[10.0, 0.0, 3.0], &[3.0, 3.0, 0.0]]);
        let found = search(&weights, &[5.0, 0.0, 3.0], None).expect("reachable");
        assert_eq!(found.nodes, [START, 2, GOAL]);
        assert_eq!(found.distance_km, 6.0);
    }

    #[rstest]
    fn equal_cost_alternatives_prefer_direct_edge() {
        let weights = matrix(&[&[0.0, 6.0, 3.0], &[6.0, 0.0, 3.0], &[3.0, 3.0, 0.0]]);
        let found = search(&weights, &[6.0, 0.0, 3.0], None).expect("reachable");
        assert_eq!(found.nodes, [START, GOAL]);
    }

    #[rstest]
    fn leg_limit_forces_intermediate_stop() {
        let weights = matrix(&[&[0.0, 6.0, 3.0], &[6.0, 0.0, 3.0], &[3.0, 3.0, 0.0]]);
        let found = search(&weights, &[6.0, 0.0, 3.0], Some(4.0)).expect("reachable");
        assert_eq!(found.nodes, [START, 2, GOAL]);
    }

    #[rstest]
    fn leg_limit_can_disconnect_goal() {
        let weights = matrix(&[&[0.0, 6.0], &[6.0, 0.0]]);
        assert_eq!(search(&weights, &[6.0, 0.0], Some(4.0)), None);
    }

    #[rstest]
    fn nan_edges_are_never_traversed() {
        let weights = matrix(&[
            &[0.0, 10.0, f64::NAN],
            &[10.0, 0.0, f64::NAN],
            &[f64::NAN, f64::NAN, 0.0],
        ]);
        let found = search(&weights, &[10.0, 0.0, f64::NAN], None).expect("reachable");
        assert_eq!(found.nodes, [START, GOAL]);
    }

    #[rstest]
    fn reconstruct_walks_parents_back_to_start() {
        let came_from = [None, Some(3), Some(0), Some(2)];
        assert_eq!(reconstruct(&came_from, GOAL), [0, 2, 3, 1]);
    }
}
