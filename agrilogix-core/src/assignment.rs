//! Assign every producer in a snapshot to a facility.
//!
//! The default [`AssignmentMode::Greedy`] policy sends each producer to its
//! nearest facility independently and ignores capacity, so a popular
//! facility can be oversubscribed. [`facility_loads`] reports when that
//! happens. [`AssignmentMode::CapacityAware`] instead places producers
//! largest-first into the nearest facility that still has room.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::nearest::{closest, nearest_index};
use crate::{Facility, Producer, haversine_km};

/// Policy used by [`AssignmentEngine`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum AssignmentMode {
    /// Nearest facility per producer, ignoring capacity.
    #[default]
    Greedy,
    /// First-fit decreasing into the nearest facility with headroom.
    CapacityAware,
}

/// The facility a producer was sent to.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct AssignedFacility {
    /// Identifier of the facility.
    pub facility_id: String,
    /// Great-circle distance from the producer.
    pub distance_km: f64,
}

/// Outcome for one producer.
///
/// `facility` is `None` when no facility was supplied or, in capacity-aware
/// mode, when none had room.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Assignment {
    /// Identifier of the producer.
    pub producer_id: String,
    /// Selected facility, if any.
    pub facility: Option<AssignedFacility>,
}

/// Projected load on a facility after applying a set of assignments.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct FacilityLoad {
    /// Identifier of the facility.
    pub facility_id: String,
    /// Total capacity.
    pub capacity: f64,
    /// Utilisation before the assignments.
    pub current_utilization: f64,
    /// Sum of assigned producer quantities.
    pub assigned_quantity: f64,
    /// `current_utilization + assigned_quantity`.
    pub projected_utilization: f64,
    /// Whether the projection exceeds capacity.
    pub oversubscribed: bool,
}

/// Assigns producers to facilities under a fixed [`AssignmentMode`].
///
/// # Examples
/// ```
/// use agrilogix_core::{AssignmentEngine, AssignmentMode, Facility, FacilityKind, Location, Producer};
///
/// let facilities = [
///     Facility::new("near", "Near", FacilityKind::Storage, Location::new(0.0, 0.1), 50.0),
///     Facility::new("far", "Far", FacilityKind::Storage, Location::new(0.0, 1.0), 500.0),
/// ];
/// let producers = [
///     Producer::new("p1", "One", Location::new(0.0, 0.0), 40.0),
///     Producer::new("p2", "Two", Location::new(0.0, 0.0), 30.0),
/// ];
///
/// let greedy = AssignmentEngine::default().assign(&producers, &facilities);
/// assert!(greedy.iter().all(|a| a.facility.as_ref().is_some_and(|f| f.facility_id == "near")));
///
/// let aware = AssignmentEngine::new(AssignmentMode::CapacityAware).assign(&producers, &facilities);
/// let placed: Vec<_> = aware
///     .iter()
///     .filter_map(|a| a.facility.as_ref().map(|f| f.facility_id.as_str()))
///     .collect();
/// assert_eq!(placed, ["near", "far"]);
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct AssignmentEngine {
    mode: AssignmentMode,
}

impl AssignmentEngine {
    /// Construct an engine for `mode`.
    #[must_use]
    pub const fn new(mode: AssignmentMode) -> Self {
        Self { mode }
    }

    /// The configured policy.
    #[must_use]
    pub const fn mode(&self) -> AssignmentMode {
        self.mode
    }

    /// Produce one [`Assignment`] per producer, in producer order.
    #[must_use]
    pub fn assign(&self, producers: &[Producer], facilities: &[Facility]) -> Vec<Assignment> {
        let assignments = match self.mode {
            AssignmentMode::Greedy => assign_greedy(producers, facilities),
            AssignmentMode::CapacityAware => assign_capacity_aware(producers, facilities),
        };
        log::debug!(
            "assigned {} producers across {} facilities ({:?})",
            producers.len(),
            facilities.len(),
            self.mode
        );
        assignments
    }
}

/// Greedy nearest-facility assignment.
///
/// Shorthand for `AssignmentEngine::default().assign(producers, facilities)`.
#[must_use]
pub fn assign_producers(producers: &[Producer], facilities: &[Facility]) -> Vec<Assignment> {
    AssignmentEngine::default().assign(producers, facilities)
}

/// Project facility utilisation after `assignments` are applied.
///
/// Assignments naming an unknown producer or facility are skipped. The
/// result follows facility input order.
#[expect(
    clippy::float_arithmetic,
    reason = "utilisation sums are fractional quantities"
)]
#[must_use]
pub fn facility_loads(
    assignments: &[Assignment],
    producers: &[Producer],
    facilities: &[Facility],
) -> Vec<FacilityLoad> {
    let mut totals = vec![0.0_f64; facilities.len()];
    for assignment in assignments {
        let Some(target) = &assignment.facility else {
            continue;
        };
        let Some(producer) = producers.iter().find(|p| p.id == assignment.producer_id) else {
            continue;
        };
        let slot = facilities
            .iter()
            .position(|f| f.id == target.facility_id)
            .and_then(|index| totals.get_mut(index));
        if let Some(total) = slot {
            *total += producer.quantity;
        }
    }

    facilities
        .iter()
        .zip(totals)
        .map(|(facility, assigned_quantity)| {
            let projected_utilization = facility.utilization + assigned_quantity;
            let oversubscribed = projected_utilization > facility.capacity;
            if oversubscribed {
                log::warn!(
                    "facility {} projected at {projected_utilization} exceeds capacity {}",
                    facility.id,
                    facility.capacity
                );
            }
            FacilityLoad {
                facility_id: facility.id.clone(),
                capacity: facility.capacity,
                current_utilization: facility.utilization,
                assigned_quantity,
                projected_utilization,
                oversubscribed,
            }
        })
        .collect()
}

fn assign_greedy(producers: &[Producer], facilities: &[Facility]) -> Vec<Assignment> {
    producers
        .iter()
        .map(|producer| {
            let facility = nearest_index(producer.location, facilities.iter().map(|f| f.location))
                .and_then(|(index, distance_km)| assigned(facilities, index, distance_km));
            Assignment {
                producer_id: producer.id.clone(),
                facility,
            }
        })
        .collect()
}

#[expect(
    clippy::float_arithmetic,
    reason = "headroom bookkeeping is fractional"
)]
fn assign_capacity_aware(producers: &[Producer], facilities: &[Facility]) -> Vec<Assignment> {
    let mut headroom: Vec<f64> = facilities.iter().map(Facility::remaining_capacity).collect();

    // Largest quantities first; equal quantities keep input order.
    let mut order: Vec<usize> = (0..producers.len()).collect();
    order.sort_by(|&lhs, &rhs| {
        let lhs_qty = producers.get(lhs).map_or(0.0, |p| p.quantity);
        let rhs_qty = producers.get(rhs).map_or(0.0, |p| p.quantity);
        rhs_qty.total_cmp(&lhs_qty)
    });

    let mut placements: Vec<Option<AssignedFacility>> = vec![None; producers.len()];
    for producer_index in order {
        let Some(producer) = producers.get(producer_index) else {
            continue;
        };
        let fitting = closest(
            facilities
                .iter()
                .zip(&headroom)
                .enumerate()
                .filter(|(_, (_, room))| **room >= producer.quantity)
                .map(|(index, (facility, _))| {
                    (index, haversine_km(producer.location, facility.location))
                }),
        );

        match fitting {
            Some((index, distance_km)) => {
                if let Some(room) = headroom.get_mut(index) {
                    *room -= producer.quantity;
                }
                if let Some(slot) = placements.get_mut(producer_index) {
                    *slot = assigned(facilities, index, distance_km);
                }
            }
            None if !facilities.is_empty() => {
                log::warn!(
                    "producer {} ({} units) does not fit any facility",
                    producer.id,
                    producer.quantity
                );
            }
            None => {}
        }
    }

    producers
        .iter()
        .zip(placements)
        .map(|(producer, facility)| Assignment {
            producer_id: producer.id.clone(),
            facility,
        })
        .collect()
}

fn assigned(facilities: &[Facility], index: usize, distance_km: f64) -> Option<AssignedFacility> {
    facilities.get(index).map(|facility| AssignedFacility {
        facility_id: facility.id.clone(),
        distance_km,
    })
}
