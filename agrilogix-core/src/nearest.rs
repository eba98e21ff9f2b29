//! Linear-scan nearest-neighbour queries over caller snapshots.
//!
//! Candidate sets are tens to low hundreds of records, so both queries scan
//! every candidate rather than maintaining a spatial index. Ties resolve to
//! the candidate that appears first in the input.

use std::cmp::Ordering;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::{Facility, Location, Producer, haversine_km};

/// The facility closest to a query point.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct NearestFacility {
    /// Identifier of the selected facility.
    pub facility_id: String,
    /// Display name of the selected facility.
    pub facility_name: String,
    /// Great-circle distance from the query point.
    pub distance_km: f64,
}

/// A producer ranked by distance from a query point.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct NearestProducer {
    /// Identifier of the producer.
    pub producer_id: String,
    /// Display name of the producer.
    pub producer_name: String,
    /// Great-circle distance from the query point.
    pub distance_km: f64,
}

/// Return the facility closest to `point`, or `None` when `facilities` is
/// empty.
///
/// # Examples
/// ```
/// use agrilogix_core::{Facility, FacilityKind, Location, nearest_facility};
///
/// assert!(nearest_facility(Location::new(0.0, 0.0), &[]).is_none());
///
/// let facilities = [
///     Facility::new("a", "A", FacilityKind::Storage, Location::new(0.0, 1.0), 10.0),
///     Facility::new("b", "B", FacilityKind::Storage, Location::new(0.0, -1.0), 10.0),
/// ];
/// // Equidistant candidates resolve to the first one listed.
/// let nearest = nearest_facility(Location::new(0.0, 0.0), &facilities).expect("non-empty");
/// assert_eq!(nearest.facility_id, "a");
/// ```
#[must_use]
pub fn nearest_facility(point: Location, facilities: &[Facility]) -> Option<NearestFacility> {
    let (index, distance_km) = nearest_index(point, facilities.iter().map(|f| f.location))?;
    let facility = facilities.get(index)?;
    Some(NearestFacility {
        facility_id: facility.id.clone(),
        facility_name: facility.name.clone(),
        distance_km,
    })
}

/// Return up to `limit` producers ordered by ascending distance from
/// `point`.
///
/// Fewer than `limit` candidates yields all of them; `limit == 0` yields an
/// empty vector. Equal distances keep input order.
///
/// # Examples
/// ```
/// use agrilogix_core::{Location, Producer, nearest_producers};
///
/// let producers = [
///     Producer::new("far", "Far", Location::new(0.0, 2.0), 10.0),
///     Producer::new("near", "Near", Location::new(0.0, 1.0), 10.0),
/// ];
/// let ranked = nearest_producers(Location::new(0.0, 0.0), &producers, 5);
/// let ids: Vec<_> = ranked.iter().map(|p| p.producer_id.as_str()).collect();
/// assert_eq!(ids, ["near", "far"]);
/// ```
#[must_use]
pub fn nearest_producers(point: Location, producers: &[Producer], limit: usize) -> Vec<NearestProducer> {
    if limit == 0 || producers.is_empty() {
        return Vec::new();
    }

    let mut ranked: Vec<(usize, f64)> = producers
        .iter()
        .enumerate()
        .map(|(index, producer)| (index, haversine_km(point, producer.location)))
        .collect();

    // Partition the closest `limit` entries in linear time before ordering
    // only those.
    if limit < ranked.len() {
        ranked.select_nth_unstable_by(limit, by_distance_then_index);
        ranked.truncate(limit);
    }
    ranked.sort_unstable_by(by_distance_then_index);

    ranked
        .into_iter()
        .filter_map(|(index, distance_km)| {
            producers.get(index).map(|producer| NearestProducer {
                producer_id: producer.id.clone(),
                producer_name: producer.name.clone(),
                distance_km,
            })
        })
        .collect()
}

/// Index and distance of the candidate nearest to `point`.
///
/// Ties and `NaN` distances follow [`closest`]. If every distance is `NaN`
/// the first candidate wins and its `NaN` is returned.
pub(crate) fn nearest_index<I>(point: Location, candidates: I) -> Option<(usize, f64)>
where
    I: IntoIterator<Item = Location>,
{
    let best = closest(
        candidates
            .into_iter()
            .enumerate()
            .map(|(index, location)| (index, haversine_km(point, location))),
    );
    if let Some((_, distance)) = best
        && distance.is_nan()
    {
        log::warn!("nearest-neighbour search produced a non-finite distance");
    }
    best
}

/// The `(index, distance)` pair with the smallest distance.
///
/// Only a strictly smaller distance displaces the current best, so the
/// earliest of equal candidates wins. `NaN` loses to any number.
pub(crate) fn closest<I>(candidates: I) -> Option<(usize, f64)>
where
    I: IntoIterator<Item = (usize, f64)>,
{
    candidates
        .into_iter()
        .fold(None, |best, candidate| match best {
            Some(current) if !is_strictly_closer(candidate.1, current.1) => Some(current),
            _ => Some(candidate),
        })
}

fn is_strictly_closer(distance: f64, current: f64) -> bool {
    distance < current || (current.is_nan() && !distance.is_nan())
}

// `total_cmp` orders NaN after every number.
fn by_distance_then_index(lhs: &(usize, f64), rhs: &(usize, f64)) -> Ordering {
    lhs.1.total_cmp(&rhs.1).then_with(|| lhs.0.cmp(&rhs.0))
}
