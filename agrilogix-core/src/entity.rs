//! Producers and facilities supplied by callers as per-request snapshots.
//!
//! The algorithms trust these records as given. [`Facility::validate`] and
//! [`Producer::validate`] exist for boundary code (the CLI, request
//! handlers) that wants to reject bad data before it reaches them.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::{Location, LocationError};

/// Broad role of a facility in the supply chain.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum FacilityKind {
    /// Warehouses, cold stores and aggregation godowns.
    #[default]
    Storage,
    /// Mills and other processing units.
    Processing,
}

/// A storage or processing site that producers ship to.
///
/// `capacity` and `utilization` share a unit (quintals, by convention).
///
/// # Examples
/// ```
/// use agrilogix_core::{Facility, FacilityKind, Location};
///
/// let store = Facility::new("cs-1", "Cold store", FacilityKind::Storage, Location::new(20.3, 85.8), 500.0)
///     .with_utilization(120.0);
/// assert_eq!(store.remaining_capacity(), 380.0);
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Facility {
    /// Caller-assigned identifier.
    pub id: String,
    /// Display name.
    pub name: String,
    /// Role of the site.
    #[cfg_attr(feature = "serde", serde(default))]
    pub kind: FacilityKind,
    /// Position of the site.
    pub location: Location,
    /// Total capacity.
    pub capacity: f64,
    /// Capacity already in use.
    #[cfg_attr(feature = "serde", serde(default))]
    pub utilization: f64,
}

/// A farm or cooperative with produce to ship.
///
/// # Examples
/// ```
/// use agrilogix_core::{Location, Producer};
///
/// let farm = Producer::new("f-1", "Sahu farm", Location::new(20.2, 85.7), 45.0);
/// assert_eq!(farm.quantity, 45.0);
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Producer {
    /// Caller-assigned identifier.
    pub id: String,
    /// Display name.
    pub name: String,
    /// Position of the farm gate.
    pub location: Location,
    /// Quantity available to ship (quintals, by convention).
    pub quantity: f64,
}

/// Errors raised when validating snapshot records.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SnapshotError {
    /// A record carried an invalid location.
    #[error("{record} {id} has an invalid location: {source}")]
    InvalidLocation {
        /// Kind of record, e.g. `"facility"`.
        record: &'static str,
        /// Identifier of the record.
        id: String,
        /// Underlying coordinate failure.
        #[source]
        source: LocationError,
    },
    /// Facility capacity was negative or not finite.
    #[error("facility {id} has invalid capacity {capacity}")]
    InvalidCapacity {
        /// Identifier of the facility.
        id: String,
        /// Capacity as supplied.
        capacity: f64,
    },
    /// Facility utilisation was negative, not finite, or above capacity.
    #[error("facility {id} has utilization {utilization} outside [0, {capacity}]")]
    InvalidUtilization {
        /// Identifier of the facility.
        id: String,
        /// Utilisation as supplied.
        utilization: f64,
        /// Capacity as supplied.
        capacity: f64,
    },
    /// Producer quantity was negative or not finite.
    #[error("producer {id} has invalid quantity {quantity}")]
    InvalidQuantity {
        /// Identifier of the producer.
        id: String,
        /// Quantity as supplied.
        quantity: f64,
    },
}

impl Facility {
    /// Construct an unused facility.
    #[must_use]
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        kind: FacilityKind,
        location: Location,
        capacity: f64,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            kind,
            location,
            capacity,
            utilization: 0.0,
        }
    }

    /// Return the facility with `utilization` already in use.
    #[must_use]
    pub fn with_utilization(mut self, utilization: f64) -> Self {
        self.utilization = utilization;
        self
    }

    /// Capacity not yet in use. Negative when the facility is over-full.
    #[expect(
        clippy::float_arithmetic,
        reason = "capacity bookkeeping is fractional"
    )]
    #[must_use]
    pub fn remaining_capacity(&self) -> f64 {
        self.capacity - self.utilization
    }

    /// Check the location and the capacity bookkeeping.
    ///
    /// # Errors
    /// Returns [`SnapshotError`] describing the first failed check.
    pub fn validate(&self) -> Result<(), SnapshotError> {
        self.location
            .validate()
            .map_err(|source| SnapshotError::InvalidLocation {
                record: "facility",
                id: self.id.clone(),
                source,
            })?;
        if !self.capacity.is_finite() || self.capacity < 0.0 {
            return Err(SnapshotError::InvalidCapacity {
                id: self.id.clone(),
                capacity: self.capacity,
            });
        }
        if !(0.0..=self.capacity).contains(&self.utilization) {
            return Err(SnapshotError::InvalidUtilization {
                id: self.id.clone(),
                utilization: self.utilization,
                capacity: self.capacity,
            });
        }
        Ok(())
    }
}

impl Producer {
    /// Construct a producer.
    #[must_use]
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        location: Location,
        quantity: f64,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            location,
            quantity,
        }
    }

    /// Check the location and the quantity.
    ///
    /// # Errors
    /// Returns [`SnapshotError`] describing the first failed check.
    pub fn validate(&self) -> Result<(), SnapshotError> {
        self.location
            .validate()
            .map_err(|source| SnapshotError::InvalidLocation {
                record: "producer",
                id: self.id.clone(),
                source,
            })?;
        if !self.quantity.is_finite() || self.quantity < 0.0 {
            return Err(SnapshotError::InvalidQuantity {
                id: self.id.clone(),
                quantity: self.quantity,
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::{fixture, rstest};

    #[fixture]
    fn cold_store() -> Facility {
        Facility::new(
            "cs-1",
            "Cold store",
            FacilityKind::Storage,
            Location::new(20.30, 85.82),
            500.0,
        )
    }

    #[rstest]
    fn valid_facility_passes(cold_store: Facility) {
        assert_eq!(cold_store.with_utilization(500.0).validate(), Ok(()));
    }

    #[rstest]
    #[case(-1.0)]
    #[case(500.5)]
    #[case(f64::NAN)]
    fn utilization_outside_capacity_is_rejected(cold_store: Facility, #[case] utilization: f64) {
        let err = cold_store
            .with_utilization(utilization)
            .validate()
            .expect_err("utilization out of range");
        assert!(matches!(err, SnapshotError::InvalidUtilization { .. }));
    }

    #[rstest]
    fn negative_capacity_is_rejected(mut cold_store: Facility) {
        cold_store.capacity = -5.0;
        let err = cold_store.validate().expect_err("negative capacity");
        assert!(matches!(err, SnapshotError::InvalidCapacity { .. }));
    }

    #[rstest]
    fn invalid_location_names_the_record(mut cold_store: Facility) {
        cold_store.location = Location::new(95.0, 85.82);
        let err = cold_store.validate().expect_err("latitude out of range");
        assert_eq!(
            err.to_string(),
            "facility cs-1 has an invalid location: latitude 95 is outside [-90, 90]"
        );
    }

    #[rstest]
    #[case(0.0, true)]
    #[case(45.0, true)]
    #[case(-0.5, false)]
    #[case(f64::INFINITY, false)]
    fn producer_quantity_must_be_finite_and_non_negative(
        #[case] quantity: f64,
        #[case] valid: bool,
    ) {
        let producer = Producer::new("f-1", "Farm", Location::new(20.2, 85.7), quantity);
        assert_eq!(producer.validate().is_ok(), valid);
    }

    #[rstest]
    fn remaining_capacity_subtracts_utilization(cold_store: Facility) {
        assert_eq!(cold_store.with_utilization(125.0).remaining_capacity(), 375.0);
    }
}
