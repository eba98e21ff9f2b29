//! Vehicle tiers and shipment cost estimates.
//!
//! A shipment's quantity selects one of three vehicle tiers. The tier's
//! per-kilometre rate is charged on the round trip (the vehicle returns
//! empty), and the total is split into base, fuel and driver components for
//! presentation.
//!
//! Degenerate inputs are not errors: a non-positive distance or quantity
//! costs nothing. Non-finite distances propagate into non-finite costs.

use std::fmt;
use std::str::FromStr;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Cargo vehicle classes, ordered by capacity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum VehicleTier {
    /// Three-wheeler for small loads.
    Tempo,
    /// Tractor with trailer for medium loads.
    Tractor,
    /// Goods truck for large loads.
    Truck,
}

impl VehicleTier {
    /// Every tier, smallest first.
    pub const ALL: [Self; 3] = [Self::Tempo, Self::Tractor, Self::Truck];

    /// Return the tier as a lowercase `&str`.
    ///
    /// # Examples
    /// ```
    /// use agrilogix_core::VehicleTier;
    ///
    /// assert_eq!(VehicleTier::Tractor.as_str(), "tractor");
    /// ```
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Tempo => "tempo",
            Self::Tractor => "tractor",
            Self::Truck => "truck",
        }
    }
}

impl fmt::Display for VehicleTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for VehicleTier {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "tempo" => Ok(Self::Tempo),
            "tractor" => Ok(Self::Tractor),
            "truck" => Ok(Self::Truck),
            _ => Err(format!("unknown vehicle tier '{s}'")),
        }
    }
}

/// Tunable tier thresholds, rates and cost split.
///
/// Quantities up to `tempo_max_quantity` ride a tempo, up to
/// `tractor_max_quantity` a tractor, and anything larger a truck.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct TariffConfig {
    /// Largest quantity carried by a tempo.
    pub tempo_max_quantity: f64,
    /// Largest quantity carried by a tractor.
    pub tractor_max_quantity: f64,
    /// Rate per kilometre for a tempo.
    pub tempo_rate_per_km: f64,
    /// Rate per kilometre for a tractor.
    pub tractor_rate_per_km: f64,
    /// Rate per kilometre for a truck.
    pub truck_rate_per_km: f64,
    /// Share of the total attributed to the base charge.
    pub base_share: f64,
    /// Share of the total attributed to fuel. The driver takes the rest.
    pub fuel_share: f64,
}

impl Default for TariffConfig {
    fn default() -> Self {
        Self {
            tempo_max_quantity: 20.0,
            tractor_max_quantity: 50.0,
            tempo_rate_per_km: 6.0,
            tractor_rate_per_km: 8.0,
            truck_rate_per_km: 15.0,
            base_share: 0.3,
            fuel_share: 0.5,
        }
    }
}

/// Errors returned by [`CostModel::new`].
#[derive(Debug, Clone, Copy, PartialEq, Error)]
pub enum CostModelError {
    /// Tier thresholds were not finite, negative, or not increasing.
    #[error("tier thresholds must satisfy 0 <= tempo ({tempo}) < tractor ({tractor})")]
    InvalidThresholds {
        /// Tempo ceiling as supplied.
        tempo: f64,
        /// Tractor ceiling as supplied.
        tractor: f64,
    },
    /// A rate was not finite and positive.
    #[error("rate for {tier} must be finite and positive, got {rate}")]
    InvalidRate {
        /// Tier whose rate was rejected.
        tier: VehicleTier,
        /// Rate as supplied.
        rate: f64,
    },
    /// Rates did not strictly increase with tier size.
    #[error("rate for {larger} ({larger_rate}) must exceed rate for {smaller} ({smaller_rate})")]
    NonIncreasingRates {
        /// Smaller tier.
        smaller: VehicleTier,
        /// Rate of the smaller tier.
        smaller_rate: f64,
        /// Larger tier.
        larger: VehicleTier,
        /// Rate of the larger tier.
        larger_rate: f64,
    },
    /// Cost shares were outside `[0, 1]` or summed above one.
    #[error("base ({base}) and fuel ({fuel}) shares must lie in [0, 1] and sum to at most 1")]
    InvalidShares {
        /// Base share as supplied.
        base: f64,
        /// Fuel share as supplied.
        fuel: f64,
    },
}

/// Cost breakdown for one shipment.
///
/// `base_cost + fuel_cost + driver_cost` equals `total_cost`.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct LogisticsCost {
    /// Vehicle chosen for the load.
    pub vehicle_tier: VehicleTier,
    /// One-way distance as supplied.
    pub distance_km: f64,
    /// Distance charged, including the empty return leg.
    pub round_trip_km: f64,
    /// Rate of the chosen tier.
    pub cost_per_km: f64,
    /// Base component of the total.
    pub base_cost: f64,
    /// Fuel component of the total.
    pub fuel_cost: f64,
    /// Driver component of the total.
    pub driver_cost: f64,
    /// Round-trip distance times rate.
    pub total_cost: f64,
}

/// Transport cost plus the value of the goods being moved.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct ShipmentQuote {
    /// Quantity shipped.
    pub quantity: f64,
    /// Price per unit of produce.
    pub price_per_unit: f64,
    /// `quantity * price_per_unit`.
    pub product_cost: f64,
    /// Transport breakdown.
    pub transport: LogisticsCost,
    /// `product_cost + transport.total_cost`.
    pub grand_total: f64,
}

/// Selects vehicle tiers and prices shipments under a [`TariffConfig`].
///
/// # Examples
/// ```
/// use agrilogix_core::{CostModel, VehicleTier};
///
/// let model = CostModel::default();
/// let cost = model.estimate(20.0, 75.0);
/// assert_eq!(cost.vehicle_tier, VehicleTier::Truck);
/// assert_eq!(cost.round_trip_km, 40.0);
/// assert_eq!(cost.total_cost, 40.0 * model.rate_per_km(VehicleTier::Truck));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct CostModel {
    tariff: TariffConfig,
}

impl CostModel {
    /// Validate `tariff` and construct a model.
    ///
    /// # Errors
    /// Returns [`CostModelError`] when thresholds are not increasing, a rate
    /// is not positive, rates do not increase with tier size, or the cost
    /// shares are out of range.
    pub fn new(tariff: TariffConfig) -> Result<Self, CostModelError> {
        validate_tariff(&tariff)?;
        Ok(Self { tariff })
    }

    /// The tariff in force.
    #[must_use]
    pub const fn tariff(&self) -> &TariffConfig {
        &self.tariff
    }

    /// Pick the vehicle tier for `quantity`.
    ///
    /// Boundaries are inclusive on the smaller tier. Non-positive and `NaN`
    /// quantities select [`VehicleTier::Tempo`].
    #[must_use]
    pub fn select_tier(&self, quantity: f64) -> VehicleTier {
        if quantity > self.tariff.tractor_max_quantity {
            VehicleTier::Truck
        } else if quantity > self.tariff.tempo_max_quantity {
            VehicleTier::Tractor
        } else {
            VehicleTier::Tempo
        }
    }

    /// Per-kilometre rate for `tier`.
    #[must_use]
    pub const fn rate_per_km(&self, tier: VehicleTier) -> f64 {
        match tier {
            VehicleTier::Tempo => self.tariff.tempo_rate_per_km,
            VehicleTier::Tractor => self.tariff.tractor_rate_per_km,
            VehicleTier::Truck => self.tariff.truck_rate_per_km,
        }
    }

    /// Cost of carrying `quantity` over a one-way `distance_km`.
    ///
    /// Zero when either input is non-positive.
    #[must_use]
    pub fn estimate(&self, distance_km: f64, quantity: f64) -> LogisticsCost {
        let tier = self.select_tier(quantity);
        if quantity <= 0.0 {
            return self.zero_cost(tier, distance_km);
        }
        self.estimate_for_tier(tier, distance_km)
    }

    /// Cost of running `tier` over a one-way `distance_km`.
    ///
    /// Zero when the distance is non-positive.
    #[expect(
        clippy::float_arithmetic,
        reason = "cost is distance times a fractional rate"
    )]
    #[must_use]
    pub fn estimate_for_tier(&self, tier: VehicleTier, distance_km: f64) -> LogisticsCost {
        if distance_km <= 0.0 {
            return self.zero_cost(tier, distance_km);
        }
        let cost_per_km = self.rate_per_km(tier);
        let round_trip_km = distance_km * 2.0;
        let total_cost = round_trip_km * cost_per_km;
        let base_cost = total_cost * self.tariff.base_share;
        let fuel_cost = total_cost * self.tariff.fuel_share;
        let driver_cost = total_cost - base_cost - fuel_cost;
        LogisticsCost {
            vehicle_tier: tier,
            distance_km,
            round_trip_km,
            cost_per_km,
            base_cost,
            fuel_cost,
            driver_cost,
            total_cost,
        }
    }

    /// Price a purchase: goods at `price_per_unit` plus transport.
    ///
    /// A non-positive price contributes no product cost.
    ///
    /// # Examples
    /// ```
    /// use agrilogix_core::CostModel;
    ///
    /// let quote = CostModel::default().quote(10.0, 45.0, 2_000.0);
    /// assert_eq!(quote.product_cost, 90_000.0);
    /// assert_eq!(quote.transport.total_cost, 160.0);
    /// assert_eq!(quote.grand_total, 90_160.0);
    /// ```
    #[expect(
        clippy::float_arithmetic,
        reason = "prices and quantities are fractional"
    )]
    #[must_use]
    pub fn quote(&self, distance_km: f64, quantity: f64, price_per_unit: f64) -> ShipmentQuote {
        let transport = self.estimate(distance_km, quantity);
        let product_cost = if quantity > 0.0 && price_per_unit > 0.0 {
            quantity * price_per_unit
        } else {
            0.0
        };
        ShipmentQuote {
            quantity,
            price_per_unit,
            product_cost,
            transport,
            grand_total: product_cost + transport.total_cost,
        }
    }

    #[expect(
        clippy::float_arithmetic,
        reason = "round trip doubles the supplied distance"
    )]
    fn zero_cost(&self, tier: VehicleTier, distance_km: f64) -> LogisticsCost {
        LogisticsCost {
            vehicle_tier: tier,
            distance_km,
            round_trip_km: (distance_km * 2.0).max(0.0),
            cost_per_km: self.rate_per_km(tier),
            base_cost: 0.0,
            fuel_cost: 0.0,
            driver_cost: 0.0,
            total_cost: 0.0,
        }
    }
}

#[expect(
    clippy::float_arithmetic,
    reason = "share bounds are checked on fractional values"
)]
fn validate_tariff(tariff: &TariffConfig) -> Result<(), CostModelError> {
    let tempo = tariff.tempo_max_quantity;
    let tractor = tariff.tractor_max_quantity;
    if !tempo.is_finite() || !tractor.is_finite() || tempo < 0.0 || tempo >= tractor {
        return Err(CostModelError::InvalidThresholds { tempo, tractor });
    }

    let rates = [
        (VehicleTier::Tempo, tariff.tempo_rate_per_km),
        (VehicleTier::Tractor, tariff.tractor_rate_per_km),
        (VehicleTier::Truck, tariff.truck_rate_per_km),
    ];
    for (tier, rate) in rates {
        if !rate.is_finite() || rate <= 0.0 {
            return Err(CostModelError::InvalidRate { tier, rate });
        }
    }
    for pair in rates.windows(2) {
        if let [(smaller, smaller_rate), (larger, larger_rate)] = *pair
            && larger_rate <= smaller_rate
        {
            return Err(CostModelError::NonIncreasingRates {
                smaller,
                smaller_rate,
                larger,
                larger_rate,
            });
        }
    }

    let base = tariff.base_share;
    let fuel = tariff.fuel_share;
    let unit = 0.0..=1.0;
    if !unit.contains(&base) || !unit.contains(&fuel) || base + fuel > 1.0 {
        return Err(CostModelError::InvalidShares { base, fuel });
    }
    Ok(())
}
