//! Fare calculation
//!
//! A fare is a linear function of route distance and duration:
//! `base_fare + distance_km * per_km_rate + duration_min * per_min_rate`.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::entities::RouteEstimate;
use crate::errors::DomainError;

/// Tariff used to price a route
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FareSchedule {
    /// Flat amount charged for every trip
    #[serde(default = "default_base_fare")]
    pub base_fare: f64,

    /// Amount per driven kilometre
    #[serde(default = "default_per_km_rate")]
    pub per_km_rate: f64,

    /// Amount per minute of driving time
    #[serde(default = "default_per_min_rate")]
    pub per_min_rate: f64,
}

const fn default_base_fare() -> f64 {
    2.50
}

const fn default_per_km_rate() -> f64 {
    1.50
}

const fn default_per_min_rate() -> f64 {
    0.30
}

impl Default for FareSchedule {
    fn default() -> Self {
        Self {
            base_fare: default_base_fare(),
            per_km_rate: default_per_km_rate(),
            per_min_rate: default_per_min_rate(),
        }
    }
}

impl FareSchedule {
    /// Check that every rate is finite and non-negative
    pub fn validate(&self) -> Result<(), DomainError> {
        for (name, value) in [
            ("base_fare", self.base_fare),
            ("per_km_rate", self.per_km_rate),
            ("per_min_rate", self.per_min_rate),
        ] {
            if !value.is_finite() || value < 0.0 {
                return Err(DomainError::ValidationError(format!(
                    "{name} must be finite and non-negative, got {value}"
                )));
            }
        }
        Ok(())
    }

    /// Price a trip of the given distance and duration
    ///
    /// Defined for non-negative finite inputs; callers only invoke it with
    /// a present route estimate.
    #[must_use]
    pub fn fare(&self, distance_km: f64, duration_min: f64) -> FareQuote {
        let amount = duration_min.mul_add(
            self.per_min_rate,
            distance_km.mul_add(self.per_km_rate, self.base_fare),
        );
        FareQuote { amount }
    }

    /// Price a route estimate
    #[must_use]
    pub fn quote(&self, route: &RouteEstimate) -> FareQuote {
        self.fare(route.distance_km(), route.duration_min())
    }
}

/// Price derived from a route estimate, in currency units
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FareQuote {
    amount: f64,
}

impl FareQuote {
    /// Unrounded amount
    #[must_use]
    pub const fn amount(&self) -> f64 {
        self.amount
    }

    /// Amount rounded to whole cents
    #[must_use]
    pub fn rounded_amount(&self) -> f64 {
        (self.amount * 100.0).round() / 100.0
    }
}

impl fmt::Display for FareQuote {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "${:.2}", self.amount)
    }
}
