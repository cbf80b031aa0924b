//! Driving route estimate

use serde::{Deserialize, Serialize};

use crate::errors::DomainError;
use crate::value_objects::GeoLocation;

/// Distance, duration and geometry of a driving route
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RouteEstimate {
    distance_km: f64,
    duration_min: f64,
    polyline: Vec<GeoLocation>,
}

impl RouteEstimate {
    /// Build an estimate from a routing response in meters and seconds
    ///
    /// # Errors
    ///
    /// Returns `DomainError::InvalidMeasurement` for negative or non-finite
    /// values; a malformed route must not produce a partial estimate.
    pub fn from_meters_seconds(
        distance_meters: f64,
        duration_seconds: f64,
        polyline: Vec<GeoLocation>,
    ) -> Result<Self, DomainError> {
        if !distance_meters.is_finite() || distance_meters < 0.0 {
            return Err(DomainError::invalid_measurement(
                "distance_meters",
                distance_meters,
            ));
        }
        if !duration_seconds.is_finite() || duration_seconds < 0.0 {
            return Err(DomainError::invalid_measurement(
                "duration_seconds",
                duration_seconds,
            ));
        }

        Ok(Self {
            distance_km: distance_meters / 1000.0,
            duration_min: duration_seconds / 60.0,
            polyline,
        })
    }

    /// Route length in kilometres
    #[must_use]
    pub const fn distance_km(&self) -> f64 {
        self.distance_km
    }

    /// Driving time in minutes
    #[must_use]
    pub const fn duration_min(&self) -> f64 {
        self.duration_min
    }

    /// Route geometry
    #[must_use]
    pub fn polyline(&self) -> &[GeoLocation] {
        &self.polyline
    }

    /// Whole minutes to show as ETA, rounded up
    #[must_use]
    pub fn eta_minutes(&self) -> u32 {
        self.duration_min.ceil() as u32
    }
}
