//! Ride request entity
//!
//! A booking captures the quoted pair, the chosen ride type and an optional
//! scheduled pickup time.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{RideType, TripQuote};
use crate::errors::DomainError;
use crate::value_objects::{ResolvedLocation, RideId, UserId};

/// A rider's request for a trip
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RideRequest {
    /// Unique identifier
    pub id: RideId,
    /// Rider who booked
    pub rider: UserId,
    /// Pickup point and address
    pub pickup: ResolvedLocation,
    /// Dropoff point and address
    pub dropoff: ResolvedLocation,
    /// Requested vehicle class
    pub ride_type: RideType,
    /// Distance in kilometres at booking time
    pub distance_km: f64,
    /// Estimated duration in minutes at booking time
    pub duration_min: f64,
    /// Quoted fare
    pub fare: f64,
    /// Requested pickup time (None = now)
    pub scheduled_for: Option<DateTime<Utc>>,
    /// When the request was created
    pub created_at: DateTime<Utc>,
}

impl RideRequest {
    /// Create a request from a current quote
    ///
    /// # Errors
    ///
    /// Returns `DomainError::ValidationError` if the endpoints do not belong
    /// to the quote, or `DomainError::InvalidDateTime` if `scheduled_for` is
    /// before `now`.
    pub fn new(
        rider: UserId,
        pickup: ResolvedLocation,
        dropoff: ResolvedLocation,
        quote: &TripQuote,
        ride_type: RideType,
        scheduled_for: Option<DateTime<Utc>>,
        now: DateTime<Utc>,
    ) -> Result<Self, DomainError> {
        if !quote.matches(pickup.location(), dropoff.location()) {
            return Err(DomainError::ValidationError(
                "quote was computed for a different pickup/dropoff pair".to_string(),
            ));
        }

        if let Some(at) = scheduled_for.filter(|at| *at < now) {
            return Err(DomainError::InvalidDateTime(format!(
                "scheduled pickup {} is in the past",
                at.to_rfc3339()
            )));
        }

        Ok(Self {
            id: RideId::new(),
            rider,
            pickup,
            dropoff,
            ride_type,
            distance_km: quote.route().distance_km(),
            duration_min: quote.route().duration_min(),
            fare: quote.fare().rounded_amount(),
            scheduled_for,
            created_at: now,
        })
    }

    /// Whether the ride is booked for later
    #[must_use]
    pub const fn is_scheduled(&self) -> bool {
        self.scheduled_for.is_some()
    }
}
