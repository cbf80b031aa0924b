//! Booking service
//!
//! Turns the current trip quote into a stored ride request.

use std::fmt;
use std::sync::Arc;

use chrono::{DateTime, Utc};
use domain::entities::{RideRequest, RideType};
use tracing::{info, instrument};

use super::trip_planner::TripSnapshot;
use crate::error::ApplicationError;
use crate::ports::{RideStorePort, SessionPort};

/// Books rides for the signed-in user
pub struct BookingService {
    session: Arc<dyn SessionPort>,
    rides: Arc<dyn RideStorePort>,
}

impl fmt::Debug for BookingService {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BookingService").finish_non_exhaustive()
    }
}

impl BookingService {
    /// Create a booking service
    #[must_use]
    pub fn new(session: Arc<dyn SessionPort>, rides: Arc<dyn RideStorePort>) -> Self {
        Self { session, rides }
    }

    /// Book `ride_type` for the trip shown in `trip`
    ///
    /// # Errors
    ///
    /// - `NotAuthorized` without a signed-in user
    /// - `NoQuote` unless both endpoints are resolved and the route estimate
    ///   belongs to them
    /// - `Domain` if `scheduled_for` is in the past
    #[instrument(skip(self, trip))]
    pub async fn book(
        &self,
        trip: &TripSnapshot,
        ride_type: RideType,
        scheduled_for: Option<DateTime<Utc>>,
    ) -> Result<RideRequest, ApplicationError> {
        let rider = self
            .session
            .current_user()
            .await?
            .ok_or_else(|| ApplicationError::NotAuthorized("sign in to book a ride".into()))?;

        let (Some(pickup), Some(dropoff)) =
            (trip.pickup.field.resolved(), trip.dropoff.field.resolved())
        else {
            return Err(ApplicationError::NoQuote(
                "pickup and dropoff must both be resolved".into(),
            ));
        };
        let quote = trip
            .route
            .quote
            .as_ref()
            .filter(|q| q.matches(pickup.location(), dropoff.location()))
            .ok_or_else(|| {
                ApplicationError::NoQuote("no route estimate for the current endpoints".into())
            })?;

        let ride = RideRequest::new(
            rider,
            pickup.clone(),
            dropoff.clone(),
            quote,
            ride_type,
            scheduled_for,
            Utc::now(),
        )?;
        self.rides.insert_ride(&ride).await?;

        info!(
            ride_id = %ride.id,
            fare = ride.fare,
            scheduled = ride.is_scheduled(),
            "Ride booked"
        );
        Ok(ride)
    }

    /// Rides booked by the signed-in user, newest first
    pub async fn history(&self) -> Result<Vec<RideRequest>, ApplicationError> {
        let rider = self
            .session
            .current_user()
            .await?
            .ok_or_else(|| ApplicationError::NotAuthorized("sign in to see your rides".into()))?;
        self.rides.rides_for(rider).await
    }
}
