//! Ride store port
//!
//! Persistence for booked rides.

use async_trait::async_trait;
use domain::entities::RideRequest;
use domain::value_objects::UserId;
#[cfg(test)]
use mockall::automock;

use crate::error::ApplicationError;

/// Port for ride persistence
#[cfg_attr(test, automock)]
#[async_trait]
pub trait RideStorePort: Send + Sync {
    /// Store a new ride request
    async fn insert_ride(&self, ride: &RideRequest) -> Result<(), ApplicationError>;

    /// Rides booked by `rider`, newest first
    async fn rides_for(&self, rider: UserId) -> Result<Vec<RideRequest>, ApplicationError>;
}
