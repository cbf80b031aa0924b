//! Routing port
//!
//! Defines the interface for driving route lookups.

use async_trait::async_trait;
use domain::entities::RouteEstimate;
use domain::value_objects::GeoLocation;
#[cfg(test)]
use mockall::automock;
use serde::{Deserialize, Serialize};

use crate::error::ApplicationError;

/// A route as reported by the routing provider
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RouteCandidate {
    /// Length in meters
    pub distance_meters: f64,
    /// Travel time in seconds
    pub duration_seconds: f64,
    /// Path from origin to destination
    pub geometry: Vec<GeoLocation>,
}

impl RouteCandidate {
    /// Convert into a domain estimate (km / min)
    pub fn into_estimate(self) -> Result<RouteEstimate, ApplicationError> {
        RouteEstimate::from_meters_seconds(
            self.distance_meters,
            self.duration_seconds,
            self.geometry,
        )
        .map_err(|e| ApplicationError::MalformedResponse(e.to_string()))
    }
}

/// Port for routing providers
#[cfg_attr(test, automock)]
#[async_trait]
pub trait RoutingPort: Send + Sync {
    /// Driving routes from `origin` to `destination`, preferred route first
    async fn route(
        &self,
        origin: GeoLocation,
        destination: GeoLocation,
    ) -> Result<Vec<RouteCandidate>, ApplicationError>;
}
