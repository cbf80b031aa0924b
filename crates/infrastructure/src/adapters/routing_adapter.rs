//! Routing adapter - Implements RoutingPort using the OSRM client

use std::sync::Arc;

use application::error::ApplicationError;
use application::ports::{RouteCandidate, RoutingPort};
use async_trait::async_trait;
use domain::value_objects::GeoLocation;
use integration_maps::{OsrmClient, OsrmConfig, Route, RoutingClient};
use tracing::{debug, instrument};

use super::map_maps_error;

/// Adapter exposing a driving route service
pub struct RouteAdapter {
    client: Arc<dyn RoutingClient>,
}

impl std::fmt::Debug for RouteAdapter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RouteAdapter").finish_non_exhaustive()
    }
}

impl RouteAdapter {
    /// Wrap an existing client
    pub fn new(client: Arc<dyn RoutingClient>) -> Self {
        Self { client }
    }

    /// Route provider backed by OSRM
    ///
    /// # Errors
    ///
    /// Returns `Configuration` if the HTTP client cannot be built.
    pub fn osrm(config: &OsrmConfig) -> Result<Self, ApplicationError> {
        let client = OsrmClient::new(config).map_err(|e| map_maps_error("osrm", e))?;
        Ok(Self::new(Arc::new(client)))
    }
}

fn to_candidate(route: Route) -> RouteCandidate {
    RouteCandidate {
        distance_meters: route.distance_m,
        duration_seconds: route.duration_s,
        geometry: route.geometry,
    }
}

#[async_trait]
impl RoutingPort for RouteAdapter {
    #[instrument(skip(self))]
    async fn route(
        &self,
        origin: GeoLocation,
        destination: GeoLocation,
    ) -> Result<Vec<RouteCandidate>, ApplicationError> {
        let routes = self
            .client
            .route(origin, destination)
            .await
            .map_err(|e| map_maps_error("osrm", e))?;

        if routes.is_empty() {
            return Err(ApplicationError::NoResults(
                "osrm: no route between the given points".to_string(),
            ));
        }

        debug!(count = routes.len(), "Route service returned candidates");
        Ok(routes.into_iter().map(to_candidate).collect())
    }
}
