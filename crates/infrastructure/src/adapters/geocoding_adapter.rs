//! Geocoding adapter - Implements GeocodingPort using integration_maps

use std::sync::Arc;

use application::error::ApplicationError;
use application::ports::{GeocodeCandidate, GeocodingPort};
use async_trait::async_trait;
use integration_maps::{
    NominatimClient, NominatimConfig, PhotonClient, PhotonConfig, Place, PlaceSearchClient,
};
use tracing::{debug, instrument};

use super::map_maps_error;

/// Adapter exposing a place search service as a geocoding provider
///
/// Photon backs typing suggestions, Nominatim backs the final address lookup.
pub struct PlaceSearchAdapter {
    provider: &'static str,
    client: Arc<dyn PlaceSearchClient>,
}

impl std::fmt::Debug for PlaceSearchAdapter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PlaceSearchAdapter")
            .field("provider", &self.provider)
            .finish_non_exhaustive()
    }
}

impl PlaceSearchAdapter {
    /// Wrap an existing client
    pub fn new(provider: &'static str, client: Arc<dyn PlaceSearchClient>) -> Self {
        Self { provider, client }
    }

    /// Suggestions provider backed by Photon
    ///
    /// # Errors
    ///
    /// Returns `Configuration` if the HTTP client cannot be built.
    pub fn photon(config: &PhotonConfig) -> Result<Self, ApplicationError> {
        let client = PhotonClient::new(config).map_err(|e| map_maps_error("photon", e))?;
        Ok(Self::new("photon", Arc::new(client)))
    }

    /// Address lookup provider backed by Nominatim
    ///
    /// # Errors
    ///
    /// Returns `Configuration` if the HTTP client cannot be built.
    pub fn nominatim(config: &NominatimConfig) -> Result<Self, ApplicationError> {
        let client = NominatimClient::new(config).map_err(|e| map_maps_error("nominatim", e))?;
        Ok(Self::new("nominatim", Arc::new(client)))
    }

    /// Provider name used in logs and error messages
    pub const fn provider(&self) -> &'static str {
        self.provider
    }
}

fn to_candidate(place: Place) -> GeocodeCandidate {
    let mut candidate = GeocodeCandidate::new(place.name, place.location);
    candidate.city = place.city;
    candidate.state = place.state;
    candidate.country = place.country;
    candidate.display_name = place.display_name;
    candidate
}

#[async_trait]
impl GeocodingPort for PlaceSearchAdapter {
    #[instrument(skip(self), fields(provider = self.provider))]
    async fn search(
        &self,
        query: &str,
        limit: u8,
    ) -> Result<Vec<GeocodeCandidate>, ApplicationError> {
        let places = self
            .client
            .search(query, limit)
            .await
            .map_err(|e| map_maps_error(self.provider, e))?;

        if places.is_empty() {
            return Err(ApplicationError::NoResults(format!(
                "{}: nothing found for '{query}'",
                self.provider
            )));
        }

        debug!(count = places.len(), "Place search returned candidates");
        Ok(places.into_iter().map(to_candidate).collect())
    }
}
