//! Photon autocomplete client
//!
//! Queries the [Photon](https://photon.komoot.io) search-as-you-type API,
//! which answers with a GeoJSON feature collection.

use std::time::Duration;

use async_trait::async_trait;
use domain::value_objects::GeoLocation;
use reqwest::Client;
use serde::Deserialize;
use tracing::{debug, instrument};

use crate::client::{PlaceSearchClient, check_status, normalize_query, send_error};
use crate::config::PhotonConfig;
use crate::error::MapsError;
use crate::models::Place;

/// Photon-based place search client
#[derive(Debug)]
pub struct PhotonClient {
    client: Client,
    config: PhotonConfig,
}

impl PhotonClient {
    /// Create a new Photon client
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be initialized.
    pub fn new(config: &PhotonConfig) -> Result<Self, MapsError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .user_agent("RideQuote/0.2")
            .build()
            .map_err(|e| MapsError::ConnectionFailed(e.to_string()))?;

        Ok(Self {
            client,
            config: config.clone(),
        })
    }

    /// Parse a Photon feature collection into places
    fn parse_features(body: &str) -> Result<Vec<Place>, MapsError> {
        let raw: RawFeatureCollection =
            serde_json::from_str(body).map_err(|e| MapsError::ParseError(e.to_string()))?;

        raw.features.into_iter().map(Self::convert_feature).collect()
    }

    fn convert_feature(raw: RawFeature) -> Result<Place, MapsError> {
        let location = GeoLocation::from_lng_lat(raw.geometry.coordinates)
            .map_err(|e| MapsError::ParseError(e.to_string()))?;
        let props = raw.properties;

        Ok(Place {
            name: props.name.or(props.street).unwrap_or_default(),
            city: props.city,
            state: props.state,
            country: props.country,
            display_name: None,
            location,
            osm_id: props.osm_id,
        })
    }
}

#[async_trait]
impl PlaceSearchClient for PhotonClient {
    #[instrument(skip(self))]
    async fn search(&self, query: &str, limit: u8) -> Result<Vec<Place>, MapsError> {
        let query = normalize_query(query)?;

        let url = format!("{}/api/", self.config.base_url.trim_end_matches('/'));
        let mut params = vec![("q", query.to_string()), ("limit", limit.to_string())];
        if !self.config.language.is_empty() {
            params.push(("lang", self.config.language.clone()));
        }

        debug!(%query, limit, "Searching Photon");

        let response = self
            .client
            .get(&url)
            .query(&params)
            .send()
            .await
            .map_err(|e| send_error(&e, self.config.timeout_secs))?;

        check_status(&response)?;

        let body = response
            .text()
            .await
            .map_err(|e| MapsError::ParseError(e.to_string()))?;

        let places = Self::parse_features(&body)?;
        debug!(count = places.len(), "Photon results");
        Ok(places)
    }
}

/// Raw Photon API response
#[derive(Debug, Deserialize)]
struct RawFeatureCollection {
    #[serde(default)]
    features: Vec<RawFeature>,
}

#[derive(Debug, Deserialize)]
struct RawFeature {
    geometry: RawPoint,
    properties: RawProperties,
}

#[derive(Debug, Deserialize)]
struct RawPoint {
    coordinates: [f64; 2],
}

#[derive(Debug, Deserialize)]
struct RawProperties {
    name: Option<String>,
    street: Option<String>,
    city: Option<String>,
    state: Option<String>,
    country: Option<String>,
    osm_id: Option<u64>,
}
