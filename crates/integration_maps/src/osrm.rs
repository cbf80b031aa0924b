//! OSRM routing client
//!
//! Requests driving routes from an [OSRM](https://project-osrm.org) server
//! with full GeoJSON geometry.

use std::time::Duration;

use async_trait::async_trait;
use domain::value_objects::GeoLocation;
use reqwest::{Client, StatusCode, Url};
use serde::Deserialize;
use tracing::{debug, instrument, warn};

use crate::client::{RoutingClient, send_error};
use crate::config::OsrmConfig;
use crate::error::MapsError;
use crate::models::Route;

/// Thin HTTP client for the OSRM `route` service
#[derive(Debug)]
pub struct OsrmClient {
    client: Client,
    config: OsrmConfig,
}

impl OsrmClient {
    /// Create a new OSRM client
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be initialized.
    pub fn new(config: &OsrmConfig) -> Result<Self, MapsError> {
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

    /// Build the route URL for a coordinate pair
    fn route_url(&self, origin: GeoLocation, destination: GeoLocation) -> Result<Url, MapsError> {
        let base = format!(
            "{}/route/v1/{}/{};{}",
            self.config.base_url.trim_end_matches('/'),
            self.config.profile,
            origin.to_lng_lat_string(),
            destination.to_lng_lat_string()
        );
        let mut url = Url::parse(&base)
            .map_err(|e| MapsError::ConfigurationError(format!("failed to build OSRM URL: {e}")))?;
        url.query_pairs_mut()
            .append_pair("overview", "full")
            .append_pair("geometries", "geojson");
        Ok(url)
    }

    /// Parse an OSRM route response body
    fn parse_route_response(body: &str) -> Result<Vec<Route>, MapsError> {
        let raw: OsrmRouteResponse =
            serde_json::from_str(body).map_err(|e| MapsError::ParseError(e.to_string()))?;

        match raw.code.as_str() {
            "Ok" => {},
            "NoRoute" => return Err(MapsError::NoResults("route".to_string())),
            "InvalidQuery" | "InvalidValue" | "NoSegment" => {
                return Err(MapsError::InvalidLocation(
                    raw.message.unwrap_or_else(|| raw.code.clone()),
                ));
            },
            _ => {
                return Err(MapsError::RequestFailed(format!(
                    "OSRM returned {}: {}",
                    raw.code,
                    raw.message.unwrap_or_default()
                )));
            },
        }

        raw.routes
            .unwrap_or_default()
            .into_iter()
            .map(Self::convert_route)
            .collect()
    }

    fn convert_route(raw: OsrmRoute) -> Result<Route, MapsError> {
        let geometry = raw
            .geometry
            .map(|g| g.coordinates)
            .unwrap_or_default()
            .into_iter()
            .map(|pair| {
                GeoLocation::from_lng_lat(pair).map_err(|e| MapsError::ParseError(e.to_string()))
            })
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Route {
            distance_m: raw.distance,
            duration_s: raw.duration,
            geometry,
        })
    }
}

#[async_trait]
impl RoutingClient for OsrmClient {
    #[instrument(skip(self), fields(from = %origin, to = %destination))]
    async fn route(
        &self,
        origin: GeoLocation,
        destination: GeoLocation,
    ) -> Result<Vec<Route>, MapsError> {
        let url = self.route_url(origin, destination)?;

        debug!(%url, "Requesting route");

        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| send_error(&e, self.config.timeout_secs))?;

        let status = response.status();
        if status == StatusCode::TOO_MANY_REQUESTS {
            return Err(MapsError::RateLimitExceeded {
                retry_after_secs: response
                    .headers()
                    .get("retry-after")
                    .and_then(|v| v.to_str().ok())
                    .and_then(|v| v.parse().ok()),
            });
        }

        let body = response
            .text()
            .await
            .map_err(|e| MapsError::ParseError(e.to_string()))?;

        // OSRM reports API errors as 400 with a JSON `code`; prefer that over the status.
        match Self::parse_route_response(&body) {
            Ok(routes) => {
                if routes.is_empty() {
                    warn!("OSRM returned no routes");
                }
                debug!(count = routes.len(), "Routes found");
                Ok(routes)
            },
            Err(MapsError::ParseError(_)) if !status.is_success() => {
                Err(MapsError::RequestFailed(format!("HTTP {status}")))
            },
            Err(e) => Err(e),
        }
    }
}

/// Raw OSRM route response
#[derive(Debug, Deserialize)]
struct OsrmRouteResponse {
    code: String,
    message: Option<String>,
    routes: Option<Vec<OsrmRoute>>,
}

#[derive(Debug, Deserialize)]
struct OsrmRoute {
    distance: f64,
    duration: f64,
    geometry: Option<OsrmGeometry>,
}

#[derive(Debug, Deserialize)]
struct OsrmGeometry {
    coordinates: Vec<[f64; 2]>,
}
