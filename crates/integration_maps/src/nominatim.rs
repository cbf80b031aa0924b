//! Nominatim geocoding client
//!
//! Converts free-form address strings to places using the
//! [Nominatim](https://nominatim.openstreetmap.org) API (OpenStreetMap).
//!
//! Requests are spaced according to the Nominatim usage policy and results
//! are cached to avoid repeating identical lookups.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use domain::value_objects::GeoLocation;
use moka::future::Cache;
use reqwest::Client;
use serde::Deserialize;
use tokio::sync::Mutex;
use tokio::time::Instant;
use tracing::{debug, instrument};

use crate::client::{PlaceSearchClient, check_status, normalize_query, send_error};
use crate::config::NominatimConfig;
use crate::error::MapsError;
use crate::models::Place;

/// Nominatim-based place search client with request pacing and caching
#[derive(Debug)]
pub struct NominatimClient {
    client: Client,
    config: NominatimConfig,
    cache: Option<Cache<(String, u8), Vec<Place>>>,
    last_request: Arc<Mutex<Option<Instant>>>,
}

impl NominatimClient {
    /// Create a new Nominatim client
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be initialized.
    pub fn new(config: &NominatimConfig) -> Result<Self, MapsError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .user_agent("RideQuote/0.2 (https://github.com/ridequote/ridequote)")
            .build()
            .map_err(|e| MapsError::ConnectionFailed(e.to_string()))?;

        let cache = config.caching_enabled().then(|| {
            Cache::builder()
                .max_capacity(1000)
                .time_to_live(Duration::from_secs(config.cache_ttl_minutes * 60))
                .build()
        });

        Ok(Self {
            client,
            config: config.clone(),
            cache,
            last_request: Arc::new(Mutex::new(None)),
        })
    }

    /// Enforce the minimum spacing between requests
    async fn pace(&self) {
        let interval = Duration::from_millis(self.config.min_request_interval_ms);
        let mut last = self.last_request.lock().await;
        if let Some(previous) = *last {
            let elapsed = previous.elapsed();
            if elapsed < interval {
                let wait = interval.saturating_sub(elapsed);
                debug!(?wait, "Pacing geocoding request");
                tokio::time::sleep(wait).await;
            }
        }
        *last = Some(Instant::now());
    }

    /// Parse a Nominatim `jsonv2` search response
    fn parse_results(body: &str) -> Result<Vec<Place>, MapsError> {
        let raw: Vec<NominatimResult> =
            serde_json::from_str(body).map_err(|e| MapsError::ParseError(e.to_string()))?;

        raw.into_iter().map(Self::convert_result).collect()
    }

    fn convert_result(raw: NominatimResult) -> Result<Place, MapsError> {
        let lat: f64 = raw
            .lat
            .parse()
            .map_err(|_| MapsError::ParseError(format!("Invalid latitude: {}", raw.lat)))?;
        let lon: f64 = raw
            .lon
            .parse()
            .map_err(|_| MapsError::ParseError(format!("Invalid longitude: {}", raw.lon)))?;
        let location =
            GeoLocation::new(lat, lon).map_err(|e| MapsError::ParseError(e.to_string()))?;

        let address = raw.address.unwrap_or_default();
        let name = raw
            .name
            .filter(|n| !n.is_empty())
            .or_else(|| {
                raw.display_name
                    .as_deref()
                    .and_then(|d| d.split(',').next())
                    .map(|s| s.trim().to_string())
            })
            .unwrap_or_default();

        Ok(Place {
            name,
            city: address.city.or(address.town).or(address.village),
            state: address.state,
            country: address.country,
            display_name: raw.display_name,
            location,
            osm_id: raw.osm_id,
        })
    }
}

#[async_trait]
impl PlaceSearchClient for NominatimClient {
    #[instrument(skip(self))]
    async fn search(&self, query: &str, limit: u8) -> Result<Vec<Place>, MapsError> {
        let query = normalize_query(query)?;

        let cache_key = (query.to_lowercase(), limit);
        if let Some(cache) = &self.cache {
            if let Some(places) = cache.get(&cache_key).await {
                debug!(%query, "Geocoding cache hit");
                return Ok(places);
            }
        }

        self.pace().await;

        let url = format!("{}/search", self.config.base_url.trim_end_matches('/'));
        let mut params = vec![
            ("q", query.to_string()),
            ("format", "jsonv2".to_string()),
            ("limit", limit.to_string()),
            ("addressdetails", "1".to_string()),
        ];

        if !self.config.country_filter.is_empty() {
            params.push(("countrycodes", self.config.country_filter.clone()));
        }

        debug!(%query, "Geocoding address");

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

        let places = Self::parse_results(&body)?;

        if let Some(cache) = &self.cache {
            cache.insert(cache_key, places.clone()).await;
        }
        debug!(%query, count = places.len(), "Geocoded address");

        Ok(places)
    }
}

/// Raw Nominatim API response entry
#[derive(Debug, Deserialize)]
struct NominatimResult {
    lat: String,
    lon: String,
    name: Option<String>,
    display_name: Option<String>,
    osm_id: Option<u64>,
    address: Option<NominatimAddress>,
}

#[derive(Debug, Default, Deserialize)]
struct NominatimAddress {
    city: Option<String>,
    town: Option<String>,
    village: Option<String>,
    state: Option<String>,
    country: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_result_with_address() {
        let json = r#"[{
            "lat": "51.5014", "lon": "-0.1419",
            "name": "Buckingham Palace",
            "display_name": "Buckingham Palace, Westminster, London, England, United Kingdom",
            "osm_id": 5208404,
            "address": { "city": "London", "state": "England", "country": "United Kingdom" }
        }]"#;
        let places = NominatimClient::parse_results(json).unwrap();
        assert_eq!(places.len(), 1);
        assert_eq!(places[0].name, "Buckingham Palace");
        assert_eq!(places[0].city.as_deref(), Some("London"));
        assert_eq!(places[0].osm_id, Some(5_208_404));
        assert!((places[0].location.longitude() + 0.1419).abs() < 1e-9);
    }

    #[test]
    fn test_parse_town_as_city() {
        let json = r#"[{"lat": "1.0", "lon": "2.0", "name": "Mill", "address": {"town": "Ely"}}]"#;
        let places = NominatimClient::parse_results(json).unwrap();
        assert_eq!(places[0].city.as_deref(), Some("Ely"));
    }

    #[test]
    fn test_parse_name_from_display_name() {
        let json = r#"[{"lat": "52.52", "lon": "13.37", "display_name": "Berlin, Germany"}]"#;
        let places = NominatimClient::parse_results(json).unwrap();
        assert_eq!(places[0].name, "Berlin");
        assert_eq!(places[0].display_name.as_deref(), Some("Berlin, Germany"));
    }

    #[test]
    fn test_parse_empty_result() {
        assert!(NominatimClient::parse_results("[]").unwrap().is_empty());
    }

    #[test]
    fn test_parse_invalid_latitude() {
        let json = r#"[{"lat": "north", "lon": "13.37"}]"#;
        assert!(matches!(
            NominatimClient::parse_results(json),
            Err(MapsError::ParseError(_))
        ));
    }

    #[test]
    fn test_cache_disabled_for_testing() {
        let client =
            NominatimClient::new(&NominatimConfig::for_testing("http://127.0.0.1:9")).unwrap();
        assert!(client.cache.is_none());
    }
}
