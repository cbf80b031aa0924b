//! Map service configuration

use serde::{Deserialize, Serialize};

/// Configuration for the Photon autocomplete service
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PhotonConfig {
    /// Base URL for the Photon API
    #[serde(default = "default_photon_base_url")]
    pub base_url: String,

    /// Request timeout in seconds
    #[serde(default = "default_geocoding_timeout_secs")]
    pub timeout_secs: u64,

    /// Preferred result language (empty = service default)
    #[serde(default)]
    pub language: String,
}

fn default_photon_base_url() -> String {
    "https://photon.komoot.io".to_string()
}

const fn default_geocoding_timeout_secs() -> u64 {
    5
}

impl Default for PhotonConfig {
    fn default() -> Self {
        Self {
            base_url: default_photon_base_url(),
            timeout_secs: default_geocoding_timeout_secs(),
            language: String::new(),
        }
    }
}

impl PhotonConfig {
    /// Create a configuration pointing at a mock server
    #[must_use]
    pub fn for_testing(base_url: &str) -> Self {
        Self {
            base_url: base_url.to_string(),
            timeout_secs: 2,
            ..Default::default()
        }
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), String> {
        validate_endpoint("photon", &self.base_url, self.timeout_secs)
    }
}

/// Configuration for the Nominatim geocoding service
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NominatimConfig {
    /// Base URL for the Nominatim API
    #[serde(default = "default_nominatim_base_url")]
    pub base_url: String,

    /// Request timeout in seconds
    #[serde(default = "default_geocoding_timeout_secs")]
    pub timeout_secs: u64,

    /// Cache TTL in minutes (0 to disable)
    #[serde(default = "default_cache_ttl_minutes")]
    pub cache_ttl_minutes: u64,

    /// Minimum spacing between requests in milliseconds (usage policy: 1 req/s)
    #[serde(default = "default_min_request_interval_ms")]
    pub min_request_interval_ms: u64,

    /// Country code filter (e.g., "in,gb"); empty searches worldwide
    #[serde(default)]
    pub country_filter: String,
}

fn default_nominatim_base_url() -> String {
    "https://nominatim.openstreetmap.org".to_string()
}

const fn default_cache_ttl_minutes() -> u64 {
    60
}

const fn default_min_request_interval_ms() -> u64 {
    1100
}

impl Default for NominatimConfig {
    fn default() -> Self {
        Self {
            base_url: default_nominatim_base_url(),
            timeout_secs: default_geocoding_timeout_secs(),
            cache_ttl_minutes: default_cache_ttl_minutes(),
            min_request_interval_ms: default_min_request_interval_ms(),
            country_filter: String::new(),
        }
    }
}

impl NominatimConfig {
    /// Create a configuration pointing at a mock server, without cache or pacing
    #[must_use]
    pub fn for_testing(base_url: &str) -> Self {
        Self {
            base_url: base_url.to_string(),
            timeout_secs: 2,
            cache_ttl_minutes: 0,
            min_request_interval_ms: 0,
            ..Default::default()
        }
    }

    /// Check if caching is enabled
    #[must_use]
    pub const fn caching_enabled(&self) -> bool {
        self.cache_ttl_minutes > 0
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), String> {
        validate_endpoint("nominatim", &self.base_url, self.timeout_secs)
    }
}

/// Configuration for the OSRM routing service
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OsrmConfig {
    /// Base URL for the OSRM HTTP API
    #[serde(default = "default_osrm_base_url")]
    pub base_url: String,

    /// Routing profile
    #[serde(default = "default_profile")]
    pub profile: String,

    /// Request timeout in seconds
    #[serde(default = "default_osrm_timeout_secs")]
    pub timeout_secs: u64,
}

fn default_osrm_base_url() -> String {
    "https://router.project-osrm.org".to_string()
}

fn default_profile() -> String {
    "driving".to_string()
}

const fn default_osrm_timeout_secs() -> u64 {
    10
}

impl Default for OsrmConfig {
    fn default() -> Self {
        Self {
            base_url: default_osrm_base_url(),
            profile: default_profile(),
            timeout_secs: default_osrm_timeout_secs(),
        }
    }
}

impl OsrmConfig {
    /// Create a configuration pointing at a mock server
    #[must_use]
    pub fn for_testing(base_url: &str) -> Self {
        Self {
            base_url: base_url.to_string(),
            timeout_secs: 2,
            ..Default::default()
        }
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), String> {
        validate_endpoint("osrm", &self.base_url, self.timeout_secs)?;
        if self.profile.trim().is_empty() {
            return Err("osrm.profile must not be empty".to_string());
        }
        Ok(())
    }
}

fn validate_endpoint(section: &str, base_url: &str, timeout_secs: u64) -> Result<(), String> {
    if base_url.is_empty() {
        return Err(format!("{section}.base_url must not be empty"));
    }
    if url::Url::parse(base_url).is_err() {
        return Err(format!("{section}.base_url is not a valid URL: {base_url}"));
    }
    if timeout_secs == 0 {
        return Err(format!("{section}.timeout_secs must be greater than 0"));
    }
    Ok(())
}
