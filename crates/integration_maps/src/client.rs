//! Client traits and shared HTTP plumbing

use async_trait::async_trait;
use domain::value_objects::GeoLocation;
use reqwest::{Response, StatusCode};

use crate::error::MapsError;
use crate::models::{Place, Route};

/// Trait for free-text place search services
#[async_trait]
pub trait PlaceSearchClient: Send + Sync {
    /// Search places matching `query`, returning at most `limit` results
    ///
    /// An empty vector means the service had no match.
    async fn search(&self, query: &str, limit: u8) -> Result<Vec<Place>, MapsError>;
}

/// Trait for driving route services
#[async_trait]
pub trait RoutingClient: Send + Sync {
    /// Fetch candidate routes from `origin` to `destination`, best first
    async fn route(
        &self,
        origin: GeoLocation,
        destination: GeoLocation,
    ) -> Result<Vec<Route>, MapsError>;
}

/// Map a reqwest send error to a `MapsError`
pub(crate) fn send_error(err: &reqwest::Error, timeout_secs: u64) -> MapsError {
    if err.is_timeout() {
        MapsError::Timeout { timeout_secs }
    } else {
        MapsError::ConnectionFailed(err.to_string())
    }
}

/// Reject rate-limited and non-success responses
pub(crate) fn check_status(response: &Response) -> Result<(), MapsError> {
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

    if !status.is_success() {
        return Err(MapsError::RequestFailed(format!("HTTP {status}")));
    }

    Ok(())
}

/// Validate and normalise a free-text query
pub(crate) fn normalize_query(query: &str) -> Result<&str, MapsError> {
    let query = query.trim();
    if query.is_empty() {
        return Err(MapsError::InvalidLocation(
            "Query must not be empty".to_string(),
        ));
    }
    Ok(query)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalize_trims() {
        assert_eq!(normalize_query("  Paris ").unwrap(), "Paris");
    }

    #[test]
    fn normalize_rejects_blank() {
        assert!(matches!(
            normalize_query("   "),
            Err(MapsError::InvalidLocation(_))
        ));
    }
}
