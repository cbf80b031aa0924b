//! Adapters implementing application ports

mod geocoding_adapter;
mod routing_adapter;
mod session_adapter;

use application::error::ApplicationError;
use integration_maps::MapsError;

pub use geocoding_adapter::PlaceSearchAdapter;
pub use routing_adapter::RouteAdapter;
pub use session_adapter::StaticSession;

/// Map a maps client error into the application's lookup failure taxonomy
pub(crate) fn map_maps_error(provider: &str, error: MapsError) -> ApplicationError {
    match error {
        MapsError::ParseError(msg) => {
            ApplicationError::MalformedResponse(format!("{provider}: {msg}"))
        },
        MapsError::NoResults(what) | MapsError::InvalidLocation(what) => {
            ApplicationError::NoResults(format!("{provider}: {what}"))
        },
        MapsError::ConfigurationError(msg) => {
            ApplicationError::Configuration(format!("{provider}: {msg}"))
        },
        other @ (MapsError::ConnectionFailed(_)
        | MapsError::RequestFailed(_)
        | MapsError::RateLimitExceeded { .. }
        | MapsError::Timeout { .. }) => {
            ApplicationError::ExternalService(format!("{provider}: {other}"))
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn transport_failures_become_external_service() {
        let err = map_maps_error("osrm", MapsError::Timeout { timeout_secs: 10 });
        assert!(matches!(err, ApplicationError::ExternalService(ref m) if m.starts_with("osrm")));

        let err = map_maps_error(
            "nominatim",
            MapsError::RateLimitExceeded {
                retry_after_secs: None,
            },
        );
        assert!(err.is_retryable());
    }

    #[test]
    fn parse_failures_become_malformed_response() {
        let err = map_maps_error("photon", MapsError::ParseError("expected value".into()));
        assert!(matches!(err, ApplicationError::MalformedResponse(_)));
    }

    #[test]
    fn empty_results_become_no_results() {
        let err = map_maps_error("osrm", MapsError::NoResults("route".into()));
        assert!(matches!(err, ApplicationError::NoResults(_)));
    }

    #[test]
    fn bad_configuration_is_reported_as_such() {
        let err = map_maps_error("photon", MapsError::ConfigurationError("base_url".into()));
        assert!(matches!(err, ApplicationError::Configuration(_)));
    }
}
