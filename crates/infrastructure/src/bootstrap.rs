//! Service wiring
//!
//! Builds application services from configuration: Photon for typing
//! suggestions, Nominatim for address lookup, OSRM for routes and SQLite for
//! ride storage.

use std::sync::Arc;

use application::error::ApplicationError;
use application::ports::RouteOverlayPort;
use application::services::{BookingService, TripPlanner};
use tracing::info;

use crate::adapters::{PlaceSearchAdapter, RouteAdapter, StaticSession};
use crate::config::AppConfig;
use crate::persistence::{SqliteRideStore, create_pool};

/// Build a trip planner backed by the configured map services
///
/// Must be called from within a Tokio runtime.
///
/// # Errors
///
/// Returns `Configuration` if the configuration is invalid or an HTTP client
/// cannot be built.
pub fn build_trip_planner(
    config: &AppConfig,
    overlay: Option<Arc<dyn RouteOverlayPort>>,
) -> Result<TripPlanner, ApplicationError> {
    config.validate().map_err(ApplicationError::Configuration)?;

    let suggester = Arc::new(PlaceSearchAdapter::photon(&config.photon)?);
    let locator = Arc::new(PlaceSearchAdapter::nominatim(&config.nominatim)?);
    let routing = Arc::new(RouteAdapter::osrm(&config.osrm)?);

    info!(
        photon = %config.photon.base_url,
        nominatim = %config.nominatim.base_url,
        osrm = %config.osrm.base_url,
        "Map services configured"
    );

    Ok(TripPlanner::from_ports(
        suggester,
        locator,
        routing,
        overlay,
        &config.resolver.to_resolver_config(),
        config.fare,
    ))
}

/// Build a booking service backed by SQLite
///
/// `user_id` takes precedence over `config.session.user_id`.
///
/// # Errors
///
/// Returns `Configuration` if the database cannot be opened and
/// `NotAuthorized` if the user id is malformed.
pub fn build_booking_service(
    config: &AppConfig,
    user_id: Option<&str>,
) -> Result<BookingService, ApplicationError> {
    let pool = create_pool(&config.database)
        .map_err(|e| ApplicationError::Configuration(format!("database: {e}")))?;

    let session = match user_id.or(config.session.user_id.as_deref()) {
        Some(raw) => StaticSession::from_user_id(raw)?,
        None => StaticSession::signed_out(),
    };

    Ok(BookingService::new(
        Arc::new(session),
        Arc::new(SqliteRideStore::new(Arc::new(pool))),
    ))
}
