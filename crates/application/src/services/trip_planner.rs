//! Trip planner
//!
//! Owns the pickup and dropoff resolvers and the route estimator, and runs
//! the task that feeds resolved coordinates from the former into the latter.

use std::fmt;
use std::sync::Arc;
use std::time::Duration;

use domain::entities::PairState;
use domain::value_objects::{FareSchedule, GeoLocation, MapViewport};
use parking_lot::Mutex;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tracing::{debug, info};

use super::debounced_resolver::{DebouncedResolver, FieldSnapshot, ResolverConfig};
use super::route_estimator::{RouteEstimator, RouteSnapshot};
use crate::ports::{GeocodingPort, RouteOverlayPort, RoutingPort};

/// Everything the trip screen shows
#[derive(Debug, Clone, PartialEq)]
pub struct TripSnapshot {
    /// Pickup field
    pub pickup: FieldSnapshot,
    /// Dropoff field
    pub dropoff: FieldSnapshot,
    /// Route panel
    pub route: RouteSnapshot,
    /// Where the map should look
    pub viewport: MapViewport,
}

impl TripSnapshot {
    /// No lookup is pending and the route state belongs to the current pair
    #[must_use]
    pub fn is_settled(&self) -> bool {
        !self.pickup.loading
            && !self.dropoff.loading
            && !self.route.loading
            && self.route.pair == self.pickup.location().zip(self.dropoff.location())
    }
}

/// Coordinates two address fields and the route between them
pub struct TripPlanner {
    pickup: Arc<DebouncedResolver>,
    dropoff: Arc<DebouncedResolver>,
    estimator: Arc<RouteEstimator>,
    fallback_center: GeoLocation,
    coordinator: Mutex<Option<JoinHandle<()>>>,
}

impl fmt::Debug for TripPlanner {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TripPlanner")
            .field("pickup", &self.pickup)
            .field("dropoff", &self.dropoff)
            .field("estimator", &self.estimator)
            .field("fallback_center", &self.fallback_center)
            .finish_non_exhaustive()
    }
}

impl TripPlanner {
    /// Wire the given components together and start coordination
    ///
    /// Must be called from within a Tokio runtime.
    #[must_use]
    pub fn new(
        pickup: DebouncedResolver,
        dropoff: DebouncedResolver,
        estimator: RouteEstimator,
    ) -> Self {
        let pickup = Arc::new(pickup);
        let dropoff = Arc::new(dropoff);
        let estimator = Arc::new(estimator);

        let coordinator = tokio::spawn(coordinate(
            pickup.subscribe(),
            dropoff.subscribe(),
            Arc::clone(&estimator),
        ));
        info!("Trip planner started");

        Self {
            pickup,
            dropoff,
            estimator,
            fallback_center: GeoLocation::default_center(),
            coordinator: Mutex::new(Some(coordinator)),
        }
    }

    /// Build a planner whose fields share the given providers
    #[must_use]
    pub fn from_ports(
        suggester: Arc<dyn GeocodingPort>,
        locator: Arc<dyn GeocodingPort>,
        routing: Arc<dyn RoutingPort>,
        overlay: Option<Arc<dyn RouteOverlayPort>>,
        config: &ResolverConfig,
        schedule: FareSchedule,
    ) -> Self {
        let pickup = DebouncedResolver::with_providers(
            "pickup",
            Arc::clone(&suggester),
            Arc::clone(&locator),
            config.clone(),
        );
        let dropoff =
            DebouncedResolver::with_providers("dropoff", suggester, locator, config.clone());
        let estimator = RouteEstimator::new(routing, schedule, overlay);
        Self::new(pickup, dropoff, estimator)
    }

    /// Center used when no endpoint is known (e.g. the user's position)
    #[must_use]
    pub fn with_fallback_center(mut self, center: GeoLocation) -> Self {
        self.fallback_center = center;
        self
    }

    /// Pickup field
    #[must_use]
    pub fn pickup(&self) -> &DebouncedResolver {
        &self.pickup
    }

    /// Dropoff field
    #[must_use]
    pub fn dropoff(&self) -> &DebouncedResolver {
        &self.dropoff
    }

    /// Route estimator
    #[must_use]
    pub fn estimator(&self) -> &RouteEstimator {
        &self.estimator
    }

    /// Current state of the whole trip
    #[must_use]
    pub fn snapshot(&self) -> TripSnapshot {
        let pickup = self.pickup.snapshot();
        let dropoff = self.dropoff.snapshot();
        let (from, to) = (pickup.location(), dropoff.location());

        let mut route = self.estimator.snapshot();
        let pair_state = PairState::from_presence(from.is_some(), to.is_some());
        if route.pair != from.zip(to) || route.pair_state != pair_state {
            // Coordination has not seen the latest edit yet
            route.quote = None;
            route.pair_state = pair_state;
        }

        let viewport = MapViewport::for_endpoints(from, to, self.fallback_center);
        TripSnapshot {
            pickup,
            dropoff,
            route,
            viewport,
        }
    }

    /// Wait until every lookup has finished and the route matches the pair,
    /// or until `timeout`
    pub async fn settled(&self, timeout: Duration) -> TripSnapshot {
        let mut pickup = self.pickup.subscribe();
        let mut dropoff = self.dropoff.subscribe();
        let mut route = self.estimator.subscribe();

        let wait = async {
            loop {
                if self.snapshot().is_settled() {
                    break;
                }
                tokio::select! {
                    changed = pickup.changed() => if changed.is_err() { break },
                    changed = dropoff.changed() => if changed.is_err() { break },
                    changed = route.changed() => if changed.is_err() { break },
                }
            }
        };
        if tokio::time::timeout(timeout, wait).await.is_err() {
            debug!("Timed out waiting for trip to settle");
        }
        self.snapshot()
    }

    /// Clear both fields (e.g. after a booking)
    pub fn reset(&self) {
        self.pickup.clear();
        self.dropoff.clear();
    }

    /// Terminal state: stop coordination, cancel lookups, remove the overlay
    pub fn shutdown(&self) {
        let Some(coordinator) = self.coordinator.lock().take() else {
            return;
        };
        coordinator.abort();
        self.pickup.shutdown();
        self.dropoff.shutdown();
        self.estimator.shutdown();
        info!("Trip planner stopped");
    }
}

impl Drop for TripPlanner {
    fn drop(&mut self) {
        self.shutdown();
    }
}

async fn coordinate(
    mut pickup: watch::Receiver<FieldSnapshot>,
    mut dropoff: watch::Receiver<FieldSnapshot>,
    estimator: Arc<RouteEstimator>,
) {
    loop {
        let from = pickup.borrow_and_update().location();
        let to = dropoff.borrow_and_update().location();
        estimator.update_endpoints(from, to);

        tokio::select! {
            changed = pickup.changed() => if changed.is_err() { break },
            changed = dropoff.changed() => if changed.is_err() { break },
        }
    }
    debug!("Trip coordination stopped");
}
