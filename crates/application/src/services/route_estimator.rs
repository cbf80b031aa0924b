//! Route and fare estimation for the current endpoint pair
//!
//! Every change of the pair drops the current quote and overlay before
//! anything else happens, so a fare is never shown for endpoints it was not
//! computed for.

use std::fmt;
use std::sync::Arc;
use std::time::Duration;

use domain::entities::{PairState, TripQuote};
use domain::value_objects::{FareSchedule, GeoLocation};
use parking_lot::Mutex;
use tokio::sync::watch;
use tracing::{debug, info, warn};

use crate::error::ApplicationError;
use crate::ports::{RouteOverlay, RouteOverlayPort, RoutingPort};

/// What a renderer needs to show the route panel
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RouteSnapshot {
    /// Which endpoints are resolved
    pub pair_state: PairState,
    /// Pair the current (or pending) estimate is for
    pub pair: Option<(GeoLocation, GeoLocation)>,
    /// Route and fare, present only for a completed estimate of `pair`
    pub quote: Option<TripQuote>,
    /// A route request is in flight
    pub loading: bool,
}

#[derive(Debug, Default)]
struct EstimatorState {
    snapshot: RouteSnapshot,
    seq: u64,
    overlay: Option<u64>,
}

struct Inner {
    routing: Arc<dyn RoutingPort>,
    schedule: FareSchedule,
    overlay: Option<Arc<dyn RouteOverlayPort>>,
    state: Mutex<EstimatorState>,
    updates: watch::Sender<RouteSnapshot>,
}

impl Inner {
    fn publish(&self, state: &EstimatorState) {
        self.updates.send_replace(state.snapshot.clone());
    }

    fn remove_overlay(&self, state: &mut EstimatorState) {
        let Some(id) = state.overlay.take() else {
            return;
        };
        if let Some(overlay) = &self.overlay {
            overlay.remove_route(id);
        }
    }

    fn draw_overlay(&self, state: &mut EstimatorState, quote: &TripQuote, id: u64) {
        self.remove_overlay(state);
        if let Some(overlay) = &self.overlay {
            overlay.draw_route(&RouteOverlay {
                id,
                pickup: quote.pickup(),
                dropoff: quote.dropoff(),
                polyline: quote.route().polyline().to_vec(),
            });
            state.overlay = Some(id);
        }
    }

    async fn fetch(&self, seq: u64, pickup: GeoLocation, dropoff: GeoLocation) {
        debug!(seq, %pickup, %dropoff, "Requesting route");
        let result = self
            .routing
            .route(pickup, dropoff)
            .await
            .and_then(|routes| {
                routes
                    .into_iter()
                    .next()
                    .ok_or_else(|| {
                        ApplicationError::NoResults(format!(
                            "no route from {pickup} to {dropoff}"
                        ))
                    })?
                    .into_estimate()
            });

        let mut state = self.state.lock();
        if state.seq != seq {
            debug!(seq, "Discarding stale route");
            return;
        }
        state.snapshot.loading = false;

        match result {
            Ok(route) => {
                let quote = TripQuote::new(pickup, dropoff, route, &self.schedule);
                info!(
                    distance_km = quote.route().distance_km(),
                    duration_min = quote.route().duration_min(),
                    fare = %quote.fare(),
                    "Route estimated"
                );
                self.draw_overlay(&mut state, &quote, seq);
                state.snapshot.quote = Some(quote);
            },
            Err(e) => {
                warn!(error = %e, %pickup, %dropoff, "Route estimation failed");
            },
        }

        self.publish(&state);
    }
}

/// Keeps one route estimate (and its fare) for the current endpoint pair
///
/// Must be driven from within a Tokio runtime.
pub struct RouteEstimator {
    inner: Arc<Inner>,
}

impl fmt::Debug for RouteEstimator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RouteEstimator")
            .field("schedule", &self.inner.schedule)
            .field("has_overlay", &self.inner.overlay.is_some())
            .finish_non_exhaustive()
    }
}

impl RouteEstimator {
    /// Create an estimator
    #[must_use]
    pub fn new(
        routing: Arc<dyn RoutingPort>,
        schedule: FareSchedule,
        overlay: Option<Arc<dyn RouteOverlayPort>>,
    ) -> Self {
        let (updates, _) = watch::channel(RouteSnapshot::default());
        Self {
            inner: Arc::new(Inner {
                routing,
                schedule,
                overlay,
                state: Mutex::new(EstimatorState::default()),
                updates,
            }),
        }
    }

    /// Fare schedule used for quotes
    #[must_use]
    pub fn schedule(&self) -> &FareSchedule {
        &self.inner.schedule
    }

    /// React to a change of either endpoint
    ///
    /// A pair identical to the one already requested is a no-op. Anything
    /// else drops the current quote and overlay, and requests a new route if
    /// both endpoints are present.
    pub fn update_endpoints(&self, pickup: Option<GeoLocation>, dropoff: Option<GeoLocation>) {
        let pair_state = PairState::from_presence(pickup.is_some(), dropoff.is_some());
        let pair = pickup.zip(dropoff);

        let mut state = self.inner.state.lock();
        if state.snapshot.pair == pair && state.snapshot.pair_state == pair_state {
            return;
        }
        self.start(&mut state, pair_state, pair);
    }

    /// Request the route for the current pair again
    pub fn refresh(&self) {
        let mut state = self.inner.state.lock();
        let (pair_state, pair) = (state.snapshot.pair_state, state.snapshot.pair);
        self.start(&mut state, pair_state, pair);
    }

    /// Current state
    #[must_use]
    pub fn snapshot(&self) -> RouteSnapshot {
        self.inner.state.lock().snapshot.clone()
    }

    /// Receive every published snapshot
    #[must_use]
    pub fn subscribe(&self) -> watch::Receiver<RouteSnapshot> {
        self.inner.updates.subscribe()
    }

    /// Wait for the in-flight request (if any) to finish, then return the quote
    pub async fn wait_for_quote(&self, timeout: Duration) -> Option<TripQuote> {
        let mut updates = self.subscribe();
        let wait = async {
            loop {
                if !updates.borrow_and_update().loading {
                    break;
                }
                if updates.changed().await.is_err() {
                    break;
                }
            }
        };
        if tokio::time::timeout(timeout, wait).await.is_err() {
            debug!("Timed out waiting for route");
        }
        self.snapshot().quote
    }

    /// Terminal state: ignore in-flight responses and remove the overlay
    pub fn shutdown(&self) {
        let mut state = self.inner.state.lock();
        state.seq = state.seq.wrapping_add(1);
        state.snapshot = RouteSnapshot::default();
        self.inner.remove_overlay(&mut state);
        self.inner.publish(&state);
    }

    fn start(
        &self,
        state: &mut EstimatorState,
        pair_state: PairState,
        pair: Option<(GeoLocation, GeoLocation)>,
    ) {
        state.seq = state.seq.wrapping_add(1);
        state.snapshot.pair_state = pair_state;
        state.snapshot.pair = pair;
        state.snapshot.quote = None;
        self.inner.remove_overlay(state);

        if let Some((pickup, dropoff)) = pair {
            state.snapshot.loading = true;
            let seq = state.seq;
            let inner = Arc::clone(&self.inner);
            tokio::spawn(async move {
                inner.fetch(seq, pickup, dropoff).await;
            });
        } else {
            state.snapshot.loading = false;
        }

        self.inner.publish(state);
    }
}

impl Drop for RouteEstimator {
    fn drop(&mut self) {
        self.shutdown();
    }
}

#[cfg(test)]
mod tests {
    use mockall::Sequence;
    use mockall::predicate::eq;

    use super::*;
    use crate::ports::{MockRouteOverlayPort, MockRoutingPort, RouteCandidate};
    use crate::services::test_support::{
        OverlayEvent, RecordingOverlay, ScriptedRouter, downing, downing_to_palace_route, palace,
        tower,
    };

    async fn advance(ms: u64) {
        tokio::time::sleep(Duration::from_millis(ms)).await;
    }

    fn estimator(routing: Arc<dyn RoutingPort>) -> RouteEstimator {
        RouteEstimator::new(routing, FareSchedule::default(), None)
    }

    #[tokio::test(start_paused = true)]
    async fn downing_street_to_palace_costs_six_seventy() {
        let router =
            Arc::new(ScriptedRouter::new().respond(downing(), palace(), 50, vec![downing_to_palace_route()]));
        let estimator = estimator(router);

        estimator.update_endpoints(Some(downing()), Some(palace()));
        assert!(estimator.snapshot().loading);
        let quote = estimator.wait_for_quote(Duration::from_secs(5)).await.unwrap();

        assert!((quote.route().distance_km() - 1.8).abs() < 1e-9);
        assert!((quote.route().duration_min() - 5.0).abs() < 1e-9);
        assert!((quote.fare().amount() - 6.70).abs() < 1e-9);
        assert_eq!(estimator.snapshot().pair_state, PairState::BothResolved);
    }

    #[tokio::test(start_paused = true)]
    async fn identical_pair_is_requested_once() {
        let mut routing = MockRoutingPort::new();
        routing
            .expect_route()
            .with(eq(downing()), eq(palace()))
            .times(1)
            .returning(|_, _| Ok(vec![downing_to_palace_route()]));
        let estimator = estimator(Arc::new(routing));

        estimator.update_endpoints(Some(downing()), Some(palace()));
        estimator.update_endpoints(Some(downing()), Some(palace()));
        advance(100).await;
        estimator.update_endpoints(Some(downing()), Some(palace()));
        advance(100).await;

        assert!(estimator.snapshot().quote.is_some());
    }

    #[tokio::test(start_paused = true)]
    async fn clearing_an_endpoint_drops_the_quote_immediately() {
        let router =
            Arc::new(ScriptedRouter::new().respond(downing(), palace(), 10, vec![downing_to_palace_route()]));
        let estimator = estimator(router);

        estimator.update_endpoints(Some(downing()), Some(palace()));
        advance(100).await;
        assert!(estimator.snapshot().quote.is_some());

        estimator.update_endpoints(Some(downing()), None);
        let snapshot = estimator.snapshot();
        assert!(snapshot.quote.is_none());
        assert!(!snapshot.loading);
        assert_eq!(snapshot.pair_state, PairState::PickupOnly);
    }

    #[tokio::test(start_paused = true)]
    async fn stale_route_is_discarded() {
        let slow = downing_to_palace_route();
        let fast = RouteCandidate {
            distance_meters: 5200.0,
            duration_seconds: 900.0,
            geometry: vec![downing(), tower()],
        };
        let router = Arc::new(
            ScriptedRouter::new()
                .respond(downing(), palace(), 1000, vec![slow])
                .respond(downing(), tower(), 10, vec![fast]),
        );
        let estimator = estimator(router.clone());

        estimator.update_endpoints(Some(downing()), Some(palace()));
        advance(100).await;
        estimator.update_endpoints(Some(downing()), Some(tower()));
        advance(2000).await;

        assert_eq!(router.calls().len(), 2);
        let quote = estimator.snapshot().quote.unwrap();
        assert!(quote.matches(downing(), tower()));
    }

    #[tokio::test(start_paused = true)]
    async fn failed_route_leaves_no_quote() {
        let mut routing = MockRoutingPort::new();
        routing
            .expect_route()
            .returning(|_, _| Err(ApplicationError::ExternalService("router down".into())));
        let estimator = estimator(Arc::new(routing));

        estimator.update_endpoints(Some(downing()), Some(palace()));
        assert!(estimator.wait_for_quote(Duration::from_secs(5)).await.is_none());
        assert!(!estimator.snapshot().loading);
    }

    #[tokio::test(start_paused = true)]
    async fn empty_route_list_leaves_no_quote() {
        let mut routing = MockRoutingPort::new();
        routing.expect_route().returning(|_, _| Ok(Vec::new()));
        let estimator = estimator(Arc::new(routing));

        estimator.update_endpoints(Some(downing()), Some(palace()));
        assert!(estimator.wait_for_quote(Duration::from_secs(5)).await.is_none());
    }

    #[tokio::test(start_paused = true)]
    async fn malformed_route_produces_no_partial_estimate() {
        let mut routing = MockRoutingPort::new();
        routing.expect_route().returning(|_, _| {
            Ok(vec![RouteCandidate {
                distance_meters: -1.0,
                duration_seconds: 300.0,
                geometry: vec![],
            }])
        });
        let estimator = estimator(Arc::new(routing));

        estimator.update_endpoints(Some(downing()), Some(palace()));
        assert!(estimator.wait_for_quote(Duration::from_secs(5)).await.is_none());
    }

    #[tokio::test(start_paused = true)]
    async fn overlay_is_removed_before_redraw() {
        let router = Arc::new(
            ScriptedRouter::new()
                .respond(downing(), palace(), 10, vec![downing_to_palace_route()])
                .respond(downing(), tower(), 10, vec![downing_to_palace_route()]),
        );
        let overlay = Arc::new(RecordingOverlay::default());
        let estimator =
            RouteEstimator::new(router, FareSchedule::default(), Some(overlay.clone()));

        estimator.update_endpoints(Some(downing()), Some(palace()));
        advance(100).await;
        estimator.update_endpoints(Some(downing()), Some(tower()));
        advance(100).await;
        estimator.shutdown();

        assert_eq!(
            overlay.events(),
            vec![
                OverlayEvent::Draw(1),
                OverlayEvent::Remove(1),
                OverlayEvent::Draw(2),
                OverlayEvent::Remove(2),
            ]
        );
    }

    #[tokio::test(start_paused = true)]
    async fn overlay_calls_follow_draw_then_remove_order() {
        let mut routing = MockRoutingPort::new();
        routing
            .expect_route()
            .returning(|_, _| Ok(vec![downing_to_palace_route()]));

        let mut overlay = MockRouteOverlayPort::new();
        let mut seq = Sequence::new();
        overlay
            .expect_draw_route()
            .times(1)
            .in_sequence(&mut seq)
            .returning(|_| ());
        overlay
            .expect_remove_route()
            .with(eq(1))
            .times(1)
            .in_sequence(&mut seq)
            .returning(|_| ());

        let estimator =
            RouteEstimator::new(Arc::new(routing), FareSchedule::default(), Some(Arc::new(overlay)));
        estimator.update_endpoints(Some(downing()), Some(palace()));
        advance(100).await;
        estimator.update_endpoints(None, Some(palace()));
    }

    #[tokio::test(start_paused = true)]
    async fn refresh_requests_the_same_pair_again() {
        let router =
            Arc::new(ScriptedRouter::new().respond(downing(), palace(), 10, vec![downing_to_palace_route()]));
        let estimator = estimator(router.clone());

        estimator.update_endpoints(Some(downing()), Some(palace()));
        advance(100).await;
        estimator.refresh();
        assert!(estimator.snapshot().quote.is_none());
        advance(100).await;

        assert_eq!(router.calls().len(), 2);
        assert!(estimator.snapshot().quote.is_some());
    }
}
