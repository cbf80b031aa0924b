//! Scripted fakes for service tests
//!
//! Unlike the mockall mocks these can hold a response back for a while, which
//! is what the ordering tests need.

use std::collections::HashMap;
use std::time::Duration;

use async_trait::async_trait;
use domain::value_objects::GeoLocation;
use parking_lot::Mutex;

use crate::error::ApplicationError;
use crate::ports::{
    GeocodeCandidate, GeocodingPort, RouteCandidate, RouteOverlay, RouteOverlayPort, RoutingPort,
};

pub fn downing() -> GeoLocation {
    GeoLocation::new(51.5034, -0.1276).unwrap()
}

pub fn palace() -> GeoLocation {
    GeoLocation::new(51.5014, -0.1419).unwrap()
}

pub fn tower() -> GeoLocation {
    GeoLocation::new(51.5081, -0.0759).unwrap()
}

pub fn downing_candidate() -> GeocodeCandidate {
    GeocodeCandidate::new("10 Downing Street", downing())
        .with_city("London")
        .with_state("England")
        .with_country("United Kingdom")
}

pub fn palace_candidate() -> GeocodeCandidate {
    GeocodeCandidate::new("Buckingham Palace", palace())
        .with_city("London")
        .with_state("England")
        .with_country("United Kingdom")
}

pub fn tower_candidate() -> GeocodeCandidate {
    GeocodeCandidate::new("Tower of London", tower())
        .with_city("London")
        .with_country("United Kingdom")
}

pub fn paris_candidates() -> Vec<GeocodeCandidate> {
    vec![
        GeocodeCandidate::new("Paris", GeoLocation::new(48.8535, 2.3484).unwrap())
            .with_city("Paris")
            .with_state("Ile-de-France")
            .with_country("France"),
        GeocodeCandidate::new("Paris", GeoLocation::new(33.6618, -95.5555).unwrap())
            .with_state("Texas")
            .with_country("United States"),
    ]
}

pub fn parma_candidates() -> Vec<GeocodeCandidate> {
    vec![
        GeocodeCandidate::new("Parma", GeoLocation::new(44.8015, 10.3279).unwrap())
            .with_state("Emilia-Romagna")
            .with_country("Italy"),
    ]
}

/// 1.8 km / 5 min
pub fn downing_to_palace_route() -> RouteCandidate {
    RouteCandidate {
        distance_meters: 1800.0,
        duration_seconds: 300.0,
        geometry: vec![downing(), palace()],
    }
}

struct Reply<T> {
    delay: Duration,
    result: Result<T, String>,
}

/// Geocoder answering from a per-query script
#[derive(Default)]
pub struct ScriptedGeocoder {
    script: HashMap<String, Reply<Vec<GeocodeCandidate>>>,
    calls: Mutex<Vec<String>>,
}

impl ScriptedGeocoder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn respond(mut self, query: &str, delay_ms: u64, candidates: Vec<GeocodeCandidate>) -> Self {
        self.script.insert(
            query.to_string(),
            Reply {
                delay: Duration::from_millis(delay_ms),
                result: Ok(candidates),
            },
        );
        self
    }

    pub fn fail(mut self, query: &str, delay_ms: u64, message: &str) -> Self {
        self.script.insert(
            query.to_string(),
            Reply {
                delay: Duration::from_millis(delay_ms),
                result: Err(message.to_string()),
            },
        );
        self
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().clone()
    }
}

#[async_trait]
impl GeocodingPort for ScriptedGeocoder {
    async fn search(
        &self,
        query: &str,
        _limit: u8,
    ) -> Result<Vec<GeocodeCandidate>, ApplicationError> {
        self.calls.lock().push(query.to_string());
        let Some(reply) = self.script.get(query) else {
            return Ok(Vec::new());
        };
        tokio::time::sleep(reply.delay).await;
        reply.result.clone().map_err(ApplicationError::ExternalService)
    }
}

/// Router answering from a per-pair script
#[derive(Default)]
pub struct ScriptedRouter {
    script: Vec<(GeoLocation, GeoLocation, Reply<Vec<RouteCandidate>>)>,
    calls: Mutex<Vec<(GeoLocation, GeoLocation)>>,
}

impl ScriptedRouter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn respond(
        mut self,
        origin: GeoLocation,
        destination: GeoLocation,
        delay_ms: u64,
        routes: Vec<RouteCandidate>,
    ) -> Self {
        self.script.push((
            origin,
            destination,
            Reply {
                delay: Duration::from_millis(delay_ms),
                result: Ok(routes),
            },
        ));
        self
    }

    pub fn calls(&self) -> Vec<(GeoLocation, GeoLocation)> {
        self.calls.lock().clone()
    }
}

#[async_trait]
impl RoutingPort for ScriptedRouter {
    async fn route(
        &self,
        origin: GeoLocation,
        destination: GeoLocation,
    ) -> Result<Vec<RouteCandidate>, ApplicationError> {
        self.calls.lock().push((origin, destination));
        let Some((_, _, reply)) = self
            .script
            .iter()
            .find(|(o, d, _)| *o == origin && *d == destination)
        else {
            return Err(ApplicationError::ExternalService("no route scripted".into()));
        };
        tokio::time::sleep(reply.delay).await;
        reply.result.clone().map_err(ApplicationError::ExternalService)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OverlayEvent {
    Draw(u64),
    Remove(u64),
}

/// Overlay renderer that records calls in order
#[derive(Default)]
pub struct RecordingOverlay {
    events: Mutex<Vec<OverlayEvent>>,
}

impl RecordingOverlay {
    pub fn events(&self) -> Vec<OverlayEvent> {
        self.events.lock().clone()
    }
}

impl RouteOverlayPort for RecordingOverlay {
    fn draw_route(&self, overlay: &RouteOverlay) {
        self.events.lock().push(OverlayEvent::Draw(overlay.id));
    }

    fn remove_route(&self, overlay_id: u64) {
        self.events.lock().push(OverlayEvent::Remove(overlay_id));
    }
}
