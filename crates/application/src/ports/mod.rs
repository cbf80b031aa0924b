//! Port definitions for application layer
//!
//! Ports are interfaces that define how the application interacts with
//! external systems. Adapters in the infrastructure layer implement these ports.

mod geocoding_port;
mod ride_store_port;
mod route_overlay_port;
mod routing_port;
mod session_port;

#[cfg(test)]
pub use geocoding_port::MockGeocodingPort;
pub use geocoding_port::{GeocodeCandidate, GeocodingPort};
#[cfg(test)]
pub use ride_store_port::MockRideStorePort;
pub use ride_store_port::RideStorePort;
#[cfg(test)]
pub use route_overlay_port::MockRouteOverlayPort;
pub use route_overlay_port::{RouteOverlay, RouteOverlayPort};
#[cfg(test)]
pub use routing_port::MockRoutingPort;
pub use routing_port::{RouteCandidate, RoutingPort};
#[cfg(test)]
pub use session_port::MockSessionPort;
pub use session_port::SessionPort;
