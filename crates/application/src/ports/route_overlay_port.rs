//! Route overlay port
//!
//! The map surface that draws the current route. Calls are synchronous and
//! must not call back into the route estimator.

use domain::value_objects::GeoLocation;
#[cfg(test)]
use mockall::automock;

/// A drawn route
#[derive(Debug, Clone, PartialEq)]
pub struct RouteOverlay {
    /// Identifier used to remove the overlay later
    pub id: u64,
    /// Pickup marker
    pub pickup: GeoLocation,
    /// Dropoff marker
    pub dropoff: GeoLocation,
    /// Route line
    pub polyline: Vec<GeoLocation>,
}

/// Port for the map overlay renderer
#[cfg_attr(test, automock)]
pub trait RouteOverlayPort: Send + Sync {
    /// Draw a route
    fn draw_route(&self, overlay: &RouteOverlay);

    /// Remove a previously drawn route
    fn remove_route(&self, overlay_id: u64);
}
