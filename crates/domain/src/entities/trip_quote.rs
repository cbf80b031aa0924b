//! Route and fare for one endpoint pair
//!
//! Route and fare are only ever created together and carry the pair they
//! were computed for, so a fare cannot outlive its route or its endpoints.

use serde::{Deserialize, Serialize};

use super::RouteEstimate;
use crate::value_objects::{FareQuote, FareSchedule, GeoLocation};

/// Priced route between a pickup and a dropoff
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TripQuote {
    pickup: GeoLocation,
    dropoff: GeoLocation,
    route: RouteEstimate,
    fare: FareQuote,
}

impl TripQuote {
    /// Price `route` for the given pair
    #[must_use]
    pub fn new(
        pickup: GeoLocation,
        dropoff: GeoLocation,
        route: RouteEstimate,
        schedule: &FareSchedule,
    ) -> Self {
        let fare = schedule.quote(&route);
        Self {
            pickup,
            dropoff,
            route,
            fare,
        }
    }

    /// Pickup coordinate this quote belongs to
    #[must_use]
    pub const fn pickup(&self) -> GeoLocation {
        self.pickup
    }

    /// Dropoff coordinate this quote belongs to
    #[must_use]
    pub const fn dropoff(&self) -> GeoLocation {
        self.dropoff
    }

    /// Route estimate
    #[must_use]
    pub const fn route(&self) -> &RouteEstimate {
        &self.route
    }

    /// Fare for the route
    #[must_use]
    pub const fn fare(&self) -> FareQuote {
        self.fare
    }

    /// Whether the quote was computed for exactly this pair
    #[must_use]
    pub fn matches(&self, pickup: GeoLocation, dropoff: GeoLocation) -> bool {
        self.pickup == pickup && self.dropoff == dropoff
    }

    /// One-line summary: distance, ETA and fare
    #[must_use]
    pub fn format_summary(&self) -> String {
        format!(
            "{:.2} km · {} min · {}",
            self.route.distance_km(),
            self.route.eta_minutes(),
            self.fare
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> TripQuote {
        let pickup = GeoLocation::new(51.5034, -0.1276).unwrap();
        let dropoff = GeoLocation::new(51.5014, -0.1419).unwrap();
        let route = RouteEstimate::from_meters_seconds(1800.0, 300.0, Vec::new()).unwrap();
        TripQuote::new(pickup, dropoff, route, &FareSchedule::default())
    }

    #[test]
    fn fare_follows_route() {
        let quote = sample();
        assert!((quote.fare().amount() - 6.70).abs() < 1e-9);
    }

    #[test]
    fn matches_only_its_pair() {
        let quote = sample();
        assert!(quote.matches(quote.pickup(), quote.dropoff()));
        assert!(!quote.matches(quote.dropoff(), quote.pickup()));
    }

    #[test]
    fn summary_format() {
        assert_eq!(sample().format_summary(), "1.80 km · 5 min · $6.70");
    }
}
