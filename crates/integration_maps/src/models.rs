//! Typed models returned by the map clients

use domain::value_objects::GeoLocation;
use serde::{Deserialize, Serialize};

/// A place returned by a geocoding search
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Place {
    /// Primary name (street address, POI or locality)
    pub name: String,
    /// City, if the service reported one
    pub city: Option<String>,
    /// State or region
    pub state: Option<String>,
    /// Country
    pub country: Option<String>,
    /// Full address line as formatted by the service, if provided
    pub display_name: Option<String>,
    /// Coordinates of the place
    pub location: GeoLocation,
    /// OpenStreetMap identifier, if provided
    pub osm_id: Option<u64>,
}

/// A driving route returned by the routing service
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Route {
    /// Total distance in meters
    pub distance_m: f64,
    /// Total duration in seconds
    pub duration_s: f64,
    /// Route geometry, in travel order
    pub geometry: Vec<GeoLocation>,
}
