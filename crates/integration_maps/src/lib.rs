//! OpenStreetMap integration for RideQuote
//!
//! Provides place search via [Photon](https://photon.komoot.io) (typing
//! suggestions) and [Nominatim](https://nominatim.openstreetmap.org) (address
//! lookup), and driving routes via [OSRM](https://project-osrm.org).
//!
//! # Architecture
//!
//! [`PlaceSearchClient`] is implemented by [`PhotonClient`] and
//! [`NominatimClient`]; [`RoutingClient`] is implemented by [`OsrmClient`].
//! All clients return typed models ([`Place`], [`Route`]) and a shared
//! [`MapsError`].
//!
//! # Example
//!
//! ```rust,ignore
//! use integration_maps::{OsrmClient, OsrmConfig, RoutingClient};
//!
//! let client = OsrmClient::new(&OsrmConfig::default())?;
//! let routes = client.route(pickup, dropoff).await?;
//! println!("{} m", routes[0].distance_m);
//! ```

mod client;
mod config;
mod error;
mod models;
mod nominatim;
mod osrm;
mod photon;

pub use client::{PlaceSearchClient, RoutingClient};
pub use config::{NominatimConfig, OsrmConfig, PhotonConfig};
pub use error::MapsError;
pub use models::{Place, Route};
pub use nominatim::NominatimClient;
pub use osrm::OsrmClient;
pub use photon::PhotonClient;
