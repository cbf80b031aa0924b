//! Value Objects - Immutable, identity-less domain primitives

mod fare;
mod geo_location;
mod map_viewport;
mod resolved_location;
mod ride_id;
mod user_id;

pub use fare::{FareQuote, FareSchedule};
pub use geo_location::GeoLocation;
pub use map_viewport::{MapBounds, MapViewport};
pub use resolved_location::ResolvedLocation;
pub use ride_id::RideId;
pub use user_id::UserId;
