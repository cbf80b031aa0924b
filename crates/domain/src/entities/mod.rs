//! Domain entities

mod address_field;
mod pair_state;
mod ride_request;
mod ride_type;
mod route_estimate;
mod trip_quote;

pub use address_field::{AddressField, ResolutionSource};
pub use pair_state::PairState;
pub use ride_request::RideRequest;
pub use ride_type::RideType;
pub use route_estimate::RouteEstimate;
pub use trip_quote::TripQuote;
