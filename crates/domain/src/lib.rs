//! Domain layer for RideQuote
//!
//! Contains the trip-planning vocabulary: coordinates, address fields,
//! route estimates, fares and ride requests. This layer performs no I/O.

pub mod entities;
pub mod errors;
pub mod value_objects;

pub use entities::*;
pub use errors::DomainError;
pub use value_objects::*;
