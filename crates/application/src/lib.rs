//! Application layer - Use cases and orchestration
//!
//! Turns typed address text into coordinates, coordinates into a priced
//! route, and a priced route into a ride request. Talks to the outside world
//! only through the ports in [`ports`].

pub mod error;
pub mod ports;
pub mod services;

pub use error::ApplicationError;
pub use ports::*;
pub use services::*;
