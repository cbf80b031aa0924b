//! Persistence module
//!
//! SQLite-based storage for booked rides.

pub mod connection;
pub mod migrations;
pub mod ride_store;

pub use connection::{ConnectionPool, DatabaseError, create_pool};
pub use ride_store::SqliteRideStore;
