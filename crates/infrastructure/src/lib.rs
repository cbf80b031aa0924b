//! Infrastructure layer - Adapters for external systems
//!
//! Implements ports defined in the application layer on top of the
//! OpenStreetMap clients and SQLite, and owns configuration, logging and
//! wiring of the application services.

pub mod adapters;
pub mod bootstrap;
pub mod config;
pub mod persistence;
pub mod telemetry;

pub use adapters::*;
pub use bootstrap::{build_booking_service, build_trip_planner};
pub use crate::config::{
    AppConfig, DatabaseConfig, Environment, LogFormat, LoggingConfig, ResolverAppConfig,
    SessionConfig,
};
pub use persistence::{ConnectionPool, SqliteRideStore, create_pool};
pub use telemetry::{TelemetryError, init_logging};
