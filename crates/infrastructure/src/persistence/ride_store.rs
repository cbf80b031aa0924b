//! SQLite ride store implementation
//!
//! Implements the `RideStorePort` for persisting booked rides.

use std::str::FromStr;
use std::sync::Arc;

use application::{error::ApplicationError, ports::RideStorePort};
use async_trait::async_trait;
use chrono::{DateTime, SecondsFormat, Utc};
use domain::entities::{RideRequest, RideType};
use domain::value_objects::{GeoLocation, ResolvedLocation, RideId, UserId};
use rusqlite::types::Type;
use rusqlite::{Row, params};
use tokio::task;
use tracing::{debug, instrument};

use super::connection::ConnectionPool;

const RIDE_COLUMNS: &str = "id, rider_id, pickup_address, pickup_lat, pickup_lng, \
     dropoff_address, dropoff_lat, dropoff_lng, ride_type, distance_km, duration_min, \
     fare, scheduled_for, created_at";

/// SQLite-based ride store
#[derive(Debug, Clone)]
pub struct SqliteRideStore {
    pool: Arc<ConnectionPool>,
}

impl SqliteRideStore {
    /// Create a new SQLite ride store
    #[must_use]
    pub const fn new(pool: Arc<ConnectionPool>) -> Self {
        Self { pool }
    }
}

/// Fixed-width UTC timestamps so that text ordering matches time ordering
fn format_timestamp(at: DateTime<Utc>) -> String {
    at.to_rfc3339_opts(SecondsFormat::Nanos, true)
}

#[async_trait]
impl RideStorePort for SqliteRideStore {
    #[instrument(skip(self, ride), fields(ride_id = %ride.id, rider = %ride.rider))]
    async fn insert_ride(&self, ride: &RideRequest) -> Result<(), ApplicationError> {
        let pool = Arc::clone(&self.pool);
        let ride = ride.clone();

        task::spawn_blocking(move || {
            let conn = pool
                .get()
                .map_err(|e| ApplicationError::Internal(e.to_string()))?;

            conn.execute(
                &format!(
                    "INSERT INTO rides ({RIDE_COLUMNS})
                     VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12, ?13, ?14)"
                ),
                params![
                    ride.id.to_string(),
                    ride.rider.to_string(),
                    ride.pickup.display_address(),
                    ride.pickup.location().latitude(),
                    ride.pickup.location().longitude(),
                    ride.dropoff.display_address(),
                    ride.dropoff.location().latitude(),
                    ride.dropoff.location().longitude(),
                    ride.ride_type.id(),
                    ride.distance_km,
                    ride.duration_min,
                    ride.fare,
                    ride.scheduled_for.map(format_timestamp),
                    format_timestamp(ride.created_at),
                ],
            )
            .map_err(|e| ApplicationError::Internal(e.to_string()))?;

            debug!("Saved ride");
            Ok(())
        })
        .await
        .map_err(|e| ApplicationError::Internal(e.to_string()))?
    }

    #[instrument(skip(self), fields(rider = %rider))]
    async fn rides_for(&self, rider: UserId) -> Result<Vec<RideRequest>, ApplicationError> {
        let pool = Arc::clone(&self.pool);
        let rider_str = rider.to_string();

        task::spawn_blocking(move || {
            let conn = pool
                .get()
                .map_err(|e| ApplicationError::Internal(e.to_string()))?;

            let mut stmt = conn
                .prepare(&format!(
                    "SELECT {RIDE_COLUMNS} FROM rides
                     WHERE rider_id = ?1
                     ORDER BY created_at DESC"
                ))
                .map_err(|e| ApplicationError::Internal(e.to_string()))?;

            let rides = stmt
                .query_map([&rider_str], row_to_ride)
                .map_err(|e| ApplicationError::Internal(e.to_string()))?
                .collect::<Result<Vec<_>, _>>()
                .map_err(|e| ApplicationError::Internal(e.to_string()))?;

            debug!(count = rides.len(), "Listed rides for rider");
            Ok(rides)
        })
        .await
        .map_err(|e| ApplicationError::Internal(e.to_string()))?
    }
}

fn conversion_error<E>(column: usize, kind: Type, err: E) -> rusqlite::Error
where
    E: std::error::Error + Send + Sync + 'static,
{
    rusqlite::Error::FromSqlConversionFailure(column, kind, Box::new(err))
}

fn parse_timestamp(column: usize, value: &str) -> rusqlite::Result<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(value)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|e| conversion_error(column, Type::Text, e))
}

fn endpoint(
    row: &Row<'_>,
    address: usize,
    lat: usize,
) -> rusqlite::Result<ResolvedLocation> {
    let display_address: String = row.get(address)?;
    let location = GeoLocation::new(row.get(lat)?, row.get(lat + 1)?)
        .map_err(|e| conversion_error(lat, Type::Real, e))?;
    Ok(ResolvedLocation::new(location, display_address))
}

/// Convert a database row to a `RideRequest`
fn row_to_ride(row: &Row<'_>) -> rusqlite::Result<RideRequest> {
    let id_str: String = row.get(0)?;
    let rider_str: String = row.get(1)?;
    let ride_type_str: String = row.get(8)?;
    let scheduled_str: Option<String> = row.get(12)?;
    let created_str: String = row.get(13)?;

    let id = RideId::parse(&id_str).map_err(|e| conversion_error(0, Type::Text, e))?;
    let rider = UserId::parse(&rider_str).map_err(|e| conversion_error(1, Type::Text, e))?;
    let ride_type =
        RideType::from_str(&ride_type_str).map_err(|e| conversion_error(8, Type::Text, e))?;
    let scheduled_for = scheduled_str
        .map(|s| parse_timestamp(12, &s))
        .transpose()?;

    Ok(RideRequest {
        id,
        rider,
        pickup: endpoint(row, 2, 3)?,
        dropoff: endpoint(row, 5, 6)?,
        ride_type,
        distance_km: row.get(9)?,
        duration_min: row.get(10)?,
        fare: row.get(11)?,
        scheduled_for,
        created_at: parse_timestamp(13, &created_str)?,
    })
}
