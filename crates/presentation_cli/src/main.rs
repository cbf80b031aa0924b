//! RideQuote CLI
//!
//! Resolves pickup and dropoff addresses against the configured map
//! services, prices the route and books rides for a signed-in user.

#![allow(clippy::print_stdout)]

mod output;

use std::path::PathBuf;
use std::time::Duration;

use anyhow::{Context, bail};
use application::services::{TripPlanner, TripSnapshot};
use chrono::{DateTime, Utc};
use clap::{Parser, Subcommand};
use domain::entities::RideType;
use infrastructure::{AppConfig, build_booking_service, build_trip_planner, init_logging};
use tracing::debug;

/// RideQuote CLI
#[derive(Parser)]
#[command(name = "ridequote")]
#[command(author, version, about = "Ride fare estimates and bookings", long_about = None)]
struct Cli {
    /// Verbosity level
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Configuration file (default: ./config.toml if present)
    #[arg(short, long, env = "RIDEQUOTE_CONFIG")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Show place suggestions for a partial address
    Suggest {
        /// Partial address as typed
        text: String,

        /// Seconds to wait for the map services
        #[arg(long, default_value_t = 15)]
        timeout_secs: u64,
    },

    /// Resolve two addresses and estimate distance, time and fare
    ///
    /// Example: ridequote quote "10 Downing St, London" "Buckingham Palace"
    Quote {
        /// Pickup address
        pickup: String,

        /// Dropoff address
        dropoff: String,

        /// Seconds to wait for the map services
        #[arg(long, default_value_t = 15)]
        timeout_secs: u64,
    },

    /// Price a trip of known distance and duration
    Fare {
        /// Distance in kilometres
        #[arg(long)]
        distance_km: f64,

        /// Duration in minutes
        #[arg(long)]
        duration_min: f64,
    },

    /// List the available ride types
    RideTypes,

    /// Book a ride between two addresses
    Book {
        /// Pickup address
        pickup: String,

        /// Dropoff address
        dropoff: String,

        /// Ride type (economy, premium, suv, auto)
        #[arg(short = 't', long, default_value = "economy")]
        ride_type: RideType,

        /// Pickup time as RFC 3339 (default: now)
        #[arg(long)]
        at: Option<DateTime<Utc>>,

        /// User id to book as (overrides `session.user_id`)
        #[arg(short, long, env = "RIDEQUOTE_USER")]
        user: Option<String>,

        /// Seconds to wait for the map services
        #[arg(long, default_value_t = 15)]
        timeout_secs: u64,
    },

    /// Show rides booked by the signed-in user, newest first
    Rides {
        /// User id (overrides `session.user_id`)
        #[arg(short, long, env = "RIDEQUOTE_USER")]
        user: Option<String>,

        /// Print JSON instead of text
        #[arg(long)]
        json: bool,
    },
}

/// Determine log filter level from verbosity count
const fn log_filter_from_verbosity(verbose: u8) -> &'static str {
    match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    }
}

fn load_config(path: Option<&PathBuf>) -> anyhow::Result<AppConfig> {
    let config = match path {
        Some(path) => AppConfig::load_from(path)
            .with_context(|| format!("failed to load {}", path.display()))?,
        None => AppConfig::load().context("failed to load configuration")?,
    };
    Ok(config)
}

/// Type both addresses, wait for the lookups and the route
///
/// With `auto_resolve` off only suggestions arrive, so the best suggestion
/// is selected for any field that is still unresolved.
async fn plan_trip(
    planner: &TripPlanner,
    pickup: &str,
    dropoff: &str,
    timeout: Duration,
) -> TripSnapshot {
    planner.pickup().on_input_change(pickup);
    planner.dropoff().on_input_change(dropoff);
    let snapshot = planner.settled(timeout).await;

    let mut picked = false;
    for (field, resolver) in [
        (&snapshot.pickup, planner.pickup()),
        (&snapshot.dropoff, planner.dropoff()),
    ] {
        if !field.field.is_resolved() && resolver.select_suggestion(0).is_some() {
            debug!(field = resolver.name(), "Selected best suggestion");
            picked = true;
        }
    }

    if picked {
        planner.settled(timeout).await
    } else {
        snapshot
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let mut config = load_config(cli.config.as_ref())?;
    config.logging.filter = log_filter_from_verbosity(cli.verbose).to_string();
    init_logging(&config.logging)?;

    match cli.command {
        Commands::Suggest { text, timeout_secs } => {
            let planner = build_trip_planner(&config, None)?;
            planner.pickup().on_input_change(&text);
            let field = planner
                .pickup()
                .settled(Duration::from_secs(timeout_secs))
                .await;

            if field.suggestions.is_empty() {
                bail!("no places found for '{text}'");
            }
            println!("{}", output::format_suggestions(&field.suggestions));
        },

        Commands::Quote {
            pickup,
            dropoff,
            timeout_secs,
        } => {
            let planner = build_trip_planner(&config, None)?;
            let snapshot =
                plan_trip(&planner, &pickup, &dropoff, Duration::from_secs(timeout_secs)).await;

            let text = output::format_trip(&snapshot).map_err(anyhow::Error::msg)?;
            println!("{text}");
        },

        Commands::Fare {
            distance_km,
            duration_min,
        } => {
            if !(distance_km.is_finite() && duration_min.is_finite())
                || distance_km < 0.0
                || duration_min < 0.0
            {
                bail!("distance and duration must be non-negative numbers");
            }
            config.fare.validate()?;
            println!("{}", config.fare.fare(distance_km, duration_min));
        },

        Commands::RideTypes => {
            println!("{}", output::format_ride_types());
        },

        Commands::Book {
            pickup,
            dropoff,
            ride_type,
            at,
            user,
            timeout_secs,
        } => {
            let booking = build_booking_service(&config, user.as_deref())?;
            let planner = build_trip_planner(&config, None)?;
            let snapshot =
                plan_trip(&planner, &pickup, &dropoff, Duration::from_secs(timeout_secs)).await;

            let quote = output::format_trip(&snapshot).map_err(anyhow::Error::msg)?;
            let ride = booking.book(&snapshot, ride_type, at).await?;
            planner.reset();

            println!("{quote}");
            println!();
            println!("{}", output::format_ride(&ride));
        },

        Commands::Rides { user, json } => {
            let booking = build_booking_service(&config, user.as_deref())?;
            let rides = booking.history().await?;

            if json {
                println!("{}", serde_json::to_string_pretty(&rides)?);
            } else if rides.is_empty() {
                println!("No rides booked yet");
            } else {
                for ride in &rides {
                    println!("{}", output::format_ride(ride));
                    println!();
                }
            }
        },
    }

    Ok(())
}
