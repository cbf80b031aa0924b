//! Plain-text rendering of command results

use application::ports::GeocodeCandidate;
use application::services::TripSnapshot;
use domain::entities::{RideRequest, RideType};

/// Numbered suggestion list with the secondary line indented below each name
pub fn format_suggestions(candidates: &[GeocodeCandidate]) -> String {
    candidates
        .iter()
        .enumerate()
        .map(|(i, c)| {
            let secondary = c.secondary_line();
            if secondary.is_empty() {
                format!("{}. {}", i + 1, c.name)
            } else {
                format!("{}. {}\n   {secondary}", i + 1, c.name)
            }
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Both endpoints and the route summary
///
/// Fails with a user-facing message naming whatever is missing.
pub fn format_trip(trip: &TripSnapshot) -> Result<String, String> {
    let pickup = trip
        .pickup
        .field
        .resolved()
        .ok_or_else(|| format!("could not find pickup '{}'", trip.pickup.field.raw_text()))?;
    let dropoff = trip
        .dropoff
        .field
        .resolved()
        .ok_or_else(|| format!("could not find dropoff '{}'", trip.dropoff.field.raw_text()))?;
    let quote = trip
        .route
        .quote
        .as_ref()
        .ok_or_else(|| "no driving route between pickup and dropoff".to_string())?;

    Ok(format!(
        "Pickup:  {}\nDropoff: {}\nTrip:    {}",
        pickup.display_address(),
        dropoff.display_address(),
        quote.format_summary()
    ))
}

/// Ride type table
pub fn format_ride_types() -> String {
    RideType::ALL
        .iter()
        .map(|t| {
            format!(
                "{:<14} {:<18} from ${:>5.2}  {} min away  {} seats",
                t.name(),
                t.description(),
                t.listed_price(),
                t.eta_minutes(),
                t.capacity()
            )
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Booked ride details
pub fn format_ride(ride: &RideRequest) -> String {
    let when = ride.scheduled_for.map_or_else(
        || "now".to_string(),
        |at| at.format("%Y-%m-%d %H:%M UTC").to_string(),
    );
    format!(
        "Ride {} ({})\n  From:   {}\n  To:     {}\n  Trip:   {:.2} km · {:.0} min · ${:.2}\n  Pickup: {when}",
        ride.id,
        ride.ride_type,
        ride.pickup.display_address(),
        ride.dropoff.display_address(),
        ride.distance_km,
        ride.duration_min.round(),
        ride.fare
    )
}

#[cfg(test)]
mod tests {
    use application::services::{FieldSnapshot, RouteSnapshot};
    use chrono::{TimeZone, Utc};
    use domain::entities::{AddressField, PairState, RouteEstimate, TripQuote};
    use domain::value_objects::{FareSchedule, GeoLocation, MapViewport, ResolvedLocation, UserId};

    use super::*;

    fn downing() -> GeoLocation {
        GeoLocation::new(51.5034, -0.1276).unwrap()
    }

    fn palace() -> GeoLocation {
        GeoLocation::new(51.5014, -0.1419).unwrap()
    }

    fn field(text: &str, resolved: Option<ResolvedLocation>) -> FieldSnapshot {
        let mut field = AddressField::new();
        field.set_text(text);
        if let Some(resolved) = resolved {
            field.apply_geocoded(resolved);
        }
        FieldSnapshot {
            field,
            suggestions: Vec::new(),
            loading: false,
        }
    }

    fn quote() -> TripQuote {
        let route = RouteEstimate::from_meters_seconds(1800.0, 300.0, Vec::new()).unwrap();
        TripQuote::new(downing(), palace(), route, &FareSchedule::default())
    }

    fn trip(with_dropoff: bool) -> TripSnapshot {
        let pickup = field(
            "10 Downing St",
            Some(ResolvedLocation::new(downing(), "10 Downing Street, London")),
        );
        let dropoff = field(
            "Buckingham Palace",
            with_dropoff.then(|| ResolvedLocation::new(palace(), "Buckingham Palace, London")),
        );
        TripSnapshot {
            route: RouteSnapshot {
                pair_state: if with_dropoff {
                    PairState::BothResolved
                } else {
                    PairState::PickupOnly
                },
                pair: with_dropoff.then(|| (downing(), palace())),
                quote: with_dropoff.then(quote),
                loading: false,
            },
            viewport: MapViewport::for_endpoints(
                pickup.location(),
                dropoff.location(),
                GeoLocation::default_center(),
            ),
            pickup,
            dropoff,
        }
    }

    #[test]
    fn trip_shows_summary() {
        let text = format_trip(&trip(true)).unwrap();
        assert!(text.contains("Pickup:  10 Downing Street, London"));
        assert!(text.contains("Dropoff: Buckingham Palace, London"));
        assert!(text.ends_with("1.80 km · 5 min · $6.70"));
    }

    #[test]
    fn trip_names_missing_endpoint() {
        let err = format_trip(&trip(false)).unwrap_err();
        assert_eq!(err, "could not find dropoff 'Buckingham Palace'");
    }

    #[test]
    fn suggestions_are_numbered() {
        let candidates = vec![
            GeocodeCandidate::new("Paris", GeoLocation::new(48.8535, 2.3484).unwrap())
                .with_city("Paris")
                .with_country("France"),
            GeocodeCandidate::new("Nowhere", GeoLocation::new(0.0, 0.0).unwrap()),
        ];
        assert_eq!(format_suggestions(&candidates), "1. Paris\n   France\n2. Nowhere");
    }

    #[test]
    fn ride_types_listed_in_order() {
        let table = format_ride_types();
        let lines: Vec<&str> = table.lines().collect();
        assert_eq!(lines.len(), 4);
        assert!(lines[0].starts_with("Economy"));
        assert!(lines[2].contains("6 seats"));
        assert!(lines[3].starts_with("Auto-rickshaw"));
    }

    #[test]
    fn ride_shows_schedule() {
        let pickup = ResolvedLocation::new(downing(), "10 Downing Street");
        let dropoff = ResolvedLocation::new(palace(), "Buckingham Palace");
        let now = Utc.with_ymd_and_hms(2030, 1, 2, 7, 0, 0).unwrap();
        let at = Utc.with_ymd_and_hms(2030, 1, 2, 8, 30, 0).unwrap();
        let ride = RideRequest::new(
            UserId::new(),
            pickup,
            dropoff,
            &quote(),
            RideType::Premium,
            Some(at),
            now,
        )
        .unwrap();

        let text = format_ride(&ride);
        assert!(text.contains("(Premium)"));
        assert!(text.contains("1.80 km · 5 min · $6.70"));
        assert!(text.ends_with("Pickup: 2030-01-02 08:30 UTC"));
    }
}
