//! Map viewport derived from the current endpoints
//!
//! The rendering layer only needs to know what to frame; this module
//! turns the optional pickup/dropoff pair into that decision.

use serde::{Deserialize, Serialize};

use super::GeoLocation;

/// Zoom level used when framing a single point
pub const SINGLE_POINT_ZOOM: u8 = 13;

/// Padding in pixels around fitted bounds
pub const FIT_PADDING_PX: u16 = 50;

/// Axis-aligned bounding box
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MapBounds {
    /// South-west corner
    pub south_west: GeoLocation,
    /// North-east corner
    pub north_east: GeoLocation,
}

impl MapBounds {
    /// Smallest box containing both points
    #[must_use]
    pub fn spanning(a: GeoLocation, b: GeoLocation) -> Self {
        Self {
            south_west: GeoLocation::new_unchecked(
                a.latitude().min(b.latitude()),
                a.longitude().min(b.longitude()),
            ),
            north_east: GeoLocation::new_unchecked(
                a.latitude().max(b.latitude()),
                a.longitude().max(b.longitude()),
            ),
        }
    }

    /// Midpoint of the box
    #[must_use]
    pub fn center(&self) -> GeoLocation {
        GeoLocation::new_unchecked(
            (self.south_west.latitude() + self.north_east.latitude()) / 2.0,
            (self.south_west.longitude() + self.north_east.longitude()) / 2.0,
        )
    }
}

/// What the map should show
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum MapViewport {
    /// Fit both endpoints with padding
    Fit {
        /// Area to frame
        bounds: MapBounds,
        /// Padding in pixels
        padding_px: u16,
    },
    /// Center on a single point
    Center {
        /// Point to center on
        location: GeoLocation,
        /// Zoom level
        zoom: u8,
    },
}

impl MapViewport {
    /// Choose a viewport for the given endpoints
    ///
    /// Falls back to `fallback` (the user's position or the default center)
    /// when neither endpoint is known.
    #[must_use]
    pub fn for_endpoints(
        pickup: Option<GeoLocation>,
        dropoff: Option<GeoLocation>,
        fallback: GeoLocation,
    ) -> Self {
        match (pickup, dropoff) {
            (Some(p), Some(d)) => Self::Fit {
                bounds: MapBounds::spanning(p, d),
                padding_px: FIT_PADDING_PX,
            },
            (Some(only), None) | (None, Some(only)) => Self::Center {
                location: only,
                zoom: SINGLE_POINT_ZOOM,
            },
            (None, None) => Self::Center {
                location: fallback,
                zoom: SINGLE_POINT_ZOOM,
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn downing() -> GeoLocation {
        GeoLocation::new(51.5034, -0.1276).unwrap()
    }

    fn palace() -> GeoLocation {
        GeoLocation::new(51.5014, -0.1419).unwrap()
    }

    #[test]
    fn both_endpoints_fit_bounds() {
        let viewport =
            MapViewport::for_endpoints(Some(downing()), Some(palace()), GeoLocation::default_center());
        let MapViewport::Fit { bounds, padding_px } = viewport else {
            unreachable!("expected fit viewport");
        };
        assert_eq!(padding_px, 50);
        assert!((bounds.south_west.latitude() - 51.5014).abs() < f64::EPSILON);
        assert!((bounds.south_west.longitude() + 0.1419).abs() < f64::EPSILON);
        assert!((bounds.north_east.latitude() - 51.5034).abs() < f64::EPSILON);
        assert!((bounds.north_east.longitude() + 0.1276).abs() < f64::EPSILON);
    }

    #[test]
    fn single_endpoint_centers() {
        let viewport = MapViewport::for_endpoints(None, Some(palace()), GeoLocation::default_center());
        assert_eq!(
            viewport,
            MapViewport::Center {
                location: palace(),
                zoom: 13
            }
        );
    }

    #[test]
    fn no_endpoint_uses_fallback() {
        let viewport = MapViewport::for_endpoints(None, None, GeoLocation::default_center());
        assert_eq!(
            viewport,
            MapViewport::Center {
                location: GeoLocation::default_center(),
                zoom: 13
            }
        );
    }

    #[test]
    fn bounds_center_is_midpoint() {
        let bounds = MapBounds::spanning(downing(), palace());
        let center = bounds.center();
        assert!((center.latitude() - 51.5024).abs() < 1e-9);
    }
}
