//! Resolved location value object

use std::fmt;

use serde::{Deserialize, Serialize};

use super::GeoLocation;

/// A coordinate together with the address text it was resolved from
///
/// Produced once per resolution step and superseded by the next one.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResolvedLocation {
    location: GeoLocation,
    display_address: String,
}

impl ResolvedLocation {
    /// Create a resolved location
    #[must_use]
    pub fn new(location: GeoLocation, display_address: impl Into<String>) -> Self {
        Self {
            location,
            display_address: display_address.into(),
        }
    }

    /// The resolved coordinate
    #[must_use]
    pub const fn location(&self) -> GeoLocation {
        self.location
    }

    /// Human-readable address shown next to the marker
    #[must_use]
    pub fn display_address(&self) -> &str {
        &self.display_address
    }
}

impl fmt::Display for ResolvedLocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.display_address, self.location)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn exposes_location_and_address() {
        let loc = GeoLocation::new(51.5014, -0.1419).unwrap();
        let resolved = ResolvedLocation::new(loc, "Buckingham Palace, London");
        assert_eq!(resolved.location(), loc);
        assert_eq!(resolved.display_address(), "Buckingham Palace, London");
    }

    #[test]
    fn display_includes_address_and_coordinates() {
        let loc = GeoLocation::new(51.5014, -0.1419).unwrap();
        let resolved = ResolvedLocation::new(loc, "Buckingham Palace");
        let text = resolved.to_string();
        assert!(text.starts_with("Buckingham Palace ("));
        assert!(text.contains("51.501400"));
    }
}
