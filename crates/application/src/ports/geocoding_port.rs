//! Geocoding port
//!
//! Turns free-form address text into candidate places. The same port shape
//! serves both the suggestion provider (several candidates while typing) and
//! the map lookup provider (the single best match).

use async_trait::async_trait;
use domain::value_objects::{GeoLocation, ResolvedLocation};
#[cfg(test)]
use mockall::automock;
use serde::{Deserialize, Serialize};

use crate::error::ApplicationError;

/// A place returned by a geocoding provider
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GeocodeCandidate {
    /// Primary name (place, POI or street)
    pub name: String,
    /// City, if known
    pub city: Option<String>,
    /// State or region, if known
    pub state: Option<String>,
    /// Country, if known
    pub country: Option<String>,
    /// Provider-formatted full address, if the provider has one
    pub display_name: Option<String>,
    /// Coordinates of the place
    pub location: GeoLocation,
}

impl GeocodeCandidate {
    /// Create a candidate with only a name and a location
    #[must_use]
    pub fn new(name: impl Into<String>, location: GeoLocation) -> Self {
        Self {
            name: name.into(),
            city: None,
            state: None,
            country: None,
            display_name: None,
            location,
        }
    }

    /// Set the city
    #[must_use]
    pub fn with_city(mut self, city: impl Into<String>) -> Self {
        self.city = Some(city.into());
        self
    }

    /// Set the state
    #[must_use]
    pub fn with_state(mut self, state: impl Into<String>) -> Self {
        self.state = Some(state.into());
        self
    }

    /// Set the country
    #[must_use]
    pub fn with_country(mut self, country: impl Into<String>) -> Self {
        self.country = Some(country.into());
        self
    }

    /// Set the provider-formatted full address
    #[must_use]
    pub fn with_display_name(mut self, display_name: impl Into<String>) -> Self {
        self.display_name = Some(display_name.into());
        self
    }

    /// Address shown in the field after selecting this candidate
    ///
    /// `name, city, state, country`, skipping a city equal to the name and a
    /// state equal to the city.
    #[must_use]
    pub fn display_address(&self) -> String {
        let mut parts: Vec<&str> = vec![self.name.as_str()];
        parts.extend(self.secondary_parts());
        join_parts(&parts)
    }

    /// Second line of a suggestion row (everything except the name)
    #[must_use]
    pub fn secondary_line(&self) -> String {
        join_parts(&self.secondary_parts())
    }

    /// Full address, preferring the provider's own formatting
    #[must_use]
    pub fn full_address(&self) -> String {
        self.display_name
            .clone()
            .filter(|d| !d.trim().is_empty())
            .unwrap_or_else(|| self.display_address())
    }

    /// Resolution for a user picking this candidate from the list
    #[must_use]
    pub fn to_selection(&self) -> ResolvedLocation {
        ResolvedLocation::new(self.location, self.display_address())
    }

    /// Resolution for a background lookup of this candidate
    #[must_use]
    pub fn to_lookup(&self) -> ResolvedLocation {
        ResolvedLocation::new(self.location, self.full_address())
    }

    fn secondary_parts(&self) -> Vec<&str> {
        let name = self.name.as_str();
        let city = self.city.as_deref();
        let mut parts = Vec::with_capacity(3);

        if let Some(c) = city.filter(|c| *c != name) {
            parts.push(c);
        }
        if let Some(s) = self.state.as_deref().filter(|s| Some(*s) != city) {
            parts.push(s);
        }
        if let Some(country) = self.country.as_deref() {
            parts.push(country);
        }
        parts
    }
}

fn join_parts(parts: &[&str]) -> String {
    parts
        .iter()
        .map(|p| p.trim())
        .filter(|p| !p.is_empty())
        .collect::<Vec<_>>()
        .join(", ")
}

/// Port for geocoding providers
#[cfg_attr(test, automock)]
#[async_trait]
pub trait GeocodingPort: Send + Sync {
    /// Search for places matching `query`, best match first
    ///
    /// Providers report "nothing found" as `NoResults`; callers treat an
    /// empty vector the same way.
    async fn search(
        &self,
        query: &str,
        limit: u8,
    ) -> Result<Vec<GeocodeCandidate>, ApplicationError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    fn paris() -> GeocodeCandidate {
        GeocodeCandidate::new("Paris", GeoLocation::new(48.8535, 2.3484).unwrap())
            .with_city("Paris")
            .with_state("Ile-de-France")
            .with_country("France")
    }

    #[test]
    fn display_address_skips_city_equal_to_name() {
        assert_eq!(paris().display_address(), "Paris, Ile-de-France, France");
    }

    #[test]
    fn display_address_skips_state_equal_to_city() {
        let c = GeocodeCandidate::new("Marina Beach", GeoLocation::default_center())
            .with_city("Chennai")
            .with_state("Chennai")
            .with_country("India");
        assert_eq!(c.display_address(), "Marina Beach, Chennai, India");
        assert_eq!(c.secondary_line(), "Chennai, India");
    }

    #[test]
    fn display_address_with_only_a_name() {
        let c = GeocodeCandidate::new("Somewhere", GeoLocation::default_center());
        assert_eq!(c.display_address(), "Somewhere");
        assert_eq!(c.secondary_line(), "");
    }

    #[test]
    fn full_address_prefers_provider_formatting() {
        let c = paris().with_display_name("Paris, Île-de-France, France métropolitaine");
        assert_eq!(c.full_address(), "Paris, Île-de-France, France métropolitaine");
        assert_eq!(c.to_selection().display_address(), "Paris, Ile-de-France, France");
    }

    #[test]
    fn full_address_falls_back_to_display_address() {
        let c = paris().with_display_name("   ");
        assert_eq!(c.full_address(), "Paris, Ile-de-France, France");
    }
}
