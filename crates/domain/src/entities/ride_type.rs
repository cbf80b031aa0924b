//! Ride type catalogue

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::errors::DomainError;

/// Vehicle class a rider can request
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RideType {
    /// Affordable rides
    #[default]
    Economy,
    /// Comfortable rides
    Premium,
    /// Extra space
    Suv,
    /// Quick & cheap
    Auto,
}

impl RideType {
    /// Every ride type in display order
    pub const ALL: [Self; 4] = [Self::Economy, Self::Premium, Self::Suv, Self::Auto];

    /// Stable identifier
    #[must_use]
    pub const fn id(self) -> &'static str {
        match self {
            Self::Economy => "economy",
            Self::Premium => "premium",
            Self::Suv => "suv",
            Self::Auto => "auto",
        }
    }

    /// Display name
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Economy => "Economy",
            Self::Premium => "Premium",
            Self::Suv => "SUV",
            Self::Auto => "Auto-rickshaw",
        }
    }

    /// Short description
    #[must_use]
    pub const fn description(self) -> &'static str {
        match self {
            Self::Economy => "Affordable rides",
            Self::Premium => "Comfortable rides",
            Self::Suv => "Extra space",
            Self::Auto => "Quick & cheap",
        }
    }

    /// Listed starting price
    #[must_use]
    pub const fn listed_price(self) -> f64 {
        match self {
            Self::Economy => 8.5,
            Self::Premium => 12.0,
            Self::Suv => 15.0,
            Self::Auto => 5.0,
        }
    }

    /// Typical minutes until a vehicle arrives
    #[must_use]
    pub const fn eta_minutes(self) -> u32 {
        match self {
            Self::Economy => 3,
            Self::Premium => 5,
            Self::Suv => 7,
            Self::Auto => 2,
        }
    }

    /// Passenger seats
    #[must_use]
    pub const fn capacity(self) -> u8 {
        match self {
            Self::Economy | Self::Premium => 4,
            Self::Suv => 6,
            Self::Auto => 3,
        }
    }
}

impl fmt::Display for RideType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

impl FromStr for RideType {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let needle = s.trim().to_lowercase();
        Self::ALL
            .into_iter()
            .find(|t| t.id() == needle || t.name().to_lowercase() == needle)
            .ok_or_else(|| DomainError::UnknownRideType(s.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_ids_and_names() {
        assert_eq!("suv".parse::<RideType>().unwrap(), RideType::Suv);
        assert_eq!("Auto-rickshaw".parse::<RideType>().unwrap(), RideType::Auto);
        assert_eq!(" Premium ".parse::<RideType>().unwrap(), RideType::Premium);
        assert!("limo".parse::<RideType>().is_err());
    }

    #[test]
    fn catalogue_values() {
        assert_eq!(RideType::Suv.capacity(), 6);
        assert_eq!(RideType::Auto.eta_minutes(), 2);
        assert!((RideType::Economy.listed_price() - 8.5).abs() < f64::EPSILON);
        assert_eq!(RideType::default(), RideType::Economy);
    }

    #[test]
    fn display_uses_name() {
        assert_eq!(RideType::Suv.to_string(), "SUV");
    }
}
