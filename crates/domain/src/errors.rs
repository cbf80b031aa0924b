//! Domain-level errors

use thiserror::Error;

/// Errors that can occur in the domain layer
#[derive(Debug, Error)]
pub enum DomainError {
    /// Latitude or longitude outside the valid range
    #[error("Invalid coordinates: {0}")]
    InvalidCoordinates(String),

    /// Distance or duration that cannot be priced or displayed
    #[error("Invalid route measurement: {0}")]
    InvalidMeasurement(String),

    /// Unknown ride type identifier
    #[error("Unknown ride type: {0}")]
    UnknownRideType(String),

    /// Validation failed
    #[error("Validation failed: {0}")]
    ValidationError(String),

    /// Date/time problem (e.g. scheduling in the past)
    #[error("Invalid date/time: {0}")]
    InvalidDateTime(String),
}

impl DomainError {
    /// Create a measurement error for a named quantity
    pub fn invalid_measurement(quantity: &str, value: f64) -> Self {
        Self::InvalidMeasurement(format!("{quantity} must be finite and non-negative, got {value}"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn invalid_measurement_names_quantity() {
        let err = DomainError::invalid_measurement("distance_meters", -3.0);
        let msg = err.to_string();
        assert!(msg.contains("distance_meters"));
        assert!(msg.contains("-3"));
    }

    #[test]
    fn unknown_ride_type_message() {
        let err = DomainError::UnknownRideType("limo".to_string());
        assert_eq!(err.to_string(), "Unknown ride type: limo");
    }

    #[test]
    fn validation_error_message() {
        let err = DomainError::ValidationError("pickup is required".to_string());
        assert_eq!(err.to_string(), "Validation failed: pickup is required");
    }

    #[test]
    fn invalid_datetime_error_message() {
        let err = DomainError::InvalidDateTime("in the past".to_string());
        assert_eq!(err.to_string(), "Invalid date/time: in the past");
    }
}
