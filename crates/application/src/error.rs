//! Application-level errors

use domain::DomainError;
use thiserror::Error;

/// Errors that can occur in the application layer
#[derive(Debug, Error)]
pub enum ApplicationError {
    /// Domain-level error
    #[error(transparent)]
    Domain(#[from] DomainError),

    /// Transport or service failure of an external collaborator
    #[error("External service error: {0}")]
    ExternalService(String),

    /// The service answered with zero candidates
    #[error("No results: {0}")]
    NoResults(String),

    /// The service answered with something we could not understand
    #[error("Malformed response: {0}")]
    MalformedResponse(String),

    /// No signed-in user
    #[error("Not authorized: {0}")]
    NotAuthorized(String),

    /// Booking attempted without a current route and fare
    #[error("No current quote: {0}")]
    NoQuote(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Internal error
    #[error("Internal error: {0}")]
    Internal(String),
}

impl ApplicationError {
    /// Check if this error is worth retrying (on the next user action)
    pub const fn is_retryable(&self) -> bool {
        matches!(self, Self::ExternalService(_))
    }

    /// Whether the error belongs to the lookup failure taxonomy
    /// (transport failure, empty result, malformed response)
    pub const fn is_lookup_failure(&self) -> bool {
        matches!(
            self,
            Self::ExternalService(_) | Self::NoResults(_) | Self::MalformedResponse(_)
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lookup_failures() {
        assert!(ApplicationError::ExternalService("down".into()).is_lookup_failure());
        assert!(ApplicationError::NoResults("Paris".into()).is_lookup_failure());
        assert!(ApplicationError::MalformedResponse("lat".into()).is_lookup_failure());
        assert!(!ApplicationError::NotAuthorized("x".into()).is_lookup_failure());
    }

    #[test]
    fn only_service_errors_retry() {
        assert!(ApplicationError::ExternalService("down".into()).is_retryable());
        assert!(!ApplicationError::NoResults("x".into()).is_retryable());
    }

    #[test]
    fn domain_errors_are_transparent() {
        let err: ApplicationError = DomainError::ValidationError("bad".into()).into();
        assert_eq!(err.to_string(), "Validation failed: bad");
    }
}
