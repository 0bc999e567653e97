//! Service layer error types

use engage_core::DomainError;

/// Service layer error type
#[derive(Debug, thiserror::Error)]
pub enum ServiceError {
    /// Domain rule violation or storage failure surfaced through a port
    #[error(transparent)]
    Domain(#[from] DomainError),

    /// Invalid input or wiring detected by the service itself
    #[error("Validation error: {0}")]
    Validation(String),
}

impl ServiceError {
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// HTTP status code for this error
    pub fn status_code(&self) -> u16 {
        match self {
            Self::Domain(e) if e.is_not_found() => 404,
            Self::Domain(e) if e.is_validation() => 400,
            Self::Domain(e) if e.is_conflict() => 409,
            Self::Domain(_) => 500,
            Self::Validation(_) => 400,
        }
    }

    /// Error code for API responses
    pub fn error_code(&self) -> &str {
        match self {
            Self::Domain(e) => e.code(),
            Self::Validation(_) => "VALIDATION_ERROR",
        }
    }
}

/// Result type for service operations
pub type ServiceResult<T> = Result<T, ServiceError>;

#[cfg(test)]
mod tests {
    use super::*;
    use engage_core::{ContentRef, Snowflake};

    #[test]
    fn test_domain_errors_map_to_status() {
        let missing: ServiceError =
            DomainError::ContentNotFound(ContentRef::story(Snowflake::new(9))).into();
        assert_eq!(missing.status_code(), 404);
        assert_eq!(missing.error_code(), "UNKNOWN_CONTENT");

        let bad_kind: ServiceError = DomainError::InvalidReactionKind("meh".into()).into();
        assert_eq!(bad_kind.status_code(), 400);
        assert_eq!(bad_kind.error_code(), "INVALID_REACTION_TYPE");

        let race: ServiceError = DomainError::ReactionAlreadyExists.into();
        assert_eq!(race.status_code(), 409);

        let storage: ServiceError = DomainError::DatabaseError("down".into()).into();
        assert_eq!(storage.status_code(), 500);
    }

    #[test]
    fn test_validation_error() {
        let err = ServiceError::validation("publisher is required");
        assert_eq!(err.status_code(), 400);
        assert_eq!(err.error_code(), "VALIDATION_ERROR");
        assert!(err.to_string().contains("publisher is required"));
    }

    #[test]
    fn test_domain_message_is_kept() {
        let err: ServiceError = DomainError::ReactionAlreadyExists.into();
        assert_eq!(err.to_string(), DomainError::ReactionAlreadyExists.to_string());
    }
}
