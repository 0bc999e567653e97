//! Domain errors - error types for the domain layer

use thiserror::Error;

use crate::entities::ContentRef;
use crate::value_objects::Snowflake;

/// Domain layer errors
#[derive(Debug, Error)]
pub enum DomainError {
    // =========================================================================
    // Not Found Errors
    // =========================================================================
    #[error("Content not found: {0}")]
    ContentNotFound(ContentRef),

    #[error("Unknown content type: {0}")]
    InvalidContentType(String),

    #[error("User not found: {0}")]
    UserNotFound(Snowflake),

    #[error("Reaction not found on {0}")]
    ReactionNotFound(ContentRef),

    // =========================================================================
    // Validation Errors
    // =========================================================================
    #[error("Validation error: {0}")]
    ValidationError(String),

    #[error("Invalid reaction type: {0}")]
    InvalidReactionKind(String),

    // =========================================================================
    // Conflict Errors
    // =========================================================================
    #[error("Reaction already exists")]
    ReactionAlreadyExists,

    // =========================================================================
    // Infrastructure Errors (wrapped)
    // =========================================================================
    #[error("Database error: {0}")]
    DatabaseError(String),

    #[error("Cache error: {0}")]
    CacheError(String),

    #[error("Internal error: {0}")]
    InternalError(String),
}

impl DomainError {
    /// Get an error code string for API responses
    pub fn code(&self) -> &'static str {
        match self {
            Self::ContentNotFound(_) => "UNKNOWN_CONTENT",
            Self::InvalidContentType(_) => "UNKNOWN_CONTENT_TYPE",
            Self::UserNotFound(_) => "UNKNOWN_USER",
            Self::ReactionNotFound(_) => "UNKNOWN_REACTION",

            Self::ValidationError(_) => "VALIDATION_ERROR",
            Self::InvalidReactionKind(_) => "INVALID_REACTION_TYPE",

            Self::ReactionAlreadyExists => "REACTION_ALREADY_EXISTS",

            Self::DatabaseError(_) => "DATABASE_ERROR",
            Self::CacheError(_) => "CACHE_ERROR",
            Self::InternalError(_) => "INTERNAL_ERROR",
        }
    }

    /// Check if this is a "not found" error
    ///
    /// An unknown content type counts: there is no such content to react to.
    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            Self::ContentNotFound(_)
                | Self::InvalidContentType(_)
                | Self::UserNotFound(_)
                | Self::ReactionNotFound(_)
        )
    }

    /// Check if this is a validation error
    pub fn is_validation(&self) -> bool {
        matches!(self, Self::ValidationError(_) | Self::InvalidReactionKind(_))
    }

    /// Check if this is a conflict error
    pub fn is_conflict(&self) -> bool {
        matches!(self, Self::ReactionAlreadyExists)
    }

    /// Storage-level failures that may succeed on retry
    pub fn is_transient(&self) -> bool {
        matches!(self, Self::DatabaseError(_) | Self::CacheError(_))
    }
}
