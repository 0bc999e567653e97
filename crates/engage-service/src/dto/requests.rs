//! Request DTOs for API endpoints
//!
//! All request DTOs implement `Deserialize`; bodies also implement `Validate`.

use serde::Deserialize;
use validator::Validate;

use engage_core::{DomainError, ReactionKind};

/// Toggle reaction request
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct ToggleReactionRequest {
    /// Reaction kind, e.g. `like`
    #[serde(rename = "type")]
    #[validate(length(min = 1, max = 16, message = "Reaction type must be 1-16 characters"))]
    pub kind: String,
}

impl ToggleReactionRequest {
    /// Parse the requested reaction kind
    pub fn reaction_kind(&self) -> Result<ReactionKind, DomainError> {
        self.kind.parse()
    }
}

/// `?limit=&skip=` query parameters for reaction listings
///
/// Listings of a single content item ignore `skip`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PaginationQuery {
    #[serde(default)]
    pub limit: Option<i64>,
    #[serde(default)]
    pub skip: Option<i64>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_toggle_request_uses_type_field() {
        let req: ToggleReactionRequest = serde_json::from_str(r#"{"type":"love"}"#).unwrap();
        assert!(req.validate().is_ok());
        assert_eq!(req.reaction_kind().unwrap(), ReactionKind::Love);
    }

    #[test]
    fn test_toggle_request_rejects_empty_type() {
        let req: ToggleReactionRequest = serde_json::from_str(r#"{"type":""}"#).unwrap();
        assert!(req.validate().is_err());
    }

    #[test]
    fn test_unknown_kind_is_a_validation_error() {
        let req = ToggleReactionRequest {
            kind: "meh".to_string(),
        };
        let err = req.reaction_kind().unwrap_err();
        assert!(err.is_validation());
    }
}
