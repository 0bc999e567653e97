//! Response DTOs for API endpoints
//!
//! All response DTOs implement `Serialize` for JSON output.
//! Snowflake IDs are serialized as strings for JavaScript compatibility.

use chrono::{DateTime, Utc};
use serde::Serialize;

// ============================================================================
// Common Response Types
// ============================================================================

/// Generic API response wrapper
#[derive(Debug, Serialize)]
pub struct ApiResponse<T> {
    pub data: T,
}

impl<T> ApiResponse<T> {
    pub fn new(data: T) -> Self {
        Self { data }
    }
}

/// Offset pagination metadata
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OffsetPagination {
    /// Total number of matching records
    pub total: i64,
    pub limit: i64,
    pub skip: i64,
    /// Whether records exist past this page
    pub has_more: bool,
}

impl OffsetPagination {
    pub fn new(total: i64, limit: i64, skip: i64, returned: usize) -> Self {
        let returned = i64::try_from(returned).unwrap_or(i64::MAX);
        Self {
            total,
            limit,
            skip,
            has_more: skip.saturating_add(returned) < total,
        }
    }
}

// ============================================================================
// Reaction Responses
// ============================================================================

/// A single reaction record
#[derive(Debug, Clone, Serialize)]
pub struct ReactionResponse {
    pub id: String,
    pub content_type: String,
    pub content_id: String,
    pub user_id: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub username: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub avatar: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Number of reactions of one kind
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ReactionCountResponse {
    #[serde(rename = "type")]
    pub kind: String,
    pub count: i64,
}

/// Result of a toggle
///
/// Exactly one of the three flags is set.
#[derive(Debug, Clone, Serialize)]
pub struct ToggleReactionResponse {
    pub status_code: u16,
    pub reaction_added: bool,
    pub reaction_removed: bool,
    pub reaction_updated: bool,
    /// The reaction as stored, or as it was before removal
    pub data: Option<ReactionResponse>,
    pub reaction_count: i64,
}

/// Reactions on one content item
#[derive(Debug, Clone, Serialize)]
pub struct ContentReactionsResponse {
    pub reactions: Vec<ReactionResponse>,
    pub reaction_counts: Vec<ReactionCountResponse>,
    /// Kind the viewer reacted with, if a viewer was given and has reacted
    pub user_reaction: Option<String>,
    pub total_count: i64,
}

/// One user's reactions
#[derive(Debug, Clone, Serialize)]
pub struct UserReactionsResponse {
    pub reactions: Vec<ReactionResponse>,
    pub pagination: OffsetPagination,
}

/// Result of an explicit delete
#[derive(Debug, Clone, Serialize)]
pub struct DeleteReactionResponse {
    pub reaction_count: i64,
}

// ============================================================================
// Health Responses
// ============================================================================

/// Liveness response
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
}

impl HealthResponse {
    pub fn healthy() -> Self {
        Self {
            status: "healthy".to_string(),
            version: env!("CARGO_PKG_VERSION").to_string(),
        }
    }
}

/// Readiness response with per-dependency checks
#[derive(Debug, Serialize)]
pub struct ReadinessResponse {
    pub status: String,
    pub checks: HealthChecks,
}

#[derive(Debug, Serialize)]
pub struct HealthChecks {
    pub database: bool,
    pub redis: bool,
}

impl ReadinessResponse {
    pub fn ready(database: bool, redis: bool) -> Self {
        let status = if database && redis { "ready" } else { "not_ready" };
        Self {
            status: status.to_string(),
            checks: HealthChecks { database, redis },
        }
    }

    pub fn is_ready(&self) -> bool {
        self.checks.database && self.checks.redis
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_offset_pagination_has_more() {
        assert!(OffsetPagination::new(30, 20, 0, 20).has_more);
        assert!(!OffsetPagination::new(30, 20, 20, 10).has_more);
        assert!(!OffsetPagination::new(0, 20, 0, 0).has_more);
    }

    #[test]
    fn test_readiness() {
        assert!(ReadinessResponse::ready(true, true).is_ready());
        let degraded = ReadinessResponse::ready(true, false);
        assert!(!degraded.is_ready());
        assert_eq!(degraded.status, "not_ready");
    }

    #[test]
    fn test_count_serializes_type_field() {
        let json = serde_json::to_value(ReactionCountResponse {
            kind: "like".into(),
            count: 2,
        })
        .unwrap();
        assert_eq!(json, serde_json::json!({"type": "like", "count": 2}));
    }
}
