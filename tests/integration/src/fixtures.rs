//! Test fixtures and data generators

use std::sync::atomic::{AtomicI64, Ordering};

use engage_core::Snowflake;
use serde::{Deserialize, Serialize};

/// Ids unique within one test binary
pub fn unique_id() -> Snowflake {
    static COUNTER: AtomicI64 = AtomicI64::new(1);
    Snowflake::new(100_000 + COUNTER.fetch_add(1, Ordering::SeqCst))
}

// ============================================================================
// Request Types
// ============================================================================

#[derive(Debug, Serialize)]
pub struct ToggleRequest {
    #[serde(rename = "type")]
    pub kind: String,
}

impl ToggleRequest {
    pub fn new(kind: &str) -> Self {
        Self {
            kind: kind.to_string(),
        }
    }
}

// ============================================================================
// Response Types
// ============================================================================

#[derive(Debug, Deserialize)]
pub struct ReactionBody {
    pub id: String,
    pub content_type: String,
    pub content_id: String,
    pub user_id: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub username: String,
}

#[derive(Debug, Deserialize)]
pub struct ToggleBody {
    pub status_code: u16,
    pub reaction_added: bool,
    pub reaction_removed: bool,
    pub reaction_updated: bool,
    pub data: Option<ReactionBody>,
    pub reaction_count: i64,
}

#[derive(Debug, Deserialize)]
pub struct KindCount {
    #[serde(rename = "type")]
    pub kind: String,
    pub count: i64,
}

#[derive(Debug, Deserialize)]
pub struct ContentReactionsBody {
    pub reactions: Vec<ReactionBody>,
    pub reaction_counts: Vec<KindCount>,
    pub user_reaction: Option<String>,
    pub total_count: i64,
}

#[derive(Debug, Deserialize)]
pub struct PaginationBody {
    pub total: i64,
    pub limit: i64,
    pub skip: i64,
    pub has_more: bool,
}

#[derive(Debug, Deserialize)]
pub struct UserReactionsBody {
    pub reactions: Vec<ReactionBody>,
    pub pagination: PaginationBody,
}

#[derive(Debug, Deserialize)]
pub struct DeleteBody {
    pub reaction_count: i64,
}

#[derive(Debug, Deserialize)]
pub struct HealthBody {
    pub status: String,
}

#[derive(Debug, Deserialize)]
pub struct ErrorEnvelope {
    pub error: ErrorDetailBody,
}

#[derive(Debug, Deserialize)]
pub struct ErrorDetailBody {
    pub code: String,
    pub message: String,
}
