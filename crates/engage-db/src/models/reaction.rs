//! Reaction database models

use chrono::{DateTime, Utc};
use sqlx::FromRow;

/// Database model for the reactions table
#[derive(Debug, Clone, FromRow)]
pub struct ReactionModel {
    pub id: i64,
    pub content_type: String,
    pub content_id: i64,
    pub user_id: i64,
    pub kind: String,
    pub username: String,
    pub avatar: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Per-kind count for one content item
#[derive(Debug, Clone, FromRow)]
pub struct ReactionCountModel {
    pub kind: String,
    pub count: i64,
}

/// Per-item count across the whole table
#[derive(Debug, Clone, FromRow)]
pub struct ReactionGroupModel {
    pub content_type: String,
    pub content_id: i64,
    pub count: i64,
}
