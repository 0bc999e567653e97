//! Content database models (posts, stories, polls, comments)

use sqlx::FromRow;

/// Shared projection over every content table.
///
/// `votes_count` is selected as NULL for tables without a vote counter.
#[derive(Debug, Clone, FromRow)]
pub struct ContentModel {
    pub id: i64,
    pub author_id: i64,
    pub status: String,
    pub reactions_count: i64,
    pub comments_count: i64,
    pub votes_count: Option<i64>,
}

/// `(id, reactions_count)` pair used by the batch jobs
#[derive(Debug, Clone, Copy, FromRow)]
pub struct CachedCountModel {
    pub id: i64,
    pub reactions_count: i64,
}
