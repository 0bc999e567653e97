//! Repository traits (ports) - define the interface for data access
//!
//! The domain layer states what the counter subsystem needs from storage;
//! the infrastructure crates provide the implementations.

use async_trait::async_trait;

use crate::entities::{Content, ContentKind, ContentRef, Notification, Reaction, ReactionGroup, ReactionKind, User};
use crate::error::DomainError;
use crate::value_objects::Snowflake;

/// Result type for repository operations
pub type RepoResult<T> = Result<T, DomainError>;

/// Outcome of an unordered bulk write
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BulkWriteOutcome {
    /// Rows whose stored value actually changed
    pub modified: u64,
    /// Individual writes that failed; they never abort the batch
    pub failed: u64,
}

impl BulkWriteOutcome {
    pub fn merge(&mut self, other: BulkWriteOutcome) {
        self.modified += other.modified;
        self.failed += other.failed;
    }
}

// ============================================================================
// User Repository
// ============================================================================

#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Find user by ID
    async fn find_by_id(&self, id: Snowflake) -> RepoResult<Option<User>>;
}

// ============================================================================
// Content Repository
// ============================================================================

/// Access to the cached counters on reactable content.
///
/// Every mutation of `reactions_count` goes through this trait. Implementations
/// must clamp at zero inside the same atomic statement as the write.
#[async_trait]
pub trait ContentRepository: Send + Sync {
    /// Find a live (not deleted) content item
    async fn find(&self, target: ContentRef) -> RepoResult<Option<Content>>;

    /// Atomically apply `delta` to the cached counter, clamped at zero.
    /// Returns false when no such item exists.
    async fn adjust_reactions_count(&self, target: ContentRef, delta: i64) -> RepoResult<bool>;

    /// Overwrite the cached counter with `max(0, count)`.
    /// Returns false when no such item exists.
    async fn set_reactions_count(&self, target: ContentRef, count: i64) -> RepoResult<bool>;

    /// Cached counters for the given ids; ids without a row are omitted
    async fn cached_counts(
        &self,
        kind: ContentKind,
        ids: &[Snowflake],
    ) -> RepoResult<Vec<(Snowflake, i64)>>;

    /// Unordered bulk overwrite. Only rows whose value differs are modified.
    async fn bulk_set_reactions_count(
        &self,
        kind: ContentKind,
        updates: &[(Snowflake, i64)],
    ) -> RepoResult<BulkWriteOutcome>;

    /// How many rows `bulk_set_reactions_count` would modify
    async fn count_changes(
        &self,
        kind: ContentKind,
        updates: &[(Snowflake, i64)],
    ) -> RepoResult<u64>;

    /// Rows with a non-zero counter whose id is not in `exclude`
    async fn count_stale_nonzero(&self, kind: ContentKind, exclude: &[Snowflake])
        -> RepoResult<u64>;

    /// Up to `limit` of the rows counted by `count_stale_nonzero`
    async fn sample_stale_nonzero(
        &self,
        kind: ContentKind,
        exclude: &[Snowflake],
        limit: usize,
    ) -> RepoResult<Vec<(Snowflake, i64)>>;

    /// Zero every row counted by `count_stale_nonzero`; returns rows modified
    async fn zero_stale_nonzero(&self, kind: ContentKind, exclude: &[Snowflake])
        -> RepoResult<u64>;
}

// ============================================================================
// Reaction Repository
// ============================================================================

/// The ground-truth reaction store
#[async_trait]
pub trait ReactionRepository: Send + Sync {
    /// Find a user's reaction on a content item
    async fn find(&self, target: ContentRef, user_id: Snowflake) -> RepoResult<Option<Reaction>>;

    /// Insert a reaction.
    /// Fails with `ReactionAlreadyExists` if the user already reacted to the item.
    async fn create(&self, reaction: &Reaction) -> RepoResult<()>;

    /// Change the kind of an existing reaction; returns false if none exists
    async fn update_kind(
        &self,
        target: ContentRef,
        user_id: Snowflake,
        kind: ReactionKind,
    ) -> RepoResult<bool>;

    /// Delete a user's reaction; returns false if none existed
    async fn delete(&self, target: ContentRef, user_id: Snowflake) -> RepoResult<bool>;

    /// Fresh ground-truth count for one item
    async fn count_for_content(&self, target: ContentRef) -> RepoResult<i64>;

    /// Counts per reaction kind for one item, largest first
    async fn count_by_kind(&self, target: ContentRef) -> RepoResult<Vec<(ReactionKind, i64)>>;

    /// Most recent reactions on an item
    async fn find_by_content(&self, target: ContentRef, limit: i64) -> RepoResult<Vec<Reaction>>;

    /// A user's reactions, newest first
    async fn find_by_user(&self, user_id: Snowflake, limit: i64, skip: i64)
        -> RepoResult<Vec<Reaction>>;

    async fn count_by_user(&self, user_id: Snowflake) -> RepoResult<i64>;

    /// Aggregate every reaction grouped by content item
    async fn group_counts(&self) -> RepoResult<Vec<ReactionGroup>>;
}

// ============================================================================
// Notification Repository
// ============================================================================

#[async_trait]
pub trait NotificationRepository: Send + Sync {
    async fn create(&self, notification: &Notification) -> RepoResult<()>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bulk_outcome_merge() {
        let mut total = BulkWriteOutcome::default();
        total.merge(BulkWriteOutcome { modified: 3, failed: 1 });
        total.merge(BulkWriteOutcome { modified: 2, failed: 0 });
        assert_eq!(total, BulkWriteOutcome { modified: 5, failed: 1 });
    }
}
