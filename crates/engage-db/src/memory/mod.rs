//! In-memory storage backend
//!
//! [`MemoryStore`] implements every repository trait over plain maps behind a
//! single mutex. Each trait method takes the lock once, so every method is
//! atomic in the same sense a single SQL statement is. Locks are never held
//! across an `.await`.
//!
//! Besides the traits, the store exposes fixture and inspection helpers and a
//! small set of injectable faults for exercising failure paths.

use std::collections::{BTreeMap, HashMap, HashSet};

use async_trait::async_trait;
use parking_lot::Mutex;

use engage_core::traits::{
    BulkWriteOutcome, ContentRepository, NotificationRepository, ReactionRepository, RepoResult,
    UserRepository,
};
use engage_core::{
    Content, ContentKind, ContentRef, DomainError, Notification, Reaction, ReactionGroup,
    ReactionKind, Snowflake, User,
};

const MAX_PAGE: i64 = 100;

#[derive(Debug, Default)]
struct State {
    users: HashMap<Snowflake, User>,
    contents: BTreeMap<ContentRef, Content>,
    deleted: HashSet<ContentRef>,
    reactions: HashMap<(ContentRef, Snowflake), Reaction>,
    notifications: Vec<Notification>,
    faults: Faults,
}

#[derive(Debug, Default)]
struct Faults {
    counter_writes: bool,
    content_writes: HashSet<ContentRef>,
    notifications: bool,
}

impl State {
    fn counter_write_fails(&self, target: ContentRef) -> bool {
        self.faults.counter_writes || self.faults.content_writes.contains(&target)
    }

    fn rows_of(&self, kind: ContentKind) -> impl Iterator<Item = &Content> {
        self.contents.values().filter(move |c| c.target.kind == kind)
    }
}

fn injected(what: &str) -> DomainError {
    DomainError::DatabaseError(format!("injected failure: {what}"))
}

fn newest_first(reactions: &mut [Reaction]) {
    reactions.sort_by(|a, b| (b.created_at, b.id).cmp(&(a.created_at, a.id)));
}

/// Thread-safe in-memory implementation of all repository traits
#[derive(Debug, Default)]
pub struct MemoryStore {
    state: Mutex<State>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    // ------------------------------------------------------------------
    // Fixtures
    // ------------------------------------------------------------------

    pub fn insert_user(&self, user: User) {
        self.state.lock().users.insert(user.id, user);
    }

    pub fn insert_content(&self, content: Content) {
        let mut state = self.state.lock();
        state.deleted.remove(&content.target);
        state.contents.insert(content.target, content);
    }

    /// Soft-delete: the row keeps its counter but is no longer found
    pub fn soft_delete_content(&self, target: ContentRef) {
        self.state.lock().deleted.insert(target);
    }

    /// Hard-delete: the row and its counter are gone
    pub fn purge_content(&self, target: ContentRef) {
        let mut state = self.state.lock();
        state.deleted.remove(&target);
        state.contents.remove(&target);
    }

    /// Overwrite a cached counter without any clamping or bookkeeping
    pub fn force_reactions_count(&self, target: ContentRef, count: i64) {
        if let Some(content) = self.state.lock().contents.get_mut(&target) {
            content.reactions_count = count;
        }
    }

    /// Remove a reaction row directly, bypassing the counter
    pub fn remove_reaction_raw(&self, target: ContentRef, user_id: Snowflake) -> Option<Reaction> {
        self.state.lock().reactions.remove(&(target, user_id))
    }

    // ------------------------------------------------------------------
    // Inspection
    // ------------------------------------------------------------------

    pub fn reactions_count(&self, target: ContentRef) -> Option<i64> {
        self.state
            .lock()
            .contents
            .get(&target)
            .map(|c| c.reactions_count)
    }

    /// Every cached counter, ordered by content
    pub fn counters(&self) -> Vec<(ContentRef, i64)> {
        self.state
            .lock()
            .contents
            .values()
            .map(|c| (c.target, c.reactions_count))
            .collect()
    }

    pub fn reaction_rows(&self, target: ContentRef) -> Vec<Reaction> {
        let mut rows: Vec<_> = self
            .state
            .lock()
            .reactions
            .values()
            .filter(|r| r.target == target)
            .cloned()
            .collect();
        newest_first(&mut rows);
        rows
    }

    pub fn notifications(&self) -> Vec<Notification> {
        self.state.lock().notifications.clone()
    }

    // ------------------------------------------------------------------
    // Faults
    // ------------------------------------------------------------------

    /// Make every counter write (adjust, set, bulk, zero) fail
    pub fn fail_counter_writes(&self, fail: bool) {
        self.state.lock().faults.counter_writes = fail;
    }

    /// Make counter writes for one item fail
    pub fn fail_content_writes(&self, target: ContentRef) {
        self.state.lock().faults.content_writes.insert(target);
    }

    pub fn fail_notifications(&self, fail: bool) {
        self.state.lock().faults.notifications = fail;
    }
}

#[async_trait]
impl UserRepository for MemoryStore {
    async fn find_by_id(&self, id: Snowflake) -> RepoResult<Option<User>> {
        Ok(self.state.lock().users.get(&id).cloned())
    }
}

#[async_trait]
impl ContentRepository for MemoryStore {
    async fn find(&self, target: ContentRef) -> RepoResult<Option<Content>> {
        let state = self.state.lock();
        if state.deleted.contains(&target) {
            return Ok(None);
        }
        Ok(state.contents.get(&target).cloned())
    }

    async fn adjust_reactions_count(&self, target: ContentRef, delta: i64) -> RepoResult<bool> {
        let mut state = self.state.lock();
        if state.counter_write_fails(target) {
            return Err(injected("adjust"));
        }
        Ok(match state.contents.get_mut(&target) {
            Some(content) => {
                content.reactions_count = content.reactions_count.saturating_add(delta).max(0);
                true
            }
            None => false,
        })
    }

    async fn set_reactions_count(&self, target: ContentRef, count: i64) -> RepoResult<bool> {
        let mut state = self.state.lock();
        if state.counter_write_fails(target) {
            return Err(injected("set"));
        }
        Ok(match state.contents.get_mut(&target) {
            Some(content) => {
                content.reactions_count = count.max(0);
                true
            }
            None => false,
        })
    }

    async fn cached_counts(
        &self,
        kind: ContentKind,
        ids: &[Snowflake],
    ) -> RepoResult<Vec<(Snowflake, i64)>> {
        let state = self.state.lock();
        Ok(ids
            .iter()
            .filter_map(|id| {
                state
                    .contents
                    .get(&ContentRef::new(kind, *id))
                    .map(|c| (*id, c.reactions_count))
            })
            .collect())
    }

    async fn bulk_set_reactions_count(
        &self,
        kind: ContentKind,
        updates: &[(Snowflake, i64)],
    ) -> RepoResult<BulkWriteOutcome> {
        let mut state = self.state.lock();
        let mut outcome = BulkWriteOutcome::default();

        for (id, count) in updates {
            let target = ContentRef::new(kind, *id);
            if state.counter_write_fails(target) {
                outcome.failed += 1;
                continue;
            }
            if let Some(content) = state.contents.get_mut(&target) {
                let value = (*count).max(0);
                if content.reactions_count != value {
                    content.reactions_count = value;
                    outcome.modified += 1;
                }
            }
        }
        Ok(outcome)
    }

    async fn count_changes(
        &self,
        kind: ContentKind,
        updates: &[(Snowflake, i64)],
    ) -> RepoResult<u64> {
        let state = self.state.lock();
        Ok(updates
            .iter()
            .filter(|(id, count)| {
                state
                    .contents
                    .get(&ContentRef::new(kind, *id))
                    .is_some_and(|c| c.reactions_count != (*count).max(0))
            })
            .count() as u64)
    }

    async fn count_stale_nonzero(
        &self,
        kind: ContentKind,
        exclude: &[Snowflake],
    ) -> RepoResult<u64> {
        let exclude: HashSet<_> = exclude.iter().copied().collect();
        let state = self.state.lock();
        Ok(state
            .rows_of(kind)
            .filter(|c| c.reactions_count > 0 && !exclude.contains(&c.target.id))
            .count() as u64)
    }

    async fn sample_stale_nonzero(
        &self,
        kind: ContentKind,
        exclude: &[Snowflake],
        limit: usize,
    ) -> RepoResult<Vec<(Snowflake, i64)>> {
        let exclude: HashSet<_> = exclude.iter().copied().collect();
        let state = self.state.lock();
        Ok(state
            .rows_of(kind)
            .filter(|c| c.reactions_count > 0 && !exclude.contains(&c.target.id))
            .take(limit)
            .map(|c| (c.target.id, c.reactions_count))
            .collect())
    }

    async fn zero_stale_nonzero(
        &self,
        kind: ContentKind,
        exclude: &[Snowflake],
    ) -> RepoResult<u64> {
        let exclude: HashSet<_> = exclude.iter().copied().collect();
        let mut state = self.state.lock();
        if state.faults.counter_writes {
            return Err(injected("zero"));
        }

        let mut zeroed = 0;
        for content in state.contents.values_mut() {
            if content.target.kind == kind
                && content.reactions_count > 0
                && !exclude.contains(&content.target.id)
            {
                content.reactions_count = 0;
                zeroed += 1;
            }
        }
        Ok(zeroed)
    }
}

#[async_trait]
impl ReactionRepository for MemoryStore {
    async fn find(&self, target: ContentRef, user_id: Snowflake) -> RepoResult<Option<Reaction>> {
        Ok(self.state.lock().reactions.get(&(target, user_id)).cloned())
    }

    async fn create(&self, reaction: &Reaction) -> RepoResult<()> {
        let mut state = self.state.lock();
        let key = (reaction.target, reaction.user_id);
        if state.reactions.contains_key(&key) {
            return Err(DomainError::ReactionAlreadyExists);
        }
        state.reactions.insert(key, reaction.clone());
        Ok(())
    }

    async fn update_kind(
        &self,
        target: ContentRef,
        user_id: Snowflake,
        kind: ReactionKind,
    ) -> RepoResult<bool> {
        let mut state = self.state.lock();
        Ok(match state.reactions.get_mut(&(target, user_id)) {
            Some(reaction) => {
                reaction.kind = kind;
                reaction.updated_at = chrono::Utc::now();
                true
            }
            None => false,
        })
    }

    async fn delete(&self, target: ContentRef, user_id: Snowflake) -> RepoResult<bool> {
        Ok(self.state.lock().reactions.remove(&(target, user_id)).is_some())
    }

    async fn count_for_content(&self, target: ContentRef) -> RepoResult<i64> {
        let state = self.state.lock();
        Ok(state.reactions.keys().filter(|(t, _)| *t == target).count() as i64)
    }

    async fn count_by_kind(&self, target: ContentRef) -> RepoResult<Vec<(ReactionKind, i64)>> {
        let mut counts: BTreeMap<ReactionKind, i64> = BTreeMap::new();
        for reaction in self.state.lock().reactions.values() {
            if reaction.target == target {
                *counts.entry(reaction.kind).or_default() += 1;
            }
        }

        let mut counts: Vec<_> = counts.into_iter().collect();
        counts.sort_by(|a, b| b.1.cmp(&a.1).then(a.0.cmp(&b.0)));
        Ok(counts)
    }

    async fn find_by_content(&self, target: ContentRef, limit: i64) -> RepoResult<Vec<Reaction>> {
        let mut rows = self.reaction_rows(target);
        rows.truncate(limit.clamp(1, MAX_PAGE) as usize);
        Ok(rows)
    }

    async fn find_by_user(
        &self,
        user_id: Snowflake,
        limit: i64,
        skip: i64,
    ) -> RepoResult<Vec<Reaction>> {
        let mut rows: Vec<_> = self
            .state
            .lock()
            .reactions
            .values()
            .filter(|r| r.user_id == user_id)
            .cloned()
            .collect();
        newest_first(&mut rows);

        Ok(rows
            .into_iter()
            .skip(skip.max(0) as usize)
            .take(limit.clamp(1, MAX_PAGE) as usize)
            .collect())
    }

    async fn count_by_user(&self, user_id: Snowflake) -> RepoResult<i64> {
        let state = self.state.lock();
        Ok(state.reactions.keys().filter(|(_, u)| *u == user_id).count() as i64)
    }

    async fn group_counts(&self) -> RepoResult<Vec<ReactionGroup>> {
        let mut groups: BTreeMap<ContentRef, i64> = BTreeMap::new();
        for (target, _) in self.state.lock().reactions.keys() {
            *groups.entry(*target).or_default() += 1;
        }

        Ok(groups
            .into_iter()
            .map(|(target, count)| ReactionGroup {
                kind: target.kind,
                content_id: target.id,
                count,
            })
            .collect())
    }
}

#[async_trait]
impl NotificationRepository for MemoryStore {
    async fn create(&self, notification: &Notification) -> RepoResult<()> {
        let mut state = self.state.lock();
        if state.faults.notifications {
            return Err(injected("notification"));
        }
        state.notifications.push(notification.clone());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn post(id: i64) -> ContentRef {
        ContentRef::post(Snowflake::new(id))
    }

    fn store_with_post(id: i64) -> MemoryStore {
        let store = MemoryStore::new();
        store.insert_content(Content::new(post(id), Snowflake::new(1)));
        store
    }

    fn reaction(target: ContentRef, user: i64, kind: ReactionKind) -> Reaction {
        let user = User::new(Snowflake::new(user), format!("user{user}"));
        Reaction::new(Snowflake::new(1000 + user.id.into_inner()), target, &user, kind)
    }

    #[tokio::test]
    async fn test_adjust_clamps_at_zero() {
        let store = store_with_post(1);
        assert!(store.adjust_reactions_count(post(1), 2).await.unwrap());
        assert!(store.adjust_reactions_count(post(1), -5).await.unwrap());
        assert_eq!(store.reactions_count(post(1)), Some(0));

        assert!(!store.adjust_reactions_count(post(2), 1).await.unwrap());
    }

    #[tokio::test]
    async fn test_set_clamps_negative() {
        let store = store_with_post(1);
        assert!(store.set_reactions_count(post(1), -3).await.unwrap());
        assert_eq!(store.reactions_count(post(1)), Some(0));
    }

    #[tokio::test]
    async fn test_unique_reaction_per_user() {
        let store = store_with_post(1);
        ReactionRepository::create(&store, &reaction(post(1), 5, ReactionKind::Like))
            .await
            .unwrap();
        let err = ReactionRepository::create(&store, &reaction(post(1), 5, ReactionKind::Love))
            .await
            .unwrap_err();
        assert!(err.is_conflict());
    }

    #[tokio::test]
    async fn test_bulk_set_skips_unchanged_and_counts_failures() {
        let store = store_with_post(1);
        store.insert_content(Content::new(post(2), Snowflake::new(1)));
        store.insert_content(Content::new(post(3), Snowflake::new(1)));
        store.fail_content_writes(post(3));

        let updates = [(Snowflake::new(1), 0), (Snowflake::new(2), 4), (Snowflake::new(3), 1)];
        assert_eq!(store.count_changes(ContentKind::Post, &updates).await.unwrap(), 2);

        let outcome = store
            .bulk_set_reactions_count(ContentKind::Post, &updates)
            .await
            .unwrap();
        assert_eq!(outcome, BulkWriteOutcome { modified: 1, failed: 1 });
        assert_eq!(store.reactions_count(post(2)), Some(4));
    }

    #[tokio::test]
    async fn test_stale_nonzero() {
        let store = store_with_post(1);
        store.insert_content(Content::new(post(2), Snowflake::new(1)));
        store.force_reactions_count(post(1), 3);
        store.force_reactions_count(post(2), 2);

        let keep = [Snowflake::new(1)];
        assert_eq!(store.count_stale_nonzero(ContentKind::Post, &keep).await.unwrap(), 1);
        assert_eq!(
            store.sample_stale_nonzero(ContentKind::Post, &keep, 10).await.unwrap(),
            vec![(Snowflake::new(2), 2)]
        );
        assert_eq!(store.count_stale_nonzero(ContentKind::Story, &[]).await.unwrap(), 0);

        assert_eq!(store.zero_stale_nonzero(ContentKind::Post, &keep).await.unwrap(), 1);
        assert_eq!(store.reactions_count(post(1)), Some(3));
        assert_eq!(store.reactions_count(post(2)), Some(0));
    }

    #[tokio::test]
    async fn test_group_counts_and_kinds() {
        let store = store_with_post(1);
        for (user, kind) in [(1, ReactionKind::Like), (2, ReactionKind::Love), (3, ReactionKind::Love)] {
            ReactionRepository::create(&store, &reaction(post(1), user, kind))
                .await
                .unwrap();
        }
        ReactionRepository::create(&store, &reaction(ContentRef::comment(Snowflake::new(9)), 1, ReactionKind::Sad))
            .await
            .unwrap();

        let groups = store.group_counts().await.unwrap();
        assert_eq!(groups.len(), 2);
        assert!(groups.iter().any(|g| g.target() == post(1) && g.count == 3));

        let kinds = store.count_by_kind(post(1)).await.unwrap();
        assert_eq!(kinds, vec![(ReactionKind::Love, 2), (ReactionKind::Like, 1)]);
    }

    #[tokio::test]
    async fn test_soft_deleted_content_is_not_found() {
        let store = store_with_post(1);
        store.soft_delete_content(post(1));
        assert!(ContentRepository::find(&store, post(1)).await.unwrap().is_none());
        assert_eq!(store.reactions_count(post(1)), Some(0));
    }
}
