//! Reaction service
//!
//! Implements the per-user reaction toggle and the reaction read paths.
//!
//! Each (content, user) pair is in one of two states: no reaction, or a
//! reaction of exactly one kind. A toggle with kind `K` moves between them:
//!
//! - none -> `K`: insert, counter +1 (201)
//! - `K` -> none: delete, counter -1 (200)
//! - `J` -> `K`: change kind in place, counter untouched (200)
//!
//! After any counter change the cached value is resynchronized from the
//! reaction records, so the count in the response is exact even when the
//! cached value had drifted.

use tracing::{info, instrument, warn};

use engage_core::{
    Content, ContentRef, DomainError, DomainEvent, Notification, Reaction, ReactionKind,
    Snowflake, User,
};

use crate::dto::{
    ContentReactionsResponse, OffsetPagination, ReactionCountResponse, ReactionResponse,
    UserReactionsResponse,
};

use super::context::ServiceContext;
use super::counter::CounterAdjuster;
use super::error::ServiceResult;

const DEFAULT_CONTENT_PAGE: i64 = 50;
const DEFAULT_USER_PAGE: i64 = 20;
const MAX_PAGE: i64 = 100;

/// Which transition a toggle performed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToggleAction {
    Added,
    Removed,
    Updated,
}

impl ToggleAction {
    /// HTTP status reported for this transition
    pub fn status_code(self) -> u16 {
        match self {
            Self::Added => 201,
            Self::Removed | Self::Updated => 200,
        }
    }
}

/// Result of a toggle
#[derive(Debug, Clone)]
pub struct ToggleOutcome {
    pub action: ToggleAction,
    /// The stored reaction, or the removed one for [`ToggleAction::Removed`]
    pub reaction: Reaction,
    /// Authoritative reaction total for the content item after the toggle
    pub reaction_count: i64,
}

/// Reaction service
pub struct ReactionService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> ReactionService<'a> {
    /// Create a new ReactionService
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// Toggle `user_id`'s reaction of `kind` on `target`
    #[instrument(skip(self))]
    pub async fn toggle_reaction(
        &self,
        user_id: Snowflake,
        target: ContentRef,
        kind: ReactionKind,
    ) -> ServiceResult<ToggleOutcome> {
        let content = self.reactable_content(target).await?;
        let user = self.find_user(user_id).await?;

        let existing = self.ctx.reaction_repo().find(target, user_id).await?;

        let outcome = match existing {
            None => self.add(&content, &user, kind).await?,
            Some(current) if current.is_kind(kind) => self.remove(&content, current).await?,
            Some(current) => self.switch(&content, current, kind).await?,
        };

        info!(
            target = %target,
            user_id = %user_id,
            kind = %kind,
            action = ?outcome.action,
            reaction_count = outcome.reaction_count,
            "Reaction toggled"
        );

        self.publish_engagement(&content, outcome.reaction_count).await;

        Ok(outcome)
    }

    /// Remove `user_id`'s reaction on `target` regardless of kind.
    ///
    /// Returns the reaction total after removal.
    #[instrument(skip(self))]
    pub async fn delete_reaction(
        &self,
        user_id: Snowflake,
        target: ContentRef,
    ) -> ServiceResult<i64> {
        let content = self.existing_content(target).await?;

        let reaction = self
            .ctx
            .reaction_repo()
            .find(target, user_id)
            .await?
            .ok_or(DomainError::ReactionNotFound(target))?;

        if !self.ctx.reaction_repo().delete(target, user_id).await? {
            return Err(DomainError::ReactionNotFound(target).into());
        }

        let count = self.settle_count(&content, -1).await;

        info!(target = %target, user_id = %user_id, reaction_count = count, "Reaction deleted");

        self.publish(DomainEvent::reaction_removed(
            target,
            user_id,
            reaction.kind,
            count,
        ))
        .await;
        self.publish_engagement(&content, count).await;

        Ok(count)
    }

    /// Most recent reactions on `target`, counts per kind and the viewer's own reaction
    #[instrument(skip(self))]
    pub async fn get_reactions_by_content(
        &self,
        target: ContentRef,
        viewer: Option<Snowflake>,
        limit: Option<i64>,
    ) -> ServiceResult<ContentReactionsResponse> {
        self.existing_content(target).await?;

        let limit = limit.unwrap_or(DEFAULT_CONTENT_PAGE).clamp(1, MAX_PAGE);
        let reactions = self
            .ctx
            .reaction_repo()
            .find_by_content(target, limit)
            .await?;

        let mut counts = self.ctx.reaction_repo().count_by_kind(target).await?;
        counts.sort_by(|a, b| b.1.cmp(&a.1).then(a.0.cmp(&b.0)));

        let user_reaction = match viewer {
            Some(viewer_id) => self
                .ctx
                .reaction_repo()
                .find(target, viewer_id)
                .await?
                .map(|r| r.kind.as_str().to_string()),
            None => None,
        };

        let total_count = self.ctx.reaction_repo().count_for_content(target).await?;

        Ok(ContentReactionsResponse {
            reactions: reactions.iter().map(ReactionResponse::from).collect(),
            reaction_counts: counts.into_iter().map(ReactionCountResponse::from).collect(),
            user_reaction,
            total_count,
        })
    }

    /// `user_id`'s reactions, newest first, with offset pagination
    #[instrument(skip(self))]
    pub async fn get_user_reactions(
        &self,
        user_id: Snowflake,
        limit: Option<i64>,
        skip: Option<i64>,
    ) -> ServiceResult<UserReactionsResponse> {
        self.find_user(user_id).await?;

        let limit = limit.unwrap_or(DEFAULT_USER_PAGE).clamp(1, MAX_PAGE);
        let skip = skip.unwrap_or(0).max(0);

        let reactions = self
            .ctx
            .reaction_repo()
            .find_by_user(user_id, limit, skip)
            .await?;
        let total = self.ctx.reaction_repo().count_by_user(user_id).await?;

        Ok(UserReactionsResponse {
            pagination: OffsetPagination::new(total, limit, skip, reactions.len()),
            reactions: reactions.iter().map(ReactionResponse::from).collect(),
        })
    }

    // === Transitions ===

    async fn add(
        &self,
        content: &Content,
        user: &User,
        kind: ReactionKind,
    ) -> ServiceResult<ToggleOutcome> {
        let target = content.target;
        let reaction = Reaction::new(self.ctx.generate_id(), target, user, kind);

        match self.ctx.reaction_repo().create(&reaction).await {
            Ok(()) => {}
            // A concurrent toggle from the same user inserted first: the
            // later request wins and sets the kind.
            Err(DomainError::ReactionAlreadyExists) => {
                warn!(target = %target, user_id = %user.id, "Concurrent reaction insert, applying kind");
                return self.overwrite_kind(content, user.id, kind).await;
            }
            Err(e) => return Err(e.into()),
        }

        let count = self.settle_count(content, 1).await;

        self.notify_owner(content, user, kind).await;
        self.publish(DomainEvent::reaction_added(reaction.clone(), count))
            .await;

        Ok(ToggleOutcome {
            action: ToggleAction::Added,
            reaction,
            reaction_count: count,
        })
    }

    async fn remove(&self, content: &Content, current: Reaction) -> ServiceResult<ToggleOutcome> {
        let target = content.target;

        let count = if self.ctx.reaction_repo().delete(target, current.user_id).await? {
            self.settle_count(content, -1).await
        } else {
            // Already removed by a concurrent request that also owns the decrement
            self.fresh_count(content).await
        };

        self.publish(DomainEvent::reaction_removed(
            target,
            current.user_id,
            current.kind,
            count,
        ))
        .await;

        Ok(ToggleOutcome {
            action: ToggleAction::Removed,
            reaction: current,
            reaction_count: count,
        })
    }

    async fn switch(
        &self,
        content: &Content,
        current: Reaction,
        kind: ReactionKind,
    ) -> ServiceResult<ToggleOutcome> {
        let target = content.target;

        if !self
            .ctx
            .reaction_repo()
            .update_kind(target, current.user_id, kind)
            .await?
        {
            return Err(DomainError::ReactionNotFound(target).into());
        }

        let previous = current.kind;
        let mut reaction = current;
        reaction.kind = kind;
        reaction.updated_at = chrono::Utc::now();

        let count = self.fresh_count(content).await;

        self.publish(DomainEvent::reaction_updated(reaction.clone(), previous))
            .await;

        Ok(ToggleOutcome {
            action: ToggleAction::Updated,
            reaction,
            reaction_count: count,
        })
    }

    /// Last-write-wins path after losing an insert race
    async fn overwrite_kind(
        &self,
        content: &Content,
        user_id: Snowflake,
        kind: ReactionKind,
    ) -> ServiceResult<ToggleOutcome> {
        let target = content.target;
        let current = self
            .ctx
            .reaction_repo()
            .find(target, user_id)
            .await?
            .ok_or(DomainError::ReactionNotFound(target))?;

        if current.is_kind(kind) {
            let count = self.fresh_count(content).await;
            return Ok(ToggleOutcome {
                action: ToggleAction::Updated,
                reaction: current,
                reaction_count: count,
            });
        }

        self.switch(content, current, kind).await
    }

    // === Helpers ===

    /// Content that exists and currently accepts reactions
    async fn reactable_content(&self, target: ContentRef) -> ServiceResult<Content> {
        let content = self.existing_content(target).await?;
        if !content.accepts_reactions() {
            return Err(DomainError::ContentNotFound(target).into());
        }
        Ok(content)
    }

    async fn existing_content(&self, target: ContentRef) -> ServiceResult<Content> {
        self.ctx
            .content_repo()
            .find(target)
            .await?
            .ok_or_else(|| DomainError::ContentNotFound(target).into())
    }

    async fn find_user(&self, user_id: Snowflake) -> ServiceResult<User> {
        self.ctx
            .user_repo()
            .find_by_id(user_id)
            .await?
            .ok_or_else(|| DomainError::UserNotFound(user_id).into())
    }

    /// Apply `delta` to the cached counter, then resync it from the records.
    ///
    /// Falls back to the pre-toggle cached value plus `delta` when the
    /// records cannot be counted.
    async fn settle_count(&self, content: &Content, delta: i64) -> i64 {
        let counter = CounterAdjuster::new(self.ctx);
        counter.adjust(content.target, delta).await;
        match counter.resync(content.target).await {
            Some(count) => count,
            None => content.reactions_count.saturating_add(delta).max(0),
        }
    }

    /// Read-only count of the reaction records; cached value on failure
    async fn fresh_count(&self, content: &Content) -> i64 {
        match self
            .ctx
            .reaction_repo()
            .count_for_content(content.target)
            .await
        {
            Ok(count) => count,
            Err(e) => {
                warn!(target = %content.target, error = %e, "Reaction count unavailable, using cached value");
                content.reactions_count.max(0)
            }
        }
    }

    async fn notify_owner(&self, content: &Content, actor: &User, kind: ReactionKind) {
        if content.is_owned_by(actor.id) {
            return;
        }

        let notification = Notification::reaction(
            self.ctx.generate_id(),
            content.owner_id,
            actor.id,
            &actor.username,
            content.target,
            kind,
        );

        if let Err(e) = self.ctx.notification_repo().create(&notification).await {
            warn!(target = %content.target, owner_id = %content.owner_id, error = %e, "Reaction notification failed");
        }
    }

    async fn publish_engagement(&self, content: &Content, reaction_count: i64) {
        if !content.target.kind.has_engagement_snapshot() {
            return;
        }

        // Re-read so comment and vote totals are current; the reaction total
        // always comes from the records.
        let fresh = match self.ctx.content_repo().find(content.target).await {
            Ok(Some(fresh)) => fresh,
            Ok(None) => content.clone(),
            Err(e) => {
                warn!(target = %content.target, error = %e, "Engagement re-read failed");
                content.clone()
            }
        };

        self.publish(DomainEvent::engagement_updated(
            fresh.engagement(reaction_count),
        ))
        .await;
    }

    async fn publish(&self, event: DomainEvent) {
        if let Err(e) = self.ctx.publisher().publish_domain(&event).await {
            warn!(
                event_type = event.event_type(),
                target = %event.target(),
                error = %e,
                "Event broadcast failed"
            );
        }
    }
}

