//! PostgreSQL implementation of ReactionRepository

use async_trait::async_trait;
use sqlx::PgPool;
use tracing::{instrument, warn};

use engage_core::traits::{ReactionRepository, RepoResult};
use engage_core::{ContentRef, DomainError, Reaction, ReactionGroup, ReactionKind, Snowflake};

use crate::mappers::{kind_count_from_model, ReactionInsert};
use crate::models::{ReactionCountModel, ReactionGroupModel, ReactionModel};

use super::error::{map_db_error, map_unique_violation};

const MAX_PAGE: i64 = 100;

/// PostgreSQL implementation of ReactionRepository
#[derive(Clone)]
pub struct PgReactionRepository {
    pool: PgPool,
}

impl PgReactionRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

fn into_reactions(rows: Vec<ReactionModel>) -> RepoResult<Vec<Reaction>> {
    rows.into_iter().map(Reaction::try_from).collect()
}

#[async_trait]
impl ReactionRepository for PgReactionRepository {
    #[instrument(skip(self))]
    async fn find(&self, target: ContentRef, user_id: Snowflake) -> RepoResult<Option<Reaction>> {
        let result = sqlx::query_as::<_, ReactionModel>(
            r#"
            SELECT id, content_type, content_id, user_id, kind, username, avatar, created_at, updated_at
            FROM reactions
            WHERE content_type = $1 AND content_id = $2 AND user_id = $3
            "#,
        )
        .bind(target.kind.as_str())
        .bind(target.id.into_inner())
        .bind(user_id.into_inner())
        .fetch_optional(&self.pool)
        .await
        .map_err(map_db_error)?;

        result.map(Reaction::try_from).transpose()
    }

    #[instrument(skip(self, reaction), fields(target = %reaction.target, user_id = %reaction.user_id))]
    async fn create(&self, reaction: &Reaction) -> RepoResult<()> {
        let insert = ReactionInsert::new(reaction);

        sqlx::query(
            r#"
            INSERT INTO reactions
                (id, content_type, content_id, user_id, kind, username, avatar, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
            "#,
        )
        .bind(insert.id)
        .bind(insert.content_type)
        .bind(insert.content_id)
        .bind(insert.user_id)
        .bind(insert.kind)
        .bind(insert.username)
        .bind(insert.avatar)
        .bind(reaction.created_at)
        .bind(reaction.updated_at)
        .execute(&self.pool)
        .await
        .map_err(|e| map_unique_violation(e, || DomainError::ReactionAlreadyExists))?;

        Ok(())
    }

    #[instrument(skip(self))]
    async fn update_kind(
        &self,
        target: ContentRef,
        user_id: Snowflake,
        kind: ReactionKind,
    ) -> RepoResult<bool> {
        let result = sqlx::query(
            r#"
            UPDATE reactions
            SET kind = $4, updated_at = NOW()
            WHERE content_type = $1 AND content_id = $2 AND user_id = $3
            "#,
        )
        .bind(target.kind.as_str())
        .bind(target.id.into_inner())
        .bind(user_id.into_inner())
        .bind(kind.as_str())
        .execute(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(result.rows_affected() > 0)
    }

    #[instrument(skip(self))]
    async fn delete(&self, target: ContentRef, user_id: Snowflake) -> RepoResult<bool> {
        let result = sqlx::query(
            r#"
            DELETE FROM reactions
            WHERE content_type = $1 AND content_id = $2 AND user_id = $3
            "#,
        )
        .bind(target.kind.as_str())
        .bind(target.id.into_inner())
        .bind(user_id.into_inner())
        .execute(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(result.rows_affected() > 0)
    }

    #[instrument(skip(self))]
    async fn count_for_content(&self, target: ContentRef) -> RepoResult<i64> {
        sqlx::query_scalar::<_, i64>(
            r#"
            SELECT COUNT(*) FROM reactions WHERE content_type = $1 AND content_id = $2
            "#,
        )
        .bind(target.kind.as_str())
        .bind(target.id.into_inner())
        .fetch_one(&self.pool)
        .await
        .map_err(map_db_error)
    }

    #[instrument(skip(self))]
    async fn count_by_kind(&self, target: ContentRef) -> RepoResult<Vec<(ReactionKind, i64)>> {
        let results = sqlx::query_as::<_, ReactionCountModel>(
            r#"
            SELECT kind, COUNT(*) AS count
            FROM reactions
            WHERE content_type = $1 AND content_id = $2
            GROUP BY kind
            ORDER BY count DESC, kind
            "#,
        )
        .bind(target.kind.as_str())
        .bind(target.id.into_inner())
        .fetch_all(&self.pool)
        .await
        .map_err(map_db_error)?;

        results.into_iter().map(kind_count_from_model).collect()
    }

    #[instrument(skip(self))]
    async fn find_by_content(&self, target: ContentRef, limit: i64) -> RepoResult<Vec<Reaction>> {
        let rows = sqlx::query_as::<_, ReactionModel>(
            r#"
            SELECT id, content_type, content_id, user_id, kind, username, avatar, created_at, updated_at
            FROM reactions
            WHERE content_type = $1 AND content_id = $2
            ORDER BY created_at DESC, id DESC
            LIMIT $3
            "#,
        )
        .bind(target.kind.as_str())
        .bind(target.id.into_inner())
        .bind(limit.clamp(1, MAX_PAGE))
        .fetch_all(&self.pool)
        .await
        .map_err(map_db_error)?;

        into_reactions(rows)
    }

    #[instrument(skip(self))]
    async fn find_by_user(
        &self,
        user_id: Snowflake,
        limit: i64,
        skip: i64,
    ) -> RepoResult<Vec<Reaction>> {
        let rows = sqlx::query_as::<_, ReactionModel>(
            r#"
            SELECT id, content_type, content_id, user_id, kind, username, avatar, created_at, updated_at
            FROM reactions
            WHERE user_id = $1
            ORDER BY created_at DESC, id DESC
            LIMIT $2 OFFSET $3
            "#,
        )
        .bind(user_id.into_inner())
        .bind(limit.clamp(1, MAX_PAGE))
        .bind(skip.max(0))
        .fetch_all(&self.pool)
        .await
        .map_err(map_db_error)?;

        into_reactions(rows)
    }

    #[instrument(skip(self))]
    async fn count_by_user(&self, user_id: Snowflake) -> RepoResult<i64> {
        sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM reactions WHERE user_id = $1")
            .bind(user_id.into_inner())
            .fetch_one(&self.pool)
            .await
            .map_err(map_db_error)
    }

    #[instrument(skip(self))]
    async fn group_counts(&self) -> RepoResult<Vec<ReactionGroup>> {
        let rows = sqlx::query_as::<_, ReactionGroupModel>(
            r#"
            SELECT content_type, content_id, COUNT(*) AS count
            FROM reactions
            GROUP BY content_type, content_id
            "#,
        )
        .fetch_all(&self.pool)
        .await
        .map_err(map_db_error)?;

        let mut groups = Vec::with_capacity(rows.len());
        for row in rows {
            match ReactionGroup::try_from(row) {
                Ok(group) => groups.push(group),
                // The CHECK constraint makes this unreachable unless the schema was altered
                Err(e) => warn!(error = %e, "Skipping reaction group with unknown content type"),
            }
        }
        Ok(groups)
    }
}
