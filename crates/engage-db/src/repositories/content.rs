//! PostgreSQL implementation of ContentRepository
//!
//! Each content kind lives in its own table. [`table`] is the single place
//! where a kind is mapped to SQL; every query below is built from it.

use async_trait::async_trait;
use futures::stream::{self, StreamExt};
use sqlx::PgPool;
use tracing::{instrument, warn};

use engage_core::traits::{BulkWriteOutcome, ContentRepository, RepoResult};
use engage_core::{Content, ContentKind, ContentRef, Snowflake};

use crate::mappers::content_from_model;
use crate::models::{CachedCountModel, ContentModel};

use super::error::{map_db_error, non_negative};

const DEFAULT_BULK_CONCURRENCY: usize = 16;

fn table(kind: ContentKind) -> &'static str {
    match kind {
        ContentKind::Post => "posts",
        ContentKind::Story => "stories",
        ContentKind::Poll => "polls",
        ContentKind::Comment => "comments",
    }
}

fn votes_column(kind: ContentKind) -> &'static str {
    if kind.has_votes() {
        "votes_count"
    } else {
        "NULL::BIGINT AS votes_count"
    }
}

fn raw_ids(ids: &[Snowflake]) -> Vec<i64> {
    ids.iter().map(|id| id.into_inner()).collect()
}

/// PostgreSQL implementation of ContentRepository
#[derive(Clone)]
pub struct PgContentRepository {
    pool: PgPool,
    bulk_concurrency: usize,
}

impl PgContentRepository {
    pub fn new(pool: PgPool) -> Self {
        Self {
            pool,
            bulk_concurrency: DEFAULT_BULK_CONCURRENCY,
        }
    }

    /// Maximum number of in-flight statements during a bulk overwrite
    #[must_use]
    pub fn with_bulk_concurrency(mut self, concurrency: usize) -> Self {
        self.bulk_concurrency = concurrency.max(1);
        self
    }
}

#[async_trait]
impl ContentRepository for PgContentRepository {
    #[instrument(skip(self))]
    async fn find(&self, target: ContentRef) -> RepoResult<Option<Content>> {
        let sql = format!(
            "SELECT id, author_id, status, reactions_count, comments_count, {} \
             FROM {} WHERE id = $1 AND deleted_at IS NULL",
            votes_column(target.kind),
            table(target.kind),
        );

        let result = sqlx::query_as::<_, ContentModel>(&sql)
            .bind(target.id.into_inner())
            .fetch_optional(&self.pool)
            .await
            .map_err(map_db_error)?;

        Ok(result.map(|model| content_from_model(target.kind, model)))
    }

    #[instrument(skip(self))]
    async fn adjust_reactions_count(&self, target: ContentRef, delta: i64) -> RepoResult<bool> {
        // Single statement: the clamp and the write cannot be interleaved
        let sql = format!(
            "UPDATE {} SET reactions_count = GREATEST(0, reactions_count + $2) WHERE id = $1",
            table(target.kind),
        );

        let result = sqlx::query(&sql)
            .bind(target.id.into_inner())
            .bind(delta)
            .execute(&self.pool)
            .await
            .map_err(map_db_error)?;

        Ok(result.rows_affected() > 0)
    }

    #[instrument(skip(self))]
    async fn set_reactions_count(&self, target: ContentRef, count: i64) -> RepoResult<bool> {
        let sql = format!(
            "UPDATE {} SET reactions_count = GREATEST(0, $2) WHERE id = $1",
            table(target.kind),
        );

        let result = sqlx::query(&sql)
            .bind(target.id.into_inner())
            .bind(count)
            .execute(&self.pool)
            .await
            .map_err(map_db_error)?;

        Ok(result.rows_affected() > 0)
    }

    #[instrument(skip(self, ids), fields(ids = ids.len()))]
    async fn cached_counts(
        &self,
        kind: ContentKind,
        ids: &[Snowflake],
    ) -> RepoResult<Vec<(Snowflake, i64)>> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }

        let sql = format!(
            "SELECT id, reactions_count FROM {} WHERE id = ANY($1)",
            table(kind),
        );

        let rows = sqlx::query_as::<_, CachedCountModel>(&sql)
            .bind(raw_ids(ids))
            .fetch_all(&self.pool)
            .await
            .map_err(map_db_error)?;

        Ok(rows
            .into_iter()
            .map(|row| (Snowflake::new(row.id), row.reactions_count))
            .collect())
    }

    #[instrument(skip(self, updates), fields(updates = updates.len()))]
    async fn bulk_set_reactions_count(
        &self,
        kind: ContentKind,
        updates: &[(Snowflake, i64)],
    ) -> RepoResult<BulkWriteOutcome> {
        // Rows already holding the target value are left untouched, so a
        // repeated run reports zero modifications.
        let sql = format!(
            "UPDATE {} SET reactions_count = $2 WHERE id = $1 AND reactions_count <> $2",
            table(kind),
        );

        let outcome = stream::iter(updates.iter().copied())
            .map(|(id, count)| {
                let sql = sql.as_str();
                let pool = &self.pool;
                async move {
                    let result = sqlx::query(sql)
                        .bind(id.into_inner())
                        .bind(count.max(0))
                        .execute(pool)
                        .await;
                    (id, result)
                }
            })
            .buffer_unordered(self.bulk_concurrency)
            .fold(BulkWriteOutcome::default(), |mut acc, (id, result)| async move {
                match result {
                    Ok(done) => acc.modified += done.rows_affected(),
                    Err(e) => {
                        warn!(kind = %kind, id = %id, error = %e, "Bulk counter write failed");
                        acc.failed += 1;
                    }
                }
                acc
            })
            .await;

        Ok(outcome)
    }

    #[instrument(skip(self, updates), fields(updates = updates.len()))]
    async fn count_changes(
        &self,
        kind: ContentKind,
        updates: &[(Snowflake, i64)],
    ) -> RepoResult<u64> {
        if updates.is_empty() {
            return Ok(0);
        }

        let sql = format!(
            "SELECT COUNT(*) FROM {} AS t \
             JOIN UNNEST($1::BIGINT[], $2::BIGINT[]) AS u(id, cnt) ON t.id = u.id \
             WHERE t.reactions_count <> GREATEST(0, u.cnt)",
            table(kind),
        );

        let (ids, counts): (Vec<i64>, Vec<i64>) = updates
            .iter()
            .map(|(id, count)| (id.into_inner(), *count))
            .unzip();

        let changed = sqlx::query_scalar::<_, i64>(&sql)
            .bind(ids)
            .bind(counts)
            .fetch_one(&self.pool)
            .await
            .map_err(map_db_error)?;

        Ok(non_negative(changed))
    }

    #[instrument(skip(self, exclude), fields(exclude = exclude.len()))]
    async fn count_stale_nonzero(
        &self,
        kind: ContentKind,
        exclude: &[Snowflake],
    ) -> RepoResult<u64> {
        let sql = format!(
            "SELECT COUNT(*) FROM {} WHERE reactions_count > 0 AND NOT (id = ANY($1))",
            table(kind),
        );

        let stale = sqlx::query_scalar::<_, i64>(&sql)
            .bind(raw_ids(exclude))
            .fetch_one(&self.pool)
            .await
            .map_err(map_db_error)?;

        Ok(non_negative(stale))
    }

    #[instrument(skip(self, exclude), fields(exclude = exclude.len()))]
    async fn sample_stale_nonzero(
        &self,
        kind: ContentKind,
        exclude: &[Snowflake],
        limit: usize,
    ) -> RepoResult<Vec<(Snowflake, i64)>> {
        if limit == 0 {
            return Ok(Vec::new());
        }

        let sql = format!(
            "SELECT id, reactions_count FROM {} \
             WHERE reactions_count > 0 AND NOT (id = ANY($1)) \
             ORDER BY id LIMIT $2",
            table(kind),
        );

        let rows = sqlx::query_as::<_, CachedCountModel>(&sql)
            .bind(raw_ids(exclude))
            .bind(i64::try_from(limit).unwrap_or(i64::MAX))
            .fetch_all(&self.pool)
            .await
            .map_err(map_db_error)?;

        Ok(rows
            .into_iter()
            .map(|row| (Snowflake::new(row.id), row.reactions_count))
            .collect())
    }

    #[instrument(skip(self, exclude), fields(exclude = exclude.len()))]
    async fn zero_stale_nonzero(
        &self,
        kind: ContentKind,
        exclude: &[Snowflake],
    ) -> RepoResult<u64> {
        let sql = format!(
            "UPDATE {} SET reactions_count = 0 WHERE reactions_count > 0 AND NOT (id = ANY($1))",
            table(kind),
        );

        let result = sqlx::query(&sql)
            .bind(raw_ids(exclude))
            .execute(&self.pool)
            .await
            .map_err(map_db_error)?;

        Ok(result.rows_affected())
    }
}
