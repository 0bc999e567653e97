//! PostgreSQL implementation of NotificationRepository

use async_trait::async_trait;
use sqlx::PgPool;
use tracing::instrument;

use engage_core::traits::{NotificationRepository, RepoResult};
use engage_core::Notification;

use crate::mappers::NotificationInsert;

use super::error::map_db_error;

#[derive(Clone)]
pub struct PgNotificationRepository {
    pool: PgPool,
}

impl PgNotificationRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl NotificationRepository for PgNotificationRepository {
    #[instrument(skip(self, notification), fields(recipient = %notification.user_id))]
    async fn create(&self, notification: &Notification) -> RepoResult<()> {
        let insert = NotificationInsert::new(notification);

        sqlx::query(
            r#"
            INSERT INTO notifications
                (id, user_id, kind, actor_id, content_type, content_id, message, created_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            "#,
        )
        .bind(insert.id)
        .bind(insert.user_id)
        .bind(insert.kind)
        .bind(insert.actor_id)
        .bind(insert.content_type)
        .bind(insert.content_id)
        .bind(insert.message)
        .bind(insert.created_at)
        .execute(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(())
    }
}
