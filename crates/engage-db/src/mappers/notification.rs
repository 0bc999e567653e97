//! Notification entity -> insert values

use chrono::{DateTime, Utc};
use engage_core::Notification;

pub struct NotificationInsert<'a> {
    pub id: i64,
    pub user_id: i64,
    pub kind: &'static str,
    pub actor_id: i64,
    pub content_type: &'static str,
    pub content_id: i64,
    pub message: &'a str,
    pub created_at: DateTime<Utc>,
}

impl<'a> NotificationInsert<'a> {
    pub fn new(notification: &'a Notification) -> Self {
        Self {
            id: notification.id.into_inner(),
            user_id: notification.user_id.into_inner(),
            kind: notification.kind.as_str(),
            actor_id: notification.actor_id.into_inner(),
            content_type: notification.target.kind.as_str(),
            content_id: notification.target.id.into_inner(),
            message: &notification.message,
            created_at: notification.created_at,
        }
    }
}
