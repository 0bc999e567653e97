//! Notification entity - produced for content owners when someone reacts

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::entities::{ContentRef, ReactionKind};
use crate::value_objects::Snowflake;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NotificationKind {
    Reaction,
}

impl NotificationKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Reaction => "reaction",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Notification {
    pub id: Snowflake,
    /// Recipient
    pub user_id: Snowflake,
    pub kind: NotificationKind,
    pub actor_id: Snowflake,
    pub target: ContentRef,
    pub message: String,
    pub created_at: DateTime<Utc>,
}

impl Notification {
    /// Notification telling `owner_id` that `actor` reacted to `target`
    pub fn reaction(
        id: Snowflake,
        owner_id: Snowflake,
        actor_id: Snowflake,
        actor_name: &str,
        target: ContentRef,
        kind: ReactionKind,
    ) -> Self {
        Self {
            id,
            user_id: owner_id,
            kind: NotificationKind::Reaction,
            actor_id,
            target,
            message: format!("{actor_name} reacted {kind} to your {}", target.kind),
            created_at: Utc::now(),
        }
    }
}
