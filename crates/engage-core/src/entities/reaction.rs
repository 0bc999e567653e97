//! Reaction entity - one user's reaction to one content item

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::entities::{ContentKind, ContentRef, User};
use crate::error::DomainError;
use crate::value_objects::Snowflake;

/// Closed set of reaction kinds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReactionKind {
    Like,
    Love,
    Laugh,
    Wow,
    Sad,
    Angry,
}

impl ReactionKind {
    pub const ALL: [ReactionKind; 6] = [
        Self::Like,
        Self::Love,
        Self::Laugh,
        Self::Wow,
        Self::Sad,
        Self::Angry,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Like => "like",
            Self::Love => "love",
            Self::Laugh => "laugh",
            Self::Wow => "wow",
            Self::Sad => "sad",
            Self::Angry => "angry",
        }
    }
}

impl fmt::Display for ReactionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ReactionKind {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_ascii_lowercase();
        Self::ALL
            .into_iter()
            .find(|kind| kind.as_str() == normalized)
            .ok_or_else(|| DomainError::InvalidReactionKind(s.to_string()))
    }
}

/// A user's reaction to a content item.
///
/// `(target, user_id)` is unique: a user holds at most one reaction per item.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Reaction {
    pub id: Snowflake,
    pub target: ContentRef,
    pub user_id: Snowflake,
    pub kind: ReactionKind,
    /// Display snapshot taken when the reaction was created
    pub username: String,
    pub avatar: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Reaction {
    /// Create a new reaction carrying a snapshot of the reacting user
    pub fn new(id: Snowflake, target: ContentRef, user: &User, kind: ReactionKind) -> Self {
        let now = Utc::now();
        Self {
            id,
            target,
            user_id: user.id,
            kind,
            username: user.username.clone(),
            avatar: user.avatar.clone(),
            created_at: now,
            updated_at: now,
        }
    }

    #[inline]
    pub fn is_kind(&self, kind: ReactionKind) -> bool {
        self.kind == kind
    }
}

/// Ground-truth reaction count for one content item, as produced by aggregation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReactionGroup {
    pub kind: ContentKind,
    pub content_id: Snowflake,
    pub count: i64,
}

impl ReactionGroup {
    pub fn target(&self) -> ContentRef {
        ContentRef::new(self.kind, self.content_id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn user() -> User {
        User::new(Snowflake::new(100), "ada".to_string())
    }

    #[test]
    fn test_reaction_kind_parse() {
        assert_eq!("like".parse::<ReactionKind>().unwrap(), ReactionKind::Like);
        assert_eq!("ANGRY".parse::<ReactionKind>().unwrap(), ReactionKind::Angry);

        let err = "thumbsup".parse::<ReactionKind>().unwrap_err();
        assert!(err.is_validation());
        assert_eq!(err.code(), "INVALID_REACTION_TYPE");
    }

    #[test]
    fn test_reaction_kind_serde() {
        assert_eq!(serde_json::to_string(&ReactionKind::Laugh).unwrap(), "\"laugh\"");
        let kind: ReactionKind = serde_json::from_str("\"wow\"").unwrap();
        assert_eq!(kind, ReactionKind::Wow);
    }

    #[test]
    fn test_reaction_snapshots_user() {
        let mut user = user();
        user.avatar = Some("a.png".to_string());
        let target = ContentRef::post(Snowflake::new(1));
        let reaction = Reaction::new(Snowflake::new(5), target, &user, ReactionKind::Love);

        assert_eq!(reaction.user_id, Snowflake::new(100));
        assert_eq!(reaction.username, "ada");
        assert_eq!(reaction.avatar.as_deref(), Some("a.png"));
        assert!(reaction.is_kind(ReactionKind::Love));
        assert!(!reaction.is_kind(ReactionKind::Like));
    }

    #[test]
    fn test_group_target() {
        let group = ReactionGroup {
            kind: ContentKind::Comment,
            content_id: Snowflake::new(8),
            count: 3,
        };
        assert_eq!(group.target(), ContentRef::comment(Snowflake::new(8)));
    }
}
