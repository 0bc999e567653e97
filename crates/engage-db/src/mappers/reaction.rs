//! Reaction row <-> entity mappers

use engage_core::{ContentKind, ContentRef, DomainError, Reaction, ReactionGroup, ReactionKind, Snowflake};

use super::corrupt_row;
use crate::models::{ReactionCountModel, ReactionGroupModel, ReactionModel};

fn parse_content_kind(value: &str) -> Result<ContentKind, DomainError> {
    value.parse().map_err(|_| corrupt_row("content_type", value))
}

fn parse_reaction_kind(value: &str) -> Result<ReactionKind, DomainError> {
    value.parse().map_err(|_| corrupt_row("kind", value))
}

impl TryFrom<ReactionModel> for Reaction {
    type Error = DomainError;

    fn try_from(model: ReactionModel) -> Result<Self, Self::Error> {
        let kind = parse_content_kind(&model.content_type)?;
        Ok(Reaction {
            id: Snowflake::new(model.id),
            target: ContentRef::new(kind, Snowflake::new(model.content_id)),
            user_id: Snowflake::new(model.user_id),
            kind: parse_reaction_kind(&model.kind)?,
            username: model.username,
            avatar: model.avatar,
            created_at: model.created_at,
            updated_at: model.updated_at,
        })
    }
}

impl TryFrom<ReactionGroupModel> for ReactionGroup {
    type Error = DomainError;

    fn try_from(model: ReactionGroupModel) -> Result<Self, Self::Error> {
        Ok(ReactionGroup {
            kind: parse_content_kind(&model.content_type)?,
            content_id: Snowflake::new(model.content_id),
            count: model.count,
        })
    }
}

pub fn kind_count_from_model(model: ReactionCountModel) -> Result<(ReactionKind, i64), DomainError> {
    Ok((parse_reaction_kind(&model.kind)?, model.count))
}

/// Reaction values prepared for an INSERT
pub struct ReactionInsert<'a> {
    pub id: i64,
    pub content_type: &'static str,
    pub content_id: i64,
    pub user_id: i64,
    pub kind: &'static str,
    pub username: &'a str,
    pub avatar: Option<&'a str>,
}

impl<'a> ReactionInsert<'a> {
    pub fn new(reaction: &'a Reaction) -> Self {
        Self {
            id: reaction.id.into_inner(),
            content_type: reaction.target.kind.as_str(),
            content_id: reaction.target.id.into_inner(),
            user_id: reaction.user_id.into_inner(),
            kind: reaction.kind.as_str(),
            username: &reaction.username,
            avatar: reaction.avatar.as_deref(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn row(content_type: &str, kind: &str) -> ReactionModel {
        ReactionModel {
            id: 1,
            content_type: content_type.to_string(),
            content_id: 2,
            user_id: 3,
            kind: kind.to_string(),
            username: "kim".to_string(),
            avatar: None,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn test_row_to_reaction() {
        let reaction = Reaction::try_from(row("comment", "sad")).unwrap();
        assert_eq!(reaction.target, ContentRef::comment(Snowflake::new(2)));
        assert_eq!(reaction.kind, ReactionKind::Sad);
        assert_eq!(reaction.user_id, Snowflake::new(3));
    }

    #[test]
    fn test_corrupt_row_is_database_error() {
        let err = Reaction::try_from(row("reel", "sad")).unwrap_err();
        assert!(err.is_transient());
        let err = Reaction::try_from(row("post", "meh")).unwrap_err();
        assert!(err.to_string().contains("meh"));
    }

    #[test]
    fn test_insert_values() {
        let reaction = Reaction::try_from(row("poll", "wow")).unwrap();
        let insert = ReactionInsert::new(&reaction);
        assert_eq!(insert.content_type, "poll");
        assert_eq!(insert.kind, "wow");
        assert_eq!(insert.username, "kim");
    }
}
