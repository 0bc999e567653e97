//! Content row -> entity mapper

use engage_core::{Content, ContentKind, ContentRef, ContentStatus, Snowflake};

use crate::models::ContentModel;

/// Rows don't carry their kind; it comes from the table that was queried
pub fn content_from_model(kind: ContentKind, model: ContentModel) -> Content {
    Content {
        target: ContentRef::new(kind, Snowflake::new(model.id)),
        owner_id: Snowflake::new(model.author_id),
        status: ContentStatus::from_db(&model.status),
        reactions_count: model.reactions_count,
        comments_count: model.comments_count,
        votes_count: if kind.has_votes() {
            Some(model.votes_count.unwrap_or(0))
        } else {
            None
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn model(votes: Option<i64>) -> ContentModel {
        ContentModel {
            id: 7,
            author_id: 3,
            status: "draft".to_string(),
            reactions_count: 2,
            comments_count: 1,
            votes_count: votes,
        }
    }

    #[test]
    fn test_poll_keeps_votes() {
        let content = content_from_model(ContentKind::Poll, model(Some(9)));
        assert_eq!(content.target, ContentRef::poll(Snowflake::new(7)));
        assert_eq!(content.votes_count, Some(9));
        assert_eq!(content.status, ContentStatus::Draft);
    }

    #[test]
    fn test_non_poll_drops_votes() {
        let content = content_from_model(ContentKind::Story, model(Some(9)));
        assert_eq!(content.votes_count, None);
        assert_eq!(content.owner_id, Snowflake::new(3));
    }
}
