//! Entity to DTO mappers
//!
//! Implements `From` conversions from domain entities to response DTOs.

use engage_core::{Reaction, ReactionKind};

use crate::services::{ToggleAction, ToggleOutcome};

use super::responses::{ReactionCountResponse, ReactionResponse, ToggleReactionResponse};

impl From<&Reaction> for ReactionResponse {
    fn from(reaction: &Reaction) -> Self {
        Self {
            id: reaction.id.to_string(),
            content_type: reaction.target.kind.as_str().to_string(),
            content_id: reaction.target.id.to_string(),
            user_id: reaction.user_id.to_string(),
            kind: reaction.kind.as_str().to_string(),
            username: reaction.username.clone(),
            avatar: reaction.avatar.clone(),
            created_at: reaction.created_at,
            updated_at: reaction.updated_at,
        }
    }
}

impl From<Reaction> for ReactionResponse {
    fn from(reaction: Reaction) -> Self {
        Self::from(&reaction)
    }
}

impl From<(ReactionKind, i64)> for ReactionCountResponse {
    fn from((kind, count): (ReactionKind, i64)) -> Self {
        Self {
            kind: kind.as_str().to_string(),
            count,
        }
    }
}

impl From<ToggleOutcome> for ToggleReactionResponse {
    fn from(outcome: ToggleOutcome) -> Self {
        Self {
            status_code: outcome.action.status_code(),
            reaction_added: outcome.action == ToggleAction::Added,
            reaction_removed: outcome.action == ToggleAction::Removed,
            reaction_updated: outcome.action == ToggleAction::Updated,
            data: Some(ReactionResponse::from(&outcome.reaction)),
            reaction_count: outcome.reaction_count,
        }
    }
}
