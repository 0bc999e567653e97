//! Domain events - emitted when reaction state changes
//!
//! These events are pushed to real-time subscribers of the affected content
//! item so clients can refresh counters without a separate fetch.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::entities::{ContentRef, EngagementSnapshot, Reaction, ReactionKind};
use crate::value_objects::Snowflake;

/// All possible domain events
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum DomainEvent {
    ReactionAdded(ReactionAddedEvent),
    ReactionRemoved(ReactionRemovedEvent),
    ReactionUpdated(ReactionUpdatedEvent),
    EngagementUpdated(EngagementUpdatedEvent),
}

impl DomainEvent {
    /// Get the event name used on the wire
    pub fn event_type(&self) -> &'static str {
        match self {
            Self::ReactionAdded(_) => "REACTION_ADD",
            Self::ReactionRemoved(_) => "REACTION_REMOVE",
            Self::ReactionUpdated(_) => "REACTION_UPDATE",
            Self::EngagementUpdated(_) => "ENGAGEMENT_UPDATE",
        }
    }

    /// The content item this event concerns
    pub fn target(&self) -> ContentRef {
        match self {
            Self::ReactionAdded(e) => e.reaction.target,
            Self::ReactionRemoved(e) => e.target,
            Self::ReactionUpdated(e) => e.reaction.target,
            Self::EngagementUpdated(e) => e.engagement.target,
        }
    }

    pub fn timestamp(&self) -> DateTime<Utc> {
        match self {
            Self::ReactionAdded(e) => e.timestamp,
            Self::ReactionRemoved(e) => e.timestamp,
            Self::ReactionUpdated(e) => e.timestamp,
            Self::EngagementUpdated(e) => e.timestamp,
        }
    }

    pub fn reaction_added(reaction: Reaction, reaction_count: i64) -> Self {
        Self::ReactionAdded(ReactionAddedEvent {
            reaction,
            reaction_count,
            timestamp: Utc::now(),
        })
    }

    pub fn reaction_removed(
        target: ContentRef,
        user_id: Snowflake,
        kind: ReactionKind,
        reaction_count: i64,
    ) -> Self {
        Self::ReactionRemoved(ReactionRemovedEvent {
            target,
            user_id,
            kind,
            reaction_count,
            timestamp: Utc::now(),
        })
    }

    pub fn reaction_updated(reaction: Reaction, previous: ReactionKind) -> Self {
        Self::ReactionUpdated(ReactionUpdatedEvent {
            reaction,
            previous,
            timestamp: Utc::now(),
        })
    }

    pub fn engagement_updated(engagement: EngagementSnapshot) -> Self {
        Self::EngagementUpdated(EngagementUpdatedEvent {
            engagement,
            timestamp: Utc::now(),
        })
    }
}

// ============================================================================
// Event Structs
// ============================================================================

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReactionAddedEvent {
    pub reaction: Reaction,
    pub reaction_count: i64,
    pub timestamp: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReactionRemovedEvent {
    pub target: ContentRef,
    pub user_id: Snowflake,
    pub kind: ReactionKind,
    pub reaction_count: i64,
    pub timestamp: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReactionUpdatedEvent {
    pub reaction: Reaction,
    pub previous: ReactionKind,
    pub timestamp: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EngagementUpdatedEvent {
    pub engagement: EngagementSnapshot,
    pub timestamp: DateTime<Utc>,
}
