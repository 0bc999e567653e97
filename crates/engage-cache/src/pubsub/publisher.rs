//! Redis Pub/Sub publisher.

use async_trait::async_trait;
use redis::AsyncCommands;
use serde::{Deserialize, Serialize};

use engage_core::DomainEvent;

use crate::pool::{RedisPool, RedisResult};
use crate::pubsub::PubSubChannel;

/// Event wrapper for Pub/Sub messages
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PubSubEvent {
    /// Event type name (e.g., "REACTION_ADD", "ENGAGEMENT_UPDATE")
    pub event_type: String,
    /// Event payload
    pub data: serde_json::Value,
}

impl PubSubEvent {
    #[must_use]
    pub fn new(event_type: impl Into<String>, data: serde_json::Value) -> Self {
        Self {
            event_type: event_type.into(),
            data,
        }
    }

    /// Wrap a domain event; the payload is the event's own serialization
    pub fn from_domain(event: &DomainEvent) -> Result<Self, serde_json::Error> {
        Ok(Self::new(event.event_type(), serde_json::to_value(event)?))
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }
}

/// Real-time broadcast port.
///
/// Returns the number of receivers reported by the transport. Callers treat
/// publishing as best effort.
#[async_trait]
pub trait EventPublisher: Send + Sync {
    async fn publish(&self, channel: &PubSubChannel, event: &PubSubEvent) -> RedisResult<u32>;

    /// Publish a domain event on the channel of the content item it concerns
    async fn publish_domain(&self, event: &DomainEvent) -> RedisResult<u32> {
        let channel = PubSubChannel::content(event.target());
        let payload = PubSubEvent::from_domain(event)?;
        self.publish(&channel, &payload).await
    }
}

/// Redis Pub/Sub publisher
#[derive(Clone)]
pub struct Publisher {
    pool: RedisPool,
}

impl Publisher {
    #[must_use]
    pub fn new(pool: RedisPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl EventPublisher for Publisher {
    async fn publish(&self, channel: &PubSubChannel, event: &PubSubEvent) -> RedisResult<u32> {
        let mut conn = self.pool.get().await?;
        let channel_name = channel.name();
        let payload = event.to_json()?;

        let receivers: u32 = conn.publish(&channel_name, &payload).await?;

        tracing::debug!(
            channel = %channel_name,
            event_type = %event.event_type,
            receivers = receivers,
            "Published event"
        );

        Ok(receivers)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use engage_core::{ContentRef, ReactionKind, Snowflake};

    #[test]
    fn test_from_domain_event() {
        let target = ContentRef::poll(Snowflake::new(5));
        let event = DomainEvent::reaction_removed(target, Snowflake::new(6), ReactionKind::Angry, 2);

        let wrapped = PubSubEvent::from_domain(&event).unwrap();
        assert_eq!(wrapped.event_type, "REACTION_REMOVE");
        assert_eq!(wrapped.data["reaction_count"], 2);
        assert_eq!(wrapped.data["user_id"], "6");
    }

    #[test]
    fn test_event_serialization() {
        let event = PubSubEvent::new("ENGAGEMENT_UPDATE", serde_json::json!({"reactions_count": 1}));
        let json = event.to_json().unwrap();
        assert!(json.contains("ENGAGEMENT_UPDATE"));
        assert!(json.contains("reactions_count"));
    }
}
