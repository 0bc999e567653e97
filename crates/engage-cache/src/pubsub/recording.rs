//! In-memory publisher that records everything it is asked to send

use async_trait::async_trait;
use parking_lot::Mutex;

use crate::pool::{RedisPoolError, RedisResult};
use crate::pubsub::{EventPublisher, PubSubChannel, PubSubEvent};

#[derive(Debug, Default)]
pub struct RecordingPublisher {
    sent: Mutex<Vec<(PubSubChannel, PubSubEvent)>>,
    failing: Mutex<bool>,
}

impl RecordingPublisher {
    pub fn new() -> Self {
        Self::default()
    }

    /// While set, every publish fails as if Redis were unreachable
    pub fn set_failing(&self, failing: bool) {
        *self.failing.lock() = failing;
    }

    pub fn events(&self) -> Vec<(PubSubChannel, PubSubEvent)> {
        self.sent.lock().clone()
    }

    pub fn event_types(&self) -> Vec<String> {
        self.sent
            .lock()
            .iter()
            .map(|(_, event)| event.event_type.clone())
            .collect()
    }

    pub fn clear(&self) {
        self.sent.lock().clear();
    }
}

#[async_trait]
impl EventPublisher for RecordingPublisher {
    async fn publish(&self, channel: &PubSubChannel, event: &PubSubEvent) -> RedisResult<u32> {
        if *self.failing.lock() {
            return Err(RedisPoolError::ConnectionNotAvailable);
        }
        self.sent.lock().push((channel.clone(), event.clone()));
        Ok(1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use engage_core::{ContentRef, DomainEvent, ReactionKind, Snowflake};

    #[tokio::test]
    async fn test_records_domain_events_on_content_channel() {
        let publisher = RecordingPublisher::new();
        let target = ContentRef::story(Snowflake::new(3));
        let event = DomainEvent::reaction_removed(target, Snowflake::new(1), ReactionKind::Like, 0);

        publisher.publish_domain(&event).await.unwrap();

        let events = publisher.events();
        assert_eq!(events.len(), 1);
        assert_eq!(events[0].0.name(), "story:3");
        assert_eq!(publisher.event_types(), vec!["REACTION_REMOVE"]);
    }

    #[tokio::test]
    async fn test_failing_publisher() {
        let publisher = RecordingPublisher::new();
        publisher.set_failing(true);
        let result = publisher
            .publish(&PubSubChannel::Broadcast, &PubSubEvent::new("X", serde_json::Value::Null))
            .await;
        assert!(result.is_err());
        assert!(publisher.events().is_empty());
    }
}
