//! Redis Pub/Sub module.
//!
//! The reaction subsystem is a producer only: events are published to the
//! channel of the content item they concern, with no delivery guarantee.

mod channels;
mod publisher;
mod recording;

pub use channels::{PubSubChannel, BROADCAST_CHANNEL, USER_CHANNEL_PREFIX};
pub use publisher::{EventPublisher, PubSubEvent, Publisher};
pub use recording::RecordingPublisher;
