//! # engage-cache
//!
//! Redis connection pool and pub/sub broadcast of reaction events.
//!
//! ## Features
//!
//! - **Connection Pool**: Managed Redis connection pool with deadpool
//! - **Pub/Sub**: Real-time reaction and engagement events, one channel per content item
//! - **Recording publisher**: In-memory [`EventPublisher`] for tests and local runs
//!
//! ## Example
//!
//! ```ignore
//! use engage_cache::{EventPublisher, Publisher, RedisPool, RedisPoolConfig};
//!
//! let pool = RedisPool::new(RedisPoolConfig::default())?;
//! let publisher = Publisher::new(pool);
//! publisher.publish_domain(&event).await?;
//! ```

pub mod pool;
pub mod pubsub;

// Re-export pool types
pub use pool::{RedisPool, RedisPoolConfig, RedisPoolError, RedisResult};

// Re-export pubsub types
pub use pubsub::{
    EventPublisher, PubSubChannel, PubSubEvent, Publisher, RecordingPublisher, BROADCAST_CHANNEL,
    USER_CHANNEL_PREFIX,
};
