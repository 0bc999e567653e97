//! # engage-core
//!
//! Domain layer for engagement counters: reactions, reactable content,
//! repository ports, and domain events.
//! This crate has zero dependencies on infrastructure (database, web framework, etc.).

pub mod entities;
pub mod error;
pub mod events;
pub mod traits;
pub mod value_objects;

// Re-export commonly used types at crate root
pub use entities::{
    Content, ContentKind, ContentRef, ContentStatus, EngagementSnapshot, Notification,
    NotificationKind, Reaction, ReactionGroup, ReactionKind, User,
};
pub use error::DomainError;
pub use events::DomainEvent;
pub use traits::{
    BulkWriteOutcome, ContentRepository, NotificationRepository, ReactionRepository, RepoResult,
    UserRepository,
};
pub use value_objects::{Snowflake, SnowflakeGenerator, SnowflakeParseError, MAX_WORKER_ID};
