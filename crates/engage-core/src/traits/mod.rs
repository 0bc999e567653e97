//! Repository traits (ports)

mod repositories;

pub use repositories::{
    BulkWriteOutcome, ContentRepository, NotificationRepository, ReactionRepository, RepoResult,
    UserRepository,
};
