//! Domain entities - core business objects

mod content;
mod notification;
mod reaction;
mod user;

pub use content::{Content, ContentKind, ContentRef, ContentStatus, EngagementSnapshot};
pub use notification::{Notification, NotificationKind};
pub use reaction::{Reaction, ReactionGroup, ReactionKind};
pub use user::User;
