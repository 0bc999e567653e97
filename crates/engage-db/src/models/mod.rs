//! Database models - rows as SQLx sees them

mod content;
mod reaction;
mod user;

pub use content::{CachedCountModel, ContentModel};
pub use reaction::{ReactionCountModel, ReactionGroupModel, ReactionModel};
pub use user::UserModel;
