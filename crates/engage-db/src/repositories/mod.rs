//! Repository implementations
//!
//! PostgreSQL implementations of the repository traits defined in engage-core.

mod content;
mod error;
mod notification;
mod reaction;
mod user;

pub use content::PgContentRepository;
pub use notification::PgNotificationRepository;
pub use reaction::PgReactionRepository;
pub use user::PgUserRepository;
