//! Entity to model mappers
//!
//! Conversions between domain entities (engage-core) and database rows.
//! - `From`/`TryFrom<Model> for Entity`: database rows to domain objects
//! - `*Insert` structs: entity data prepared for binding
//!
//! Text columns holding enum values are parsed here; a row with an unknown
//! value is reported as a database error rather than silently coerced.

mod content;
mod notification;
mod reaction;
mod user;

pub use content::content_from_model;
pub use notification::NotificationInsert;
pub use reaction::{kind_count_from_model, ReactionInsert};

use engage_core::DomainError;

fn corrupt_row(column: &str, value: &str) -> DomainError {
    DomainError::DatabaseError(format!("unexpected {column} value in row: {value:?}"))
}
