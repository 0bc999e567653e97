//! Axum extractors for request handling
//!
//! Custom extractors for the acting user, path targets, validation, and pagination.

mod actor;
mod pagination;
mod path;
mod validated;

pub use actor::{Actor, OptionalActor, USER_ID_HEADER};
pub use pagination::Pagination;
pub use path::{ContentPath, UserIdPath};
pub use validated::ValidatedJson;
