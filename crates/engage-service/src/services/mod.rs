//! Business logic services
//!
//! Services borrow a [`ServiceContext`] for the duration of one operation.

pub mod context;
pub mod counter;
pub mod error;
pub mod reaction;

pub use context::{ServiceContext, ServiceContextBuilder};
pub use counter::CounterAdjuster;
pub use error::{ServiceError, ServiceResult};
pub use reaction::{ReactionService, ToggleAction, ToggleOutcome};
