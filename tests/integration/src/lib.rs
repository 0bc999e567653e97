//! Integration test utilities for the engagement API
//!
//! Spawns the real Axum application over the in-memory store and drives it
//! with `reqwest`, so these tests need no external services.

pub mod fixtures;
pub mod helpers;

pub use fixtures::*;
pub use helpers::*;
