//! # engage-db
//!
//! Storage layer implementing the repository traits from `engage-core`.
//!
//! ## Overview
//!
//! - Connection pool management and SQL migrations (PostgreSQL via SQLx)
//! - Database models with SQLx `FromRow` derives and row ↔ entity mappers
//! - `Pg*Repository` implementations
//! - [`MemoryStore`], an in-process implementation of every repository trait
//!   for tests and local runs
//!
//! ## Usage
//!
//! ```rust,ignore
//! use engage_db::{create_pool, run_migrations, PgContentRepository, PoolConfig};
//!
//! async fn example(url: &str) -> Result<(), Box<dyn std::error::Error>> {
//!     let pool = create_pool(&PoolConfig::new(url)).await?;
//!     run_migrations(&pool).await?;
//!     let contents = PgContentRepository::new(pool);
//!     Ok(())
//! }
//! ```

pub mod mappers;
pub mod memory;
pub mod models;
pub mod pool;
pub mod repositories;

// Re-export commonly used types
pub use memory::MemoryStore;
pub use pool::{create_pool, run_migrations, PgPool, PoolConfig};
pub use repositories::{
    PgContentRepository, PgNotificationRepository, PgReactionRepository, PgUserRepository,
};
