//! Value objects - immutable domain primitives

mod snowflake;

pub use snowflake::{Snowflake, SnowflakeGenerator, SnowflakeParseError, MAX_WORKER_ID};
