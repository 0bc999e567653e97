//! Configuration structs

mod app_config;

pub use app_config::{
    AppConfig, AppSettings, ConfigError, CorsConfig, DatabaseConfig, Environment, JobsConfig,
    RateLimitConfig, RecountConfig, RedisConfig, ServerConfig, SnowflakeConfig, VerifyConfig,
};
