//! # engage-jobs
//!
//! Shared setup for the `engage-recount` and `engage-verify` binaries:
//! logging, the database connection and Ctrl-C cancellation.

use std::sync::Arc;

use anyhow::Context;
use engage_common::{try_init_tracing_with_config, JobsConfig, TracingConfig};
use engage_core::traits::{ContentRepository, ReactionRepository};
use engage_core::ContentKind;
use engage_db::{create_pool, PgContentRepository, PgReactionRepository, PoolConfig};
use engage_service::CancelFlag;
use tracing::{info, warn};

/// Repositories a batch job reads and writes
pub struct JobStores {
    pub reactions: Arc<dyn ReactionRepository>,
    pub contents: Arc<dyn ContentRepository>,
}

/// Load configuration and start logging in the format of `APP_ENV`
pub fn init(job: &str) -> anyhow::Result<JobsConfig> {
    let config = JobsConfig::from_env();

    let tracing_config = config
        .as_ref()
        .map(|c| TracingConfig::for_environment(c.app.env))
        .unwrap_or_default();
    if let Err(e) = try_init_tracing_with_config(tracing_config) {
        eprintln!("Warning: Failed to initialize tracing: {e}");
    }

    let config = config.with_context(|| format!("{job}: failed to load configuration"))?;
    info!(job, env = ?config.app.env, "Configuration loaded");
    Ok(config)
}

/// Connect to PostgreSQL and build the repositories
pub async fn connect(config: &JobsConfig) -> anyhow::Result<JobStores> {
    let pool = create_pool(&PoolConfig::from(&config.database))
        .await
        .context("failed to connect to PostgreSQL")?;

    Ok(JobStores {
        reactions: Arc::new(PgReactionRepository::new(pool.clone())),
        contents: Arc::new(
            PgContentRepository::new(pool).with_bulk_concurrency(config.recount.bulk_concurrency),
        ),
    })
}

/// Cancellation flag that is raised on the first Ctrl-C
pub fn cancel_on_ctrl_c() -> CancelFlag {
    let cancel = CancelFlag::new();
    let handle = cancel.clone();

    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            warn!("Interrupt received, stopping after the current phase");
            handle.cancel();
        }
    });

    cancel
}

/// clap value parser for `--content-type`
pub fn parse_content_kind(raw: &str) -> Result<ContentKind, String> {
    raw.trim()
        .to_lowercase()
        .parse()
        .map_err(|_| format!("unknown content type '{raw}' (expected post, story, poll or comment)"))
}
