//! Cached reaction counter maintenance
//!
//! The `reactions_count` column on content rows is a cache of the number of
//! reaction records. Writes to it never fail the operation that triggered
//! them: a lost write is repaired by the next resync or recount.

use tracing::{debug, instrument, warn};

use engage_core::ContentRef;

use super::context::ServiceContext;

/// Adjusts and resynchronizes cached reaction counters
pub struct CounterAdjuster<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> CounterAdjuster<'a> {
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// Add `delta` to the cached counter, clamping the result at zero.
    ///
    /// A missing content row or a storage failure is logged and swallowed.
    #[instrument(skip(self))]
    pub async fn adjust(&self, target: ContentRef, delta: i64) {
        match self.ctx.content_repo().adjust_reactions_count(target, delta).await {
            Ok(true) => debug!(target = %target, delta, "Reaction counter adjusted"),
            Ok(false) => warn!(target = %target, delta, "Counter adjust skipped: content row missing"),
            Err(e) => warn!(target = %target, delta, error = %e, "Counter adjust failed"),
        }
    }

    /// Overwrite the cached counter with an exact value (negative values store 0).
    ///
    /// Failures are logged and swallowed.
    #[instrument(skip(self))]
    pub async fn set_exact(&self, target: ContentRef, count: i64) {
        match self.ctx.content_repo().set_reactions_count(target, count).await {
            Ok(true) => debug!(target = %target, count, "Reaction counter set"),
            Ok(false) => warn!(target = %target, count, "Counter set skipped: content row missing"),
            Err(e) => warn!(target = %target, count, error = %e, "Counter set failed"),
        }
    }

    /// Recount reaction records for `target` and store the result.
    ///
    /// Returns the authoritative count, or `None` if it could not be read.
    /// The returned count is valid even when storing it failed.
    #[instrument(skip(self))]
    pub async fn resync(&self, target: ContentRef) -> Option<i64> {
        match self.ctx.reaction_repo().count_for_content(target).await {
            Ok(count) => {
                self.set_exact(target, count).await;
                Some(count)
            }
            Err(e) => {
                warn!(target = %target, error = %e, "Reaction recount failed");
                None
            }
        }
    }
}
