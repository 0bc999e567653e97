//! Reaction counter reconciliation
//!
//! Rebuilds every cached `reactions_count` from the reaction records:
//! grouped ids get their exact total, every other row with a non-zero
//! cached value is zeroed. Dry-run by default.

use std::sync::Arc;

use serde::Serialize;
use tracing::{info, instrument, warn};

use engage_core::traits::{ContentRepository, ReactionRepository};
use engage_core::{BulkWriteOutcome, ContentKind, Snowflake};

use crate::services::{ServiceContext, ServiceResult};

use super::{partition_groups, CancelFlag, ID_BATCH};

/// Outcome of one kind phase
///
/// In dry-run mode `updated` and `zeroed` are the rows that would change.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct KindRecount {
    pub kind: ContentKind,
    /// Distinct content ids with at least one reaction
    pub groups: u64,
    pub updated: u64,
    pub zeroed: u64,
    /// Rows whose write failed; left for the next run
    pub failed: u64,
}

impl KindRecount {
    fn new(kind: ContentKind, groups: usize) -> Self {
        Self {
            kind,
            groups: groups as u64,
            updated: 0,
            zeroed: 0,
            failed: 0,
        }
    }
}

/// Summary of a reconciliation pass
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ReconciliationReport {
    pub dry_run: bool,
    /// Set when the pass stopped before processing every kind
    pub cancelled: bool,
    pub kinds: Vec<KindRecount>,
}

impl ReconciliationReport {
    pub fn total_groups(&self) -> u64 {
        self.kinds.iter().map(|k| k.groups).sum()
    }

    pub fn total_updated(&self) -> u64 {
        self.kinds.iter().map(|k| k.updated).sum()
    }

    pub fn total_zeroed(&self) -> u64 {
        self.kinds.iter().map(|k| k.zeroed).sum()
    }

    pub fn total_failed(&self) -> u64 {
        self.kinds.iter().map(|k| k.failed).sum()
    }

    /// Rows modified (or that would be, in dry-run)
    pub fn rows_affected(&self) -> u64 {
        self.total_updated() + self.total_zeroed()
    }
}

/// Rewrites cached reaction counters from the reaction records
pub struct ReconciliationJob {
    reactions: Arc<dyn ReactionRepository>,
    contents: Arc<dyn ContentRepository>,
    cancel: CancelFlag,
}

impl ReconciliationJob {
    pub fn new(reactions: Arc<dyn ReactionRepository>, contents: Arc<dyn ContentRepository>) -> Self {
        Self {
            reactions,
            contents,
            cancel: CancelFlag::new(),
        }
    }

    pub fn from_context(ctx: &ServiceContext) -> Self {
        Self::new(ctx.reaction_repo_arc(), ctx.content_repo_arc())
    }

    #[must_use]
    pub fn with_cancel_flag(mut self, cancel: CancelFlag) -> Self {
        self.cancel = cancel;
        self
    }

    /// Run one pass. With `dry_run` nothing is written.
    ///
    /// Safe to run while toggles are live: a toggle landing mid-pass is
    /// either counted here or resynchronized by the toggle itself.
    #[instrument(skip(self))]
    pub async fn run(&self, dry_run: bool) -> ServiceResult<ReconciliationReport> {
        let groups = self.reactions.group_counts().await?;
        info!(groups = groups.len(), dry_run, "Reaction groups aggregated");

        let mut by_kind = partition_groups(groups);
        let mut report = ReconciliationReport {
            dry_run,
            cancelled: false,
            kinds: Vec::with_capacity(ContentKind::ALL.len()),
        };

        for kind in ContentKind::ALL {
            if self.cancel.is_cancelled() {
                warn!(kind = %kind, "Reconciliation cancelled, remaining kinds skipped");
                report.cancelled = true;
                break;
            }

            let exact = by_kind.remove(&kind).unwrap_or_default();
            let phase = if dry_run {
                self.plan_kind(kind, &exact).await?
            } else {
                self.apply_kind(kind, &exact).await?
            };

            info!(
                kind = %kind,
                groups = phase.groups,
                updated = phase.updated,
                zeroed = phase.zeroed,
                failed = phase.failed,
                dry_run,
                "Kind reconciled"
            );
            report.kinds.push(phase);
        }

        info!(
            groups = report.total_groups(),
            updated = report.total_updated(),
            zeroed = report.total_zeroed(),
            failed = report.total_failed(),
            cancelled = report.cancelled,
            dry_run,
            "Reconciliation finished"
        );

        Ok(report)
    }

    async fn plan_kind(
        &self,
        kind: ContentKind,
        exact: &[(Snowflake, i64)],
    ) -> ServiceResult<KindRecount> {
        let mut phase = KindRecount::new(kind, exact.len());

        for chunk in exact.chunks(ID_BATCH) {
            phase.updated += self.contents.count_changes(kind, chunk).await?;
        }

        let ids = ids_of(exact);
        phase.zeroed = self.contents.count_stale_nonzero(kind, &ids).await?;

        Ok(phase)
    }

    async fn apply_kind(
        &self,
        kind: ContentKind,
        exact: &[(Snowflake, i64)],
    ) -> ServiceResult<KindRecount> {
        let mut phase = KindRecount::new(kind, exact.len());

        let mut outcome = BulkWriteOutcome::default();
        for chunk in exact.chunks(ID_BATCH) {
            outcome.merge(self.contents.bulk_set_reactions_count(kind, chunk).await?);
        }
        phase.updated = outcome.modified;
        phase.failed = outcome.failed;

        let ids = ids_of(exact);
        phase.zeroed = self.contents.zero_stale_nonzero(kind, &ids).await?;

        Ok(phase)
    }
}

fn ids_of(exact: &[(Snowflake, i64)]) -> Vec<Snowflake> {
    exact.iter().map(|(id, _)| *id).collect()
}
