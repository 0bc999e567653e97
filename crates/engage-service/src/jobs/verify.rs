//! Read-only drift check between cached counters and reaction records

use std::collections::HashMap;
use std::sync::Arc;

use serde::Serialize;
use tracing::{info, instrument, warn};

use engage_core::traits::{ContentRepository, ReactionRepository};
use engage_core::{ContentKind, Snowflake};

use crate::services::{ServiceContext, ServiceResult};

use super::{partition_groups, CancelFlag, ID_BATCH};

/// Default number of example diffs kept in a report
pub const DEFAULT_SAMPLE_SIZE: usize = 25;

/// One content item whose cached counter disagrees with its records
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DriftExample {
    pub kind: ContentKind,
    pub id: Snowflake,
    pub cached: i64,
    pub actual: i64,
}

/// Drift found for one content kind
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct KindVerification {
    pub kind: ContentKind,
    pub groups: u64,
    /// Grouped ids whose content row was found and compared
    pub checked: u64,
    pub mismatches: u64,
    /// Rows with a non-zero cached counter and no reaction records
    pub stale_nonzero: u64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct VerificationReport {
    pub kind_filter: Option<ContentKind>,
    pub limit: Option<usize>,
    pub cancelled: bool,
    pub kinds: Vec<KindVerification>,
    pub examples: Vec<DriftExample>,
}

impl VerificationReport {
    pub fn total_mismatches(&self) -> u64 {
        self.kinds.iter().map(|k| k.mismatches).sum()
    }

    pub fn total_stale_nonzero(&self) -> u64 {
        self.kinds.iter().map(|k| k.stale_nonzero).sum()
    }

    pub fn total_drift(&self) -> u64 {
        self.total_mismatches() + self.total_stale_nonzero()
    }

    /// No drift anywhere in the checked scope
    pub fn is_clean(&self) -> bool {
        self.total_drift() == 0
    }

    /// Every kind in scope was checked and none drifted
    pub fn passed(&self) -> bool {
        !self.cancelled && self.is_clean()
    }
}

/// Compares cached reaction counters against the reaction records
pub struct VerificationJob {
    reactions: Arc<dyn ReactionRepository>,
    contents: Arc<dyn ContentRepository>,
    sample_size: usize,
    cancel: CancelFlag,
}

impl VerificationJob {
    pub fn new(reactions: Arc<dyn ReactionRepository>, contents: Arc<dyn ContentRepository>) -> Self {
        Self {
            reactions,
            contents,
            sample_size: DEFAULT_SAMPLE_SIZE,
            cancel: CancelFlag::new(),
        }
    }

    pub fn from_context(ctx: &ServiceContext) -> Self {
        Self::new(ctx.reaction_repo_arc(), ctx.content_repo_arc())
    }

    /// Maximum number of example diffs to keep
    #[must_use]
    pub fn with_sample_size(mut self, sample_size: usize) -> Self {
        self.sample_size = sample_size;
        self
    }

    #[must_use]
    pub fn with_cancel_flag(mut self, cancel: CancelFlag) -> Self {
        self.cancel = cancel;
        self
    }

    /// Check one kind (or all of them), comparing at most `limit` grouped
    /// ids per kind. Writes nothing.
    #[instrument(skip(self))]
    pub async fn run(
        &self,
        kind_filter: Option<ContentKind>,
        limit: Option<usize>,
    ) -> ServiceResult<VerificationReport> {
        let groups = self.reactions.group_counts().await?;
        let mut by_kind = partition_groups(groups);

        let kinds: Vec<ContentKind> = match kind_filter {
            Some(kind) => vec![kind],
            None => ContentKind::ALL.to_vec(),
        };

        let mut report = VerificationReport {
            kind_filter,
            limit,
            cancelled: false,
            kinds: Vec::with_capacity(kinds.len()),
            examples: Vec::new(),
        };

        for kind in kinds {
            if self.cancel.is_cancelled() {
                warn!(kind = %kind, "Verification cancelled, remaining kinds skipped");
                report.cancelled = true;
                break;
            }

            let exact = by_kind.remove(&kind).unwrap_or_default();
            let phase = self.verify_kind(kind, &exact, limit, &mut report.examples).await?;

            if phase.mismatches + phase.stale_nonzero > 0 {
                warn!(
                    kind = %kind,
                    checked = phase.checked,
                    mismatches = phase.mismatches,
                    stale_nonzero = phase.stale_nonzero,
                    "Counter drift detected"
                );
            } else {
                info!(kind = %kind, checked = phase.checked, "Counters consistent");
            }
            report.kinds.push(phase);
        }

        info!(
            mismatches = report.total_mismatches(),
            stale_nonzero = report.total_stale_nonzero(),
            examples = report.examples.len(),
            clean = report.is_clean(),
            cancelled = report.cancelled,
            "Verification finished"
        );

        Ok(report)
    }

    async fn verify_kind(
        &self,
        kind: ContentKind,
        exact: &[(Snowflake, i64)],
        limit: Option<usize>,
        examples: &mut Vec<DriftExample>,
    ) -> ServiceResult<KindVerification> {
        let mut phase = KindVerification {
            kind,
            groups: exact.len() as u64,
            checked: 0,
            mismatches: 0,
            stale_nonzero: 0,
        };

        let scope = &exact[..limit.map_or(exact.len(), |n| n.min(exact.len()))];
        let actual: HashMap<Snowflake, i64> = scope.iter().copied().collect();

        for chunk in scope.chunks(ID_BATCH) {
            let ids: Vec<Snowflake> = chunk.iter().map(|(id, _)| *id).collect();
            let mut cached = self.contents.cached_counts(kind, &ids).await?;
            cached.sort_unstable_by_key(|(id, _)| *id);

            for (id, cached) in cached {
                let Some(&actual) = actual.get(&id) else {
                    continue;
                };
                phase.checked += 1;
                if cached != actual {
                    phase.mismatches += 1;
                    self.keep_example(examples, DriftExample { kind, id, cached, actual });
                }
            }
        }

        // Stale rows are measured against every grouped id, not just the
        // limited scope, so a limit never turns live counters into false drift.
        let all_ids: Vec<Snowflake> = exact.iter().map(|(id, _)| *id).collect();
        phase.stale_nonzero = self.contents.count_stale_nonzero(kind, &all_ids).await?;

        let room = self.sample_size.saturating_sub(examples.len());
        if phase.stale_nonzero > 0 && room > 0 {
            let sample = self
                .contents
                .sample_stale_nonzero(kind, &all_ids, room)
                .await?;
            for (id, cached) in sample {
                self.keep_example(examples, DriftExample { kind, id, cached, actual: 0 });
            }
        }

        Ok(phase)
    }

    fn keep_example(&self, examples: &mut Vec<DriftExample>, example: DriftExample) {
        if examples.len() < self.sample_size {
            examples.push(example);
        }
    }
}
