//! Batch jobs over the cached reaction counters
//!
//! - [`ReconciliationJob`] rewrites every cached counter from the reaction records.
//! - [`VerificationJob`] reports drift without writing.

pub mod recount;
pub mod verify;

use std::collections::BTreeMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use engage_core::{ContentKind, ReactionGroup, Snowflake};

pub use recount::{KindRecount, ReconciliationJob, ReconciliationReport};
pub use verify::{
    DriftExample, KindVerification, VerificationJob, VerificationReport, DEFAULT_SAMPLE_SIZE,
};

/// Rows sent to storage per statement when a kind holds many groups
pub(crate) const ID_BATCH: usize = 1_000;

/// Cooperative cancellation shared between a job and its caller
///
/// Jobs check it between kind phases and report partial results.
#[derive(Debug, Clone, Default)]
pub struct CancelFlag {
    cancelled: Arc<AtomicBool>,
}

impl CancelFlag {
    pub fn new() -> Self {
        Self::default()
    }

    /// Request cancellation
    pub fn cancel(&self) {
        self.cancelled.store(true, Ordering::SeqCst);
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancelled.load(Ordering::SeqCst)
    }
}

/// Exact reaction totals partitioned by content kind, ids ascending
pub(crate) fn partition_groups(
    groups: Vec<ReactionGroup>,
) -> BTreeMap<ContentKind, Vec<(Snowflake, i64)>> {
    let mut by_kind: BTreeMap<ContentKind, Vec<(Snowflake, i64)>> = ContentKind::ALL
        .iter()
        .map(|kind| (*kind, Vec::new()))
        .collect();

    for group in groups {
        by_kind
            .entry(group.kind)
            .or_default()
            .push((group.content_id, group.count));
    }

    for exact in by_kind.values_mut() {
        exact.sort_unstable_by_key(|(id, _)| *id);
    }

    by_kind
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cancel_flag_is_shared() {
        let flag = CancelFlag::new();
        let handle = flag.clone();
        assert!(!flag.is_cancelled());
        handle.cancel();
        assert!(flag.is_cancelled());
    }

    #[test]
    fn test_partition_keeps_every_kind() {
        let groups = vec![
            ReactionGroup {
                kind: ContentKind::Poll,
                content_id: Snowflake::new(9),
                count: 2,
            },
            ReactionGroup {
                kind: ContentKind::Poll,
                content_id: Snowflake::new(3),
                count: 1,
            },
        ];

        let by_kind = partition_groups(groups);
        assert_eq!(by_kind.len(), ContentKind::ALL.len());
        assert!(by_kind[&ContentKind::Post].is_empty());
        assert_eq!(
            by_kind[&ContentKind::Poll],
            vec![(Snowflake::new(3), 1), (Snowflake::new(9), 2)]
        );
    }
}
