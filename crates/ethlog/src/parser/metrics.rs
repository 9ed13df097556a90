use std::collections::BTreeMap;
use std::sync::atomic::{AtomicU64, Ordering};
use serde::Serialize;

use super::EventKind;

/// Conversion counters, shared by every source of a run.
///
/// All operations use `Ordering::Relaxed`; a snapshot taken while sources are
/// still running may be slightly torn, which is fine for a progress summary.
#[derive(Debug, Default)]
pub struct ParsingMetrics {
    lines: AtomicU64,
    failures: AtomicU64,
    sources: AtomicU64,
    /// Indexed by `EventKind::code()`; slot 0 counts unknown lines
    per_kind: [AtomicU64; EventKind::ALL.len()],
}

impl ParsingMetrics {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record one classified line (including `Unknown`)
    #[inline]
    pub fn record_line(&self, kind: EventKind) {
        self.lines.fetch_add(1, Ordering::Relaxed);
        self.per_kind[kind.code() as usize].fetch_add(1, Ordering::Relaxed);
    }

    #[inline]
    pub fn record_failure(&self) {
        self.failures.fetch_add(1, Ordering::Relaxed);
    }

    #[inline]
    pub fn record_source(&self) {
        self.sources.fetch_add(1, Ordering::Relaxed);
    }

    pub fn snapshot(&self) -> MetricsSnapshot {
        let per_kind: BTreeMap<EventKind, u64> = EventKind::ALL
            .iter()
            .map(|kind| (*kind, self.per_kind[kind.code() as usize].load(Ordering::Relaxed)))
            .filter(|(_, count)| *count > 0)
            .collect();

        let unknown = per_kind.get(&EventKind::Unknown).copied().unwrap_or(0);
        let lines = self.lines.load(Ordering::Relaxed);

        MetricsSnapshot {
            sources: self.sources.load(Ordering::Relaxed),
            lines,
            records: lines.saturating_sub(unknown),
            unknown,
            failures: self.failures.load(Ordering::Relaxed),
            per_kind,
        }
    }
}

/// A read-only snapshot of conversion metrics.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MetricsSnapshot {
    pub sources: u64,
    pub lines: u64,
    /// Lines that produced an output record
    pub records: u64,
    pub unknown: u64,
    pub failures: u64,
    pub per_kind: BTreeMap<EventKind, u64>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_metrics_are_empty() {
        let snap = ParsingMetrics::new().snapshot();

        assert_eq!(snap.lines, 0);
        assert_eq!(snap.records, 0);
        assert_eq!(snap.failures, 0);
        assert!(snap.per_kind.is_empty());
    }

    #[test]
    fn test_record_lines_by_kind() {
        let metrics = ParsingMetrics::new();
        metrics.record_source();
        metrics.record_line(EventKind::MinedBlock);
        metrics.record_line(EventKind::MinedBlock);
        metrics.record_line(EventKind::ChainSplitDetected);
        metrics.record_line(EventKind::Unknown);

        let snap = metrics.snapshot();
        assert_eq!(snap.sources, 1);
        assert_eq!(snap.lines, 4);
        assert_eq!(snap.records, 3);
        assert_eq!(snap.unknown, 1);
        assert_eq!(snap.per_kind.get(&EventKind::MinedBlock), Some(&2));
        assert_eq!(snap.per_kind.get(&EventKind::ChainSplitDetected), Some(&1));
        assert_eq!(snap.per_kind.get(&EventKind::AnnouncedBlockPeer), None);
    }

    #[test]
    fn test_snapshot_serializes_kind_names() {
        let metrics = ParsingMetrics::new();
        metrics.record_line(EventKind::InsertedForkedBlock);

        let json = serde_json::to_value(metrics.snapshot()).unwrap();
        assert_eq!(json["records"], 1);
        assert_eq!(json["per_kind"]["inserted_forked_block"], 1);
    }

    #[test]
    fn test_failures_counted_separately() {
        let metrics = ParsingMetrics::new();
        metrics.record_failure();

        let snap = metrics.snapshot();
        assert_eq!(snap.failures, 1);
        assert_eq!(snap.lines, 0);
    }
}
