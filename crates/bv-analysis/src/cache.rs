//! Lazily filled, compute-once storage for per-snapshot metrics.
//!
//! One [`OnceLock`] slot per metric: the first caller computes, concurrent
//! first callers of the same metric block until that value is ready, and
//! independent metrics can fill in parallel from different threads. There
//! is no invalidation; a new snapshot gets a new cache.

use std::sync::OnceLock;
use std::sync::atomic::{AtomicUsize, Ordering};

use tracing::debug;

use crate::graph::critical_path::CriticalPathResult;
use crate::graph::cycles::{Condensation, CycleReport};
use crate::graph::kcore::CorenessMap;
use crate::graph::stats::GraphStats;
use crate::metrics::MetricMap;
use crate::metrics::basic::DegreeCentrality;
use crate::metrics::eigenvector::EigenvectorResult;
use crate::metrics::hits::HitsResult;
use crate::metrics::pagerank::PageRankResult;

/// Metric slots for one snapshot.
#[derive(Debug, Default)]
pub struct MetricsCache {
    pub(crate) condensation: OnceLock<Condensation>,
    pub(crate) pagerank: OnceLock<PageRankResult>,
    pub(crate) betweenness: OnceLock<MetricMap>,
    pub(crate) eigenvector: OnceLock<EigenvectorResult>,
    pub(crate) hits: OnceLock<HitsResult>,
    pub(crate) critical_path: OnceLock<CriticalPathResult>,
    pub(crate) k_core: OnceLock<CorenessMap>,
    pub(crate) cycles: OnceLock<Vec<Vec<String>>>,
    pub(crate) cycle_reports: OnceLock<Vec<CycleReport>>,
    pub(crate) degree: OnceLock<DegreeCentrality>,
    pub(crate) topological_order: OnceLock<Vec<String>>,
    pub(crate) orphans: OnceLock<Vec<String>>,
    pub(crate) stats: OnceLock<GraphStats>,
    computations: AtomicUsize,
}

impl MetricsCache {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Return the value in `slot`, computing it first if the slot is empty.
    pub(crate) fn fill<'a, T>(
        &self,
        slot: &'a OnceLock<T>,
        metric: &'static str,
        compute: impl FnOnce() -> T,
    ) -> &'a T {
        slot.get_or_init(|| {
            let value = compute();
            let total = self.computations.fetch_add(1, Ordering::Relaxed) + 1;
            debug!(metric, total, "metric computed");
            value
        })
    }

    /// How many metric slots have been filled so far.
    #[must_use]
    pub fn computations(&self) -> usize {
        self.computations.load(Ordering::Relaxed)
    }
}
