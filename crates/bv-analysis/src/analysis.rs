//! The per-snapshot analysis facade.
//!
//! [`GraphAnalysis`] owns one [`DependencyGraph`], its [`AnalysisConfig`], and
//! a [`MetricsCache`]. Every accessor computes its metric on first use and
//! hands out a shared reference afterwards. The type is `Send + Sync`; wrap
//! it in an `Arc` to let several threads pull different metrics at once.

use bv_core::{AnalysisConfig, ConfigError};
use tracing::{debug, instrument};

use crate::cache::MetricsCache;
use crate::graph::build::DependencyGraph;
use crate::graph::critical_path::{CriticalPathResult, critical_path_scores};
use crate::graph::cycles::{Condensation, CycleReport, find_cycles, report_cycles_with_breaks};
use crate::graph::kcore::{CorenessMap, k_core_decomposition};
use crate::graph::stats::GraphStats;
use crate::metrics::MetricMap;
use crate::metrics::basic::{DegreeCentrality, degree_centrality, orphan_items, topological_order};
use crate::metrics::betweenness::betweenness_centrality;
use crate::metrics::eigenvector::{EigenvectorResult, eigenvector_centrality};
use crate::metrics::hits::{HitsResult, hits};
use crate::metrics::pagerank::{PageRankConfig, PageRankResult, pagerank};

/// Lazily computed metrics over one immutable snapshot.
#[derive(Debug)]
pub struct GraphAnalysis {
    graph: DependencyGraph,
    config: AnalysisConfig,
    cache: MetricsCache,
}

impl GraphAnalysis {
    /// Wrap a snapshot with the default settings.
    #[must_use]
    pub fn new(graph: DependencyGraph) -> Self {
        Self {
            graph,
            config: AnalysisConfig::default(),
            cache: MetricsCache::new(),
        }
    }

    /// Wrap a snapshot with custom settings.
    ///
    /// # Errors
    ///
    /// Returns the [`ConfigError`] from [`AnalysisConfig::validate`] if a
    /// setting is out of range.
    #[instrument(skip_all, fields(nodes = graph.node_count()))]
    pub fn with_config(graph: DependencyGraph, config: AnalysisConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        debug!(?config, "analysis configured");
        Ok(Self {
            graph,
            config,
            cache: MetricsCache::new(),
        })
    }

    #[must_use]
    pub const fn graph(&self) -> &DependencyGraph {
        &self.graph
    }

    #[must_use]
    pub const fn config(&self) -> &AnalysisConfig {
        &self.config
    }

    /// Number of metrics computed so far on this snapshot.
    #[must_use]
    pub fn computations(&self) -> usize {
        self.cache.computations()
    }

    /// SCC structure shared by cycles, critical path, topological order,
    /// and stats.
    #[must_use]
    pub fn condensation(&self) -> &Condensation {
        self.cache.fill(&self.cache.condensation, "condensation", || {
            Condensation::new(&self.graph)
        })
    }

    // -- centrality ---------------------------------------------------------

    #[must_use]
    pub fn pagerank_result(&self) -> &PageRankResult {
        self.cache.fill(&self.cache.pagerank, "pagerank", || {
            pagerank(&self.graph, &PageRankConfig::from(&self.config))
        })
    }

    /// PageRank score per item.
    #[must_use]
    pub fn pagerank(&self) -> &MetricMap {
        &self.pagerank_result().scores
    }

    /// Betweenness score per item (raw pair sums unless the config asks for
    /// normalization).
    #[must_use]
    pub fn betweenness(&self) -> &MetricMap {
        self.cache.fill(&self.cache.betweenness, "betweenness", || {
            betweenness_centrality(&self.graph, self.config.normalize_betweenness)
        })
    }

    #[must_use]
    pub fn eigenvector_result(&self) -> &EigenvectorResult {
        self.cache.fill(&self.cache.eigenvector, "eigenvector", || {
            eigenvector_centrality(&self.graph, self.config.max_iter, self.config.tolerance)
        })
    }

    /// Eigenvector centrality per item.
    #[must_use]
    pub fn eigenvector(&self) -> &MetricMap {
        &self.eigenvector_result().scores
    }

    #[must_use]
    pub fn hits(&self) -> &HitsResult {
        self.cache.fill(&self.cache.hits, "hits", || {
            hits(&self.graph, self.config.max_iter, self.config.tolerance)
        })
    }

    /// HITS hub score per item.
    #[must_use]
    pub fn hubs(&self) -> &MetricMap {
        &self.hits().hubs
    }

    /// HITS authority score per item.
    #[must_use]
    pub fn authorities(&self) -> &MetricMap {
        &self.hits().authorities
    }

    #[must_use]
    pub fn degree(&self) -> &DegreeCentrality {
        self.cache.fill(&self.cache.degree, "degree", || degree_centrality(&self.graph))
    }

    // -- structure ----------------------------------------------------------

    #[must_use]
    pub fn critical_path(&self) -> &CriticalPathResult {
        self.cache.fill(&self.cache.critical_path, "critical_path", || {
            critical_path_scores(&self.graph, self.condensation())
        })
    }

    /// Critical-path depth per item.
    #[must_use]
    pub fn critical_path_scores(&self) -> &MetricMap {
        &self.critical_path().scores
    }

    /// Coreness per item.
    #[must_use]
    pub fn k_core(&self) -> &CorenessMap {
        self.cache.fill(&self.cache.k_core, "k_core", || k_core_decomposition(&self.graph))
    }

    /// One representative cycle per SCC plus self-links, sorted.
    #[must_use]
    pub fn cycles(&self) -> &[Vec<String>] {
        self.cache.fill(&self.cache.cycles, "cycles", || {
            find_cycles(&self.graph, self.condensation())
        })
        .as_slice()
    }

    #[must_use]
    pub fn cycle_reports(&self) -> &[CycleReport] {
        self.cache.fill(&self.cache.cycle_reports, "cycle_reports", || {
            report_cycles_with_breaks(&self.graph, self.condensation())
        })
        .as_slice()
    }

    #[must_use]
    pub fn topological_order(&self) -> &[String] {
        self.cache.fill(&self.cache.topological_order, "topological_order", || {
            topological_order(&self.graph, self.condensation())
        })
        .as_slice()
    }

    /// Items with no structural edges, sorted by ID.
    #[must_use]
    pub fn orphans(&self) -> &[String] {
        self.cache
            .fill(&self.cache.orphans, "orphans", || orphan_items(&self.graph))
            .as_slice()
    }

    #[must_use]
    pub fn stats(&self) -> &GraphStats {
        self.cache.fill(&self.cache.stats, "stats", || {
            GraphStats::compute(&self.graph, self.condensation())
        })
    }

    /// Directed density of the snapshot.
    #[must_use]
    pub fn density(&self) -> f64 {
        self.stats().density
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
