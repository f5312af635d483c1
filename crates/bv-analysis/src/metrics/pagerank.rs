//! PageRank over the prerequisite → dependent graph.
//!
//! # Overview
//!
//! Rank flows along edges from prerequisites to the items they enable, so an
//! item at the end of many (or long) chains of work collects a high score.
//!
//! # Algorithm
//!
//! Standard power iteration:
//!
//! ```text
//! PR(v) = (1 - d) / N + d * Σ PR(u) / out_degree(u)   for each u → v
//!       + d * Σ PR(w) / N                              for each dangling w
//! ```
//!
//! where `d` is the damping factor (default 0.85). Dangling nodes (no
//! outgoing edges) spread their mass uniformly, so the scores always sum to
//! one. Iteration stops when the L1 delta drops below the tolerance or the
//! iteration cap is reached; hitting the cap is not an error, the last
//! estimate is returned with `converged = false`.

use bv_core::AnalysisConfig;
use tracing::{debug, instrument, trace};

use crate::graph::build::DependencyGraph;
use crate::metrics::{MetricMap, l1_delta, scores_to_map};

// ---------------------------------------------------------------------------
// Configuration
// ---------------------------------------------------------------------------

/// Configuration for PageRank computation.
#[derive(Debug, Clone)]
pub struct PageRankConfig {
    /// Damping factor (probability of following a link vs teleporting).
    /// Default: 0.85.
    pub damping: f64,
    /// Convergence threshold: stop when L1 norm of rank delta < tolerance.
    /// Default: 1e-6.
    pub tolerance: f64,
    /// Maximum number of iterations.
    /// Default: 100.
    pub max_iter: usize,
}

impl Default for PageRankConfig {
    fn default() -> Self {
        Self {
            damping: 0.85,
            tolerance: 1e-6,
            max_iter: 100,
        }
    }
}

impl From<&AnalysisConfig> for PageRankConfig {
    fn from(config: &AnalysisConfig) -> Self {
        Self {
            damping: config.damping,
            tolerance: config.tolerance,
            max_iter: config.max_iter,
        }
    }
}

// ---------------------------------------------------------------------------
// Result types
// ---------------------------------------------------------------------------

/// Result of a PageRank computation.
#[derive(Debug, Clone, PartialEq)]
pub struct PageRankResult {
    /// PageRank scores: item ID → score.
    pub scores: MetricMap,
    /// Number of iterations performed.
    pub iterations: usize,
    /// Whether the algorithm converged within `max_iter`.
    pub converged: bool,
}

// ---------------------------------------------------------------------------
// Computation
// ---------------------------------------------------------------------------

/// Compute PageRank for every item.
///
/// An empty graph yields empty scores; a graph without edges yields `1/N`
/// for every item.
#[must_use]
#[instrument(skip_all, fields(nodes = graph.node_count(), edges = graph.edge_count()))]
#[allow(clippy::cast_precision_loss)]
pub fn pagerank(graph: &DependencyGraph, config: &PageRankConfig) -> PageRankResult {
    let n = graph.node_count();

    if n == 0 {
        return PageRankResult {
            scores: MetricMap::new(),
            iterations: 0,
            converged: true,
        };
    }

    let n_f64 = n as f64;
    let teleport = (1.0 - config.damping) / n_f64;

    let mut ranks = vec![1.0 / n_f64; n];
    let mut new_ranks = vec![0.0_f64; n];

    let mut iterations = 0;
    let mut converged = false;

    for _ in 0..config.max_iter {
        iterations += 1;

        let dangling_mass: f64 = (0..n)
            .filter(|&i| graph.successors(i).is_empty())
            .map(|i| ranks[i])
            .sum();
        let base = config.damping.mul_add(dangling_mass / n_f64, teleport);
        new_ranks.fill(base);

        for (i, &rank) in ranks.iter().enumerate() {
            let targets = graph.successors(i);
            if targets.is_empty() {
                continue;
            }
            let share = config.damping * rank / targets.len() as f64;
            for &t in targets {
                new_ranks[t] += share;
            }
        }

        let delta = l1_delta(&ranks, &new_ranks);
        std::mem::swap(&mut ranks, &mut new_ranks);
        trace!(iteration = iterations, delta, "pagerank step");

        if delta < config.tolerance {
            converged = true;
            break;
        }
    }

    debug!(iterations, converged, "pagerank finished");

    PageRankResult {
        scores: scores_to_map(graph, &ranks),
        iterations,
        converged,
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
