//! Eigenvector centrality via power iteration.
//!
//! # Overview
//!
//! Eigenvector centrality scores nodes by the idea that being enabled by
//! high-scoring nodes counts for more than being enabled by low-scoring
//! ones. It is the dominant eigenvector of the (transposed) adjacency
//! matrix, so score flows along edges from prerequisites to dependents.
//!
//! # Algorithm
//!
//! Shifted power iteration on `A + I`:
//!
//! 1. Initialize scores uniformly to `1/sqrt(n)`.
//! 2. For each node `v`: `score'(v) = score(v) + Σ score(u)` for all `u → v`.
//! 3. Normalize to unit L2 norm.
//! 4. Repeat until the L1 delta is below the tolerance or the cap is hit.
//!
//! The identity shift leaves the eigenvectors unchanged and keeps the
//! iteration from oscillating on periodic graphs (pure cycles). On a DAG the
//! plain adjacency matrix is nilpotent, so the shift keeps the vector from
//! hitting zero after a few steps, but `A + I` then has the single
//! eigenvalue 1 and the iteration only creeps toward the sinks. Every
//! non-sink score shrinks roughly like `1/k` with the iteration count `k`,
//! the L1 delta shrinks like `1/k²`, and a DAG normally ends at the
//! iteration cap with `converged = false`. The ordering is stable from the
//! first few steps; the absolute values depend on `max_iter`.

use tracing::{debug, instrument, trace};

use crate::graph::build::DependencyGraph;
use crate::metrics::{MetricMap, l1_delta, normalize_l2, scores_to_map};

/// Result of eigenvector centrality computation.
#[derive(Debug, Clone, PartialEq)]
pub struct EigenvectorResult {
    /// Eigenvector centrality scores: item ID → score.
    pub scores: MetricMap,
    /// Number of iterations performed.
    pub iterations: usize,
    /// Whether the algorithm converged within `max_iter`.
    pub converged: bool,
}

/// Compute eigenvector centrality for all items in the graph.
#[must_use]
#[instrument(skip(graph), fields(nodes = graph.node_count(), edges = graph.edge_count()))]
#[allow(clippy::cast_precision_loss)]
pub fn eigenvector_centrality(
    graph: &DependencyGraph,
    max_iter: usize,
    tolerance: f64,
) -> EigenvectorResult {
    let n = graph.node_count();

    if n == 0 {
        return EigenvectorResult {
            scores: MetricMap::new(),
            iterations: 0,
            converged: true,
        };
    }

    let mut scores: Vec<f64> = vec![1.0 / (n as f64).sqrt(); n];
    let mut new_scores: Vec<f64> = vec![0.0; n];

    let mut converged = false;
    let mut iterations = 0;

    for iter in 0..max_iter {
        iterations = iter + 1;

        for v in 0..n {
            new_scores[v] = graph
                .predecessors(v)
                .iter()
                .fold(scores[v], |acc, &u| acc + scores[u]);
        }
        normalize_l2(&mut new_scores);

        let delta = l1_delta(&scores, &new_scores);
        std::mem::swap(&mut scores, &mut new_scores);
        trace!(iteration = iterations, delta, "eigenvector step");

        if delta < tolerance {
            converged = true;
            break;
        }
    }

    debug!(iterations, converged, "eigenvector centrality finished");

    EigenvectorResult {
        scores: scores_to_map(graph, &scores),
        iterations,
        converged,
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
