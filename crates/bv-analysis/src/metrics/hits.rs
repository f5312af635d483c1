//! HITS (Hyperlink-Induced Topic Search) hub and authority scores.
//!
//! Scores are defined over the depends-on relation (dependent → prerequisite),
//! the reverse of the graph's stored edge direction:
//!
//! - **Authority**: a foundational enabler. `auth(v)` sums the hub scores of
//!   the dependents that depend on `v`.
//! - **Hub**: an aggregator. `hub(v)` sums the authority scores of the
//!   prerequisites `v` depends on.
//!
//! Each round updates hub first, then authority from the fresh hub vector,
//! and L2-normalizes both. Iteration stops once the combined L1 delta
//! is below the tolerance or the cap is hit.

use tracing::{debug, instrument, trace};

use crate::graph::build::DependencyGraph;
use crate::metrics::{MetricMap, l1_delta, normalize_l2, scores_to_map};

/// Result of the HITS computation.
#[derive(Debug, Clone, PartialEq)]
pub struct HitsResult {
    /// Hub scores: item ID → score.
    pub hubs: MetricMap,
    /// Authority scores: item ID → score.
    pub authorities: MetricMap,
    /// Number of iterations performed.
    pub iterations: usize,
    /// Whether the algorithm converged within `max_iter`.
    pub converged: bool,
}

/// Compute hub and authority scores for every item.
///
/// Items with no edges end with both scores at 0.0.
#[must_use]
#[instrument(skip(graph), fields(nodes = graph.node_count(), edges = graph.edge_count()))]
pub fn hits(graph: &DependencyGraph, max_iter: usize, tolerance: f64) -> HitsResult {
    let n = graph.node_count();

    if n == 0 {
        return HitsResult {
            hubs: MetricMap::new(),
            authorities: MetricMap::new(),
            iterations: 0,
            converged: true,
        };
    }

    let mut hub = vec![1.0_f64; n];
    let mut auth = vec![1.0_f64; n];
    let mut new_hub = vec![0.0_f64; n];
    let mut new_auth = vec![0.0_f64; n];

    let mut iterations = 0;
    let mut converged = false;

    for _ in 0..max_iter {
        iterations += 1;

        // Prerequisites of v are its predecessors in the stored orientation.
        for v in 0..n {
            new_hub[v] = graph
                .predecessors(v)
                .iter()
                .fold(0.0, |acc, &u| acc + auth[u]);
        }
        normalize_l2(&mut new_hub);

        // Dependents of v are its successors.
        for v in 0..n {
            new_auth[v] = graph
                .successors(v)
                .iter()
                .fold(0.0, |acc, &w| acc + new_hub[w]);
        }
        normalize_l2(&mut new_auth);

        let delta = l1_delta(&auth, &new_auth) + l1_delta(&hub, &new_hub);
        std::mem::swap(&mut auth, &mut new_auth);
        std::mem::swap(&mut hub, &mut new_hub);
        trace!(iteration = iterations, delta, "hits step");

        if delta < tolerance {
            converged = true;
            break;
        }
    }

    debug!(iterations, converged, "hits finished");

    HitsResult {
        hubs: scores_to_map(graph, &hub),
        authorities: scores_to_map(graph, &auth),
        iterations,
        converged,
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
