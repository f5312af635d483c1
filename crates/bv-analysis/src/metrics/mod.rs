//! Centrality metrics for the dependency graph.
//!
//! # Overview
//!
//! Each metric answers a different question about item importance:
//!
//! - **PageRank** (`pagerank`): Which items accumulate importance from the
//!   chains of prerequisites feeding into them?
//! - **Betweenness centrality** (`betweenness`): Which items act as bridges
//!   or bottlenecks on shortest dependency paths?
//! - **Eigenvector centrality** (`eigenvector`): Which items are enabled by
//!   other highly central items?
//! - **HITS** (`hits`): Which items aggregate many prerequisites (hubs) and
//!   which are foundational enablers (authorities)?
//! - **Basic** (`basic`): degree counts, a deterministic topological order,
//!   and isolated items.
//!
//! # Determinism
//!
//! All metrics run over the raw [`DependencyGraph`] in its fixed node order
//! (sorted IDs, sorted adjacency), so repeated runs on equal snapshots sum
//! floating-point terms in the same order and produce bit-identical scores.
//!
//! ```rust,ignore
//! use bv_analysis::graph::DependencyGraph;
//! use bv_analysis::metrics::{betweenness::betweenness_centrality, hits::hits};
//!
//! let graph = DependencyGraph::build(&issues, &deps);
//! let bc = betweenness_centrality(&graph, false);
//! let result = hits(&graph, 100, 1e-6);
//! ```

use std::collections::BTreeMap;

use crate::graph::build::DependencyGraph;

pub mod basic;
pub mod betweenness;
pub mod eigenvector;
pub mod hits;
pub mod pagerank;

/// Item ID → score. One entry per node, in ID order.
pub type MetricMap = BTreeMap<String, f64>;

/// Label a node-indexed score vector with item IDs.
pub(crate) fn scores_to_map(graph: &DependencyGraph, scores: &[f64]) -> MetricMap {
    graph
        .ids()
        .zip(scores.iter().copied())
        .map(|(id, score)| (id.to_string(), score))
        .collect()
}

/// Scale a vector to unit L2 norm. A zero vector is left as-is.
pub(crate) fn normalize_l2(v: &mut [f64]) {
    let norm: f64 = v.iter().map(|x| x * x).sum::<f64>().sqrt();
    if norm > 0.0 {
        for x in v.iter_mut() {
            *x /= norm;
        }
    }
}

/// Sum of absolute component differences.
pub(crate) fn l1_delta(old: &[f64], new: &[f64]) -> f64 {
    old.iter().zip(new).map(|(a, b)| (a - b).abs()).sum()
}
