//! Betweenness centrality via Brandes' algorithm.
//!
//! # Overview
//!
//! Betweenness centrality measures how often a node lies on shortest paths
//! between other pairs of nodes. High-betweenness items are "bridges" or
//! "bottlenecks": a slip there stalls work on both sides.
//!
//! # Algorithm
//!
//! We implement Brandes' algorithm (2001) for unweighted directed graphs:
//!
//! 1. For each source node `s`, run BFS to compute shortest-path counts
//!    and distances.
//! 2. Accumulate dependency scores in reverse BFS order (farthest nodes first).
//! 3. Sum the dependency scores across all source nodes.
//!
//! Complexity: O(V * E).
//!
//! # Output
//!
//! Scores are the raw pair sums by default: each ordered pair `(s, t)`
//! contributes the fraction of its shortest paths running through the node.
//! With `normalized = true` the sums are divided by `(n-1)*(n-2)`, the
//! number of ordered pairs excluding the node itself. Pairs with no path
//! contribute nothing.

use std::collections::VecDeque;

use tracing::instrument;

use crate::graph::build::DependencyGraph;
use crate::metrics::{MetricMap, scores_to_map};

/// Compute betweenness centrality for all items in the graph.
///
/// Disconnected nodes and nodes with no shortest paths through them receive
/// a score of 0.0.
#[must_use]
#[instrument(skip(graph), fields(nodes = graph.node_count(), edges = graph.edge_count()))]
#[allow(clippy::cast_precision_loss)]
pub fn betweenness_centrality(graph: &DependencyGraph, normalized: bool) -> MetricMap {
    let n = graph.node_count();

    if n == 0 {
        return MetricMap::new();
    }

    // Node-indexed betweenness accumulator.
    let mut cb: Vec<f64> = vec![0.0; n];

    // Scratch buffers reused across sources.
    let mut stack: Vec<usize> = Vec::with_capacity(n);
    let mut predecessors: Vec<Vec<usize>> = vec![Vec::new(); n];
    let mut sigma: Vec<f64> = vec![0.0; n];
    let mut dist: Vec<i64> = vec![-1; n];
    let mut delta: Vec<f64> = vec![0.0; n];
    let mut queue: VecDeque<usize> = VecDeque::with_capacity(n);

    for s in 0..n {
        stack.clear();
        for preds in &mut predecessors {
            preds.clear();
        }
        sigma.fill(0.0);
        dist.fill(-1);
        delta.fill(0.0);

        sigma[s] = 1.0;
        dist[s] = 0;
        queue.push_back(s);

        while let Some(v) = queue.pop_front() {
            stack.push(v);

            for &w in graph.successors(v) {
                // First visit to w?
                if dist[w] < 0 {
                    dist[w] = dist[v] + 1;
                    queue.push_back(w);
                }

                // Shortest path to w via v?
                if dist[w] == dist[v] + 1 {
                    sigma[w] += sigma[v];
                    predecessors[w].push(v);
                }
            }
        }

        // Accumulate dependencies in reverse BFS order.
        while let Some(w) = stack.pop() {
            for &v in &predecessors[w] {
                delta[v] += (sigma[v] / sigma[w]) * (1.0 + delta[w]);
            }
            if w != s {
                cb[w] += delta[w];
            }
        }
    }

    if normalized && n > 2 {
        let scale = ((n - 1) * (n - 2)) as f64;
        for score in &mut cb {
            *score /= scale;
        }
    }

    scores_to_map(graph, &cb)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
