//! K-core decomposition (coreness) of the dependency graph.
//!
//! Coreness ignores edge direction: two items are coupled if either depends
//! on the other, and a node's degree is its count of distinct coupled
//! neighbours. The coreness of a node is the largest `k` such that it belongs
//! to a subgraph where every node has degree `>= k`.
//!
//! # Algorithm
//!
//! Batagelj–Zaversnik peeling: nodes are kept bucket-sorted by current
//! degree, the minimum-degree node is removed next, and each neighbour with a
//! higher degree drops one bucket. The degree a node has when it is removed
//! is its coreness. `O(V + E)`.

use std::collections::BTreeMap;

use tracing::instrument;

use crate::graph::build::DependencyGraph;

/// Coreness per item ID.
pub type CorenessMap = BTreeMap<String, usize>;

/// Compute the coreness of every node.
#[must_use]
#[instrument(skip_all, fields(nodes = graph.node_count()))]
pub fn k_core_decomposition(graph: &DependencyGraph) -> CorenessMap {
    let neighbors = undirected_neighbors(graph);
    let core = peel(&neighbors);

    graph
        .ids()
        .zip(core)
        .map(|(id, k)| (id.to_string(), k))
        .collect()
}

/// Largest coreness in the graph (0 when empty).
#[must_use]
pub fn degeneracy(coreness: &CorenessMap) -> usize {
    coreness.values().copied().max().unwrap_or(0)
}

/// Merge the sorted in/out lists into one sorted, deduplicated list.
fn undirected_neighbors(graph: &DependencyGraph) -> Vec<Vec<usize>> {
    (0..graph.node_count())
        .map(|v| {
            let outs = graph.successors(v);
            let ins = graph.predecessors(v);
            let mut merged = Vec::with_capacity(outs.len() + ins.len());
            let (mut i, mut j) = (0, 0);
            while i < outs.len() || j < ins.len() {
                let next = match (outs.get(i), ins.get(j)) {
                    (Some(&a), Some(&b)) if a < b => {
                        i += 1;
                        a
                    }
                    (Some(&a), Some(&b)) if b < a => {
                        j += 1;
                        b
                    }
                    (Some(&a), Some(_)) => {
                        i += 1;
                        j += 1;
                        a
                    }
                    (Some(&a), None) => {
                        i += 1;
                        a
                    }
                    (None, Some(&b)) => {
                        j += 1;
                        b
                    }
                    (None, None) => break,
                };
                merged.push(next);
            }
            merged
        })
        .collect()
}

fn peel(neighbors: &[Vec<usize>]) -> Vec<usize> {
    let n = neighbors.len();
    let mut degree: Vec<usize> = neighbors.iter().map(Vec::len).collect();
    let max_degree = degree.iter().copied().max().unwrap_or(0);

    // bin[d] = first position in `order` holding a node of degree d.
    let mut bin = vec![0usize; max_degree + 1];
    for &d in &degree {
        bin[d] += 1;
    }
    let mut start = 0;
    for slot in &mut bin {
        let count = *slot;
        *slot = start;
        start += count;
    }

    let mut pos = vec![0usize; n];
    let mut order = vec![0usize; n];
    for v in 0..n {
        pos[v] = bin[degree[v]];
        order[pos[v]] = v;
        bin[degree[v]] += 1;
    }
    for d in (1..=max_degree).rev() {
        bin[d] = bin[d - 1];
    }
    bin[0] = 0;

    for i in 0..n {
        let v = order[i];
        for &u in &neighbors[v] {
            if degree[u] > degree[v] {
                // Swap u with the first node of its bucket, then shrink it.
                let du = degree[u];
                let pu = pos[u];
                let pw = bin[du];
                let w = order[pw];
                if u != w {
                    pos[u] = pw;
                    order[pu] = w;
                    pos[w] = pu;
                    order[pw] = u;
                }
                bin[du] += 1;
                degree[u] -= 1;
            }
        }
    }

    degree
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
