//! Static graph metrics: degree centrality, topological order, and the
//! structural roles of items (sources, sinks, orphans).
//!
//! These run in linear time over the snapshot's adjacency lists and are
//! cheap enough to compute on every analysis.

use std::collections::BTreeMap;

use tracing::instrument;

use crate::graph::build::DependencyGraph;
use crate::graph::cycles::Condensation;

// ---------------------------------------------------------------------------
// Degree Centrality
// ---------------------------------------------------------------------------

/// Per-item degree counts.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct DegreeCentrality {
    /// In-degree per item ID (how many prerequisites this item waits on).
    pub in_degree: BTreeMap<String, usize>,
    /// Out-degree per item ID (how many dependents this item enables).
    pub out_degree: BTreeMap<String, usize>,
    /// Total degree per item ID (in + out).
    pub total_degree: BTreeMap<String, usize>,
}

/// Compute degree counts for every item. Self-links are not counted.
#[must_use]
#[instrument(skip_all, fields(nodes = graph.node_count()))]
pub fn degree_centrality(graph: &DependencyGraph) -> DegreeCentrality {
    let mut dc = DegreeCentrality::default();

    for (idx, id) in graph.ids().enumerate() {
        let in_d = graph.predecessors(idx).len();
        let out_d = graph.successors(idx).len();
        dc.in_degree.insert(id.to_string(), in_d);
        dc.out_degree.insert(id.to_string(), out_d);
        dc.total_degree.insert(id.to_string(), in_d + out_d);
    }

    dc
}

// ---------------------------------------------------------------------------
// Topological Order
// ---------------------------------------------------------------------------

/// Order items so that every prerequisite precedes its dependents.
///
/// Members of one SCC cannot be ordered among themselves; they are emitted
/// together in ID order at the position of their component.
#[must_use]
pub fn topological_order(graph: &DependencyGraph, condensation: &Condensation) -> Vec<String> {
    condensation
        .components
        .iter()
        .flatten()
        .map(|&idx| graph.id_at(idx).to_string())
        .collect()
}

// ---------------------------------------------------------------------------
// Structural roles
// ---------------------------------------------------------------------------

/// Items with no structural edges at all, sorted by ID.
///
/// A self-link alone does not connect an item to the rest of the graph, so
/// such an item still counts as an orphan.
#[must_use]
pub fn orphan_items(graph: &DependencyGraph) -> Vec<String> {
    (0..graph.node_count())
        .filter(|&idx| graph.successors(idx).is_empty() && graph.predecessors(idx).is_empty())
        .map(|idx| graph.id_at(idx).to_string())
        .collect()
}

/// Items with no prerequisites, sorted by ID. These are ready to start.
#[must_use]
pub fn source_items(graph: &DependencyGraph) -> Vec<String> {
    (0..graph.node_count())
        .filter(|&idx| graph.predecessors(idx).is_empty())
        .map(|idx| graph.id_at(idx).to_string())
        .collect()
}

/// Items nothing else depends on, sorted by ID.
#[must_use]
pub fn sink_items(graph: &DependencyGraph) -> Vec<String> {
    (0..graph.node_count())
        .filter(|&idx| graph.successors(idx).is_empty())
        .map(|idx| graph.id_at(idx).to_string())
        .collect()
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
