//! Basic graph statistics for the dependency graph.
//!
//! # Statistics Provided
//!
//! - **node_count**: Total number of items.
//! - **edge_count**: Number of distinct structural edges (self-links excluded).
//! - **density**: `edge_count / (node_count * (node_count - 1))`. A fully
//!   connected directed graph has density 1.0; graphs with fewer than two
//!   nodes have density 0.0.
//! - **scc_count**: Number of strongly connected components. In an acyclic
//!   graph this equals `node_count`.
//! - **cycle_count**: SCCs with more than one member plus self-linked items,
//!   matching the length of the cycle list.
//! - **weakly_connected_component_count**: Disjoint subgraphs when edge
//!   direction is ignored.
//! - **isolated_node_count**: Nodes with no edges at all.
//! - **max_in_degree** / **max_out_degree**: Highest prerequisite count and
//!   highest dependent count on a single item.

use petgraph::algo::connected_components;
use serde::Serialize;

use crate::graph::build::DependencyGraph;
use crate::graph::cycles::Condensation;

// ---------------------------------------------------------------------------
// Density
// ---------------------------------------------------------------------------

/// Directed density of the snapshot. Zero for fewer than two nodes.
#[must_use]
pub fn density(graph: &DependencyGraph) -> f64 {
    compute_density(graph.node_count(), graph.edge_count())
}

// ---------------------------------------------------------------------------
// GraphStats
// ---------------------------------------------------------------------------

/// Summary statistics for a dependency graph.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GraphStats {
    pub node_count: usize,
    pub edge_count: usize,
    pub density: f64,
    pub scc_count: usize,
    pub cycle_count: usize,
    pub weakly_connected_component_count: usize,
    pub isolated_node_count: usize,
    pub max_in_degree: usize,
    pub max_out_degree: usize,
}

impl GraphStats {
    /// Compute statistics from a snapshot and its SCC structure.
    #[must_use]
    pub fn compute(graph: &DependencyGraph, condensation: &Condensation) -> Self {
        let n = graph.node_count();

        let isolated_node_count = (0..n)
            .filter(|&idx| graph.successors(idx).is_empty() && graph.predecessors(idx).is_empty())
            .count();
        let max_in_degree = (0..n)
            .map(|idx| graph.predecessors(idx).len())
            .max()
            .unwrap_or(0);
        let max_out_degree = (0..n)
            .map(|idx| graph.successors(idx).len())
            .max()
            .unwrap_or(0);

        Self {
            node_count: n,
            edge_count: graph.edge_count(),
            density: density(graph),
            scc_count: condensation.len(),
            cycle_count: condensation.cyclic_components().count()
                + graph.self_loop_indices().len(),
            weakly_connected_component_count: connected_components(graph.graph()),
            isolated_node_count,
            max_in_degree,
            max_out_degree,
        }
    }

    /// Return `true` if the graph has no structural edges.
    #[must_use]
    pub const fn is_flat(&self) -> bool {
        self.edge_count == 0
    }

    /// Return `true` if the graph contains at least one dependency cycle.
    #[must_use]
    pub const fn has_cycles(&self) -> bool {
        self.cycle_count > 0
    }
}

#[allow(clippy::cast_precision_loss)]
fn compute_density(node_count: usize, edge_count: usize) -> f64 {
    if node_count < 2 {
        return 0.0_f64;
    }
    let max_edges = (node_count * (node_count - 1)) as f64;
    edge_count as f64 / max_edges
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    fn stats(graph: &DependencyGraph) -> GraphStats {
        GraphStats::compute(graph, &Condensation::new(graph))
    }

    #[test]
    fn density_edge_cases() {
        assert_eq!(density(&DependencyGraph::from_parts(&[], &[])), 0.0);
        assert_eq!(density(&DependencyGraph::from_parts(&["A"], &[])), 0.0);
        assert!((density(&DependencyGraph::from_edges(&[("A", "B")])) - 0.5).abs() < 1e-12);
        assert!(
            (density(&DependencyGraph::from_edges(&[("A", "B"), ("B", "A")])) - 1.0).abs() < 1e-12
        );
    }

    #[test]
    fn self_links_do_not_count_toward_density() {
        let graph = DependencyGraph::from_edges(&[("A", "A"), ("A", "B")]);
        assert!((density(&graph) - 0.5).abs() < 1e-12);
    }

    #[test]
    fn empty_graph_stats() {
        let s = stats(&DependencyGraph::from_parts(&[], &[]));
        assert_eq!(s.node_count, 0);
        assert_eq!(s.scc_count, 0);
        assert_eq!(s.weakly_connected_component_count, 0);
        assert!(s.is_flat());
        assert!(!s.has_cycles());
    }

    #[test]
    fn stats_for_mixed_graph() {
        // Cycle A ↔ B feeding C, a separate pair X → Y, an isolated Z, a self-linked S.
        let graph = DependencyGraph::from_parts(
            &["A", "B", "C", "S", "X", "Y", "Z"],
            &[("A", "B"), ("B", "A"), ("B", "C"), ("X", "Y"), ("S", "S")],
        );
        let s = stats(&graph);
        assert_eq!(s.node_count, 7);
        assert_eq!(s.edge_count, 4);
        assert_eq!(s.scc_count, 6);
        assert_eq!(s.cycle_count, 2);
        assert_eq!(s.weakly_connected_component_count, 4);
        assert_eq!(s.isolated_node_count, 2);
        assert_eq!(s.max_in_degree, 1);
        assert_eq!(s.max_out_degree, 2);
        assert!(s.has_cycles());
    }

    #[test]
    fn stats_serialize_to_json() {
        let s = stats(&DependencyGraph::from_edges(&[("A", "B")]));
        let json = serde_json::to_value(&s).expect("serialize");
        assert_eq!(json["node_count"], 2);
        assert_eq!(json["density"], 0.5);
    }
}
