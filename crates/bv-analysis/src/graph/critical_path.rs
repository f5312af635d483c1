//! Critical-path depth for every item.
//!
//! # Definition
//!
//! An item's critical-path score is the length, in edges, of the longest
//! chain of prerequisites ending at it: `0` for an item with no
//! prerequisites, otherwise `1 + max(score of each prerequisite)`. A deep
//! item sits at the end of a long chain, so a delay anywhere upstream pushes
//! it out; a high score is a high downstream impact if the chain slips.
//!
//! # Cycles
//!
//! Longest paths are undefined through a cycle. We compute on the SCC
//! condensation instead: components are processed in topological order and
//! an item inside a cyclic component only counts prerequisites that live
//! *outside* its component. Edges within a cycle are ignored for scoring,
//! so cycle members get a finite, best-effort score.

#![allow(clippy::module_name_repetitions)]

use tracing::instrument;

use crate::graph::build::DependencyGraph;
use crate::graph::cycles::Condensation;
use crate::metrics::{MetricMap, scores_to_map};

/// Per-item depths plus one longest chain for explanation.
#[derive(Debug, Clone, PartialEq)]
pub struct CriticalPathResult {
    /// Longest-prerequisite-chain length per item ID.
    pub scores: MetricMap,
    /// One longest chain, prerequisites first, ending at the deepest item
    /// (ties go to the smallest ID at every step).
    pub longest_path: Vec<String>,
}

impl CriticalPathResult {
    /// Edge count of the longest chain.
    #[must_use]
    pub fn length(&self) -> usize {
        self.longest_path.len().saturating_sub(1)
    }
}

/// Compute critical-path depth for every item.
#[must_use]
#[instrument(skip_all, fields(nodes = graph.node_count()))]
pub fn critical_path_scores(
    graph: &DependencyGraph,
    condensation: &Condensation,
) -> CriticalPathResult {
    let depth = longest_chain_depths(graph, condensation);

    #[allow(clippy::cast_precision_loss)]
    let as_f64: Vec<f64> = depth.iter().map(|&d| d as f64).collect();

    CriticalPathResult {
        scores: scores_to_map(graph, &as_f64),
        longest_path: reconstruct_longest_path(graph, condensation, &depth)
            .into_iter()
            .map(|idx| graph.id_at(idx).to_string())
            .collect(),
    }
}

fn longest_chain_depths(graph: &DependencyGraph, condensation: &Condensation) -> Vec<usize> {
    let mut depth = vec![0usize; graph.node_count()];

    // Components arrive prerequisites-first, so every cross-component
    // predecessor already has its final depth.
    for members in &condensation.components {
        for &v in members {
            depth[v] = graph
                .predecessors(v)
                .iter()
                .filter(|&&u| !condensation.same_component(u, v))
                .map(|&u| depth[u] + 1)
                .max()
                .unwrap_or(0);
        }
    }

    depth
}

fn reconstruct_longest_path(
    graph: &DependencyGraph,
    condensation: &Condensation,
    depth: &[usize],
) -> Vec<usize> {
    // First maximum in index order = smallest ID among the deepest items.
    let Some(mut current) = (0..depth.len()).reduce(|best, i| if depth[i] > depth[best] { i } else { best })
    else {
        return Vec::new();
    };

    let mut path = vec![current];
    while depth[current] > 0 {
        let Some(&prev) = graph.predecessors(current).iter().find(|&&u| {
            !condensation.same_component(u, current) && depth[u] + 1 == depth[current]
        }) else {
            break;
        };
        path.push(prev);
        current = prev;
    }

    path.reverse();
    path
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    fn run(graph: &DependencyGraph) -> CriticalPathResult {
        critical_path_scores(graph, &Condensation::new(graph))
    }

    #[test]
    fn empty_graph_returns_empty_result() {
        let result = run(&DependencyGraph::from_parts(&[], &[]));
        assert!(result.scores.is_empty());
        assert!(result.longest_path.is_empty());
        assert_eq!(result.length(), 0);
    }

    #[test]
    fn isolated_node_scores_zero() {
        let result = run(&DependencyGraph::from_parts(&["A"], &[]));
        assert_eq!(result.scores["A"], 0.0);
        assert_eq!(result.longest_path, vec!["A".to_string()]);
    }

    #[test]
    fn linear_chain_counts_edges() {
        // D depends on C depends on B depends on A.
        let result = run(&DependencyGraph::from_edges(&[("A", "B"), ("B", "C"), ("C", "D")]));
        assert_eq!(result.scores["A"], 0.0);
        assert_eq!(result.scores["B"], 1.0);
        assert_eq!(result.scores["C"], 2.0);
        assert_eq!(result.scores["D"], 3.0);
        assert_eq!(result.longest_path, vec!["A", "B", "C", "D"]);
        assert_eq!(result.length(), 3);
    }

    #[test]
    fn longest_branch_wins() {
        // A → B → C → E and A → D → E: E = 3 via the longer branch.
        let result = run(&DependencyGraph::from_edges(&[
            ("A", "B"),
            ("B", "C"),
            ("C", "E"),
            ("A", "D"),
            ("D", "E"),
        ]));
        assert_eq!(result.scores["D"], 1.0);
        assert_eq!(result.scores["E"], 3.0);
        assert_eq!(result.longest_path, vec!["A", "B", "C", "E"]);
    }

    #[test]
    fn diamond_ties_break_toward_smallest_id() {
        let result = run(&DependencyGraph::from_edges(&[
            ("A", "B"),
            ("A", "C"),
            ("B", "D"),
            ("C", "D"),
        ]));
        assert_eq!(result.scores["D"], 2.0);
        assert_eq!(result.longest_path, vec!["A", "B", "D"]);
    }

    #[test]
    fn cycle_members_use_only_external_prerequisites() {
        // X → A, A → B → C → A (cycle), C → D.
        let result = run(&DependencyGraph::from_edges(&[
            ("X", "A"),
            ("A", "B"),
            ("B", "C"),
            ("C", "A"),
            ("C", "D"),
        ]));
        assert_eq!(result.scores["X"], 0.0);
        assert_eq!(result.scores["A"], 1.0, "A counts X, ignores C");
        assert_eq!(result.scores["B"], 0.0, "B's only prerequisite is cyclic");
        assert_eq!(result.scores["C"], 0.0);
        assert_eq!(result.scores["D"], 1.0, "D sits one past C");
    }

    #[test]
    fn pure_cycle_scores_zero_everywhere() {
        let result = run(&DependencyGraph::from_edges(&[("A", "B"), ("B", "A")]));
        assert_eq!(result.scores["A"], 0.0);
        assert_eq!(result.scores["B"], 0.0);
    }

    #[test]
    fn every_node_gets_a_score() {
        let graph = DependencyGraph::from_parts(&["A", "B", "Z"], &[("A", "B")]);
        let result = run(&graph);
        assert_eq!(result.scores.len(), 3);
        assert_eq!(result.scores["Z"], 0.0);
    }
}
