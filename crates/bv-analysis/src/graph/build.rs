//! Graph construction from work items and dependency links.
//!
//! # Edge Direction
//!
//! An edge `A → B` in the graph means "A **enables** B": B depends on A, so
//! A must be resolved first. For each link
//! `(issue_id = B, depends_on_id = A, kind = blocks)` we insert `A → B`.
//! Importance flows from prerequisites to dependents along these edges.
//!
//! ## Only Structural Edges
//!
//! Only `blocks` and `parent-child` links enter the graph. Informational
//! kinds (`related`, `discovered-from`, …) are ignored.
//!
//! ## Tolerated Input
//!
//! Live trackers hand us messy data, so construction never fails:
//!
//! - links to ids outside the item set are dropped (the data may be scoped
//!   to a subgraph);
//! - duplicate links collapse into one edge;
//! - a repeated item id keeps its first occurrence;
//! - self-links stay out of the adjacency but are remembered so cycle
//!   reporting can surface them.
//!
//! ## Node Order
//!
//! Nodes are stored sorted by id. Index `i` means the same item in every
//! algorithm, and every adjacency list is sorted by index, so floating-point
//! summation order never depends on input order.

#![allow(clippy::module_name_repetitions)]

use std::collections::HashMap;

use bv_core::model::{Dependency, Issue};
use petgraph::graph::{DiGraph, NodeIndex};
use tracing::{debug, instrument};

// ---------------------------------------------------------------------------
// DependencyGraph
// ---------------------------------------------------------------------------

/// An immutable snapshot of items and their structural dependency edges.
#[derive(Debug, Clone)]
pub struct DependencyGraph {
    /// Directed graph: nodes = item IDs, edges = prerequisite → dependent.
    graph: DiGraph<String, ()>,
    /// Mapping from item ID to petgraph `NodeIndex`.
    node_map: HashMap<String, NodeIndex>,
    /// Item metadata, aligned with node indices.
    issues: Vec<Issue>,
    /// Sorted, deduplicated successor indices per node.
    outgoing: Vec<Vec<usize>>,
    /// Sorted, deduplicated predecessor indices per node.
    incoming: Vec<Vec<usize>>,
    /// Nodes that had a link to themselves (sorted).
    self_loops: Vec<usize>,
    edge_count: usize,
    content_hash: String,
}

impl DependencyGraph {
    /// Build a snapshot from items and their dependency links.
    ///
    /// Links are filtered and deduplicated as described in the module docs.
    /// Runs in `O(V log V + E)`: the node sort dominates, edges are bucketed
    /// twice by index instead of being sorted.
    #[must_use]
    #[instrument(skip_all, fields(issues = issues.len(), dependencies = dependencies.len()))]
    pub fn build(issues: &[Issue], dependencies: &[Dependency]) -> Self {
        let mut first_seen: HashMap<&str, &Issue> = HashMap::with_capacity(issues.len());
        for issue in issues {
            first_seen.entry(issue.id.as_str()).or_insert(issue);
        }
        let mut nodes: Vec<Issue> = first_seen.into_values().cloned().collect();
        nodes.sort_unstable_by(|a, b| a.id.cmp(&b.id));

        let n = nodes.len();
        let mut graph = DiGraph::<String, ()>::with_capacity(n, dependencies.len());
        let mut node_map: HashMap<String, NodeIndex> = HashMap::with_capacity(n);
        for issue in &nodes {
            let idx = graph.add_node(issue.id.clone());
            node_map.insert(issue.id.clone(), idx);
        }

        // Bucket by source first so each incoming list fills in ascending
        // source order; duplicates end up adjacent.
        let mut by_source: Vec<Vec<usize>> = vec![Vec::new(); n];
        let mut self_loops: Vec<usize> = Vec::new();
        let mut dropped = 0usize;
        let mut ignored = 0usize;

        for dep in dependencies {
            if !dep.kind.is_structural() {
                ignored += 1;
                continue;
            }
            let (Some(from), Some(to)) = (
                node_map.get(&dep.depends_on_id),
                node_map.get(&dep.issue_id),
            ) else {
                dropped += 1;
                continue;
            };
            if from == to {
                self_loops.push(from.index());
            } else {
                by_source[from.index()].push(to.index());
            }
        }
        self_loops.sort_unstable();
        self_loops.dedup();

        let mut incoming: Vec<Vec<usize>> = vec![Vec::new(); n];
        for (source, targets) in by_source.iter().enumerate() {
            for &target in targets {
                incoming[target].push(source);
            }
        }
        for sources in &mut incoming {
            sources.dedup();
        }

        let mut outgoing: Vec<Vec<usize>> = vec![Vec::new(); n];
        for (target, sources) in incoming.iter().enumerate() {
            for &source in sources {
                outgoing[source].push(target);
            }
        }

        let mut edge_count = 0;
        for (source, targets) in outgoing.iter().enumerate() {
            for &target in targets {
                graph.add_edge(NodeIndex::new(source), NodeIndex::new(target), ());
                edge_count += 1;
            }
        }

        let content_hash = compute_content_hash(&nodes, &outgoing, &self_loops);

        debug!(
            nodes = n,
            edges = edge_count,
            self_loops = self_loops.len(),
            dropped_dangling = dropped,
            ignored_non_structural = ignored,
            "built dependency graph"
        );

        Self {
            graph,
            node_map,
            issues: nodes,
            outgoing,
            incoming,
            self_loops,
            edge_count,
            content_hash,
        }
    }

    /// Build a snapshot from bare ids and `(prerequisite, dependent)` pairs.
    ///
    /// Every id must be listed in `nodes`; edges touching other ids are
    /// dropped exactly as in [`DependencyGraph::build`].
    #[must_use]
    pub fn from_parts(nodes: &[&str], edges: &[(&str, &str)]) -> Self {
        let issues: Vec<Issue> = nodes.iter().map(|id| Issue::new(*id, *id)).collect();
        let deps: Vec<Dependency> = edges
            .iter()
            .map(|(prerequisite, dependent)| Dependency::blocks(*dependent, *prerequisite))
            .collect();
        Self::build(&issues, &deps)
    }

    /// Build a snapshot whose node set is every id mentioned in `edges`.
    #[must_use]
    pub fn from_edges(edges: &[(&str, &str)]) -> Self {
        let mut nodes: Vec<&str> = edges.iter().flat_map(|(a, b)| [*a, *b]).collect();
        nodes.sort_unstable();
        nodes.dedup();
        Self::from_parts(&nodes, edges)
    }

    /// Return the number of nodes (items) in the graph.
    #[must_use]
    pub fn node_count(&self) -> usize {
        self.issues.len()
    }

    /// Return the number of structural edges (self-links excluded).
    #[must_use]
    pub const fn edge_count(&self) -> usize {
        self.edge_count
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.issues.is_empty()
    }

    /// Item IDs in node-index order (lexicographic).
    pub fn ids(&self) -> impl ExactSizeIterator<Item = &str> {
        self.issues.iter().map(|issue| issue.id.as_str())
    }

    /// Item metadata in node-index order.
    #[must_use]
    pub fn issues(&self) -> &[Issue] {
        &self.issues
    }

    /// Look up the node index for an item ID.
    #[must_use]
    pub fn index_of(&self, item_id: &str) -> Option<usize> {
        self.node_map.get(item_id).map(|idx| idx.index())
    }

    /// Return the item ID at a node index.
    ///
    /// # Panics
    ///
    /// Panics if `idx >= node_count()`.
    #[must_use]
    pub fn id_at(&self, idx: usize) -> &str {
        &self.issues[idx].id
    }

    /// Item metadata for an ID, if it is part of the snapshot.
    #[must_use]
    pub fn issue(&self, item_id: &str) -> Option<&Issue> {
        self.index_of(item_id).map(|idx| &self.issues[idx])
    }

    /// Successors (dependents) of a node, sorted by index.
    #[must_use]
    pub fn successors(&self, idx: usize) -> &[usize] {
        &self.outgoing[idx]
    }

    /// Predecessors (prerequisites) of a node, sorted by index.
    #[must_use]
    pub fn predecessors(&self, idx: usize) -> &[usize] {
        &self.incoming[idx]
    }

    /// IDs of the items that depend on `item_id`.
    #[must_use]
    pub fn outgoing(&self, item_id: &str) -> Vec<&str> {
        self.index_of(item_id)
            .map(|idx| self.outgoing[idx].iter().map(|&t| self.id_at(t)).collect())
            .unwrap_or_default()
    }

    /// IDs of the items `item_id` depends on.
    #[must_use]
    pub fn incoming(&self, item_id: &str) -> Vec<&str> {
        self.index_of(item_id)
            .map(|idx| self.incoming[idx].iter().map(|&s| self.id_at(s)).collect())
            .unwrap_or_default()
    }

    /// Node indices that carried a self-link in the input.
    #[must_use]
    pub fn self_loop_indices(&self) -> &[usize] {
        &self.self_loops
    }

    /// IDs of items that were linked to themselves.
    pub fn self_loops(&self) -> impl Iterator<Item = &str> {
        self.self_loops.iter().map(|&idx| self.id_at(idx))
    }

    /// The underlying petgraph view (no self-loops).
    #[must_use]
    pub const fn graph(&self) -> &DiGraph<String, ()> {
        &self.graph
    }

    /// BLAKE3 hash of the node set and structural edge set.
    ///
    /// Equal hashes mean equal snapshots regardless of input order.
    #[must_use]
    pub fn content_hash(&self) -> &str {
        &self.content_hash
    }
}

// ---------------------------------------------------------------------------
// Internal helpers
// ---------------------------------------------------------------------------

fn compute_content_hash(nodes: &[Issue], outgoing: &[Vec<usize>], self_loops: &[usize]) -> String {
    let mut hasher = blake3::Hasher::new();
    for issue in nodes {
        hasher.update(issue.id.as_bytes());
        hasher.update(b"\x00");
    }
    hasher.update(b"\x01");
    for (source, targets) in outgoing.iter().enumerate() {
        for &target in targets {
            hasher.update(nodes[source].id.as_bytes());
            hasher.update(b"\x00");
            hasher.update(nodes[target].id.as_bytes());
            hasher.update(b"\x00");
        }
    }
    hasher.update(b"\x01");
    for &idx in self_loops {
        hasher.update(nodes[idx].id.as_bytes());
        hasher.update(b"\x00");
    }
    format!("blake3:{}", hasher.finalize())
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
