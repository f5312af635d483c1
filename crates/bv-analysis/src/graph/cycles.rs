//! Strongly connected components and dependency-cycle reporting.
//!
//! # Edge Direction
//!
//! The graph uses edge direction `prerequisite → dependent`. A cycle means a
//! set of items that (transitively) wait on each other, so none of them can
//! ever be started first. Cycles are a data smell surfaced as an insight and
//! the reason critical-path scoring needs a cycle-breaking policy.
//!
//! # Output Shape
//!
//! [`find_cycles`] reports one representative simple cycle per non-trivial
//! SCC (plus one single-element cycle per self-link), each as the ordered
//! path of item IDs. Enumerating every elementary cycle is exponential in the
//! worst case; one witness per SCC is enough to act on.

#![allow(clippy::module_name_repetitions)]

use std::collections::{HashMap, HashSet, VecDeque};

use petgraph::algo::tarjan_scc;
use serde::Serialize;
use tracing::instrument;

use crate::graph::build::DependencyGraph;

// ---------------------------------------------------------------------------
// Condensation
// ---------------------------------------------------------------------------

/// The SCC structure of a [`DependencyGraph`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Condensation {
    /// SCCs in topological order (prerequisite components first). Members
    /// are node indices sorted ascending, so the first member is also the
    /// lexicographically smallest ID.
    pub components: Vec<Vec<usize>>,
    /// Component index (into `components`) for every node.
    pub component_of: Vec<usize>,
}

impl Condensation {
    /// Run Tarjan's SCC algorithm over the snapshot.
    #[must_use]
    #[instrument(skip_all, fields(nodes = graph.node_count()))]
    pub fn new(graph: &DependencyGraph) -> Self {
        // tarjan_scc yields components in reverse topological order.
        let mut components: Vec<Vec<usize>> = tarjan_scc(graph.graph())
            .into_iter()
            .map(|component| {
                let mut members: Vec<usize> = component.into_iter().map(|i| i.index()).collect();
                members.sort_unstable();
                members
            })
            .collect();
        components.reverse();

        let mut component_of = vec![0; graph.node_count()];
        for (c, members) in components.iter().enumerate() {
            for &m in members {
                component_of[m] = c;
            }
        }

        Self {
            components,
            component_of,
        }
    }

    /// Number of SCCs (equals the node count in an acyclic graph).
    #[must_use]
    pub fn len(&self) -> usize {
        self.components.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.components.is_empty()
    }

    /// Components with more than one member.
    pub fn cyclic_components(&self) -> impl Iterator<Item = &[usize]> {
        self.components
            .iter()
            .filter(|members| members.len() > 1)
            .map(Vec::as_slice)
    }

    /// Whether `u` and `v` sit in the same SCC.
    #[must_use]
    pub fn same_component(&self, u: usize, v: usize) -> bool {
        self.component_of[u] == self.component_of[v]
    }
}

// ---------------------------------------------------------------------------
// Cycle listing
// ---------------------------------------------------------------------------

/// Find one representative cycle per non-trivial SCC, plus self-links.
///
/// Each cycle is the shortest one through the SCC's smallest member, listed
/// as `[start, …, last]` where `last → start` closes the loop. Self-links
/// appear as single-element cycles. The list is sorted lexicographically.
#[must_use]
#[instrument(skip_all)]
pub fn find_cycles(graph: &DependencyGraph, condensation: &Condensation) -> Vec<Vec<String>> {
    let mut cycles: Vec<Vec<String>> = condensation
        .cyclic_components()
        .map(|members| {
            shortest_cycle_through(graph, condensation, members[0])
                .into_iter()
                .map(|idx| graph.id_at(idx).to_string())
                .collect()
        })
        .collect();

    cycles.extend(graph.self_loops().map(|id| vec![id.to_string()]));
    cycles.sort_unstable();
    cycles
}

/// BFS from `start` inside its SCC until some node links back to `start`.
fn shortest_cycle_through(
    graph: &DependencyGraph,
    condensation: &Condensation,
    start: usize,
) -> Vec<usize> {
    let mut parent: HashMap<usize, usize> = HashMap::new();
    let mut queue: VecDeque<usize> = VecDeque::from([start]);
    let mut seen: HashSet<usize> = HashSet::from([start]);

    while let Some(current) = queue.pop_front() {
        if current != start && graph.successors(current).binary_search(&start).is_ok() {
            let mut path = vec![current];
            let mut cursor = current;
            while let Some(&prev) = parent.get(&cursor) {
                path.push(prev);
                cursor = prev;
            }
            path.reverse();
            return path;
        }

        for &next in graph.successors(current) {
            if condensation.same_component(start, next) && seen.insert(next) {
                parent.insert(next, current);
                queue.push_back(next);
            }
        }
    }

    // Unreachable for a genuine SCC of size > 1; report the start alone.
    vec![start]
}

// ---------------------------------------------------------------------------
// Cycle break suggestions
// ---------------------------------------------------------------------------

/// A detected dependency cycle with suggested edges to remove to break it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CycleReport {
    /// Sorted item IDs that form this cycle (members of the SCC).
    pub members: Vec<String>,
    /// Suggested `(prerequisite, dependent)` edges to remove.
    ///
    /// These are back-edges found by DFS within the SCC. Removing all of
    /// them makes the SCC acyclic; often one is enough.
    pub suggested_breaks: Vec<(String, String)>,
}

/// Detect all cycles and, for each, suggest edges to remove to break them.
///
/// Self-links are reported with the single edge `(id, id)` as the break.
#[must_use]
#[instrument(skip_all)]
pub fn report_cycles_with_breaks(
    graph: &DependencyGraph,
    condensation: &Condensation,
) -> Vec<CycleReport> {
    let mut reports: Vec<CycleReport> = condensation
        .cyclic_components()
        .map(|members| CycleReport {
            members: members.iter().map(|&m| graph.id_at(m).to_string()).collect(),
            suggested_breaks: find_back_edges_in_scc(graph, condensation, members)
                .into_iter()
                .map(|(u, v)| (graph.id_at(u).to_string(), graph.id_at(v).to_string()))
                .collect(),
        })
        .collect();

    reports.extend(graph.self_loops().map(|id| CycleReport {
        members: vec![id.to_string()],
        suggested_breaks: vec![(id.to_string(), id.to_string())],
    }));

    reports.sort_unstable_by(|a, b| a.members.cmp(&b.members));
    reports
}

/// Iterative DFS within one SCC collecting edges that point at an ancestor.
///
/// Starts from the smallest member and walks successors in index order, so
/// the suggestion set is deterministic.
fn find_back_edges_in_scc(
    graph: &DependencyGraph,
    condensation: &Condensation,
    members: &[usize],
) -> Vec<(usize, usize)> {
    let mut visited: HashSet<usize> = HashSet::with_capacity(members.len());
    let mut on_path: HashSet<usize> = HashSet::new();
    let mut back_edges: Vec<(usize, usize)> = Vec::new();

    for &root in members {
        if !visited.insert(root) {
            continue;
        }
        on_path.insert(root);
        // Each frame: (node, position in its successor list).
        let mut stack: Vec<(usize, usize)> = vec![(root, 0)];

        while let Some(frame) = stack.last_mut() {
            let (current, pos) = *frame;
            let successors = graph.successors(current);

            if pos < successors.len() {
                frame.1 += 1;
                let next = successors[pos];
                if !condensation.same_component(current, next) {
                    continue;
                }
                if on_path.contains(&next) {
                    back_edges.push((current, next));
                } else if visited.insert(next) {
                    on_path.insert(next);
                    stack.push((next, 0));
                }
            } else {
                on_path.remove(&current);
                stack.pop();
            }
        }
    }

    back_edges
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
