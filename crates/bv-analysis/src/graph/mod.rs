//! Dependency graph module for triage analysis.
//!
//! # Overview
//!
//! This module turns a snapshot of items and dependency links into an
//! immutable petgraph-backed [`DependencyGraph`], then derives the structural
//! views every metric builds on.
//!
//! ## Pipeline
//!
//! ```text
//! &[Issue] + &[Dependency]
//!        ↓  build::DependencyGraph::build()
//! DependencyGraph (sorted nodes, structural edges, self-links recorded)
//!        ↓  cycles::Condensation::new()
//! Condensation (SCCs in topological order)
//!   ├─ cycles::find_cycles()                 one witness cycle per SCC
//!   ├─ critical_path::critical_path_scores() longest prerequisite chains
//!   └─ stats::GraphStats::compute()          density, component counts, …
//! ```
//!
//! [`kcore::k_core_decomposition`] needs only the snapshot itself.
//!
//! ## Cache Invalidation
//!
//! [`DependencyGraph::content_hash`] is a BLAKE3 hash of the node and edge
//! sets. Compare it against a stored value to detect when an analysis needs
//! to be recomputed.
//!
//! ## Typical Usage
//!
//! ```rust,ignore
//! use bv_analysis::graph::{Condensation, DependencyGraph, GraphStats};
//!
//! let graph = DependencyGraph::build(&issues, &deps);
//! let condensation = Condensation::new(&graph);
//! let stats = GraphStats::compute(&graph, &condensation);
//!
//! println!("nodes={} edges={} density={:.3} cycles={}",
//!     stats.node_count, stats.edge_count, stats.density, stats.cycle_count);
//! ```

pub mod build;
pub mod critical_path;
pub mod cycles;
pub mod kcore;
pub mod stats;

// Re-export primary types at module level for convenience.
pub use build::DependencyGraph;
pub use critical_path::{CriticalPathResult, critical_path_scores};
pub use cycles::{Condensation, CycleReport, find_cycles, report_cycles_with_breaks};
pub use kcore::{CorenessMap, degeneracy, k_core_decomposition};
pub use stats::{GraphStats, density};
