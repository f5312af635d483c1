#![forbid(unsafe_code)]
//! bv-analysis library.
//!
//! Graph analytics over a snapshot of work items and their dependency links:
//! PageRank, betweenness, eigenvector centrality, HITS, critical-path depth,
//! k-core coreness, cycle detection, and density, surfaced as ranked
//! [`Insights`].
//!
//! ```rust,ignore
//! use bv_analysis::{DependencyGraph, GraphAnalysis};
//!
//! let analysis = GraphAnalysis::new(DependencyGraph::build(&issues, &deps));
//! let insights = analysis.generate_insights(5);
//! println!("{}", serde_json::to_string_pretty(&insights)?);
//! ```
//!
//! # Conventions
//!
//! - **Errors**: The engine degrades instead of failing; the only error it
//!   returns is a rejected [`AnalysisConfig`](bv_core::AnalysisConfig).
//! - **Logging**: Use `tracing` macros (`info!`, `warn!`, `error!`, `debug!`, `trace!`).

pub mod analysis;
pub mod cache;
pub mod graph;
pub mod insights;
pub mod metrics;

pub use analysis::GraphAnalysis;
pub use cache::MetricsCache;
pub use graph::{CycleReport, DependencyGraph, GraphStats};
pub use insights::{InsightItem, Insights, top_items};
pub use metrics::MetricMap;
