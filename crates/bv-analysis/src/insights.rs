//! Ranked, presentation-ready summaries of a [`GraphAnalysis`].
//!
//! Every list is ordered by value descending with exact ties broken by item
//! ID ascending, so two runs over equal snapshots produce identical output
//! (and identical JSON) no matter how the input was ordered.

use std::cmp::Ordering;

use serde::Serialize;
use tracing::{debug, instrument};

use crate::analysis::GraphAnalysis;
use crate::metrics::MetricMap;

/// One ranked entry of an insight list.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct InsightItem {
    pub id: String,
    pub value: f64,
}

/// High-level summary of a graph analysis.
#[derive(Debug, Clone, Serialize)]
pub struct Insights<'a> {
    /// Top betweenness: items many shortest dependency paths run through.
    pub bottlenecks: Vec<InsightItem>,
    /// Top critical-path depth: items at the end of the longest chains.
    pub keystones: Vec<InsightItem>,
    /// Top eigenvector centrality.
    pub influencers: Vec<InsightItem>,
    /// Top HITS hubs: items aggregating many prerequisites.
    pub hubs: Vec<InsightItem>,
    /// Top HITS authorities: foundational enablers.
    pub authorities: Vec<InsightItem>,
    /// Items with no structural edges, sorted by ID.
    pub orphans: Vec<String>,
    /// One representative cycle per SCC plus self-links.
    pub cycles: Vec<Vec<String>>,
    /// Directed density of the snapshot.
    pub cluster_density: f64,
    /// The full analysis, for explaining a ranking. Not serialized.
    #[serde(skip)]
    pub stats: &'a GraphAnalysis,
}

/// Rank a metric map and keep the first `limit` entries (`<= 0` keeps all).
#[must_use]
pub fn top_items(metric: &MetricMap, limit: i64) -> Vec<InsightItem> {
    let mut items: Vec<InsightItem> = metric
        .iter()
        .map(|(id, &value)| InsightItem {
            id: id.clone(),
            value,
        })
        .collect();
    items.sort_by(rank_order);

    if limit > 0 {
        items.truncate(usize::try_from(limit).unwrap_or(usize::MAX));
    }
    items
}

/// Value descending, NaN after every number, then ID ascending.
fn rank_order(a: &InsightItem, b: &InsightItem) -> Ordering {
    let by_value = match (a.value.is_nan(), b.value.is_nan()) {
        (false, false) => b.value.partial_cmp(&a.value).unwrap_or(Ordering::Equal),
        (true, false) => Ordering::Greater,
        (false, true) => Ordering::Less,
        (true, true) => Ordering::Equal,
    };
    by_value.then_with(|| a.id.cmp(&b.id))
}

impl GraphAnalysis {
    /// Build the ranked summary, computing whichever metrics are still
    /// missing from the cache.
    #[must_use]
    #[instrument(skip(self), fields(nodes = self.graph().node_count()))]
    pub fn generate_insights(&self, limit: i64) -> Insights<'_> {
        let insights = Insights {
            bottlenecks: top_items(self.betweenness(), limit),
            keystones: top_items(self.critical_path_scores(), limit),
            influencers: top_items(self.eigenvector(), limit),
            hubs: top_items(self.hubs(), limit),
            authorities: top_items(self.authorities(), limit),
            orphans: self.orphans().to_vec(),
            cycles: self.cycles().to_vec(),
            cluster_density: self.density(),
            stats: self,
        };
        debug!(
            cycles = insights.cycles.len(),
            orphans = insights.orphans.len(),
            "insights generated"
        );
        insights
    }

    /// [`generate_insights`](Self::generate_insights) with the configured
    /// limit.
    #[must_use]
    pub fn insights(&self) -> Insights<'_> {
        self.generate_insights(self.config().limit)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::build::DependencyGraph;

    fn map(entries: &[(&str, f64)]) -> MetricMap {
        entries.iter().map(|(id, v)| ((*id).to_string(), *v)).collect()
    }

    fn ids(items: &[InsightItem]) -> Vec<&str> {
        items.iter().map(|item| item.id.as_str()).collect()
    }

    #[test]
    fn ties_break_by_id() {
        let items = top_items(&map(&[("bv-2", 1.0), ("bv-1", 1.0)]), 2);
        assert_eq!(ids(&items), vec!["bv-1", "bv-2"]);
    }

    #[test]
    fn values_sort_descending() {
        let items = top_items(&map(&[("a", 0.1), ("b", 0.9), ("c", 0.5)]), 10);
        assert_eq!(ids(&items), vec!["b", "c", "a"]);
    }

    #[test]
    fn limit_truncates() {
        let items = top_items(&map(&[("a", 3.0), ("b", 2.0), ("c", 1.0)]), 2);
        assert_eq!(ids(&items), vec!["a", "b"]);
    }

    #[test]
    fn non_positive_limit_returns_everything() {
        let metric = map(&[("a", 3.0), ("b", 2.0), ("c", 1.0)]);
        assert_eq!(top_items(&metric, 0).len(), 3);
        assert_eq!(top_items(&metric, -1).len(), 3);
    }

    #[test]
    fn nan_sorts_last_without_panicking() {
        let items = top_items(&map(&[("a", f64::NAN), ("b", 0.0), ("c", 1.0)]), 0);
        assert_eq!(ids(&items), vec!["c", "b", "a"]);
    }

    #[test]
    fn signed_zeros_tie() {
        let items = top_items(&map(&[("b", 0.0), ("a", -0.0)]), 0);
        assert_eq!(ids(&items), vec!["a", "b"]);
    }

    #[test]
    fn empty_graph_gives_empty_insights() {
        let analysis = GraphAnalysis::new(DependencyGraph::from_edges(&[]));
        let insights = analysis.generate_insights(5);
        assert!(insights.bottlenecks.is_empty());
        assert!(insights.keystones.is_empty());
        assert!(insights.influencers.is_empty());
        assert!(insights.hubs.is_empty());
        assert!(insights.authorities.is_empty());
        assert!(insights.orphans.is_empty());
        assert!(insights.cycles.is_empty());
        assert_eq!(insights.cluster_density, 0.0);
    }

    #[test]
    fn insights_pick_the_expected_items() {
        // A → B → C plus a lone D.
        let graph = DependencyGraph::from_parts(&["A", "B", "C", "D"], &[("A", "B"), ("B", "C")]);
        let analysis = GraphAnalysis::new(graph);
        let insights = analysis.generate_insights(1);

        assert_eq!(ids(&insights.bottlenecks), vec!["B"]);
        assert_eq!(ids(&insights.keystones), vec!["C"]);
        assert_eq!(insights.orphans, vec!["D"]);
        assert!(insights.cycles.is_empty());
        assert!((insights.cluster_density - 2.0 / 12.0).abs() < 1e-12);
        assert!(std::ptr::eq(insights.stats, &analysis));
    }

    #[test]
    fn configured_limit_is_used() {
        let graph = DependencyGraph::from_edges(&[("A", "B"), ("B", "C"), ("C", "D")]);
        let config = bv_core::AnalysisConfig {
            limit: 2,
            ..bv_core::AnalysisConfig::default()
        };
        let analysis = GraphAnalysis::with_config(graph, config).expect("valid config");
        assert_eq!(analysis.insights().keystones.len(), 2);
    }
}
