//! Property tests over random dependency graphs.

use bv_analysis::{DependencyGraph, GraphAnalysis, MetricMap, top_items};
use proptest::prelude::*;

/// `(node count, edges as index pairs)`; self-links and duplicates included.
fn arb_graph() -> impl Strategy<Value = (usize, Vec<(usize, usize)>)> {
    (1usize..24).prop_flat_map(|n| (Just(n), prop::collection::vec((0..n, 0..n), 0..n * 3)))
}

fn build(n: usize, edges: &[(usize, usize)]) -> DependencyGraph {
    let ids: Vec<String> = (0..n).map(|i| format!("bv-{i:02}")).collect();
    let nodes: Vec<&str> = ids.iter().map(String::as_str).collect();
    let pairs: Vec<(&str, &str)> = edges
        .iter()
        .map(|&(a, b)| (nodes[a], nodes[b]))
        .collect();
    DependencyGraph::from_parts(&nodes, &pairs)
}

fn arb_metric() -> impl Strategy<Value = MetricMap> {
    // Few distinct values so ties are common.
    prop::collection::btree_map("[a-e]{1,3}", (0u8..4).prop_map(f64::from), 0..20)
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(200))]

    #[test]
    fn pagerank_conserves_mass((n, edges) in arb_graph()) {
        let analysis = GraphAnalysis::new(build(n, &edges));
        let total: f64 = analysis.pagerank().values().sum();
        prop_assert!((total - 1.0).abs() < 1e-4, "total = {}", total);
    }

    #[test]
    fn every_metric_covers_every_node((n, edges) in arb_graph()) {
        let analysis = GraphAnalysis::new(build(n, &edges));
        prop_assert_eq!(analysis.pagerank().len(), n);
        prop_assert_eq!(analysis.betweenness().len(), n);
        prop_assert_eq!(analysis.eigenvector().len(), n);
        prop_assert_eq!(analysis.hubs().len(), n);
        prop_assert_eq!(analysis.authorities().len(), n);
        prop_assert_eq!(analysis.critical_path_scores().len(), n);
        prop_assert_eq!(analysis.k_core().len(), n);
        prop_assert_eq!(analysis.topological_order().len(), n);
    }

    #[test]
    fn edge_order_does_not_matter((n, edges) in arb_graph()) {
        let mut reversed = edges.clone();
        reversed.reverse();
        let a = GraphAnalysis::new(build(n, &edges));
        let b = GraphAnalysis::new(build(n, &reversed));

        prop_assert_eq!(a.graph().content_hash(), b.graph().content_hash());
        prop_assert_eq!(a.pagerank(), b.pagerank());
        prop_assert_eq!(a.betweenness(), b.betweenness());
        prop_assert_eq!(a.eigenvector(), b.eigenvector());
        prop_assert_eq!(a.hubs(), b.hubs());
        prop_assert_eq!(a.critical_path_scores(), b.critical_path_scores());
        prop_assert_eq!(a.cycles(), b.cycles());
        prop_assert_eq!(
            serde_json::to_string(&a.generate_insights(5)).expect("serialize"),
            serde_json::to_string(&b.generate_insights(5)).expect("serialize")
        );
    }

    #[test]
    fn isolated_nodes_have_zero_betweenness((n, edges) in arb_graph()) {
        let analysis = GraphAnalysis::new(build(n, &edges));
        for id in analysis.orphans() {
            prop_assert_eq!(analysis.betweenness()[id], 0.0);
            prop_assert_eq!(analysis.k_core()[id], 0);
        }
    }

    #[test]
    fn critical_path_grows_across_components((n, edges) in arb_graph()) {
        let analysis = GraphAnalysis::new(build(n, &edges));
        let graph = analysis.graph();
        let condensation = analysis.condensation();
        let cp = analysis.critical_path_scores();
        for u in 0..graph.node_count() {
            for &v in graph.successors(u) {
                if !condensation.same_component(u, v) {
                    prop_assert!(cp[graph.id_at(v)] >= cp[graph.id_at(u)] + 1.0);
                }
            }
        }
    }

    #[test]
    fn reported_cycles_follow_edges((n, edges) in arb_graph()) {
        let analysis = GraphAnalysis::new(build(n, &edges));
        let graph = analysis.graph();
        for cycle in analysis.cycles() {
            if cycle.len() == 1 {
                prop_assert!(graph.self_loops().any(|id| id == cycle[0]));
                continue;
            }
            for (i, from) in cycle.iter().enumerate() {
                let to = &cycle[(i + 1) % cycle.len()];
                prop_assert!(graph.outgoing(from).contains(&to.as_str()));
            }
        }
    }

    #[test]
    fn top_items_obeys_tie_break_law(metric in arb_metric(), limit in -2i64..25) {
        let items = top_items(&metric, limit);

        let expected_len = if limit <= 0 {
            metric.len()
        } else {
            metric.len().min(usize::try_from(limit).expect("positive"))
        };
        prop_assert_eq!(items.len(), expected_len);

        for pair in items.windows(2) {
            let (a, b) = (&pair[0], &pair[1]);
            prop_assert!(a.value > b.value || (a.value == b.value && a.id < b.id));
        }
    }
}
