//! Property Tests - Clock Algebra and Graph Laws
//!
//! Randomized checks with proptest: happens-before is a strict partial
//! order, built graphs are acyclic and reduction preserves reachability.

use hbgraph_core::{CausalGraph, EventId, Trace, TraceGenerator, VectorClock};
use proptest::prelude::*;
use rand::seq::SliceRandom;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

fn clock() -> impl Strategy<Value = VectorClock> {
    prop::collection::btree_map("[A-D]", 0u64..4, 0..4)
        .prop_map(|entries| entries.into_iter().collect::<VectorClock>())
}

fn trace() -> impl Strategy<Value = Trace> {
    (2usize..6, 0usize..60, any::<u64>()).prop_map(|(processes, events, seed)| {
        let names: Vec<String> = (0..processes).map(|p| format!("P{p}")).collect();
        TraceGenerator::new(names, seed).unwrap().generate(events)
    })
}

/// Same nodes and edges, with every adjacency list in a random order
fn shuffled(graph: &CausalGraph, seed: u64) -> CausalGraph {
    let mut edges: Vec<(EventId, EventId)> = graph.edge_pairs().collect();
    edges.shuffle(&mut ChaCha8Rng::seed_from_u64(seed));
    CausalGraph::from_parts(graph.events().to_vec(), edges).unwrap()
}

fn sorted_edges(graph: &CausalGraph) -> Vec<(EventId, EventId)> {
    let mut edges: Vec<_> = graph.edge_pairs().collect();
    edges.sort_unstable();
    edges
}

fn reach_matrix(graph: &CausalGraph) -> Vec<Vec<EventId>> {
    (0..graph.node_count())
        .map(|u| graph.descendants(EventId(u)))
        .collect()
}

proptest! {
    #[test]
    fn prop_happens_before_is_irreflexive(a in clock()) {
        prop_assert!(!a.happens_before(&a));
    }

    #[test]
    fn prop_happens_before_is_antisymmetric(a in clock(), b in clock()) {
        prop_assert!(!(a.happens_before(&b) && b.happens_before(&a)));
    }

    #[test]
    fn prop_happens_before_is_transitive(a in clock(), b in clock(), c in clock()) {
        if a.happens_before(&b) && b.happens_before(&c) {
            prop_assert!(a.happens_before(&c));
        }
    }

    #[test]
    fn prop_explicit_zeros_change_nothing(a in clock(), b in clock()) {
        let mut padded = a.clone();
        for p in ["A", "B", "C", "D"] {
            if a.get(&p.into()) == 0 {
                padded.set(p, 0);
            }
        }
        prop_assert_eq!(&padded, &a);
        prop_assert_eq!(padded.happens_before(&b), a.happens_before(&b));
        prop_assert_eq!(b.happens_before(&padded), b.happens_before(&a));
    }

    #[test]
    fn prop_merge_is_upper_bound(a in clock(), b in clock()) {
        let mut merged = a.clone();
        merged.merge(&b);
        prop_assert!(!merged.happens_before(&a));
        prop_assert!(!merged.happens_before(&b));
        prop_assert!(a.happens_before(&merged) || a == merged);
        prop_assert!(b.happens_before(&merged) || b == merged);
    }

    #[test]
    fn prop_built_graph_is_acyclic(trace in trace()) {
        let graph = CausalGraph::build(&trace);
        let order = graph.topological_order().unwrap();
        prop_assert_eq!(order.len(), trace.len());
    }

    #[test]
    fn prop_edges_are_exactly_clock_order(trace in trace()) {
        let graph = CausalGraph::build(&trace);
        let events = trace.events();
        let mut expected = 0;
        for a in events {
            for b in events {
                if a.happens_before(b) {
                    expected += 1;
                }
            }
        }
        prop_assert_eq!(graph.edge_count(), expected);
    }

    #[test]
    fn prop_reduction_preserves_reachability(trace in trace()) {
        let mut graph = CausalGraph::build(&trace);
        let before = reach_matrix(&graph);
        let edges_before = graph.edge_count();

        let stats = graph.reduce_transitive().unwrap();
        prop_assert_eq!(reach_matrix(&graph), before);
        prop_assert!(stats.edges_after <= edges_before);
    }

    #[test]
    fn prop_reduction_is_idempotent(trace in trace()) {
        let mut graph = CausalGraph::build(&trace);
        graph.reduce_transitive().unwrap();
        let once = graph.clone();

        prop_assert_eq!(graph.reduce_transitive().unwrap().removed(), 0);
        prop_assert_eq!(graph, once);
    }

    #[test]
    fn prop_parallel_build_is_identical(trace in trace()) {
        prop_assert_eq!(CausalGraph::build_parallel(&trace), CausalGraph::build(&trace));
    }

    #[test]
    fn prop_reduction_ignores_insertion_order(trace in trace(), seed in any::<u64>()) {
        let built = CausalGraph::build(&trace);
        let mut reference = built.clone();
        let mut reordered = shuffled(&built, seed);
        let reach = reach_matrix(&built);

        reference.reduce_transitive().unwrap();
        reordered.reduce_transitive().unwrap();

        prop_assert_eq!(reordered.edge_count(), reference.edge_count());
        prop_assert_eq!(reach_matrix(&reordered), reach);
        prop_assert_eq!(sorted_edges(&reordered), sorted_edges(&reference));
    }
}
