//! Causal graph construction
//!
//! Exhaustive pairwise comparison: every unordered pair `{i, j}` of events is
//! tested once in each direction and contributes at most one edge.
//!
//! # Cost
//!
//! O(n² · p) for n events over p processes. The quadratic pair scan is the
//! scaling limit of the engine; grouping events by process and comparing
//! only per-process frontiers would cut it, but is not done here.
//!
//! # Determinism
//!
//! Edges are inserted with the outer index `i` ascending and the inner index
//! `j > i` ascending. The parallel builder reproduces exactly this insertion
//! order, so both produce identical adjacency lists.

use super::causal_graph::CausalGraph;
use crate::domain::clock::HappensBeforeRelation;
use crate::domain::trace::{Event, EventId, Trace};
use rayon::prelude::*;
use tracing::debug;

impl CausalGraph {
    /// Build the happens-before graph of a trace
    ///
    /// Never fails. Events with equivalent clocks (including identical
    /// clocks on different processes) are concurrent and get no edge.
    ///
    /// # Example
    ///
    /// ```rust
    /// use hbgraph_core::domain::graph::CausalGraph;
    /// use hbgraph_core::domain::trace::{Event, EventId, Trace};
    ///
    /// let trace: Trace = vec![
    ///     Event::send("A", [("A", 1)].into_iter().collect(), Some(0)),
    ///     Event::receive("B", [("A", 1), ("B", 1)].into_iter().collect(), Some(0)),
    /// ]
    /// .into();
    ///
    /// let graph = CausalGraph::build(&trace);
    /// assert_eq!(graph.successors(EventId(0)), &[EventId(1)]);
    /// ```
    pub fn build(trace: &Trace) -> Self {
        let events = trace.events().to_vec();
        let n = events.len();
        let mut edges: Vec<Vec<EventId>> = vec![Vec::new(); n];

        for i in 0..n {
            for (from, to) in row_edges(&events, i) {
                edges[from.as_index()].push(to);
            }
        }

        let graph = Self {
            events,
            edges,
            reduced: false,
        };
        debug!(nodes = n, edges = graph.edge_count(), "built causal graph");
        graph
    }

    /// Build the happens-before graph, comparing rows on the rayon pool
    ///
    /// Produces a graph equal to [`CausalGraph::build`].
    pub fn build_parallel(trace: &Trace) -> Self {
        let events = trace.events().to_vec();
        let n = events.len();

        let rows: Vec<Vec<(EventId, EventId)>> = (0..n)
            .into_par_iter()
            .map(|i| row_edges(&events, i).collect())
            .collect();

        let mut edges: Vec<Vec<EventId>> = vec![Vec::new(); n];
        for (from, to) in rows.into_iter().flatten() {
            edges[from.as_index()].push(to);
        }

        let graph = Self {
            events,
            edges,
            reduced: false,
        };
        debug!(nodes = n, edges = graph.edge_count(), "built causal graph (parallel)");
        graph
    }
}

/// Edges contributed by comparing event `i` with every later event
fn row_edges(events: &[Event], i: usize) -> impl Iterator<Item = (EventId, EventId)> + '_ {
    let left = &events[i];
    events
        .iter()
        .enumerate()
        .skip(i + 1)
        .filter_map(move |(j, right)| match left.clock().relation(right.clock()) {
            HappensBeforeRelation::Before => Some((EventId(i), EventId(j))),
            HappensBeforeRelation::After => Some((EventId(j), EventId(i))),
            HappensBeforeRelation::Concurrent => None,
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::clock::VectorClock;
    use crate::domain::trace::TraceGenerator;

    fn vc(entries: &[(&str, u64)]) -> VectorClock {
        entries.iter().copied().collect()
    }

    fn adjacency(graph: &CausalGraph) -> Vec<Vec<usize>> {
        (0..graph.node_count())
            .map(|u| graph.successors(EventId(u)).iter().map(|v| v.as_index()).collect())
            .collect()
    }

    #[test]
    fn test_chain_before_reduction_has_every_pair() {
        let trace: Trace = vec![
            Event::send("A", vc(&[("A", 1), ("B", 0)]), Some(0)),
            Event::receive("B", vc(&[("A", 1), ("B", 1)]), Some(0)),
            Event::send("A", vc(&[("A", 2), ("B", 1)]), Some(1)),
        ]
        .into();

        let graph = CausalGraph::build(&trace);
        assert_eq!(adjacency(&graph), vec![vec![1, 2], vec![2], vec![]]);
    }

    #[test]
    fn test_concurrent_events_have_no_edges() {
        let trace: Trace = vec![
            Event::send("A", vc(&[("A", 1), ("B", 0)]), Some(0)),
            Event::send("B", vc(&[("A", 0), ("B", 1)]), Some(1)),
        ]
        .into();

        let graph = CausalGraph::build(&trace);
        assert_eq!(adjacency(&graph), vec![Vec::<usize>::new(), vec![]]);
    }

    #[test]
    fn test_reverse_trace_order_still_points_cause_to_effect() {
        let trace: Trace = vec![
            Event::receive("B", vc(&[("A", 1), ("B", 1)]), Some(0)),
            Event::send("A", vc(&[("A", 1)]), Some(0)),
        ]
        .into();

        let graph = CausalGraph::build(&trace);
        assert_eq!(adjacency(&graph), vec![vec![], vec![0]]);
    }

    #[test]
    fn test_identical_clocks_on_different_processes_are_concurrent() {
        let trace: Trace = vec![
            Event::send("A", vc(&[("A", 1), ("B", 1)]), None),
            Event::send("B", vc(&[("A", 1), ("B", 1)]), None),
        ]
        .into();

        assert_eq!(CausalGraph::build(&trace).edge_count(), 0);
    }

    #[test]
    fn test_empty_trace() {
        let graph = CausalGraph::build(&Trace::new());
        assert_eq!(graph.node_count(), 0);
        assert_eq!(graph.edge_count(), 0);
    }

    #[test]
    fn test_parallel_matches_sequential() {
        let trace = TraceGenerator::new(["A", "B", "C", "D"], 99).unwrap().generate(120);
        assert_eq!(CausalGraph::build_parallel(&trace), CausalGraph::build(&trace));
    }

    #[test]
    fn test_every_edge_is_a_strict_clock_order() {
        let trace = TraceGenerator::new(["A", "B", "C"], 5).unwrap().generate(80);
        let graph = CausalGraph::build(&trace);

        for (from, to) in graph.edge_pairs() {
            let a = graph.event(from).unwrap();
            let b = graph.event(to).unwrap();
            assert!(a.happens_before(b), "{from} -> {to} is not happens-before");
        }
    }
}
