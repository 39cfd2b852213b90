//! Topological sorting (Kahn's algorithm)
//!
//! # Algorithm
//!
//! 1. Compute the in-degree of every node from the current edge set
//! 2. Seed a ready set with all in-degree-0 nodes
//! 3. Pop the *lowest* ready id, append it, decrement its successors
//! 4. Successors that reach in-degree 0 join the ready set
//!
//! The ready set is a min-heap, so the order is a deterministic function of
//! the graph. An order shorter than the node count means a cycle, which a
//! graph built from vector clocks can never have: that is reported as the
//! fatal [`GraphError::CycleDetected`].

use super::causal_graph::CausalGraph;
use crate::domain::trace::EventId;
use crate::error::GraphError;
use std::cmp::Reverse;
use std::collections::BinaryHeap;
use tracing::error;

/// DFS node state used while isolating a cycle
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Mark {
    Unvisited,
    OnStack,
    Done,
}

impl CausalGraph {
    /// Order every node consistently with the edges
    ///
    /// Ties are broken by lowest id first.
    ///
    /// # Errors
    ///
    /// [`GraphError::CycleDetected`] if some nodes can never be ordered. The
    /// error carries an edge that closes a cycle when one can be found.
    pub fn topological_order(&self) -> Result<Vec<EventId>, GraphError> {
        let n = self.node_count();
        let mut in_degree = self.in_degrees();

        let mut ready: BinaryHeap<Reverse<usize>> = in_degree
            .iter()
            .enumerate()
            .filter(|&(_, &d)| d == 0)
            .map(|(i, _)| Reverse(i))
            .collect();

        let mut order = Vec::with_capacity(n);
        while let Some(Reverse(u)) = ready.pop() {
            order.push(EventId(u));
            for v in &self.edges[u] {
                let d = &mut in_degree[v.as_index()];
                *d -= 1;
                if *d == 0 {
                    ready.push(Reverse(v.as_index()));
                }
            }
        }

        if order.len() < n {
            let unsorted: Vec<bool> = in_degree.iter().map(|&d| d > 0).collect();
            let closing_edge = self.find_closing_edge(&unsorted);
            error!(
                ordered = order.len(),
                total = n,
                ?closing_edge,
                "causal graph contains a cycle"
            );
            return Err(GraphError::CycleDetected {
                ordered: order.len(),
                total: n,
                closing_edge,
            });
        }

        Ok(order)
    }

    /// Find a back edge among the nodes Kahn's algorithm could not order
    ///
    /// Every such node has a predecessor that is also unordered, so a DFS
    /// restricted to them always meets a node that is still on its stack.
    fn find_closing_edge(&self, unsorted: &[bool]) -> Option<(EventId, EventId)> {
        let n = self.node_count();
        let mut mark = vec![Mark::Unvisited; n];

        for start in 0..n {
            if !unsorted[start] || mark[start] != Mark::Unvisited {
                continue;
            }

            mark[start] = Mark::OnStack;
            let mut stack: Vec<(usize, usize)> = vec![(start, 0)];

            while let Some(frame) = stack.last_mut() {
                let u = frame.0;
                if let Some(&next) = self.edges[u].get(frame.1) {
                    frame.1 += 1;
                    let v = next.as_index();
                    if !unsorted[v] {
                        continue;
                    }
                    match mark[v] {
                        Mark::OnStack => return Some((EventId(u), EventId(v))),
                        Mark::Unvisited => {
                            mark[v] = Mark::OnStack;
                            stack.push((v, 0));
                        }
                        Mark::Done => {}
                    }
                } else {
                    mark[u] = Mark::Done;
                    stack.pop();
                }
            }
        }

        None
    }
}
