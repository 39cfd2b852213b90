//! Transitive reduction
//!
//! Removes every edge `u -> v` for which another path `u -> ... -> v`
//! exists. The transitive reduction of a DAG is unique, and it has exactly
//! the reachability of the input.
//!
//! # Algorithm
//!
//! Nodes are visited in **reverse** topological order, so every successor's
//! reach set is final before its predecessor is processed. For node `u`:
//!
//! ```text
//! reach[u] = {}
//! for v in succ(u), by ascending topological rank:
//!     if v ∈ reach[u]:  drop u -> v          (another retained path exists)
//!     else:             keep u -> v
//!                       reach[u] ∪= reach[v] ∪ {v}
//! ```
//!
//! Examining successors by rank matters: any intermediate node `w` on a path
//! `u -> w -> ... -> v` ranks below `v`, so `w` has already contributed its
//! reach when `v` is examined. Retained edges keep their insertion order in
//! the adjacency list.
//!
//! # Cost
//!
//! O(E log d + n²/64) time and n²/64 words of reach bitsets in the worst
//! case (dense graphs). This memory bound is the second scaling limit of the
//! engine after pair construction.

use super::bitset::NodeSet;
use super::causal_graph::CausalGraph;
use crate::domain::trace::EventId;
use crate::error::GraphError;
use tracing::debug;

/// Edge counts around a reduction pass
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ReductionStats {
    /// Edges before the pass
    pub edges_before: usize,
    /// Edges after the pass
    pub edges_after: usize,
}

impl ReductionStats {
    /// Number of redundant edges dropped
    #[inline]
    pub fn removed(&self) -> usize {
        self.edges_before - self.edges_after
    }
}

impl CausalGraph {
    /// Reduce the graph in place to its transitive reduction
    ///
    /// Idempotent: a second call removes nothing.
    ///
    /// # Errors
    ///
    /// [`GraphError::CycleDetected`] if the graph is not a DAG.
    pub fn reduce_transitive(&mut self) -> Result<ReductionStats, GraphError> {
        let order = self.topological_order()?;
        self.reduce_with_order(&order)
    }

    /// Reduce the graph using a precomputed topological order
    ///
    /// # Errors
    ///
    /// [`GraphError::InvalidOrder`] if `order` is not a permutation of the
    /// nodes that respects every edge.
    pub fn reduce_with_order(&mut self, order: &[EventId]) -> Result<ReductionStats, GraphError> {
        let n = self.node_count();
        let rank = self.rank_of(order)?;
        let edges_before = self.edge_count();

        let mut reach: Vec<NodeSet> = vec![NodeSet::new(n); n];
        let mut kept = NodeSet::new(n);

        for &u in order.iter().rev() {
            let u = u.as_index();

            let mut candidates = self.edges[u].clone();
            candidates.sort_by_key(|v| rank[v.as_index()]);

            let mut reach_u = NodeSet::new(n);
            kept.clear();
            for v in candidates {
                let v = v.as_index();
                if reach_u.contains(v) {
                    continue;
                }
                kept.insert(v);
                reach_u.union_with(&reach[v]);
                reach_u.insert(v);
            }

            self.edges[u].retain(|v| kept.contains(v.as_index()));
            reach[u] = reach_u;
        }

        self.reduced = true;
        let stats = ReductionStats {
            edges_before,
            edges_after: self.edge_count(),
        };
        debug!(
            before = stats.edges_before,
            after = stats.edges_after,
            removed = stats.removed(),
            "transitive reduction complete"
        );
        Ok(stats)
    }

    /// Position of every node in `order`, validated against the edges
    fn rank_of(&self, order: &[EventId]) -> Result<Vec<usize>, GraphError> {
        let n = self.node_count();
        if order.len() != n {
            return Err(GraphError::InvalidOrder {
                detail: format!("order has {} entries for {} nodes", order.len(), n),
            });
        }

        let mut rank = vec![usize::MAX; n];
        for (pos, id) in order.iter().enumerate() {
            let idx = id.as_index();
            if idx >= n || rank[idx] != usize::MAX {
                return Err(GraphError::InvalidOrder {
                    detail: format!("{id} is out of range or repeated"),
                });
            }
            rank[idx] = pos;
        }

        if let Some((from, to)) = self
            .edge_pairs()
            .find(|(from, to)| rank[from.as_index()] >= rank[to.as_index()])
        {
            return Err(GraphError::InvalidOrder {
                detail: format!("edge {from} -> {to} points backwards"),
            });
        }

        Ok(rank)
    }
}
