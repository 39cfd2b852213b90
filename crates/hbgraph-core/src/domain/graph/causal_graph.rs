//! Causal graph storage
//!
//! Arena layout: the events live in one indexed vector and edges refer to
//! them by [`EventId`]. The adjacency list of node `u` holds its successors
//! in insertion order, without duplicates or self-loops.

use super::bitset::NodeSet;
use crate::domain::trace::{Event, EventId};
use crate::error::GraphError;
use std::fmt;

/// Directed acyclic graph of happens-before relations between events
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CausalGraph {
    /// Nodes, indexed by event id
    pub(crate) events: Vec<Event>,

    /// Successor lists, `edges[u]` = targets of edges leaving `u`
    pub(crate) edges: Vec<Vec<EventId>>,

    /// Set once a transitive reduction has run
    pub(crate) reduced: bool,
}

impl CausalGraph {
    /// Assemble a graph from events and an explicit edge list
    ///
    /// Used for adjacency that comes from outside the builder (an
    /// instrumentation pipeline, a stored graph). Acyclicity is *not*
    /// checked here; the topological sort reports cycles.
    ///
    /// # Errors
    ///
    /// [`GraphError::InvalidEdge`] for an endpoint outside the node range,
    /// a self-loop, or a repeated edge.
    pub fn from_parts<I>(events: Vec<Event>, edge_list: I) -> Result<Self, GraphError>
    where
        I: IntoIterator<Item = (EventId, EventId)>,
    {
        let n = events.len();
        let mut edges: Vec<Vec<EventId>> = vec![Vec::new(); n];

        for (from, to) in edge_list {
            if from.as_index() >= n || to.as_index() >= n {
                return Err(GraphError::InvalidEdge {
                    from,
                    to,
                    reason: "endpoint out of range",
                });
            }
            if from == to {
                return Err(GraphError::InvalidEdge {
                    from,
                    to,
                    reason: "self-loop",
                });
            }
            if edges[from.as_index()].contains(&to) {
                return Err(GraphError::InvalidEdge {
                    from,
                    to,
                    reason: "duplicate edge",
                });
            }
            edges[from.as_index()].push(to);
        }

        Ok(Self {
            events,
            edges,
            reduced: false,
        })
    }

    /// Number of nodes
    #[inline]
    pub fn node_count(&self) -> usize {
        self.events.len()
    }

    /// Number of edges
    pub fn edge_count(&self) -> usize {
        self.edges.iter().map(Vec::len).sum()
    }

    /// All nodes, indexed by id
    #[inline]
    pub fn events(&self) -> &[Event] {
        &self.events
    }

    /// Look up a node
    #[inline]
    pub fn event(&self, id: EventId) -> Option<&Event> {
        self.events.get(id.as_index())
    }

    /// Successors of `id` in insertion order (empty for unknown ids)
    #[inline]
    pub fn successors(&self, id: EventId) -> &[EventId] {
        match self.edges.get(id.as_index()) {
            Some(succs) => succs,
            None => &[],
        }
    }

    /// Every edge as a `(from, to)` pair, grouped by source
    pub fn edge_pairs(&self) -> impl Iterator<Item = (EventId, EventId)> + '_ {
        self.edges
            .iter()
            .enumerate()
            .flat_map(|(u, succs)| succs.iter().map(move |&v| (EventId(u), v)))
    }

    /// In-degree of every node
    pub fn in_degrees(&self) -> Vec<usize> {
        let mut in_degree = vec![0usize; self.node_count()];
        for succs in &self.edges {
            for v in succs {
                in_degree[v.as_index()] += 1;
            }
        }
        in_degree
    }

    /// Nodes without predecessors, ascending
    pub fn roots(&self) -> Vec<EventId> {
        self.in_degrees()
            .iter()
            .enumerate()
            .filter(|&(_, &d)| d == 0)
            .map(|(i, _)| EventId(i))
            .collect()
    }

    /// True once [`reduce_transitive`](Self::reduce_transitive) has run
    #[inline]
    pub fn is_reduced(&self) -> bool {
        self.reduced
    }

    /// Nodes reachable from `from` through one or more edges, ascending
    ///
    /// Explicit-stack traversal; depth is bounded by the heap, not the call
    /// stack.
    pub fn descendants(&self, from: EventId) -> Vec<EventId> {
        self.reach_set(from).iter().map(EventId).collect()
    }

    /// True if a path of at least one edge leads from `from` to `to`
    pub fn reachable(&self, from: EventId, to: EventId) -> bool {
        to.as_index() < self.node_count() && self.reach_set(from).contains(to.as_index())
    }

    fn reach_set(&self, from: EventId) -> NodeSet {
        let mut visited = NodeSet::new(self.node_count());
        let mut stack: Vec<EventId> = self.successors(from).to_vec();

        while let Some(node) = stack.pop() {
            if visited.contains(node.as_index()) {
                continue;
            }
            visited.insert(node.as_index());
            stack.extend(
                self.successors(node)
                    .iter()
                    .filter(|v| !visited.contains(v.as_index())),
            );
        }

        visited
    }
}

impl fmt::Display for CausalGraph {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (u, succs) in self.edges.iter().enumerate() {
            write!(f, "{} -> [", EventId(u))?;
            for (k, v) in succs.iter().enumerate() {
                if k > 0 {
                    write!(f, ", ")?;
                }
                write!(f, "{v}")?;
            }
            writeln!(f, "]")?;
        }
        Ok(())
    }
}
