//! Graph summary metrics

use super::causal_graph::CausalGraph;
use crate::domain::trace::EventId;
use crate::error::GraphError;
use serde::Serialize;
use std::fmt;

/// Shape summary of a causal graph
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GraphStats {
    /// Number of nodes
    pub nodes: usize,
    /// Number of edges
    pub edges: usize,
    /// Nodes without predecessors
    pub roots: usize,
    /// Mean out-degree (0 for an empty graph)
    pub avg_out_degree: f64,
    /// Largest out-degree
    pub max_out_degree: usize,
    /// Edges on the longest path
    pub longest_path: usize,
}

impl GraphStats {
    /// Compute the summary of `graph`
    ///
    /// # Errors
    ///
    /// [`GraphError::CycleDetected`] if the graph is not a DAG (the longest
    /// path is computed over a topological order).
    pub fn compute(graph: &CausalGraph) -> Result<Self, GraphError> {
        let order = graph.topological_order()?;
        let nodes = graph.node_count();
        let edges = graph.edge_count();

        // depth[v] = edges on the longest path ending at v
        let mut depth = vec![0usize; nodes];
        let mut longest_path = 0;
        for &u in &order {
            for v in graph.successors(u) {
                let candidate = depth[u.as_index()] + 1;
                if candidate > depth[v.as_index()] {
                    depth[v.as_index()] = candidate;
                    longest_path = longest_path.max(candidate);
                }
            }
        }

        let max_out_degree = (0..nodes)
            .map(|u| graph.successors(EventId(u)).len())
            .max()
            .unwrap_or(0);

        #[allow(clippy::cast_precision_loss)]
        let avg_out_degree = if nodes == 0 {
            0.0
        } else {
            edges as f64 / nodes as f64
        };

        Ok(Self {
            nodes,
            edges,
            roots: graph.roots().len(),
            avg_out_degree,
            max_out_degree,
            longest_path,
        })
    }
}

impl fmt::Display for GraphStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "  nodes: {}", self.nodes)?;
        writeln!(f, "  direct edges: {}", self.edges)?;
        writeln!(f, "  roots: {}", self.roots)?;
        writeln!(f, "  avg out-degree: {:.3}", self.avg_out_degree)?;
        writeln!(f, "  max out-degree: {}", self.max_out_degree)?;
        write!(f, "  longest path length: {}", self.longest_path)
    }
}
