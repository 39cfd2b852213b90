//! Causal graph
//!
//! ```text
//! Trace ──build──▶ CausalGraph ──topological_order──▶ Vec<EventId>
//!                      │
//!                      ├──reduce_transitive──▶ minimal edge set
//!                      └──check_safety──────▶ SafetyReport
//! ```

pub mod bitset;
mod builder;
mod causal_graph;
mod reduce;
mod stats;
mod topo;

pub use bitset::NodeSet;
pub use causal_graph::CausalGraph;
pub use reduce::ReductionStats;
pub use stats::GraphStats;
