//! Infrastructure Layer - External Formats
//!
//! Concrete file formats around the domain types.
//!
//! # Responsibilities
//! - Graphviz DOT export of causal graphs
//! - JSON persistence of traces (serde)

pub mod dot;
pub mod json;

// Re-exports
pub use dot::{to_dot, write_dot};
pub use json::{load_trace, save_trace};
