//! # Error Types
//!
//! Every fallible operation in the engine reports through one of the enums
//! below. A violated safety property is *not* an error: it is reported as a
//! [`SafetyVerdict`](crate::domain::safety::SafetyVerdict).

use crate::domain::trace::EventId;

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
// Trace Errors
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

/// Errors raised while producing or validating a trace
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TraceError {
    /// Message passing needs a sender and a distinct receiver
    #[error("Trace generation needs at least 2 distinct processes, got {count}")]
    InsufficientProcesses {
        /// Number of distinct processes supplied
        count: usize,
    },

    /// Trace exceeds the configured event budget
    #[error("Trace has {len} events, exceeding the budget of {max}")]
    TooLarge {
        /// Number of events in the trace
        len: usize,
        /// Configured maximum
        max: usize,
    },

    /// Two events on different processes carry equivalent clocks
    #[error("Events {first} and {second} on different processes carry identical clocks")]
    DuplicateClock {
        /// Lower event id
        first: EventId,
        /// Higher event id
        second: EventId,
    },
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
// Graph Errors
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

/// Errors raised by graph assembly, sorting and reduction
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum GraphError {
    /// Kahn's algorithm could not order every node.
    ///
    /// A graph built from vector clocks can never contain a cycle, so this
    /// always points at a bug in clock construction or comparison.
    #[error("Cycle detected: only {ordered} of {total} nodes could be ordered{}", describe_edge(.closing_edge))]
    CycleDetected {
        /// Nodes placed in the partial order before the sort stalled
        ordered: usize,
        /// Total number of nodes
        total: usize,
        /// An edge that closes a cycle, when one could be isolated
        closing_edge: Option<(EventId, EventId)>,
    },

    /// Externally supplied adjacency is malformed
    #[error("Invalid edge {from} -> {to}: {reason}")]
    InvalidEdge {
        /// Source node
        from: EventId,
        /// Target node
        to: EventId,
        /// What is wrong with it
        reason: &'static str,
    },

    /// A node order handed to the reducer is not a topological order
    #[error("Invalid topological order: {detail}")]
    InvalidOrder {
        /// What is wrong with it
        detail: String,
    },
}

fn describe_edge(edge: &Option<(EventId, EventId)>) -> String {
    match edge {
        Some((from, to)) => format!(" (edge {from} -> {to} closes a cycle)"),
        None => String::new(),
    }
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
// Export & Configuration Errors
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

/// Errors raised while reading or writing trace and graph artifacts
#[derive(Debug, thiserror::Error)]
pub enum ExportError {
    /// Filesystem failure
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON encoding or decoding failure
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Invalid analysis configuration
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    /// An event budget of zero admits no trace at all
    #[error("max_events must be greater than zero")]
    ZeroEventBudget,
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
// Pipeline Errors
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

/// Errors that abort the analysis pipeline
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AnalysisError {
    /// The input trace was rejected
    #[error(transparent)]
    Trace(#[from] TraceError),

    /// Graph invariant violated
    #[error(transparent)]
    Graph(#[from] GraphError),

    /// The analyzer was configured incorrectly
    #[error(transparent)]
    Config(#[from] ConfigError),
}

/// Result alias for pipeline operations
pub type AnalysisResult<T> = Result<T, AnalysisError>;
