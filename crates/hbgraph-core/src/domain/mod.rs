//! Domain Layer
//!
//! # Architecture Overview
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                    Domain Layer                             │
//! ├─────────────────────────────────────────────────────────────┤
//! │                                                             │
//! │  Clock Module                  Trace Module                 │
//! │  ├─ VectorClock                ├─ Event / EventId           │
//! │  ├─ ProcessId                  ├─ Trace                     │
//! │  └─ HappensBeforeRelation      └─ TraceGenerator (seeded)   │
//! │                                                             │
//! │  Graph Module                  Safety Module                │
//! │  ├─ CausalGraph::build         ├─ SafetyProperty            │
//! │  ├─ topological_order (Kahn)   ├─ CausalFutureProperty      │
//! │  ├─ reduce_transitive          └─ check_safety / parallel   │
//! │  └─ GraphStats                                              │
//! │                                                             │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! Everything here is pure computation over in-memory values: no I/O, no
//! global state. File formats live in `infrastructure`, the configured
//! pipeline in `adapters`.
//!
//! ```rust
//! use hbgraph_core::domain::*;
//!
//! let trace = TraceGenerator::new(["A", "B", "C"], 42).unwrap().generate(30);
//! let mut graph = CausalGraph::build(&trace);
//! graph.reduce_transitive().unwrap();
//!
//! let report = graph.check_safety(&CausalFutureProperty::new(|_: &Event| true));
//! assert!(report.holds());
//! ```

pub mod clock;
pub mod graph;
pub mod safety;
pub mod trace;

// Re-export commonly used types
pub use clock::{HappensBeforeRelation, ProcessId, VectorClock};
pub use graph::{CausalGraph, GraphStats, ReductionStats};
pub use safety::{
    property_fn, send_at, CausalFutureProperty, CheckMode, SafetyProperty, SafetyReport,
    SafetyVerdict, Violation,
};
pub use trace::{Event, EventId, EventKind, Trace, TraceGenerator};
