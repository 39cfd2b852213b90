//! # Trace Domain Module
//!
//! Recorded distributed executions: events, the traces that hold them, and
//! a seedable synthetic source.
//!
//! ## Contract with trace sources
//! - Every Receive clock derives from exactly one earlier Send clock by
//!   merge-then-increment
//! - Events of one process strictly increase that process's own coordinate
//! - Events of distinct processes may be concurrent
//!
//! Beyond that, trace order is free: the causal graph is derived from clock
//! comparisons only.

pub mod event;
pub mod generator;
pub mod trace_log;

// Re-exports for ergonomic usage
pub use event::{Event, EventId, EventKind};
pub use generator::TraceGenerator;
pub use trace_log::Trace;
