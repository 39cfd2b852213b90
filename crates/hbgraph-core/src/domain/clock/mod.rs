//! Vector Clock Module
//!
//! Logical time for distributed traces. Every event carries a
//! [`VectorClock`] snapshot; the happens-before partial order between
//! events is derived purely from these snapshots.
//!
//! # Laws
//! - **Irreflexive**: no clock happens-before itself
//! - **Antisymmetric**: never both `a < b` and `b < a`
//! - **Transitive**: `a < b` and `b < c` imply `a < c`
//! - **Implicit zero**: an absent process compares as counter 0

mod types;
mod vector_clock;

// Re-exports
pub use types::{HappensBeforeRelation, ProcessId};
pub use vector_clock::VectorClock;
