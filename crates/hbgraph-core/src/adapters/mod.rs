//! Adapters Layer - Ports & Adapters Pattern
//!
//! Connects the pure domain to callers: a validated configuration and the
//! pipeline that drives a trace through the graph algorithms.
//!
//! # Hexagonal Architecture
//! - Inbound: [`AnalysisConfig`] (JSON file or CLI flags) → [`CausalAnalyzer`]
//! - Outbound: [`Analysis`] → safety reports, stats, exporters

pub mod analyzer;
pub mod config;

// Re-exports
pub use analyzer::{Analysis, CausalAnalyzer, StageTimings};
pub use config::{AnalysisConfig, DuplicateClockPolicy};
