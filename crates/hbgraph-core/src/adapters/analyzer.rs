//! Causal Analyzer - configured pipeline
//!
//! ```text
//! Trace ─▶ validate ─▶ build ─▶ sort ─▶ reduce ─▶ stats ─▶ Analysis
//!          (budget,    (seq /   (Kahn)  (transitive)
//!           duplicates) rayon)
//! ```
//!
//! Each stage is timed and logged. The [`Analysis`] keeps the reduced graph
//! so any number of safety properties can be checked against it.

use std::time::{Duration, Instant};
use tracing::{info, warn};

use super::config::{AnalysisConfig, DuplicateClockPolicy};
use crate::domain::graph::{CausalGraph, GraphStats, ReductionStats};
use crate::domain::safety::{SafetyProperty, SafetyReport};
use crate::domain::trace::{EventId, Trace};
use crate::error::{AnalysisResult, TraceError};

/// Wall-clock time spent in each stage
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StageTimings {
    /// Pairwise graph construction
    pub build: Duration,
    /// Topological sort
    pub sort: Duration,
    /// Transitive reduction
    pub reduce: Duration,
}

impl StageTimings {
    /// Sum of all stages
    pub fn total(&self) -> Duration {
        self.build + self.sort + self.reduce
    }
}

/// Output of one pipeline run
#[derive(Debug, Clone)]
pub struct Analysis {
    /// Transitively reduced causal graph
    pub graph: CausalGraph,
    /// Topological order of the graph (lowest id first among ties)
    pub order: Vec<EventId>,
    /// Summary of the reduced graph
    pub stats: GraphStats,
    /// Edge counts around the reduction
    pub reduction: ReductionStats,
    /// Per-stage wall-clock time
    pub timings: StageTimings,
    /// Duplicate-clock pairs tolerated under [`DuplicateClockPolicy::Concurrent`]
    pub duplicate_clocks: Vec<(EventId, EventId)>,
    config: AnalysisConfig,
}

impl Analysis {
    /// Check `property` with the configured mode and parallelism
    ///
    /// `Sync` is required because `parallel: true` shares the property
    /// between rayon workers; use [`check_sequential`](Self::check_sequential)
    /// for properties holding non-`Sync` state.
    pub fn check<P>(&self, property: &P) -> SafetyReport
    where
        P: SafetyProperty + Sync + ?Sized,
    {
        if self.config.parallel {
            let started = Instant::now();
            let report = self.graph.check_parallel(property, self.config.check_mode);
            log_report(&report, started);
            report
        } else {
            self.check_sequential(property)
        }
    }

    /// Check `property` with the configured mode on the calling thread
    ///
    /// Ignores `parallel`.
    pub fn check_sequential<P>(&self, property: &P) -> SafetyReport
    where
        P: SafetyProperty + ?Sized,
    {
        let started = Instant::now();
        let report = self.graph.check_safety_with(property, self.config.check_mode);
        log_report(&report, started);
        report
    }
}

fn log_report(report: &SafetyReport, started: Instant) {
    info!(
        holds = report.holds(),
        triggers = report.triggers_checked,
        evaluated = report.descendants_evaluated,
        elapsed_us = started.elapsed().as_micros(),
        "safety check finished"
    );
}

/// Runs the causal analysis pipeline under one configuration
#[derive(Debug, Clone, Default)]
pub struct CausalAnalyzer {
    config: AnalysisConfig,
}

impl CausalAnalyzer {
    /// Create an analyzer
    ///
    /// # Errors
    ///
    /// [`AnalysisError::Config`](crate::error::AnalysisError::Config) if the
    /// configuration is invalid.
    pub fn new(config: AnalysisConfig) -> AnalysisResult<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    /// Active configuration
    #[inline]
    pub fn config(&self) -> &AnalysisConfig {
        &self.config
    }

    /// Run validate → build → sort → reduce → stats on `trace`
    ///
    /// # Errors
    ///
    /// - [`TraceError::TooLarge`] if the trace exceeds `max_events`
    /// - [`TraceError::DuplicateClock`] under [`DuplicateClockPolicy::Reject`]
    /// - [`GraphError::CycleDetected`](crate::error::GraphError::CycleDetected)
    ///   if clock comparison is broken
    pub fn analyze(&self, trace: &Trace) -> AnalysisResult<Analysis> {
        if let Some(max) = self.config.max_events {
            trace.check_budget(max)?;
        }

        let duplicate_clocks = trace.duplicate_clocks();
        if let Some(&(first, second)) = duplicate_clocks.first() {
            match self.config.duplicate_clock_policy {
                DuplicateClockPolicy::Reject => {
                    return Err(TraceError::DuplicateClock { first, second }.into());
                }
                DuplicateClockPolicy::Concurrent => {
                    warn!(
                        pairs = duplicate_clocks.len(),
                        %first,
                        %second,
                        "identical clocks on different processes, treating as concurrent"
                    );
                }
            }
        }

        let mut timings = StageTimings::default();

        let started = Instant::now();
        let mut graph = if self.config.parallel {
            CausalGraph::build_parallel(trace)
        } else {
            CausalGraph::build(trace)
        };
        timings.build = started.elapsed();

        let started = Instant::now();
        let order = graph.topological_order()?;
        timings.sort = started.elapsed();

        let started = Instant::now();
        let reduction = graph.reduce_with_order(&order)?;
        timings.reduce = started.elapsed();

        let stats = GraphStats::compute(&graph)?;

        info!(
            events = trace.len(),
            edges_before = reduction.edges_before,
            edges_after = reduction.edges_after,
            longest_path = stats.longest_path,
            build_us = timings.build.as_micros(),
            sort_us = timings.sort.as_micros(),
            reduce_us = timings.reduce.as_micros(),
            "causal analysis complete"
        );

        Ok(Analysis {
            graph,
            order,
            stats,
            reduction,
            timings,
            duplicate_clocks,
            config: self.config.clone(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::clock::VectorClock;
    use crate::domain::safety::{property_fn, CausalFutureProperty, CheckMode};
    use crate::domain::trace::{Event, TraceGenerator};
    use crate::error::{AnalysisError, ConfigError};

    fn vc(entries: &[(&str, u64)]) -> VectorClock {
        entries.iter().copied().collect()
    }

    fn duplicated() -> Trace {
        vec![
            Event::send("A", vc(&[("A", 1), ("B", 1)]), None),
            Event::send("B", vc(&[("A", 1), ("B", 1)]), None),
        ]
        .into()
    }

    #[test]
    fn test_analyze_chain() {
        let trace: Trace = vec![
            Event::send("A", vc(&[("A", 1), ("B", 0)]), Some(0)),
            Event::receive("B", vc(&[("A", 1), ("B", 1)]), Some(0)),
            Event::send("A", vc(&[("A", 2), ("B", 1)]), Some(1)),
        ]
        .into();

        let analysis = CausalAnalyzer::default().analyze(&trace).unwrap();
        assert_eq!(analysis.order, vec![EventId(0), EventId(1), EventId(2)]);
        assert_eq!(analysis.reduction, ReductionStats { edges_before: 3, edges_after: 2 });
        assert_eq!(analysis.stats.longest_path, 2);
        assert!(analysis.graph.is_reduced());
        assert!(analysis.duplicate_clocks.is_empty());
    }

    #[test]
    fn test_invalid_config_rejected() {
        let config = AnalysisConfig {
            max_events: Some(0),
            ..AnalysisConfig::default()
        };
        assert_eq!(
            CausalAnalyzer::new(config).unwrap_err(),
            AnalysisError::Config(ConfigError::ZeroEventBudget)
        );
    }

    #[test]
    fn test_budget_enforced() {
        let analyzer = CausalAnalyzer::new(AnalysisConfig {
            max_events: Some(10),
            ..AnalysisConfig::default()
        })
        .unwrap();
        let trace = TraceGenerator::new(["A", "B"], 1).unwrap().generate(11);

        assert_eq!(
            analyzer.analyze(&trace).unwrap_err(),
            AnalysisError::Trace(TraceError::TooLarge { len: 11, max: 10 })
        );
    }

    #[test]
    fn test_duplicate_clock_policies() {
        let tolerant = CausalAnalyzer::default().analyze(&duplicated()).unwrap();
        assert_eq!(tolerant.duplicate_clocks, vec![(EventId(0), EventId(1))]);
        assert_eq!(tolerant.graph.edge_count(), 0);

        let strict = CausalAnalyzer::new(AnalysisConfig {
            duplicate_clock_policy: DuplicateClockPolicy::Reject,
            ..AnalysisConfig::default()
        })
        .unwrap();
        assert_eq!(
            strict.analyze(&duplicated()).unwrap_err(),
            AnalysisError::Trace(TraceError::DuplicateClock {
                first: EventId(0),
                second: EventId(1),
            })
        );
    }

    #[test]
    fn test_parallel_pipeline_matches_sequential() {
        let trace = TraceGenerator::new(["A", "B", "C", "D"], 8).unwrap().generate(100);
        let sequential = CausalAnalyzer::default().analyze(&trace).unwrap();
        let parallel = CausalAnalyzer::new(AnalysisConfig {
            parallel: true,
            ..AnalysisConfig::default()
        })
        .unwrap()
        .analyze(&trace)
        .unwrap();

        assert_eq!(parallel.graph, sequential.graph);
        assert_eq!(parallel.order, sequential.order);
        assert_eq!(parallel.stats, sequential.stats);
    }

    #[test]
    fn test_check_sequential_accepts_non_sync_property() {
        use std::cell::Cell;

        let trace = TraceGenerator::new(["A", "B", "C"], 6).unwrap().generate(40);
        let analysis = CausalAnalyzer::new(AnalysisConfig {
            parallel: true,
            ..AnalysisConfig::default()
        })
        .unwrap()
        .analyze(&trace)
        .unwrap();

        let calls = Cell::new(0usize);
        let counting = property_fn(
            |_: &Event| true,
            |_, trigger: &Event, _, future: &Event| {
                calls.set(calls.get() + 1);
                trigger.happens_before(future)
            },
        );

        let report = analysis.check_sequential(&counting);
        assert!(report.holds());
        assert_eq!(calls.get(), report.descendants_evaluated);
        assert_eq!(report, analysis.check(&CausalFutureProperty::new(|_: &Event| true)));
    }

    #[test]
    fn test_check_uses_configured_mode() {
        let trace = TraceGenerator::new(["A", "B", "C"], 4).unwrap().generate(60);
        let never_b = property_fn(|e: &Event| e.is_send(), |_, _, _, future: &Event| future.process().as_str() != "B");

        let fail_fast = CausalAnalyzer::default().analyze(&trace).unwrap().check(&never_b);
        let exhaustive = CausalAnalyzer::new(AnalysisConfig {
            check_mode: CheckMode::Exhaustive,
            ..AnalysisConfig::default()
        })
        .unwrap()
        .analyze(&trace)
        .unwrap()
        .check(&never_b);

        assert!(!fail_fast.holds());
        assert_eq!(fail_fast.violations.len(), 1);
        assert!(exhaustive.violations.len() >= fail_fast.violations.len());
        assert_eq!(exhaustive.verdict, fail_fast.verdict);

        let analysis = CausalAnalyzer::default().analyze(&trace).unwrap();
        assert!(analysis.check(&CausalFutureProperty::new(|_: &Event| true)).holds());
    }
}
