//! Causal Graph Benchmark Suite
//!
//! # Scenarios
//!
//! 1. **Build**: sequential vs rayon pair scan
//!    - Quadratic in trace length; the dominant cost of an analysis
//!
//! 2. **Reduce**: transitive reduction of a freshly built graph
//!    - Bitset reach sets, reverse topological pass
//!
//! 3. **Safety**: every-event causal future check on the reduced graph
//!    - Sequential vs parallel trigger walks

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use hbgraph_core::{CausalFutureProperty, CausalGraph, CheckMode, Event, Trace, TraceGenerator};

// ============================================================================
// Helper Functions
// ============================================================================

fn trace_of(n: usize) -> Trace {
    TraceGenerator::new(["A", "B", "C", "D"], 42)
        .expect("four processes")
        .generate(n)
}

fn reduced_graph(n: usize) -> CausalGraph {
    let mut graph = CausalGraph::build(&trace_of(n));
    graph.reduce_transitive().expect("built graphs are acyclic");
    graph
}

// ============================================================================
// Benchmark Groups
// ============================================================================

/// Benchmark pairwise construction
fn bench_build(c: &mut Criterion) {
    let mut group = c.benchmark_group("build");

    for n in [250, 500, 1000].iter() {
        let trace = trace_of(*n);

        group.bench_with_input(BenchmarkId::new("sequential", n), &trace, |b, trace| {
            b.iter(|| black_box(CausalGraph::build(trace)));
        });

        group.bench_with_input(BenchmarkId::new("parallel", n), &trace, |b, trace| {
            b.iter(|| black_box(CausalGraph::build_parallel(trace)));
        });
    }

    group.finish();
}

/// Benchmark transitive reduction
fn bench_reduce(c: &mut Criterion) {
    let mut group = c.benchmark_group("reduce");

    for n in [250, 500, 1000].iter() {
        let graph = CausalGraph::build(&trace_of(*n));

        group.bench_with_input(BenchmarkId::new("transitive", n), &graph, |b, graph| {
            b.iter(|| {
                let mut graph = graph.clone();
                black_box(graph.reduce_transitive().expect("acyclic"))
            });
        });
    }

    group.finish();
}

/// Benchmark the causal future safety check
fn bench_safety(c: &mut Criterion) {
    let mut group = c.benchmark_group("safety");
    let property = CausalFutureProperty::new(|_: &Event| true);

    for n in [250, 500].iter() {
        let graph = reduced_graph(*n);

        group.bench_with_input(BenchmarkId::new("sequential", n), &graph, |b, graph| {
            b.iter(|| black_box(graph.check_safety_with(&property, CheckMode::Exhaustive)));
        });

        group.bench_with_input(BenchmarkId::new("parallel", n), &graph, |b, graph| {
            b.iter(|| black_box(graph.check_parallel(&property, CheckMode::Exhaustive)));
        });
    }

    group.finish();
}

// ============================================================================
// Criterion Configuration
// ============================================================================

criterion_group!(benches, bench_build, bench_reduce, bench_safety);

criterion_main!(benches);
