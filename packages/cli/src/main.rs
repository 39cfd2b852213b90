use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use clap::{Args, Parser, Subcommand};
use tracing::info;
use tracing_subscriber::EnvFilter;

use hbgraph_core::infrastructure::{load_trace, save_trace, write_dot};
use hbgraph_core::{
    send_at, AnalysisConfig, CausalAnalyzer, CausalFutureProperty, CheckMode, SafetyVerdict,
    Trace, TraceGenerator,
};

/// hbgraph - happens-before causal graph analysis
/// Build, reduce and safety-check the causal graph of a distributed trace
#[derive(Parser)]
#[command(name = "hbgraph", version)]
#[command(about = "Happens-before causal graph analysis", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate a seeded synthetic trace and save it as JSON
    Generate {
        #[command(flatten)]
        source: GeneratorArgs,
        /// Output file
        #[arg(short, long)]
        out: PathBuf,
    },
    /// Build, reduce and check the causal graph of a trace
    Analyze(AnalyzeArgs),
}

#[derive(Args)]
struct GeneratorArgs {
    /// Comma-separated process names
    #[arg(long, value_delimiter = ',', default_value = "A,B,C,D")]
    processes: Vec<String>,
    /// Number of events
    #[arg(long, default_value_t = 1000)]
    events: usize,
    /// RNG seed
    #[arg(long, default_value_t = 0)]
    seed: u64,
}

impl GeneratorArgs {
    fn generate(&self) -> Result<Trace> {
        let processes = self.processes.iter().map(|p| p.trim().to_owned());
        let mut generator =
            TraceGenerator::new(processes, self.seed).context("invalid process list")?;
        info!(processes = ?self.processes, events = self.events, seed = self.seed, "generating trace");
        Ok(generator.generate(self.events))
    }
}

#[derive(Args)]
struct AnalyzeArgs {
    /// Read the trace from a JSON file instead of generating one
    #[arg(long, conflicts_with_all = ["processes", "events", "seed"])]
    trace: Option<PathBuf>,
    #[command(flatten)]
    source: GeneratorArgs,
    /// JSON analysis configuration
    #[arg(long)]
    config: Option<PathBuf>,
    /// Write the reduced graph as Graphviz DOT
    #[arg(long)]
    dot: Option<PathBuf>,
    /// Print every event of the trace
    #[arg(long)]
    print_trace: bool,
    /// Renumber events by ascending clock sum before building
    #[arg(long)]
    sort_by_clock_sum: bool,
    /// Use the rayon pool for construction and checking
    #[arg(long)]
    parallel: bool,
    /// Collect every violation instead of stopping at the first
    #[arg(long)]
    exhaustive: bool,
    /// Trigger process: its send with own counter `trigger_count`
    #[arg(long, default_value = "A")]
    trigger_process: String,
    /// Own counter of the triggering send
    #[arg(long, default_value_t = 5)]
    trigger_count: u64,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let cli = Cli::parse();

    info!("hbgraph v{}", hbgraph_core::VERSION);

    match cli.command {
        Commands::Generate { source, out } => {
            let trace = source.generate()?;
            save_trace(&trace, &out).with_context(|| format!("writing {}", out.display()))?;
            println!("Trace generated: events={} -> {}", trace.len(), out.display());
        }
        Commands::Analyze(args) => analyze(&args)?,
    }

    Ok(())
}

fn analyze(args: &AnalyzeArgs) -> Result<()> {
    let mut config = match &args.config {
        Some(path) => AnalysisConfig::from_json_file(path)
            .with_context(|| format!("reading config {}", path.display()))?,
        None => AnalysisConfig::default(),
    };
    if args.parallel {
        config.parallel = true;
    }
    if args.exhaustive {
        config.check_mode = CheckMode::Exhaustive;
    }
    let analyzer = CausalAnalyzer::new(config)?;

    let mut trace = match &args.trace {
        Some(path) => load_trace(path).with_context(|| format!("reading trace {}", path.display()))?,
        None => args.source.generate()?,
    };
    if args.sort_by_clock_sum {
        trace = trace.sorted_by_clock_sum();
    }

    if args.print_trace {
        print!("{trace}");
    } else {
        println!("Trace: events={} processes={}", trace.len(), trace.processes().len());
    }

    let analysis = analyzer.analyze(&trace)?;
    println!("Causal graph built (with transitive reduction).");
    println!("{}", analysis.stats);
    println!("  removed edges: {}", analysis.reduction.removed());
    println!("  build time (incl reduction): {:?}", analysis.timings.total());

    if let Some(path) = &args.dot {
        write_dot(&analysis.graph, path).with_context(|| format!("writing {}", path.display()))?;
    }

    println!(
        "\nChecking safety property: if {} sends with clock {}:{}, all future events must happen after.",
        args.trigger_process, args.trigger_process, args.trigger_count
    );
    let property = CausalFutureProperty::new(send_at(args.trigger_process.as_str(), args.trigger_count));
    let report = analysis.check(&property);
    println!(
        "Safety check: triggers={} evaluated={}",
        report.triggers_checked, report.descendants_evaluated
    );

    match report.verdict {
        SafetyVerdict::Holds => {
            println!("Result: Safety property HOLDS.");
            Ok(())
        }
        SafetyVerdict::Violated(first) => {
            for violation in &report.violations {
                let offending = analysis.graph.event(violation.offending);
                println!("--> {violation}");
                if let Some(event) = offending {
                    println!("    {event}");
                }
            }
            bail!("safety property violated ({first})")
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_trace_file_conflicts_with_generator_flags() {
        for flag in [["--events", "10"], ["--seed", "3"], ["--processes", "A,B"]] {
            let parsed =
                Cli::try_parse_from(["hbgraph", "analyze", "--trace", "t.json", flag[0], flag[1]]);
            assert!(parsed.is_err(), "{} accepted alongside --trace", flag[0]);
        }
    }

    #[test]
    fn test_trace_file_alone_uses_defaults() {
        let cli = Cli::try_parse_from(["hbgraph", "analyze", "--trace", "t.json"]).unwrap();
        match cli.command {
            Commands::Analyze(args) => {
                assert_eq!(args.trace, Some(PathBuf::from("t.json")));
                assert_eq!(args.trigger_process, "A");
                assert_eq!(args.trigger_count, 5);
            }
            Commands::Generate { .. } => panic!("expected analyze"),
        }
    }

    #[test]
    fn test_generator_flags_without_trace() {
        let cli =
            Cli::try_parse_from(["hbgraph", "analyze", "--processes", "X,Y", "--events", "12"]).unwrap();
        match cli.command {
            Commands::Analyze(args) => {
                assert!(args.trace.is_none());
                assert_eq!(args.source.processes, vec!["X", "Y"]);
                assert_eq!(args.source.events, 12);
            }
            Commands::Generate { .. } => panic!("expected analyze"),
        }
    }
}
