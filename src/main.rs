//! # Graph Processing System
//!
//! Command-line front end for the `gps-core` superstep engine.
//!
//! This application provides:
//! - `run`: execute one of the vertex algorithms (bfs, dfs, dijkstra,
//!   pagerank) round by round until it halts
//! - `path`: answer a point-to-point shortest path query with single-frontier
//!   or bidirectional BFS
//!
//! Results are printed to stdout as JSON; logs go to stderr.
//!
//! ## Quick Start
//! ```bash
//! cargo run -- run bfs --source 1 --sample grid
//! cargo run -- path A E --sample scenario
//! ```

// =============================================================================
// MODULE DECLARATIONS
// =============================================================================

/// Configuration management
mod config;

/// Graph selection and inline graph parsing
mod input;

// =============================================================================
// IMPORTS
// =============================================================================
use std::collections::BTreeMap;

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand, ValueEnum};
use serde::Serialize;
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, FmtSubscriber};

use gps_core::{
    bidirectional_shortest_path, run_rounds, run_until, shortest_path, AlgorithmKind, HaltCondition, PathOutcome,
    RoundRecord, RunSummary, SuperstepEngine, VertexId,
};

use crate::config::Config;
use crate::input::{parse_adjacency, GraphArgs};

// =============================================================================
// CLI ARGUMENTS
// =============================================================================
/// # Rust Concept: Subcommands with Clap
///
/// Each variant of [`Command`] becomes a subcommand; `#[command(flatten)]`
/// shares one group of flags between them.
#[derive(Parser, Debug)]
#[command(
    name = "gps",
    version,
    about = "Superstep graph processing and shortest-path search",
    long_about = r#"
Graph Processing System - run vertex-centric algorithms in synchronized supersteps.

Every round, each vertex consumes the messages delivered at the end of the
previous round, updates its value, and sends new messages. A message sent in
round r is never visible before round r+1.

ENVIRONMENT:
  GPS_PARALLELISM     worker threads per round (default: CPU count)
  GPS_MAX_SUPERSTEPS  round cap for run-until-halt (default: 100)
  GPS_PARTITIONS      partitions reported in round statistics (default: 1)
  RUST_LOG            log filter (default: info)

EXAMPLES:
  # Hop distances from vertex 1 on the 3x3 grid
  gps run bfs --source 1 --sample grid

  # PageRank until the ranks stop moving
  gps run pagerank --sample web

  # Fixed number of rounds on an inline graph
  gps run dijkstra --source 1 --edges "1-2,2-3,1-3" --rounds 4

  # Bidirectional shortest path on a labelled graph
  gps path A E --adjacency "A:B,C;B:A,D;C:A,D;D:B,C,E;E:D"
"#
)]
struct Cli {
    #[command(subcommand)]
    command: Command,

    /// Worker threads per round (overrides GPS_PARALLELISM)
    #[arg(short = 'j', long, global = true)]
    parallelism: Option<usize>,

    /// Verbose output (debug logging)
    #[arg(short = 'v', long = "verbose", global = true, default_value = "false")]
    verbose: bool,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Run a vertex algorithm on the superstep engine
    Run(RunArgs),
    /// Find a shortest path between two nodes
    Path(PathArgs),
}

#[derive(Args, Debug)]
struct RunArgs {
    /// Algorithm tag: bfs, dfs, dijkstra or pagerank
    #[arg(value_name = "ALGORITHM")]
    algorithm: String,

    /// Source vertex for bfs, dfs and dijkstra
    #[arg(short, long, default_value_t = 0)]
    source: VertexId,

    #[command(flatten)]
    graph: GraphArgs,

    /// Run exactly this many rounds instead of until the algorithm halts
    #[arg(short, long)]
    rounds: Option<usize>,

    /// Round cap when running until halt (overrides GPS_MAX_SUPERSTEPS)
    #[arg(long)]
    max_supersteps: Option<usize>,

    /// Include every round's deliveries in the output
    #[arg(long, default_value = "false")]
    history: bool,
}

/// Which search answers a path query
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum Method {
    Bfs,
    Bidirectional,
}

#[derive(Args, Debug)]
struct PathArgs {
    /// Source node label
    source: String,

    /// Target node label
    target: String,

    #[command(flatten)]
    graph: GraphArgs,

    /// Inline label adjacency, e.g. "A:B,C;B:D;D:"
    #[arg(long, conflicts_with_all = ["sample", "edges"])]
    adjacency: Option<String>,

    /// Search strategy
    #[arg(short, long, value_enum, default_value = "bidirectional")]
    method: Method,
}

// =============================================================================
// OUTPUT
// =============================================================================
#[derive(Serialize)]
struct RunOutput {
    algorithm: AlgorithmKind,
    summary: RunSummary,
    /// Final vertex values; `null` for +∞ (unreached)
    values: BTreeMap<VertexId, Option<f64>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    history: Option<Vec<RoundRecord>>,
}

#[derive(Serialize)]
struct PathOutput {
    method: &'static str,
    #[serde(flatten)]
    outcome: PathOutcome<String>,
    hops: Option<usize>,
}

// =============================================================================
// MAIN FUNCTION
// =============================================================================
fn main() -> Result<()> {
    let cli = Cli::parse();

    // Load configuration from environment/.env file
    let mut config = Config::from_env()?;
    if let Some(parallelism) = cli.parallelism {
        config.parallelism = parallelism;
    }
    if let Command::Run(RunArgs {
        max_supersteps: Some(max),
        ..
    }) = &cli.command
    {
        config.max_supersteps = *max;
    }

    init_logging(cli.verbose, &config.log_level)?;
    config.validate()?;

    info!(
        parallelism = config.parallelism,
        max_supersteps = config.max_supersteps,
        partitions = config.partitions,
        "Configuration loaded"
    );

    match cli.command {
        Command::Run(args) => run_algorithm(&config, args),
        Command::Path(args) => find_path(args),
    }
}

/// Build the engine, run the algorithm, print the final values.
fn run_algorithm(config: &Config, args: RunArgs) -> Result<()> {
    let graph = args.graph.build().context("Failed to build graph")?;

    // Bad tags and missing sources are rejected here, before any round runs
    let kind = AlgorithmKind::from_tag(&args.algorithm, args.source, graph.vertex_count())?;
    let computation = kind
        .build(&graph)
        .with_context(|| format!("Cannot run {kind} on this graph"))?;

    info!(algorithm = %kind, vertices = graph.vertex_count(), edges = graph.edge_count(), "Starting run");

    let engine_config = config.engine_config().with_history(args.history);
    let mut engine = SuperstepEngine::with_config(graph, computation, engine_config);

    let summary = match args.rounds {
        Some(rounds) => run_rounds(&mut engine, rounds),
        None => {
            // PageRank keeps messaging after convergence; halt on stable values instead
            let condition = match kind {
                AlgorithmKind::PageRank { .. } => HaltCondition::StableValues,
                _ => HaltCondition::NoMessages,
            };
            run_until(&mut engine, condition, config.max_supersteps)
                .with_context(|| format!("{kind} did not halt"))?
        }
    };

    let values = engine
        .graph()
        .values()
        .into_iter()
        .map(|(id, value)| (id, value.is_finite().then_some(value)))
        .collect();
    let output = RunOutput {
        algorithm: kind,
        summary,
        values,
        history: args.history.then(|| engine.history().to_vec()),
    };

    println!("{}", serde_json::to_string_pretty(&output)?);
    Ok(())
}

/// Answer a point-to-point path query and print the outcome.
fn find_path(args: PathArgs) -> Result<()> {
    let adjacency = match &args.adjacency {
        Some(spec) => parse_adjacency(spec).context("Failed to parse adjacency")?,
        None => args.graph.label_adjacency().context("Failed to build graph")?,
    };

    let (method, outcome) = match args.method {
        Method::Bfs => ("bfs", shortest_path(&adjacency, &args.source, &args.target)),
        Method::Bidirectional => (
            "bidirectional",
            bidirectional_shortest_path(&adjacency, &args.source, &args.target),
        ),
    };

    if let Some(diagnostic) = &outcome.diagnostic {
        warn!(%diagnostic, source = %args.source, target = %args.target, "No path");
    }

    let output = PathOutput {
        method,
        hops: outcome.hops(),
        outcome,
    };
    println!("{}", serde_json::to_string_pretty(&output)?);
    Ok(())
}

// =============================================================================
// LOGGING INITIALIZATION
// =============================================================================
/// Initialize the tracing subscriber for structured logging.
///
/// Logs go to stderr so stdout stays valid JSON. `--verbose` forces debug;
/// otherwise `filter` (usually `RUST_LOG`) decides.
fn init_logging(verbose: bool, filter: &str) -> Result<()> {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_new(filter).unwrap_or_else(|_| EnvFilter::new("info"))
    };

    let subscriber = FmtSubscriber::builder()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(true)
        .with_thread_names(false)
        .with_file(false)
        .with_line_number(false)
        .finish();

    tracing::subscriber::set_global_default(subscriber)
        .map_err(|e| anyhow::anyhow!("Failed to set logging subscriber: {}", e))?;

    Ok(())
}

// =============================================================================
// TESTS
// =============================================================================
#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_run_args_parsing() {
        let cli = Cli::parse_from(["gps", "run", "bfs", "--source", "3", "--sample", "grid"]);
        assert!(!cli.verbose);
        let Command::Run(args) = cli.command else {
            panic!("expected run");
        };
        assert_eq!(args.algorithm, "bfs");
        assert_eq!(args.source, 3);
        assert_eq!(args.graph.sample, Some(input::Sample::Grid));
        assert!(args.rounds.is_none());
    }

    #[test]
    fn test_path_args_with_flags() {
        let cli = Cli::parse_from(["gps", "-v", "path", "A", "E", "--sample", "scenario", "--method", "bfs"]);
        assert!(cli.verbose);
        let Command::Path(args) = cli.command else {
            panic!("expected path");
        };
        assert_eq!(args.source, "A");
        assert_eq!(args.target, "E");
        assert_eq!(args.method, Method::Bfs);
    }

    #[test]
    fn test_conflicting_graph_sources_rejected() {
        let result = Cli::try_parse_from(["gps", "run", "bfs", "--sample", "grid", "--edges", "1-2"]);
        assert!(result.is_err());

        let result = Cli::try_parse_from(["gps", "path", "A", "B", "--sample", "grid", "--adjacency", "A:B"]);
        assert!(result.is_err());
    }

    #[test]
    fn test_run_algorithm_rejects_missing_source() {
        let config = Config::default();
        let cli = Cli::parse_from(["gps", "run", "bfs", "--source", "99", "--sample", "grid"]);
        let Command::Run(args) = cli.command else {
            panic!("expected run");
        };
        assert!(run_algorithm(&config, args).is_err());
    }

    #[test]
    fn test_path_output_shape() {
        let adjacency = gps_core::samples::scenario_adjacency();
        let outcome = bidirectional_shortest_path(&adjacency, &"A".to_string(), &"E".to_string());
        let output = PathOutput {
            method: "bidirectional",
            hops: outcome.hops(),
            outcome,
        };

        let json = serde_json::to_value(&output).unwrap();
        assert_eq!(json["path"], serde_json::json!(["A", "B", "D", "E"]));
        assert_eq!(json["hops"], 3);
        assert!(json["diagnostic"].is_null());
    }
}
