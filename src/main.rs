//! # Butterfly-apsp CLI
//!
//! Command-line benchmark for the all-pairs shortest path kernels.
//! Generates a random graph, runs exactly one kernel and reports timings.

use clap::Parser;
use log::{error, info};

use butterfly_apsp::{Mode, ParallelConfig, RunConfig};

mod cli;

use cli::OutputFormat;

/// Command-line interface for butterfly-apsp
#[derive(Parser)]
#[command(name = "butterfly-apsp")]
#[command(about = "Floyd-Warshall all-pairs shortest path benchmark")]
#[command(long_about = "Benchmarks Floyd-Warshall on a random unit-weight directed graph:
  butterfly-apsp -s -v 512 -e 4096              # Sequential reference
  butterfly-apsp -n -v 512 -e 4096 -t 8         # Naive parallel (no cache optimizations)
  butterfly-apsp -b -v 512 -e 4096 -t 8 -l 64   # Block parallel (cache optimizations)

Block length must divide the number of vertices. Thread counts above the
hardware maximum are clamped.")]
#[command(version = env!("BUTTERFLY_VERSION"))]
struct Cli {
    /// Number of vertices (>= 1)
    #[arg(short, long, default_value_t = 100, value_parser = parse_positive)]
    vertices: usize,

    /// Number of directed edges (>= 1, at most vertices * (vertices - 1))
    #[arg(short, long, default_value_t = 200, value_parser = parse_positive)]
    edges: usize,

    /// Number of worker threads (>= 1)
    #[arg(short, long, default_value_t = 1, value_parser = parse_positive)]
    threads: usize,

    /// Side length of the square blocks for block-parallel mode (>= 1)
    #[arg(short = 'l', long, default_value_t = 1, value_parser = parse_positive)]
    block_length: usize,

    /// Run the sequential kernel
    #[arg(short, long)]
    sequential: bool,

    /// Run the parallel kernel without cache optimizations
    #[arg(short, long)]
    naive_parallel: bool,

    /// Run the parallel kernel with cache optimizations
    #[arg(short, long)]
    block_parallel: bool,

    /// Print the matrix before and after execution
    #[arg(short, long)]
    print: bool,

    /// Seed for graph generation (random when omitted)
    #[arg(long)]
    seed: Option<u64>,

    /// Re-run the sequential kernel and check the result against it
    #[arg(long)]
    verify: bool,

    /// Emit the report as JSON
    #[arg(long)]
    json: bool,

    /// Enable debug logging
    #[arg(long)]
    verbose: bool,
}

fn parse_positive(s: &str) -> Result<usize, String> {
    let value: usize = s.parse().map_err(|e| format!("{e}"))?;
    if value == 0 {
        return Err("must be >= 1".to_string());
    }
    Ok(value)
}

fn main() {
    let cli = Cli::parse();

    // Initialize logging to stderr
    let default_level = if cli.verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_level))
        .target(env_logger::Target::Stderr)
        .init();

    if let Err(e) = run(cli) {
        error!("❌ Error: {e:#}");
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> anyhow::Result<()> {
    let config = build_config(&cli)?;

    let mut stdout = std::io::stdout().lock();
    let report = butterfly_apsp::run(&config, &mut stdout)?;

    info!("Printing graph details...");
    let format = if cli.json { OutputFormat::Json } else { OutputFormat::Text };
    cli::write_report(&report, format, &mut stdout)?;

    if report.verified == Some(false) {
        anyhow::bail!("verification failed: {}", report.errors.join("; "));
    }

    info!("Exiting program.");
    Ok(())
}

/// Translate CLI flags into a validated run configuration
fn build_config(cli: &Cli) -> anyhow::Result<RunConfig> {
    let mode = Mode::from_flags(cli.sequential, cli.naive_parallel, cli.block_parallel)
        .ok_or(butterfly_apsp::ConfigError::NoModeSelected)?;

    let config = RunConfig {
        mode,
        vertices: cli.vertices,
        edges: cli.edges,
        parallel: ParallelConfig::clamped(cli.threads),
        block_length: cli.block_length,
        print: cli.print,
        seed: cli.seed,
        verify: cli.verify,
    };
    config.validate()?;
    Ok(config)
}
