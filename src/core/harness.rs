//! Benchmark driver: generate, run one kernel, time it, report
//!
//! Validation happens before anything is allocated. Exactly one kernel runs
//! against the generated matrix.

use std::io::Write;

use log::{debug, info};
use rand::rngs::StdRng;
use rand::SeedableRng;
use serde::Serialize;

use crate::core::config::{Mode, RunConfig};
use crate::core::error::Result;
use crate::core::generator::generate_graph;
use crate::core::kernels::{floyd_warshall_sequential, run_kernel};
use crate::core::matrix::DistanceMatrix;
use crate::core::timing::Timings;
use crate::core::validate::validate_result;

/// Summary of one run
#[derive(Debug, Clone, Serialize)]
pub struct RunReport {
    pub mode: Mode,
    pub vertices: usize,
    pub edges: usize,
    pub memory_footprint: usize,
    pub threads: usize,
    pub block_length: usize,
    pub seed: Option<u64>,
    pub timings: Timings,
    /// `None` unless verification was requested
    pub verified: Option<bool>,
    #[serde(skip)]
    pub errors: Vec<String>,
}

impl RunReport {
    /// Plain-text report: graph details, then one line per timing entry
    pub fn render(&self) -> String {
        let mut out = format!(
            "Number of vertices: {}\nNumber of edges: {}\nGraph memory footprint: {}\nNumber of threads: {}\nBlock length: {}\n",
            self.vertices, self.edges, self.memory_footprint, self.threads, self.block_length
        );
        out.push_str(&self.timings.to_string());
        if let Some(ok) = self.verified {
            out.push_str(&format!("Verification: {}\n", if ok { "passed" } else { "FAILED" }));
        }
        out
    }
}

/// Execute a validated configuration.
///
/// When `config.print` is set the matrix is written to `out` before and
/// after the kernel. Returns the report; printing it is left to the caller.
pub fn run(config: &RunConfig, out: &mut dyn Write) -> Result<RunReport> {
    config.validate()?;

    let mut timings = Timings::new();
    let mut rng = match config.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_os_rng(),
    };

    info!("Generating graph data...");
    let mut matrix = timings.time("Generation time", || {
        generate_graph(config.vertices, config.edges, &mut rng)
    })?;
    info!("Done populating graph with data.");

    if config.print {
        writeln!(out, "Graph before Floyd-Warshall:")?;
        write!(out, "{}", matrix)?;
    }

    let input = config.verify.then(|| matrix.clone());

    // Worker startup stays outside the measured region
    let pool = config.parallel.build_pool()?;
    info!("{}", start_message(config.mode));
    let phases = timings.time(config.mode.timing_label(), || {
        run_kernel(config.mode, &mut matrix, &pool, config.block_length)
    })?;
    info!("{}", done_message(config.mode));

    if let Some(phases) = phases {
        debug!(
            "{}x{} grid of {}x{} blocks on {} threads: dependent {:?}, partially dependent {:?}, independent {:?}",
            config.vertices / config.block_length,
            config.vertices / config.block_length,
            config.block_length,
            config.block_length,
            pool.current_num_threads(),
            phases.dependent,
            phases.partially_dependent,
            phases.independent
        );
        timings.mark("Block dependent phase", phases.dependent);
        timings.mark("Block partially dependent phase", phases.partially_dependent);
        timings.mark("Block independent phase", phases.independent);
    }

    if config.print {
        writeln!(out, "Graph after Floyd-Warshall:")?;
        write!(out, "{}", matrix)?;
    }

    let (verified, errors) = match input {
        Some(input) => {
            info!("Verifying against sequential reference...");
            let reference = sequential_reference(input);
            let report = validate_result(&matrix, Some(&reference));
            (Some(report.passed), report.errors)
        }
        None => (None, Vec::new()),
    };

    Ok(RunReport {
        mode: config.mode,
        vertices: config.vertices,
        edges: config.edges,
        memory_footprint: matrix.memory_footprint(),
        threads: config.parallel.threads(),
        block_length: config.block_length,
        seed: config.seed,
        timings,
        verified,
        errors,
    })
}

fn start_message(mode: Mode) -> &'static str {
    match mode {
        Mode::Sequential => "Beginning Floyd-Warshall sequential execution...",
        Mode::NaiveParallel => "Beginning Floyd-Warshall parallel without cache optimizations",
        Mode::BlockedParallel => "Beginning Floyd-Warshall parallel with cache optimizations",
    }
}

fn done_message(mode: Mode) -> &'static str {
    match mode {
        Mode::Sequential => "Sequential execution done.",
        Mode::NaiveParallel => "Naive execution done.",
        Mode::BlockedParallel => "Optimized execution done.",
    }
}

fn sequential_reference(mut input: DistanceMatrix) -> DistanceMatrix {
    floyd_warshall_sequential(&mut input);
    input
}
