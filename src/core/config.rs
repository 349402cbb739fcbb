//! Run configuration and validation
//!
//! All checks happen here, before a matrix is generated or a kernel invoked.

use std::fmt;

use log::info;
use serde::Serialize;

use crate::core::error::{ConfigError, Result};
use crate::core::generator::max_edges;

pub const DEFAULT_VERTICES: usize = 100;
pub const DEFAULT_EDGES: usize = 200;
pub const DEFAULT_THREADS: usize = 1;
pub const DEFAULT_BLOCK_LENGTH: usize = 1;

/// Which kernel a run executes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum Mode {
    Sequential,
    NaiveParallel,
    BlockedParallel,
}

impl Mode {
    /// Resolve the mode from the three CLI switches.
    ///
    /// When several are set, sequential wins over naive-parallel, which wins
    /// over block-parallel.
    pub fn from_flags(sequential: bool, naive_parallel: bool, block_parallel: bool) -> Option<Self> {
        if sequential {
            Some(Mode::Sequential)
        } else if naive_parallel {
            Some(Mode::NaiveParallel)
        } else if block_parallel {
            Some(Mode::BlockedParallel)
        } else {
            None
        }
    }

    /// Label used for the elapsed-time entry
    pub fn timing_label(self) -> &'static str {
        match self {
            Mode::Sequential => "Sequential time",
            Mode::NaiveParallel => "Naive time",
            Mode::BlockedParallel => "Block time",
        }
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Mode::Sequential => "sequential",
            Mode::NaiveParallel => "naive-parallel",
            Mode::BlockedParallel => "block-parallel",
        };
        write!(f, "{}", name)
    }
}

/// Worker pool sizing for one kernel invocation.
///
/// Passed explicitly to each parallel kernel; nothing is set process-wide.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParallelConfig {
    threads: usize,
}

impl ParallelConfig {
    /// Exactly `threads` workers (at least one), no clamping
    pub fn new(threads: usize) -> Self {
        Self {
            threads: threads.max(1),
        }
    }

    /// Requested thread count clamped to what the hardware reports
    pub fn clamped(requested: usize) -> Self {
        let max_threads = num_cpus::get().max(1);
        if requested > max_threads {
            info!("Argument threads {} is greater than max threads {}", requested, max_threads);
            info!("Setting threads to max threads...");
            info!("Threads is now {}", max_threads);
            return Self::new(max_threads);
        }
        Self::new(requested)
    }

    pub fn threads(&self) -> usize {
        self.threads
    }

    /// Dedicated pool for this invocation; dropped (and joined) with the value
    pub fn build_pool(&self) -> Result<rayon::ThreadPool> {
        let pool = rayon::ThreadPoolBuilder::new()
            .num_threads(self.threads)
            .thread_name(|i| format!("apsp-worker-{}", i))
            .build()?;
        Ok(pool)
    }
}

impl Default for ParallelConfig {
    fn default() -> Self {
        Self::new(DEFAULT_THREADS)
    }
}

/// Everything one benchmark run needs
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunConfig {
    pub mode: Mode,
    pub vertices: usize,
    pub edges: usize,
    pub parallel: ParallelConfig,
    pub block_length: usize,
    pub print: bool,
    pub seed: Option<u64>,
    pub verify: bool,
}

impl RunConfig {
    pub fn new(mode: Mode) -> Self {
        Self {
            mode,
            vertices: DEFAULT_VERTICES,
            edges: DEFAULT_EDGES,
            parallel: ParallelConfig::default(),
            block_length: DEFAULT_BLOCK_LENGTH,
            print: false,
            seed: None,
            verify: false,
        }
    }

    /// Reject configurations no kernel could run with
    pub fn validate(&self) -> std::result::Result<(), ConfigError> {
        if self.vertices == 0 {
            return Err(ConfigError::ZeroVertices);
        }
        validate_block_length(self.vertices, self.block_length)?;

        let max = max_edges(self.vertices);
        if self.edges > max {
            return Err(ConfigError::TooManyEdges {
                edges: self.edges,
                vertices: self.vertices,
                max,
            });
        }
        Ok(())
    }
}

/// Block side must be in `1..=vertices` and divide `vertices` exactly
pub fn validate_block_length(vertices: usize, block_length: usize) -> std::result::Result<(), ConfigError> {
    if block_length == 0 {
        return Err(ConfigError::ZeroBlockLength);
    }
    if block_length > vertices {
        return Err(ConfigError::BlockLengthExceedsVertices {
            block_length,
            vertices,
        });
    }
    if vertices % block_length != 0 {
        return Err(ConfigError::BlockLengthNotDivisor {
            vertices,
            block_length,
        });
    }
    Ok(())
}
