//! # Butterfly-apsp Library
//!
//! All-pairs shortest paths over dense directed-graph distance matrices.
//!
//! Three Floyd-Warshall kernels share one in-place [`DistanceMatrix`]:
//!
//! - [`floyd_warshall_sequential`]: single-threaded reference
//! - [`floyd_warshall_naive`]: k loop sequential, rows relaxed in parallel
//! - [`floyd_warshall_blocked`]: cache-tiled, three phases per pivot block
//!
//! For any input all three produce the same matrix.
//!
//! ## Example
//!
//! ```rust
//! use butterfly_apsp::{floyd_warshall_blocked, Distance, DistanceMatrix, ParallelConfig};
//!
//! # fn main() -> butterfly_apsp::Result<()> {
//! let mut matrix = DistanceMatrix::disconnected(4)?;
//! matrix.set(0, 1, Distance::UNIT);
//! matrix.set(1, 2, Distance::UNIT);
//! matrix.set(2, 3, Distance::UNIT);
//!
//! floyd_warshall_blocked(&mut matrix, &ParallelConfig::new(2), 2)?;
//! assert_eq!(matrix.get(0, 3), Distance::new(3));
//! assert!(!matrix.get(3, 0).is_finite());
//! # Ok(())
//! # }
//! ```

pub mod core;

pub use crate::core::config::{validate_block_length, Mode, ParallelConfig, RunConfig};
pub use crate::core::error::{ConfigError, Error, Result};
pub use crate::core::generator::{generate_edges, generate_graph, max_edges};
pub use crate::core::harness::{run, RunReport};
pub use crate::core::kernels::{
    floyd_warshall_blocked, floyd_warshall_blocked_on, floyd_warshall_naive, floyd_warshall_naive_on,
    floyd_warshall_sequential, run_kernel, BlockLayout, PhaseTimes,
};
pub use crate::core::matrix::{Distance, DistanceMatrix, UNREACHABLE_TOKEN};
pub use crate::core::timing::Timings;
pub use crate::core::validate::{validate_result, InvariantReport};
