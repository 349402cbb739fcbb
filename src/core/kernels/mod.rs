//! All-pairs shortest path kernels
//!
//! Three interchangeable Floyd-Warshall variants that mutate a
//! [`DistanceMatrix`] in place. For any input they produce identical output.

pub mod blocked;
pub mod naive;
pub mod sequential;

pub use blocked::{floyd_warshall_blocked, floyd_warshall_blocked_on, BlockLayout, PhaseTimes};
pub use naive::{floyd_warshall_naive, floyd_warshall_naive_on};
pub use sequential::floyd_warshall_sequential;

use rayon::ThreadPool;

use crate::core::config::Mode;
use crate::core::error::Result;
use crate::core::matrix::DistanceMatrix;

/// Run the kernel selected by `mode` on a pool the caller has already built.
///
/// `block_length` is only consulted by the blocked kernel and the sequential
/// kernel ignores `pool`. Per-phase times are returned for the blocked kernel
/// only. Nothing is logged here, so the call can be timed as pure compute.
pub fn run_kernel(
    mode: Mode,
    matrix: &mut DistanceMatrix,
    pool: &ThreadPool,
    block_length: usize,
) -> Result<Option<PhaseTimes>> {
    match mode {
        Mode::Sequential => {
            floyd_warshall_sequential(matrix);
            Ok(None)
        }
        Mode::NaiveParallel => {
            floyd_warshall_naive_on(pool, matrix);
            Ok(None)
        }
        Mode::BlockedParallel => floyd_warshall_blocked_on(pool, matrix, block_length).map(Some),
    }
}
