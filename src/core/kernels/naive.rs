//! Naive parallel Floyd-Warshall
//!
//! The k loop stays sequential. For a fixed k every row is relaxed by a
//! separate rayon task; the end of each `for_each` is the barrier before k+1.

use rayon::prelude::*;
use rayon::ThreadPool;

use crate::core::config::ParallelConfig;
use crate::core::error::Result;
use crate::core::matrix::{relax, Distance, DistanceMatrix};

/// Parallel Floyd-Warshall on a dedicated pool sized by `parallel`.
pub fn floyd_warshall_naive(matrix: &mut DistanceMatrix, parallel: &ParallelConfig) -> Result<()> {
    let pool = parallel.build_pool()?;
    floyd_warshall_naive_on(&pool, matrix);
    Ok(())
}

/// Parallel Floyd-Warshall on an already running pool
pub fn floyd_warshall_naive_on(pool: &ThreadPool, matrix: &mut DistanceMatrix) {
    pool.install(|| relax_all_rows(matrix));
}

/// Body of the naive kernel; runs on whatever rayon pool is current.
pub(crate) fn relax_all_rows(matrix: &mut DistanceMatrix) {
    let n = matrix.vertices();
    let mut pivot_row: Vec<Distance> = Vec::with_capacity(n);

    for k in 0..n {
        // Row k does not change during iteration k; a snapshot lets every
        // task read it while holding `&mut` to its own row.
        pivot_row.clear();
        pivot_row.extend_from_slice(matrix.row(k));

        matrix
            .as_mut_slice()
            .par_chunks_mut(n)
            .for_each(|row| {
                let d_ik = row[k];
                if !d_ik.is_finite() {
                    return;
                }
                for (cell, &d_kj) in row.iter_mut().zip(pivot_row.iter()) {
                    relax(cell, d_ik, d_kj);
                }
            });
    }
}
