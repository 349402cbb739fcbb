//! Cache-blocked parallel Floyd-Warshall
//!
//! The V x V matrix is tiled into a B x B grid of L x L blocks. For every
//! pivot block index K three phases run in strict order:
//!
//! 1. **Dependent**: block (K, K) is closed over its own vertices (sequential).
//! 2. **Partially dependent**: every block in block-row K and block-column K
//!    is relaxed through the finished diagonal block (parallel).
//! 3. **Independent**: every other block (i, j) is relaxed through the
//!    updated blocks (i, K) and (K, j) (parallel).
//!
//! Phases 2 and 3 are each a single rayon parallel region; returning from
//! the region is the barrier. Every task gets an exclusive `&mut` band of L
//! full matrix rows from `par_chunks_mut`, so no two tasks can write the same
//! cell. Block updates work on private scratch copies and are written back
//! into the task's own band.

use std::time::{Duration, Instant};

use rayon::prelude::*;
use rayon::ThreadPool;

use crate::core::config::{validate_block_length, ParallelConfig};
use crate::core::error::Result;
use crate::core::kernels::sequential::close_in_place;
use crate::core::matrix::{relax, Distance, DistanceMatrix};

/// Geometry of the block grid laid over a matrix
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BlockLayout {
    vertices: usize,
    side: usize,
    blocks: usize,
}

impl BlockLayout {
    /// Grid of `side x side` blocks over a `vertices x vertices` matrix.
    ///
    /// Fails unless `side` is in `1..=vertices` and divides `vertices`.
    pub fn new(vertices: usize, side: usize) -> Result<Self> {
        validate_block_length(vertices, side)?;
        Ok(Self {
            vertices,
            side,
            blocks: vertices / side,
        })
    }

    /// Block side length L
    pub fn side(&self) -> usize {
        self.side
    }

    /// Blocks along one dimension (B)
    pub fn blocks(&self) -> usize {
        self.blocks
    }

    /// Flat matrix index of local cell (r, c) inside block (bi, bj)
    #[cfg(test)]
    fn global_index(&self, bi: usize, bj: usize, r: usize, c: usize) -> usize {
        debug_assert!(bi < self.blocks && bj < self.blocks);
        debug_assert!(r < self.side && c < self.side);
        (bi * self.side + r) * self.vertices + bj * self.side + c
    }

    /// Cells in one band (L consecutive full rows = one block-row)
    fn band_len(&self) -> usize {
        self.side * self.vertices
    }

    /// Index of local cell (r, c) of block column `bj` relative to its band
    #[inline(always)]
    fn band_index(&self, bj: usize, r: usize, c: usize) -> usize {
        r * self.vertices + bj * self.side + c
    }

    /// Copy block column `bj` of `band` into a fresh L x L scratch buffer
    fn load(&self, band: &[Distance], bj: usize) -> Vec<Distance> {
        debug_assert_eq!(band.len(), self.band_len());
        let mut block = Vec::with_capacity(self.side * self.side);
        for r in 0..self.side {
            let start = self.band_index(bj, r, 0);
            block.extend_from_slice(&band[start..start + self.side]);
        }
        block
    }

    /// Write an L x L scratch buffer back into block column `bj` of `band`
    fn store(&self, band: &mut [Distance], bj: usize, block: &[Distance]) {
        debug_assert_eq!(band.len(), self.band_len());
        debug_assert_eq!(block.len(), self.side * self.side);
        for (r, row) in block.chunks_exact(self.side).enumerate() {
            let start = self.band_index(bj, r, 0);
            band[start..start + self.side].copy_from_slice(row);
        }
    }
}

/// Wall time spent in each phase, summed over all pivot blocks
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PhaseTimes {
    pub dependent: Duration,
    pub partially_dependent: Duration,
    pub independent: Duration,
}

/// Min-plus accumulate one block through a pivot:
/// `target[r][c] = min(target[r][c], row_operand[r][k] + col_operand[k][c])`.
///
/// `row_operand` holds paths from the target's rows into the pivot vertices,
/// `col_operand` paths from the pivot vertices to the target's columns. Both
/// are read-only and must not alias `target`.
fn relax_through(target: &mut [Distance], row_operand: &[Distance], col_operand: &[Distance], side: usize) {
    debug_assert_eq!(target.len(), side * side);
    debug_assert_eq!(row_operand.len(), side * side);
    debug_assert_eq!(col_operand.len(), side * side);

    for k in 0..side {
        let via = &col_operand[k * side..(k + 1) * side];
        for (r, target_row) in target.chunks_exact_mut(side).enumerate() {
            let d_rk = row_operand[r * side + k];
            if !d_rk.is_finite() {
                continue;
            }
            for (cell, &d_kc) in target_row.iter_mut().zip(via) {
                relax(cell, d_rk, d_kc);
            }
        }
    }
}

/// Phase 2, block-row K: blocks (K, j), j != K, relaxed with
/// [diagonal, stale (K, j)] as operands. Parallel over j.
fn update_pivot_row(layout: &BlockLayout, band: &mut [Distance], pivot: usize, diagonal: &[Distance]) {
    let side = layout.side;
    let snapshot: &[Distance] = &*band;
    let updated: Vec<(usize, Vec<Distance>)> = (0..layout.blocks)
        .into_par_iter()
        .filter(|&bj| bj != pivot)
        .map(|bj| {
            let stale = layout.load(snapshot, bj);
            let mut target = stale.clone();
            relax_through(&mut target, diagonal, &stale, side);
            (bj, target)
        })
        .collect();

    for (bj, block) in updated {
        layout.store(band, bj, &block);
    }
}

/// Phase 2, block-column K: block (i, K) of this band relaxed with
/// [stale (i, K), diagonal] as operands.
fn update_pivot_column(layout: &BlockLayout, band: &mut [Distance], pivot: usize, diagonal: &[Distance]) {
    let stale = layout.load(band, pivot);
    let mut target = stale.clone();
    relax_through(&mut target, &stale, diagonal, layout.side);
    layout.store(band, pivot, &target);
}

/// Phase 3 for one band i != K: every block (i, j), j != K, relaxed with
/// [(i, K), (K, j)] as operands.
fn update_remaining(layout: &BlockLayout, band: &mut [Distance], pivot: usize, pivot_row: &[Vec<Distance>]) {
    let row_operand = layout.load(band, pivot);
    for (bj, col_operand) in pivot_row.iter().enumerate() {
        if bj == pivot {
            continue;
        }
        let mut target = layout.load(band, bj);
        relax_through(&mut target, &row_operand, col_operand, layout.side);
        layout.store(band, bj, &target);
    }
}

/// Blocked parallel Floyd-Warshall on a dedicated pool sized by `parallel`.
///
/// Fails with a configuration error when `block_length` is zero, exceeds the
/// vertex count or does not divide it; the matrix is untouched in that case.
pub fn floyd_warshall_blocked(
    matrix: &mut DistanceMatrix,
    parallel: &ParallelConfig,
    block_length: usize,
) -> Result<PhaseTimes> {
    BlockLayout::new(matrix.vertices(), block_length)?;
    let pool = parallel.build_pool()?;
    floyd_warshall_blocked_on(&pool, matrix, block_length)
}

/// Blocked parallel Floyd-Warshall on an already running pool.
///
/// Same failure modes as [`floyd_warshall_blocked`]. Nothing is logged
/// between the first pivot and the last.
pub fn floyd_warshall_blocked_on(
    pool: &ThreadPool,
    matrix: &mut DistanceMatrix,
    block_length: usize,
) -> Result<PhaseTimes> {
    let layout = BlockLayout::new(matrix.vertices(), block_length)?;
    Ok(pool.install(|| relax_blocked(matrix, &layout)))
}

/// Body of the blocked kernel; runs on whatever rayon pool is current.
pub(crate) fn relax_blocked(matrix: &mut DistanceMatrix, layout: &BlockLayout) -> PhaseTimes {
    assert_eq!(
        layout.blocks * layout.side,
        matrix.vertices(),
        "block layout does not match matrix"
    );

    let band_len = layout.band_len();
    let cells = matrix.as_mut_slice();
    let mut times = PhaseTimes::default();

    for pivot in 0..layout.blocks {
        let pivot_band = pivot * band_len..(pivot + 1) * band_len;

        // Phase 1: dependent
        let started = Instant::now();
        let diagonal = {
            let band = &mut cells[pivot_band.clone()];
            let mut diagonal = layout.load(band, pivot);
            close_in_place(&mut diagonal, layout.side);
            layout.store(band, pivot, &diagonal);
            diagonal
        };
        times.dependent += started.elapsed();

        // Phase 2: partially dependent
        let started = Instant::now();
        cells
            .par_chunks_mut(band_len)
            .enumerate()
            .for_each(|(bi, band)| {
                if bi == pivot {
                    update_pivot_row(layout, band, pivot, &diagonal);
                } else {
                    update_pivot_column(layout, band, pivot, &diagonal);
                }
            });
        times.partially_dependent += started.elapsed();

        // Phase 3: independent
        let started = Instant::now();
        let pivot_row: Vec<Vec<Distance>> = {
            let band = &cells[pivot_band];
            (0..layout.blocks).map(|bj| layout.load(band, bj)).collect()
        };
        cells
            .par_chunks_mut(band_len)
            .enumerate()
            .filter(|(bi, _)| *bi != pivot)
            .for_each(|(_, band)| update_remaining(layout, band, pivot, &pivot_row));
        times.independent += started.elapsed();
    }

    times
}
