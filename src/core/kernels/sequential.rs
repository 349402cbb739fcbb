//! Reference Floyd-Warshall: one thread, k-outer / i-middle / j-inner

use crate::core::matrix::{relax, Distance, DistanceMatrix};

/// Relax `matrix` in place until every cell holds the shortest-path distance.
///
/// Row k and column k are fixed points while k is the intermediate, so
/// reading them mid-iteration is equivalent to reading their values from the
/// end of iteration k-1.
pub fn floyd_warshall_sequential(matrix: &mut DistanceMatrix) {
    let n = matrix.vertices();
    close_in_place(matrix.as_mut_slice(), n);
}

/// Floyd-Warshall over a square row-major `side x side` buffer.
///
/// Shared with the blocked kernel's dependent phase, where the buffer is a
/// scratch copy of one diagonal block.
pub(crate) fn close_in_place(cells: &mut [Distance], side: usize) {
    debug_assert_eq!(cells.len(), side * side);

    for k in 0..side {
        for i in 0..side {
            let d_ik = cells[i * side + k];
            if !d_ik.is_finite() {
                continue;
            }
            for j in 0..side {
                let d_kj = cells[k * side + j];
                relax(&mut cells[i * side + j], d_ik, d_kj);
            }
        }
    }
}
