//! Synthetic benchmark graphs
//!
//! Random directed graphs with unit weights, no self-loops and no parallel
//! edges, emitted directly as a dense [`DistanceMatrix`].

use log::debug;
use rand::Rng;
use rustc_hash::FxHashSet;

use crate::core::error::{ConfigError, Result};
use crate::core::matrix::{Distance, DistanceMatrix};

/// Largest number of directed edges a simple graph on `vertices` nodes can hold
pub fn max_edges(vertices: usize) -> usize {
    vertices.saturating_mul(vertices.saturating_sub(1))
}

/// Draw `edges` distinct ordered pairs `(u, v)`, `u != v`, uniformly at random.
///
/// Rejection sampling: self-loops and pairs already accepted are redrawn.
/// Meant for sparse requests; near-complete graphs spend most draws rejecting.
pub fn generate_edges<R: Rng>(
    vertices: usize,
    edges: usize,
    rng: &mut R,
) -> Result<Vec<(usize, usize)>> {
    if vertices == 0 {
        return Err(ConfigError::ZeroVertices.into());
    }
    let max = max_edges(vertices);
    if edges > max {
        return Err(ConfigError::TooManyEdges {
            edges,
            vertices,
            max,
        }
        .into());
    }

    let mut seen: FxHashSet<(usize, usize)> = FxHashSet::default();
    seen.reserve(edges);
    let mut accepted = Vec::with_capacity(edges);
    let mut rejected = 0usize;

    while accepted.len() < edges {
        let u = rng.random_range(0..vertices);
        let v = rng.random_range(0..vertices);
        if u == v || !seen.insert((u, v)) {
            rejected += 1;
            continue;
        }
        accepted.push((u, v));
    }

    debug!("Accepted {} edges after {} rejected draws", accepted.len(), rejected);
    Ok(accepted)
}

/// Random V x V matrix: zero diagonal, `edges` unit-weight cells, rest unreachable.
///
/// Fails before allocating when `edges` exceeds `vertices * (vertices - 1)`.
pub fn generate_graph<R: Rng>(
    vertices: usize,
    edges: usize,
    rng: &mut R,
) -> Result<DistanceMatrix> {
    let edge_list = generate_edges(vertices, edges, rng)?;
    let mut matrix = DistanceMatrix::disconnected(vertices)?;
    for (u, v) in edge_list {
        matrix.set(u, v, Distance::UNIT);
    }
    Ok(matrix)
}
