//! Integration tests for the butterfly-apsp kernels
//!
//! Every kernel must agree with the sequential reference bit for bit, and the
//! converged matrix must satisfy the shortest-path invariants.

use std::collections::VecDeque;

use butterfly_apsp::{
    floyd_warshall_blocked, floyd_warshall_naive, floyd_warshall_sequential, generate_edges, generate_graph,
    max_edges, validate_result, ConfigError, Distance, DistanceMatrix, Error, Mode, ParallelConfig, RunConfig,
};
use rand::rngs::StdRng;
use rand::SeedableRng;

/// Run all three kernels on copies of `input` and assert they agree
fn assert_kernels_agree(input: &DistanceMatrix, block_length: usize, threads: usize) -> DistanceMatrix {
    let parallel = ParallelConfig::new(threads);

    let mut sequential = input.clone();
    floyd_warshall_sequential(&mut sequential);

    let mut naive = input.clone();
    floyd_warshall_naive(&mut naive, &parallel).unwrap();

    let mut blocked = input.clone();
    floyd_warshall_blocked(&mut blocked, &parallel, block_length).unwrap();

    assert_eq!(naive, sequential, "naive differs (L={}, threads={})", block_length, threads);
    assert_eq!(blocked, sequential, "blocked differs (L={}, threads={})", block_length, threads);
    sequential
}

/// Reachability by BFS over the generated edge list
fn reachable_from(vertices: usize, edges: &[(usize, usize)], source: usize) -> Vec<bool> {
    let mut adjacency = vec![Vec::new(); vertices];
    for &(u, v) in edges {
        adjacency[u].push(v);
    }
    let mut seen = vec![false; vertices];
    let mut queue = VecDeque::from([source]);
    seen[source] = true;
    while let Some(u) = queue.pop_front() {
        for &v in &adjacency[u] {
            if !seen[v] {
                seen[v] = true;
                queue.push_back(v);
            }
        }
    }
    seen
}

#[test]
fn test_kernels_equivalent_across_configurations() {
    let mut rng = StdRng::seed_from_u64(2024);
    let cases: Vec<(usize, usize, Vec<usize>)> = vec![
        (1, 0, vec![1]),
        (2, 1, vec![1, 2]),
        (16, 20, vec![1, 2, 4, 8, 16]),
        (30, 45, vec![3, 5, 10, 15]),
        (60, 150, vec![6, 12, 20, 60]),
        (96, 400, vec![8, 16, 32, 48]),
    ];
    for (vertices, edges, block_lengths) in cases {
        let input = generate_graph(vertices, edges, &mut rng).unwrap();
        for block_length in block_lengths {
            for threads in [1, 2, 4] {
                assert_kernels_agree(&input, block_length, threads);
            }
        }
    }
}

#[test]
fn test_two_hundred_vertices_twenty_wide_blocks() {
    let mut rng = StdRng::seed_from_u64(1);
    let input = generate_graph(200, 400, &mut rng).unwrap();
    assert_kernels_agree(&input, 20, 2);
}

#[test]
fn test_arbitrary_weights_equivalent() {
    // Kernels accept any non-negative finite weights, not only generated unit edges
    let mut rows = vec![vec![None; 12]; 12];
    for (i, row) in rows.iter_mut().enumerate() {
        row[i] = Some(0);
        row[(i + 1) % 12] = Some((i as u32 * 7) % 5 + 1);
        row[(i + 5) % 12] = Some(20 + i as u32);
    }
    let input = DistanceMatrix::from_rows(&rows).unwrap();
    for block_length in [1, 2, 3, 4, 6, 12] {
        assert_kernels_agree(&input, block_length, 3);
    }
}

#[test]
fn test_converged_invariants_and_reachability() {
    let mut rng = StdRng::seed_from_u64(77);
    let vertices = 40;
    let edges = generate_edges(vertices, 70, &mut rng).unwrap();

    let mut matrix = DistanceMatrix::disconnected(vertices).unwrap();
    for &(u, v) in &edges {
        matrix.set(u, v, Distance::UNIT);
    }
    let converged = assert_kernels_agree(&matrix, 8, 2);

    let report = validate_result(&converged, None);
    assert!(report.passed, "{:?}", report.errors);

    for i in 0..vertices {
        assert_eq!(converged.get(i, i), Distance::ZERO);
        let reachable = reachable_from(vertices, &edges, i);
        for j in 0..vertices {
            assert_eq!(
                converged.get(i, j).is_finite(),
                reachable[j],
                "reachability mismatch for ({}, {})",
                i,
                j
            );
        }
    }

    // Already converged: another pass changes nothing
    let mut again = converged.clone();
    floyd_warshall_sequential(&mut again);
    assert_eq!(again, converged);
}

#[test]
fn test_chain_scenario() {
    let mut matrix = DistanceMatrix::disconnected(4).unwrap();
    matrix.set(0, 1, Distance::UNIT);
    matrix.set(1, 2, Distance::UNIT);
    matrix.set(2, 3, Distance::UNIT);

    let converged = assert_kernels_agree(&matrix, 2, 2);
    assert_eq!(converged.get(0, 3), Distance::new(3));
    assert_eq!(converged.get(1, 3), Distance::new(2));
    assert_eq!(converged.get(3, 0), Distance::INFINITY);
}

#[test]
fn test_no_edges_stay_unreachable() {
    let mut rng = StdRng::seed_from_u64(3);
    let input = generate_graph(12, 0, &mut rng).unwrap();
    let converged = assert_kernels_agree(&input, 4, 2);
    assert_eq!(converged.reachable_pairs(), 0);
    for i in 0..12 {
        assert_eq!(converged.get(i, i), Distance::ZERO);
    }
}

#[test]
fn test_complete_graph_all_ones() {
    let mut rng = StdRng::seed_from_u64(4);
    let vertices = 10;
    let input = generate_graph(vertices, max_edges(vertices), &mut rng).unwrap();
    let converged = assert_kernels_agree(&input, 5, 2);
    for i in 0..vertices {
        for j in 0..vertices {
            let expected = if i == j { Distance::ZERO } else { Distance::UNIT };
            assert_eq!(converged.get(i, j), expected);
        }
    }
}

#[test]
fn test_single_vertex_matrix() {
    let mut rng = StdRng::seed_from_u64(5);
    let input = generate_graph(1, 0, &mut rng).unwrap();
    let converged = assert_kernels_agree(&input, 1, 1);
    assert_eq!(converged.as_slice(), &[Distance::ZERO]);
}

#[test]
fn test_indivisible_block_length_rejected() {
    let mut config = RunConfig::new(Mode::BlockedParallel);
    config.vertices = 10;
    config.edges = 10;
    config.block_length = 3;
    assert_eq!(
        config.validate(),
        Err(ConfigError::BlockLengthNotDivisor {
            vertices: 10,
            block_length: 3
        })
    );

    let mut rng = StdRng::seed_from_u64(6);
    let mut matrix = generate_graph(10, 10, &mut rng).unwrap();
    let err = floyd_warshall_blocked(&mut matrix, &ParallelConfig::new(1), 3).unwrap_err();
    assert!(matches!(err, Error::Config(ConfigError::BlockLengthNotDivisor { .. })));
}

#[test]
fn test_generator_properties() {
    let mut rng = StdRng::seed_from_u64(8);
    for &(vertices, edges) in &[(1, 0), (2, 2), (10, 45), (50, 500), (8, 56)] {
        let list = generate_edges(vertices, edges, &mut rng).unwrap();
        assert_eq!(list.len(), edges);
        assert!(list.iter().all(|&(u, v)| u != v));
        let mut sorted = list.clone();
        sorted.sort_unstable();
        sorted.dedup();
        assert_eq!(sorted.len(), edges, "duplicates for V={} E={}", vertices, edges);
    }
    assert!(generate_edges(8, 57, &mut rng).is_err());
}
