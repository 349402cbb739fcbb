//! Post-run invariant validation
//!
//! Fast-fail checks for a converged distance matrix:
//! - Zero diagonal
//! - Triangle inequality over every finite pair of legs
//! - Bit-for-bit agreement with the sequential reference

use log::{info, warn};
use rayon::prelude::*;

use crate::core::matrix::{Distance, DistanceMatrix};

/// Errors kept per check before the rest are only counted
const MAX_REPORTED: usize = 10;

/// Invariant check results
#[derive(Debug, Default)]
pub struct InvariantReport {
    pub passed: bool,
    pub checks_run: usize,
    pub checks_passed: usize,
    pub errors: Vec<String>,
}

impl InvariantReport {
    pub fn new() -> Self {
        Self {
            passed: true,
            ..Default::default()
        }
    }

    fn check_passed(&mut self) {
        self.checks_run += 1;
        self.checks_passed += 1;
    }

    fn check_failed(&mut self, msg: String) {
        self.checks_run += 1;
        self.passed = false;
        self.errors.push(msg);
    }

    fn record(&mut self, outcome: Result<(), String>) {
        match outcome {
            Ok(()) => self.check_passed(),
            Err(msg) => self.check_failed(msg),
        }
    }
}

/// First cell where two matrices differ
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Mismatch {
    pub row: usize,
    pub col: usize,
    pub expected: Distance,
    pub actual: Distance,
}

/// Every `D[i][i]` must be zero
pub fn check_diagonal(matrix: &DistanceMatrix) -> Result<(), String> {
    let bad: Vec<usize> = (0..matrix.vertices())
        .filter(|&i| matrix.get(i, i) != Distance::ZERO)
        .collect();
    if bad.is_empty() {
        Ok(())
    } else {
        Err(format!("{} diagonal cells are non-zero (first: {})", bad.len(), bad[0]))
    }
}

/// `D[i][j] <= D[i][k] + D[k][j]` whenever both legs are finite
pub fn check_triangle_inequality(matrix: &DistanceMatrix) -> Result<(), String> {
    let n = matrix.vertices();
    let violations: Vec<(usize, usize, usize)> = (0..n)
        .into_par_iter()
        .flat_map_iter(|i| {
            let mut found = Vec::new();
            let row_i = matrix.row(i);
            for (k, &d_ik) in row_i.iter().enumerate() {
                if !d_ik.is_finite() {
                    continue;
                }
                for (j, &d_kj) in matrix.row(k).iter().enumerate() {
                    if let Some(through_k) = d_ik.through(d_kj) {
                        if row_i[j] > through_k && found.len() < MAX_REPORTED {
                            found.push((i, j, k));
                        }
                    }
                }
            }
            found
        })
        .collect();

    match violations.first() {
        None => Ok(()),
        Some(&(i, j, k)) => Err(format!(
            "triangle inequality violated {}+ times (first: D[{}][{}]={} > D[{}][{}]+D[{}][{}])",
            violations.len(),
            i,
            j,
            matrix.get(i, j),
            i,
            k,
            k,
            j
        )),
    }
}

/// Row-major first difference between `expected` and `actual`
pub fn compare_matrices(expected: &DistanceMatrix, actual: &DistanceMatrix) -> Option<Mismatch> {
    if expected.vertices() != actual.vertices() {
        return Some(Mismatch {
            row: expected.vertices().min(actual.vertices()),
            col: 0,
            expected: Distance::INFINITY,
            actual: Distance::INFINITY,
        });
    }
    let n = expected.vertices();
    expected
        .as_slice()
        .iter()
        .zip(actual.as_slice())
        .position(|(e, a)| e != a)
        .map(|idx| Mismatch {
            row: idx / n,
            col: idx % n,
            expected: expected.as_slice()[idx],
            actual: actual.as_slice()[idx],
        })
}

/// Run every check on `actual`, comparing against `reference` when given
pub fn validate_result(actual: &DistanceMatrix, reference: Option<&DistanceMatrix>) -> InvariantReport {
    let mut report = InvariantReport::new();

    report.record(check_diagonal(actual));
    report.record(check_triangle_inequality(actual));

    if let Some(reference) = reference {
        report.record(match compare_matrices(reference, actual) {
            None => Ok(()),
            Some(m) => Err(format!(
                "result differs from sequential reference at ({}, {}): expected {}, got {}",
                m.row, m.col, m.expected, m.actual
            )),
        });
    }

    if report.passed {
        info!("Validation passed ({}/{} checks)", report.checks_passed, report.checks_run);
    } else {
        for e in &report.errors {
            warn!("Validation failed: {}", e);
        }
    }
    report
}
