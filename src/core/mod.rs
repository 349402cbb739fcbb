//! Core library modules for butterfly-apsp
//!
//! This module contains the distance matrix, the graph generator, the
//! shortest-path kernels and the benchmark driver built on them.

pub mod config;
pub mod error;
pub mod generator;
pub mod harness;
pub mod kernels;
pub mod matrix;
pub mod timing;
pub mod validate;

// Re-export main types for internal use
pub use config::{Mode, ParallelConfig, RunConfig};
pub use matrix::{Distance, DistanceMatrix};
