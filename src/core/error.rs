//! Error types for butterfly-apsp library
//!
//! Every configuration problem is detected before a kernel runs and surfaces
//! as a [`ConfigError`]. Kernels themselves are infallible once handed a
//! valid matrix.

use thiserror::Error;

/// Invalid run configuration. Always reported before any computation starts.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    /// None of sequential / naive-parallel / block-parallel was requested
    #[error("specify mode of execution: -s (sequential), -n (naive-parallel), -b (block-parallel)")]
    NoModeSelected,

    /// More edges than a simple directed graph on `vertices` nodes can hold
    #[error("number of edges {edges} exceeds what is possible given number of vertices {vertices} (max {max})")]
    TooManyEdges {
        edges: usize,
        vertices: usize,
        max: usize,
    },

    /// Block side larger than the matrix itself
    #[error("block length {block_length} cannot be greater than number of vertices {vertices}")]
    BlockLengthExceedsVertices { block_length: usize, vertices: usize },

    /// Block side does not tile the matrix exactly
    #[error("vertices: {vertices} must be divisible by block length: {block_length}")]
    BlockLengthNotDivisor { vertices: usize, block_length: usize },

    /// Block length of zero
    #[error("block length must be at least 1")]
    ZeroBlockLength,

    /// Matrix with no vertices
    #[error("number of vertices must be at least 1")]
    ZeroVertices,

    /// Edge weight equal to the unreachable marker
    #[error("weight {weight} at ({row}, {col}) is reserved for unreachable pairs")]
    ReservedWeight { row: usize, col: usize, weight: u32 },

    /// Flat buffer whose length is not a perfect square of the vertex count
    #[error("distance buffer of length {len} is not a {vertices}x{vertices} matrix")]
    NotSquare { len: usize, vertices: usize },
}

/// Main error type for butterfly-apsp operations
#[derive(Debug, Error)]
pub enum Error {
    /// Invalid configuration or parameters
    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),

    /// The dedicated worker pool could not be started
    #[error("failed to build thread pool: {0}")]
    ThreadPool(#[from] rayon::ThreadPoolBuildError),

    /// Writing a report or matrix dump failed
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Convenience result type for butterfly-apsp operations
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_error_messages() {
        let err = ConfigError::BlockLengthNotDivisor {
            vertices: 10,
            block_length: 3,
        };
        assert_eq!(err.to_string(), "vertices: 10 must be divisible by block length: 3");

        let err = ConfigError::TooManyEdges {
            edges: 7,
            vertices: 2,
            max: 2,
        };
        assert!(err.to_string().contains("exceeds"));
    }

    #[test]
    fn test_config_error_wraps_into_error() {
        let err: Error = ConfigError::NoModeSelected.into();
        assert!(matches!(err, Error::Config(ConfigError::NoModeSelected)));
        assert!(err.to_string().starts_with("configuration error"));
    }
}
