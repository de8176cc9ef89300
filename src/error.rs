//! Error types for the life engine

use thiserror::Error;

/// Errors reported synchronously by the engine and its grids.
#[derive(Debug, Error)]
pub enum LifeError {
    /// Grid dimension was negative.
    #[error("invalid grid dimension: {size}")]
    InvalidDimension { size: i64 },

    /// Cell coordinates fall outside `[0, size)`.
    #[error("coordinates ({x}, {y}) out of bounds for {size}x{size} grid")]
    OutOfBounds { x: usize, y: usize, size: usize },

    /// The worker pool could not be created.
    #[error("failed to build worker pool: {0}")]
    ThreadPool(#[from] rayon::ThreadPoolBuildError),

    /// A generation worker went away without handing back its buffer.
    #[error("generation computation aborted")]
    ComputationAborted,
}

/// Result type for engine operations.
pub type LifeResult<T> = Result<T, LifeError>;
