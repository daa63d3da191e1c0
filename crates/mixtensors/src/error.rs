//! Error types for mixtensors.

use thiserror::Error;

/// Errors that can occur in container operations.
///
/// Every failure is raised synchronously at the point of violation; nothing
/// in this crate retries, logs, or substitutes defaults.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum Error {
    /// Index outside the valid range of a container axis.
    #[error("index {index} is out of range for extent {extent}")]
    IndexOutOfRange { index: usize, extent: usize },

    /// Binary operation between shapes that cannot be combined.
    #[error("dimension mismatch: expected {expected}, got {actual}")]
    DimensionMismatch { expected: usize, actual: usize },

    /// Operation invoked on a container that cannot support it.
    #[error("`{op}` is not supported: {reason}")]
    Unsupported { op: &'static str, reason: String },

    /// Matrix must be square.
    #[error("matrix must be square, got {rows}x{cols}")]
    NotSquare { rows: usize, cols: usize },

    /// Normalization of a container with zero norm.
    #[error("cannot normalize a container with zero norm")]
    ZeroNorm,
}
