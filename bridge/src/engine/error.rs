//! Engine error types.

use thiserror::Error;

/// Errors reported by a rendering engine behind the bridge.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum EngineError {
    /// Invalid parameter.
    #[error("invalid parameter: {0}")]
    InvalidParameter(String),
    /// A transfer did not match the size of its target.
    #[error("transfer size mismatch: expected {expected} bytes, got {actual}")]
    SizeMismatch { expected: usize, actual: usize },
    /// The requested feature is not supported.
    #[error("feature not supported: {0}")]
    FeatureNotSupported(String),
    /// Reading a texture source failed.
    #[error("i/o error: {0}")]
    Io(String),
    /// Out of GPU memory.
    #[error("out of GPU memory")]
    OutOfMemory,
    /// The device was lost.
    #[error("GPU device lost")]
    DeviceLost,
    /// Internal engine error.
    #[error("internal engine error: {0}")]
    Internal(String),
}
