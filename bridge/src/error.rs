//! Bridge error types.

use thiserror::Error;

use crate::engine::EngineError;
use crate::types::{DType, VariableType};

/// The bridge operation that reported an error.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operation {
    SetBuffer,
    Download,
    Upload,
    UploadSubRegion,
}

impl std::fmt::Display for Operation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            Self::SetBuffer => "Shader::set_buffer()",
            Self::Download => "Texture::download()",
            Self::Upload => "Texture::upload()",
            Self::UploadSubRegion => "Texture::upload_sub_region()",
        })
    }
}

/// Errors returned by bridge operations.
///
/// Every variant except [`BridgeError::Engine`] and
/// [`BridgeError::AllocationFailed`] is a usage error: the caller handed in
/// an array that cannot be used for the operation. Usage errors are detected
/// before the engine is called, so the target is never partially written.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum BridgeError {
    #[error("{op}: number of array dimensions must be <= 3, got {ndim}")]
    TooManyDimensions { op: Operation, ndim: usize },

    #[error("{op}: unsupported array dtype ({dtype})")]
    UnsupportedDtype { op: Operation, dtype: DType },

    #[error("{op}: array must be C-contiguous")]
    NotContiguous { op: Operation },

    #[error("{op}: expected a 2 or 3-dimensional array, got {ndim} dimensions")]
    InvalidRank { op: Operation, ndim: usize },

    #[error(
        "{op}: array size ({rows}x{cols}) does not match the texture ({height}x{width})"
    )]
    SizeMismatch {
        op: Operation,
        rows: usize,
        cols: usize,
        height: u32,
        width: u32,
    },

    #[error(
        "{op}: number of color channels in array ({array}) does not match the texture ({texture})"
    )]
    ChannelMismatch {
        op: Operation,
        array: usize,
        texture: usize,
    },

    #[error("{op}: dtype of array ({array}) does not match the texture ({texture})")]
    DtypeMismatch {
        op: Operation,
        array: VariableType,
        texture: VariableType,
    },

    #[error(
        "{op}: bounds exceed the size of the texture (origin ({x}, {y}) + extent {rows}x{cols} > {height}x{width})"
    )]
    OutOfBounds {
        op: Operation,
        x: u32,
        y: u32,
        rows: usize,
        cols: usize,
        height: u32,
        width: u32,
    },

    #[error("invalid array view: {0}")]
    InvalidView(String),

    #[error("{op}: failed to allocate {bytes} bytes")]
    AllocationFailed { op: Operation, bytes: usize },

    #[error(transparent)]
    Engine(#[from] EngineError),
}

impl BridgeError {
    /// Returns true if the error was caused by the arguments rather than by
    /// the engine or the allocator.
    pub fn is_usage_error(&self) -> bool {
        !matches!(self, Self::Engine(_) | Self::AllocationFailed { .. })
    }

    /// The operation that failed, if the error was raised by one.
    pub fn operation(&self) -> Option<Operation> {
        match self {
            Self::TooManyDimensions { op, .. }
            | Self::UnsupportedDtype { op, .. }
            | Self::NotContiguous { op }
            | Self::InvalidRank { op, .. }
            | Self::SizeMismatch { op, .. }
            | Self::ChannelMismatch { op, .. }
            | Self::DtypeMismatch { op, .. }
            | Self::OutOfBounds { op, .. }
            | Self::AllocationFailed { op, .. } => Some(*op),
            Self::InvalidView(_) | Self::Engine(_) => None,
        }
    }
}

pub type BridgeResult<T> = Result<T, BridgeError>;
