//! # RedLilium Bridge
//!
//! Data-format bridge between host N-dimensional arrays and GPU textures and
//! shader buffers.
//!
//! ## Overview
//!
//! This crate provides:
//! - [`ArrayView`] - Borrowed host array (dtype, shape, optional strides)
//! - [`PixelBuffer`] - Owned result of a texture download
//! - [`TextureBackend`] / [`ShaderBackend`] - Traits a rendering engine implements
//! - [`marshal`] - The four bridge operations with their validation rules
//! - A software engine ([`SoftwareTexture`], [`SoftwareShader`]) for testing
//!
//! ## Example
//!
//! ```ignore
//! use redlilium_bridge::{ArrayView, Origin2d, TextureArrayExt};
//!
//! let pixels = vec![0u8; 32 * 64 * 4];
//! texture.upload_array(&ArrayView::from_slice(&pixels, &[32, 64, 4])?)?;
//!
//! let patch = vec![255u8; 8 * 8 * 4];
//! let view = ArrayView::from_slice(&patch, &[8, 8, 4])?;
//! texture.upload_array_sub_region(&view, Origin2d::new(16, 16))?;
//!
//! let readback = texture.download_array()?;
//! assert_eq!(readback.shape(), [32, 64, 4]);
//! ```

pub mod array;
pub mod engine;
pub mod error;
pub mod marshal;
pub mod types;

// Re-export main types for convenience
pub use array::{ArrayView, Element, PixelBuffer};
pub use engine::{
    BufferSlot, BufferUpload, EngineError, EngineLimits, ShaderBackend, SoftwareShader,
    SoftwareTexture, TextureBackend,
};
pub use error::{BridgeError, BridgeResult, Operation};
pub use marshal::{ShaderArrayExt, TextureArrayExt};
pub use types::{
    BlendMode, ComponentFormat, DType, DTypeCode, Extent2d, InterpolationMode, Origin2d,
    PixelFormat, PixelRect, TextureDescriptor, TextureFlags, VariableType, WrapMode,
    interpret_dtype,
};

/// Bridge library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Initialize the bridge.
///
/// Only logs the version; the bridge holds no global state.
pub fn init() {
    log::info!("RedLilium Bridge v{} initialized", VERSION);
}
