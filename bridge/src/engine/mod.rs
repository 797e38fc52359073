//! Engine abstraction consumed by the bridge.
//!
//! The bridge never talks to a GPU API directly. Textures and shaders are
//! reached through [`TextureBackend`] and [`ShaderBackend`], which a real
//! engine implements on top of its own objects. Implementations receive
//! already-validated, tightly packed byte slices.
//!
//! # Available Engines
//!
//! - [`software`]: host-memory engine for testing and development

mod error;
pub mod software;

pub use error::EngineError;
pub use software::{BufferSlot, EngineLimits, SoftwareShader, SoftwareTexture};

use crate::types::{ComponentFormat, Extent2d, PixelFormat, PixelRect, VariableType};

/// A texture object owned by the engine.
pub trait TextureBackend {
    /// Per-channel numeric encoding.
    fn component_format(&self) -> ComponentFormat;

    /// Channel layout.
    fn pixel_format(&self) -> PixelFormat;

    /// Texture size in pixels.
    fn size(&self) -> Extent2d;

    /// Number of channels per pixel.
    fn channels(&self) -> usize {
        self.pixel_format().channels()
    }

    /// Read the whole texture into `dst`, row-major, tightly packed.
    ///
    /// `dst` is exactly `height * width * channels * component bytes` long.
    fn download(&self, dst: &mut [u8]) -> Result<(), EngineError>;

    /// Replace the whole texture with `src`, laid out like [`download`](Self::download).
    fn upload(&mut self, src: &[u8]) -> Result<(), EngineError>;

    /// Write `src` (`region.rows * region.cols` pixels, row-major) into `region`.
    fn upload_sub_region(&mut self, src: &[u8], region: PixelRect) -> Result<(), EngineError>;
}

/// A shader object owned by the engine.
pub trait ShaderBackend {
    /// Copy `buffer` into the slot called `name`.
    ///
    /// The engine checks the buffer against what the shader declares for
    /// that slot.
    fn set_buffer(&mut self, name: &str, buffer: BufferUpload<'_>) -> Result<(), EngineError>;
}

/// Data handed to [`ShaderBackend::set_buffer`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BufferUpload<'a> {
    /// Element kind; never `Invalid`.
    pub var_type: VariableType,
    /// Number of meaningful axes (0 to 3).
    pub ndim: usize,
    /// Extent per axis, padded with trailing 1s.
    pub shape: [usize; 3],
    /// Tightly packed element bytes.
    pub data: &'a [u8],
}

impl BufferUpload<'_> {
    /// Number of elements described by the shape.
    pub fn element_count(&self) -> usize {
        self.shape.iter().product()
    }
}
