//! Texture formats and descriptors.

use bitflags::bitflags;

use super::{Extent2d, VariableType};

/// Channel layout of a texture.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum PixelFormat {
    /// Single red channel.
    R,
    /// Red and alpha.
    RA,
    RGB,
    #[default]
    RGBA,
    BGR,
    BGRA,
    /// Depth only.
    Depth,
    /// Depth with stencil.
    DepthStencil,
}

impl PixelFormat {
    pub const ALL: [PixelFormat; 8] = [
        Self::R,
        Self::RA,
        Self::RGB,
        Self::RGBA,
        Self::BGR,
        Self::BGRA,
        Self::Depth,
        Self::DepthStencil,
    ];

    /// Number of components per pixel.
    pub fn channels(&self) -> usize {
        match self {
            Self::R | Self::Depth => 1,
            Self::RA | Self::DepthStencil => 2,
            Self::RGB | Self::BGR => 3,
            Self::RGBA | Self::BGRA => 4,
        }
    }

    /// Returns true if this is a depth or stencil format.
    pub fn is_depth_stencil(&self) -> bool {
        matches!(self, Self::Depth | Self::DepthStencil)
    }
}

/// Per-channel numeric encoding of a texture.
///
/// Each variant shares its name and meaning with a [`VariableType`]; see
/// [`ComponentFormat::variable_type`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ComponentFormat {
    Int8,
    #[default]
    UInt8,
    Int16,
    UInt16,
    Int32,
    UInt32,
    Float16,
    Float32,
}

impl ComponentFormat {
    pub const ALL: [ComponentFormat; 8] = [
        Self::Int8,
        Self::UInt8,
        Self::Int16,
        Self::UInt16,
        Self::Int32,
        Self::UInt32,
        Self::Float16,
        Self::Float32,
    ];

    /// The scalar kind stored in each channel.
    pub fn variable_type(&self) -> VariableType {
        match self {
            Self::Int8 => VariableType::Int8,
            Self::UInt8 => VariableType::UInt8,
            Self::Int16 => VariableType::Int16,
            Self::UInt16 => VariableType::UInt16,
            Self::Int32 => VariableType::Int32,
            Self::UInt32 => VariableType::UInt32,
            Self::Float16 => VariableType::Float16,
            Self::Float32 => VariableType::Float32,
        }
    }

    /// Size of one component in bytes.
    pub fn byte_size(&self) -> usize {
        self.variable_type().byte_size()
    }

    /// Decode a raw format code as reported by an engine.
    ///
    /// Engines number component formats with the [`VariableType`] code of
    /// the same kind (`Int8 = 1` through `Float32 = 10`), so codes that name
    /// a kind with no texture format yield `None`.
    pub fn from_raw(code: u8) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|format| format.variable_type() as u8 == code)
    }
}

impl TryFrom<VariableType> for ComponentFormat {
    type Error = VariableType;

    /// Fails with the rejected kind for 64-bit and invalid kinds.
    fn try_from(ty: VariableType) -> Result<Self, Self::Error> {
        match ty {
            VariableType::Int8 => Ok(Self::Int8),
            VariableType::UInt8 => Ok(Self::UInt8),
            VariableType::Int16 => Ok(Self::Int16),
            VariableType::UInt16 => Ok(Self::UInt16),
            VariableType::Int32 => Ok(Self::Int32),
            VariableType::UInt32 => Ok(Self::UInt32),
            VariableType::Float16 => Ok(Self::Float16),
            VariableType::Float32 => Ok(Self::Float32),
            VariableType::Invalid
            | VariableType::Int64
            | VariableType::UInt64
            | VariableType::Float64 => Err(ty),
        }
    }
}

/// Texture filtering used when sampling.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum InterpolationMode {
    Nearest,
    #[default]
    Bilinear,
    /// Bilinear with linear blending between mip levels.
    Trilinear,
}

/// Addressing mode for coordinates outside `[0, 1]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum WrapMode {
    #[default]
    ClampToEdge,
    Repeat,
    MirrorRepeat,
}

bitflags! {
    /// Usage flags for textures.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct TextureFlags: u8 {
        /// Texture can be sampled in a shader.
        const SHADER_READ = 1 << 0;
        /// Texture can be used as a render target.
        const RENDER_TARGET = 1 << 1;
    }
}

impl Default for TextureFlags {
    fn default() -> Self {
        Self::SHADER_READ
    }
}

/// Descriptor for creating a texture.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct TextureDescriptor {
    /// Debug label for the texture.
    pub label: Option<String>,
    pub pixel_format: PixelFormat,
    pub component_format: ComponentFormat,
    pub size: Extent2d,
    /// Filter used for minification.
    pub min_interpolation_mode: InterpolationMode,
    /// Filter used for magnification.
    pub mag_interpolation_mode: InterpolationMode,
    pub wrap_mode: WrapMode,
    /// Sample count for multisampling.
    pub samples: u8,
    pub flags: TextureFlags,
    /// Mip levels are generated on request instead of after every upload.
    pub mipmap_manual: bool,
}

impl TextureDescriptor {
    /// Create a new 2D texture descriptor with default sampling state.
    pub fn new(
        pixel_format: PixelFormat,
        component_format: ComponentFormat,
        size: Extent2d,
    ) -> Self {
        Self {
            label: None,
            pixel_format,
            component_format,
            size,
            min_interpolation_mode: InterpolationMode::default(),
            mag_interpolation_mode: InterpolationMode::default(),
            wrap_mode: WrapMode::default(),
            samples: 1,
            flags: TextureFlags::default(),
            mipmap_manual: false,
        }
    }

    /// Set the debug label.
    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    /// Set the minification and magnification filters.
    pub fn with_interpolation(mut self, min: InterpolationMode, mag: InterpolationMode) -> Self {
        self.min_interpolation_mode = min;
        self.mag_interpolation_mode = mag;
        self
    }

    pub fn with_wrap_mode(mut self, wrap_mode: WrapMode) -> Self {
        self.wrap_mode = wrap_mode;
        self
    }

    /// Set the sample count for multisampling.
    pub fn with_samples(mut self, samples: u8) -> Self {
        self.samples = samples;
        self
    }

    pub fn with_flags(mut self, flags: TextureFlags) -> Self {
        self.flags = flags;
        self
    }

    pub fn with_manual_mipmap(mut self, manual: bool) -> Self {
        self.mipmap_manual = manual;
        self
    }

    /// Number of components per pixel.
    pub fn channels(&self) -> usize {
        self.pixel_format.channels()
    }

    /// Size of one pixel in bytes.
    pub fn bytes_per_pixel(&self) -> usize {
        self.channels() * self.component_format.byte_size()
    }

    /// Size of the full texture contents in bytes, `None` on overflow.
    pub fn byte_size(&self) -> Option<usize> {
        self.size.area().checked_mul(self.bytes_per_pixel())
    }
}

impl Default for TextureDescriptor {
    fn default() -> Self {
        Self::new(
            PixelFormat::default(),
            ComponentFormat::default(),
            Extent2d::default(),
        )
    }
}
