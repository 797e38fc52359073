//! Host-memory engine for testing and development.
//!
//! This engine keeps texture and buffer contents in plain `Vec<u8>`s. It
//! implements the same contracts a GPU engine would, which lets the bridge be
//! exercised end to end without GPU hardware.

use std::collections::BTreeMap;

use crate::types::{
    BlendMode, ComponentFormat, Extent2d, InterpolationMode, PixelFormat, PixelRect,
    TextureDescriptor, TextureFlags, VariableType,
};

use super::{BufferUpload, EngineError, ShaderBackend, TextureBackend};

/// Resource limits enforced by the software engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct EngineLimits {
    /// Maximum texture width or height.
    pub max_texture_dimension: u32,
    /// Maximum size of a single texture or buffer in bytes.
    pub max_buffer_bytes: usize,
}

impl Default for EngineLimits {
    fn default() -> Self {
        Self {
            max_texture_dimension: 16384,
            max_buffer_bytes: 1 << 30, // 1 GB
        }
    }
}

impl EngineLimits {
    /// Validate a descriptor and return the byte size of its contents.
    fn check_texture(&self, descriptor: &TextureDescriptor) -> Result<usize, EngineError> {
        let size = descriptor.size;
        if size.width == 0 || size.height == 0 {
            return Err(EngineError::InvalidParameter(format!(
                "texture size {}x{} must be non-zero",
                size.width, size.height
            )));
        }
        if size.width > self.max_texture_dimension || size.height > self.max_texture_dimension {
            return Err(EngineError::InvalidParameter(format!(
                "texture size {}x{} exceeds maximum dimension {}",
                size.width, size.height, self.max_texture_dimension
            )));
        }
        if descriptor.samples == 0 {
            return Err(EngineError::InvalidParameter(
                "sample count must be at least 1".to_string(),
            ));
        }
        let Some(bytes) = descriptor.byte_size() else {
            return Err(EngineError::InvalidParameter(format!(
                "texture size {}x{} overflows the addressable byte size",
                size.width, size.height
            )));
        };
        if bytes > self.max_buffer_bytes {
            return Err(EngineError::InvalidParameter(format!(
                "texture needs {bytes} bytes, maximum is {}",
                self.max_buffer_bytes
            )));
        }
        Ok(bytes)
    }
}

/// A texture stored in host memory.
///
/// Pixels are kept row-major, tightly packed, `bytes_per_pixel` bytes each.
pub struct SoftwareTexture {
    descriptor: TextureDescriptor,
    limits: EngineLimits,
    data: Vec<u8>,
    mip_level_count: u32,
}

impl SoftwareTexture {
    /// Create a zero-filled texture with default limits.
    pub fn new(descriptor: TextureDescriptor) -> Result<Self, EngineError> {
        Self::with_limits(descriptor, EngineLimits::default())
    }

    /// Create a zero-filled texture with explicit limits.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::InvalidParameter`] for an empty or oversized
    /// texture, or a zero sample count.
    pub fn with_limits(
        descriptor: TextureDescriptor,
        limits: EngineLimits,
    ) -> Result<Self, EngineError> {
        let byte_size = limits.check_texture(&descriptor)?;
        log::debug!(
            "SoftwareTexture: creating {:?} ({}x{}, {:?} {:?})",
            descriptor.label,
            descriptor.size.width,
            descriptor.size.height,
            descriptor.pixel_format,
            descriptor.component_format
        );
        let data = vec![0u8; byte_size];
        Ok(Self {
            descriptor,
            limits,
            data,
            mip_level_count: 1,
        })
    }

    pub fn descriptor(&self) -> &TextureDescriptor {
        &self.descriptor
    }

    pub fn samples(&self) -> u8 {
        self.descriptor.samples
    }

    pub fn flags(&self) -> TextureFlags {
        self.descriptor.flags
    }

    /// Size of one pixel in bytes.
    pub fn bytes_per_pixel(&self) -> usize {
        self.descriptor.bytes_per_pixel()
    }

    /// Raw texture contents.
    pub fn bytes(&self) -> &[u8] {
        &self.data
    }

    pub fn mip_level_count(&self) -> u32 {
        self.mip_level_count
    }

    /// Change the texture size, discarding its contents.
    ///
    /// Resizing to the current size is a no-op.
    pub fn resize(&mut self, size: Extent2d) -> Result<(), EngineError> {
        if size == self.descriptor.size {
            return Ok(());
        }

        let mut descriptor = self.descriptor.clone();
        descriptor.size = size;
        let byte_size = self.limits.check_texture(&descriptor)?;

        log::debug!(
            "SoftwareTexture: resizing {:?} to {}x{}",
            descriptor.label,
            size.width,
            size.height
        );
        self.data = vec![0u8; byte_size];
        self.descriptor = descriptor;
        self.mip_level_count = 1;
        Ok(())
    }

    /// Build the mip chain of a texture created with manual mipmapping.
    ///
    /// Only trilinear minification samples mip levels, so for any other
    /// filter, or when mip levels are maintained automatically, this does
    /// nothing.
    pub fn generate_mipmap(&mut self) {
        if !self.descriptor.mipmap_manual
            || self.descriptor.min_interpolation_mode != InterpolationMode::Trilinear
        {
            return;
        }
        let largest = self.descriptor.size.width.max(self.descriptor.size.height);
        self.mip_level_count = u32::BITS - largest.leading_zeros();
        log::trace!(
            "SoftwareTexture: generated {} mip levels",
            self.mip_level_count
        );
    }

    fn expect_len(&self, expected: usize, actual: usize) -> Result<(), EngineError> {
        if expected != actual {
            return Err(EngineError::SizeMismatch { expected, actual });
        }
        Ok(())
    }
}

#[cfg(feature = "image")]
impl SoftwareTexture {
    /// Load a texture from an image file.
    ///
    /// 8-bit grey, grey+alpha, RGB and RGBA images keep their channel layout;
    /// anything else is converted to 8-bit RGBA.
    pub fn from_image(
        path: impl AsRef<std::path::Path>,
        min_interpolation_mode: InterpolationMode,
        mag_interpolation_mode: InterpolationMode,
        wrap_mode: crate::types::WrapMode,
    ) -> Result<Self, EngineError> {
        let path = path.as_ref();
        let image = image::open(path)
            .map_err(|e| EngineError::Io(format!("{}: {e}", path.display())))?;
        let mut texture = Self::from_dynamic_image(&image)?;
        texture.descriptor = texture
            .descriptor
            .clone()
            .with_label(path.display().to_string())
            .with_interpolation(min_interpolation_mode, mag_interpolation_mode)
            .with_wrap_mode(wrap_mode);
        Ok(texture)
    }

    /// Create a texture holding the pixels of a decoded image.
    pub fn from_dynamic_image(image: &image::DynamicImage) -> Result<Self, EngineError> {
        use image::DynamicImage;

        let size = Extent2d::new(image.width(), image.height());
        let (pixel_format, pixels) = match image {
            DynamicImage::ImageLuma8(img) => (PixelFormat::R, img.as_raw().clone()),
            DynamicImage::ImageLumaA8(img) => (PixelFormat::RA, img.as_raw().clone()),
            DynamicImage::ImageRgb8(img) => (PixelFormat::RGB, img.as_raw().clone()),
            DynamicImage::ImageRgba8(img) => (PixelFormat::RGBA, img.as_raw().clone()),
            other => (PixelFormat::RGBA, other.to_rgba8().into_raw()),
        };

        let descriptor = TextureDescriptor::new(pixel_format, ComponentFormat::UInt8, size);
        let mut texture = Self::new(descriptor)?;
        texture.upload(&pixels)?;
        Ok(texture)
    }
}

impl TextureBackend for SoftwareTexture {
    fn component_format(&self) -> ComponentFormat {
        self.descriptor.component_format
    }

    fn pixel_format(&self) -> PixelFormat {
        self.descriptor.pixel_format
    }

    fn size(&self) -> Extent2d {
        self.descriptor.size
    }

    fn download(&self, dst: &mut [u8]) -> Result<(), EngineError> {
        self.expect_len(self.data.len(), dst.len())?;
        log::trace!("SoftwareTexture: download len={}", dst.len());
        dst.copy_from_slice(&self.data);
        Ok(())
    }

    fn upload(&mut self, src: &[u8]) -> Result<(), EngineError> {
        self.expect_len(self.data.len(), src.len())?;
        log::trace!("SoftwareTexture: upload len={}", src.len());
        self.data.copy_from_slice(src);
        Ok(())
    }

    fn upload_sub_region(&mut self, src: &[u8], region: PixelRect) -> Result<(), EngineError> {
        let size = self.descriptor.size;
        if !region.fits_within(size) {
            return Err(EngineError::InvalidParameter(format!(
                "region {region:?} exceeds texture size {}x{}",
                size.width, size.height
            )));
        }

        let bpp = self.bytes_per_pixel();
        let row_bytes = region.cols * bpp;
        self.expect_len(region.area() * bpp, src.len())?;
        log::trace!(
            "SoftwareTexture: upload_sub_region {:?} len={}",
            region,
            src.len()
        );

        if row_bytes == 0 {
            return Ok(());
        }
        let stride = size.width as usize * bpp;
        for (r, row) in src.chunks_exact(row_bytes).enumerate() {
            let start = (region.row + r) * stride + region.col * bpp;
            self.data[start..start + row_bytes].copy_from_slice(row);
        }
        Ok(())
    }
}

impl std::fmt::Debug for SoftwareTexture {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SoftwareTexture")
            .field("size", &self.descriptor.size)
            .field("pixel_format", &self.descriptor.pixel_format)
            .field("component_format", &self.descriptor.component_format)
            .field("label", &self.descriptor.label)
            .finish()
    }
}

/// Contents of one named shader buffer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BufferSlot {
    pub var_type: VariableType,
    pub ndim: usize,
    pub shape: [usize; 3],
    pub bytes: Vec<u8>,
}

/// A shader whose buffers live in host memory.
#[derive(Debug)]
pub struct SoftwareShader {
    name: String,
    blend_mode: BlendMode,
    declared: BTreeMap<String, (VariableType, usize)>,
    buffers: BTreeMap<String, BufferSlot>,
}

impl SoftwareShader {
    pub fn new(name: impl Into<String>, blend_mode: BlendMode) -> Self {
        Self {
            name: name.into(),
            blend_mode,
            declared: BTreeMap::new(),
            buffers: BTreeMap::new(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn blend_mode(&self) -> BlendMode {
        self.blend_mode
    }

    /// Declare the element kind and rank a buffer slot accepts.
    ///
    /// Undeclared slots accept any valid buffer.
    pub fn declare_buffer(&mut self, name: impl Into<String>, var_type: VariableType, ndim: usize) {
        self.declared.insert(name.into(), (var_type, ndim));
    }

    pub fn buffer(&self, name: &str) -> Option<&BufferSlot> {
        self.buffers.get(name)
    }

    /// Names of all bound buffers, sorted.
    pub fn buffer_names(&self) -> impl Iterator<Item = &str> {
        self.buffers.keys().map(String::as_str)
    }

    pub fn remove_buffer(&mut self, name: &str) -> Option<BufferSlot> {
        self.buffers.remove(name)
    }
}

impl ShaderBackend for SoftwareShader {
    fn set_buffer(&mut self, name: &str, buffer: BufferUpload<'_>) -> Result<(), EngineError> {
        if name.is_empty() {
            return Err(EngineError::InvalidParameter(
                "buffer name must not be empty".to_string(),
            ));
        }
        if !buffer.var_type.is_valid() {
            return Err(EngineError::InvalidParameter(format!(
                "buffer \"{name}\" has an invalid element type"
            )));
        }
        if let Some(&(var_type, ndim)) = self.declared.get(name) {
            if var_type != buffer.var_type || ndim != buffer.ndim {
                return Err(EngineError::InvalidParameter(format!(
                    "buffer \"{name}\" expects {ndim}D {var_type}, got {}D {}",
                    buffer.ndim, buffer.var_type
                )));
            }
        }
        let expected = buffer.element_count() * buffer.var_type.byte_size();
        if expected != buffer.data.len() {
            return Err(EngineError::SizeMismatch {
                expected,
                actual: buffer.data.len(),
            });
        }

        log::trace!(
            "SoftwareShader {}: set_buffer {name} ({:?} {}D {:?})",
            self.name,
            buffer.var_type,
            buffer.ndim,
            buffer.shape
        );
        self.buffers.insert(
            name.to_string(),
            BufferSlot {
                var_type: buffer.var_type,
                ndim: buffer.ndim,
                shape: buffer.shape,
                bytes: buffer.data.to_vec(),
            },
        );
        Ok(())
    }
}
