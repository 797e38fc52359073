//! The four bridge operations.
//!
//! - [`set_buffer`]: host array → named shader buffer
//! - [`download`]: texture → owned [`PixelBuffer`]
//! - [`upload`]: host array → whole texture
//! - [`upload_sub_region`]: host array → rectangle of a texture
//!
//! Every operation validates its inputs completely before calling into the
//! engine, so a rejected call leaves the target untouched.

mod validate;

use crate::array::{ArrayView, PixelBuffer};
use crate::engine::{BufferUpload, ShaderBackend, TextureBackend};
use crate::error::{BridgeError, BridgeResult, Operation};
use crate::types::{Origin2d, PixelRect};

/// Copy a host array of rank 0 to 3 into the shader buffer `name`.
///
/// Only rank and dtype are checked here; whether the shape suits the slot is
/// up to the engine. The array may be reused as soon as this returns.
///
/// # Errors
///
/// - [`BridgeError::TooManyDimensions`] for rank > 3
/// - [`BridgeError::UnsupportedDtype`] if the dtype has no [`VariableType`](crate::types::VariableType)
/// - [`BridgeError::NotContiguous`] for strided views
/// - [`BridgeError::Engine`] if the shader rejects the buffer
pub fn set_buffer<S: ShaderBackend + ?Sized>(
    shader: &mut S,
    name: &str,
    array: &ArrayView<'_>,
) -> BridgeResult<()> {
    let op = Operation::SetBuffer;
    let ndim = validate::buffer_rank(op, array)?;
    let var_type = validate::supported_dtype(op, array)?;
    validate::contiguous(op, array)?;

    let shape = [array.dim(0), array.dim(1), array.dim(2)];
    log::trace!("set_buffer: {name} {var_type} {ndim}D {shape:?}");

    shader.set_buffer(
        name,
        BufferUpload {
            var_type,
            ndim,
            shape,
            data: array.bytes(),
        },
    )?;
    Ok(())
}

/// Read a texture back into a newly allocated `[height, width, channels]` buffer.
///
/// # Errors
///
/// - [`BridgeError::AllocationFailed`] if the buffer cannot be allocated
/// - [`BridgeError::Engine`] if the readback fails; the buffer is released
pub fn download<T: TextureBackend + ?Sized>(texture: &T) -> BridgeResult<PixelBuffer> {
    let op = Operation::Download;
    let dtype = validate::download_dtype(texture.component_format());
    let size = texture.size();
    let shape = [
        size.height as usize,
        size.width as usize,
        texture.channels(),
    ];

    let requested = shape
        .iter()
        .try_fold(dtype.byte_size(), |acc, &extent| acc.checked_mul(extent))
        .ok_or(BridgeError::AllocationFailed {
            op,
            bytes: usize::MAX,
        })?;

    let mut data = Vec::new();
    data.try_reserve_exact(requested)
        .map_err(|_| BridgeError::AllocationFailed {
            op,
            bytes: requested,
        })?;
    data.resize(requested, 0u8);

    log::trace!("download: {shape:?} {dtype} ({requested} bytes)");
    texture.download(&mut data)?;

    Ok(PixelBuffer::new(dtype, shape, data))
}

/// Replace the contents of a texture with a host array.
///
/// The array must be `[height, width]` (one channel) or
/// `[height, width, channels]`, with the texture's exact size, channel count
/// and component type. No resampling or conversion is performed.
///
/// # Errors
///
/// In the order they are checked: [`BridgeError::InvalidRank`],
/// [`BridgeError::SizeMismatch`], [`BridgeError::ChannelMismatch`],
/// [`BridgeError::DtypeMismatch`], [`BridgeError::NotContiguous`], then
/// [`BridgeError::Engine`].
pub fn upload<T: TextureBackend + ?Sized>(
    texture: &mut T,
    array: &ArrayView<'_>,
) -> BridgeResult<()> {
    let op = Operation::Upload;
    let channels = validate::texture_rank(op, array)?;

    let size = texture.size();
    let (rows, cols) = (array.dim(0), array.dim(1));
    if rows != size.height as usize || cols != size.width as usize {
        return Err(BridgeError::SizeMismatch {
            op,
            rows,
            cols,
            height: size.height,
            width: size.width,
        });
    }

    validate::channels_match(op, channels, &*texture)?;
    validate::dtype_matches(op, array, &*texture)?;
    validate::contiguous(op, array)?;

    log::trace!("upload: {rows}x{cols}x{channels} {}", array.dtype());
    texture.upload(array.bytes())?;
    Ok(())
}

/// Write a host array into a rectangle of a texture.
///
/// `origin.x` offsets array axis 0 (rows) and `origin.y` offsets axis 1
/// (columns). The rectangle may touch but not cross the texture edge.
///
/// # Errors
///
/// In the order they are checked: [`BridgeError::InvalidRank`],
/// [`BridgeError::OutOfBounds`], [`BridgeError::ChannelMismatch`],
/// [`BridgeError::DtypeMismatch`], [`BridgeError::NotContiguous`], then
/// [`BridgeError::Engine`].
pub fn upload_sub_region<T: TextureBackend + ?Sized>(
    texture: &mut T,
    array: &ArrayView<'_>,
    origin: Origin2d,
) -> BridgeResult<()> {
    let op = Operation::UploadSubRegion;
    let channels = validate::texture_rank(op, array)?;

    let size = texture.size();
    let region = PixelRect::from_origin(origin, array.dim(0), array.dim(1));
    if !region.fits_within(size) {
        return Err(BridgeError::OutOfBounds {
            op,
            x: origin.x,
            y: origin.y,
            rows: region.rows,
            cols: region.cols,
            height: size.height,
            width: size.width,
        });
    }

    validate::channels_match(op, channels, &*texture)?;
    validate::dtype_matches(op, array, &*texture)?;
    validate::contiguous(op, array)?;

    log::trace!("upload_sub_region: {region:?} {}", array.dtype());
    texture.upload_sub_region(array.bytes(), region)?;
    Ok(())
}

/// Method-syntax access to the texture operations.
pub trait TextureArrayExt: TextureBackend {
    /// See [`download`].
    fn download_array(&self) -> BridgeResult<PixelBuffer> {
        download(self)
    }

    /// See [`upload`].
    fn upload_array(&mut self, array: &ArrayView<'_>) -> BridgeResult<()> {
        upload(self, array)
    }

    /// See [`upload_sub_region`].
    fn upload_array_sub_region(
        &mut self,
        array: &ArrayView<'_>,
        origin: Origin2d,
    ) -> BridgeResult<()> {
        upload_sub_region(self, array, origin)
    }
}

impl<T: TextureBackend + ?Sized> TextureArrayExt for T {}

/// Method-syntax access to [`set_buffer`].
pub trait ShaderArrayExt: ShaderBackend {
    fn set_array(&mut self, name: &str, array: &ArrayView<'_>) -> BridgeResult<()> {
        set_buffer(self, name, array)
    }
}

impl<S: ShaderBackend + ?Sized> ShaderArrayExt for S {}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::{EngineError, SoftwareShader, SoftwareTexture};
    use crate::types::{
        BlendMode, ComponentFormat, DType, Extent2d, PixelFormat, TextureDescriptor, VariableType,
    };

    fn texture(pixel: PixelFormat, component: ComponentFormat, w: u32, h: u32) -> SoftwareTexture {
        SoftwareTexture::new(TextureDescriptor::new(pixel, component, Extent2d::new(w, h)))
            .unwrap()
    }

    /// Texture that fails every transfer.
    struct LostTexture;

    impl TextureBackend for LostTexture {
        fn component_format(&self) -> ComponentFormat {
            ComponentFormat::Float32
        }
        fn pixel_format(&self) -> PixelFormat {
            PixelFormat::RGBA
        }
        fn size(&self) -> Extent2d {
            Extent2d::new(4, 4)
        }
        fn download(&self, _dst: &mut [u8]) -> Result<(), EngineError> {
            Err(EngineError::DeviceLost)
        }
        fn upload(&mut self, _src: &[u8]) -> Result<(), EngineError> {
            Err(EngineError::DeviceLost)
        }
        fn upload_sub_region(&mut self, _src: &[u8], _region: PixelRect) -> Result<(), EngineError> {
            Err(EngineError::DeviceLost)
        }
    }

    #[test]
    fn test_set_buffer_pads_shape() {
        let mut shader = SoftwareShader::new("points", BlendMode::None);
        let data = [0.5f32; 6];
        let view = ArrayView::from_slice(&data, &[6]).unwrap();
        set_buffer(&mut shader, "position", &view).unwrap();

        let slot = shader.buffer("position").unwrap();
        assert_eq!(slot.ndim, 1);
        assert_eq!(slot.shape, [6, 1, 1]);
        assert_eq!(slot.var_type, VariableType::Float32);
        assert_eq!(slot.bytes.len(), 24);
    }

    #[test]
    fn test_set_buffer_rank_checked_before_dtype() {
        let mut shader = SoftwareShader::new("points", BlendMode::None);
        let data = [0u8; 16];
        let view = ArrayView::from_bytes(&data, DType::from_raw(6, 8, 1), &[2, 2, 2, 2]).unwrap();
        let err = set_buffer(&mut shader, "mask", &view).unwrap_err();
        assert_eq!(
            err,
            BridgeError::TooManyDimensions {
                op: Operation::SetBuffer,
                ndim: 4
            }
        );
    }

    #[test]
    fn test_set_buffer_rejects_strided() {
        let mut shader = SoftwareShader::new("points", BlendMode::None);
        let data = [0i32; 6];
        let view = ArrayView::from_slice(&data, &[2, 3])
            .unwrap()
            .with_strides(&[1, 2])
            .unwrap();
        let err = shader.set_array("index", &view).unwrap_err();
        assert_eq!(
            err,
            BridgeError::NotContiguous {
                op: Operation::SetBuffer
            }
        );
        assert!(shader.buffer("index").is_none());
    }

    #[test]
    fn test_download_engine_failure() {
        let err = download(&LostTexture).unwrap_err();
        assert_eq!(err, BridgeError::Engine(EngineError::DeviceLost));
        assert!(!err.is_usage_error());
    }

    #[test]
    fn test_validation_precedes_engine_call() {
        let mut lost = LostTexture;
        let data = [0u8; 64];
        let view = ArrayView::from_slice(&data, &[4, 4, 4]).unwrap();
        // A u8 array is a usage error even though the engine would fail anyway
        assert!(matches!(
            lost.upload_array(&view),
            Err(BridgeError::DtypeMismatch { .. })
        ));
    }

    #[test]
    fn test_upload_rank_checked_first() {
        let mut tex = texture(PixelFormat::R, ComponentFormat::UInt8, 4, 4);
        let data = [0.0f64; 16];
        let view = ArrayView::from_slice(&data, &[16]).unwrap();
        assert_eq!(
            upload(&mut tex, &view).unwrap_err(),
            BridgeError::InvalidRank {
                op: Operation::Upload,
                ndim: 1
            }
        );
    }

    #[test]
    fn test_sub_region_error_order() {
        let mut tex = texture(PixelFormat::RGBA, ComponentFormat::UInt8, 4, 4);
        // Wrong channels and out of bounds: bounds are reported first
        let data = [0u8; 5 * 2 * 3];
        let view = ArrayView::from_slice(&data, &[5, 2, 3]).unwrap();
        assert!(matches!(
            upload_sub_region(&mut tex, &view, Origin2d::zero()),
            Err(BridgeError::OutOfBounds { .. })
        ));
    }

    #[test]
    fn test_sub_region_origin_overflow() {
        let mut tex = texture(PixelFormat::R, ComponentFormat::UInt8, 4, 4);
        let data = [0u8; 1];
        let view = ArrayView::from_slice(&data, &[1, 1]).unwrap();
        let origin = Origin2d::new(u32::MAX, 0);
        assert!(matches!(
            tex.upload_array_sub_region(&view, origin),
            Err(BridgeError::OutOfBounds { .. })
        ));
    }
}
