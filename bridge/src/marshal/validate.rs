//! Validation helpers shared by the bridge operations.
//!
//! Each helper checks one constraint and reports it with the failing
//! operation, so the operations read as a sequence of checks in the order
//! callers see them.

use crate::array::ArrayView;
use crate::engine::TextureBackend;
use crate::error::{BridgeError, BridgeResult, Operation};
use crate::types::{ComponentFormat, DType, VariableType};

/// Maximum rank accepted by shader buffers.
pub(crate) const MAX_BUFFER_DIMS: usize = 3;

pub(crate) fn buffer_rank(op: Operation, view: &ArrayView<'_>) -> BridgeResult<usize> {
    let ndim = view.ndim();
    if ndim > MAX_BUFFER_DIMS {
        return Err(BridgeError::TooManyDimensions { op, ndim });
    }
    Ok(ndim)
}

pub(crate) fn supported_dtype(op: Operation, view: &ArrayView<'_>) -> BridgeResult<VariableType> {
    match view.variable_type() {
        VariableType::Invalid => Err(BridgeError::UnsupportedDtype {
            op,
            dtype: view.dtype(),
        }),
        ty => Ok(ty),
    }
}

pub(crate) fn contiguous(op: Operation, view: &ArrayView<'_>) -> BridgeResult<()> {
    if !view.is_c_contiguous() {
        return Err(BridgeError::NotContiguous { op });
    }
    Ok(())
}

/// Accepts rank 2 (one implied channel) or rank 3; returns the channel count.
pub(crate) fn texture_rank(op: Operation, view: &ArrayView<'_>) -> BridgeResult<usize> {
    match view.ndim() {
        2 => Ok(1),
        3 => Ok(view.dim(2)),
        ndim => Err(BridgeError::InvalidRank { op, ndim }),
    }
}

pub(crate) fn channels_match<T: TextureBackend + ?Sized>(
    op: Operation,
    channels: usize,
    texture: &T,
) -> BridgeResult<()> {
    let expected = texture.channels();
    if channels != expected {
        return Err(BridgeError::ChannelMismatch {
            op,
            array: channels,
            texture: expected,
        });
    }
    Ok(())
}

/// No conversion between kinds: the translated dtype must equal the texture's
/// component format, even when byte widths coincide.
pub(crate) fn dtype_matches<T: TextureBackend + ?Sized>(
    op: Operation,
    view: &ArrayView<'_>,
    texture: &T,
) -> BridgeResult<()> {
    let array = view.variable_type();
    let expected = texture.component_format().variable_type();
    if array != expected {
        return Err(BridgeError::DtypeMismatch {
            op,
            array,
            texture: expected,
        });
    }
    Ok(())
}

/// Host dtype of downloaded data for a component format.
///
/// Half precision keeps float semantics with 16-bit storage.
pub(crate) fn download_dtype(format: ComponentFormat) -> DType {
    match format {
        ComponentFormat::Int8 => DType::I8,
        ComponentFormat::UInt8 => DType::U8,
        ComponentFormat::Int16 => DType::I16,
        ComponentFormat::UInt16 => DType::U16,
        ComponentFormat::Int32 => DType::I32,
        ComponentFormat::UInt32 => DType::U32,
        ComponentFormat::Float16 => DType::F16,
        ComponentFormat::Float32 => DType::F32,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_component_format_downloads_to_itself() {
        for format in ComponentFormat::ALL {
            let dtype = download_dtype(format);
            assert_eq!(dtype.variable_type(), format.variable_type(), "{format:?}");
            assert_eq!(dtype.byte_size(), format.byte_size());
        }
    }

    #[test]
    fn test_half_download_dtype() {
        let dtype = download_dtype(ComponentFormat::Float16);
        assert_eq!(dtype.bits, 16);
        assert_eq!(dtype.lanes, 1);
        assert!(dtype.variable_type().is_float());
    }

    #[test]
    fn test_texture_rank() {
        let data = [0u8; 24];
        let rank2 = ArrayView::from_slice(&data, &[4, 6]).unwrap();
        let rank3 = ArrayView::from_slice(&data, &[2, 3, 4]).unwrap();
        let rank1 = ArrayView::from_slice(&data, &[24]).unwrap();
        assert_eq!(texture_rank(Operation::Upload, &rank2).unwrap(), 1);
        assert_eq!(texture_rank(Operation::Upload, &rank3).unwrap(), 4);
        assert_eq!(
            texture_rank(Operation::Upload, &rank1).unwrap_err(),
            BridgeError::InvalidRank {
                op: Operation::Upload,
                ndim: 1
            }
        );
    }
}
