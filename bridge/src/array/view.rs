//! Borrowed host array view.

use crate::error::{BridgeError, BridgeResult};
use crate::types::{DType, VariableType};

use super::Element;

/// A borrowed N-dimensional array in host memory.
///
/// The view never owns its data; the lifetime `'a` ties it to the caller's
/// storage, so nothing handed to a bridge operation can be retained past the
/// call. Element strides are optional: a view without strides is
/// C-contiguous by construction.
///
/// # Example
///
/// ```ignore
/// let pixels = vec![0u8; 64 * 32 * 4];
/// let view = ArrayView::from_slice(&pixels, &[32, 64, 4])?;
/// texture.upload_array(&view)?;
/// ```
#[derive(Debug, Clone)]
pub struct ArrayView<'a> {
    data: &'a [u8],
    dtype: DType,
    shape: Vec<usize>,
    strides: Option<Vec<isize>>,
}

impl<'a> ArrayView<'a> {
    /// Create a C-contiguous view over a typed slice.
    ///
    /// # Errors
    ///
    /// Returns [`BridgeError::InvalidView`] if the slice length does not match
    /// the number of elements implied by `shape`.
    pub fn from_slice<T: Element>(data: &'a [T], shape: &[usize]) -> BridgeResult<Self> {
        let count = element_count(shape)?;
        if count != data.len() {
            return Err(BridgeError::InvalidView(format!(
                "shape {shape:?} holds {count} elements but the slice has {}",
                data.len()
            )));
        }

        Ok(Self {
            data: bytemuck::cast_slice(data),
            dtype: T::DTYPE,
            shape: shape.to_vec(),
            strides: None,
        })
    }

    /// Create a C-contiguous view over raw bytes with an explicit dtype.
    ///
    /// The dtype is not validated here; operations reject dtypes they cannot
    /// translate.
    pub fn from_bytes(data: &'a [u8], dtype: DType, shape: &[usize]) -> BridgeResult<Self> {
        let expected = element_count(shape)?
            .checked_mul(dtype.byte_size())
            .ok_or_else(|| BridgeError::InvalidView(format!("shape {shape:?} overflows")))?;
        if expected != data.len() {
            return Err(BridgeError::InvalidView(format!(
                "shape {shape:?} of {dtype} needs {expected} bytes but {} were given",
                data.len()
            )));
        }

        Ok(Self {
            data,
            dtype,
            shape: shape.to_vec(),
            strides: None,
        })
    }

    /// View a single scalar as a rank-0 array.
    pub fn scalar<T: Element>(value: &'a T) -> Self {
        Self {
            data: bytemuck::bytes_of(value),
            dtype: T::DTYPE,
            shape: Vec::new(),
            strides: None,
        }
    }

    /// Attach element strides (one per axis).
    pub fn with_strides(mut self, strides: &[isize]) -> BridgeResult<Self> {
        if strides.len() != self.shape.len() {
            return Err(BridgeError::InvalidView(format!(
                "{} strides given for a {}-dimensional array",
                strides.len(),
                self.shape.len()
            )));
        }
        self.strides = Some(strides.to_vec());
        Ok(self)
    }

    pub(crate) fn from_parts(data: &'a [u8], dtype: DType, shape: &[usize]) -> Self {
        Self {
            data,
            dtype,
            shape: shape.to_vec(),
            strides: None,
        }
    }

    /// Number of dimensions.
    pub fn ndim(&self) -> usize {
        self.shape.len()
    }

    pub fn shape(&self) -> &[usize] {
        &self.shape
    }

    /// Extent of axis `axis`, `1` past the last axis.
    pub fn dim(&self, axis: usize) -> usize {
        self.shape.get(axis).copied().unwrap_or(1)
    }

    pub fn dtype(&self) -> DType {
        self.dtype
    }

    /// The engine scalar kind of the elements, possibly `Invalid`.
    pub fn variable_type(&self) -> VariableType {
        self.dtype.variable_type()
    }

    pub fn strides(&self) -> Option<&[isize]> {
        self.strides.as_deref()
    }

    /// Raw element bytes.
    pub fn bytes(&self) -> &'a [u8] {
        self.data
    }

    /// Number of elements.
    pub fn len(&self) -> usize {
        self.shape.iter().product()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Whether the elements are laid out row-major without gaps.
    ///
    /// Axes of extent 1 may carry any stride, and empty arrays are always
    /// contiguous.
    pub fn is_c_contiguous(&self) -> bool {
        let Some(strides) = &self.strides else {
            return true;
        };
        if self.is_empty() {
            return true;
        }

        let mut expected: isize = 1;
        for (&extent, &stride) in self.shape.iter().zip(strides).rev() {
            if extent != 1 && stride != expected {
                return false;
            }
            expected = expected.saturating_mul(extent as isize);
        }
        true
    }
}

fn element_count(shape: &[usize]) -> BridgeResult<usize> {
    shape
        .iter()
        .try_fold(1usize, |acc, &extent| acc.checked_mul(extent))
        .ok_or_else(|| BridgeError::InvalidView(format!("shape {shape:?} overflows")))
}

#[cfg(test)]
mod tests {
    use super::*;
    use half::f16;

    #[test]
    fn test_from_slice() {
        let data = [1.0f32; 12];
        let view = ArrayView::from_slice(&data, &[3, 4]).unwrap();
        assert_eq!(view.ndim(), 2);
        assert_eq!(view.shape(), &[3, 4]);
        assert_eq!(view.dim(2), 1);
        assert_eq!(view.bytes().len(), 48);
        assert_eq!(view.variable_type(), VariableType::Float32);
        assert!(view.is_c_contiguous());
    }

    #[test]
    fn test_from_slice_length_mismatch() {
        let data = [0u8; 10];
        let err = ArrayView::from_slice(&data, &[3, 4]).unwrap_err();
        assert!(matches!(err, BridgeError::InvalidView(_)));
    }

    #[test]
    fn test_from_bytes_checks_byte_length() {
        let bytes = [0u8; 8];
        assert!(ArrayView::from_bytes(&bytes, DType::F16, &[2, 2]).is_ok());
        assert!(ArrayView::from_bytes(&bytes, DType::F32, &[2, 2]).is_err());
    }

    #[test]
    fn test_scalar_is_rank_zero() {
        let value = f16::from_f32(0.5);
        let view = ArrayView::scalar(&value);
        assert_eq!(view.ndim(), 0);
        assert_eq!(view.len(), 1);
        assert_eq!(view.bytes().len(), 2);
    }

    #[test]
    fn test_contiguity() {
        let data = [0u16; 24];
        let view = ArrayView::from_slice(&data, &[2, 3, 4]).unwrap();

        assert_eq!(view.strides(), None);
        let c_order = view.clone().with_strides(&[12, 4, 1]).unwrap();
        assert_eq!(c_order.strides(), Some(&[12, 4, 1][..]));
        assert!(c_order.is_c_contiguous());

        let f_order = view.clone().with_strides(&[1, 2, 6]).unwrap();
        assert!(!f_order.is_c_contiguous());

        assert!(view.with_strides(&[4, 1]).is_err());
    }

    #[test]
    fn test_unit_axes_ignore_stride() {
        let data = [0u8; 4];
        let view = ArrayView::from_slice(&data, &[1, 4])
            .unwrap()
            .with_strides(&[99, 1])
            .unwrap();
        assert!(view.is_c_contiguous());
    }

    #[test]
    fn test_overflowing_shape() {
        let data: [u8; 0] = [];
        let err = ArrayView::from_slice(&data, &[usize::MAX, 2]).unwrap_err();
        assert!(matches!(err, BridgeError::InvalidView(_)));
    }
}
