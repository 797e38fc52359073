//! Owned pixel data returned by texture downloads.

use std::sync::Arc;

use half::f16;

use crate::error::{BridgeError, BridgeResult};
use crate::types::{DType, VariableType};

use super::{ArrayView, Element};

/// Heap allocation behind a [`PixelBuffer`].
///
/// Created from a `Vec<u8>` and released through its boxed slice, so the
/// allocation is freed by the allocator that made it.
struct PixelStorage {
    bytes: Box<[u8]>,
}

impl Drop for PixelStorage {
    fn drop(&mut self) {
        log::trace!("PixelBuffer: releasing {} bytes", self.bytes.len());
    }
}

/// Owned `[height, width, channels]` array of downloaded texture data.
///
/// Cloning is cheap and shares the allocation; it is released once, when the
/// last clone is dropped. The buffer does not borrow from the texture it came
/// from and stays valid after the texture is destroyed.
///
/// Half-precision textures download with dtype [`DType::F16`]: float
/// semantics with 16-bit storage. Read them with `to_vec::<half::f16>()` or
/// widen with [`PixelBuffer::to_f32_vec`].
#[derive(Clone)]
pub struct PixelBuffer {
    dtype: DType,
    shape: [usize; 3],
    storage: Arc<PixelStorage>,
}

impl PixelBuffer {
    /// Wrap freshly written bytes (called by the download path).
    pub(crate) fn new(dtype: DType, shape: [usize; 3], bytes: Vec<u8>) -> Self {
        debug_assert_eq!(
            bytes.len(),
            shape.iter().product::<usize>() * dtype.byte_size()
        );
        Self {
            dtype,
            shape,
            storage: Arc::new(PixelStorage {
                bytes: bytes.into_boxed_slice(),
            }),
        }
    }

    pub fn dtype(&self) -> DType {
        self.dtype
    }

    pub fn variable_type(&self) -> VariableType {
        self.dtype.variable_type()
    }

    /// Shape as `[height, width, channels]`.
    pub fn shape(&self) -> [usize; 3] {
        self.shape
    }

    pub fn height(&self) -> usize {
        self.shape[0]
    }

    pub fn width(&self) -> usize {
        self.shape[1]
    }

    pub fn channels(&self) -> usize {
        self.shape[2]
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.storage.bytes
    }

    pub fn byte_len(&self) -> usize {
        self.storage.bytes.len()
    }

    /// Borrow the contents as a rank-3 array view, e.g. to upload it again.
    pub fn view(&self) -> ArrayView<'_> {
        ArrayView::from_parts(&self.storage.bytes, self.dtype, &self.shape)
    }

    /// Copy the elements out as `T`.
    ///
    /// # Errors
    ///
    /// Returns [`BridgeError::InvalidView`] if `T` does not have the buffer's
    /// dtype. In particular `f32` is rejected for half-precision buffers.
    pub fn to_vec<T: Element>(&self) -> BridgeResult<Vec<T>> {
        if T::DTYPE != self.dtype {
            return Err(BridgeError::InvalidView(format!(
                "cannot read {} elements as {}",
                self.dtype,
                T::DTYPE
            )));
        }
        Ok(self
            .storage
            .bytes
            .chunks_exact(std::mem::size_of::<T>())
            .map(bytemuck::pod_read_unaligned::<T>)
            .collect())
    }

    /// Copy float elements out as `f32`, widening half precision.
    pub fn to_f32_vec(&self) -> BridgeResult<Vec<f32>> {
        match self.variable_type() {
            VariableType::Float16 => Ok(self
                .to_vec::<f16>()?
                .into_iter()
                .map(f16::to_f32)
                .collect()),
            VariableType::Float32 => self.to_vec::<f32>(),
            other => Err(BridgeError::InvalidView(format!(
                "cannot widen {other} elements to float32"
            ))),
        }
    }

    /// Whether two buffers share one allocation.
    pub fn shares_storage(&self, other: &PixelBuffer) -> bool {
        Arc::ptr_eq(&self.storage, &other.storage)
    }

    /// Number of live handles to the allocation.
    pub fn handle_count(&self) -> usize {
        Arc::strong_count(&self.storage)
    }
}

impl std::fmt::Debug for PixelBuffer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PixelBuffer")
            .field("dtype", &self.dtype)
            .field("shape", &self.shape)
            .field("bytes", &self.storage.bytes.len())
            .finish()
    }
}

// Downloads may be handed to other threads
static_assertions::assert_impl_all!(PixelBuffer: Send, Sync);

#[cfg(test)]
mod tests {
    use super::*;

    fn half_buffer() -> PixelBuffer {
        let values = [f16::from_f32(1.5), f16::from_f32(-2.0)];
        PixelBuffer::new(DType::F16, [1, 2, 1], bytemuck::cast_slice(&values).to_vec())
    }

    #[test]
    fn test_half_buffer_contract() {
        let buffer = half_buffer();
        assert_eq!(buffer.dtype().bits, 16);
        assert_eq!(buffer.variable_type(), VariableType::Float16);
        assert_eq!(buffer.byte_len(), 4);
        assert!(buffer.to_vec::<f32>().is_err());
        assert_eq!(buffer.to_f32_vec().unwrap(), vec![1.5, -2.0]);
    }

    #[test]
    fn test_to_vec_u16() {
        let buffer = PixelBuffer::new(DType::U16, [1, 1, 2], vec![1, 0, 0, 1]);
        assert_eq!(buffer.to_vec::<u16>().unwrap(), vec![1, 256]);
        assert!(buffer.to_f32_vec().is_err());
    }

    #[test]
    fn test_clones_share_storage() {
        let buffer = half_buffer();
        let clone = buffer.clone();
        assert!(buffer.shares_storage(&clone));
        assert_eq!(buffer.handle_count(), 2);
        drop(clone);
        assert_eq!(buffer.handle_count(), 1);
    }

    #[test]
    fn test_view_matches_buffer() {
        let buffer = half_buffer();
        let view = buffer.view();
        assert_eq!(view.shape(), &[1, 2, 1]);
        assert_eq!(view.dtype(), DType::F16);
        assert_eq!(view.bytes(), buffer.as_bytes());
    }
}
