//! Host array representations.
//!
//! - [`ArrayView`]: borrowed, non-owning view used for uploads
//! - [`PixelBuffer`]: owned result of a texture download
//! - [`Element`]: host scalar types with a known [`DType`](crate::types::DType)

mod buffer;
mod element;
mod view;

pub use buffer::PixelBuffer;
pub use element::Element;
pub use view::ArrayView;
