//! Common types and descriptors for the bridge.
//!
//! This module contains the scalar/dtype enums, texture format enums and
//! descriptors, and the small geometry types used to address texture regions.

mod common;
mod dtype;
mod shader;
mod texture;
mod variable;

pub use common::{Extent2d, Origin2d, PixelRect};
pub use dtype::{DType, DTypeCode, interpret_dtype};
pub use shader::BlendMode;
pub use texture::{
    ComponentFormat, InterpolationMode, PixelFormat, TextureDescriptor, TextureFlags, WrapMode,
};
pub use variable::VariableType;
