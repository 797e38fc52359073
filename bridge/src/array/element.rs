//! Host scalar types that can back an array.

use half::f16;

use crate::types::DType;

/// A plain-old-data scalar with a fixed [`DType`].
pub trait Element: bytemuck::Pod {
    const DTYPE: DType;
}

macro_rules! impl_element {
    ($($ty:ty => $dtype:expr),* $(,)?) => {
        $(
            impl Element for $ty {
                const DTYPE: DType = $dtype;
            }
        )*
    };
}

impl_element! {
    i8 => DType::I8,
    u8 => DType::U8,
    i16 => DType::I16,
    u16 => DType::U16,
    i32 => DType::I32,
    u32 => DType::U32,
    i64 => DType::I64,
    u64 => DType::U64,
    f16 => DType::F16,
    f32 => DType::F32,
    f64 => DType::F64,
}
