//! DLPack-style dtype descriptors and their translation to [`VariableType`].
//!
//! Host arrays describe their elements with a `(code, bits, lanes)` triple.
//! The code is kept raw so that descriptors coming from foreign producers
//! with codes this crate does not know about still round-trip into
//! [`VariableType::Invalid`] instead of failing to construct.

use super::VariableType;

/// Type code of a [`DType`], using the DLPack numbering.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum DTypeCode {
    Int = 0,
    UInt = 1,
    Float = 2,
    OpaqueHandle = 3,
    Bfloat = 4,
    Complex = 5,
    Bool = 6,
}

impl DTypeCode {
    /// Decode a raw type code, `None` if the code is unknown.
    pub fn from_raw(code: u8) -> Option<Self> {
        match code {
            0 => Some(Self::Int),
            1 => Some(Self::UInt),
            2 => Some(Self::Float),
            3 => Some(Self::OpaqueHandle),
            4 => Some(Self::Bfloat),
            5 => Some(Self::Complex),
            6 => Some(Self::Bool),
            _ => None,
        }
    }
}

/// Element type descriptor of a host array.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct DType {
    /// Raw type code (see [`DTypeCode`]).
    pub code: u8,
    /// Width of one lane in bits.
    pub bits: u8,
    /// Number of lanes; scalar types have exactly one.
    pub lanes: u16,
}

impl DType {
    pub const I8: DType = DType::new(DTypeCode::Int, 8);
    pub const I16: DType = DType::new(DTypeCode::Int, 16);
    pub const I32: DType = DType::new(DTypeCode::Int, 32);
    pub const I64: DType = DType::new(DTypeCode::Int, 64);
    pub const U8: DType = DType::new(DTypeCode::UInt, 8);
    pub const U16: DType = DType::new(DTypeCode::UInt, 16);
    pub const U32: DType = DType::new(DTypeCode::UInt, 32);
    pub const U64: DType = DType::new(DTypeCode::UInt, 64);
    /// Half precision: float semantics, 16-bit storage.
    pub const F16: DType = DType::new(DTypeCode::Float, 16);
    pub const F32: DType = DType::new(DTypeCode::Float, 32);
    pub const F64: DType = DType::new(DTypeCode::Float, 64);

    /// Create a single-lane dtype.
    pub const fn new(code: DTypeCode, bits: u8) -> Self {
        Self {
            code: code as u8,
            bits,
            lanes: 1,
        }
    }

    /// Create a dtype from raw DLPack fields.
    pub const fn from_raw(code: u8, bits: u8, lanes: u16) -> Self {
        Self { code, bits, lanes }
    }

    /// The decoded type code, if known.
    pub fn type_code(&self) -> Option<DTypeCode> {
        DTypeCode::from_raw(self.code)
    }

    /// Storage size of one element in bytes, rounding partial bytes up.
    pub fn byte_size(&self) -> usize {
        (self.bits as usize * self.lanes as usize).div_ceil(8)
    }

    /// Translate to the engine's scalar kind, see [`interpret_dtype`].
    pub fn variable_type(&self) -> VariableType {
        interpret_dtype(*self)
    }

    /// The canonical dtype for a scalar kind, `None` for `Invalid`.
    pub fn from_variable_type(ty: VariableType) -> Option<Self> {
        match ty {
            VariableType::Invalid => None,
            VariableType::Int8 => Some(Self::I8),
            VariableType::UInt8 => Some(Self::U8),
            VariableType::Int16 => Some(Self::I16),
            VariableType::UInt16 => Some(Self::U16),
            VariableType::Int32 => Some(Self::I32),
            VariableType::UInt32 => Some(Self::U32),
            VariableType::Int64 => Some(Self::I64),
            VariableType::UInt64 => Some(Self::U64),
            VariableType::Float16 => Some(Self::F16),
            VariableType::Float32 => Some(Self::F32),
            VariableType::Float64 => Some(Self::F64),
        }
    }
}

impl std::fmt::Display for DType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self.type_code() {
            Some(DTypeCode::Int) => "int",
            Some(DTypeCode::UInt) => "uint",
            Some(DTypeCode::Float) => "float",
            Some(DTypeCode::OpaqueHandle) => "handle",
            Some(DTypeCode::Bfloat) => "bfloat",
            Some(DTypeCode::Complex) => "complex",
            Some(DTypeCode::Bool) => "bool",
            None => return write!(f, "code{}:{}", self.code, self.bits),
        };
        if self.lanes == 1 {
            write!(f, "{name}{}", self.bits)
        } else {
            write!(f, "{name}{}x{}", self.bits, self.lanes)
        }
    }
}

/// Translate a host dtype into a [`VariableType`].
///
/// Only single-lane signed/unsigned integers of 8, 16, 32 and 64 bits and
/// floats of 16, 32 and 64 bits are recognized. Every other combination
/// yields [`VariableType::Invalid`], which callers must reject.
pub fn interpret_dtype(dtype: DType) -> VariableType {
    if dtype.lanes != 1 {
        return VariableType::Invalid;
    }

    match (dtype.type_code(), dtype.bits) {
        (Some(DTypeCode::Int), 8) => VariableType::Int8,
        (Some(DTypeCode::Int), 16) => VariableType::Int16,
        (Some(DTypeCode::Int), 32) => VariableType::Int32,
        (Some(DTypeCode::Int), 64) => VariableType::Int64,
        (Some(DTypeCode::UInt), 8) => VariableType::UInt8,
        (Some(DTypeCode::UInt), 16) => VariableType::UInt16,
        (Some(DTypeCode::UInt), 32) => VariableType::UInt32,
        (Some(DTypeCode::UInt), 64) => VariableType::UInt64,
        (Some(DTypeCode::Float), 16) => VariableType::Float16,
        (Some(DTypeCode::Float), 32) => VariableType::Float32,
        (Some(DTypeCode::Float), 64) => VariableType::Float64,
        _ => VariableType::Invalid,
    }
}
