//! Shader-side enums.

/// How fragments are combined with the render target.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum BlendMode {
    #[default]
    None,
    AlphaBlend,
}
