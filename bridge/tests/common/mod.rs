//! Shared helpers for the bridge integration tests.

#![allow(dead_code)]

use redlilium_bridge::{ComponentFormat, Extent2d, PixelFormat, SoftwareTexture, TextureDescriptor};

/// Install a test logger once; later calls are no-ops.
pub fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

/// Create a zero-filled software texture.
pub fn create_texture(
    pixel_format: PixelFormat,
    component_format: ComponentFormat,
    width: u32,
    height: u32,
) -> SoftwareTexture {
    init_logging();
    SoftwareTexture::new(
        TextureDescriptor::new(pixel_format, component_format, Extent2d::new(width, height))
            .with_label("test"),
    )
    .expect("software texture creation")
}

/// Deterministic, non-uniform byte pattern.
pub fn generate_test_pattern(len: usize) -> Vec<u8> {
    (0..len).map(|i| (i * 7 + 3) as u8).collect()
}

/// Bytes of one pixel in a tightly packed texture image.
pub fn pixel_bytes(data: &[u8], width: usize, bpp: usize, row: usize, col: usize) -> &[u8] {
    let start = (row * width + col) * bpp;
    &data[start..start + bpp]
}
