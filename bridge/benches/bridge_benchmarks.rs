use criterion::{Criterion, black_box, criterion_group, criterion_main};

use redlilium_bridge::{
    ArrayView, BlendMode, ComponentFormat, Extent2d, Origin2d, PixelFormat, ShaderArrayExt,
    SoftwareShader, SoftwareTexture, TextureArrayExt, TextureDescriptor,
};

fn rgba8_texture(width: u32, height: u32) -> SoftwareTexture {
    SoftwareTexture::new(TextureDescriptor::new(
        PixelFormat::RGBA,
        ComponentFormat::UInt8,
        Extent2d::new(width, height),
    ))
    .expect("texture creation")
}

// ---------------------------------------------------------------------------
// Texture transfers
// ---------------------------------------------------------------------------

fn bench_upload_full(c: &mut Criterion) {
    let mut texture = rgba8_texture(1024, 1024);
    let pixels = vec![127u8; 1024 * 1024 * 4];
    c.bench_function("texture_upload_1024x1024_rgba8", |b| {
        b.iter(|| {
            let view = ArrayView::from_slice(&pixels, &[1024, 1024, 4]).unwrap();
            texture.upload_array(black_box(&view)).unwrap();
        });
    });
}

fn bench_upload_sub_region(c: &mut Criterion) {
    let mut texture = rgba8_texture(1024, 1024);
    let patch = vec![255u8; 64 * 64 * 4];
    c.bench_function("texture_upload_sub_region_64x64_rgba8", |b| {
        b.iter(|| {
            let view = ArrayView::from_slice(&patch, &[64, 64, 4]).unwrap();
            texture
                .upload_array_sub_region(black_box(&view), Origin2d::new(480, 480))
                .unwrap();
        });
    });
}

fn bench_download(c: &mut Criterion) {
    let texture = rgba8_texture(1024, 1024);
    c.bench_function("texture_download_1024x1024_rgba8", |b| {
        b.iter(|| black_box(texture.download_array().unwrap()));
    });
}

// ---------------------------------------------------------------------------
// Shader buffers
// ---------------------------------------------------------------------------

fn bench_set_buffer(c: &mut Criterion) {
    let mut shader = SoftwareShader::new("mesh", BlendMode::None);
    let positions = vec![0.0f32; 3 * 65536];
    c.bench_function("shader_set_buffer_65536x3_f32", |b| {
        b.iter(|| {
            let view = ArrayView::from_slice(&positions, &[65536, 3]).unwrap();
            shader.set_array("position", black_box(&view)).unwrap();
        });
    });
}

criterion_group!(
    benches,
    bench_upload_full,
    bench_upload_sub_region,
    bench_download,
    bench_set_buffer
);
criterion_main!(benches);
