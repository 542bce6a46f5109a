use criterion::{black_box, criterion_group, criterion_main, Criterion};

use glam::Vec3;
use irradiance_core::{codec, compute_irradiance_map, irradiance_at, IrradianceConfig, RadianceImage};

fn gradient_env(width: u32, height: u32) -> RadianceImage {
    let mut env = RadianceImage::new(width, height).unwrap();
    for row in 0..height {
        for col in 0..width {
            let t = row as f32 / height as f32;
            env.set_pixel(row, col, Vec3::new(1.0 - t, 0.5, t * 4.0));
        }
    }
    env
}

// ---------------------------------------------------------------------------
// Integration
// ---------------------------------------------------------------------------

fn bench_irradiance_at_128x64(c: &mut Criterion) {
    let env = gradient_env(128, 64);
    let normal = Vec3::new(0.2, 0.7, 0.4).normalize();
    c.bench_function("irradiance_at_128x64", |b| {
        b.iter(|| irradiance_at(black_box(&env), black_box(normal)));
    });
}

fn bench_bake_32x16_from_128x64(c: &mut Criterion) {
    let env = gradient_env(128, 64);
    let config = IrradianceConfig::default().with_size(32, 16);
    c.bench_function("bake_32x16_from_128x64", |b| {
        b.iter(|| compute_irradiance_map(black_box(&env), black_box(&config)).unwrap());
    });
}

fn bench_bake_single_thread(c: &mut Criterion) {
    let env = gradient_env(64, 32);
    let config = IrradianceConfig::default().with_size(32, 16).with_threads(1);
    c.bench_function("bake_32x16_from_64x32_single_thread", |b| {
        b.iter(|| compute_irradiance_map(black_box(&env), black_box(&config)).unwrap());
    });
}

// ---------------------------------------------------------------------------
// Codec
// ---------------------------------------------------------------------------

fn bench_encode_512x256(c: &mut Criterion) {
    let env = gradient_env(512, 256);
    c.bench_function("encode_512x256", |b| {
        b.iter(|| codec::encode_to_memory(black_box(&env)).unwrap());
    });
}

fn bench_decode_512x256(c: &mut Criterion) {
    let bytes = codec::encode_to_memory(&gradient_env(512, 256)).unwrap();
    c.bench_function("decode_512x256", |b| {
        b.iter(|| codec::decode_from_memory(black_box(&bytes)).unwrap());
    });
}

criterion_group!(
    benches,
    bench_irradiance_at_128x64,
    bench_bake_32x16_from_128x64,
    bench_bake_single_thread,
    bench_encode_512x256,
    bench_decode_512x256,
);
criterion_main!(benches);
