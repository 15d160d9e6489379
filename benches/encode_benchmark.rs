//! Criterion benchmarks for zenapng animation assembly.
//!
//! Tracks performance across:
//! - Compression levels (fast, default, best)
//! - Frame counts and sub-frame sizes
//! - Chunk splitting alone, without compression

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use zenapng::mux::{split_png, Animation, AnimationEncoder, EncoderConfig};
use zenapng::{CompressionLevel, FrameCodec, PixelLayout, PngCodec, Raster};

/// Synthetic RGBA frame with a moving diagonal pattern.
fn synthetic_rgba(width: u32, height: u32, phase: u32) -> Vec<u8> {
    let mut out = Vec::with_capacity((width * height * 4) as usize);
    for y in 0..height {
        for x in 0..width {
            let v = (x + y + phase) & 0xFF;
            out.extend_from_slice(&[v as u8, (x & 0xFF) as u8, (y & 0xFF) as u8, 255]);
        }
    }
    out
}

fn bench_compression_levels(c: &mut Criterion) {
    let (w, h) = (256, 256);
    let frames: Vec<Vec<u8>> = (0..8).map(|i| synthetic_rgba(w, h, i * 16)).collect();
    let mut anim = Animation::new(0);
    for f in &frames {
        anim.push_frame(Raster::new(f, PixelLayout::Rgba8, w, h), 4);
    }

    let mut group = c.benchmark_group("compression");
    group.throughput(Throughput::Bytes((w * h * 4 * frames.len() as u32) as u64));
    for (name, level) in [
        ("fast", CompressionLevel::Fast),
        ("default", CompressionLevel::Default),
        ("best", CompressionLevel::Best),
    ] {
        let encoder = AnimationEncoder::new(EncoderConfig::new().with_compression(level));
        group.bench_with_input(BenchmarkId::from_parameter(name), &anim, |b, anim| {
            b.iter(|| encoder.encode_to_vec(black_box(anim)).unwrap())
        });
    }
    group.finish();
}

fn bench_frame_counts(c: &mut Criterion) {
    let (w, h) = (128, 128);
    let canvas = synthetic_rgba(w, h, 0);
    let tile = synthetic_rgba(32, 32, 7);
    let encoder = AnimationEncoder::new(EncoderConfig::new().with_compression(CompressionLevel::Fast));

    let mut group = c.benchmark_group("frames");
    for count in [2usize, 16, 64] {
        let mut anim = Animation::new(0);
        anim.push_frame(Raster::new(&canvas, PixelLayout::Rgba8, w, h), 2);
        for i in 1..count {
            let offset = ((i * 8) % 96) as i32;
            anim.push_frame(
                Raster::new(&tile, PixelLayout::Rgba8, 32, 32).at(offset, offset),
                2,
            );
        }
        group.bench_with_input(BenchmarkId::from_parameter(count), &anim, |b, anim| {
            b.iter(|| encoder.encode_to_vec(black_box(anim)).unwrap())
        });
    }
    group.finish();
}

fn bench_split(c: &mut Criterion) {
    let pixels = synthetic_rgba(512, 512, 3);
    let png = PngCodec::new()
        .encode(&Raster::new(&pixels, PixelLayout::Rgba8, 512, 512))
        .unwrap();

    let mut group = c.benchmark_group("split");
    group.throughput(Throughput::Bytes(png.len() as u64));
    group.bench_function("split_png", |b| {
        b.iter(|| split_png(black_box(&png)).unwrap().data.len())
    });
    group.finish();
}

criterion_group!(
    benches,
    bench_compression_levels,
    bench_frame_counts,
    bench_split
);
criterion_main!(benches);
