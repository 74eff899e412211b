use png2bin::image::*;
use png2bin::imgproc::{self, PackMode, Rotation};

use criterion::{black_box, criterion_group, criterion_main, Criterion};

fn bitpack_bench(c: &mut Criterion) {
    c.bench_function("Pack 1bpp from RGBA, 1k*1k", |b| {
        let data = vec![42u8; 1000 * 1000 * 4];
        let img = PixelBuffer::new(SampleFormat::new(8, ChannelLayout::Rgba), &data, 1000, 1000, None).unwrap();
        b.iter(|| black_box(imgproc::pack(&img, PackMode::Binarize).unwrap()));
    });
    c.bench_function("Pack raw RGBA, 1k*1k", |b| {
        let data = vec![42u8; 1000 * 1000 * 4];
        let img = PixelBuffer::new(SampleFormat::new(8, ChannelLayout::Rgba), &data, 1000, 1000, None).unwrap();
        b.iter(|| black_box(imgproc::pack(&img, PackMode::Raw).unwrap()));
    });
}

fn rotate_bench(c: &mut Criterion) {
    c.bench_function("Rotate 1bpp 90, 1k*1k", |b| {
        let data = vec![0x5a; 125 * 1000];
        let bitmap = PackedBitmap::from_data(PackedFormat::Mono1Bpp, 1000, 1000, data).unwrap();
        b.iter(|| black_box(imgproc::rotate(bitmap.clone(), Rotation::Rotate90).unwrap()));
    });
}

criterion_group!(benches, bitpack_bench, rotate_bench);
criterion_main!(benches);
