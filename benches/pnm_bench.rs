#![deny(warnings)]

use criterion::{Criterion, Throughput, criterion_group, criterion_main};
use pnmdraw::*;
use std::{hint::black_box, time::Duration};

fn pnm_benchmark(c: &mut Criterion) {
    let pixmap = Pixmap::new_with(256, 256, |x, y| Rgb::new(x as u8, y as u8, (x ^ y) as u8));
    let graymap = Graymap::new_with(256, 256, |x, y| Gray((x + y) as u8));
    let bitmap = Bitmap::new_with(256, 256, |x, y| Bit((x / 8 + y / 8) % 2 == 0));
    let pixmap_str = pixmap.to_pnm_string();
    let graymap_str = graymap.to_pnm_string();
    let bitmap_str = bitmap.to_pnm_string();

    let mut group = c.benchmark_group("pnm");
    group
        .throughput(Throughput::Elements(256 * 256))
        .bench_function("encode P3", |b| b.iter(|| black_box(&pixmap).to_pnm_string()))
        .bench_function("encode P2", |b| b.iter(|| black_box(&graymap).to_pnm_string()))
        .bench_function("encode P1", |b| b.iter(|| black_box(&bitmap).to_pnm_string()))
        .bench_function("decode P3", |b| {
            b.iter_with_large_drop(|| decode::<Rgb>(black_box(pixmap_str.as_bytes())))
        })
        .bench_function("decode P2", |b| {
            b.iter_with_large_drop(|| decode::<Gray>(black_box(graymap_str.as_bytes())))
        })
        .bench_function("decode P1", |b| {
            b.iter_with_large_drop(|| decode::<Bit>(black_box(bitmap_str.as_bytes())))
        });
    group.finish()
}

criterion_group!(
    name = pnm;
    config = Criterion::default().sample_size(10).warm_up_time(Duration::new(1, 0));
    targets = pnm_benchmark
);
criterion_main!(pnm);
