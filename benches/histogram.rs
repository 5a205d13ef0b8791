#[path = "../util/util.rs"]
mod util;

use util::bench_images;

use std::time::Duration;

use colorcard::{
    extract::{self, MomentHistogram, DEFAULT_COLORS},
    histogram::{self, HistogramBins, HueHistogram, PixelGrid, Sampling},
    Color, ColorSlice,
};
use criterion::{
    criterion_group, criterion_main, measurement::WallTime, Bencher, BenchmarkId, Criterion,
    SamplingMode,
};
use image::RgbImage;

fn bench(
    c: &mut Criterion,
    group: &str,
    images: &[(String, RgbImage)],
    mut f: impl FnMut(&mut Bencher<WallTime>, &(Sampling, &RgbImage)),
) {
    let mut group = c.benchmark_group(group);
    group
        .sample_size(30)
        .noise_threshold(0.05)
        .sampling_mode(SamplingMode::Flat)
        .warm_up_time(Duration::from_millis(500));

    for (sampling, name) in [(Sampling::ALL, "all"), (Sampling::default(), "budget")] {
        for (path, image) in images {
            group.bench_with_input(BenchmarkId::new(name, path), &(sampling, image), &mut f);
        }
    }
}

fn histogram_single(c: &mut Criterion) {
    bench(c, "histogram_single", bench_images(), |b, &(sampling, image)| {
        let pixels = ColorSlice::<Color>::try_from(image).unwrap();
        b.iter(|| histogram::histogram(pixels, sampling))
    })
}

fn histogram_par(c: &mut Criterion) {
    bench(c, "histogram_par", bench_images(), |b, &(sampling, image)| {
        let pixels = ColorSlice::<Color>::try_from(image).unwrap();
        b.iter(|| histogram::histogram_par(pixels, sampling))
    })
}

fn luma_histogram_par(c: &mut Criterion) {
    bench(c, "luma_histogram_par", bench_images(), |b, &(sampling, image)| {
        let pixels = ColorSlice::<Color>::try_from(image).unwrap();
        b.iter(|| histogram::luma_histogram_par(pixels, sampling))
    })
}

fn hue_histogram_par(c: &mut Criterion) {
    bench(c, "hue_histogram_par", bench_images(), |b, &(sampling, image)| {
        let pixels = ColorSlice::<Color>::try_from(image).unwrap();
        b.iter(|| histogram::hue_histogram_par(pixels, sampling))
    })
}

fn dominant_colors_single(c: &mut Criterion) {
    bench(c, "dominant_colors_single", bench_images(), |b, &(sampling, image)| {
        let pixels = ColorSlice::<Color>::try_from(image).unwrap();
        b.iter(|| extract::dominant_colors(pixels, DEFAULT_COLORS, sampling))
    })
}

fn dominant_colors_par(c: &mut Criterion) {
    bench(c, "dominant_colors_par", bench_images(), |b, &(sampling, image)| {
        let pixels = ColorSlice::<Color>::try_from(image).unwrap();
        b.iter(|| extract::dominant_colors_par(pixels, DEFAULT_COLORS, sampling))
    })
}

fn grid_histogram(c: &mut Criterion) {
    let mut group = c.benchmark_group("grid_histogram");
    group
        .sample_size(30)
        .noise_threshold(0.05)
        .sampling_mode(SamplingMode::Flat)
        .warm_up_time(Duration::from_millis(500));

    for (path, image) in bench_images() {
        let grid = PixelGrid::<Color>::try_from(image).unwrap();
        let step = grid.auto_step();
        group.bench_with_input(BenchmarkId::new("single", path), &grid, |b, grid| {
            b.iter(|| grid.compute::<HistogramBins>(step))
        });
        group.bench_with_input(BenchmarkId::new("par", path), &grid, |b, grid| {
            b.iter(|| grid.compute_par::<HistogramBins>(step))
        });
        group.bench_with_input(BenchmarkId::new("hue_par", path), &grid, |b, grid| {
            b.iter(|| grid.compute_par::<HueHistogram>(step))
        });
        group.bench_with_input(BenchmarkId::new("dominant_par", path), &grid, |b, grid| {
            b.iter(|| grid.compute_par::<MomentHistogram>(step).dominant_colors(DEFAULT_COLORS))
        });
    }
}

criterion_group!(
    benches,
    histogram_single,
    histogram_par,
    luma_histogram_par,
    hue_histogram_par,
    dominant_colors_single,
    dominant_colors_par,
    grid_histogram,
);
criterion_main!(benches);
