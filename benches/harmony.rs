use std::time::Duration;

use colorcard::{
    colorspace::{self, ColorModel},
    harmony::{ColorWheel, Harmony, HarmonyScheme},
    vision::{self, Vision},
    Color,
};
use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion, SamplingMode};

fn all_colors() -> Vec<Color> {
    (0..=u8::MAX)
        .flat_map(|r| (0..=u8::MAX).step_by(3).map(move |g| (r, g)))
        .flat_map(|(r, g)| (0..=u8::MAX).step_by(3).map(move |b| Color::new(r, g, b)))
        .collect()
}

fn harmony_generate(c: &mut Criterion) {
    let mut group = c.benchmark_group("harmony_generate");
    group
        .noise_threshold(0.05)
        .warm_up_time(Duration::from_millis(500));

    for wheel in [ColorWheel::Rgb, ColorWheel::Ryb] {
        for scheme in HarmonyScheme::ALL {
            group.bench_with_input(
                BenchmarkId::new(wheel.to_string(), scheme),
                &scheme,
                |b, &scheme| {
                    b.iter(|| {
                        (0..360)
                            .map(|hue| {
                                Harmony::new(f64::from(hue), scheme)
                                    .saturation(80.0)
                                    .lightness(90.0)
                                    .wheel(wheel)
                                    .generate()
                            })
                            .count()
                    })
                },
            );
        }
    }
}

fn colorspace_round_trip(c: &mut Criterion) {
    let colors = all_colors();
    let mut group = c.benchmark_group("colorspace_round_trip");
    group
        .sample_size(30)
        .sampling_mode(SamplingMode::Flat)
        .warm_up_time(Duration::from_millis(500));

    for model in ColorModel::ALL {
        group.bench_with_input(BenchmarkId::from_parameter(model), &model, |b, &model| {
            b.iter(|| {
                colors
                    .iter()
                    .map(|&color| color.to_model(model).to_color())
                    .filter(|&color| color == Color::BLACK)
                    .count()
            })
        });
    }

    group.bench_function("hex", |b| {
        b.iter(|| {
            colors
                .iter()
                .filter_map(|color| color.to_hex().parse::<Color>().ok())
                .count()
        })
    });

    group.bench_function("info", |b| {
        b.iter(|| colors.iter().map(|&color| colorspace::ColorInfo::new(color)).count())
    });
}

fn vision_simulate(c: &mut Criterion) {
    let colors = all_colors();
    let mut group = c.benchmark_group("vision_simulate");
    group
        .sample_size(30)
        .sampling_mode(SamplingMode::Flat)
        .warm_up_time(Duration::from_millis(500));

    for vision in Vision::ALL {
        group.bench_with_input(BenchmarkId::new("single", vision), &vision, |b, &vision| {
            b.iter(|| vision::simulate_all(&colors, vision))
        });
        group.bench_with_input(BenchmarkId::new("par", vision), &vision, |b, &vision| {
            b.iter(|| vision::simulate_all_par(&colors, vision))
        });
    }
}

criterion_group!(benches, harmony_generate, colorspace_round_trip, vision_simulate);
criterion_main!(benches);
