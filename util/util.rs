#![allow(dead_code)]

use std::{
    path::{Path, PathBuf},
    sync::OnceLock,
};

use image::{Rgb, RgbImage};
use rand::{Rng, SeedableRng};
use rand_xoshiro::Xoroshiro128PlusPlus;

pub fn load_images(images: &[PathBuf]) -> Vec<(String, RgbImage)> {
    images
        .iter()
        .map(|path| {
            image::open(path).map(|image| {
                (
                    path.file_name().unwrap().to_owned().into_string().unwrap(),
                    image.into_rgb8(),
                )
            })
        })
        .collect::<Result<_, _>>()
        .expect("loaded each image")
}

/// Loads every image in `dir`, or nothing if the directory does not exist.
pub fn load_image_dir(dir: impl AsRef<Path>) -> Vec<(String, RgbImage)> {
    let Ok(entries) = std::fs::read_dir(dir) else {
        return Vec::new();
    };

    let mut paths = entries
        .collect::<Result<Vec<_>, _>>()
        .expect("read each file")
        .iter()
        .map(std::fs::DirEntry::path)
        .collect::<Vec<_>>();

    paths.sort();

    load_images(&paths)
}

pub const IMG_DIR: &str = "img";

pub fn load_image_dir_relative_to_root(dir: impl AsRef<Path>) -> Vec<(String, RgbImage)> {
    // assume current exe path is something like: target/build/deps/current_exe
    let exe = std::env::current_exe().unwrap();
    let root = exe
        .parent()
        .and_then(Path::parent)
        .and_then(Path::parent)
        .and_then(Path::parent)
        .unwrap();

    load_image_dir(root.join(dir.as_ref()))
}

/// A smooth hue and brightness sweep with seeded noise, roughly like a photo's distribution.
pub fn synthetic_image(width: u32, height: u32, seed: u64) -> RgbImage {
    let mut rng = Xoroshiro128PlusPlus::seed_from_u64(seed);
    RgbImage::from_fn(width, height, |x, y| {
        let fx = x as f32 / width as f32;
        let fy = y as f32 / height as f32;
        let noise = |rng: &mut Xoroshiro128PlusPlus| rng.gen_range(-12.0..12.0);
        let channel = |v: f32, rng: &mut Xoroshiro128PlusPlus| (v * 255.0 + noise(rng)).clamp(0.0, 255.0) as u8;
        Rgb([
            channel(fx * (1.0 - fy), &mut rng),
            channel(fy, &mut rng),
            channel(1.0 - fx, &mut rng),
        ])
    })
}

static BENCH_IMAGES: OnceLock<Vec<(String, RgbImage)>> = OnceLock::new();

pub fn load_bench_images() -> Vec<(String, RgbImage)> {
    let mut images = vec![
        ("synthetic_640x480".to_owned(), synthetic_image(640, 480, 1)),
        ("synthetic_1920x1080".to_owned(), synthetic_image(1920, 1080, 2)),
        ("synthetic_4000x3000".to_owned(), synthetic_image(4000, 3000, 3)),
    ];
    images.extend(load_image_dir_relative_to_root(IMG_DIR));
    images
}

pub fn bench_images() -> &'static [(String, RgbImage)] {
    BENCH_IMAGES.get_or_init(load_bench_images)
}
