#![allow(dead_code)]

use std::sync::OnceLock;

use image::{Rgba, RgbaImage};
use rand::{Rng, SeedableRng};
use rand_xoshiro::Xoroshiro128PlusPlus;

/// A smooth two-axis gradient with a little noise, similar to a photo with soft lighting.
fn gradient(width: u32, height: u32, seed: u64) -> RgbaImage {
    let mut rng = Xoroshiro128PlusPlus::seed_from_u64(seed);
    RgbaImage::from_fn(width, height, |x, y| {
        let r = (x * 255 / width.max(1)) as u8;
        let g = (y * 255 / height.max(1)) as u8;
        let b = ((x + y) * 127 / (width + height).max(1)) as u8;
        let mut jitter = |c: u8| c.saturating_add(rng.gen_range(0..8));
        Rgba([jitter(r), jitter(g), jitter(b), 255])
    })
}

/// Uniformly random pixels, the worst case for the number of distinct colors.
fn noise(width: u32, height: u32, seed: u64) -> RgbaImage {
    let mut rng = Xoroshiro128PlusPlus::seed_from_u64(seed);
    RgbaImage::from_fn(width, height, |_, _| Rgba([rng.gen(), rng.gen(), rng.gen(), 255]))
}

/// A few flat color blocks, like a logo or an illustration.
fn blocks(width: u32, height: u32) -> RgbaImage {
    const COLORS: [[u8; 3]; 6] = [
        [200, 30, 40],
        [240, 230, 210],
        [30, 40, 80],
        [120, 110, 100],
        [60, 160, 90],
        [250, 200, 40],
    ];
    RgbaImage::from_fn(width, height, |x, y| {
        let [r, g, b] = COLORS[((x / 64 + y / 64) % 6) as usize];
        Rgba([r, g, b, 255])
    })
}

pub fn load_synthetic_images() -> Vec<(String, RgbaImage)> {
    vec![
        ("gradient_1024x768".to_owned(), gradient(1024, 768, 0)),
        ("noise_512x512".to_owned(), noise(512, 512, 1)),
        ("blocks_800x600".to_owned(), blocks(800, 600)),
        ("gradient_192x128".to_owned(), gradient(192, 128, 2)),
    ]
}

static SYNTHETIC_IMAGES: OnceLock<Vec<(String, RgbaImage)>> = OnceLock::new();

pub fn synthetic_images() -> &'static [(String, RgbaImage)] {
    SYNTHETIC_IMAGES.get_or_init(load_synthetic_images)
}
