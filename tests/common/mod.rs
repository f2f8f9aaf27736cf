#![allow(dead_code)]

use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use image::{DynamicImage, ImageFormat, RgbImage, RgbaImage};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::io::Cursor;

pub fn encode(img: &DynamicImage, format: ImageFormat) -> Vec<u8> {
    let mut out = Cursor::new(Vec::new());
    img.write_to(&mut out, format).unwrap();
    out.into_inner()
}

pub fn data_uri(bytes: &[u8], mime: &str) -> String {
    format!("data:{mime};base64,{}", STANDARD.encode(bytes))
}

pub fn png_data_uri(img: &DynamicImage) -> String {
    data_uri(&encode(img, ImageFormat::Png), "image/png")
}

pub fn noise_rgb(width: u32, height: u32, seed: u64) -> RgbImage {
    let mut rng = StdRng::seed_from_u64(seed);
    RgbImage::from_fn(width, height, |_, _| {
        image::Rgb([rng.random(), rng.random(), rng.random()])
    })
}

/// Circle-ish puzzle piece: pixels inside radius copied from `bg`, the rest transparent.
pub fn cut_piece(bg: &RgbImage, x0: u32, y0: u32, size: u32) -> RgbaImage {
    let r = size as f32 / 2.0;
    RgbaImage::from_fn(size, size, |x, y| {
        let dx = x as f32 + 0.5 - r;
        let dy = y as f32 + 0.5 - r;
        if dx * dx + dy * dy <= r * r {
            let p = bg.get_pixel(x0 + x, y0 + y);
            image::Rgba([p[0], p[1], p[2], 255])
        } else {
            image::Rgba([255, 0, 255, 0])
        }
    })
}
