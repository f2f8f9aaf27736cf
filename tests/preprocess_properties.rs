mod common;

use common::{noise_rgb, png_data_uri};
use image::{DynamicImage, Rgba, RgbaImage};
use slidematch::preprocess::{extract_mask, luma, prepare, resize_nearest, to_intensity};
use slidematch::{preprocess, ErrorKind, PixelBuffer};

fn gradient(width: usize, height: usize, channels: usize) -> PixelBuffer {
    let data = (0..width * height * channels)
        .map(|i| ((i * 31) ^ (i / 7)) as u8)
        .collect();
    PixelBuffer::new(data, width, height, channels).unwrap()
}

#[test]
fn resize_is_idempotent() {
    for &(w, h) in &[(13, 7), (40, 40), (5, 31)] {
        let src = gradient(23, 17, 4);
        let once = resize_nearest(&src, w, h).unwrap();
        let twice = resize_nearest(&once, w, h).unwrap();
        assert_eq!(once, twice);
        assert_eq!((once.width(), once.height(), once.channels()), (w, h, 4));
    }
}

#[test]
fn resize_to_same_size_is_identity() {
    let src = gradient(9, 6, 3);
    assert_eq!(resize_nearest(&src, 9, 6).unwrap(), src);
}

#[test]
fn resize_never_blends_samples() {
    let src = gradient(11, 9, 1);
    let out = resize_nearest(&src, 29, 4).unwrap();
    for &value in out.data() {
        assert!(src.data().contains(&value));
    }
}

#[test]
fn mask_extraction_requires_four_channels() {
    let rgb = resize_nearest(&gradient(8, 8, 3), 4, 4).unwrap();
    assert!(extract_mask(&rgb).is_none());

    let rgba = resize_nearest(&gradient(8, 8, 4), 5, 3).unwrap();
    let mask = extract_mask(&rgba).unwrap();
    assert_eq!((mask.width(), mask.height()), (5, 3));
    for (i, &w) in mask.data().iter().enumerate() {
        assert_eq!(w, rgba.data()[i * 4 + 3]);
    }
}

#[test]
fn intensity_uses_first_three_channels() {
    let rgba = gradient(6, 5, 4);
    let gray = to_intensity(rgba.clone()).unwrap();
    assert_eq!(gray.channels(), 1);
    for (i, &value) in gray.data().iter().enumerate() {
        let px = &rgba.data()[i * 4..i * 4 + 3];
        assert_eq!(value, luma(px[0], px[1], px[2]));
    }
}

#[test]
fn mask_is_taken_after_resize() {
    let img = RgbaImage::from_fn(10, 10, |x, _| Rgba([0, 0, 0, if x < 5 { 0 } else { 255 }]));
    let uri = png_data_uri(&DynamicImage::ImageRgba8(img));

    let out = preprocess(&uri, 4, 2).unwrap();
    let mask = out.mask.unwrap();
    assert_eq!((mask.width(), mask.height()), (4, 2));
    assert_eq!(mask.data(), &[0, 0, 255, 255, 0, 0, 255, 255]);
    assert_eq!((out.intensity.width(), out.intensity.height()), (4, 2));
}

#[test]
fn rgb_source_has_no_mask() {
    let uri = png_data_uri(&DynamicImage::ImageRgb8(noise_rgb(12, 8, 3)));
    let out = preprocess(&uri, 6, 4).unwrap();
    assert!(out.mask.is_none());
    assert_eq!(out.intensity.channels(), 1);
}

#[test]
fn decode_failure_is_propagated_not_masked() {
    let err = preprocess("data:image/png;base64,AAAA", 10, 10).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Decode);
}

#[test]
fn zero_target_size_is_a_dimension_error() {
    let err = prepare(gradient(4, 4, 3), 0, 4).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Dimension);
}

#[test]
fn oversized_target_is_rejected_without_aborting() {
    let uri = png_data_uri(&DynamicImage::ImageRgb8(noise_rgb(2, 2, 5)));
    let err = preprocess(&uri, 1 << 30, 1 << 30).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Dimension);
}
