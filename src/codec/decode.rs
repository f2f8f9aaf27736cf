//! Raster decoding through the `image` crate.

use image::DynamicImage;

use crate::image::PixelBuffer;
use crate::trace::stage_event;
use crate::util::SlideMatchResult;

/// Decodes an encoded image (PNG, JPEG, WebP, BMP, GIF) into a pixel buffer.
///
/// Gray images stay single-channel, RGB stays 3-channel and anything carrying
/// alpha becomes 4-channel RGBA so the alpha plane survives. Deeper sample
/// types are reduced to 8 bits.
pub fn decode_image(bytes: &[u8]) -> SlideMatchResult<PixelBuffer> {
    let img = image::load_from_memory(bytes)?;
    let buffer = from_dynamic_image(img)?;
    stage_event!(
        "decode",
        width = buffer.width(),
        height = buffer.height(),
        channels = buffer.channels()
    );
    Ok(buffer)
}

fn from_dynamic_image(img: DynamicImage) -> SlideMatchResult<PixelBuffer> {
    let width = img.width() as usize;
    let height = img.height() as usize;
    match img {
        DynamicImage::ImageLuma8(gray) => PixelBuffer::new(gray.into_raw(), width, height, 1),
        DynamicImage::ImageRgb8(rgb) => PixelBuffer::new(rgb.into_raw(), width, height, 3),
        DynamicImage::ImageRgba8(rgba) => PixelBuffer::new(rgba.into_raw(), width, height, 4),
        other if other.color().has_alpha() => {
            PixelBuffer::new(other.to_rgba8().into_raw(), width, height, 4)
        }
        other if other.color().has_color() => {
            PixelBuffer::new(other.to_rgb8().into_raw(), width, height, 3)
        }
        other => PixelBuffer::new(other.to_luma8().into_raw(), width, height, 1),
    }
}
