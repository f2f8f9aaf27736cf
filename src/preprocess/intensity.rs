//! Color to intensity conversion and alpha mask extraction.

use crate::image::buffer::try_alloc;
use crate::image::{Mask, PixelBuffer};
use crate::util::SlideMatchResult;

// ITU-R BT.601 weights in 14-bit fixed point (sum = 1 << 14).
const R_WEIGHT: u32 = 4899;
const G_WEIGHT: u32 = 9617;
const B_WEIGHT: u32 = 1868;
const SHIFT: u32 = 14;
const ROUND: u32 = 1 << (SHIFT - 1);

/// Returns the luma of an `(r, g, b)` triple.
#[inline]
pub fn luma(r: u8, g: u8, b: u8) -> u8 {
    let y = R_WEIGHT * u32::from(r) + G_WEIGHT * u32::from(g) + B_WEIGHT * u32::from(b);
    ((y + ROUND) >> SHIFT) as u8
}

/// Converts a color buffer to single-channel intensity.
///
/// Uses the first three channels; alpha is dropped. Single-channel input is
/// returned unchanged.
pub fn to_intensity(src: PixelBuffer) -> SlideMatchResult<PixelBuffer> {
    let channels = src.channels();
    if channels == 1 {
        return Ok(src);
    }
    let mut gray = try_alloc(src.width() * src.height(), src.width(), src.height())?;
    gray.extend(
        src.data()
            .chunks_exact(channels)
            .map(|px| luma(px[0], px[1], px[2])),
    );
    PixelBuffer::gray(gray, src.width(), src.height())
}

/// Returns the alpha plane of a 4-channel buffer as a mask.
pub fn extract_mask(src: &PixelBuffer) -> Option<Mask> {
    if src.channels() != 4 {
        return None;
    }
    src.channel(3).map(Mask::from_plane)
}
