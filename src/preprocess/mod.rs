//! Preprocessing: decode, resize to the working size, split intensity and mask.
//!
//! The same entry point serves both the block and the background; callers
//! keep the mask only for the block. The mask is taken from the resized
//! buffer so it always matches the intensity plane it pairs with.

mod intensity;
mod resize;

pub use intensity::{extract_mask, luma, to_intensity};
pub use resize::resize_nearest;

use crate::codec::{decode_base64_image, decode_image};
use crate::image::{Mask, PixelBuffer};
use crate::trace::{stage, stage_event};
use crate::util::SlideMatchResult;

/// Output of [`preprocess`]: intensity plane plus the optional alpha mask.
#[derive(Clone, Debug)]
pub struct Preprocessed {
    /// Alpha-derived mask, present only for 4-channel sources.
    pub mask: Option<Mask>,
    /// Single-channel intensity at the requested size.
    pub intensity: PixelBuffer,
}

/// Decodes a `"<metadata>,<base64>"` payload and prepares it for matching.
pub fn preprocess(payload: &str, width: usize, height: usize) -> SlideMatchResult<Preprocessed> {
    let _stage = stage!("preprocess", width, height);
    let decoded = decode_base64_image(payload)?;
    prepare(decoded, width, height)
}

/// Same as [`preprocess`] for raw encoded image bytes.
pub fn preprocess_bytes(bytes: &[u8], width: usize, height: usize) -> SlideMatchResult<Preprocessed> {
    let _stage = stage!("preprocess", width, height);
    let decoded = decode_image(bytes)?;
    prepare(decoded, width, height)
}

/// Resizes an already decoded buffer and splits it into intensity and mask.
pub fn prepare(decoded: PixelBuffer, width: usize, height: usize) -> SlideMatchResult<Preprocessed> {
    let resized = resize_nearest(&decoded, width, height)?;
    stage_event!(
        "preprocess",
        src_width = decoded.width(),
        src_height = decoded.height(),
        dst_width = resized.width(),
        dst_height = resized.height()
    );
    drop(decoded);

    let mask = extract_mask(&resized);
    let intensity = to_intensity(resized)?;
    Ok(Preprocessed { mask, intensity })
}
