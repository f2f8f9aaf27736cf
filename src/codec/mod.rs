//! Image codec: transport payload unwrapping and raster decoding.
//!
//! Payloads arrive as `"<metadata>,<base64>"` strings (typically data URIs).
//! [`decode_payload`] recovers the encoded bytes and [`decode_image`] turns
//! them into a [`PixelBuffer`](crate::image::PixelBuffer) with the source's
//! native channel layout.

mod decode;
mod payload;

pub use decode::decode_image;
pub use payload::{decode_payload, strip_metadata};

use crate::image::PixelBuffer;
use crate::util::SlideMatchResult;

/// Unwraps a base64 payload and decodes the image it carries.
pub fn decode_base64_image(text: &str) -> SlideMatchResult<PixelBuffer> {
    let bytes = decode_payload(text)?;
    decode_image(&bytes)
}
