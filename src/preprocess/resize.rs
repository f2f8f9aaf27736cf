//! Nearest-neighbor resampling.
//!
//! Each destination pixel copies the source pixel at
//! `floor(dst * src_len / dst_len)` along each axis. No blending happens, so
//! alpha edges and flat synthetic art keep their exact sample values.

use crate::image::buffer::{sample_count, try_alloc};
use crate::image::PixelBuffer;
use crate::util::{SlideMatchError, SlideMatchResult};

/// Resamples `src` to exactly `width x height`, keeping its channel count.
///
/// A target the allocator cannot hold fails with `InvalidDimensions`.
pub fn resize_nearest(src: &PixelBuffer, width: usize, height: usize) -> SlideMatchResult<PixelBuffer> {
    if width == 0 || height == 0 {
        return Err(SlideMatchError::InvalidDimensions { width, height });
    }
    if width == src.width() && height == src.height() {
        return Ok(src.clone());
    }

    let channels = src.channels();
    let src_width = src.width();
    let src_height = src.height();
    let data = src.data();
    let len = sample_count(width, height, channels)?;

    let mut out = try_alloc(len, width, height)?;
    let mut x_offsets = try_alloc(width, width, height)?;
    x_offsets.extend((0..width).map(|x| source_index(x, src_width, width) * channels));

    for y in 0..height {
        let sy = source_index(y, src_height, height);
        let row = &data[sy * src_width * channels..(sy + 1) * src_width * channels];
        for &sx in &x_offsets {
            out.extend_from_slice(&row[sx..sx + channels]);
        }
    }

    PixelBuffer::new(out, width, height, channels)
}

fn source_index(dst: usize, src_len: usize, dst_len: usize) -> usize {
    // u128 keeps the product exact for any usize extents.
    let idx = (dst as u128 * src_len as u128 / dst_len as u128) as usize;
    idx.min(src_len - 1)
}

#[cfg(test)]
mod tests {
    use super::{resize_nearest, source_index};
    use crate::image::PixelBuffer;
    use crate::util::SlideMatchError;

    #[test]
    fn source_index_floors() {
        assert_eq!(source_index(0, 10, 4), 0);
        assert_eq!(source_index(1, 10, 4), 2);
        assert_eq!(source_index(3, 10, 4), 7);
        assert_eq!(source_index(5, 3, 6), 2);
    }

    #[test]
    fn upscale_duplicates_pixels() {
        let src = PixelBuffer::gray(vec![1, 2, 3, 4], 2, 2).unwrap();
        let up = resize_nearest(&src, 4, 4).unwrap();
        assert_eq!(
            up.data(),
            &[1, 1, 2, 2, 1, 1, 2, 2, 3, 3, 4, 4, 3, 3, 4, 4]
        );
    }

    #[test]
    fn downscale_keeps_channels_interleaved() {
        let src = PixelBuffer::new((0u8..16).collect(), 2, 2, 4).unwrap();
        let down = resize_nearest(&src, 1, 1).unwrap();
        assert_eq!(down.channels(), 4);
        assert_eq!(down.data(), &[0, 1, 2, 3]);
    }

    #[test]
    fn zero_target_is_rejected() {
        let src = PixelBuffer::gray(vec![0; 4], 2, 2).unwrap();
        assert!(resize_nearest(&src, 0, 2).is_err());
    }

    #[test]
    fn unallocatable_target_is_an_error() {
        let src = PixelBuffer::gray(vec![0; 4], 2, 2).unwrap();
        let err = resize_nearest(&src, 1 << 30, 1 << 30).unwrap_err();
        assert_eq!(
            err,
            SlideMatchError::InvalidDimensions {
                width: 1 << 30,
                height: 1 << 30
            }
        );
    }
}
