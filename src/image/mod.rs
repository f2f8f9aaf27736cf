//! Pixel storage shared by the codec, the preprocessor and the matcher.
//!
//! [`PixelBuffer`] owns interleaved `u8` samples with 1, 3 or 4 channels.
//! [`ImageView`] is a borrowed single-channel 2D view with an explicit stride;
//! the stride counts elements between the starts of consecutive rows, so a
//! stride larger than the width represents padded rows.

use crate::util::{SlideMatchError, SlideMatchResult};

pub(crate) mod buffer;

pub use buffer::{Mask, PixelBuffer};

/// Borrowed single-channel 2D view with an explicit stride.
#[derive(Copy, Clone, Debug)]
pub struct ImageView<'a, T> {
    data: &'a [T],
    width: usize,
    height: usize,
    stride: usize,
}

impl<'a, T> ImageView<'a, T> {
    /// Creates a contiguous view with `stride == width`.
    pub fn from_slice(data: &'a [T], width: usize, height: usize) -> SlideMatchResult<Self> {
        Self::new(data, width, height, width)
    }

    /// Creates a view with an explicit stride.
    pub fn new(
        data: &'a [T],
        width: usize,
        height: usize,
        stride: usize,
    ) -> SlideMatchResult<Self> {
        let needed = required_len(width, height, stride)?;
        if data.len() < needed {
            return Err(SlideMatchError::BufferTooSmall {
                needed,
                got: data.len(),
            });
        }
        Ok(Self {
            data,
            width,
            height,
            stride,
        })
    }

    /// Returns the image width in pixels.
    pub fn width(&self) -> usize {
        self.width
    }

    /// Returns the image height in pixels.
    pub fn height(&self) -> usize {
        self.height
    }

    /// Returns the stride in elements between row starts.
    pub fn stride(&self) -> usize {
        self.stride
    }

    /// Returns the backing slice including any row padding.
    pub fn as_slice(&self) -> &'a [T] {
        self.data
    }

    /// Returns the element at `(x, y)` if it is within bounds.
    pub fn get(&self, x: usize, y: usize) -> Option<&'a T> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let idx = y.checked_mul(self.stride)?.checked_add(x)?;
        self.data.get(idx)
    }

    /// Returns a contiguous slice for row `y` with length `width`.
    pub fn row(&self, y: usize) -> Option<&'a [T]> {
        if y >= self.height {
            return None;
        }
        let start = y.checked_mul(self.stride)?;
        let end = start.checked_add(self.width)?;
        self.data.get(start..end)
    }

    /// Returns true when both views cover the same number of columns and rows.
    pub fn same_size<U>(&self, other: &ImageView<'_, U>) -> bool {
        self.width == other.width && self.height == other.height
    }
}

fn required_len(width: usize, height: usize, stride: usize) -> SlideMatchResult<usize> {
    if width == 0 || height == 0 {
        return Err(SlideMatchError::InvalidDimensions { width, height });
    }
    if stride < width {
        return Err(SlideMatchError::InvalidStride { width, stride });
    }
    (height - 1)
        .checked_mul(stride)
        .and_then(|v| v.checked_add(width))
        .ok_or(SlideMatchError::InvalidDimensions { width, height })
}
