//! Owned interleaved pixel buffers.

use crate::image::ImageView;
use crate::util::{SlideMatchError, SlideMatchResult};

/// Owned, contiguous, interleaved `u8` image.
///
/// Samples are stored row-major with `channels` values per pixel. Supported
/// layouts are 1 (intensity or mask), 3 (color) and 4 (color + alpha).
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PixelBuffer {
    data: Vec<u8>,
    width: usize,
    height: usize,
    channels: usize,
}

impl PixelBuffer {
    /// Wraps `data` after checking it holds exactly `width * height * channels` samples.
    pub fn new(data: Vec<u8>, width: usize, height: usize, channels: usize) -> SlideMatchResult<Self> {
        if !matches!(channels, 1 | 3 | 4) {
            return Err(SlideMatchError::UnsupportedChannels { channels });
        }
        let needed = sample_count(width, height, channels)?;
        if data.len() < needed {
            return Err(SlideMatchError::BufferTooSmall {
                needed,
                got: data.len(),
            });
        }
        if data.len() > needed {
            return Err(SlideMatchError::InvalidDimensions { width, height });
        }
        Ok(Self {
            data,
            width,
            height,
            channels,
        })
    }

    /// Creates a single-channel buffer.
    pub fn gray(data: Vec<u8>, width: usize, height: usize) -> SlideMatchResult<Self> {
        Self::new(data, width, height, 1)
    }

    /// Returns the width in pixels.
    pub fn width(&self) -> usize {
        self.width
    }

    /// Returns the height in pixels.
    pub fn height(&self) -> usize {
        self.height
    }

    /// Returns the number of interleaved channels.
    pub fn channels(&self) -> usize {
        self.channels
    }

    /// Returns the raw interleaved samples.
    pub fn data(&self) -> &[u8] {
        &self.data
    }

    /// Consumes the buffer and returns its samples.
    pub fn into_data(self) -> Vec<u8> {
        self.data
    }

    /// Returns the samples of pixel `(x, y)`.
    pub fn pixel(&self, x: usize, y: usize) -> Option<&[u8]> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let start = (y * self.width + x) * self.channels;
        self.data.get(start..start + self.channels)
    }

    /// Copies channel `index` into a new single-channel buffer.
    pub fn channel(&self, index: usize) -> Option<PixelBuffer> {
        if index >= self.channels {
            return None;
        }
        let plane: Vec<u8> = self
            .data
            .iter()
            .skip(index)
            .step_by(self.channels)
            .copied()
            .collect();
        Some(Self {
            data: plane,
            width: self.width,
            height: self.height,
            channels: 1,
        })
    }

    /// Returns a 2D view of a single-channel buffer.
    pub fn view(&self) -> SlideMatchResult<ImageView<'_, u8>> {
        if self.channels != 1 {
            return Err(SlideMatchError::UnsupportedChannels {
                channels: self.channels,
            });
        }
        Ok(ImageView {
            data: &self.data,
            width: self.width,
            height: self.height,
            stride: self.width,
        })
    }
}

/// Per-pixel inclusion weights for masked matching (0 = ignore).
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Mask {
    plane: PixelBuffer,
}

impl Mask {
    /// Creates a mask from row-major weights.
    pub fn new(data: Vec<u8>, width: usize, height: usize) -> SlideMatchResult<Self> {
        Ok(Self {
            plane: PixelBuffer::gray(data, width, height)?,
        })
    }

    /// Creates a mask that includes every pixel.
    pub fn opaque(width: usize, height: usize) -> SlideMatchResult<Self> {
        let len = sample_count(width, height, 1)?;
        Self::new(vec![u8::MAX; len], width, height)
    }

    pub(crate) fn from_plane(plane: PixelBuffer) -> Self {
        debug_assert_eq!(plane.channels(), 1);
        Self { plane }
    }

    /// Returns the mask width in pixels.
    pub fn width(&self) -> usize {
        self.plane.width()
    }

    /// Returns the mask height in pixels.
    pub fn height(&self) -> usize {
        self.plane.height()
    }

    /// Returns the weights in row-major order.
    pub fn data(&self) -> &[u8] {
        self.plane.data()
    }

    /// Number of pixels with a nonzero weight.
    pub fn included(&self) -> usize {
        self.plane.data().iter().filter(|&&w| w != 0).count()
    }

    /// Returns a borrowed view of the weights.
    pub fn view(&self) -> ImageView<'_, u8> {
        ImageView {
            data: self.plane.data(),
            width: self.plane.width(),
            height: self.plane.height(),
            stride: self.plane.width(),
        }
    }
}

pub(crate) fn sample_count(width: usize, height: usize, channels: usize) -> SlideMatchResult<usize> {
    if width == 0 || height == 0 {
        return Err(SlideMatchError::InvalidDimensions { width, height });
    }
    width
        .checked_mul(height)
        .and_then(|v| v.checked_mul(channels))
        .ok_or(SlideMatchError::InvalidDimensions { width, height })
}

/// Reserves room for exactly `len` elements without aborting on allocator
/// refusal; a refused reservation is reported against the requested extent.
pub(crate) fn try_alloc<T>(len: usize, width: usize, height: usize) -> SlideMatchResult<Vec<T>> {
    let mut out = Vec::new();
    out.try_reserve_exact(len)
        .map_err(|_| SlideMatchError::InvalidDimensions { width, height })?;
    Ok(out)
}
