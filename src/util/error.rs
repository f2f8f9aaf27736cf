//! Error types for slidematch.

use thiserror::Error;

/// Result alias for slidematch operations.
pub type SlideMatchResult<T> = std::result::Result<T, SlideMatchError>;

/// Coarse classification of [`SlideMatchError`] values.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ErrorKind {
    /// The transport prefix (`<metadata>,`) is missing.
    MalformedPayload,
    /// The payload is not valid base64.
    Encoding,
    /// The bytes are not a decodable image.
    Decode,
    /// Sizes are non-positive or inconsistent.
    Dimension,
}

/// Errors that can occur while decoding, preprocessing, or matching.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum SlideMatchError {
    /// The payload has no `<metadata>,<payload>` delimiter.
    #[error("malformed payload: {reason}")]
    MalformedPayload { reason: &'static str },
    /// The payload is not valid base64.
    #[error("invalid base64 payload: {reason}")]
    Encoding { reason: String },
    /// The image bytes could not be decoded.
    #[error("failed to decode image: {reason}")]
    Decode { reason: String },
    /// Width or height is zero or overflows.
    #[error("invalid dimensions {width}x{height}")]
    InvalidDimensions { width: usize, height: usize },
    /// The block does not fit inside the background.
    #[error(
        "block {block_width}x{block_height} does not fit in background {bg_width}x{bg_height}"
    )]
    BlockTooLarge {
        block_width: usize,
        block_height: usize,
        bg_width: usize,
        bg_height: usize,
    },
    /// The mask and the block it belongs to have different sizes.
    #[error("mask {mask_width}x{mask_height} does not match block {block_width}x{block_height}")]
    MaskSizeMismatch {
        mask_width: usize,
        mask_height: usize,
        block_width: usize,
        block_height: usize,
    },
    /// The buffer is shorter than the declared geometry requires.
    #[error("buffer too small: needed {needed}, got {got}")]
    BufferTooSmall { needed: usize, got: usize },
    /// Stride is smaller than width.
    #[error("invalid stride {stride} for width {width}")]
    InvalidStride { width: usize, stride: usize },
    /// Channel count outside of 1, 3 or 4.
    #[error("unsupported channel count {channels}")]
    UnsupportedChannels { channels: usize },
}

impl SlideMatchError {
    /// Returns the coarse error class.
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::MalformedPayload { .. } => ErrorKind::MalformedPayload,
            Self::Encoding { .. } => ErrorKind::Encoding,
            Self::Decode { .. } => ErrorKind::Decode,
            Self::InvalidDimensions { .. }
            | Self::BlockTooLarge { .. }
            | Self::MaskSizeMismatch { .. }
            | Self::BufferTooSmall { .. }
            | Self::InvalidStride { .. }
            | Self::UnsupportedChannels { .. } => ErrorKind::Dimension,
        }
    }
}

impl From<base64::DecodeError> for SlideMatchError {
    fn from(err: base64::DecodeError) -> Self {
        Self::Encoding {
            reason: err.to_string(),
        }
    }
}

impl From<image::ImageError> for SlideMatchError {
    fn from(err: image::ImageError) -> Self {
        Self::Decode {
            reason: err.to_string(),
        }
    }
}
