//! Squared-difference kernels.

use crate::search::ScoreSurface;
use crate::util::{SlideMatchError, SlideMatchResult};
use crate::ImageView;

/// Kernel trait for scoring single placements and full scans.
pub trait Kernel {
    type Plan;

    /// Computes the raw score at a single placement (top-left coordinates).
    ///
    /// Returns `None` when the block does not fit at `(x, y)`.
    fn score_at(image: ImageView<'_, u8>, plan: &Self::Plan, x: usize, y: usize) -> Option<u64>;

    /// Scores every valid placement and returns the raw surface.
    fn scan_full(image: ImageView<'_, u8>, plan: &Self::Plan) -> SlideMatchResult<ScoreSurface>;
}

pub mod scalar;

#[cfg(feature = "rayon")]
pub mod rayon;

/// Returns the last valid top-left placement `(max_x, max_y)`.
pub(crate) fn placement_range(
    image: ImageView<'_, u8>,
    block_width: usize,
    block_height: usize,
) -> SlideMatchResult<(usize, usize)> {
    let bg_width = image.width();
    let bg_height = image.height();
    if bg_width < block_width || bg_height < block_height {
        return Err(SlideMatchError::BlockTooLarge {
            block_width,
            block_height,
            bg_width,
            bg_height,
        });
    }
    Ok((bg_width - block_width, bg_height - block_height))
}
