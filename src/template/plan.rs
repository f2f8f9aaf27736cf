//! Precomputed block data for masked sum-of-squared-differences.

use crate::image::ImageView;
use crate::util::{SlideMatchError, SlideMatchResult};

/// Contiguous block samples plus the per-pixel inclusion flags of its mask.
#[derive(Clone, Debug)]
pub struct SqdiffPlan {
    width: usize,
    height: usize,
    data: Vec<u8>,
    include: Option<Vec<bool>>,
}

impl SqdiffPlan {
    /// Builds a plan from a block view and an optional mask of the same size.
    ///
    /// Mask samples equal to zero exclude the pixel; any other value includes it.
    pub fn from_view(
        block: ImageView<'_, u8>,
        mask: Option<ImageView<'_, u8>>,
    ) -> SlideMatchResult<Self> {
        let width = block.width();
        let height = block.height();
        let data = copy_rows(block)?;

        let include = match mask {
            None => None,
            Some(mask) => {
                if !mask.same_size(&block) {
                    return Err(SlideMatchError::MaskSizeMismatch {
                        mask_width: mask.width(),
                        mask_height: mask.height(),
                        block_width: width,
                        block_height: height,
                    });
                }
                Some(copy_rows(mask)?.into_iter().map(|w| w != 0).collect())
            }
        };

        Ok(Self {
            width,
            height,
            data,
            include,
        })
    }

    /// Returns the block width in pixels.
    pub fn width(&self) -> usize {
        self.width
    }

    /// Returns the block height in pixels.
    pub fn height(&self) -> usize {
        self.height
    }

    /// Returns the block samples in row-major order.
    pub fn data(&self) -> &[u8] {
        &self.data
    }

    /// Returns the inclusion flags, `None` when every pixel counts.
    pub fn include(&self) -> Option<&[bool]> {
        self.include.as_deref()
    }

    /// Number of pixels that contribute to the score.
    pub fn active(&self) -> usize {
        match &self.include {
            Some(flags) => flags.iter().filter(|&&on| on).count(),
            None => self.data.len(),
        }
    }
}

fn copy_rows(view: ImageView<'_, u8>) -> SlideMatchResult<Vec<u8>> {
    let mut out = Vec::with_capacity(view.width() * view.height());
    for y in 0..view.height() {
        let row = view.row(y).ok_or(SlideMatchError::BufferTooSmall {
            needed: (y + 1) * view.stride(),
            got: view.as_slice().len(),
        })?;
        out.extend_from_slice(row);
    }
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::SqdiffPlan;
    use crate::image::ImageView;
    use crate::util::SlideMatchError;

    #[test]
    fn plan_copies_strided_rows() {
        let data = [1u8, 2, 99, 3, 4, 99];
        let view = ImageView::new(&data, 2, 2, 3).unwrap();
        let plan = SqdiffPlan::from_view(view, None).unwrap();
        assert_eq!(plan.data(), &[1, 2, 3, 4]);
        assert_eq!(plan.active(), 4);
        assert!(plan.include().is_none());
    }

    #[test]
    fn plan_counts_masked_pixels() {
        let block = [0u8; 4];
        let mask = [0u8, 255, 1, 0];
        let plan = SqdiffPlan::from_view(
            ImageView::from_slice(&block, 2, 2).unwrap(),
            Some(ImageView::from_slice(&mask, 2, 2).unwrap()),
        )
        .unwrap();
        assert_eq!(plan.include().unwrap(), &[false, true, true, false]);
        assert_eq!(plan.active(), 2);
    }

    #[test]
    fn plan_rejects_mismatched_mask() {
        let block = [0u8; 4];
        let mask = [0u8; 6];
        let err = SqdiffPlan::from_view(
            ImageView::from_slice(&block, 2, 2).unwrap(),
            Some(ImageView::from_slice(&mask, 3, 2).unwrap()),
        )
        .unwrap_err();
        assert_eq!(
            err,
            SlideMatchError::MaskSizeMismatch {
                mask_width: 3,
                mask_height: 2,
                block_width: 2,
                block_height: 2,
            }
        );
    }
}
