//! Scalar reference kernel for masked SQDIFF.

use crate::kernel::{placement_range, Kernel};
use crate::search::ScoreSurface;
use crate::template::SqdiffPlan;
use crate::util::{SlideMatchError, SlideMatchResult};
use crate::ImageView;

/// Scalar masked sum-of-squared-differences kernel.
///
/// Differences are accumulated in integers, so scores are exact and ties
/// compare equal.
pub struct SqdiffScalar;

#[inline]
fn sq(a: u8, b: u8) -> u64 {
    let d = i32::from(a) - i32::from(b);
    (d * d) as u64
}

/// Sum of squared differences for the block placed at `(x, y)`.
pub(crate) fn placement_sse(
    image: ImageView<'_, u8>,
    plan: &SqdiffPlan,
    x: usize,
    y: usize,
) -> Option<u64> {
    let width = plan.width();
    let data = plan.data();
    let mut sse = 0u64;
    for ty in 0..plan.height() {
        let img_row = image.row(y + ty)?.get(x..x + width)?;
        let base = ty * width;
        let tpl_row = &data[base..base + width];
        match plan.include() {
            Some(include) => {
                let flags = &include[base..base + width];
                for ((&value, &tpl), &on) in img_row.iter().zip(tpl_row).zip(flags) {
                    if on {
                        sse += sq(value, tpl);
                    }
                }
            }
            None => {
                for (&value, &tpl) in img_row.iter().zip(tpl_row) {
                    sse += sq(value, tpl);
                }
            }
        }
    }
    Some(sse)
}

/// Scores one row of placements into `out` (length `max_x + 1`).
pub(crate) fn scan_row(
    image: ImageView<'_, u8>,
    plan: &SqdiffPlan,
    y: usize,
    out: &mut [f64],
) -> SlideMatchResult<()> {
    for (x, cell) in out.iter_mut().enumerate() {
        let sse = placement_sse(image, plan, x, y).ok_or(SlideMatchError::BufferTooSmall {
            needed: (y + plan.height()) * image.stride(),
            got: image.as_slice().len(),
        })?;
        *cell = sse as f64;
    }
    Ok(())
}

impl Kernel for SqdiffScalar {
    type Plan = SqdiffPlan;

    fn score_at(image: ImageView<'_, u8>, plan: &Self::Plan, x: usize, y: usize) -> Option<u64> {
        let (max_x, max_y) = placement_range(image, plan.width(), plan.height()).ok()?;
        if x > max_x || y > max_y {
            return None;
        }
        placement_sse(image, plan, x, y)
    }

    fn scan_full(image: ImageView<'_, u8>, plan: &Self::Plan) -> SlideMatchResult<ScoreSurface> {
        let (max_x, max_y) = placement_range(image, plan.width(), plan.height())?;
        let mut surface = ScoreSurface::zeros(max_x + 1, max_y + 1)?;
        for y in 0..=max_y {
            scan_row(image, plan, y, surface.row_mut(y))?;
        }
        Ok(surface)
    }
}
