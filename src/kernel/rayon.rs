//! Rayon-parallel SQDIFF scan (feature-gated).
//!
//! Rows of the score surface are independent, so each worker fills whole
//! rows in place. Results are bit-identical to the scalar kernel.

use crate::kernel::placement_range;
use crate::kernel::scalar::scan_row;
use crate::search::ScoreSurface;
use crate::template::SqdiffPlan;
use crate::util::SlideMatchResult;
use crate::ImageView;
use rayon::prelude::*;

/// Row-parallel full scan for the masked SQDIFF kernel.
pub fn sqdiff_scan_full_par(
    image: ImageView<'_, u8>,
    plan: &SqdiffPlan,
) -> SlideMatchResult<ScoreSurface> {
    let (max_x, max_y) = placement_range(image, plan.width(), plan.height())?;
    let mut surface = ScoreSurface::zeros(max_x + 1, max_y + 1)?;
    let width = surface.width();

    surface
        .as_mut_slice()
        .par_chunks_mut(width)
        .enumerate()
        .try_for_each(|(y, row)| scan_row(image, plan, y, row))?;

    Ok(surface)
}
