//! Block search over a background image.
//!
//! [`Matcher`] scores every placement with masked SQDIFF, min-max normalizes
//! the surface and reports the first global minimum in row-major order.

mod surface;

pub use surface::ScoreSurface;

use crate::image::{ImageView, Mask, PixelBuffer};
use crate::kernel::scalar::SqdiffScalar;
use crate::kernel::Kernel;
use crate::template::SqdiffPlan;
use crate::trace::{stage, stage_event};
use crate::util::SlideMatchResult;

/// Top-left pixel of the best placement, in background coordinates.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct MatchCoordinate {
    /// Column of the block's left edge.
    pub x: usize,
    /// Row of the block's top edge.
    pub y: usize,
}

/// Configuration for the search.
#[derive(Clone, Copy, Debug, Default)]
pub struct MatchConfig {
    /// Score rows in parallel (requires the `rayon` feature, ignored otherwise).
    pub parallel: bool,
}

/// Stateless block matcher.
#[derive(Clone, Debug, Default)]
pub struct Matcher {
    cfg: MatchConfig,
}

impl Matcher {
    /// Creates a matcher with default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Replaces the configuration.
    pub fn with_config(mut self, cfg: MatchConfig) -> Self {
        self.cfg = cfg;
        self
    }

    /// Returns the active configuration.
    pub fn config(&self) -> &MatchConfig {
        &self.cfg
    }

    /// Computes the raw (unnormalized) SQDIFF surface.
    pub fn score_surface(
        &self,
        background: ImageView<'_, u8>,
        plan: &SqdiffPlan,
    ) -> SlideMatchResult<ScoreSurface> {
        #[cfg(feature = "rayon")]
        if self.cfg.parallel {
            return crate::kernel::rayon::sqdiff_scan_full_par(background, plan);
        }
        SqdiffScalar::scan_full(background, plan)
    }

    /// Finds the best placement of a prepared block.
    pub fn match_plan(
        &self,
        background: ImageView<'_, u8>,
        plan: &SqdiffPlan,
    ) -> SlideMatchResult<MatchCoordinate> {
        let _stage = stage!(
            "match_block",
            bg_width = background.width(),
            bg_height = background.height(),
            block_width = plan.width(),
            block_height = plan.height()
        );

        let mut surface = self.score_surface(background, plan)?;
        surface.normalize_min_max();
        let (x, y, _) = surface.min_location();
        stage_event!(
            "match_block",
            surface_width = surface.width(),
            surface_height = surface.height(),
            active = plan.active(),
            x = x,
            y = y
        );
        Ok(MatchCoordinate { x, y })
    }

    /// Finds the best placement of `block` in `background`, honoring `mask`.
    pub fn match_block(
        &self,
        background: ImageView<'_, u8>,
        block: ImageView<'_, u8>,
        mask: Option<ImageView<'_, u8>>,
    ) -> SlideMatchResult<MatchCoordinate> {
        let plan = SqdiffPlan::from_view(block, mask)?;
        self.match_plan(background, &plan)
    }
}

/// Matches single-channel buffers with the default configuration.
pub fn match_block(
    background: &PixelBuffer,
    block: &PixelBuffer,
    mask: Option<&Mask>,
) -> SlideMatchResult<MatchCoordinate> {
    Matcher::new().match_block(background.view()?, block.view()?, mask.map(Mask::view))
}
