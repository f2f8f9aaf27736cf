//! One-shot slider solving: preprocess both images, match, report the offset.

use crate::preprocess::{preprocess, preprocess_bytes, Preprocessed};
use crate::search::{MatchConfig, MatchCoordinate, Matcher};
use crate::template::SqdiffPlan;
use crate::trace::{stage, stage_event};
use crate::util::{SlideMatchError, SlideMatchResult};

/// Encoded image plus the working size it is resampled to.
#[derive(Clone, Debug)]
pub struct ImageInput<T> {
    /// Encoded image: a `"<metadata>,<base64>"` string or raw bytes.
    pub encoded: T,
    /// Target width in pixels.
    pub width: usize,
    /// Target height in pixels.
    pub height: usize,
}

/// Background and block for a single solve.
#[derive(Clone, Debug)]
pub struct SlideRequest<T> {
    pub background: ImageInput<T>,
    pub block: ImageInput<T>,
}

/// Result of a solve; `distance` is the horizontal offset reported to clients.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SlideSolution {
    /// Best placement in resized-background coordinates.
    pub coordinate: MatchCoordinate,
}

impl SlideSolution {
    /// Horizontal slider offset (`coordinate.x`).
    pub fn distance(&self) -> usize {
        self.coordinate.x
    }
}

/// Solves a request whose images are base64 payloads.
pub fn solve(request: &SlideRequest<String>, cfg: MatchConfig) -> SlideMatchResult<SlideSolution> {
    solve_with(request, cfg, |input| {
        preprocess(&input.encoded, input.width, input.height)
    })
}

/// Solves a request whose images are raw encoded bytes.
pub fn solve_bytes(
    request: &SlideRequest<Vec<u8>>,
    cfg: MatchConfig,
) -> SlideMatchResult<SlideSolution> {
    solve_with(request, cfg, |input| {
        preprocess_bytes(&input.encoded, input.width, input.height)
    })
}

fn solve_with<T, F>(
    request: &SlideRequest<T>,
    cfg: MatchConfig,
    prepare: F,
) -> SlideMatchResult<SlideSolution>
where
    F: Fn(&ImageInput<T>) -> SlideMatchResult<Preprocessed>,
{
    let _stage = stage!("solve");
    validate(&request.background)?;
    validate(&request.block)?;

    let block = prepare(&request.block)?;
    let mask = block.mask.as_ref().map(|m| m.view());
    let plan = SqdiffPlan::from_view(block.intensity.view()?, mask)?;
    drop(block);

    // The background's own alpha never constrains the search.
    let background = prepare(&request.background)?.intensity;
    let coordinate = Matcher::new()
        .with_config(cfg)
        .match_plan(background.view()?, &plan)?;
    stage_event!("solve", distance = coordinate.x);
    Ok(SlideSolution { coordinate })
}

fn validate<T>(input: &ImageInput<T>) -> SlideMatchResult<()> {
    if input.width == 0 || input.height == 0 {
        return Err(SlideMatchError::InvalidDimensions {
            width: input.width,
            height: input.height,
        });
    }
    Ok(())
}
