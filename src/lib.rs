//! SlideMatch locates a puzzle-piece block inside a background image.
//!
//! The pipeline decodes both images, resamples them with nearest-neighbor
//! interpolation, converts them to intensity, derives a mask from the block's
//! alpha channel and runs a masked SQDIFF search. The best placement's `x` is
//! the slider distance. Row-parallel scoring is available via the `rayon`
//! feature.

pub mod codec;
pub mod image;
pub mod kernel;
pub mod pipeline;
pub mod preprocess;
pub mod search;
pub mod template;
mod trace;
pub mod util;

pub use codec::{decode_base64_image, decode_image, decode_payload};
pub use crate::image::{ImageView, Mask, PixelBuffer};
pub use kernel::Kernel;
pub use pipeline::{solve, solve_bytes, ImageInput, SlideRequest, SlideSolution};
pub use preprocess::{preprocess, preprocess_bytes, Preprocessed};
pub use search::{match_block, MatchConfig, MatchCoordinate, Matcher, ScoreSurface};
pub use template::SqdiffPlan;
pub use util::{ErrorKind, SlideMatchError, SlideMatchResult};
