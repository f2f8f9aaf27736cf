//! Score surfaces: one score per candidate block placement.

use crate::image::buffer::try_alloc;
use crate::util::{SlideMatchError, SlideMatchResult};

/// Row-major grid of placement scores; cell `(x, y)` is the block's top-left at `(x, y)`.
#[derive(Clone, Debug, PartialEq)]
pub struct ScoreSurface {
    width: usize,
    height: usize,
    scores: Vec<f64>,
}

impl ScoreSurface {
    pub(crate) fn zeros(width: usize, height: usize) -> SlideMatchResult<Self> {
        let len = width
            .checked_mul(height)
            .filter(|&len| len > 0)
            .ok_or(SlideMatchError::InvalidDimensions { width, height })?;
        let mut scores = try_alloc(len, width, height)?;
        scores.resize(len, 0.0);
        Ok(Self {
            width,
            height,
            scores,
        })
    }

    /// Wraps precomputed scores laid out row-major.
    pub fn from_scores(scores: Vec<f64>, width: usize, height: usize) -> SlideMatchResult<Self> {
        let mut surface = Self::zeros(width, height)?;
        if scores.len() != surface.scores.len() {
            return Err(SlideMatchError::BufferTooSmall {
                needed: surface.scores.len(),
                got: scores.len(),
            });
        }
        surface.scores = scores;
        Ok(surface)
    }

    /// Number of horizontal placements.
    pub fn width(&self) -> usize {
        self.width
    }

    /// Number of vertical placements.
    pub fn height(&self) -> usize {
        self.height
    }

    /// Returns all scores in row-major order.
    pub fn as_slice(&self) -> &[f64] {
        &self.scores
    }

    #[cfg(feature = "rayon")]
    pub(crate) fn as_mut_slice(&mut self) -> &mut [f64] {
        &mut self.scores
    }

    pub(crate) fn row_mut(&mut self, y: usize) -> &mut [f64] {
        let start = y * self.width;
        &mut self.scores[start..start + self.width]
    }

    /// Returns the score at placement `(x, y)`.
    pub fn get(&self, x: usize, y: usize) -> Option<f64> {
        if x >= self.width || y >= self.height {
            return None;
        }
        self.scores.get(y * self.width + x).copied()
    }

    /// Returns `(min, max)` over all cells.
    pub fn min_max(&self) -> (f64, f64) {
        self.scores
            .iter()
            .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), &s| {
                (lo.min(s), hi.max(s))
            })
    }

    /// Rescales scores to `[0, 1]` with min-max normalization.
    ///
    /// A flat surface (`max == min`) becomes all zeros.
    pub fn normalize_min_max(&mut self) {
        let (lo, hi) = self.min_max();
        let range = hi - lo;
        if range > 0.0 {
            // Division (not 1/range scaling) keeps the maximum at exactly 1.0.
            for s in self.scores.iter_mut() {
                *s = (*s - lo) / range;
            }
        } else {
            self.scores.iter_mut().for_each(|s| *s = 0.0);
        }
    }

    /// Returns the first minimum in row-major order as `(x, y, score)`.
    pub fn min_location(&self) -> (usize, usize, f64) {
        let mut best_idx = 0usize;
        let mut best = self.scores[0];
        for (idx, &score) in self.scores.iter().enumerate().skip(1) {
            if score < best {
                best = score;
                best_idx = idx;
            }
        }
        (best_idx % self.width, best_idx / self.width, best)
    }
}

#[cfg(test)]
mod tests {
    use super::ScoreSurface;

    #[test]
    fn normalization_spans_unit_interval() {
        let mut surface = ScoreSurface::from_scores(vec![4.0, 8.0, 6.0, 12.0], 2, 2).unwrap();
        surface.normalize_min_max();
        assert_eq!(surface.as_slice(), &[0.0, 0.5, 0.25, 1.0]);
        assert_eq!(surface.min_max(), (0.0, 1.0));
    }

    #[test]
    fn flat_surface_normalizes_to_zero() {
        let mut surface = ScoreSurface::from_scores(vec![3.0; 6], 3, 2).unwrap();
        surface.normalize_min_max();
        assert!(surface.as_slice().iter().all(|&s| s == 0.0));
        assert_eq!(surface.min_location(), (0, 0, 0.0));
    }

    #[test]
    fn min_location_prefers_first_in_row_major_order() {
        let surface =
            ScoreSurface::from_scores(vec![5.0, 1.0, 3.0, 2.0, 1.0, 1.0], 3, 2).unwrap();
        assert_eq!(surface.min_location(), (1, 0, 1.0));
    }

    #[test]
    fn from_scores_checks_length() {
        assert!(ScoreSurface::from_scores(vec![0.0; 3], 2, 2).is_err());
        assert!(ScoreSurface::from_scores(Vec::new(), 0, 0).is_err());
    }
}
