//! Two-orientation template matching with a score-based flip fallback.

use super::{MatchOrientation, SnoutTemplate};
use crate::utils::ImageOps;
use image::GrayImage;
use imageproc::template_matching::{match_template, MatchTemplateMethod};
use log::debug;
use serde::{Deserialize, Serialize};

/// Best correlation found for one orientation of the template.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MatchResult {
    /// Normalized cross-correlation score; 1.0 is a perfect match.
    pub score: f32,
    pub top_left: (u32, u32),
    /// `top_left` offset by the template size.
    pub bottom_right: (u32, u32),
    pub orientation: MatchOrientation,
}

/// Scores a sub-image against the snout reference in up to two
/// orientations, keeping the better one. Stateless and independent per
/// region.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TemplateMatcher {
    /// Minimum correlation score for an accepted match.
    pub accept_threshold: f32,
}

impl Default for TemplateMatcher {
    fn default() -> Self {
        Self {
            accept_threshold: 0.8,
        }
    }
}

impl TemplateMatcher {
    /// Match `sub` against the reference. The flipped orientation is only
    /// evaluated when the normal score misses the acceptance threshold,
    /// and only adopted when it scores strictly higher; the returned score
    /// is the larger of the two evaluated. `None` when the sub-image is
    /// smaller than the template in either dimension, in which case
    /// nothing can be scored.
    pub fn match_region(&self, sub: &GrayImage, template: &SnoutTemplate) -> Option<MatchResult> {
        let (tw, th) = template.dimensions();
        if tw == 0 || th == 0 || sub.width() < tw || sub.height() < th {
            debug!(
                "sub-image {}x{} cannot fit template {}x{}, skipping match",
                sub.width(),
                sub.height(),
                tw,
                th
            );
            return None;
        }

        let mask = ImageOps::binarize(sub);

        let normal = self.best_correlation(&mask, &template.image, MatchOrientation::Normal);
        if normal.score >= self.accept_threshold {
            return Some(normal);
        }

        debug!("normal score {:.3} too low, flipping", normal.score);
        let flipped = self.best_correlation(&mask, &template.flipped, MatchOrientation::Flipped);
        if flipped.score > normal.score {
            debug!(
                "  flipped is better {:.3} > {:.3}",
                flipped.score, normal.score
            );
            Some(flipped)
        } else {
            Some(normal)
        }
    }

    /// Whether a result clears the acceptance threshold.
    pub fn accepted(&self, result: &MatchResult) -> bool {
        result.score >= self.accept_threshold
    }

    /// Global maximum of the normalized cross-correlation surface for one
    /// orientation. Windows with no foreground pixels make the normalized
    /// score undefined; those cells are skipped.
    fn best_correlation(
        &self,
        mask: &GrayImage,
        template: &GrayImage,
        orientation: MatchOrientation,
    ) -> MatchResult {
        let surface = match_template(
            mask,
            template,
            MatchTemplateMethod::CrossCorrelationNormalized,
        );

        // -1.0 is the floor of the correlation range
        let mut best_score = -1.0f32;
        let mut best = (0u32, 0u32);
        for (x, y, pixel) in surface.enumerate_pixels() {
            let score = pixel[0];
            if score.is_finite() && score > best_score {
                best_score = score;
                best = (x, y);
            }
        }

        let (tw, th) = template.dimensions();
        MatchResult {
            score: best_score,
            top_left: best,
            bottom_right: (best.0 + tw, best.1 + th),
            orientation,
        }
    }
}
