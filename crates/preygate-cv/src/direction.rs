//! Left/right travel-direction heuristic.

use crate::utils::ImageOps;
use image::GrayImage;
use log::debug;
use preygate_core::{direction_from_counts, Direction, DIRECTION_MARGIN};
use serde::{Deserialize, Serialize};

/// Compares the white-pixel density of the two edge columns of the
/// binarized region. When the animal is partially out of frame it is most
/// likely heading toward the side with more body mass.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DirectionEstimator {
    /// Minimum column difference before a side is called.
    pub margin: u32,
}

impl Default for DirectionEstimator {
    fn default() -> Self {
        Self {
            margin: DIRECTION_MARGIN,
        }
    }
}

impl DirectionEstimator {
    /// Estimate the travel direction for a sub-image. Binarizes on its
    /// own; masks are never shared between stages.
    pub fn estimate(&self, sub: &GrayImage) -> Direction {
        if sub.width() == 0 || sub.height() == 0 {
            return Direction::Unknown;
        }
        self.estimate_mask(&ImageOps::binarize(sub))
    }

    /// Estimate from an existing {0, 255} mask.
    pub fn estimate_mask(&self, mask: &GrayImage) -> Direction {
        if mask.width() == 0 || mask.height() == 0 {
            return Direction::Unknown;
        }
        let left = ImageOps::column_white_count(mask, 0);
        let right = ImageOps::column_white_count(mask, mask.width() - 1);
        debug!("white pixel counts => left {}, right {}", left, right);
        direction_from_counts(left, right, self.margin)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::Luma;

    fn mask_with_columns(left_white: u32, right_white: u32) -> GrayImage {
        let mut mask = GrayImage::new(10, 120);
        for y in 0..left_white {
            mask.put_pixel(0, y, Luma([255]));
        }
        for y in 0..right_white {
            mask.put_pixel(9, y, Luma([255]));
        }
        mask
    }

    #[test]
    fn heavier_left_column_means_left() {
        let est = DirectionEstimator::default();
        assert_eq!(
            est.estimate_mask(&mask_with_columns(100, 50)),
            Direction::Left
        );
    }

    #[test]
    fn difference_within_margin_is_unknown() {
        let est = DirectionEstimator::default();
        assert_eq!(
            est.estimate_mask(&mask_with_columns(50, 74)),
            Direction::Unknown
        );
        assert_eq!(
            est.estimate_mask(&mask_with_columns(50, 76)),
            Direction::Right
        );
    }

    #[test]
    fn estimate_binarizes_on_its_own() {
        let est = DirectionEstimator::default();
        // raw grayscale, not yet a mask: bright left edge, dark elsewhere
        let mut sub = GrayImage::new(10, 120);
        for y in 0..100 {
            sub.put_pixel(0, y, Luma([200]));
        }
        assert_eq!(est.estimate(&sub), Direction::Left);
    }
}
