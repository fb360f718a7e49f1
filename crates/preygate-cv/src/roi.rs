//! Region-of-interest preprocessing ahead of matching and counting.

use crate::bbox::BoundingBox;
use image::GrayImage;
use serde::{Deserialize, Serialize};

/// Turns a detector box into the working sub-image handed to the template
/// matcher, the contour counter and the direction estimator. Pure
/// transform, no side effects.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegionPreprocessor {
    /// Extra pixels kept to the left of the box, so a carried object still
    /// has white margin around it for the contour analysis.
    pub left_margin: i32,
}

impl Default for RegionPreprocessor {
    fn default() -> Self {
        Self { left_margin: 30 }
    }
}

impl RegionPreprocessor {
    /// The working region for a detection: extended `left_margin` to the
    /// left (clamped at 0), and restricted to the lower part of the box by
    /// shifting the top edge down by half the original box width. The
    /// vertical cut keeps the head and ears out of the contour analysis,
    /// which otherwise produce false blobs near the frame edge.
    pub fn roi_box(&self, bbox: &BoundingBox) -> BoundingBox {
        let shift = bbox.width() / 2;
        BoundingBox::new(
            (bbox.x1 - self.left_margin).max(0),
            bbox.y1 + shift,
            bbox.x2,
            bbox.y2,
        )
    }

    /// Extract the sub-image for `bbox` from `frame`, together with the
    /// clamped region it was cut from. `None` when the region degenerates
    /// to nothing; callers treat that as zero significant contours and
    /// direction unknown.
    pub fn prepare(&self, frame: &GrayImage, bbox: &BoundingBox) -> Option<(BoundingBox, GrayImage)> {
        let roi = self
            .roi_box(bbox)
            .clamp_to(frame.width(), frame.height());
        if roi.is_empty() {
            return None;
        }
        let sub = image::imageops::crop_imm(
            frame,
            roi.x1 as u32,
            roi.y1 as u32,
            roi.width() as u32,
            roi.height() as u32,
        )
        .to_image();
        Some((roi, sub))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn roi_extends_left_and_cuts_upper_half() {
        let pre = RegionPreprocessor::default();
        let bbox = BoundingBox::new(100, 10, 200, 90);
        // width 100: top edge shifts down by 50, left edge extends by 30
        assert_eq!(pre.roi_box(&bbox), BoundingBox::new(70, 60, 200, 90));
    }

    #[test]
    fn left_extension_clamps_at_zero() {
        let pre = RegionPreprocessor::default();
        let bbox = BoundingBox::new(10, 0, 40, 100);
        assert_eq!(pre.roi_box(&bbox), BoundingBox::new(0, 15, 40, 100));
    }

    #[test]
    fn prepare_crops_the_expected_extent() {
        let pre = RegionPreprocessor::default();
        let frame = GrayImage::new(300, 300);
        let bbox = BoundingBox::new(100, 10, 200, 90);
        let (roi, sub) = pre.prepare(&frame, &bbox).unwrap();
        assert_eq!(roi, BoundingBox::new(70, 60, 200, 90));
        assert_eq!(sub.dimensions(), (130, 30));
    }

    #[test]
    fn wide_shallow_box_degenerates() {
        let pre = RegionPreprocessor::default();
        let frame = GrayImage::new(300, 300);
        // width 200: the half-width shift pushes the top edge past the bottom
        let bbox = BoundingBox::new(0, 0, 200, 90);
        assert!(pre.prepare(&frame, &bbox).is_none());
    }
}
