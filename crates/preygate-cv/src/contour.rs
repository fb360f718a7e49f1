//! Contour-based blob counting with an adaptive re-segmentation retry.

use crate::utils::ImageOps;
use image::{GrayImage, Luma};
use imageproc::contours::{find_contours, Contour};
use imageproc::morphology::{grayscale_erode, grayscale_open, Mask};
use imageproc::point::Point;
use log::debug;
use preygate_core::{significant_count, MIN_CONTOUR_AREA};
use serde::{Deserialize, Serialize};

/// Result of counting blobs in one region.
#[derive(Debug, Clone)]
pub struct ContourReport {
    /// Traced borders from the pass that produced the final count.
    pub contours: Vec<Contour<i32>>,
    /// Border areas in traversal order, significant or not.
    pub areas: Vec<f64>,
    /// Number of significant blobs.
    pub count: usize,
    /// Exactly one significant blob was found: the silhouette with nothing
    /// split off from it.
    pub prey_present: bool,
    /// The morphological retry pass ran.
    pub retried: bool,
}

/// Counts significant blobs in a binarized region, retrying once with a
/// morphological correction when the count is ambiguous.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ContourCounter {
    /// Noise floor for blob areas.
    pub min_area: f64,
    /// Edge length of the square erosion kernel used by the retry pass.
    pub erode_size: u32,
    /// Height of the 1-wide opening kernel used by the retry pass.
    pub open_height: u32,
}

impl Default for ContourCounter {
    fn default() -> Self {
        Self {
            min_area: MIN_CONTOUR_AREA,
            erode_size: 12,
            open_height: 5,
        }
    }
}

impl ContourCounter {
    /// Binarize `sub` and count its significant contours.
    pub fn count_region(&self, sub: &GrayImage) -> ContourReport {
        self.count_mask(&ImageOps::binarize(sub))
    }

    /// Count significant contours of an existing {0, 255} mask.
    ///
    /// A single significant contour may mean a carried object is touching
    /// the silhouette without a separating gap, for example prey that does
    /// not hang low enough to clear the body. That case re-runs the count
    /// after an erode and open pass tuned to break thin connections while
    /// larger blobs survive; the retried count is the one reported. Counts
    /// of zero or two and more stand as they are.
    pub fn count_mask(&self, mask: &GrayImage) -> ContourReport {
        let (contours, areas, count) = self.single_pass(mask);

        if count == 1 {
            debug!("got only one contour, morphing");
            let corrected = self.morph(mask);
            let (contours, areas, count) = self.single_pass(&corrected);
            return ContourReport {
                contours,
                areas,
                count,
                prey_present: count == 1,
                retried: true,
            };
        }

        ContourReport {
            contours,
            areas,
            count,
            prey_present: count == 1,
            retried: false,
        }
    }

    /// Full contour hierarchy of the mask, without polyline
    /// simplification, with the per-border areas and the significant
    /// count.
    fn single_pass(&self, mask: &GrayImage) -> (Vec<Contour<i32>>, Vec<f64>, usize) {
        let contours = find_contours::<i32>(mask);
        let areas: Vec<f64> = contours
            .iter()
            .map(|contour| contour_area(&contour.points))
            .collect();
        for area in &areas {
            debug!(
                "   area {:.1}{}",
                area,
                if *area > self.min_area { "" } else { " (too small)" }
            );
        }
        let count = significant_count(&areas, self.min_area);
        (contours, areas, count)
    }

    /// Erode with the square kernel, then open with the tall 1-wide
    /// kernel.
    fn morph(&self, mask: &GrayImage) -> GrayImage {
        let square = solid_mask(self.erode_size, self.erode_size);
        let tall = solid_mask(1, self.open_height);
        let eroded = grayscale_erode(mask, &square);
        grayscale_open(&eroded, &tall)
    }
}

/// Structuring element: an all-foreground rectangle anchored at its
/// center.
fn solid_mask(width: u32, height: u32) -> Mask {
    let kernel = GrayImage::from_pixel(width, height, Luma([255u8]));
    Mask::from_image(&kernel, (width / 2) as u8, (height / 2) as u8)
}

/// Shoelace area of a traced border polygon.
pub fn contour_area(points: &[Point<i32>]) -> f64 {
    if points.len() < 3 {
        return 0.0;
    }
    let mut twice_area = 0i64;
    for (i, p) in points.iter().enumerate() {
        let q = points[(i + 1) % points.len()];
        twice_area += i64::from(p.x) * i64::from(q.y) - i64::from(q.x) * i64::from(p.y);
    }
    twice_area.abs() as f64 / 2.0
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fill_rect(mask: &mut GrayImage, x: u32, y: u32, w: u32, h: u32) {
        for dx in 0..w {
            for dy in 0..h {
                mask.put_pixel(x + dx, y + dy, Luma([255]));
            }
        }
    }

    #[test]
    fn two_separate_blobs_count_without_retry() {
        let mut mask = GrayImage::new(60, 40);
        fill_rect(&mut mask, 5, 5, 10, 10);
        fill_rect(&mut mask, 35, 20, 10, 10);

        let report = ContourCounter::default().count_mask(&mask);
        assert_eq!(report.count, 2);
        assert!(!report.retried);
        assert!(!report.prey_present);
    }

    #[test]
    fn tiny_blob_is_below_the_noise_floor() {
        // a 3x3 block traces to a border of area 4, under the floor of 10
        let mut mask = GrayImage::new(30, 30);
        fill_rect(&mut mask, 10, 10, 3, 3);

        let report = ContourCounter::default().count_mask(&mask);
        assert_eq!(report.count, 0);
        assert!(!report.retried);
        assert!(!report.prey_present);
    }

    #[test]
    fn empty_mask_does_not_retry() {
        let report = ContourCounter::default().count_mask(&GrayImage::new(40, 40));
        assert_eq!(report.count, 0);
        assert!(!report.retried);
    }

    #[test]
    fn thin_bridge_splits_on_retry() {
        // two large blocks joined by a one-pixel bridge: a single contour
        // on the first pass, two after the morphological correction
        let mut mask = GrayImage::new(100, 60);
        fill_rect(&mut mask, 5, 15, 30, 30);
        fill_rect(&mut mask, 65, 15, 30, 30);
        fill_rect(&mut mask, 35, 29, 30, 1);

        let report = ContourCounter::default().count_mask(&mask);
        assert!(report.retried);
        assert_eq!(report.count, 2);
        assert!(!report.prey_present);
    }

    #[test]
    fn lone_blob_survives_retry_as_prey() {
        let mut mask = GrayImage::new(60, 60);
        fill_rect(&mut mask, 15, 15, 30, 30);

        let report = ContourCounter::default().count_mask(&mask);
        assert!(report.retried);
        assert_eq!(report.count, 1);
        assert!(report.prey_present);
    }

    #[test]
    fn counting_is_deterministic() {
        let mut mask = GrayImage::new(100, 60);
        fill_rect(&mut mask, 5, 15, 30, 30);
        fill_rect(&mut mask, 65, 15, 30, 30);
        fill_rect(&mut mask, 35, 29, 30, 1);

        let counter = ContourCounter::default();
        let first = counter.count_mask(&mask);
        let second = counter.count_mask(&mask);
        assert_eq!(first.count, second.count);
        assert_eq!(first.retried, second.retried);
        assert_eq!(first.areas, second.areas);
    }

    #[test]
    fn shoelace_area_of_a_square_ring() {
        let points = [
            Point::new(0, 0),
            Point::new(9, 0),
            Point::new(9, 9),
            Point::new(0, 9),
        ];
        assert_eq!(contour_area(&points), 81.0);
        assert_eq!(contour_area(&points[..2]), 0.0);
    }
}
