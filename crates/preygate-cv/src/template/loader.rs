//! Loading and preparing the snout reference template.

use crate::error::Error;
use crate::Result;
use image::{imageops, GrayImage};
use imageproc::contours::{find_contours, Contour};
use imageproc::contrast::{threshold, ThresholdType};
use std::path::Path;

/// Fixed binarization level for the reference image. The template was
/// authored against a plain binary threshold, without Otsu.
const TEMPLATE_THRESHOLD: u8 = 90;

/// A binarized snout reference, its horizontal mirror, and the contour
/// outlines of both orientations. Both are fixed for a run; the contour
/// sets exist only for overlay drawing.
#[derive(Debug, Clone)]
pub struct SnoutTemplate {
    pub image: GrayImage,
    pub flipped: GrayImage,
    pub contours: Vec<Contour<i32>>,
    pub flipped_contours: Vec<Contour<i32>>,
}

impl SnoutTemplate {
    /// Load and prepare a reference image from disk.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let gray = image::open(path.as_ref())
            .map_err(|source| Error::Template {
                path: path.as_ref().to_path_buf(),
                source,
            })?
            .to_luma8();
        Ok(Self::from_grayscale(&gray))
    }

    /// Prepare a template from an already decoded grayscale image.
    pub fn from_grayscale(gray: &GrayImage) -> Self {
        let image = threshold(gray, TEMPLATE_THRESHOLD, ThresholdType::Binary);
        let flipped = imageops::flip_horizontal(&image);
        let contours = find_contours(&image);
        let flipped_contours = find_contours(&flipped);
        Self {
            image,
            flipped,
            contours,
            flipped_contours,
        }
    }

    pub fn dimensions(&self) -> (u32, u32) {
        self.image.dimensions()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::Luma;

    #[test]
    fn fixed_threshold_separates_at_ninety() {
        let mut gray = GrayImage::new(2, 1);
        gray.put_pixel(0, 0, Luma([100]));
        gray.put_pixel(1, 0, Luma([80]));

        let template = SnoutTemplate::from_grayscale(&gray);
        assert_eq!(template.image.get_pixel(0, 0)[0], 255);
        assert_eq!(template.image.get_pixel(1, 0)[0], 0);
    }

    #[test]
    fn mirror_is_horizontal() {
        let mut gray = GrayImage::new(2, 1);
        gray.put_pixel(0, 0, Luma([255]));

        let template = SnoutTemplate::from_grayscale(&gray);
        assert_eq!(template.flipped.get_pixel(0, 0)[0], 0);
        assert_eq!(template.flipped.get_pixel(1, 0)[0], 255);
    }

    #[test]
    fn missing_file_is_a_typed_error() {
        let err = SnoutTemplate::load("no/such/snout.png").unwrap_err();
        assert!(matches!(err, Error::Template { .. }));
    }
}
