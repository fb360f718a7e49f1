//! Image loading and binarization helpers shared by the pipeline stages.

use crate::error::Error;
use crate::Result;
use image::{GrayImage, RgbImage};
use imageproc::contrast::{equalize_histogram, otsu_level, threshold, ThresholdType};
use std::path::Path;

pub struct ImageOps;

impl ImageOps {
    /// Load a frame as grayscale.
    pub fn load_grayscale<P: AsRef<Path>>(path: P) -> Result<GrayImage> {
        let img = image::open(path.as_ref()).map_err(|source| Error::UnreadableFrame {
            path: path.as_ref().to_path_buf(),
            source,
        })?;
        Ok(img.to_luma8())
    }

    /// Load a frame as color, for visualization surfaces.
    pub fn load_color<P: AsRef<Path>>(path: P) -> Result<RgbImage> {
        let img = image::open(path.as_ref()).map_err(|source| Error::UnreadableFrame {
            path: path.as_ref().to_path_buf(),
            source,
        })?;
        Ok(img.to_rgb8())
    }

    /// Histogram-equalize a grayscale frame, applied before detection.
    pub fn equalize(image: &GrayImage) -> GrayImage {
        equalize_histogram(image)
    }

    /// Adaptive binarization to a {0, 255} mask.
    ///
    /// Each stage recomputes its own mask; none are shared. Otsu picks the
    /// level per image, there is no fixed fallback level.
    pub fn binarize(image: &GrayImage) -> GrayImage {
        if image.width() == 0 || image.height() == 0 {
            return image.clone();
        }
        let level = otsu_level(image);
        threshold(image, level, ThresholdType::Binary)
    }

    /// White pixels in one column of a {0, 255} mask.
    pub fn column_white_count(mask: &GrayImage, x: u32) -> u32 {
        (0..mask.height())
            .map(|y| u32::from(mask.get_pixel(x, y)[0]) / 255)
            .sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::Luma;

    #[test]
    fn binarize_keeps_a_two_level_image() {
        let mut img = GrayImage::new(8, 8);
        for x in 0..4 {
            for y in 0..8 {
                img.put_pixel(x, y, Luma([255]));
            }
        }
        let mask = ImageOps::binarize(&img);
        assert_eq!(mask.get_pixel(0, 0)[0], 255);
        assert_eq!(mask.get_pixel(7, 7)[0], 0);
    }

    #[test]
    fn column_white_count_divides_by_255() {
        let mut mask = GrayImage::new(3, 10);
        for y in 0..7 {
            mask.put_pixel(0, y, Luma([255]));
        }
        assert_eq!(ImageOps::column_white_count(&mask, 0), 7);
        assert_eq!(ImageOps::column_white_count(&mask, 2), 0);
    }

    #[test]
    fn unreadable_frame_is_a_typed_error() {
        let err = ImageOps::load_grayscale("definitely/not/here.png").unwrap_err();
        assert!(matches!(err, Error::UnreadableFrame { .. }));
    }
}
