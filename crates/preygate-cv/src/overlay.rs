//! Visualization sinks.
//!
//! Drawing is reporting only. The pipeline produces identical verdicts
//! whether calls land on an image, nowhere, or a recording sink in tests.

use crate::bbox::BoundingBox;
use crate::traits::OverlaySink;
use image::{Rgb, RgbImage};
use imageproc::drawing::draw_hollow_rect_mut;
use imageproc::point::Point;
use imageproc::rect::Rect;

/// Matched-template highlight.
pub const CYAN: Rgb<u8> = Rgb([0, 255, 255]);
/// Single-blob contours and passing detection rectangles.
pub const GREEN: Rgb<u8> = Rgb([0, 255, 0]);
/// Failing detection rectangles.
pub const RED: Rgb<u8> = Rgb([255, 0, 0]);
/// Contours when several blobs were found.
pub const WHITE: Rgb<u8> = Rgb([255, 255, 255]);
/// Template contour outlines.
pub const YELLOW: Rgb<u8> = Rgb([255, 255, 0]);

/// Sink that ignores every draw call.
#[derive(Debug, Clone, Copy, Default)]
pub struct NullOverlay;

impl OverlaySink for NullOverlay {
    fn rect(&mut self, _bbox: &BoundingBox, _color: Rgb<u8>) {}
    fn contour(&mut self, _points: &[Point<i32>], _color: Rgb<u8>) {}
    fn label(&mut self, _pos: (i32, i32), _text: &str) {}
}

/// Sink that draws onto an RGB copy of the frame. Labels are kept as data
/// for the display layer instead of being rasterized.
#[derive(Debug, Clone)]
pub struct ImageOverlay {
    image: RgbImage,
    labels: Vec<((i32, i32), String)>,
}

impl ImageOverlay {
    pub fn new(image: RgbImage) -> Self {
        Self {
            image,
            labels: Vec::new(),
        }
    }

    pub fn labels(&self) -> &[((i32, i32), String)] {
        &self.labels
    }

    pub fn into_image(self) -> RgbImage {
        self.image
    }
}

impl OverlaySink for ImageOverlay {
    fn rect(&mut self, bbox: &BoundingBox, color: Rgb<u8>) {
        if bbox.is_empty() {
            return;
        }
        let rect = Rect::at(bbox.x1, bbox.y1).of_size(bbox.width() as u32, bbox.height() as u32);
        draw_hollow_rect_mut(&mut self.image, rect, color);
    }

    fn contour(&mut self, points: &[Point<i32>], color: Rgb<u8>) {
        let (width, height) = self.image.dimensions();
        for p in points {
            if p.x >= 0 && p.y >= 0 && (p.x as u32) < width && (p.y as u32) < height {
                self.image.put_pixel(p.x as u32, p.y as u32, color);
            }
        }
    }

    fn label(&mut self, pos: (i32, i32), text: &str) {
        self.labels.push((pos, text.to_string()));
    }
}
