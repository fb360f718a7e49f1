//! Bounding boxes as reported by the region-proposal detector.

use serde::{Deserialize, Serialize};

/// Axis-aligned box in integer pixel coordinates, corner form.
///
/// Detector-produced boxes satisfy x1 <= x2, y1 <= y2 and lie within the
/// frame. Derived boxes (after region preprocessing) may degenerate;
/// [`is_empty`](BoundingBox::is_empty) tells.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BoundingBox {
    pub x1: i32,
    pub y1: i32,
    pub x2: i32,
    pub y2: i32,
}

impl BoundingBox {
    pub fn new(x1: i32, y1: i32, x2: i32, y2: i32) -> Self {
        Self { x1, y1, x2, y2 }
    }

    /// Build from origin and extent, the form most detectors report.
    pub fn from_xywh(x: i32, y: i32, width: i32, height: i32) -> Self {
        Self::new(x, y, x + width, y + height)
    }

    pub fn width(&self) -> i32 {
        (self.x2 - self.x1).max(0)
    }

    pub fn height(&self) -> i32 {
        (self.y2 - self.y1).max(0)
    }

    pub fn area(&self) -> i64 {
        i64::from(self.width()) * i64::from(self.height())
    }

    /// Zero pixels inside.
    pub fn is_empty(&self) -> bool {
        self.x2 <= self.x1 || self.y2 <= self.y1
    }

    /// Clip to a frame of the given extents.
    pub fn clamp_to(&self, width: u32, height: u32) -> BoundingBox {
        BoundingBox::new(
            self.x1.clamp(0, width as i32),
            self.y1.clamp(0, height as i32),
            self.x2.clamp(0, width as i32),
            self.y2.clamp(0, height as i32),
        )
    }
}
