//! Visual decision pipeline for the automated pet-door.
//!
//! Given a still frame and detector-proposed bounding boxes, decides
//! whether the silhouette is carrying prey and estimates travel direction:
//! region-of-interest preprocessing, two-orientation snout template
//! matching with a flip fallback, contour-based blob counting with a
//! morphological retry, and a left/right pixel-density heuristic, all
//! folded into a per-frame verdict.

pub mod bbox;
pub mod contour;
pub mod direction;
pub mod error;
pub mod overlay;
pub mod pipeline;
pub mod roi;
pub mod template;
pub mod utils;

// Re-export commonly used types
pub use bbox::BoundingBox;
pub use contour::{ContourCounter, ContourReport};
pub use direction::DirectionEstimator;
pub use error::Error;
pub use overlay::{ImageOverlay, NullOverlay};
pub use pipeline::{FrameOutcome, FramePipeline, PipelineConfig, RegionAnalysis};
pub use roi::RegionPreprocessor;
pub use template::{MatchOrientation, MatchResult, SnoutTemplate, TemplateMatcher};

pub type Result<T> = std::result::Result<T, Error>;

/// Capability traits the pipeline depends on. Any conforming
/// implementation satisfies it; the trained region-proposal model and the
/// display surface are external collaborators.
pub mod traits {
    use crate::bbox::BoundingBox;
    use image::{GrayImage, Rgb};
    use imageproc::point::Point;

    /// Proposes candidate bounding boxes for animal silhouettes in a
    /// grayscale frame. Detections smaller than `min_size` are not
    /// reported.
    pub trait Detector {
        fn detect(&self, frame: &GrayImage, min_size: (u32, u32)) -> Vec<BoundingBox>;
    }

    /// Fallback detector for running without a trained model: proposes the
    /// whole frame as a single region when it meets the minimum size.
    #[derive(Debug, Clone, Copy, Default)]
    pub struct FullFrameDetector;

    impl Detector for FullFrameDetector {
        fn detect(&self, frame: &GrayImage, min_size: (u32, u32)) -> Vec<BoundingBox> {
            let (width, height) = frame.dimensions();
            if width >= min_size.0.max(1) && height >= min_size.1.max(1) {
                vec![BoundingBox::new(0, 0, width as i32, height as i32)]
            } else {
                Vec::new()
            }
        }
    }

    /// Optional visualization surface. Implementations must be decision
    /// neutral: the pipeline produces identical verdicts whether draw
    /// calls land on an image or nowhere.
    pub trait OverlaySink {
        fn rect(&mut self, bbox: &BoundingBox, color: Rgb<u8>);
        fn contour(&mut self, points: &[Point<i32>], color: Rgb<u8>);
        fn label(&mut self, pos: (i32, i32), text: &str);
    }
}
