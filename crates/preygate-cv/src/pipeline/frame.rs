//! Frame-level decision aggregation.

use crate::bbox::BoundingBox;
use crate::overlay::{self, NullOverlay};
use crate::pipeline::PipelineConfig;
use crate::template::{MatchOrientation, MatchResult, SnoutTemplate};
use crate::traits::OverlaySink;
use image::GrayImage;
use imageproc::point::Point;
use log::debug;
use preygate_core::{Direction, FrameDecision, RegionDecision};

/// Everything learned about one detected region.
#[derive(Debug, Clone)]
pub struct RegionAnalysis {
    pub bbox: BoundingBox,
    pub decision: RegionDecision,
    pub template_match: Option<MatchResult>,
    pub contour_count: usize,
    pub retried: bool,
}

/// Result of processing one frame.
#[derive(Debug, Clone)]
pub struct FrameOutcome {
    pub decision: FrameDecision,
    pub regions: Vec<RegionAnalysis>,
}

/// Runs detector boxes through preprocessing, template matching, contour
/// counting and direction estimation, and folds them into a frame
/// verdict.
pub struct FramePipeline {
    config: PipelineConfig,
    template: Option<SnoutTemplate>,
}

impl FramePipeline {
    /// A pipeline without a template skips matching entirely; template
    /// acceptance never gates the frame decision either way.
    pub fn new(config: PipelineConfig, template: Option<SnoutTemplate>) -> Self {
        Self { config, template }
    }

    pub fn config(&self) -> &PipelineConfig {
        &self.config
    }

    /// Process one frame's detections without drawing anything.
    pub fn process_frame(&self, frame: &GrayImage, detections: &[BoundingBox]) -> FrameOutcome {
        self.process_frame_with_overlay(frame, detections, &mut NullOverlay)
    }

    /// Process one frame's detections, mirroring each step onto `overlay`.
    ///
    /// The frame is matched when at least one region was detected and the
    /// prey check passed. Regions are folded sequentially and the last
    /// processed region's verdict stands for the frame.
    pub fn process_frame_with_overlay(
        &self,
        frame: &GrayImage,
        detections: &[BoundingBox],
        overlay: &mut dyn OverlaySink,
    ) -> FrameOutcome {
        debug!("found {} detections", detections.len());

        let mut regions = Vec::with_capacity(detections.len());
        let mut width_sum = 0u32;
        let mut height_sum = 0u32;
        let mut prey_ok = true;

        for bbox in detections {
            width_sum += bbox.width() as u32;
            height_sum += bbox.height() as u32;

            let analysis = self.analyze_region(frame, bbox, overlay);
            prey_ok = analysis.decision.prey_count_ok;
            regions.push(analysis);
        }

        let matched = !detections.is_empty() && prey_ok;

        // Final detection rectangles, colored by the frame verdict.
        let color = if prey_ok { overlay::GREEN } else { overlay::RED };
        for bbox in detections {
            overlay.rect(bbox, color);
        }

        FrameOutcome {
            decision: FrameDecision {
                matched,
                width: width_sum,
                height: height_sum,
            },
            regions,
        }
    }

    fn analyze_region(
        &self,
        frame: &GrayImage,
        bbox: &BoundingBox,
        overlay: &mut dyn OverlaySink,
    ) -> RegionAnalysis {
        let cfg = &self.config;

        let Some((roi, sub)) = cfg.preprocessor.prepare(frame, bbox) else {
            debug!("degenerate region for {:?}", bbox);
            return RegionAnalysis {
                bbox: *bbox,
                decision: RegionDecision {
                    template_ok: true,
                    prey_count_ok: false,
                    direction: Direction::Unknown,
                },
                template_match: None,
                contour_count: 0,
                retried: false,
            };
        };

        let template_match = self.template.as_ref().and_then(|template| {
            let result = cfg.matcher.match_region(&sub, template)?;
            debug!(" template match: {:.3} ({:?})", result.score, result.orientation);

            let matched_box = BoundingBox::new(
                roi.x1 + result.top_left.0 as i32,
                roi.y1 + result.top_left.1 as i32,
                roi.x1 + result.bottom_right.0 as i32,
                roi.y1 + result.bottom_right.1 as i32,
            );
            overlay.rect(&matched_box, overlay::CYAN);
            let outline = match result.orientation {
                MatchOrientation::Normal => &template.contours,
                MatchOrientation::Flipped => &template.flipped_contours,
            };
            for contour in outline {
                let shifted: Vec<Point<i32>> = contour
                    .points
                    .iter()
                    .map(|p| Point::new(p.x + matched_box.x1, p.y + matched_box.y1))
                    .collect();
                overlay.contour(&shifted, overlay::YELLOW);
            }
            Some(result)
        });

        let template_ok = match (self.template.as_ref(), template_match.as_ref()) {
            // no template in play: matching does not gate anything
            (None, _) => true,
            (Some(_), Some(result)) => cfg.matcher.accepted(result),
            // region too small to score
            (Some(_), None) => false,
        };

        let report = cfg.counter.count_region(&sub);
        let contour_color = if report.count >= 2 {
            overlay::WHITE
        } else {
            overlay::GREEN
        };
        for contour in &report.contours {
            let shifted: Vec<Point<i32>> = contour
                .points
                .iter()
                .map(|p| Point::new(p.x + roi.x1, p.y + roi.y1))
                .collect();
            overlay.contour(&shifted, contour_color);
        }
        overlay.label((roi.x1 + 10, roi.y1 + 20), &report.count.to_string());
        debug!("contour count {}", report.count);

        let direction = cfg.direction.estimate(&sub);
        overlay.label((20, 40), &format!("Direction {direction}"));

        RegionAnalysis {
            bbox: *bbox,
            decision: RegionDecision {
                template_ok,
                prey_count_ok: report.prey_present,
                direction,
            },
            template_match,
            contour_count: report.count,
            retried: report.retried,
        }
    }
}
