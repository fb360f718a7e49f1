//! Pipeline configuration.

use crate::contour::ContourCounter;
use crate::direction::DirectionEstimator;
use crate::roi::RegionPreprocessor;
use crate::template::TemplateMatcher;
use serde::{Deserialize, Serialize};

/// Knobs for every stage of the per-frame pipeline. The defaults are the
/// field-tested values; tests tighten or loosen individual stages.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct PipelineConfig {
    pub preprocessor: RegionPreprocessor,
    pub matcher: TemplateMatcher,
    pub counter: ContourCounter,
    pub direction: DirectionEstimator,
}
