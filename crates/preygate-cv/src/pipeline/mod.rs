//! Per-frame aggregation of the region stages.

pub mod config;
pub mod frame;

pub use config::PipelineConfig;
pub use frame::{FrameOutcome, FramePipeline, RegionAnalysis};
