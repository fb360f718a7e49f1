//! Image-free decision logic for the pet-door pipeline.
//!
//! Everything here operates on plain numbers produced by the vision stages
//! in `preygate-cv`: contour areas, edge-column pixel counts and per-frame
//! verdicts. Keeping this crate free of image dependencies keeps the
//! decision rules trivially testable.

pub mod decision;
pub mod stats;

pub use decision::{
    direction_from_counts, significant_count, Direction, FrameDecision, RegionDecision,
    DIRECTION_MARGIN, MIN_CONTOUR_AREA,
};
pub use stats::{RunStatistics, RunSummary};
