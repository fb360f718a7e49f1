//! Corpus-wide running statistics.

use crate::decision::FrameDecision;
use serde::{Deserialize, Serialize};

/// Accumulator over every processed frame in a run.
///
/// This is an explicit value threaded through the frame loop, never a
/// module-level global, so independent runs and tests get independent
/// instances. Processing is frame-at-a-time and sequential; callers that
/// batch frames across threads should keep one accumulator per worker and
/// [`merge`](RunStatistics::merge) them at the end.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunStatistics {
    pub frames_seen: u64,
    pub frames_matched: u64,
    pub width_sum: u64,
    pub height_sum: u64,
}

impl RunStatistics {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fold one processed frame into the accumulator. Width and height
    /// sums grow for every detection, matched or not; unreadable frames
    /// must simply not be recorded.
    pub fn record(&mut self, decision: &FrameDecision) {
        self.frames_seen += 1;
        if decision.matched {
            self.frames_matched += 1;
        }
        self.width_sum += u64::from(decision.width);
        self.height_sum += u64::from(decision.height);
    }

    /// Combine with another accumulator.
    pub fn merge(&mut self, other: &RunStatistics) {
        self.frames_seen += other.frames_seen;
        self.frames_matched += other.frames_matched;
        self.width_sum += other.width_sum;
        self.height_sum += other.height_sum;
    }

    /// End-of-run averages. All ratios are over frames seen.
    pub fn summary(&self) -> RunSummary {
        let over_frames = |sum: u64| {
            if self.frames_seen == 0 {
                0.0
            } else {
                sum as f64 / self.frames_seen as f64
            }
        };
        RunSummary {
            frames_seen: self.frames_seen,
            frames_matched: self.frames_matched,
            match_ratio: over_frames(self.frames_matched),
            avg_width: over_frames(self.width_sum),
            avg_height: over_frames(self.height_sum),
        }
    }
}

/// Derived end-of-run report for the reporting sink.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct RunSummary {
    pub frames_seen: u64,
    pub frames_matched: u64,
    pub match_ratio: f64,
    pub avg_width: f64,
    pub avg_height: f64,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn frame(matched: bool, width: u32, height: u32) -> FrameDecision {
        FrameDecision {
            matched,
            width,
            height,
        }
    }

    #[test]
    fn record_accumulates_regardless_of_match() {
        let mut stats = RunStatistics::new();
        stats.record(&frame(true, 10, 5));
        stats.record(&frame(false, 20, 5));
        stats.record(&frame(true, 30, 5));

        assert_eq!(stats.frames_seen, 3);
        assert_eq!(stats.frames_matched, 2);
        assert_eq!(stats.width_sum, 60);
        assert_eq!(stats.height_sum, 15);

        let summary = stats.summary();
        assert_eq!(summary.match_ratio, 2.0 / 3.0);
        assert_eq!(summary.avg_width, 20.0);
        assert_eq!(summary.avg_height, 5.0);
    }

    #[test]
    fn empty_run_summary_is_all_zero() {
        let summary = RunStatistics::new().summary();
        assert_eq!(summary.frames_seen, 0);
        assert_eq!(summary.match_ratio, 0.0);
        assert_eq!(summary.avg_width, 0.0);
    }

    #[test]
    fn merge_combines_worker_accumulators() {
        let mut a = RunStatistics::new();
        a.record(&frame(true, 10, 10));
        let mut b = RunStatistics::new();
        b.record(&frame(false, 30, 10));
        b.record(&frame(true, 20, 10));

        a.merge(&b);
        assert_eq!(a.frames_seen, 3);
        assert_eq!(a.frames_matched, 2);
        assert_eq!(a.width_sum, 60);
    }
}
