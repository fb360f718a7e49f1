//! Region- and frame-level decision types and the rules that produce them.

use serde::{Deserialize, Serialize};

/// Noise floor for contour areas, in pixels squared. Only contours above
/// this count as real blobs.
pub const MIN_CONTOUR_AREA: f64 = 10.0;

/// Minimum white-pixel difference between the two edge columns before a
/// travel direction is called.
pub const DIRECTION_MARGIN: u32 = 25;

/// Estimated travel direction of the animal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Direction {
    Left,
    Right,
    Unknown,
}

impl std::fmt::Display for Direction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Direction::Left => write!(f, "Left"),
            Direction::Right => write!(f, "Right"),
            Direction::Unknown => write!(f, "Unknown"),
        }
    }
}

/// Outcome of analysing one detected region.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegionDecision {
    /// Template correlation cleared the acceptance threshold. Reported
    /// only; never gates the frame decision.
    pub template_ok: bool,
    /// Exactly one significant contour was found in the region.
    pub prey_count_ok: bool,
    pub direction: Direction,
}

/// Frame-level outcome fed into the running statistics.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct FrameDecision {
    /// At least one region was detected and the prey check passed.
    pub matched: bool,
    /// Summed raw widths of every detection in the frame.
    pub width: u32,
    /// Summed raw heights of every detection in the frame.
    pub height: u32,
}

/// Count the observations whose area clears the noise floor. The
/// comparison is strict: an area of exactly `min_area` is still noise.
pub fn significant_count(areas: &[f64], min_area: f64) -> usize {
    areas.iter().filter(|&&area| area > min_area).count()
}

/// Direction rule over the white-pixel counts of the leftmost and
/// rightmost mask columns. The animal is most likely heading toward the
/// side with more body mass; differences within `margin` are too close to
/// call.
pub fn direction_from_counts(left: u32, right: u32, margin: u32) -> Direction {
    if left.abs_diff(right) > margin {
        if left > right {
            Direction::Left
        } else {
            Direction::Right
        }
    } else {
        Direction::Unknown
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn significant_count_excludes_noise_floor() {
        let areas = [5.0, 10.0, 10.1, 300.0];
        assert_eq!(significant_count(&areas, MIN_CONTOUR_AREA), 2);
        assert_eq!(significant_count(&[], MIN_CONTOUR_AREA), 0);
    }

    #[test]
    fn direction_calls_the_heavier_side() {
        assert_eq!(
            direction_from_counts(100, 50, DIRECTION_MARGIN),
            Direction::Left
        );
        assert_eq!(
            direction_from_counts(50, 76, DIRECTION_MARGIN),
            Direction::Right
        );
    }

    #[test]
    fn direction_within_margin_is_unknown() {
        // diff of 24 is within the margin of 25, diff of 26 is not
        assert_eq!(
            direction_from_counts(50, 74, DIRECTION_MARGIN),
            Direction::Unknown
        );
        assert_eq!(direction_from_counts(0, 0, DIRECTION_MARGIN), Direction::Unknown);
        assert_eq!(
            direction_from_counts(50, 75, DIRECTION_MARGIN),
            Direction::Unknown
        );
    }
}
