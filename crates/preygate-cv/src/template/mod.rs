//! Snout reference template handling and matching.

pub mod loader;
pub mod matcher;

pub use loader::SnoutTemplate;
pub use matcher::{MatchResult, TemplateMatcher};

use serde::{Deserialize, Serialize};

/// Which orientation of the reference template produced a match.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MatchOrientation {
    Normal,
    Flipped,
}
