//! Typed errors at the collaborator-facing edges of the pipeline.
//!
//! Nothing here is fatal to a run: unreadable frames are skipped by the
//! caller and a missing template simply disables matching. Degenerate
//! regions are not errors at all; they surface as `None` sub-images.

use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    /// The frame source handed over a path that does not decode.
    #[error("unreadable frame {path}: {source}")]
    UnreadableFrame {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },

    /// The snout reference image could not be loaded.
    #[error("unusable snout template {path}: {source}")]
    Template {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },
}
