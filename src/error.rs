use std::path::PathBuf;

use thiserror::Error;

/// Errors surfaced to callers.  Per-frame conditions (missing assets, leaked
/// cameras, draws outside a frame) are logged instead of returned.
#[derive(Debug, Error)]
pub enum Error {
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("malformed JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("content directory walk failed: {0}")]
    Walk(#[from] walkdir::Error),

    #[error("could not read image header of {path}: {source}")]
    Image {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },

    #[error("begin_frame called while a frame is already open")]
    FrameAlreadyOpen,

    #[error("end_frame called without a matching begin_frame")]
    FrameNotOpen,
}

pub type Result<T> = std::result::Result<T, Error>;
