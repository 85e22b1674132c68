use std::path::PathBuf;

use thiserror::Error;

/// Why a renderable could not be built
#[derive(Debug, Clone, PartialEq, Error)]
pub enum AssetLoadError {
    #[error("resource not found: {0}")]
    ResourceMissing(String),

    #[error("failed to decode {path}: {reason}")]
    Decode { path: PathBuf, reason: String },

    #[error("failed to read {path}: {reason}")]
    Io { path: PathBuf, reason: String },

    #[error("asset load timed out after {secs:.1}s")]
    Timeout { secs: f32 },

    #[error("asset load was dropped before completing")]
    Cancelled,
}

/// Reference image database registration failures
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SessionError {
    #[error("reference image {0:?} is already registered")]
    DuplicateImage(String),

    #[error("reference image {0:?} has no pixel data")]
    EmptyImage(String),
}
