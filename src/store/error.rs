//! Store error types

use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Failures the flat-file store can surface
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("failed to read store file {}: {source}", .path.display())]
    Read { path: PathBuf, source: io::Error },

    #[error("failed to write store file {}: {source}", .path.display())]
    Write { path: PathBuf, source: io::Error },

    #[error("store file {} holds malformed data: {source}", .path.display())]
    Corrupt {
        path: PathBuf,
        source: serde_json::Error,
    },

    #[error("failed to serialize collection: {0}")]
    Serialize(#[from] serde_json::Error),
}
