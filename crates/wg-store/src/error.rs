//! Error types for the filesystem stores.

use std::path::PathBuf;

use thiserror::Error;
use wg_core::StoryError;

/// Result type for store operations.
pub type StoreResult<T> = Result<T, StoreError>;

/// Errors that can occur while reading or writing stories and saves.
#[derive(Debug, Error)]
pub enum StoreError {
    /// No story document exists for the id.
    #[error("story not found: \"{0}\"")]
    StoryNotFound(String),

    /// The story id is not a plain name and cannot name a file.
    #[error("invalid story id: \"{0}\"")]
    InvalidId(String),

    /// A file could not be read or written.
    #[error("failed to access {}: {source}", .path.display())]
    Io {
        /// The file involved.
        path: PathBuf,
        /// The underlying error.
        source: std::io::Error,
    },

    /// A file does not contain the expected JSON.
    #[error("invalid JSON in {}: {source}", .path.display())]
    Json {
        /// The file involved.
        path: PathBuf,
        /// The underlying error.
        source: serde_json::Error,
    },

    /// A story document failed to load.
    #[error("story \"{id}\" is invalid: {source}")]
    InvalidStory {
        /// The story id.
        id: String,
        /// What was wrong with it.
        source: StoryError,
    },
}

impl StoreError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    pub(crate) fn json(path: impl Into<PathBuf>, source: serde_json::Error) -> Self {
        Self::Json {
            path: path.into(),
            source,
        }
    }
}
