//! Error types for the subtitle engine.
//!
//! Malformed captions never produce an error: the parser skips what it cannot
//! read and pairing simply comes back empty. What is left is environment
//! failure, such as a caption file that vanished between listing and reading.

use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SubtitleError {
    /// Reading a file or directory that was expected to exist failed
    #[error("cannot read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A configuration value could not be applied
    #[error("configuration error: {0}")]
    Config(String),
}

impl SubtitleError {
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        SubtitleError::Io {
            path: path.into(),
            source,
        }
    }
}

pub type Result<T> = std::result::Result<T, SubtitleError>;
