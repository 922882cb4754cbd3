//! Error types for the I/O collaborators around the organism.

use std::path::PathBuf;

use thiserror::Error;

pub type Result<T> = std::result::Result<T, LoadError>;

#[derive(Error, Debug)]
pub enum LoadError {
    #[error("cannot open '{}': {}", .path.display(), .source)]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("read failed: {0}")]
    Read(#[from] std::io::Error),

    #[error("line {line}: expected two integers 'x y', got '{content}'")]
    Parse { line: usize, content: String },
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("unknown birth scan '{0}' (expected revisit or dedup)")]
pub struct ParseBirthScanError(pub String);
