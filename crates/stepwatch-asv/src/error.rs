//! Error types for stepwatch-asv

use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Stepwatch core error: {0}")]
    Core(#[from] stepwatch_core::Error),

    #[error("Error in {}: {source}", path.display())]
    File {
        path: PathBuf,
        #[source]
        source: Box<Error>,
    },

    #[error("Unknown benchmark: {0}")]
    UnknownBenchmark(String),

    #[error("Unknown commit: {0}")]
    UnknownCommit(String),

    #[error("Commit {0} has no earlier benchmarked commit")]
    NoPredecessor(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

impl Error {
    /// Attach the file being processed to an error
    pub fn in_file(self, path: impl Into<PathBuf>) -> Self {
        Self::File {
            path: path.into(),
            source: Box::new(self),
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;
