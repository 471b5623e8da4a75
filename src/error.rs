//! Error types for clustering runs.

use crate::parser::ParsingError;
use std::path::PathBuf;
use thiserror::Error;

/// Result type for clustering operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that abort a clustering run. No output is written when any occurs.
#[derive(Debug, Error)]
pub enum Error {
    /// The input tree text could not be parsed (malformed tree).
    #[error("malformed tree: {0}")]
    Parse(#[from] ParsingError),

    /// The tree structure cannot be clustered (malformed tree).
    #[error("malformed tree: {reason}")]
    MalformedTree { reason: String },

    /// The cutoff is not a finite number.
    #[error("invalid cutoff {0}: must be a finite number")]
    InvalidCutoff(f64),

    /// Reading input or writing output failed.
    #[error("I/O error on {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl Error {
    /// Returns `true` for both kinds of malformed-tree errors.
    pub fn is_malformed_tree(&self) -> bool {
        matches!(self, Error::Parse(_) | Error::MalformedTree { .. })
    }

    pub(crate) fn malformed(reason: impl Into<String>) -> Self {
        Error::MalformedTree {
            reason: reason.into(),
        }
    }

    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Error::Io {
            path: path.into(),
            source,
        }
    }
}
