//! Shared error types for the analysis pipeline.
//!
//! The core itself degrades rather than fails: unparseable input falls back
//! to the lexical extractor and a rejected pattern falls through silently.
//! These variants exist for the boundaries around the core — I/O, config,
//! and the catch-all for faults that must not escape as panics.

use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    /// Unexpected internal fault surfaced at the pipeline boundary,
    /// distinct from a normal (possibly zero-valued) analysis result.
    #[error("Analysis error: {0}")]
    Analysis(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("File error for {path}: {source}")]
    File {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

impl Error {
    pub fn file(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::File {
            path: path.into(),
            source,
        }
    }
}

/// Result type alias using our error type
pub type Result<T> = std::result::Result<T, Error>;
