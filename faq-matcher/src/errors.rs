//! Error type for corpus loading and matcher construction.

use std::path::PathBuf;

use thiserror::Error;

/// Top-level error for faq-matcher operations.
#[derive(Debug, Error)]
pub enum FaqError {
    /// Corpus file could not be read.
    #[error("io error reading {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Corpus file is not a JSON array of `{question, answer}`.
    #[error("parse error: {0}")]
    Parse(#[from] serde_json::Error),

    /// A matcher needs at least one entry to answer anything.
    #[error("faq corpus is empty")]
    EmptyCorpus,
}

pub type Result<T> = std::result::Result<T, FaqError>;
