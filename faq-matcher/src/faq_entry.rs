use std::{fs, path::Path};

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::errors::{FaqError, Result};

/// One question/answer pair from the corpus.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FaqEntry {
    pub question: String,
    pub answer: String,
}

/// Reads a JSON array of [`FaqEntry`] from `path`.
pub fn load_entries(path: impl AsRef<Path>) -> Result<Vec<FaqEntry>> {
    let path = path.as_ref();
    let raw = fs::read_to_string(path).map_err(|source| FaqError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let entries: Vec<FaqEntry> = serde_json::from_str(&raw)?;
    debug!(path = %path.display(), entries = entries.len(), "faq corpus loaded");
    Ok(entries)
}
