//! Page-oriented text extraction from PDF bytes.
//!
//! Bytes are staged to a scoped temporary file, parsed with `lopdf`, and each
//! page's text is pulled independently. A page that yields nothing becomes an
//! empty string rather than failing the document.

pub mod staging;

#[cfg(test)]
mod tests;

pub use staging::StagedDocument;

use lopdf::Document;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{debug, instrument, warn};

#[derive(Error, Debug)]
pub enum ExtractError {
    #[error("failed to stage document: {0}")]
    Staging(#[from] std::io::Error),

    #[error("failed to parse PDF: {0}")]
    Parse(#[from] lopdf::Error),

    #[error("extraction task failed: {0}")]
    Task(String),
}

#[derive(Debug, Clone)]
pub struct TextExtractor {
    staging_dir: PathBuf,
}

impl TextExtractor {
    pub fn new(staging_dir: impl Into<PathBuf>) -> Self {
        Self {
            staging_dir: staging_dir.into(),
        }
    }

    pub fn staging_dir(&self) -> &Path {
        &self.staging_dir
    }

    /// Extract text on the blocking pool; page parsing is CPU-bound.
    #[instrument(skip_all, fields(bytes = bytes.len()))]
    pub async fn extract(&self, bytes: bytes::Bytes) -> Result<String, ExtractError> {
        let dir = self.staging_dir.clone();
        tokio::task::spawn_blocking(move || extract_text(&dir, &bytes))
            .await
            .map_err(|e| ExtractError::Task(e.to_string()))?
    }
}

impl Default for TextExtractor {
    fn default() -> Self {
        Self::new(std::env::temp_dir())
    }
}

/// Stage `bytes` under `staging_dir` and join the text of every page, in page
/// order, with a single space.
pub fn extract_text(staging_dir: &Path, bytes: &[u8]) -> Result<String, ExtractError> {
    let staged = StagedDocument::stage_in(staging_dir, bytes)?;
    let document = Document::load(staged.path())?;
    Ok(join_pages(&document))
}

fn join_pages(document: &Document) -> String {
    let pages = document.get_pages();
    let mut texts = Vec::with_capacity(pages.len());

    for page_number in pages.keys() {
        match document.extract_text(&[*page_number]) {
            Ok(text) => texts.push(text),
            Err(e) => {
                warn!(page = page_number, error = %e, "page yielded no text");
                texts.push(String::new());
            }
        }
    }

    debug!(pages = texts.len(), "extracted pages");
    texts.join(" ")
}
