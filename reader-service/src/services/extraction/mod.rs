//! Document text extraction.
//!
//! Extractors return raw per-page text; [`paragraphs_from_pages`] turns that
//! into the ordered paragraph list the upload endpoint returns.

pub mod executor;
pub mod pdftotext;

use async_trait::async_trait;
use service_core::error::AppError;
use std::path::Path;
use thiserror::Error;

pub use pdftotext::PdftotextExtractor;

#[derive(Error, Debug)]
pub enum ExtractionError {
    /// The file could not be parsed as a document.
    #[error("{0}")]
    Unreadable(String),

    #[error("Text extractor unavailable: {0}")]
    Unavailable(String),

    #[error("Text extraction timed out after {0} seconds")]
    TimedOut(u64),
}

impl From<ExtractionError> for AppError {
    fn from(err: ExtractionError) -> Self {
        match err {
            ExtractionError::Unreadable(msg) => AppError::UnprocessableEntity(anyhow::anyhow!(msg)),
            ExtractionError::Unavailable(msg) => AppError::ServiceUnavailable(msg),
            timeout @ ExtractionError::TimedOut(_) => AppError::GatewayTimeout(timeout.to_string()),
        }
    }
}

/// Page-oriented text extraction backend.
#[async_trait]
pub trait TextExtractor: Send + Sync {
    /// Text of each page, in page order.
    async fn extract_pages(&self, file_path: &Path) -> Result<Vec<String>, ExtractionError>;

    fn name(&self) -> &str;
}

/// Split one page on blank lines, trimming and dropping empty segments.
pub fn split_paragraphs(page: &str) -> impl Iterator<Item = String> + '_ {
    page.split("\n\n")
        .map(str::trim)
        .filter(|p| !p.is_empty())
        .map(String::from)
}

/// Paragraphs of every page, concatenated in page order.
pub fn paragraphs_from_pages<S: AsRef<str>>(pages: &[S]) -> Vec<String> {
    pages
        .iter()
        .map(|page| page.as_ref().replace("\r\n", "\n"))
        .filter(|page| !page.trim().is_empty())
        .flat_map(|page| split_paragraphs(&page).collect::<Vec<_>>())
        .collect()
}

/// Extract `file_path` and return its paragraphs.
pub async fn extract_paragraphs(
    extractor: &dyn TextExtractor,
    file_path: &Path,
) -> Result<Vec<String>, ExtractionError> {
    let pages = extractor.extract_pages(file_path).await?;
    let paragraphs = paragraphs_from_pages(&pages);

    tracing::info!(
        extractor = extractor.name(),
        page_count = pages.len(),
        paragraph_count = paragraphs.len(),
        "Text extraction completed"
    );

    Ok(paragraphs)
}
