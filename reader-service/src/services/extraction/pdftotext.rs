use super::executor::CommandExecutor;
use super::{ExtractionError, TextExtractor};
use async_trait::async_trait;
use std::ffi::OsStr;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Form feed emitted by `pdftotext` after every page.
const PAGE_BREAK: char = '\u{0c}';

/// Extracts page text with poppler's `pdftotext`.
pub struct PdftotextExtractor {
    program: PathBuf,
    executor: CommandExecutor,
}

impl PdftotextExtractor {
    pub fn new(program: impl Into<PathBuf>, timeout: Duration) -> Self {
        Self {
            program: program.into(),
            executor: CommandExecutor::new(timeout),
        }
    }
}

#[async_trait]
impl TextExtractor for PdftotextExtractor {
    async fn extract_pages(&self, file_path: &Path) -> Result<Vec<String>, ExtractionError> {
        tracing::info!(file_path = ?file_path, "Extracting PDF text");

        let program = self.program.to_string_lossy();
        let output = self
            .executor
            .execute(
                &program,
                &[
                    OsStr::new("-enc"),
                    OsStr::new("UTF-8"),
                    file_path.as_os_str(),
                    OsStr::new("-"),
                ],
            )
            .await?;

        let text = String::from_utf8_lossy(&output.stdout);
        Ok(split_pages(&text))
    }

    fn name(&self) -> &str {
        "pdftotext"
    }
}

/// One entry per page; the empty remainder after the final page break is dropped.
fn split_pages(text: &str) -> Vec<String> {
    let mut pages: Vec<String> = text.split(PAGE_BREAK).map(String::from).collect();
    if pages.last().is_some_and(|p| p.trim().is_empty()) && text.ends_with(PAGE_BREAK) {
        pages.pop();
    }
    pages
}
