//! Scratch storage for uploaded files.
//!
//! Every upload gets its own uniquely named file, wrapped in a
//! [`NamedTempFile`] so it is removed when the guard drops, whatever path the
//! handler leaves through.

use service_core::error::AppError;
use std::io::Write;
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;
use tokio::fs;
use unicode_normalization::UnicodeNormalization;

/// Fallback when nothing usable survives sanitization.
const FALLBACK_NAME: &str = "upload";

/// Longest sanitized name kept. The random token already makes stored names
/// unique, and `upload-XXXXXX-<name>` must stay under the 255 byte NAME_MAX.
const MAX_NAME_BYTES: usize = 100;

/// Extensions longer than this are treated as part of the stem.
const MAX_EXTENSION_BYTES: usize = 16;

pub struct UploadArea {
    base_path: PathBuf,
}

impl UploadArea {
    pub async fn new(base_path: impl Into<PathBuf>) -> Result<Self, AppError> {
        let base_path = base_path.into();
        if !base_path.exists() {
            fs::create_dir_all(&base_path).await?;
        }
        Ok(Self { base_path })
    }

    pub fn path(&self) -> &Path {
        &self.base_path
    }

    pub fn is_ready(&self) -> bool {
        self.base_path.is_dir()
    }

    /// Persist `data` under a unique name derived from `original_name`.
    ///
    /// The returned guard owns the file; dropping it deletes the file.
    pub async fn store(&self, original_name: &str, data: Vec<u8>) -> Result<NamedTempFile, AppError> {
        let suffix = format!("-{}", sanitize_filename(original_name));
        let dir = self.base_path.clone();

        let file = tokio::task::spawn_blocking(move || -> std::io::Result<NamedTempFile> {
            let mut file = tempfile::Builder::new()
                .prefix("upload-")
                .suffix(&suffix)
                .tempfile_in(&dir)?;
            file.write_all(&data)?;
            file.flush()?;
            Ok(file)
        })
        .await
        .map_err(|e| AppError::InternalError(anyhow::anyhow!("Upload writer panicked: {}", e)))??;

        tracing::debug!(path = ?file.path(), "Upload stored");
        Ok(file)
    }
}

/// Reduce a client-supplied filename to a safe, flat ASCII name.
///
/// Path separators become word breaks, whitespace runs become `_`, anything
/// outside `[A-Za-z0-9_.-]` is dropped and leading/trailing `.`/`_` are
/// stripped, so the result can never climb out of the upload directory.
/// Long names are cut to [`MAX_NAME_BYTES`], keeping the extension.
pub fn sanitize_filename(name: &str) -> String {
    let ascii: String = name
        .nfkd()
        .filter(char::is_ascii)
        .map(|c| if c == '/' || c == '\\' { ' ' } else { c })
        .collect();

    let joined = ascii.split_whitespace().collect::<Vec<_>>().join("_");

    let filtered: String = joined
        .chars()
        .filter(|c| c.is_ascii_alphanumeric() || matches!(c, '_' | '.' | '-'))
        .collect();

    let trimmed = filtered.trim_matches(|c| c == '.' || c == '_');
    if trimmed.is_empty() {
        FALLBACK_NAME.to_string()
    } else {
        truncate_keeping_extension(trimmed)
    }
}

/// Input is ASCII by now, so byte slicing is safe.
fn truncate_keeping_extension(name: &str) -> String {
    if name.len() <= MAX_NAME_BYTES {
        return name.to_string();
    }

    let extension = name
        .rfind('.')
        .map(|dot| &name[dot..])
        .filter(|ext| ext.len() <= MAX_EXTENSION_BYTES)
        .unwrap_or("");
    let stem = &name[..MAX_NAME_BYTES - extension.len()];
    let stem = stem.trim_end_matches(|c| c == '.' || c == '_');

    format!("{}{}", stem, extension)
}
