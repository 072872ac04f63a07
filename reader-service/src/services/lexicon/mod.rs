//! Offline dictionary lookups backed by the WordNet 3.0 database.

pub mod fetch;
pub mod morphy;
pub mod wordnet;

use service_core::error::AppError;
use std::path::{Path, PathBuf};
use thiserror::Error;

pub use fetch::ensure_dataset;
pub use wordnet::WordNet;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum PartOfSpeech {
    Noun,
    Verb,
    Adjective,
    Adverb,
}

impl PartOfSpeech {
    /// Lookup order for a bare word.
    pub const ALL: [PartOfSpeech; 4] = [
        PartOfSpeech::Noun,
        PartOfSpeech::Verb,
        PartOfSpeech::Adjective,
        PartOfSpeech::Adverb,
    ];

    /// Suffix of the `index.*` / `data.*` files and prefix of the `*.exc` file.
    pub fn file_suffix(self) -> &'static str {
        match self {
            PartOfSpeech::Noun => "noun",
            PartOfSpeech::Verb => "verb",
            PartOfSpeech::Adjective => "adj",
            PartOfSpeech::Adverb => "adv",
        }
    }
}

/// One meaning of a word.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Sense {
    pub lemma: String,
    pub pos: PartOfSpeech,
    pub definition: String,
    pub examples: Vec<String>,
}

#[derive(Error, Debug)]
pub enum LexiconError {
    #[error("Lexical database not found in {0}")]
    Missing(PathBuf),

    #[error("Failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Malformed {file}: {detail}")]
    Malformed { file: String, detail: String },

    #[error("Lexical database download failed: {0}")]
    Download(String),
}

impl LexiconError {
    pub fn io(path: &Path, source: std::io::Error) -> Self {
        LexiconError::Io {
            path: path.to_path_buf(),
            source,
        }
    }

    pub fn malformed(file: impl Into<String>, detail: impl Into<String>) -> Self {
        LexiconError::Malformed {
            file: file.into(),
            detail: detail.into(),
        }
    }
}

impl From<LexiconError> for AppError {
    fn from(err: LexiconError) -> Self {
        match err {
            LexiconError::Missing(_) => AppError::ServiceUnavailable(err.to_string()),
            LexiconError::Download(msg) => AppError::BadGateway(msg),
            LexiconError::Io { .. } | LexiconError::Malformed { .. } => {
                AppError::InternalError(anyhow::Error::new(err))
            }
        }
    }
}

/// Read-only word lookup.
pub trait Lexicon: Send + Sync {
    /// The first sense the database lists for `word`, if any.
    fn first_sense(&self, word: &str) -> Result<Option<Sense>, LexiconError>;

    fn is_loaded(&self) -> bool;
}

/// Trim and lowercase user input before lookup.
pub fn normalize_word(word: &str) -> String {
    word.trim().to_lowercase()
}
