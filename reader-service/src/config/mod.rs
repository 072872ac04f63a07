use service_core::config as core_config;
use service_core::error::AppError;
use std::env;
use std::path::PathBuf;

/// Default upload body limit (20MB).
const DEFAULT_UPLOAD_MAX_BYTES: usize = 20 * 1024 * 1024;

/// Princeton's WordNet 3.0 distribution; the `dict/` folder is all we keep.
const DEFAULT_LEXICON_URL: &str = "https://wordnetcode.princeton.edu/3.0/WordNet-3.0.tar.gz";

#[derive(Debug, Clone)]
pub struct ReaderConfig {
    pub common: core_config::Config,
    pub log_level: String,
    pub otlp_endpoint: Option<String>,
    pub cors_allowed_origins: Vec<String>,
    pub upload: UploadConfig,
    pub extraction: ExtractionConfig,
    pub lexicon: LexiconConfig,
    pub gemini: GeminiSettings,
}

#[derive(Debug, Clone)]
pub struct UploadConfig {
    /// Shared scratch directory for in-flight uploads.
    pub dir: PathBuf,
    pub max_bytes: usize,
}

#[derive(Debug, Clone)]
pub struct ExtractionConfig {
    pub pdftotext_path: String,
    pub timeout_secs: u64,
}

#[derive(Debug, Clone)]
pub struct LexiconConfig {
    /// Directory holding the WordNet `dict` files.
    pub dir: PathBuf,
    pub download_url: String,
    pub auto_download: bool,
}

#[derive(Debug, Clone)]
pub struct GeminiSettings {
    pub api_key: String,
    pub model: String,
    pub timeout_secs: u64,
    /// Overrides the public endpoint, e.g. for a regional proxy.
    pub base_url: Option<String>,
}

impl ReaderConfig {
    pub fn load() -> Result<Self, AppError> {
        let common_config = core_config::Config::load()?;
        let is_prod = env::var("ENVIRONMENT").unwrap_or_else(|_| "dev".to_string()) == "prod";

        Ok(ReaderConfig {
            common: common_config,
            log_level: get_env("LOG_LEVEL", Some("info"), is_prod)?,
            otlp_endpoint: env::var("OTLP_ENDPOINT").ok().filter(|s| !s.is_empty()),
            cors_allowed_origins: parse_list(&get_env(
                "CORS_ALLOWED_ORIGINS",
                Some("*"),
                is_prod,
            )?),
            upload: UploadConfig {
                dir: get_env("UPLOAD_DIR", Some("temp_uploads"), is_prod)?.into(),
                max_bytes: parse_setting(
                    "UPLOAD_MAX_BYTES",
                    &get_env(
                        "UPLOAD_MAX_BYTES",
                        Some(&DEFAULT_UPLOAD_MAX_BYTES.to_string()),
                        is_prod,
                    )?,
                )?,
            },
            extraction: ExtractionConfig {
                pdftotext_path: get_env("PDFTOTEXT_PATH", Some("pdftotext"), is_prod)?,
                timeout_secs: parse_setting(
                    "EXTRACTION_TIMEOUT_SECS",
                    &get_env("EXTRACTION_TIMEOUT_SECS", Some("60"), is_prod)?,
                )?,
            },
            lexicon: LexiconConfig {
                dir: get_env("LEXICON_DIR", Some("wordnet"), is_prod)?.into(),
                download_url: get_env("LEXICON_DOWNLOAD_URL", Some(DEFAULT_LEXICON_URL), is_prod)?,
                auto_download: parse_setting(
                    "LEXICON_AUTO_DOWNLOAD",
                    &get_env("LEXICON_AUTO_DOWNLOAD", Some("true"), is_prod)?,
                )?,
            },
            gemini: GeminiSettings {
                // No default: the chat endpoint is useless without a key.
                api_key: get_env("GEMINI_API_KEY", None, is_prod)?,
                model: get_env("GEMINI_MODEL", Some("gemini-2.0-flash"), is_prod)?,
                timeout_secs: parse_setting(
                    "GEMINI_TIMEOUT_SECS",
                    &get_env("GEMINI_TIMEOUT_SECS", Some("120"), is_prod)?,
                )?,
                base_url: env::var("GEMINI_BASE_URL").ok().filter(|s| !s.is_empty()),
            },
        })
    }
}

fn parse_setting<T>(key: &str, raw: &str) -> Result<T, AppError>
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    raw.trim().parse().map_err(|e| {
        AppError::ConfigError(anyhow::anyhow!("{} has invalid value '{}': {}", key, raw, e))
    })
}

fn parse_list(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(String::from)
        .collect()
}

fn get_env(key: &str, default: Option<&str>, is_prod: bool) -> Result<String, AppError> {
    match env::var(key) {
        Ok(val) => Ok(val),
        Err(_) => {
            if is_prod && default.is_none() {
                Err(AppError::ConfigError(anyhow::anyhow!(
                    "{} is required in production but not set",
                    key
                )))
            } else if let Some(def) = default {
                Ok(def.to_string())
            } else {
                Err(AppError::ConfigError(anyhow::anyhow!(
                    "{} is required but not set",
                    key
                )))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn origin_list_ignores_blanks() {
        assert_eq!(
            parse_list(" https://a.example, ,https://b.example "),
            vec!["https://a.example", "https://b.example"]
        );
    }

    #[test]
    fn well_formed_settings_parse() {
        assert_eq!(parse_setting::<u64>("GEMINI_TIMEOUT_SECS", " 15 ").unwrap(), 15);
        assert!(!parse_setting::<bool>("LEXICON_AUTO_DOWNLOAD", "false").unwrap());
    }

    #[test]
    fn malformed_settings_are_config_errors() {
        let err = parse_setting::<usize>("UPLOAD_MAX_BYTES", "20MB").unwrap_err();
        assert!(matches!(err, AppError::ConfigError(_)));
        assert!(err.to_string().contains("UPLOAD_MAX_BYTES"));

        assert!(parse_setting::<bool>("LEXICON_AUTO_DOWNLOAD", "yes").is_err());
        assert!(parse_setting::<u64>("EXTRACTION_TIMEOUT_SECS", "-5").is_err());
    }
}
