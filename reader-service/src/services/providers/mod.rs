//! Generative-model provider abstraction.
//!
//! The chat endpoint only needs "prompt in, text out"; the trait keeps the
//! Gemini client swappable for the mock used in tests.

pub mod gemini;
pub mod mock;

use async_trait::async_trait;
use service_core::error::AppError;
use thiserror::Error;

/// Error type for provider operations.
#[derive(Error, Debug)]
pub enum ProviderError {
    #[error("Provider not configured: {0}")]
    NotConfigured(String),

    #[error("API error: {0}")]
    ApiError(String),

    #[error("Rate limited: {0}")]
    RateLimited(String),

    /// Prompt or candidate blocked by safety filtering.
    #[error("No response generated")]
    ContentFiltered,

    /// The model answered without any text.
    #[error("No response generated")]
    EmptyResponse,

    #[error("Network error: {0}")]
    NetworkError(String),

    #[error("Request to the model timed out after {0} seconds")]
    Timeout(u64),
}

impl From<ProviderError> for AppError {
    fn from(err: ProviderError) -> Self {
        match err {
            ProviderError::NotConfigured(msg) => AppError::ServiceUnavailable(msg),
            timeout @ ProviderError::Timeout(_) => AppError::GatewayTimeout(timeout.to_string()),
            other => AppError::BadGateway(other.to_string()),
        }
    }
}

/// Generated text plus bookkeeping from the provider.
#[derive(Debug, Clone)]
pub struct ProviderResponse {
    pub text: String,
    pub input_tokens: i32,
    pub output_tokens: i32,
    pub finish_reason: FinishReason,
}

/// Reason why generation stopped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FinishReason {
    Complete,
    Length,
    ContentFilter,
    Other,
}

/// Sampling parameters sent with every request.
#[derive(Debug, Clone, PartialEq)]
pub struct GenerationParams {
    pub temperature: f32,
    pub top_p: f32,
    pub top_k: i32,
    pub max_output_tokens: i32,
}

impl Default for GenerationParams {
    fn default() -> Self {
        Self {
            temperature: 0.7,
            top_p: 1.0,
            top_k: 1,
            max_output_tokens: 2048,
        }
    }
}

/// Harm categories screened on every request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HarmCategory {
    Harassment,
    HateSpeech,
    SexuallyExplicit,
    DangerousContent,
}

impl HarmCategory {
    pub fn as_api_str(self) -> &'static str {
        match self {
            HarmCategory::Harassment => "HARM_CATEGORY_HARASSMENT",
            HarmCategory::HateSpeech => "HARM_CATEGORY_HATE_SPEECH",
            HarmCategory::SexuallyExplicit => "HARM_CATEGORY_SEXUALLY_EXPLICIT",
            HarmCategory::DangerousContent => "HARM_CATEGORY_DANGEROUS_CONTENT",
        }
    }
}

/// Blocking threshold applied to every screened category.
pub const SAFETY_THRESHOLD: &str = "BLOCK_MEDIUM_AND_ABOVE";

/// Every harm category the model is asked to screen.
pub fn screened_categories() -> Vec<HarmCategory> {
    vec![
        HarmCategory::Harassment,
        HarmCategory::HateSpeech,
        HarmCategory::SexuallyExplicit,
        HarmCategory::DangerousContent,
    ]
}

/// Trait for text generation providers (e.g., Gemini).
#[async_trait]
pub trait TextProvider: Send + Sync {
    /// Generate a single, non-streaming response for `prompt`.
    async fn generate(&self, prompt: &str) -> Result<ProviderResponse, ProviderError>;

    /// Model identifier, for logs.
    fn model(&self) -> &str;
}
