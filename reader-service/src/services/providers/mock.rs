//! Mock provider implementation for testing.

use super::{FinishReason, ProviderError, ProviderResponse, TextProvider};
use async_trait::async_trait;
use std::sync::Mutex;

/// What the mock answers with.
#[derive(Debug, Clone)]
pub enum MockBehavior {
    /// Echo the prompt back, prefixed.
    Echo,
    /// Reply with a fixed text.
    Fixed(String),
    /// Behave as if safety filters blocked the output.
    Blocked,
    /// Fail as an unreachable upstream.
    Unreachable,
    /// Fail as a timed out upstream.
    TimedOut,
}

/// Mock text provider for testing; remembers the last prompt it was given.
pub struct MockTextProvider {
    behavior: MockBehavior,
    last_prompt: Mutex<Option<String>>,
}

impl MockTextProvider {
    pub fn new(behavior: MockBehavior) -> Self {
        Self {
            behavior,
            last_prompt: Mutex::new(None),
        }
    }

    pub fn last_prompt(&self) -> Option<String> {
        self.last_prompt
            .lock()
            .map(|guard| guard.clone())
            .unwrap_or(None)
    }
}

#[async_trait]
impl TextProvider for MockTextProvider {
    async fn generate(&self, prompt: &str) -> Result<ProviderResponse, ProviderError> {
        if let Ok(mut guard) = self.last_prompt.lock() {
            *guard = Some(prompt.to_string());
        }

        let text = match &self.behavior {
            MockBehavior::Echo => format!("Mock response for: {}", prompt),
            MockBehavior::Fixed(text) => text.clone(),
            MockBehavior::Blocked => return Err(ProviderError::ContentFiltered),
            MockBehavior::Unreachable => {
                return Err(ProviderError::NetworkError(
                    "connection refused".to_string(),
                ));
            }
            MockBehavior::TimedOut => return Err(ProviderError::Timeout(120)),
        };

        Ok(ProviderResponse {
            text,
            input_tokens: prompt.len() as i32 / 4,
            output_tokens: 10,
            finish_reason: FinishReason::Complete,
        })
    }

    fn model(&self) -> &str {
        "mock"
    }
}
