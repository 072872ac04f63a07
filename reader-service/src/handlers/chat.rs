use crate::dtos::{ChatRequest, ChatResponse};
use crate::services::metrics::{record_chat, record_chat_tokens};
use crate::services::prompt::ChatPrompt;
use crate::services::providers::ProviderError;
use crate::startup::AppState;
use axum::{extract::State, Json};
use service_core::error::AppError;
use service_core::middleware::JsonBody;
use std::time::Instant;

pub async fn chat(
    State(state): State<AppState>,
    JsonBody(payload): JsonBody<ChatRequest>,
) -> Result<Json<ChatResponse>, AppError> {
    let prompt = ChatPrompt {
        selected_text: &payload.selected_text,
        book_context: &payload.book_context,
        message: &payload.message,
    }
    .render();

    let provider = state.text_provider.as_ref();
    let model = provider.model().to_string();
    let started = Instant::now();

    let result = provider.generate(&prompt).await.and_then(|response| {
        if response.text.is_empty() {
            Err(ProviderError::EmptyResponse)
        } else {
            Ok(response)
        }
    });

    match result {
        Ok(response) => {
            record_chat(&model, "success", started.elapsed());
            record_chat_tokens(&model, response.input_tokens, response.output_tokens);
            tracing::info!(
                model = %model,
                input_tokens = response.input_tokens,
                output_tokens = response.output_tokens,
                finish_reason = ?response.finish_reason,
                "Chat response generated"
            );
            Ok(Json(ChatResponse::new(response.text)))
        }
        Err(e) => {
            record_chat(&model, "error", started.elapsed());
            tracing::error!(model = %model, error = %e, "Chat error");
            Err(e.into())
        }
    }
}
