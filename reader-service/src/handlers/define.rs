use crate::dtos::{DefineRequest, DefinitionResponse};
use crate::services::lexicon::normalize_word;
use crate::services::metrics::record_definition;
use crate::startup::AppState;
use axum::{extract::State, Json};
use service_core::error::AppError;
use service_core::middleware::JsonBody;

pub async fn define_word(
    State(state): State<AppState>,
    JsonBody(payload): JsonBody<DefineRequest>,
) -> Result<Json<DefinitionResponse>, AppError> {
    let word = normalize_word(&payload.word);
    if word.is_empty() {
        return Err(AppError::bad_request("No word provided"));
    }

    let sense = state.lexicon.first_sense(&word).map_err(|e| {
        tracing::error!(word = %word, error = %e, "Lexicon lookup failed");
        e
    })?;

    match sense {
        Some(sense) => {
            tracing::debug!(word = %word, lemma = %sense.lemma, pos = ?sense.pos, "Definition found");
            record_definition(true);
            Ok(Json(sense.into()))
        }
        None => {
            tracing::debug!(word = %word, "No definition found");
            record_definition(false);
            Err(AppError::NotFound(anyhow::anyhow!(
                "No definition found for \"{}\"",
                word
            )))
        }
    }
}
