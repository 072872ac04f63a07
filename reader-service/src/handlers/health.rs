use crate::startup::AppState;
use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use serde_json::json;

/// Liveness probe.
pub async fn health_check() -> impl IntoResponse {
    Json(json!({
        "status": "ok",
        "service": "reader-service",
        "version": env!("CARGO_PKG_VERSION")
    }))
}

/// Readiness probe: the dictionary is loaded and uploads can be written.
pub async fn readiness_check(State(state): State<AppState>) -> impl IntoResponse {
    let lexicon = state.lexicon.is_loaded();
    let uploads = state.uploads.is_ready();

    let status = if lexicon && uploads {
        StatusCode::OK
    } else {
        tracing::warn!(lexicon, uploads, "Readiness check failed");
        StatusCode::SERVICE_UNAVAILABLE
    };

    (
        status,
        Json(json!({
            "status": if status == StatusCode::OK { "ready" } else { "not_ready" },
            "checks": {
                "lexicon": lexicon,
                "uploads": uploads,
            }
        })),
    )
}
