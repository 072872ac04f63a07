use crate::dtos::UploadResponse;
use crate::services::extraction;
use crate::services::metrics::record_upload;
use crate::startup::AppState;
use axum::{
    extract::{multipart::MultipartError, Multipart, State},
    http::StatusCode,
    Json,
};
use service_core::error::AppError;

const FILE_FIELD: &str = "file";

/// Accept a PDF as multipart field `file` and return its paragraphs.
///
/// The stored copy is owned by a guard for the whole request, so it is gone
/// by the time the response is written, whether extraction worked or not.
pub async fn upload_file(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<Json<UploadResponse>, AppError> {
    let (file_name, data) = read_file_field(&mut multipart).await.inspect_err(|_| {
        record_upload("rejected", 0);
    })?;

    tracing::info!(file_name = %file_name, size = data.len(), "Upload received");

    let stored = state.uploads.store(&file_name, data).await?;
    let result = extraction::extract_paragraphs(state.extractor.as_ref(), stored.path()).await;

    let stored_path = stored.path().to_path_buf();
    if let Err(e) = stored.close() {
        tracing::warn!(path = ?stored_path, error = %e, "Failed to remove upload");
    }

    match result {
        Ok(paragraphs) => {
            record_upload("success", paragraphs.len());
            Ok(Json(UploadResponse::new(paragraphs)))
        }
        Err(e) => {
            tracing::warn!(file_name = %file_name, error = %e, "Extraction failed");
            record_upload("failed", 0);
            Err(e.into())
        }
    }
}

/// Find the `file` part and read it whole.
async fn read_file_field(multipart: &mut Multipart) -> Result<(String, Vec<u8>), AppError> {
    while let Some(field) = multipart.next_field().await.map_err(multipart_error)? {
        if field.name() != Some(FILE_FIELD) {
            continue;
        }

        // A part without a filename is a plain form field, not a file.
        let Some(file_name) = field.file_name().map(str::to_string) else {
            continue;
        };
        if file_name.is_empty() {
            return Err(AppError::bad_request("No selected file"));
        }

        let data = field.bytes().await.map_err(multipart_error)?.to_vec();
        return Ok((file_name, data));
    }

    Err(AppError::bad_request("No file part"))
}

fn multipart_error(e: MultipartError) -> AppError {
    if e.status() == StatusCode::PAYLOAD_TOO_LARGE {
        AppError::PayloadTooLarge(e.body_text())
    } else {
        AppError::bad_request(format!("Failed to read multipart body: {}", e.body_text()))
    }
}
