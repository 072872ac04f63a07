use service_core::error::AppError;

/// Translation is switched off; the route stays so clients get a clear answer.
pub async fn translate_text() -> Result<(), AppError> {
    Err(AppError::NotImplemented(
        "Translation is disabled".to_string(),
    ))
}
