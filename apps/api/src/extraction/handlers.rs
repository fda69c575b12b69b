use axum::{
    extract::{Multipart, State},
    Json,
};
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::errors::AppError;
use crate::extraction::text::{preview, word_count};
use crate::routes::form::MultipartForm;
use crate::state::AppState;

pub const EMPTY_UPLOAD_MESSAGE: &str =
    "Could not extract text from the file. Please ensure the file is not corrupted.";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UploadResponse {
    pub message: String,
    pub filename: String,
    pub text_preview: String,
    pub word_count: usize,
    pub char_count: usize,
}

/// POST /api/upload-resume
pub async fn handle_upload_resume(
    State(state): State<AppState>,
    multipart: Multipart,
) -> Result<Json<UploadResponse>, AppError> {
    let mut form = MultipartForm::read(multipart).await?;
    let upload = form
        .take_file(&["file"])
        .ok_or_else(|| AppError::Validation("No file provided".to_string()))?;

    let doc = state.uploads.process(upload).await?;
    if doc.text.trim().is_empty() {
        return Err(AppError::UnprocessableEntity(EMPTY_UPLOAD_MESSAGE.to_string()));
    }

    info!("Processed upload {} ({})", doc.filename, doc.kind);

    Ok(Json(UploadResponse {
        message: "Resume uploaded and processed successfully".to_string(),
        text_preview: preview(&doc.text, state.config.preview_chars),
        word_count: word_count(&doc.text),
        char_count: doc.text.chars().count(),
        filename: doc.filename,
    }))
}
