//! Axum route handlers for resume uploads.

use axum::{extract::Multipart, Json};
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::documents::{extract_text_blocking, DocumentKind};
use crate::errors::AppError;

const FILE_FIELD: &str = "file";

#[derive(Debug, Serialize, Deserialize)]
pub struct UploadResponse {
    pub text: String,
}

/// POST /api/v1/upload/resume
///
/// Accepts a multipart `file` field (.pdf or .docx) and returns its plain text.
/// Nothing is persisted.
pub async fn handle_upload_resume(
    mut multipart: Multipart,
) -> Result<Json<UploadResponse>, AppError> {
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::Validation(format!("Invalid multipart body: {e}")))?
    {
        if field.name() != Some(FILE_FIELD) {
            continue;
        }

        let filename = field
            .file_name()
            .map(str::to_string)
            .ok_or_else(|| AppError::Validation("file field must carry a filename".to_string()))?;
        let kind = DocumentKind::from_filename(&filename)?;

        let bytes = field
            .bytes()
            .await
            .map_err(|e| AppError::Validation(format!("Could not read upload: {e}")))?;

        let text = extract_text_blocking(kind, bytes.to_vec()).await?;
        info!("Extracted resume text: {:?}, {} bytes in, {} chars out", kind, bytes.len(), text.len());

        return Ok(Json(UploadResponse { text }));
    }

    Err(AppError::Validation(format!(
        "multipart field '{FILE_FIELD}' is required"
    )))
}
