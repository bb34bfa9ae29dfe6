//! Axum route handler for the Analysis API.

use axum::{
    extract::{
        multipart::{MultipartError, MultipartRejection},
        Multipart, State,
    },
    http::StatusCode,
    Json,
};
use serde_json::Value;
use tracing::{info, info_span, Instrument};
use uuid::Uuid;

use crate::analysis::models::{MediaType, UploadedFile};
use crate::errors::AppError;
use crate::state::AppState;

/// Multipart form field carrying the resume.
pub const RESUME_FIELD: &str = "resume";

/// POST /analyze
///
/// Accepts a multipart upload with a `resume` field (PDF or plain text) and
/// returns the model's assessment, or the canned fallback when the reply
/// cannot be decoded.
pub async fn handle_analyze(
    State(state): State<AppState>,
    multipart: Result<Multipart, MultipartRejection>,
) -> Result<Json<Value>, AppError> {
    let multipart = multipart.map_err(|_| AppError::NoFile)?;
    let file = read_resume_field(multipart, state.config.max_upload_bytes)
        .await?
        .ok_or(AppError::NoFile)?;

    let span = info_span!(
        "analyze",
        request_id = %Uuid::new_v4(),
        file = %file.original_name
    );

    async move {
        info!(
            "Processing {} ({:?}, {} bytes)",
            file.original_name,
            file.media_type,
            file.size_bytes()
        );
        let outcome = state.analysis.analyze(&file).await?;
        if outcome.is_fallback() {
            info!("Responding with fallback analysis");
        }
        Ok::<_, AppError>(Json(outcome.into_json()))
    }
    .instrument(span)
    .await
}

/// Reads the first `resume` field. Other fields are skipped.
async fn read_resume_field(
    mut multipart: Multipart,
    max_bytes: usize,
) -> Result<Option<UploadedFile>, AppError> {
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| upload_error(e, max_bytes))?
    {
        if field.name() != Some(RESUME_FIELD) {
            continue;
        }

        let original_name = field.file_name().unwrap_or("resume").to_string();
        let media_type = MediaType::from_content_type(field.content_type());
        let bytes = field
            .bytes()
            .await
            .map_err(|e| upload_error(e, max_bytes))?;

        if bytes.len() > max_bytes {
            return Err(AppError::PayloadTooLarge { limit: max_bytes });
        }

        return Ok(Some(UploadedFile {
            bytes,
            media_type,
            original_name,
        }));
    }

    Ok(None)
}

fn upload_error(err: MultipartError, limit: usize) -> AppError {
    if err.status() == StatusCode::PAYLOAD_TOO_LARGE {
        AppError::PayloadTooLarge { limit }
    } else {
        AppError::BadUpload(err.body_text())
    }
}
