use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

use crate::analysis::extractor::ExtractError;
use crate::llm_client::LlmError;

/// Application-level error type.
/// Implements `IntoResponse` so Axum handlers can return `Result<T, AppError>`.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("No file uploaded")]
    NoFile,

    #[error("Only PDF and TXT files supported")]
    UnsupportedMediaType,

    #[error("Could not extract text from file")]
    ExtractionTooShort,

    #[error("File exceeds the {limit} byte upload limit")]
    PayloadTooLarge { limit: usize },

    #[error("Invalid upload: {0}")]
    BadUpload(String),

    #[error("{0}")]
    Llm(#[from] LlmError),

    #[error("{0}")]
    Internal(#[from] anyhow::Error),
}

impl From<ExtractError> for AppError {
    fn from(err: ExtractError) -> Self {
        match err {
            ExtractError::UnsupportedMediaType => AppError::UnsupportedMediaType,
            ExtractError::TooShort { .. } => AppError::ExtractionTooShort,
            other => AppError::Internal(anyhow::Error::new(other)),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, body) = match &self {
            AppError::NoFile | AppError::UnsupportedMediaType | AppError::ExtractionTooShort => {
                (StatusCode::BAD_REQUEST, json!({ "error": self.to_string() }))
            }
            AppError::PayloadTooLarge { .. } => (
                StatusCode::PAYLOAD_TOO_LARGE,
                json!({ "error": "File too large", "message": self.to_string() }),
            ),
            AppError::BadUpload(msg) => (
                StatusCode::BAD_REQUEST,
                json!({ "error": "Invalid upload", "message": msg }),
            ),
            AppError::Llm(e) => {
                tracing::error!("LLM error: {e}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    json!({ "error": "Analysis failed", "message": e.to_string() }),
                )
            }
            AppError::Internal(e) => {
                tracing::error!("Internal error: {e:?}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    json!({ "error": "Analysis failed", "message": e.to_string() }),
                )
            }
        };

        (status, Json(body)).into_response()
    }
}
