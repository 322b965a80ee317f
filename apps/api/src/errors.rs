use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

use crate::extraction::ExtractionError;

/// Application-level error type.
/// Implements `IntoResponse` so Axum handlers can return `Result<T, AppError>`.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Unsupported format: {0}")]
    UnsupportedFormat(String),

    #[error("Corrupt document: {0}")]
    CorruptDocument(String),

    #[error("No text or file provided")]
    NoInputProvided,

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Model not loaded")]
    ModelUnavailable,

    #[error("Classifier error: {0}")]
    Classifier(String),
}

impl From<ExtractionError> for AppError {
    fn from(err: ExtractionError) -> Self {
        match err {
            ExtractionError::UnsupportedFormat(ext) => AppError::UnsupportedFormat(ext),
            ExtractionError::CorruptDocument(reason) => AppError::CorruptDocument(reason),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code, message) = match &self {
            AppError::UnsupportedFormat(ext) => (
                StatusCode::UNSUPPORTED_MEDIA_TYPE,
                "UNSUPPORTED_FORMAT",
                format!("Unsupported file type '{ext}'. Upload a .txt, .pdf or .docx file"),
            ),
            AppError::CorruptDocument(reason) => (
                StatusCode::UNPROCESSABLE_ENTITY,
                "CORRUPT_DOCUMENT",
                format!("Error processing document: {reason}"),
            ),
            AppError::NoInputProvided => (
                StatusCode::BAD_REQUEST,
                "NO_INPUT_PROVIDED",
                "No text or file provided".to_string(),
            ),
            AppError::Validation(msg) => (StatusCode::BAD_REQUEST, "VALIDATION_ERROR", msg.clone()),
            AppError::ModelUnavailable => {
                tracing::error!("Ranking requested but no career model is loaded");
                (
                    StatusCode::SERVICE_UNAVAILABLE,
                    "MODEL_UNAVAILABLE",
                    "Model not loaded".to_string(),
                )
            }
            AppError::Classifier(msg) => {
                tracing::error!("Classifier error: {msg}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "CLASSIFIER_ERROR",
                    "The career model failed to produce a prediction".to_string(),
                )
            }
        };

        let body = Json(json!({
            "error": {
                "code": code,
                "message": message
            }
        }));

        (status, body).into_response()
    }
}
