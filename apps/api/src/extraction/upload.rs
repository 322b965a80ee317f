//! Request body extractor shared by every analysis route.
//!
//! Accepts either `multipart/form-data` (a `file` part and/or a `text` part) or a
//! JSON body `{"text": "..."}`. A file takes precedence over text.

use async_trait::async_trait;
use axum::{
    body::Bytes,
    extract::{FromRequest, Multipart, Request},
    http::header::CONTENT_TYPE,
};
use serde::Deserialize;

use crate::errors::AppError;
use crate::extraction::{extract, Document, DocumentFormat};

#[derive(Debug, Deserialize)]
struct TextPayload {
    text: Option<String>,
}

/// What the caller submitted: an uploaded document or raw text.
#[derive(Debug)]
pub enum RequestInput {
    Document { filename: String, document: Document },
    Text(String),
}

impl RequestInput {
    /// Resolves the input to plain text, running the extractor for uploads.
    pub fn into_text(self) -> Result<String, AppError> {
        match self {
            RequestInput::Document { filename, document } => {
                tracing::debug!(%filename, "Extracting uploaded document");
                Ok(extract(&document)?)
            }
            RequestInput::Text(text) => Ok(text),
        }
    }
}

#[async_trait]
impl<S> FromRequest<S> for RequestInput
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let is_multipart = req
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .map(|ct| ct.starts_with("multipart/form-data"))
            .unwrap_or(false);

        if is_multipart {
            let multipart = Multipart::from_request(req, state)
                .await
                .map_err(|e| AppError::Validation(e.body_text()))?;
            return from_multipart(multipart).await;
        }

        let body = Bytes::from_request(req, state)
            .await
            .map_err(|e| AppError::Validation(e.body_text()))?;
        if body.is_empty() {
            return Err(AppError::NoInputProvided);
        }

        let payload: TextPayload = serde_json::from_slice(&body)
            .map_err(|e| AppError::Validation(format!("Invalid JSON body: {e}")))?;
        text_input(payload.text)
    }
}

async fn from_multipart(mut multipart: Multipart) -> Result<RequestInput, AppError> {
    let mut text = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::Validation(e.body_text()))?
    {
        let name = field.name().map(str::to_owned);
        match name.as_deref() {
            Some("file") => {
                let filename = field.file_name().unwrap_or_default().to_string();
                if filename.is_empty() {
                    // Browsers send an unnamed empty part when no file was chosen.
                    continue;
                }
                // Format is resolved before the part body is read.
                let format = DocumentFormat::from_filename(&filename)?;
                let bytes = field
                    .bytes()
                    .await
                    .map_err(|e| AppError::Validation(e.body_text()))?;
                return Ok(RequestInput::Document {
                    filename,
                    document: Document::new(format, bytes),
                });
            }
            Some("text") => {
                text = Some(
                    field
                        .text()
                        .await
                        .map_err(|e| AppError::Validation(e.body_text()))?,
                );
            }
            _ => {}
        }
    }

    text_input(text)
}

fn text_input(text: Option<String>) -> Result<RequestInput, AppError> {
    match text {
        Some(text) if !text.trim().is_empty() => Ok(RequestInput::Text(text)),
        _ => Err(AppError::NoInputProvided),
    }
}
