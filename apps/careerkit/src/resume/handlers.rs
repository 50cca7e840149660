//! Axum route handlers for the Resume API.

use axum::{
    extract::{FromRequest, Multipart, Request},
    http::header::CONTENT_TYPE,
    Json,
};
use bytes::Bytes;
use serde::Deserialize;
use tracing::info;

use crate::documents::extract_text_from_bytes;
use crate::errors::AppError;
use crate::resume::analyzer::{analyze_resume, ResumeReport};

const UPLOAD_FIELD: &str = "file";

#[derive(Debug, Deserialize)]
pub struct AnalyzeTextRequest {
    pub text: String,
}

/// POST /api/v1/resume/analyze
///
/// Accepts either `{"text": "..."}` or a multipart upload with a `file`
/// field (PDF, DOCX, TXT or MD).
pub async fn handle_analyze(request: Request) -> Result<Json<ResumeReport>, AppError> {
    let is_multipart = request
        .headers()
        .get(CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .is_some_and(|v| v.starts_with("multipart/form-data"));

    let text = if is_multipart {
        let multipart = Multipart::from_request(request, &())
            .await
            .map_err(|e| AppError::Validation(e.body_text()))?;
        let (file_name, bytes) = read_upload(multipart).await?;
        info!("Analyzing uploaded resume {file_name} ({} bytes)", bytes.len());
        extract_text_from_bytes(&file_name, &bytes)?
    } else {
        let Json(body) = Json::<AnalyzeTextRequest>::from_request(request, &())
            .await
            .map_err(|e| AppError::Validation(e.body_text()))?;
        body.text
    };

    if text.trim().is_empty() {
        return Err(AppError::Validation("resume text cannot be empty".to_string()));
    }

    Ok(Json(analyze_resume(&text)))
}

async fn read_upload(mut multipart: Multipart) -> Result<(String, Bytes), AppError> {
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::Validation(e.body_text()))?
    {
        if field.name() != Some(UPLOAD_FIELD) {
            continue;
        }
        let file_name = field
            .file_name()
            .map(str::to_string)
            .ok_or_else(|| AppError::Validation("upload has no file name".to_string()))?;
        let bytes = field
            .bytes()
            .await
            .map_err(|e| AppError::Validation(e.body_text()))?;
        return Ok((file_name, bytes));
    }

    Err(AppError::Validation(format!(
        "multipart body has no '{UPLOAD_FIELD}' field"
    )))
}
