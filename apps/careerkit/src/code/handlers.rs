//! Axum route handlers for the Code API.

use axum::Json;
use serde::Deserialize;

use crate::code::analyzer::{analyze_code, CodeReport};
use crate::errors::AppError;

#[derive(Debug, Deserialize)]
pub struct AnalyzeCodeRequest {
    /// Used for language detection only.
    pub file_name: String,
    pub code: String,
}

/// POST /api/v1/code/analyze
pub async fn handle_analyze_code(
    Json(request): Json<AnalyzeCodeRequest>,
) -> Result<Json<CodeReport>, AppError> {
    let report = analyze_code(&request.file_name, &request.code)?;
    Ok(Json(report))
}
