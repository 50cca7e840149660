//! Axum route handlers for the Cover Letter API.

use std::collections::HashMap;

use axum::{extract::State, Json};
use chrono::Local;
use serde::{Deserialize, Serialize};

use crate::cover_letter::formatter::{format_structured_letter, FormattedLetter};
use crate::cover_letter::generator::{generate_cover_letter, CoverLetterRequest, CoverLetterResult};
use crate::cover_letter::placeholders::{apply_placeholders, find_placeholders, Placeholder};
use crate::errors::AppError;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct FormatRequest {
    pub input: String,
    #[serde(default)]
    pub name: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct PlaceholderRequest {
    pub letter: String,
    #[serde(default)]
    pub values: HashMap<String, String>,
}

#[derive(Debug, Serialize)]
pub struct PlaceholderResponse {
    pub success: bool,
    pub letter: String,
    /// Placeholders still present after applying `values`.
    pub placeholders: Vec<Placeholder>,
}

/// POST /api/v1/cover-letter
///
/// Generates a letter for `company`/`role`. Uses the model when one is
/// configured and falls back to the built-in template otherwise.
pub async fn handle_generate(
    State(state): State<AppState>,
    Json(request): Json<CoverLetterRequest>,
) -> Result<Json<CoverLetterResult>, AppError> {
    let result = generate_cover_letter(&request, state.generator.as_deref()).await?;
    Ok(Json(result))
}

/// POST /api/v1/cover-letter/format
///
/// Formats structured model output (JSON or flattened text) into a dated letter.
pub async fn handle_format(
    Json(request): Json<FormatRequest>,
) -> Result<Json<FormattedLetter>, AppError> {
    let today = Local::now().date_naive();
    let formatted = format_structured_letter(&request.input, request.name.as_deref(), today)?;
    Ok(Json(formatted))
}

/// POST /api/v1/cover-letter/placeholders
///
/// Fills any supplied values and lists the blanks that remain.
pub async fn handle_placeholders(
    Json(request): Json<PlaceholderRequest>,
) -> Json<PlaceholderResponse> {
    let letter = apply_placeholders(&request.letter, &request.values);
    let placeholders = find_placeholders(&letter);
    Json(PlaceholderResponse {
        success: true,
        letter,
        placeholders,
    })
}
