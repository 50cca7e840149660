//! Axum route handlers for the Template API.

use std::collections::HashMap;

use axum::Json;
use serde::{Deserialize, Serialize};

use crate::errors::AppError;
use crate::template::Template;

#[derive(Debug, Deserialize)]
pub struct FillRequest {
    pub template: String,
    #[serde(default)]
    pub values: HashMap<String, String>,
}

#[derive(Debug, Serialize)]
pub struct FillResponse {
    pub success: bool,
    pub output: String,
    pub placeholders: Vec<String>,
}

/// POST /api/v1/template/fill
///
/// Renders the template with the supplied values. A placeholder without a
/// value is a 400.
pub async fn handle_fill(
    Json(request): Json<FillRequest>,
) -> Result<Json<FillResponse>, AppError> {
    let template = Template::parse(&request.template);
    let output = template.render(&request.values)?;
    let placeholders = template
        .placeholders()
        .into_iter()
        .map(str::to_string)
        .collect();

    Ok(Json(FillResponse {
        success: true,
        output,
        placeholders,
    }))
}
