//! Axum route handlers for the Interview API.

use axum::{extract::State, Json};
use rand::rngs::StdRng;
use rand::SeedableRng;

use crate::errors::AppError;
use crate::interview::prep::{get_interview_questions, InterviewRequest, InterviewSet};
use crate::state::AppState;

/// POST /api/v1/interview/questions
///
/// Bank questions by default. With `skills` and a configured model, the set
/// leads with personalized questions and reports `personalized: true`.
pub async fn handle_questions(
    State(state): State<AppState>,
    Json(request): Json<InterviewRequest>,
) -> Result<Json<InterviewSet>, AppError> {
    let mut rng = StdRng::from_entropy();
    let set = get_interview_questions(&request, state.generator.as_deref(), &mut rng).await?;
    Ok(Json(set))
}
