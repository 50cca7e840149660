//! Axum route handlers for the Jobs API.

use axum::{extract::State, Json};
use rand::rngs::StdRng;
use rand::SeedableRng;

use crate::jobs::search::{search_jobs, JobSearchRequest, JobSearchResult};
use crate::state::AppState;

/// POST /api/v1/jobs/match
///
/// Ranks postings from the configured source against the request's skills.
/// Never fails: source errors degrade to flagged demo data.
pub async fn handle_match_jobs(
    State(state): State<AppState>,
    Json(request): Json<JobSearchRequest>,
) -> Json<JobSearchResult> {
    let mut rng = StdRng::from_entropy();
    let result = search_jobs(
        &request,
        state.job_source.as_ref(),
        state.job_cache.as_ref(),
        &mut rng,
    )
    .await;
    Json(result)
}
