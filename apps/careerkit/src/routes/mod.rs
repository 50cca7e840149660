pub mod health;

use std::net::SocketAddr;

use anyhow::{Context, Result};
use axum::{
    routing::{get, post},
    Router,
};
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::info;

use crate::code::handlers as code;
use crate::cover_letter::handlers as cover_letter;
use crate::interview::handlers as interview;
use crate::jobs::handlers as jobs;
use crate::resume::handlers as resume;
use crate::state::AppState;
use crate::template::handlers as template;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        .route("/api/v1/resume/analyze", post(resume::handle_analyze))
        .route("/api/v1/jobs/match", post(jobs::handle_match_jobs))
        .route("/api/v1/code/analyze", post(code::handle_analyze_code))
        .route(
            "/api/v1/interview/questions",
            post(interview::handle_questions),
        )
        .route("/api/v1/cover-letter", post(cover_letter::handle_generate))
        .route(
            "/api/v1/cover-letter/format",
            post(cover_letter::handle_format),
        )
        .route(
            "/api/v1/cover-letter/placeholders",
            post(cover_letter::handle_placeholders),
        )
        .route("/api/v1/template/fill", post(template::handle_fill))
        .with_state(state)
}

/// Binds `host:port` and serves until the process is stopped.
pub async fn serve(state: AppState, host: &str, port: u16) -> Result<()> {
    let app = build_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive());

    let addr: SocketAddr = format!("{host}:{port}")
        .parse()
        .with_context(|| format!("Invalid listen address {host}:{port}"))?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("Could not bind {addr}"))?;
    axum::serve(listener, app).await?;

    Ok(())
}
