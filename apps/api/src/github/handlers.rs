//! Axum route handlers for the Repository Analyzer.

use axum::{extract::State, Json};
use serde::Deserialize;

use crate::auth::Owner;
use crate::errors::AppError;
use crate::github::analyzer::{analyze_repository, RepositoryAnalysis};
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct AnalyzeRepositoryRequest {
    #[serde(alias = "repoUrl")]
    pub repo_url: String,
}

/// POST /api/v1/github/analyze
pub async fn handle_analyze(
    State(state): State<AppState>,
    Owner(_owner): Owner,
    Json(request): Json<AnalyzeRepositoryRequest>,
) -> Result<Json<RepositoryAnalysis>, AppError> {
    if request.repo_url.trim().is_empty() {
        return Err(AppError::Validation("repo_url cannot be empty".to_string()));
    }

    let analysis = analyze_repository(
        state.repositories.as_ref(),
        state.generator.as_ref(),
        &request.repo_url,
    )
    .await?;

    Ok(Json(analysis))
}
