//! Axum route handlers for the AI generation API.

use axum::{extract::State, Json};
use serde::Serialize;

use crate::auth::Owner;
use crate::errors::AppError;
use crate::generation::orchestrator::{
    generate_complete_resume, generate_field, CompleteResumeDraft, GenerateFieldRequest,
};
use crate::models::resume::{default_experience_level, ResumeSnapshot};
use crate::state::AppState;

#[derive(Debug, Serialize)]
pub struct GenerateFieldResponse {
    pub content: String,
}

/// POST /api/v1/ai/generate
pub async fn handle_generate(
    State(state): State<AppState>,
    Owner(_owner): Owner,
    Json(request): Json<GenerateFieldRequest>,
) -> Result<Json<GenerateFieldResponse>, AppError> {
    if request.target_role.trim().is_empty() {
        return Err(AppError::Validation("target_role cannot be empty".to_string()));
    }

    let content = generate_field(state.generator.as_ref(), request).await?;
    Ok(Json(GenerateFieldResponse { content }))
}

/// POST /api/v1/ai/generate-resume
///
/// Body is a résumé snapshot; its `target_role`, `experience_level` and `ats_optimized`
/// drive the draft. A blank role is passed through as-is.
pub async fn handle_generate_resume(
    State(state): State<AppState>,
    Owner(_owner): Owner,
    Json(resume): Json<ResumeSnapshot>,
) -> Result<Json<CompleteResumeDraft>, AppError> {
    let target_role = resume.target_role.trim();
    let experience_level = match resume.experience_level.trim() {
        "" => default_experience_level(),
        level => level.to_string(),
    };

    let draft = generate_complete_resume(
        state.generator.as_ref(),
        &resume,
        target_role,
        &experience_level,
        resume.ats_optimized,
    )
    .await?;

    Ok(Json(draft))
}
