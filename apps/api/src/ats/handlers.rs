use axum::Json;
use serde::Serialize;
use tracing::info;

use crate::ats::scorer::{breakdown, feedback, AtsFeedback, ScoreBreakdown};
use crate::auth::Owner;
use crate::errors::AppError;
use crate::models::resume::ResumeSnapshot;

#[derive(Debug, Serialize)]
pub struct AtsReportResponse {
    pub score: u32,
    pub breakdown: ScoreBreakdown,
    pub feedback: AtsFeedback,
}

/// POST /api/v1/ats/calculate
///
/// Scores the submitted snapshot. Nothing is persisted; any `ats_score` in the body is ignored.
pub async fn handle_calculate(
    Owner(_owner): Owner,
    Json(resume): Json<ResumeSnapshot>,
) -> Result<Json<AtsReportResponse>, AppError> {
    let breakdown = breakdown(&resume);
    let feedback = feedback(&resume);
    info!(
        "ATS score {} ({} suggestions)",
        breakdown.total,
        feedback.suggestions.len()
    );

    Ok(Json(AtsReportResponse {
        score: breakdown.total,
        breakdown,
        feedback,
    }))
}
