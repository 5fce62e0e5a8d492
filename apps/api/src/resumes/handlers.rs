use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use uuid::Uuid;

use crate::auth::Owner;
use crate::errors::AppError;
use crate::models::resume::ResumeRecord;
use crate::resumes::service::{
    create_resume, delete_resume, get_resume, list_resumes, update_resume, CreateResumeRequest,
    UpdateResumeRequest,
};
use crate::state::AppState;

/// POST /api/v1/resumes
pub async fn handle_create(
    State(state): State<AppState>,
    Owner(owner): Owner,
    Json(request): Json<CreateResumeRequest>,
) -> Result<(StatusCode, Json<ResumeRecord>), AppError> {
    let record = create_resume(state.store.as_ref(), &owner, request).await?;
    Ok((StatusCode::CREATED, Json(record)))
}

/// GET /api/v1/resumes
pub async fn handle_list(
    State(state): State<AppState>,
    Owner(owner): Owner,
) -> Result<Json<Vec<ResumeRecord>>, AppError> {
    Ok(Json(list_resumes(state.store.as_ref(), &owner).await?))
}

/// GET /api/v1/resumes/:id
pub async fn handle_get(
    State(state): State<AppState>,
    Owner(owner): Owner,
    Path(id): Path<Uuid>,
) -> Result<Json<ResumeRecord>, AppError> {
    Ok(Json(get_resume(state.store.as_ref(), &owner, id).await?))
}

/// PUT /api/v1/resumes/:id
///
/// Send `expected_updated_at` to reject the write if someone else saved first.
pub async fn handle_update(
    State(state): State<AppState>,
    Owner(owner): Owner,
    Path(id): Path<Uuid>,
    Json(request): Json<UpdateResumeRequest>,
) -> Result<Json<ResumeRecord>, AppError> {
    Ok(Json(
        update_resume(state.store.as_ref(), &owner, id, request).await?,
    ))
}

/// DELETE /api/v1/resumes/:id
pub async fn handle_delete(
    State(state): State<AppState>,
    Owner(owner): Owner,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, AppError> {
    delete_resume(state.store.as_ref(), &owner, id).await?;
    Ok(StatusCode::NO_CONTENT)
}
