pub mod health;

use axum::{
    routing::{get, post},
    Router,
};

use crate::ats::handlers as ats;
use crate::generation::handlers as generation;
use crate::github::handlers as github;
use crate::resumes::handlers as resumes;
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        // Resumes
        .route(
            "/api/v1/resumes",
            post(resumes::handle_create).get(resumes::handle_list),
        )
        .route(
            "/api/v1/resumes/:id",
            get(resumes::handle_get)
                .put(resumes::handle_update)
                .delete(resumes::handle_delete),
        )
        // AI generation
        .route("/api/v1/ai/generate", post(generation::handle_generate))
        .route(
            "/api/v1/ai/generate-resume",
            post(generation::handle_generate_resume),
        )
        // ATS
        .route("/api/v1/ats/calculate", post(ats::handle_calculate))
        // Repository analysis
        .route("/api/v1/github/analyze", post(github::handle_analyze))
        .with_state(state)
}
