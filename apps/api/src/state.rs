use std::sync::Arc;

use crate::github::client::RepositorySource;
use crate::llm_client::TextGenerator;
use crate::resumes::store::ResumeStore;

/// Shared application state injected into all route handlers via Axum extractors.
/// Each collaborator sits behind a trait so tests can swap in doubles.
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn ResumeStore>,
    pub generator: Arc<dyn TextGenerator>,
    pub repositories: Arc<dyn RepositorySource>,
}
