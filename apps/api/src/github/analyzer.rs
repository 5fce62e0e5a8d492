//! Repository analysis pipeline.
//!
//! Strict order: parse URL → metadata → languages → README → generate bullets.
//! Metadata and generation are mandatory; languages and README degrade to empty.

use serde::Serialize;
use tracing::{info, warn};

use crate::errors::AppError;
use crate::generation::prompt_builder::build_repository_bullets_prompt;
use crate::github::client::{GitHubError, RepositorySource};
use crate::github::url::parse_repo_url;
use crate::llm_client::TextGenerator;

/// README excerpt length handed to the prompt, in characters.
pub const MAX_README_CHARS: usize = 1000;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RepositoryAnalysis {
    pub name: String,
    pub description: String,
    pub url: String,
    pub technologies: Vec<String>,
    pub readme: String,
    pub bullets: String,
    pub stars: u64,
    pub primary_language: Option<String>,
}

/// First `max` characters of `text`, never splitting a character.
pub fn truncate_chars(text: &str, max: usize) -> &str {
    match text.char_indices().nth(max) {
        Some((byte_idx, _)) => &text[..byte_idx],
        None => text,
    }
}

fn fetch_error(err: GitHubError) -> AppError {
    match err {
        GitHubError::Status { status, message } => AppError::RepositoryFetch {
            status: Some(status),
            message,
        },
        other => AppError::RepositoryFetch {
            status: other.status(),
            message: other.to_string(),
        },
    }
}

pub async fn analyze_repository(
    source: &dyn RepositorySource,
    generator: &dyn TextGenerator,
    repo_url: &str,
) -> Result<RepositoryAnalysis, AppError> {
    let repo = parse_repo_url(repo_url)
        .map_err(|_| AppError::InvalidRepositoryUrl(repo_url.trim().to_string()))?;

    info!("Analyzing repository {repo}");

    let metadata = source.fetch_metadata(&repo).await.map_err(fetch_error)?;

    let technologies = match source.fetch_languages(&repo).await {
        Ok(languages) => languages,
        Err(e) => {
            warn!("Language fetch failed for {repo}, continuing without: {e}");
            Vec::new()
        }
    };

    let readme = match source.fetch_readme(&repo).await {
        Ok(text) => truncate_chars(&text, MAX_README_CHARS).to_string(),
        Err(e) => {
            warn!("README fetch failed for {repo}, continuing without: {e}");
            String::new()
        }
    };

    let built = build_repository_bullets_prompt(
        &metadata.name,
        &metadata.description,
        &readme,
        &technologies,
    );
    let bullets = generator
        .generate(&built.prompt, built.system_instruction)
        .await?;

    info!(
        "Repository {repo} analysed: {} technologies, {} README chars",
        technologies.len(),
        readme.chars().count()
    );

    Ok(RepositoryAnalysis {
        url: metadata.html_url.unwrap_or_else(|| repo.web_url()),
        name: metadata.name,
        description: metadata.description,
        technologies,
        readme,
        bullets,
        stars: metadata.stars,
        primary_language: metadata.language,
    })
}
