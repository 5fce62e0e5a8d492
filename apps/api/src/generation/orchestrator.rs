//! Generation orchestration.
//!
//! Flow: content-type tag → Prompt Builder → TextGenerator → text.
//! The complete-résumé path additionally scores the snapshot with the ATS Scorer.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::info;

use crate::ats::scorer;
use crate::errors::AppError;
use crate::generation::prompt_builder::{build_complete_resume_prompt, build_prompt};
use crate::llm_client::TextGenerator;
use crate::models::resume::{
    default_experience_level, experience_level_or_default, null_as_default, ResumeSnapshot,
};

// ────────────────────────────────────────────────────────────────────────────
// Data models
// ────────────────────────────────────────────────────────────────────────────

/// One content fragment to generate.
///
/// `content_type` stays a plain string on the wire so an unknown tag is reported as
/// `UnsupportedContentType` rather than a body decode failure.
#[derive(Debug, Clone, Deserialize)]
pub struct GenerateFieldRequest {
    #[serde(alias = "prompt_type", alias = "promptType", alias = "contentType")]
    pub content_type: String,
    #[serde(default)]
    pub data: Value,
    #[serde(alias = "targetRole", deserialize_with = "null_as_default")]
    pub target_role: String,
    #[serde(
        default = "default_experience_level",
        alias = "experienceLevel",
        deserialize_with = "experience_level_or_default"
    )]
    pub experience_level: String,
}

/// Generated résumé text bundled with the score of the snapshot it was built from.
#[derive(Debug, Clone, Serialize)]
pub struct CompleteResumeDraft {
    pub generated_content: String,
    pub target_role: String,
    pub experience_level: String,
    pub ats_optimized: bool,
    pub ats_score: u32,
    pub generated_at: DateTime<Utc>,
}

// ────────────────────────────────────────────────────────────────────────────
// Entry points
// ────────────────────────────────────────────────────────────────────────────

pub async fn generate_field(
    generator: &dyn TextGenerator,
    request: GenerateFieldRequest,
) -> Result<String, AppError> {
    let GenerateFieldRequest {
        content_type,
        data,
        target_role,
        experience_level,
    } = request;

    let built = build_prompt(&content_type, data, &target_role, &experience_level)?;
    info!("Generating {content_type} for {experience_level} {target_role}");

    let text = generator
        .generate(&built.prompt, built.system_instruction)
        .await?;
    Ok(text)
}

pub async fn generate_complete_resume(
    generator: &dyn TextGenerator,
    resume: &ResumeSnapshot,
    target_role: &str,
    experience_level: &str,
    ats_optimized: bool,
) -> Result<CompleteResumeDraft, AppError> {
    let built = build_complete_resume_prompt(resume, target_role, experience_level);
    info!("Generating complete resume for {experience_level} {target_role}");

    let generated_content = generator
        .generate(&built.prompt, built.system_instruction)
        .await?;
    let ats_score = scorer::score(resume);

    info!(
        "Complete resume generated: {} chars, ATS score {ats_score}",
        generated_content.len()
    );

    Ok(CompleteResumeDraft {
        generated_content,
        target_role: target_role.to_string(),
        experience_level: experience_level.to_string(),
        ats_optimized,
        ats_score,
        generated_at: Utc::now(),
    })
}

// ────────────────────────────────────────────────────────────────────────────
// Tests
// ────────────────────────────────────────────────────────────────────────────
