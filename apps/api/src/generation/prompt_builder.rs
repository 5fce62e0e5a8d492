//! Prompt Builder — turns a content type plus structured data into a prompt and
//! system instruction. Pure and deterministic; no I/O.
//!
//! Per-field prompts render absent inputs as "Not provided" / "Not specified".
//! The complete-résumé block instead drops absent fields and empty sections entirely.

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;

use crate::generation::prompts::{
    BULLETS_SYSTEM, COMPLETE_RESUME_PROMPT_TEMPLATE, COMPLETE_RESUME_SYSTEM,
    EXPERIENCE_BULLETS_PROMPT_TEMPLATE, OPTIMIZE_PROMPT_TEMPLATE, OPTIMIZE_SYSTEM,
    PROJECT_BULLETS_PROMPT_TEMPLATE, REPOSITORY_BULLETS_PROMPT_TEMPLATE, REPOSITORY_SYSTEM,
    SUMMARY_PROMPT_TEMPLATE, SUMMARY_SYSTEM,
};
use crate::llm_client::prompts::{fill_template, ATS_SAFE_INSTRUCTION, BULLET_OUTPUT_FORMAT};
use crate::models::resume::{
    flatten_skills, null_as_default, skill_map, string_or_list, EducationEntry, ExperienceEntry,
    PromptFields, ResumeSnapshot,
};

const NOT_PROVIDED: &str = "Not provided";
const NOT_SPECIFIED: &str = "Not specified";

// ────────────────────────────────────────────────────────────────────────────
// Content types & errors
// ────────────────────────────────────────────────────────────────────────────

/// Selects exactly one prompt template.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ContentType {
    Summary,
    ProjectBullets,
    ExperienceBullets,
    OptimizeContent,
    CompleteResume,
}

impl ContentType {
    pub fn as_str(&self) -> &'static str {
        match self {
            ContentType::Summary => "summary",
            ContentType::ProjectBullets => "project_bullets",
            ContentType::ExperienceBullets => "experience_bullets",
            ContentType::OptimizeContent => "optimize_content",
            ContentType::CompleteResume => "complete_resume",
        }
    }
}

impl fmt::Display for ContentType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ContentType {
    type Err = PromptError;

    fn from_str(tag: &str) -> Result<Self, Self::Err> {
        match tag.trim() {
            "summary" => Ok(ContentType::Summary),
            "project_bullets" => Ok(ContentType::ProjectBullets),
            "experience_bullets" => Ok(ContentType::ExperienceBullets),
            "optimize_content" => Ok(ContentType::OptimizeContent),
            "complete_resume" => Ok(ContentType::CompleteResume),
            other => Err(PromptError::UnsupportedContentType(other.to_string())),
        }
    }
}

#[derive(Debug, Error)]
pub enum PromptError {
    #[error("Unsupported content type: {0}")]
    UnsupportedContentType(String),

    #[error("Invalid {content_type} data: {message}")]
    InvalidPayload {
        content_type: ContentType,
        message: String,
    },
}

/// A complete model input: the user prompt and the system role description.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BuiltPrompt {
    pub prompt: String,
    pub system_instruction: &'static str,
}

// ────────────────────────────────────────────────────────────────────────────
// Variant payloads
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct SummaryData {
    #[serde(deserialize_with = "skill_map")]
    pub skills: BTreeMap<String, Vec<String>>,
    #[serde(deserialize_with = "null_as_default")]
    pub experience: Vec<ExperienceEntry>,
    #[serde(deserialize_with = "null_as_default")]
    pub education: Vec<EducationEntry>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ProjectBulletsData {
    pub description: String,
    #[serde(default, deserialize_with = "string_or_list")]
    pub technologies: Vec<String>,
    #[serde(default, alias = "projectInfo")]
    pub project_info: Value,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ExperienceBulletsData {
    pub role: String,
    pub company: String,
    #[serde(default)]
    pub responsibilities: Option<String>,
    #[serde(default, deserialize_with = "string_or_list")]
    pub technologies: Vec<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct OptimizeContentData {
    pub content: String,
}

/// Variant-specific data, decoded from the request's free-form mapping.
#[derive(Debug, Clone)]
pub enum GenerationPayload {
    Summary(SummaryData),
    ProjectBullets(ProjectBulletsData),
    ExperienceBullets(ExperienceBulletsData),
    OptimizeContent(OptimizeContentData),
    CompleteResume(Box<ResumeSnapshot>),
}

impl GenerationPayload {
    /// Decodes `data` for `content_type`. A null/absent mapping reads as `{}`.
    pub fn parse(content_type: ContentType, data: Value) -> Result<Self, PromptError> {
        let data = if data.is_null() {
            Value::Object(Default::default())
        } else {
            data
        };

        let payload = match content_type {
            ContentType::Summary => GenerationPayload::Summary(decode(content_type, data)?),
            ContentType::ProjectBullets => {
                let parsed: ProjectBulletsData = decode(content_type, data)?;
                require_text(content_type, "description", &parsed.description)?;
                GenerationPayload::ProjectBullets(parsed)
            }
            ContentType::ExperienceBullets => {
                let parsed: ExperienceBulletsData = decode(content_type, data)?;
                require_text(content_type, "role", &parsed.role)?;
                require_text(content_type, "company", &parsed.company)?;
                GenerationPayload::ExperienceBullets(parsed)
            }
            ContentType::OptimizeContent => {
                let parsed: OptimizeContentData = decode(content_type, data)?;
                require_text(content_type, "content", &parsed.content)?;
                GenerationPayload::OptimizeContent(parsed)
            }
            ContentType::CompleteResume => {
                GenerationPayload::CompleteResume(Box::new(decode(content_type, data)?))
            }
        };

        Ok(payload)
    }
}

fn decode<T: DeserializeOwned>(content_type: ContentType, data: Value) -> Result<T, PromptError> {
    serde_json::from_value(data).map_err(|e| PromptError::InvalidPayload {
        content_type,
        message: e.to_string(),
    })
}

fn require_text(content_type: ContentType, field: &str, value: &str) -> Result<(), PromptError> {
    if value.trim().is_empty() {
        return Err(PromptError::InvalidPayload {
            content_type,
            message: format!("`{field}` must not be empty"),
        });
    }
    Ok(())
}

// ────────────────────────────────────────────────────────────────────────────
// Builders
// ────────────────────────────────────────────────────────────────────────────

/// Tag-level entry point: rejects unknown tags, decodes the data, builds the prompt.
pub fn build_prompt(
    content_type: &str,
    data: Value,
    target_role: &str,
    experience_level: &str,
) -> Result<BuiltPrompt, PromptError> {
    let content_type: ContentType = content_type.parse()?;
    let payload = GenerationPayload::parse(content_type, data)?;
    Ok(build_payload_prompt(&payload, target_role, experience_level))
}

pub fn build_payload_prompt(
    payload: &GenerationPayload,
    target_role: &str,
    experience_level: &str,
) -> BuiltPrompt {
    match payload {
        GenerationPayload::Summary(data) => build_summary_prompt(data, target_role, experience_level),
        GenerationPayload::ProjectBullets(data) => build_project_bullets_prompt(data, target_role),
        GenerationPayload::ExperienceBullets(data) => {
            build_experience_bullets_prompt(data, target_role)
        }
        GenerationPayload::OptimizeContent(data) => build_optimize_prompt(data, target_role),
        GenerationPayload::CompleteResume(resume) => {
            build_complete_resume_prompt(resume, target_role, experience_level)
        }
    }
}

pub fn build_summary_prompt(
    data: &SummaryData,
    target_role: &str,
    experience_level: &str,
) -> BuiltPrompt {
    let skills = or_placeholder(
        flatten_skills(&data.skills).collect::<Vec<_>>().join(", "),
        NOT_PROVIDED,
    );
    let education = data
        .education
        .first()
        .and_then(|edu| edu.degree.as_deref())
        .map(str::trim)
        .filter(|degree| !degree.is_empty())
        .unwrap_or(NOT_PROVIDED);
    let experience_count = data.experience.len().to_string();

    BuiltPrompt {
        prompt: fill_template(
            SUMMARY_PROMPT_TEMPLATE,
            &[
                ("ats_instruction", ATS_SAFE_INSTRUCTION),
                ("experience_level", experience_level),
                ("target_role", target_role),
                ("experience_count", &experience_count),
                ("skills", &skills),
                ("education", education),
            ],
        ),
        system_instruction: SUMMARY_SYSTEM,
    }
}

pub fn build_project_bullets_prompt(data: &ProjectBulletsData, target_role: &str) -> BuiltPrompt {
    let technologies = or_placeholder(data.technologies.join(", "), NOT_SPECIFIED);
    let project_info = render_open_mapping(&data.project_info);

    BuiltPrompt {
        prompt: fill_template(
            PROJECT_BULLETS_PROMPT_TEMPLATE,
            &[
                ("ats_instruction", ATS_SAFE_INSTRUCTION),
                ("bullet_format", BULLET_OUTPUT_FORMAT),
                ("target_role", target_role),
                ("description", data.description.trim()),
                ("technologies", &technologies),
                ("project_info", &project_info),
            ],
        ),
        system_instruction: BULLETS_SYSTEM,
    }
}

pub fn build_experience_bullets_prompt(
    data: &ExperienceBulletsData,
    target_role: &str,
) -> BuiltPrompt {
    let technologies = or_placeholder(data.technologies.join(", "), NOT_SPECIFIED);
    let responsibilities = data
        .responsibilities
        .as_deref()
        .map(str::trim)
        .filter(|r| !r.is_empty())
        .unwrap_or(NOT_PROVIDED);

    BuiltPrompt {
        prompt: fill_template(
            EXPERIENCE_BULLETS_PROMPT_TEMPLATE,
            &[
                ("ats_instruction", ATS_SAFE_INSTRUCTION),
                ("bullet_format", BULLET_OUTPUT_FORMAT),
                ("target_role", target_role),
                ("role", data.role.trim()),
                ("company", data.company.trim()),
                ("responsibilities", responsibilities),
                ("technologies", &technologies),
            ],
        ),
        system_instruction: BULLETS_SYSTEM,
    }
}

pub fn build_optimize_prompt(data: &OptimizeContentData, target_role: &str) -> BuiltPrompt {
    BuiltPrompt {
        prompt: fill_template(
            OPTIMIZE_PROMPT_TEMPLATE,
            &[
                ("ats_instruction", ATS_SAFE_INSTRUCTION),
                ("target_role", target_role),
                ("content", data.content.trim()),
            ],
        ),
        system_instruction: OPTIMIZE_SYSTEM,
    }
}

pub fn build_complete_resume_prompt(
    resume: &ResumeSnapshot,
    target_role: &str,
    experience_level: &str,
) -> BuiltPrompt {
    let candidate_data = render_resume_block(resume);

    BuiltPrompt {
        prompt: fill_template(
            COMPLETE_RESUME_PROMPT_TEMPLATE,
            &[
                ("experience_level", experience_level),
                ("target_role", target_role),
                ("candidate_data", &candidate_data),
            ],
        ),
        system_instruction: COMPLETE_RESUME_SYSTEM,
    }
}

/// Bullet prompt for an analysed repository. Same action-verb and ATS rules as
/// project bullets.
pub fn build_repository_bullets_prompt(
    name: &str,
    description: &str,
    readme: &str,
    technologies: &[String],
) -> BuiltPrompt {
    let technologies = or_placeholder(technologies.join(", "), NOT_SPECIFIED);
    let description = non_blank_or(description, NOT_PROVIDED);
    let readme = non_blank_or(readme, NOT_PROVIDED);

    BuiltPrompt {
        prompt: fill_template(
            REPOSITORY_BULLETS_PROMPT_TEMPLATE,
            &[
                ("ats_instruction", ATS_SAFE_INSTRUCTION),
                ("bullet_format", BULLET_OUTPUT_FORMAT),
                ("name", name),
                ("description", description),
                ("technologies", &technologies),
                ("readme", readme),
            ],
        ),
        system_instruction: REPOSITORY_SYSTEM,
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Complete-résumé block
// ────────────────────────────────────────────────────────────────────────────

/// Serializes every populated section, one `LABEL: field=value | field=value` line per
/// entry, sections separated by a blank line. Order: personal info, skills, education,
/// experience, projects, certifications, achievements.
pub fn render_resume_block(resume: &ResumeSnapshot) -> String {
    let skill_fields: Vec<(&str, String)> = resume
        .skills
        .iter()
        .filter_map(|(category, items)| {
            let joined = items
                .iter()
                .map(|s| s.trim())
                .filter(|s| !s.is_empty())
                .collect::<Vec<_>>()
                .join(", ");
            (!joined.is_empty()).then(|| (category.as_str(), joined))
        })
        .collect();

    let sections = [
        render_section("PERSONAL INFO", std::iter::once(&resume.personal_info)),
        (!skill_fields.is_empty()).then(|| format!("SKILLS: {}", join_fields(&skill_fields))),
        render_section("EDUCATION", &resume.education),
        render_section("EXPERIENCE", &resume.experience),
        render_section("PROJECTS", &resume.projects),
        render_section("CERTIFICATIONS", &resume.certifications),
        render_section("ACHIEVEMENTS", &resume.achievements),
    ];

    sections.into_iter().flatten().collect::<Vec<_>>().join("\n\n")
}

fn render_section<'a, T, I>(label: &str, entries: I) -> Option<String>
where
    T: PromptFields + 'a,
    I: IntoIterator<Item = &'a T>,
{
    let lines: Vec<String> = entries
        .into_iter()
        .map(|entry| entry.populated_fields())
        .filter(|fields| !fields.is_empty())
        .map(|fields| format!("{label}: {}", join_fields(&fields)))
        .collect();

    (!lines.is_empty()).then(|| lines.join("\n"))
}

fn join_fields<K: AsRef<str>>(fields: &[(K, String)]) -> String {
    fields
        .iter()
        .map(|(name, value)| format!("{}={value}", name.as_ref()))
        .collect::<Vec<_>>()
        .join(" | ")
}

// ────────────────────────────────────────────────────────────────────────────
// Helpers
// ────────────────────────────────────────────────────────────────────────────

fn or_placeholder(value: String, placeholder: &str) -> String {
    if value.trim().is_empty() {
        placeholder.to_string()
    } else {
        value
    }
}

fn non_blank_or<'a>(value: &'a str, placeholder: &'a str) -> &'a str {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        placeholder
    } else {
        trimmed
    }
}

/// Renders a free-form JSON mapping as `key: value, key: value`.
fn render_open_mapping(value: &Value) -> String {
    match value {
        Value::Null => NOT_PROVIDED.to_string(),
        Value::String(text) => non_blank_or(text, NOT_PROVIDED).to_string(),
        Value::Object(map) => {
            let pairs: Vec<String> = map
                .iter()
                .filter(|(_, v)| !v.is_null())
                .map(|(k, v)| match v {
                    Value::String(s) => format!("{k}: {s}"),
                    other => format!("{k}: {other}"),
                })
                .collect();
            or_placeholder(pairs.join(", "), NOT_PROVIDED)
        }
        other => other.to_string(),
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Tests
// ────────────────────────────────────────────────────────────────────────────
