//! Typed résumé records.
//!
//! Every section record keeps its fields optional: a blank or missing field is simply
//! absent, and the complete-résumé prompt omits it rather than printing a placeholder.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use sqlx::types::Json;
use sqlx::FromRow;
use uuid::Uuid;

pub const DEFAULT_EXPERIENCE_LEVEL: &str = "Entry-Level";

pub fn default_experience_level() -> String {
    DEFAULT_EXPERIENCE_LEVEL.to_string()
}

/// Ordered `(field, value)` pairs for the fields a record actually carries.
/// Blank strings count as absent.
pub trait PromptFields {
    fn populated_fields(&self) -> Vec<(&'static str, String)>;

    fn is_blank(&self) -> bool {
        self.populated_fields().is_empty()
    }
}

fn push_text(fields: &mut Vec<(&'static str, String)>, name: &'static str, value: &Option<String>) {
    if let Some(text) = value.as_deref().map(str::trim).filter(|t| !t.is_empty()) {
        fields.push((name, text.to_string()));
    }
}

/// Accepts either a JSON list of strings or one comma-separated string.
/// The résumé editor submits technologies as free text; the API accepts lists too.
pub fn string_or_list<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum StringOrList {
        List(Vec<String>),
        Text(String),
    }

    let items = match Option::<StringOrList>::deserialize(deserializer)? {
        Some(StringOrList::List(items)) => items,
        Some(StringOrList::Text(text)) => text.split(',').map(str::to_string).collect(),
        None => Vec::new(),
    };

    Ok(items
        .into_iter()
        .map(|item| item.trim().to_string())
        .filter(|item| !item.is_empty())
        .collect())
}

/// Reads JSON `null` the same as an absent field: the type's default.
pub fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de> + Default,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

fn null_as_true<'de, D>(deserializer: D) -> Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<bool>::deserialize(deserializer)?.unwrap_or(true))
}

/// Null or blank falls back to `DEFAULT_EXPERIENCE_LEVEL`.
pub fn experience_level_or_default<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?
        .map(|level| level.trim().to_string())
        .filter(|level| !level.is_empty())
        .unwrap_or_else(default_experience_level))
}

/// Category → skills. A null map or a null category list reads as empty.
pub fn skill_map<'de, D>(deserializer: D) -> Result<BTreeMap<String, Vec<String>>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(optional_skill_map(deserializer)?.unwrap_or_default())
}

/// Like `skill_map`, but keeps a null map distinguishable from an empty one.
pub fn optional_skill_map<'de, D>(
    deserializer: D,
) -> Result<Option<BTreeMap<String, Vec<String>>>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<BTreeMap<String, Option<Vec<String>>>>::deserialize(deserializer)?;
    Ok(raw.map(|categories| {
        categories
            .into_iter()
            .map(|(category, items)| (category, items.unwrap_or_default()))
            .collect()
    }))
}

// ────────────────────────────────────────────────────────────────────────────
// Section records
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PersonalInfo {
    pub name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub location: Option<String>,
    pub linkedin: Option<String>,
    pub github: Option<String>,
    pub portfolio: Option<String>,
}

impl PromptFields for PersonalInfo {
    fn populated_fields(&self) -> Vec<(&'static str, String)> {
        let mut fields = Vec::new();
        push_text(&mut fields, "name", &self.name);
        push_text(&mut fields, "email", &self.email);
        push_text(&mut fields, "phone", &self.phone);
        push_text(&mut fields, "location", &self.location);
        push_text(&mut fields, "linkedin", &self.linkedin);
        push_text(&mut fields, "github", &self.github);
        push_text(&mut fields, "portfolio", &self.portfolio);
        fields
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EducationEntry {
    pub degree: Option<String>,
    pub field: Option<String>,
    pub school: Option<String>,
    pub location: Option<String>,
    #[serde(alias = "startDate", alias = "startYear")]
    pub start_date: Option<String>,
    #[serde(alias = "endDate", alias = "endYear")]
    pub end_date: Option<String>,
    pub cgpa: Option<String>,
    pub description: Option<String>,
}

impl PromptFields for EducationEntry {
    fn populated_fields(&self) -> Vec<(&'static str, String)> {
        let mut fields = Vec::new();
        push_text(&mut fields, "degree", &self.degree);
        push_text(&mut fields, "field", &self.field);
        push_text(&mut fields, "school", &self.school);
        push_text(&mut fields, "location", &self.location);
        push_text(&mut fields, "start", &self.start_date);
        push_text(&mut fields, "end", &self.end_date);
        push_text(&mut fields, "cgpa", &self.cgpa);
        push_text(&mut fields, "description", &self.description);
        fields
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExperienceEntry {
    #[serde(alias = "position")]
    pub role: Option<String>,
    pub company: Option<String>,
    pub location: Option<String>,
    pub duration: Option<String>,
    #[serde(alias = "startDate")]
    pub start_date: Option<String>,
    #[serde(alias = "endDate")]
    pub end_date: Option<String>,
    pub current: Option<bool>,
    pub description: Option<String>,
}

impl PromptFields for ExperienceEntry {
    fn populated_fields(&self) -> Vec<(&'static str, String)> {
        let mut fields = Vec::new();
        push_text(&mut fields, "role", &self.role);
        push_text(&mut fields, "company", &self.company);
        push_text(&mut fields, "location", &self.location);
        push_text(&mut fields, "duration", &self.duration);
        push_text(&mut fields, "start", &self.start_date);
        push_text(&mut fields, "end", &self.end_date);
        if self.current == Some(true) {
            fields.push(("current", "yes".to_string()));
        }
        push_text(&mut fields, "description", &self.description);
        fields
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProjectEntry {
    pub name: Option<String>,
    #[serde(deserialize_with = "string_or_list")]
    pub technologies: Vec<String>,
    pub description: Option<String>,
    #[serde(alias = "githubUrl")]
    pub github_url: Option<String>,
    #[serde(alias = "liveUrl")]
    pub live_url: Option<String>,
}

impl PromptFields for ProjectEntry {
    fn populated_fields(&self) -> Vec<(&'static str, String)> {
        let mut fields = Vec::new();
        push_text(&mut fields, "name", &self.name);
        if !self.technologies.is_empty() {
            fields.push(("technologies", self.technologies.join(", ")));
        }
        push_text(&mut fields, "description", &self.description);
        push_text(&mut fields, "github", &self.github_url);
        push_text(&mut fields, "live", &self.live_url);
        fields
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CertificationEntry {
    pub name: Option<String>,
    #[serde(alias = "platform")]
    pub issuer: Option<String>,
    #[serde(alias = "year")]
    pub date: Option<String>,
    #[serde(alias = "credentialUrl")]
    pub credential_url: Option<String>,
}

impl PromptFields for CertificationEntry {
    fn populated_fields(&self) -> Vec<(&'static str, String)> {
        let mut fields = Vec::new();
        push_text(&mut fields, "name", &self.name);
        push_text(&mut fields, "issuer", &self.issuer);
        push_text(&mut fields, "date", &self.date);
        push_text(&mut fields, "credential", &self.credential_url);
        fields
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AchievementEntry {
    pub title: Option<String>,
    pub date: Option<String>,
    pub description: Option<String>,
}

impl PromptFields for AchievementEntry {
    fn populated_fields(&self) -> Vec<(&'static str, String)> {
        let mut fields = Vec::new();
        push_text(&mut fields, "title", &self.title);
        push_text(&mut fields, "date", &self.date);
        push_text(&mut fields, "description", &self.description);
        fields
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Snapshot
// ────────────────────────────────────────────────────────────────────────────

/// The résumé as seen at the start of one request.
///
/// `ats_score` is carried for display only. Every write path recomputes it from the
/// section contents; a caller-supplied value is never persisted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ResumeSnapshot {
    #[serde(alias = "personalInfo", deserialize_with = "null_as_default")]
    pub personal_info: PersonalInfo,
    pub summary: Option<String>,
    #[serde(deserialize_with = "skill_map")]
    pub skills: BTreeMap<String, Vec<String>>,
    #[serde(deserialize_with = "null_as_default")]
    pub education: Vec<EducationEntry>,
    #[serde(deserialize_with = "null_as_default")]
    pub experience: Vec<ExperienceEntry>,
    #[serde(deserialize_with = "null_as_default")]
    pub projects: Vec<ProjectEntry>,
    #[serde(deserialize_with = "null_as_default")]
    pub certifications: Vec<CertificationEntry>,
    #[serde(deserialize_with = "null_as_default")]
    pub achievements: Vec<AchievementEntry>,
    #[serde(alias = "targetRole", deserialize_with = "null_as_default")]
    pub target_role: String,
    #[serde(alias = "experienceLevel", deserialize_with = "experience_level_or_default")]
    pub experience_level: String,
    #[serde(alias = "atsOptimized", deserialize_with = "null_as_true")]
    pub ats_optimized: bool,
    #[serde(alias = "atsScore", deserialize_with = "null_as_default")]
    pub ats_score: u32,
}

impl Default for ResumeSnapshot {
    fn default() -> Self {
        Self {
            personal_info: PersonalInfo::default(),
            summary: None,
            skills: BTreeMap::new(),
            education: Vec::new(),
            experience: Vec::new(),
            projects: Vec::new(),
            certifications: Vec::new(),
            achievements: Vec::new(),
            target_role: String::new(),
            experience_level: default_experience_level(),
            ats_optimized: true,
            ats_score: 0,
        }
    }
}

impl ResumeSnapshot {
    pub fn has_summary(&self) -> bool {
        self.summary
            .as_deref()
            .is_some_and(|s| !s.trim().is_empty())
    }

    /// Every non-blank skill across all categories, in category order.
    pub fn all_skills(&self) -> impl Iterator<Item = &str> {
        flatten_skills(&self.skills)
    }

    pub fn skill_count(&self) -> usize {
        self.all_skills().count()
    }
}

pub fn flatten_skills(skills: &BTreeMap<String, Vec<String>>) -> impl Iterator<Item = &str> {
    skills
        .values()
        .flatten()
        .map(|s| s.trim())
        .filter(|s| !s.is_empty())
}

// ────────────────────────────────────────────────────────────────────────────
// Persisted record
// ────────────────────────────────────────────────────────────────────────────

/// A stored résumé: ownership and bookkeeping around a snapshot.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResumeRecord {
    pub id: Uuid,
    pub user_id: String,
    pub name: String,
    pub template: String,
    pub preferences: Value,
    #[serde(flatten)]
    pub snapshot: ResumeSnapshot,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, FromRow)]
pub struct ResumeRow {
    pub id: Uuid,
    pub user_id: String,
    pub name: String,
    pub template: String,
    pub target_role: String,
    pub experience_level: String,
    pub personal_info: Json<PersonalInfo>,
    pub summary: Option<String>,
    pub skills: Json<BTreeMap<String, Vec<String>>>,
    pub education: Json<Vec<EducationEntry>>,
    pub experience: Json<Vec<ExperienceEntry>>,
    pub projects: Json<Vec<ProjectEntry>>,
    pub certifications: Json<Vec<CertificationEntry>>,
    pub achievements: Json<Vec<AchievementEntry>>,
    pub preferences: Value,
    pub ats_score: i32,
    pub ats_optimized: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<ResumeRow> for ResumeRecord {
    fn from(row: ResumeRow) -> Self {
        Self {
            id: row.id,
            user_id: row.user_id,
            name: row.name,
            template: row.template,
            preferences: row.preferences,
            snapshot: ResumeSnapshot {
                personal_info: row.personal_info.0,
                summary: row.summary,
                skills: row.skills.0,
                education: row.education.0,
                experience: row.experience.0,
                projects: row.projects.0,
                certifications: row.certifications.0,
                achievements: row.achievements.0,
                target_role: row.target_role,
                experience_level: row.experience_level,
                ats_optimized: row.ats_optimized,
                ats_score: row.ats_score.clamp(0, 100) as u32,
            },
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}
