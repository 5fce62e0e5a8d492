//! Write-path rules for résumés: creation defaults, partial updates, score recompute.
//!
//! A caller-supplied `ats_score` is never persisted. Every save path scores the
//! sections it is about to store.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::Deserialize;
use serde_json::Value;
use tracing::info;
use uuid::Uuid;

use crate::ats::scorer;
use crate::errors::AppError;
use crate::models::resume::{
    default_experience_level, optional_skill_map, AchievementEntry, CertificationEntry,
    EducationEntry, ExperienceEntry, PersonalInfo, ProjectEntry, ResumeRecord, ResumeSnapshot,
};
use crate::resumes::store::ResumeStore;

pub const DEFAULT_RESUME_NAME: &str = "My Resume";
pub const DEFAULT_TEMPLATE: &str = "Modern";

#[derive(Debug, Clone, Default, Deserialize)]
pub struct CreateResumeRequest {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub template: Option<String>,
    #[serde(default)]
    pub preferences: Option<Value>,
    #[serde(flatten)]
    pub snapshot: ResumeSnapshot,
}

/// Partial update: only supplied fields change.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct UpdateResumeRequest {
    pub name: Option<String>,
    pub template: Option<String>,
    pub preferences: Option<Value>,
    #[serde(alias = "personalInfo")]
    pub personal_info: Option<PersonalInfo>,
    pub summary: Option<String>,
    #[serde(deserialize_with = "optional_skill_map")]
    pub skills: Option<BTreeMap<String, Vec<String>>>,
    pub education: Option<Vec<EducationEntry>>,
    pub experience: Option<Vec<ExperienceEntry>>,
    pub projects: Option<Vec<ProjectEntry>>,
    pub certifications: Option<Vec<CertificationEntry>>,
    pub achievements: Option<Vec<AchievementEntry>>,
    #[serde(alias = "targetRole")]
    pub target_role: Option<String>,
    #[serde(alias = "experienceLevel")]
    pub experience_level: Option<String>,
    #[serde(alias = "atsOptimized")]
    pub ats_optimized: Option<bool>,
    /// Optimistic concurrency token: the `updated_at` the caller last read.
    #[serde(alias = "expectedUpdatedAt")]
    pub expected_updated_at: Option<DateTime<Utc>>,
}

fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

fn default_name(personal_info: &PersonalInfo) -> String {
    match personal_info.name.as_deref().map(str::trim) {
        Some(name) if !name.is_empty() => format!("{name}'s Resume"),
        _ => DEFAULT_RESUME_NAME.to_string(),
    }
}

fn rescore(snapshot: &mut ResumeSnapshot) {
    snapshot.ats_score = scorer::score(snapshot);
}

pub async fn create_resume(
    store: &dyn ResumeStore,
    owner: &str,
    request: CreateResumeRequest,
) -> Result<ResumeRecord, AppError> {
    let CreateResumeRequest {
        name,
        template,
        preferences,
        mut snapshot,
    } = request;

    if snapshot.experience_level.trim().is_empty() {
        snapshot.experience_level = default_experience_level();
    }
    snapshot.summary = non_blank(snapshot.summary);
    rescore(&mut snapshot);

    let now = Utc::now();
    let record = ResumeRecord {
        id: Uuid::new_v4(),
        user_id: owner.to_string(),
        name: non_blank(name).unwrap_or_else(|| default_name(&snapshot.personal_info)),
        template: non_blank(template).unwrap_or_else(|| DEFAULT_TEMPLATE.to_string()),
        preferences: preferences
            .filter(|p| !p.is_null())
            .unwrap_or_else(|| Value::Object(Default::default())),
        snapshot,
        created_at: now,
        updated_at: now,
    };

    let saved = store.save(record, None).await?;
    info!(
        "Created resume {} for {owner} (ATS score {})",
        saved.id, saved.snapshot.ats_score
    );
    Ok(saved)
}

pub async fn update_resume(
    store: &dyn ResumeStore,
    owner: &str,
    id: Uuid,
    request: UpdateResumeRequest,
) -> Result<ResumeRecord, AppError> {
    let mut record = store.get_by_id(id, owner).await?;
    let expected_updated_at = request.expected_updated_at;

    apply_update(&mut record, request);
    rescore(&mut record.snapshot);

    let saved = store.save(record, expected_updated_at).await?;
    info!(
        "Updated resume {id} for {owner} (ATS score {})",
        saved.snapshot.ats_score
    );
    Ok(saved)
}

fn apply_update(record: &mut ResumeRecord, update: UpdateResumeRequest) {
    let snapshot = &mut record.snapshot;

    if let Some(name) = non_blank(update.name) {
        record.name = name;
    }
    if let Some(template) = non_blank(update.template) {
        record.template = template;
    }
    if let Some(preferences) = update.preferences {
        record.preferences = preferences;
    }
    if let Some(personal_info) = update.personal_info {
        snapshot.personal_info = personal_info;
    }
    if let Some(summary) = update.summary {
        snapshot.summary = non_blank(Some(summary));
    }
    if let Some(skills) = update.skills {
        snapshot.skills = skills;
    }
    if let Some(education) = update.education {
        snapshot.education = education;
    }
    if let Some(experience) = update.experience {
        snapshot.experience = experience;
    }
    if let Some(projects) = update.projects {
        snapshot.projects = projects;
    }
    if let Some(certifications) = update.certifications {
        snapshot.certifications = certifications;
    }
    if let Some(achievements) = update.achievements {
        snapshot.achievements = achievements;
    }
    if let Some(target_role) = update.target_role {
        snapshot.target_role = target_role.trim().to_string();
    }
    if let Some(level) = non_blank(update.experience_level) {
        snapshot.experience_level = level;
    }
    if let Some(ats_optimized) = update.ats_optimized {
        snapshot.ats_optimized = ats_optimized;
    }
}

pub async fn get_resume(
    store: &dyn ResumeStore,
    owner: &str,
    id: Uuid,
) -> Result<ResumeRecord, AppError> {
    store.get_by_id(id, owner).await
}

pub async fn list_resumes(
    store: &dyn ResumeStore,
    owner: &str,
) -> Result<Vec<ResumeRecord>, AppError> {
    store.list_by_owner(owner).await
}

pub async fn delete_resume(store: &dyn ResumeStore, owner: &str, id: Uuid) -> Result<(), AppError> {
    store.delete(id, owner).await?;
    info!("Deleted resume {id} for {owner}");
    Ok(())
}
