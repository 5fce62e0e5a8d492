use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::types::Json;
use sqlx::PgPool;
use tracing::debug;
use uuid::Uuid;

use crate::errors::AppError;
use crate::models::resume::{ResumeRecord, ResumeRow};

/// Persistence collaborator for résumé records. Every lookup is scoped to the owner.
#[async_trait]
pub trait ResumeStore: Send + Sync {
    /// Inserts or replaces `record`; the store stamps `updated_at`.
    /// With `expected_updated_at`, the write only lands if the stored row still carries
    /// that timestamp; otherwise `Conflict`.
    async fn save(
        &self,
        record: ResumeRecord,
        expected_updated_at: Option<DateTime<Utc>>,
    ) -> Result<ResumeRecord, AppError>;

    async fn get_by_id(&self, id: Uuid, owner: &str) -> Result<ResumeRecord, AppError>;

    /// Most recently updated first.
    async fn list_by_owner(&self, owner: &str) -> Result<Vec<ResumeRecord>, AppError>;

    async fn delete(&self, id: Uuid, owner: &str) -> Result<(), AppError>;
}

pub(crate) fn not_found(id: Uuid) -> AppError {
    AppError::NotFound(format!("Resume {id} not found"))
}

pub(crate) fn stale_write(id: Uuid) -> AppError {
    AppError::Conflict(format!(
        "Resume {id} was modified by another request; reload and retry"
    ))
}

#[derive(Clone)]
pub struct PgResumeStore {
    pool: PgPool,
}

impl PgResumeStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ResumeStore for PgResumeStore {
    async fn save(
        &self,
        record: ResumeRecord,
        expected_updated_at: Option<DateTime<Utc>>,
    ) -> Result<ResumeRecord, AppError> {
        let id = record.id;
        let snapshot = record.snapshot;

        let row = sqlx::query_as::<_, ResumeRow>(
            r#"
            INSERT INTO resumes
                (id, user_id, name, template, target_role, experience_level,
                 personal_info, summary, skills, education, experience, projects,
                 certifications, achievements, preferences, ats_score, ats_optimized,
                 created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14, $15, $16, $17,
                    $18, NOW())
            ON CONFLICT (id) DO UPDATE SET
                name             = EXCLUDED.name,
                template         = EXCLUDED.template,
                target_role      = EXCLUDED.target_role,
                experience_level = EXCLUDED.experience_level,
                personal_info    = EXCLUDED.personal_info,
                summary          = EXCLUDED.summary,
                skills           = EXCLUDED.skills,
                education        = EXCLUDED.education,
                experience       = EXCLUDED.experience,
                projects         = EXCLUDED.projects,
                certifications   = EXCLUDED.certifications,
                achievements     = EXCLUDED.achievements,
                preferences      = EXCLUDED.preferences,
                ats_score        = EXCLUDED.ats_score,
                ats_optimized    = EXCLUDED.ats_optimized,
                updated_at       = NOW()
            WHERE resumes.user_id = EXCLUDED.user_id
              AND ($19::timestamptz IS NULL OR resumes.updated_at = $19)
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(&record.user_id)
        .bind(&record.name)
        .bind(&record.template)
        .bind(&snapshot.target_role)
        .bind(&snapshot.experience_level)
        .bind(Json(&snapshot.personal_info))
        .bind(&snapshot.summary)
        .bind(Json(&snapshot.skills))
        .bind(Json(&snapshot.education))
        .bind(Json(&snapshot.experience))
        .bind(Json(&snapshot.projects))
        .bind(Json(&snapshot.certifications))
        .bind(Json(&snapshot.achievements))
        .bind(&record.preferences)
        .bind(snapshot.ats_score as i32)
        .bind(snapshot.ats_optimized)
        .bind(record.created_at)
        .bind(expected_updated_at)
        .fetch_optional(&self.pool)
        .await?;

        debug!("Saved resume {id}");
        row.map(ResumeRecord::from).ok_or_else(|| stale_write(id))
    }

    async fn get_by_id(&self, id: Uuid, owner: &str) -> Result<ResumeRecord, AppError> {
        sqlx::query_as::<_, ResumeRow>("SELECT * FROM resumes WHERE id = $1 AND user_id = $2")
            .bind(id)
            .bind(owner)
            .fetch_optional(&self.pool)
            .await?
            .map(ResumeRecord::from)
            .ok_or_else(|| not_found(id))
    }

    async fn list_by_owner(&self, owner: &str) -> Result<Vec<ResumeRecord>, AppError> {
        let rows = sqlx::query_as::<_, ResumeRow>(
            "SELECT * FROM resumes WHERE user_id = $1 ORDER BY updated_at DESC, id",
        )
        .bind(owner)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().map(ResumeRecord::from).collect())
    }

    async fn delete(&self, id: Uuid, owner: &str) -> Result<(), AppError> {
        let result = sqlx::query("DELETE FROM resumes WHERE id = $1 AND user_id = $2")
            .bind(id)
            .bind(owner)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(not_found(id));
        }
        Ok(())
    }
}
