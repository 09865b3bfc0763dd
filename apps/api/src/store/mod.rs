//! Marketplace data access. Recommenders and the resume service only see the
//! `MarketplaceStore` trait; `PgMarketplaceStore` is the production backend.

use async_trait::async_trait;
use sqlx::PgPool;
use tracing::info;
use uuid::Uuid;

use crate::errors::AppError;
use crate::models::freelancer::FreelancerRow;
use crate::models::job::JobRow;

#[cfg(test)]
pub mod memory;

#[async_trait]
pub trait MarketplaceStore: Send + Sync {
    /// All users with role `student`, oldest first.
    async fn list_students(&self) -> Result<Vec<FreelancerRow>, AppError>;

    /// All job postings, oldest first.
    async fn list_jobs(&self) -> Result<Vec<JobRow>, AppError>;

    async fn find_student(&self, id: Uuid) -> Result<Option<FreelancerRow>, AppError>;

    async fn find_job(&self, id: Uuid) -> Result<Option<JobRow>, AppError>;

    /// Replaces the stored resume skills of a student. Returns false when no
    /// such student exists.
    async fn save_resume_skills(
        &self,
        id: Uuid,
        resume_url: Option<&str>,
        skills: &[String],
    ) -> Result<bool, AppError>;
}

const STUDENT_COLUMNS: &str = "id, name, major, college, skills, experience, experience_level, \
    gpa, resume_url, resume_skills, created_at";

const JOB_COLUMNS: &str = "id, title, company, category, description, required_skills, \
    experience, pay_amount, pay_type, location, job_type, duration, status, created_at";

#[derive(Clone)]
pub struct PgMarketplaceStore {
    pool: PgPool,
}

impl PgMarketplaceStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl MarketplaceStore for PgMarketplaceStore {
    async fn list_students(&self) -> Result<Vec<FreelancerRow>, AppError> {
        let rows: Vec<FreelancerRow> = sqlx::query_as(&format!(
            "SELECT {STUDENT_COLUMNS} FROM users WHERE role = 'student' ORDER BY created_at, id"
        ))
        .fetch_all(&self.pool)
        .await?;
        Ok(rows)
    }

    async fn list_jobs(&self) -> Result<Vec<JobRow>, AppError> {
        let rows: Vec<JobRow> = sqlx::query_as(&format!(
            "SELECT {JOB_COLUMNS} FROM jobs ORDER BY created_at, id"
        ))
        .fetch_all(&self.pool)
        .await?;
        Ok(rows)
    }

    async fn find_student(&self, id: Uuid) -> Result<Option<FreelancerRow>, AppError> {
        let row: Option<FreelancerRow> = sqlx::query_as(&format!(
            "SELECT {STUDENT_COLUMNS} FROM users WHERE id = $1 AND role = 'student'"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(row)
    }

    async fn find_job(&self, id: Uuid) -> Result<Option<JobRow>, AppError> {
        let row: Option<JobRow> =
            sqlx::query_as(&format!("SELECT {JOB_COLUMNS} FROM jobs WHERE id = $1"))
                .bind(id)
                .fetch_optional(&self.pool)
                .await?;
        Ok(row)
    }

    async fn save_resume_skills(
        &self,
        id: Uuid,
        resume_url: Option<&str>,
        skills: &[String],
    ) -> Result<bool, AppError> {
        let result = sqlx::query(
            r#"
            UPDATE users
            SET resume_skills = $1,
                resume_url = COALESCE($2, resume_url)
            WHERE id = $3 AND role = 'student'
            "#,
        )
        .bind(skills)
        .bind(resume_url)
        .bind(id)
        .execute(&self.pool)
        .await?;

        let updated = result.rows_affected() > 0;
        if updated {
            info!("Stored {} resume skills for student {id}", skills.len());
        }
        Ok(updated)
    }
}
