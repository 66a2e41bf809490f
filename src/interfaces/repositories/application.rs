use async_trait::async_trait;
use sqlx::PgPool;
use uuid::Uuid;

use crate::{
    entities::application::JobApplication,
    errors::AppError,
    repositories::sqlx_repo::SqlxApplicationRepo,
};

const APPLICATION_COLUMNS: &str = "id, job_id, student_id, applied_at, status";

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ApplicationRepository: Send + Sync {
    /// Inserts the application unless one already exists for the pair.
    /// `None` means the student had already applied; the check and the write
    /// are a single statement, so concurrent requests cannot both succeed.
    async fn insert_if_absent(&self, job_id: &Uuid, student_id: &Uuid) -> Result<Option<JobApplication>, AppError>;
    async fn list_by_student(&self, student_id: &Uuid) -> Result<Vec<JobApplication>, AppError>;
    async fn list_by_job(&self, job_id: &Uuid) -> Result<Vec<JobApplication>, AppError>;
}

impl SqlxApplicationRepo {
    pub fn new(pool: PgPool) -> Self {
        SqlxApplicationRepo { pool }
    }
}

#[async_trait]
impl ApplicationRepository for SqlxApplicationRepo {
    async fn insert_if_absent(&self, job_id: &Uuid, student_id: &Uuid) -> Result<Option<JobApplication>, AppError> {
        let sql = format!(
            r#"
            INSERT INTO job_applications (job_id, student_id)
            VALUES ($1, $2)
            ON CONFLICT (job_id, student_id) DO NOTHING
            RETURNING {APPLICATION_COLUMNS}
            "#
        );

        let application = sqlx::query_as::<_, JobApplication>(&sql)
            .bind(job_id)
            .bind(student_id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(application)
    }

    async fn list_by_student(&self, student_id: &Uuid) -> Result<Vec<JobApplication>, AppError> {
        let applications = sqlx::query_as::<_, JobApplication>(&format!(
            "SELECT {APPLICATION_COLUMNS} FROM job_applications WHERE student_id = $1 ORDER BY applied_at DESC"
        ))
        .bind(student_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(applications)
    }

    async fn list_by_job(&self, job_id: &Uuid) -> Result<Vec<JobApplication>, AppError> {
        let applications = sqlx::query_as::<_, JobApplication>(&format!(
            "SELECT {APPLICATION_COLUMNS} FROM job_applications WHERE job_id = $1 ORDER BY applied_at DESC"
        ))
        .bind(job_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(applications)
    }
}
