use async_trait::async_trait;
use sqlx::PgPool;
use uuid::Uuid;

use crate::{
    entities::job::{Job, JobChanges, JobInsert, JOB_COLUMNS},
    errors::AppError,
    repositories::sqlx_repo::SqlxJobRepo,
};

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait JobRepository: Send + Sync {
    async fn list_jobs(&self) -> Result<Vec<Job>, AppError>;
    async fn get_job(&self, id: &Uuid) -> Result<Option<Job>, AppError>;
    async fn create_job(&self, job: &JobInsert) -> Result<Job, AppError>;
    async fn update_job(&self, id: &Uuid, changes: &JobChanges) -> Result<Option<Job>, AppError>;
    /// Returns false when no job had this id.
    async fn delete_job(&self, id: &Uuid) -> Result<bool, AppError>;
}

impl SqlxJobRepo {
    pub fn new(pool: PgPool) -> Self {
        SqlxJobRepo { pool }
    }
}

#[async_trait]
impl JobRepository for SqlxJobRepo {
    async fn list_jobs(&self) -> Result<Vec<Job>, AppError> {
        let jobs = sqlx::query_as::<_, Job>(&format!(
            "SELECT {JOB_COLUMNS} FROM jobs ORDER BY posted_at DESC"
        ))
        .fetch_all(&self.pool)
        .await?;

        Ok(jobs)
    }

    async fn get_job(&self, id: &Uuid) -> Result<Option<Job>, AppError> {
        let job = sqlx::query_as::<_, Job>(&format!("SELECT {JOB_COLUMNS} FROM jobs WHERE id = $1"))
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(job)
    }

    async fn create_job(&self, job: &JobInsert) -> Result<Job, AppError> {
        let sql = format!(
            r#"
            INSERT INTO jobs (
                company_name, title, description, location, package, min_cgpa,
                allowed_branches, allowed_courses, deadline, posted_by
            )
            VALUES ($1, $2, $3, $4, $5, $6::NUMERIC, $7, $8, $9, $10)
            RETURNING {JOB_COLUMNS}
            "#
        );

        let created = sqlx::query_as::<_, Job>(&sql)
            .bind(&job.company_name)
            .bind(&job.title)
            .bind(&job.description)
            .bind(&job.location)
            .bind(&job.package)
            .bind(job.min_cgpa.to_string())
            .bind(&job.allowed_branches)
            .bind(&job.allowed_courses)
            .bind(job.deadline)
            .bind(job.posted_by)
            .fetch_one(&self.pool)
            .await?;

        Ok(created)
    }

    async fn update_job(&self, id: &Uuid, changes: &JobChanges) -> Result<Option<Job>, AppError> {
        // COALESCE keeps the stored value for fields left out of the patch
        let sql = format!(
            r#"
            UPDATE jobs SET
                company_name = COALESCE($1, company_name),
                title = COALESCE($2, title),
                description = COALESCE($3, description),
                location = COALESCE($4, location),
                package = COALESCE($5, package),
                min_cgpa = COALESCE($6::NUMERIC, min_cgpa),
                allowed_branches = COALESCE($7, allowed_branches),
                allowed_courses = COALESCE($8, allowed_courses),
                deadline = COALESCE($9, deadline)
            WHERE id = $10
            RETURNING {JOB_COLUMNS}
            "#
        );

        let updated = sqlx::query_as::<_, Job>(&sql)
            .bind(changes.company_name.as_deref())
            .bind(changes.title.as_deref())
            .bind(changes.description.as_deref())
            .bind(changes.location.as_deref())
            .bind(changes.package.as_deref())
            .bind(changes.min_cgpa.map(|g| g.to_string()))
            .bind(changes.allowed_branches.as_deref())
            .bind(changes.allowed_courses.as_deref())
            .bind(changes.deadline)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(updated)
    }

    async fn delete_job(&self, id: &Uuid) -> Result<bool, AppError> {
        let result = sqlx::query("DELETE FROM jobs WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}
