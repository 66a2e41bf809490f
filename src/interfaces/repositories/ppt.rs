use async_trait::async_trait;
use sqlx::PgPool;
use uuid::Uuid;

use crate::{
    entities::ppt::{Ppt, PptInsert},
    errors::AppError,
    repositories::sqlx_repo::SqlxPptRepo,
};

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait PptRepository: Send + Sync {
    async fn list_ppts(&self) -> Result<Vec<Ppt>, AppError>;
    async fn create_ppt(&self, ppt: &PptInsert) -> Result<Ppt, AppError>;
    /// Removes the row and hands it back so the caller can drop the file.
    async fn delete_ppt(&self, id: &Uuid) -> Result<Option<Ppt>, AppError>;
}

impl SqlxPptRepo {
    pub fn new(pool: PgPool) -> Self {
        SqlxPptRepo { pool }
    }
}

#[async_trait]
impl PptRepository for SqlxPptRepo {
    async fn list_ppts(&self) -> Result<Vec<Ppt>, AppError> {
        let ppts = sqlx::query_as::<_, Ppt>(
            "SELECT id, company_name, file_url, uploaded_by, uploaded_at FROM ppts ORDER BY uploaded_at DESC",
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(ppts)
    }

    async fn create_ppt(&self, ppt: &PptInsert) -> Result<Ppt, AppError> {
        let created = sqlx::query_as::<_, Ppt>(
            r#"
            INSERT INTO ppts (company_name, file_url, uploaded_by)
            VALUES ($1, $2, $3)
            RETURNING id, company_name, file_url, uploaded_by, uploaded_at
            "#,
        )
        .bind(&ppt.company_name)
        .bind(&ppt.file_url)
        .bind(ppt.uploaded_by)
        .fetch_one(&self.pool)
        .await?;

        Ok(created)
    }

    async fn delete_ppt(&self, id: &Uuid) -> Result<Option<Ppt>, AppError> {
        let deleted = sqlx::query_as::<_, Ppt>(
            "DELETE FROM ppts WHERE id = $1 RETURNING id, company_name, file_url, uploaded_by, uploaded_at",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(deleted)
    }
}
