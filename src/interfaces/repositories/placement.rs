use async_trait::async_trait;
use sqlx::PgPool;

use crate::{
    entities::placement::{Placement, PlacementInsert},
    errors::AppError,
    repositories::sqlx_repo::SqlxPlacementRepo,
};

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait PlacementRepository: Send + Sync {
    async fn list_placements(&self) -> Result<Vec<Placement>, AppError>;
    async fn create_placement(&self, placement: &PlacementInsert) -> Result<Placement, AppError>;
}

impl SqlxPlacementRepo {
    pub fn new(pool: PgPool) -> Self {
        SqlxPlacementRepo { pool }
    }
}

#[async_trait]
impl PlacementRepository for SqlxPlacementRepo {
    async fn list_placements(&self) -> Result<Vec<Placement>, AppError> {
        let placements = sqlx::query_as::<_, Placement>(
            r#"
            SELECT id, company_name, students_placed, year, branch, created_by, created_at
            FROM placements
            ORDER BY created_at DESC
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(placements)
    }

    async fn create_placement(&self, placement: &PlacementInsert) -> Result<Placement, AppError> {
        let created = sqlx::query_as::<_, Placement>(
            r#"
            INSERT INTO placements (company_name, students_placed, year, branch, created_by)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING id, company_name, students_placed, year, branch, created_by, created_at
            "#,
        )
        .bind(&placement.company_name)
        .bind(placement.students_placed)
        .bind(placement.year)
        .bind(&placement.branch)
        .bind(placement.created_by)
        .fetch_one(&self.pool)
        .await?;

        Ok(created)
    }
}
