use async_trait::async_trait;
use sqlx::PgPool;
use uuid::Uuid;

use crate::{
    entities::forum_post::{ForumPost, ForumPostInsert, ForumPostRow, ForumPostWithAuthor},
    errors::AppError,
    repositories::sqlx_repo::SqlxForumRepo,
};

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ForumRepository: Send + Sync {
    async fn list_posts(&self) -> Result<Vec<ForumPostWithAuthor>, AppError>;
    async fn create_post(&self, post: &ForumPostInsert) -> Result<ForumPost, AppError>;
    async fn delete_post(&self, id: &Uuid) -> Result<bool, AppError>;
}

impl SqlxForumRepo {
    pub fn new(pool: PgPool) -> Self {
        SqlxForumRepo { pool }
    }
}

#[async_trait]
impl ForumRepository for SqlxForumRepo {
    async fn list_posts(&self) -> Result<Vec<ForumPostWithAuthor>, AppError> {
        let rows = sqlx::query_as::<_, ForumPostRow>(
            r#"
            SELECT p.id, p.user_id, p.company_name, p.title, p.content, p.posted_at,
                   u.name AS author_name
            FROM forum_posts p
            LEFT JOIN users u ON u.id = p.user_id
            ORDER BY p.posted_at DESC
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().map(ForumPostWithAuthor::from).collect())
    }

    async fn create_post(&self, post: &ForumPostInsert) -> Result<ForumPost, AppError> {
        let created = sqlx::query_as::<_, ForumPost>(
            r#"
            INSERT INTO forum_posts (user_id, company_name, title, content)
            VALUES ($1, $2, $3, $4)
            RETURNING id, user_id, company_name, title, content, posted_at
            "#,
        )
        .bind(post.user_id)
        .bind(&post.company_name)
        .bind(&post.title)
        .bind(&post.content)
        .fetch_one(&self.pool)
        .await?;

        Ok(created)
    }

    async fn delete_post(&self, id: &Uuid) -> Result<bool, AppError> {
        let result = sqlx::query("DELETE FROM forum_posts WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}
