use async_trait::async_trait;
use sqlx::PgPool;

use crate::{
    entities::notification::{Notification, NotificationInsert},
    errors::AppError,
    repositories::sqlx_repo::SqlxNotificationRepo,
};

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait NotificationRepository: Send + Sync {
    async fn list_notifications(&self) -> Result<Vec<Notification>, AppError>;
    async fn create_notification(&self, notification: &NotificationInsert) -> Result<Notification, AppError>;
}

impl SqlxNotificationRepo {
    pub fn new(pool: PgPool) -> Self {
        SqlxNotificationRepo { pool }
    }
}

#[async_trait]
impl NotificationRepository for SqlxNotificationRepo {
    async fn list_notifications(&self) -> Result<Vec<Notification>, AppError> {
        let notifications = sqlx::query_as::<_, Notification>(
            "SELECT id, title, message, created_by, created_at FROM notifications ORDER BY created_at DESC",
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(notifications)
    }

    async fn create_notification(&self, notification: &NotificationInsert) -> Result<Notification, AppError> {
        let created = sqlx::query_as::<_, Notification>(
            r#"
            INSERT INTO notifications (title, message, created_by)
            VALUES ($1, $2, $3)
            RETURNING id, title, message, created_by, created_at
            "#,
        )
        .bind(&notification.title)
        .bind(&notification.message)
        .bind(notification.created_by)
        .fetch_one(&self.pool)
        .await?;

        Ok(created)
    }
}
