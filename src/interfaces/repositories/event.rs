use async_trait::async_trait;
use sqlx::PgPool;
use uuid::Uuid;

use crate::{
    entities::event::{Event, EventChanges, EventInsert},
    errors::AppError,
    repositories::sqlx_repo::SqlxEventRepo,
};

const EVENT_COLUMNS: &str = "id, title, description, event_date, event_time, created_by, created_at";

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait EventRepository: Send + Sync {
    async fn list_events(&self) -> Result<Vec<Event>, AppError>;
    async fn get_event(&self, id: &Uuid) -> Result<Option<Event>, AppError>;
    async fn create_event(&self, event: &EventInsert) -> Result<Event, AppError>;
    async fn update_event(&self, id: &Uuid, changes: &EventChanges) -> Result<Option<Event>, AppError>;
    async fn delete_event(&self, id: &Uuid) -> Result<bool, AppError>;
}

impl SqlxEventRepo {
    pub fn new(pool: PgPool) -> Self {
        SqlxEventRepo { pool }
    }
}

#[async_trait]
impl EventRepository for SqlxEventRepo {
    async fn list_events(&self) -> Result<Vec<Event>, AppError> {
        let events = sqlx::query_as::<_, Event>(&format!(
            "SELECT {EVENT_COLUMNS} FROM events ORDER BY created_at DESC"
        ))
        .fetch_all(&self.pool)
        .await?;

        Ok(events)
    }

    async fn get_event(&self, id: &Uuid) -> Result<Option<Event>, AppError> {
        let event = sqlx::query_as::<_, Event>(&format!("SELECT {EVENT_COLUMNS} FROM events WHERE id = $1"))
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(event)
    }

    async fn create_event(&self, event: &EventInsert) -> Result<Event, AppError> {
        let created = sqlx::query_as::<_, Event>(&format!(
            r#"
            INSERT INTO events (title, description, event_date, event_time, created_by)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING {EVENT_COLUMNS}
            "#
        ))
        .bind(&event.title)
        .bind(event.description.as_deref())
        .bind(event.event_date)
        .bind(event.event_time)
        .bind(event.created_by)
        .fetch_one(&self.pool)
        .await?;

        Ok(created)
    }

    async fn update_event(&self, id: &Uuid, changes: &EventChanges) -> Result<Option<Event>, AppError> {
        let (description_set, description) = changes.description.clone().into_update();

        let updated = sqlx::query_as::<_, Event>(&format!(
            r#"
            UPDATE events SET
                title = COALESCE($1, title),
                description = CASE WHEN $2 THEN $3 ELSE description END,
                event_date = COALESCE($4, event_date),
                event_time = COALESCE($5, event_time)
            WHERE id = $6
            RETURNING {EVENT_COLUMNS}
            "#
        ))
        .bind(changes.title.as_deref())
        .bind(description_set)
        .bind(description)
        .bind(changes.event_date)
        .bind(changes.event_time)
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(updated)
    }

    async fn delete_event(&self, id: &Uuid) -> Result<bool, AppError> {
        let result = sqlx::query("DELETE FROM events WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}
