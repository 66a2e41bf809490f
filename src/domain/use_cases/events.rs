use std::sync::Arc;

use uuid::Uuid;
use validator::Validate;

use crate::{
    entities::event::{Event, EventChanges, NewEventRequest, UpdateEventRequest},
    errors::AppError,
    repositories::event::EventRepository,
};

#[derive(Clone)]
pub struct EventHandler {
    pub event_repo: Arc<dyn EventRepository>,
}

impl EventHandler {
    pub fn new(event_repo: Arc<dyn EventRepository>) -> Self {
        EventHandler { event_repo }
    }

    pub async fn list_events(&self) -> Result<Vec<Event>, AppError> {
        self.event_repo.list_events().await
    }

    pub async fn get_event(&self, id: &Uuid) -> Result<Event, AppError> {
        self.event_repo
            .get_event(id)
            .await?
            .ok_or_else(|| AppError::NotFound("Event not found".into()))
    }

    pub async fn create_event(&self, request: NewEventRequest, created_by: &Uuid) -> Result<Event, AppError> {
        request.validate()?;
        self.event_repo.create_event(&request.prepare_for_insert(*created_by)).await
    }

    pub async fn update_event(&self, id: &Uuid, request: UpdateEventRequest) -> Result<Event, AppError> {
        request.validate()?;
        self.event_repo
            .update_event(id, &EventChanges::from(request))
            .await?
            .ok_or_else(|| AppError::NotFound("Event not found".into()))
    }

    pub async fn delete_event(&self, id: &Uuid) -> Result<(), AppError> {
        if !self.event_repo.delete_event(id).await? {
            return Err(AppError::NotFound("Event not found".into()));
        }
        Ok(())
    }
}
