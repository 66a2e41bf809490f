use std::sync::Arc;

use uuid::Uuid;
use validator::Validate;

use crate::{
    entities::notification::{NewNotificationRequest, Notification},
    errors::AppError,
    repositories::notification::NotificationRepository,
};

#[derive(Clone)]
pub struct NotificationHandler {
    pub notification_repo: Arc<dyn NotificationRepository>,
}

impl NotificationHandler {
    pub fn new(notification_repo: Arc<dyn NotificationRepository>) -> Self {
        NotificationHandler { notification_repo }
    }

    pub async fn list_notifications(&self) -> Result<Vec<Notification>, AppError> {
        self.notification_repo.list_notifications().await
    }

    pub async fn broadcast(&self, request: NewNotificationRequest, created_by: &Uuid) -> Result<Notification, AppError> {
        request.validate()?;
        let notification = self
            .notification_repo
            .create_notification(&request.prepare_for_insert(*created_by))
            .await?;
        tracing::info!(notification_id = %notification.id, "Notification broadcast");
        Ok(notification)
    }
}
