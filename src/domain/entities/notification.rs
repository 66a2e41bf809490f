use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use crate::entities::validation::validate_not_blank;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
pub struct Notification {
    pub id: Uuid,
    pub title: String,
    pub message: String,
    pub created_by: Uuid,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct NewNotificationRequest {
    #[validate(length(min = 1, max = 200), custom(function = "validate_not_blank"))]
    pub title: String,

    #[validate(length(min = 1, max = 2000), custom(function = "validate_not_blank"))]
    pub message: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct NotificationInsert {
    pub title: String,
    pub message: String,
    pub created_by: Uuid,
}

impl NewNotificationRequest {
    pub fn prepare_for_insert(self, created_by: Uuid) -> NotificationInsert {
        NotificationInsert {
            title: self.title.trim().to_string(),
            message: self.message.trim().to_string(),
            created_by,
        }
    }
}
