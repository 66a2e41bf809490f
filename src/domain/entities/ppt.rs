use actix_multipart::form::{tempfile::TempFile, text::Text, MultipartForm};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use crate::entities::validation::validate_not_blank;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
pub struct Ppt {
    pub id: Uuid,
    pub company_name: String,
    pub file_url: String,
    pub uploaded_by: Uuid,
    pub uploaded_at: DateTime<Utc>,
}

/// Text part of the PPT upload form.
#[derive(Debug, Clone, Validate)]
pub struct PptMetadata {
    #[validate(length(min = 1, max = 120), custom(function = "validate_not_blank"))]
    pub company_name: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct PptInsert {
    pub company_name: String,
    pub file_url: String,
    pub uploaded_by: Uuid,
}

#[derive(Debug, MultipartForm)]
pub struct PptUpload {
    pub company_name: Text<String>,
    pub ppt: TempFile,
}

impl PptUpload {
    pub fn metadata(&self) -> PptMetadata {
        PptMetadata {
            company_name: self.company_name.0.clone(),
        }
    }
}
