use actix_multipart::form::{tempfile::TempFile, MultipartForm};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use crate::entities::{
    grade::Grade,
    option_fields::OptionField,
    validation::{validate_optional_code, validate_optional_phone, validate_optional_roll_number},
};

/// Columns selected for a profile; `cgpa` is NUMERIC and read back as text.
pub const PROFILE_COLUMNS: &str =
    "id, user_id, roll_number, cgpa::TEXT AS cgpa, branch, course, phone, resume_url, updated_at";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
pub struct StudentProfile {
    pub id: Uuid,
    pub user_id: Uuid,
    pub roll_number: Option<String>,
    pub cgpa: Option<Grade>,
    pub branch: Option<String>,
    pub course: Option<String>,
    pub phone: Option<String>,
    pub resume_url: Option<String>,
    pub updated_at: DateTime<Utc>,
}

impl StudentProfile {
    /// The three attributes eligibility needs, when all are present.
    pub fn academic_record(&self) -> Option<(Grade, &str, &str)> {
        match (self.cgpa, self.branch.as_deref(), self.course.as_deref()) {
            (Some(cgpa), Some(branch), Some(course)) => Some((cgpa, branch, course)),
            _ => None,
        }
    }
}

#[derive(Debug, Default, Deserialize, Validate)]
#[serde(default)]
pub struct UpdateProfileRequest {
    #[validate(custom(function = "validate_optional_roll_number"))]
    pub roll_number: OptionField<String>,

    pub cgpa: OptionField<Grade>,

    #[validate(custom(function = "validate_optional_code"))]
    pub branch: OptionField<String>,

    #[validate(custom(function = "validate_optional_code"))]
    pub course: OptionField<String>,

    #[validate(custom(function = "validate_optional_phone"))]
    pub phone: OptionField<String>,
}

/// A normalized set of profile changes handed to the repository.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProfileChanges {
    pub roll_number: OptionField<String>,
    pub cgpa: OptionField<Grade>,
    pub branch: OptionField<String>,
    pub course: OptionField<String>,
    pub phone: OptionField<String>,
    pub resume_url: OptionField<String>,
}

impl ProfileChanges {
    pub fn resume(url: String) -> Self {
        ProfileChanges {
            resume_url: OptionField::SetToValue(url),
            ..Default::default()
        }
    }
}

fn trimmed(field: OptionField<String>) -> OptionField<String> {
    field.map_value(|v| v.trim().to_string())
}

impl From<UpdateProfileRequest> for ProfileChanges {
    fn from(request: UpdateProfileRequest) -> Self {
        ProfileChanges {
            roll_number: trimmed(request.roll_number),
            cgpa: request.cgpa,
            branch: trimmed(request.branch),
            course: trimmed(request.course),
            phone: trimmed(request.phone),
            resume_url: OptionField::Unchanged,
        }
    }
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ResumeUploadResponse {
    pub message: String,
    pub file_url: String,
}

#[derive(Debug, MultipartForm)]
pub struct ResumeUpload {
    #[multipart(rename = "resume")]
    pub resume: TempFile,
}
